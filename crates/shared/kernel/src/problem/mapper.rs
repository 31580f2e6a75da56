use super::{ErrorKind, ProblemDetails, STACK_TRACE_KEY};
use std::borrow::Cow;
use std::fmt::Debug;

/// An error that can be rendered as problem details.
///
/// Implemented by [`super::AppError`] and generated by `#[catalog_error]` for enums
/// whose variants carry `#[kind(...)]`.
pub trait ProblemSource: Debug + Send + Sync {
    fn kind(&self) -> ErrorKind;

    /// Short error name used as the problem `title` when a message is present.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.kind().name())
    }

    fn message(&self) -> Option<String> {
        None
    }

    /// Field-level validation messages.
    fn validation_errors(&self) -> Option<Vec<String>> {
        None
    }

    fn stack_trace(&self) -> Option<String> {
        None
    }
}

/// Stateless mapping from errors to status codes and problem bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemMapper;

impl ProblemMapper {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn map_status_code(&self, err: &(impl ProblemSource + ?Sized)) -> u16 {
        err.kind().status_code()
    }

    /// Builds the raw problem for `err`; call [`super::apply_defaults`] to complete it.
    #[must_use]
    pub fn build_problem_details(
        &self,
        err: &(impl ProblemSource + ?Sized),
        status: u16,
        request_path: &str,
        is_development: bool,
    ) -> ProblemDetails {
        let mut problem = ProblemDetails::new().with_status(status).with_instance(request_path);

        if let Some(message) = err.message() {
            problem.detail = Some(message);
            problem.title = Some(err.name().into_owned());
        }

        if is_development && let Some(stack) = err.stack_trace() {
            problem.extensions.insert(STACK_TRACE_KEY.to_owned(), stack.into());
        }

        if err.kind().carries_validation_errors()
            && let Some(errors) = err.validation_errors()
        {
            problem.errors = Some(errors.into_iter().map(Into::into).collect());
        }

        problem
    }

    /// Maps, builds and defaults in one step.
    #[must_use]
    pub fn resolve(
        &self,
        err: &(impl ProblemSource + ?Sized),
        request_path: &str,
        is_development: bool,
    ) -> ProblemDetails {
        let status = self.map_status_code(err);
        super::apply_defaults(
            self.build_problem_details(err, status, request_path, is_development),
            Some(status),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Bare;

    impl ProblemSource for Bare {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Conflict
        }
    }

    #[derive(Debug)]
    struct Rejected;

    impl ProblemSource for Rejected {
        fn kind(&self) -> ErrorKind {
            ErrorKind::UnprocessableEntity
        }

        fn message(&self) -> Option<String> {
            Some("Order rejected".into())
        }

        fn validation_errors(&self) -> Option<Vec<String>> {
            Some(vec!["quantity must be positive".into()])
        }

        fn stack_trace(&self) -> Option<String> {
            Some("at place_order".into())
        }
    }

    #[test]
    fn message_less_error_keeps_only_status_and_instance() {
        let mapper = ProblemMapper::new();
        let problem = mapper.build_problem_details(&Bare, 409, "/orders", true);

        assert_eq!(problem, ProblemDetails::new().with_status(409).with_instance("/orders"));
    }

    #[test]
    fn copies_validation_errors_and_stack_in_development() {
        let mapper = ProblemMapper::new();
        let status = mapper.map_status_code(&Rejected);
        let problem = mapper.build_problem_details(&Rejected, status, "/orders", true);

        assert_eq!(status, 422);
        assert_eq!(problem.title.as_deref(), Some("UnprocessableEntity"));
        assert_eq!(problem.detail.as_deref(), Some("Order rejected"));
        assert_eq!(problem.errors, Some(vec!["quantity must be positive".into()]));
        assert_eq!(problem.stack_trace(), Some("at place_order"));
    }

    #[test]
    fn stack_is_hidden_outside_development() {
        let problem = ProblemMapper::new().build_problem_details(&Rejected, 422, "/orders", false);
        assert!(problem.stack_trace().is_none());
    }

    #[test]
    fn works_through_trait_objects() {
        let err: Box<dyn ProblemSource> = Box::new(Bare);
        let problem = ProblemMapper::new().resolve(err.as_ref(), "/orders", false);

        assert_eq!(problem.status, Some(409));
        assert_eq!(problem.title.as_deref(), Some("Conflict"));
    }
}
