use super::{ErrorKind, ProblemSource};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};

static CAPTURE_STACK_TRACES: AtomicBool = AtomicBool::new(true);

/// Turns stack capture for newly created [`AppError`]s on or off.
///
/// On by default, independent of `RUST_BACKTRACE`. Servers running outside
/// development switch it off since the trace is never rendered there.
pub fn set_stack_capture(enabled: bool) {
    CAPTURE_STACK_TRACES.store(enabled, Ordering::Relaxed);
}

#[must_use]
pub fn stack_capture_enabled() -> bool {
    CAPTURE_STACK_TRACES.load(Ordering::Relaxed)
}

/// General-purpose error carrying an explicit [`ErrorKind`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    validation_errors: Vec<String>,
    stack: Box<Backtrace>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            validation_errors: Vec::new(),
            stack: Box::new(if stack_capture_enabled() {
                Backtrace::force_capture()
            } else {
                Backtrace::disabled()
            }),
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// Error without a recognised category; maps to 500 with the title `Error`.
    pub fn unclassified(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unclassified, message)
    }

    /// Explicit HTTP status, used verbatim by the mapper.
    pub fn http(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Http(status), message)
    }

    /// A 400 carrying field-level messages.
    pub fn validation<I, S>(message: impl Into<Cow<'static, str>>, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::bad_request(message).with_validation_errors(errors)
    }

    #[must_use]
    pub fn with_validation_errors<I, S>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validation_errors.extend(errors.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.validation_errors
    }
}

impl ProblemSource for AppError {
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    fn message(&self) -> Option<String> {
        Some(self.message.to_string())
    }

    fn validation_errors(&self) -> Option<Vec<String>> {
        (!self.validation_errors.is_empty()).then(|| self.validation_errors.clone())
    }

    fn stack_trace(&self) -> Option<String> {
        (self.stack.status() == BacktraceStatus::Captured).then(|| self.stack.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_follows_kind() {
        assert_eq!(AppError::unclassified("boom").name(), "Error");
        assert_eq!(AppError::not_found("gone").name(), "NotFound");
        assert_eq!(AppError::http(409, "dup").name(), "HttpError");
    }

    #[test]
    fn validation_errors_only_when_present() {
        assert!(ProblemSource::validation_errors(&AppError::bad_request("bad")).is_none());

        let err = AppError::validation("Invalid input", ["name is required", "age is too low"]);
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.errors(), ["name is required", "age is too low"]);
    }

    #[test]
    fn displays_message() {
        let err = AppError::internal("db down");
        assert_eq!(err.to_string(), "db down");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn stack_is_captured_without_rust_backtrace() {
        let err = AppError::unclassified("boom");
        assert!(err.stack_trace().is_some_and(|stack| !stack.is_empty()));
    }
}
