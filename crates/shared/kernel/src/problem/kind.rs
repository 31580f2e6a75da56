use strum_macros::IntoStaticStr;

/// Error category declared by every error construction site.
///
/// The mapper matches on this exhaustively instead of inspecting error shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum ErrorKind {
    /// Carries an explicit HTTP status that is used verbatim.
    #[strum(serialize = "HttpError")]
    Http(u16),
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    RequestTimeout,
    Conflict,
    Gone,
    PayloadTooLarge,
    UnsupportedMediaType,
    UnprocessableEntity,
    InternalServerError,
    NotImplemented,
    ImATeapot,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    PreconditionFailed,
    HttpVersionNotSupported,
    /// Caller input of the wrong type.
    InvalidType,
    /// Caller input outside the accepted range.
    OutOfRange,
    /// Caller input that failed to parse.
    Syntax,
    #[strum(serialize = "Error")]
    Unclassified,
}

impl ErrorKind {
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Http(status) => status,
            Self::BadRequest | Self::InvalidType | Self::OutOfRange | Self::Syntax => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::NotAcceptable => 406,
            Self::RequestTimeout => 408,
            Self::Conflict => 409,
            Self::Gone => 410,
            Self::PreconditionFailed => 412,
            Self::PayloadTooLarge => 413,
            Self::UnsupportedMediaType => 415,
            Self::ImATeapot => 418,
            Self::UnprocessableEntity => 422,
            Self::InternalServerError | Self::Unclassified => 500,
            Self::NotImplemented => 501,
            Self::BadGateway => 502,
            Self::ServiceUnavailable => 503,
            Self::GatewayTimeout => 504,
            Self::HttpVersionNotSupported => 505,
        }
    }

    /// Kinds whose payload may carry field-level validation messages.
    #[must_use]
    pub const fn carries_validation_errors(self) -> bool {
        matches!(self, Self::BadRequest | Self::UnprocessableEntity | Self::Http(400 | 422))
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}
