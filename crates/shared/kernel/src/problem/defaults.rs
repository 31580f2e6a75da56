//! Default `type`/`title`/`detail` per HTTP status.

use std::borrow::Cow;

const CLIENT_ERROR_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.5";
const SERVER_ERROR_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.6";
pub const ABOUT_BLANK: &str = "about:blank";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StatusDefault {
    status: u16,
    type_uri: &'static str,
    title: &'static str,
    detail: &'static str,
}

/// Defaults for a status code, either from the table or a generated bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDefaults {
    pub type_uri: Cow<'static, str>,
    pub title: Cow<'static, str>,
    pub detail: Cow<'static, str>,
}

impl From<&StatusDefault> for ProblemDefaults {
    fn from(d: &StatusDefault) -> Self {
        Self {
            type_uri: Cow::Borrowed(d.type_uri),
            title: Cow::Borrowed(d.title),
            detail: Cow::Borrowed(d.detail),
        }
    }
}

macro_rules! defaults {
    ($( $status:literal => $type_uri:literal, $title:literal, $detail:literal; )*) => {
        &[ $( StatusDefault { status: $status, type_uri: $type_uri, title: $title, detail: $detail }, )* ]
    };
}

// Sorted by status; looked up with a binary search.
static STATUS_DEFAULTS: &[StatusDefault] = defaults! {
    400 => "https://tools.ietf.org/html/rfc9110#section-15.5.1", "Bad Request",
        "The request could not be understood or was missing required parameters.";
    401 => "https://tools.ietf.org/html/rfc9110#section-15.5.2", "Unauthorized",
        "Authentication is required to access this resource.";
    402 => "https://tools.ietf.org/html/rfc9110#section-15.5.3", "Payment Required",
        "Payment is required to access this resource.";
    403 => "https://tools.ietf.org/html/rfc9110#section-15.5.4", "Forbidden",
        "You do not have permission to access this resource.";
    404 => "https://tools.ietf.org/html/rfc9110#section-15.5.5", "Not Found",
        "The requested resource was not found.";
    405 => "https://tools.ietf.org/html/rfc9110#section-15.5.6", "Method Not Allowed",
        "The requested method is not allowed for this resource.";
    406 => "https://tools.ietf.org/html/rfc9110#section-15.5.7", "Not Acceptable",
        "The requested resource is not available in a format that the client accepts.";
    407 => "https://tools.ietf.org/html/rfc9110#section-15.5.8", "Proxy Authentication Required",
        "Proxy authentication is required.";
    408 => "https://tools.ietf.org/html/rfc9110#section-15.5.9", "Request Timeout",
        "The request timed out.";
    409 => "https://tools.ietf.org/html/rfc9110#section-15.5.10", "Conflict",
        "The request could not be completed due to a conflict with the current state of the resource.";
    410 => "https://tools.ietf.org/html/rfc9110#section-15.5.11", "Gone",
        "The requested resource is no longer available and will not be available again.";
    411 => "https://tools.ietf.org/html/rfc9110#section-15.5.12", "Length Required",
        "The \"Content-Length\" header is required.";
    412 => "https://tools.ietf.org/html/rfc9110#section-15.5.13", "Precondition Failed",
        "One or more preconditions given in the request header fields evaluated to false.";
    413 => "https://tools.ietf.org/html/rfc9110#section-15.5.14", "Content Too Large",
        "The request entity is larger than the server is willing or able to process.";
    414 => "https://tools.ietf.org/html/rfc9110#section-15.5.15", "URI Too Long",
        "The URI provided was too long for the server to process.";
    415 => "https://tools.ietf.org/html/rfc9110#section-15.5.16", "Unsupported Media Type",
        "The request entity has a media type which the server or resource does not support.";
    416 => "https://tools.ietf.org/html/rfc9110#section-15.5.17", "Range Not Satisfiable",
        "The portion of the data requested cannot be returned by the server.";
    417 => "https://tools.ietf.org/html/rfc9110#section-15.5.18", "Expectation Failed",
        "The expectation given in the Expect request-header field could not be met by this server.";
    418 => "https://tools.ietf.org/html/rfc2324#section-2.3.2", "I'm a teapot",
        "The server refuses to brew coffee because it is, permanently, a teapot.";
    421 => "https://tools.ietf.org/html/rfc9110#section-15.5.20", "Misdirected Request",
        "The request was directed at a server that is not able to produce a response.";
    422 => "https://tools.ietf.org/html/rfc4918#section-11.2", "Unprocessable Entity",
        "The request was well-formed but was unable to be followed due to semantic errors.";
    423 => "https://tools.ietf.org/html/rfc4918#section-11.3", "Locked",
        "The resource that is being accessed is locked.";
    424 => "https://tools.ietf.org/html/rfc4918#section-11.4", "Failed Dependency",
        "The request failed due to failure of a previous request.";
    425 => "https://tools.ietf.org/html/rfc8470#section-5.2", "Too Early",
        "The server is unwilling to risk processing a request that might be replayed.";
    426 => "https://tools.ietf.org/html/rfc9110#section-15.5.22", "Upgrade Required",
        "The client should switch to a different protocol.";
    428 => "https://tools.ietf.org/html/rfc6585#section-3", "Precondition Required",
        "The origin server requires the request to be conditional.";
    429 => "https://tools.ietf.org/html/rfc6585#section-4", "Too Many Requests",
        "The user has sent too many requests in a given amount of time.";
    431 => "https://tools.ietf.org/html/rfc6585#section-5", "Request Header Fields Too Large",
        "The server is unwilling to process the request because its header fields are too large.";
    451 => "https://tools.ietf.org/html/rfc7725#section-3", "Unavailable For Legal Reasons",
        "The server is denying access to the resource as a consequence of a legal demand.";
    500 => "https://tools.ietf.org/html/rfc9110#section-15.6.1", "Internal Server Error",
        "An error occurred while processing your request.";
    501 => "https://tools.ietf.org/html/rfc9110#section-15.6.2", "Not Implemented",
        "The server does not support the functionality required to fulfill the request.";
    502 => "https://tools.ietf.org/html/rfc9110#section-15.6.3", "Bad Gateway",
        "The server, while acting as a gateway or proxy, received an invalid response from the upstream server.";
    503 => "https://tools.ietf.org/html/rfc9110#section-15.6.4", "Service Unavailable",
        "The server is currently unable to handle the request due to temporary overloading or maintenance.";
    504 => "https://tools.ietf.org/html/rfc9110#section-15.6.5", "Gateway Timeout",
        "The server, while acting as a gateway or proxy, did not receive a timely response from the upstream server.";
    505 => "https://tools.ietf.org/html/rfc9110#section-15.6.6", "HTTP Version Not Supported",
        "The server does not support the HTTP protocol version used in the request.";
    506 => "https://tools.ietf.org/html/rfc2295#section-8.1", "Variant Also Negotiates",
        "Transparent content negotiation for the request results in a circular reference.";
    507 => "https://tools.ietf.org/html/rfc4918#section-11.5", "Insufficient Storage",
        "The server is unable to store the representation needed to complete the request.";
    508 => "https://tools.ietf.org/html/rfc5842#section-7.2", "Loop Detected",
        "The server detected an infinite loop while processing the request.";
    510 => "https://tools.ietf.org/html/rfc2774#section-7", "Not Extended",
        "Further extensions to the request are required for the server to fulfill it.";
    511 => "https://tools.ietf.org/html/rfc6585#section-6", "Network Authentication Required",
        "The client needs to authenticate to gain network access.";
};

fn lookup(status: u16) -> Option<&'static StatusDefault> {
    STATUS_DEFAULTS
        .binary_search_by_key(&status, |d| d.status)
        .ok()
        .and_then(|idx| STATUS_DEFAULTS.get(idx))
}

/// Table entry for `status`, or the client/server bucket for unlisted 4xx/5xx codes.
/// `None` outside 400..=599.
#[must_use]
pub fn default_problem_details(status: u16) -> Option<ProblemDefaults> {
    lookup(status).map(ProblemDefaults::from).or_else(|| bucket(status))
}

/// Bucket defaults for any status; `about:blank` outside 400..=599.
#[must_use]
pub fn fallback_problem_details(status: u16) -> ProblemDefaults {
    bucket(status).unwrap_or_else(|| ProblemDefaults {
        type_uri: Cow::Borrowed(ABOUT_BLANK),
        title: Cow::Borrowed("Unknown Error"),
        detail: Cow::Owned(format!("An unknown error occurred (status code: {status}).")),
    })
}

fn bucket(status: u16) -> Option<ProblemDefaults> {
    match status {
        400..=499 => Some(ProblemDefaults {
            type_uri: Cow::Borrowed(CLIENT_ERROR_TYPE),
            title: Cow::Borrowed("Client Error"),
            detail: Cow::Owned(format!("A client error occurred (status code: {status}).")),
        }),
        500..=599 => Some(ProblemDefaults {
            type_uri: Cow::Borrowed(SERVER_ERROR_TYPE),
            title: Cow::Borrowed("Server Error"),
            detail: Cow::Owned(format!("A server error occurred (status code: {status}).")),
        }),
        _ => None,
    }
}

#[must_use]
pub fn has_default_problem_details(status: u16) -> bool {
    lookup(status).is_some()
}

/// Every status code with a table entry, ascending.
#[must_use]
pub fn available_status_codes() -> Vec<u16> {
    STATUS_DEFAULTS.iter().map(|d| d.status).collect()
}

fn resolved(status: u16) -> ProblemDefaults {
    default_problem_details(status).unwrap_or_else(|| fallback_problem_details(status))
}

#[must_use]
pub fn type_for_status(status: u16) -> Cow<'static, str> {
    resolved(status).type_uri
}

#[must_use]
pub fn title_for_status(status: u16) -> Cow<'static, str> {
    resolved(status).title
}

#[must_use]
pub fn detail_for_status(status: u16) -> Cow<'static, str> {
    resolved(status).detail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        assert!(STATUS_DEFAULTS.windows(2).all(|w| w[0].status < w[1].status));
    }

    #[test]
    fn known_status_uses_table() {
        let d = default_problem_details(404).expect("404 is listed");
        assert_eq!(d.title, "Not Found");
        assert_eq!(d.type_uri, "https://tools.ietf.org/html/rfc9110#section-15.5.5");
        assert!(has_default_problem_details(404));
    }

    #[test]
    fn unlisted_codes_fall_into_buckets() {
        let client = default_problem_details(499).expect("4xx bucket");
        assert_eq!(client.title, "Client Error");
        assert_eq!(client.type_uri, CLIENT_ERROR_TYPE);
        assert!(client.detail.contains("499"));

        let server = default_problem_details(599).expect("5xx bucket");
        assert_eq!(server.title, "Server Error");
        assert_eq!(server.type_uri, SERVER_ERROR_TYPE);
        assert!(!has_default_problem_details(599));
    }

    #[test]
    fn outside_error_range_is_unknown() {
        assert!(default_problem_details(302).is_none());
        assert_eq!(type_for_status(302), ABOUT_BLANK);
        assert_eq!(title_for_status(700), "Unknown Error");
        assert!(detail_for_status(700).contains("700"));
    }

    #[test]
    fn available_codes_cover_the_table() {
        let codes = available_status_codes();
        assert_eq!(codes.first(), Some(&400));
        assert_eq!(codes.last(), Some(&511));
        assert!(codes.contains(&418));
        assert!(!codes.contains(&419));
    }
}
