use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use catalog_domain::options::{VersionType, VersioningOptions};
use catalog_kernel::problem::AppError;
use catalog_kernel::server::ProblemError;
use std::sync::Arc;

/// Header versioning: requests without the header get the default version,
/// requests naming another version are rejected with 404.
#[derive(Debug, Clone)]
pub(crate) struct VersionGuard {
    header: HeaderName,
    default_value: HeaderValue,
    options: Arc<VersioningOptions>,
}

impl VersionGuard {
    /// `Ok(None)` for URI versioning.
    pub(crate) fn from_options(options: &VersioningOptions) -> anyhow::Result<Option<Self>> {
        if options.kind != VersionType::Header {
            return Ok(None);
        }

        let header = HeaderName::try_from(options.version_header()).map_err(|e| {
            anyhow::anyhow!("Invalid versioning header '{}': {e}", options.version_header())
        })?;
        let default_value = HeaderValue::try_from(options.default_version.as_str())
            .map_err(|e| anyhow::anyhow!("Invalid default version '{}': {e}", options.default_version))?;

        Ok(Some(Self { header, default_value, options: Arc::new(options.clone()) }))
    }
}

pub(crate) async fn header_version_middleware(
    State(guard): State<VersionGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    match request.headers().get(&guard.header) {
        None => {
            request.headers_mut().insert(guard.header.clone(), guard.default_value.clone());
        }
        Some(value) => {
            let requested = String::from_utf8_lossy(value.as_bytes());
            if !guard.options.accepts_version(&requested) {
                return ProblemError::new(AppError::not_found(format!(
                    "API version '{requested}' is not supported"
                )))
                .into_response();
            }
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_versioning_needs_no_guard() {
        assert!(VersionGuard::from_options(&VersioningOptions::default()).unwrap().is_none());
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let options = VersioningOptions {
            kind: VersionType::Header,
            header_name: Some("bad header".into()),
            ..VersioningOptions::default()
        };
        assert!(VersionGuard::from_options(&options).is_err());
    }
}
