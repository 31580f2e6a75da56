use axum::extract::FromRef;
use catalog_domain::options::{AppOptions, CorsOptions, SwaggerOptions, VersioningOptions};
use catalog_kernel::config::Configuration;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug)]
pub struct AppStateInner {
    pub config: Configuration,
    pub app: AppOptions,
    pub cors: CorsOptions,
    pub versioning: VersioningOptions,
    /// `None` when no `swaggerOptions` section is configured.
    pub swagger: Option<SwaggerOptions>,
}

/// Immutable state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: Configuration,
        app: AppOptions,
        cors: CorsOptions,
        versioning: VersioningOptions,
        swagger: Option<SwaggerOptions>,
    ) -> Self {
        Self { inner: Arc::new(AppStateInner { config, app, cors, versioning, swagger }) }
    }

    /// Route prefix of the versioned API (`/api/v1`); empty when neither an API
    /// prefix nor a URI version is configured.
    #[must_use]
    pub fn api_base(&self) -> String {
        let segments = [
            self.app.api_prefix.as_deref().map(|p| p.trim_matches('/').to_owned()),
            self.versioning.uri_segment(),
        ];
        segments
            .into_iter()
            .flatten()
            .filter(|segment| !segment.is_empty())
            .fold(String::new(), |mut base, segment| {
                base.push('/');
                base.push_str(&segment);
                base
            })
    }
}

impl Deref for AppState {
    type Target = AppStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<AppState> for Configuration {
    fn from_ref(state: &AppState) -> Self {
        state.inner.config.clone()
    }
}
