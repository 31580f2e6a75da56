use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router};
use catalog_domain::options::SwaggerOptions;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::{ContactBuilder, LicenseBuilder, OpenApi};
use utoipa_scalar::{Scalar, Servable};

const BEARER_SCHEME: &str = "bearer";

/// Fills the document metadata from `swaggerOptions` for one version.
pub(crate) fn describe(mut api: OpenApi, options: &SwaggerOptions, version: &str) -> OpenApi {
    api.info.title.clone_from(&options.title);
    api.info.description = Some(options.description.clone()).filter(|d| !d.is_empty());
    version.clone_into(&mut api.info.version);

    if options.author_name.is_some() || options.author_email.is_some() {
        api.info.contact = Some(
            ContactBuilder::new()
                .name(options.author_name.clone())
                .url(options.author_url.clone())
                .email(options.author_email.clone())
                .build(),
        );
    }
    if let Some(name) = &options.license_name {
        api.info.license =
            Some(LicenseBuilder::new().name(name.clone()).url(options.license_url.clone()).build());
    }

    api.components.get_or_insert_with(Default::default).add_security_scheme(
        BEARER_SCHEME,
        SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
    );

    api
}

/// API reference routes: `/<version>/<path>` (Scalar UI), `/<version>/<path>/openapi.json`
/// and `/<path>` redirecting to the first version.
pub(crate) fn routes<S>(api: &OpenApi, options: &SwaggerOptions) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let path = options.docs_path();
    let mut router = Router::new();

    for version in &options.versions {
        let version = version.trim_matches('/');
        let document = describe(api.clone(), options, version);
        let ui = format!("/{version}/{path}");

        let json = document.clone();
        router = router
            .route(
                &format!("{ui}/openapi.json"),
                get(move || {
                    let json = json.clone();
                    async move { Json(json) }
                }),
            )
            .merge(Scalar::with_url(ui, document));
    }

    let target = format!("/{}/{path}", options.default_version().trim_matches('/'));
    router.route(
        &format!("/{path}"),
        get(move || {
            let target = target.clone();
            async move { Redirect::temporary(&target) }
        }),
    )
}
