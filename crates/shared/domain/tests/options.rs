use catalog_domain::options::{
    AppOptions, CorsOptions, LoggerOptions, SwaggerOptions, VersionType, VersioningOptions,
};
use serde_json::json;

#[test]
fn option_defaults_are_sane() {
    let app = AppOptions::default();
    assert_eq!(app.port, 3000);
    assert_eq!(app.api_prefix.as_deref(), Some("api"));

    let cors = CorsOptions::default();
    assert!(cors.allowed_origins.is_empty());
    assert!(!cors.use_credentials);

    let logger = LoggerOptions::default();
    assert_eq!(logger.level, "info");
    assert!(logger.console);
    assert!(logger.path.is_none());
}

#[test]
fn app_options_deserialize_from_camel_case() {
    let raw = json!({
        "port": 8080,
        "apiPrefix": "catalog",
        "serviceName": "products"
    });

    let app: AppOptions = serde_json::from_value(raw).expect("app options deserialize");
    assert_eq!(app.port, 8080);
    assert_eq!(app.api_prefix.as_deref(), Some("catalog"));
    assert_eq!(app.service_name, "products");
    assert!(app.version.is_none());
}

#[test]
fn versioning_uri_segment_follows_type() {
    let uri = VersioningOptions::default();
    assert_eq!(uri.uri_segment().as_deref(), Some("v1"));

    let header: VersioningOptions =
        serde_json::from_value(json!({ "type": "header", "headerName": "x-api-version" }))
            .expect("versioning deserialize");
    assert_eq!(header.kind, VersionType::Header);
    assert_eq!(header.header_name.as_deref(), Some("x-api-version"));
    assert!(header.uri_segment().is_none());
}

#[test]
fn header_versioning_accepts_default_version_only() {
    let options = VersioningOptions { kind: VersionType::Header, ..VersioningOptions::default() };

    assert_eq!(options.version_header(), "x-api-version");
    assert!(options.accepts_version("1"));
    assert!(options.accepts_version(" v1 "));
    assert!(!options.accepts_version("2"));
    assert!(!options.accepts_version("v"));
}

#[test]
fn swagger_options_fall_back_to_defaults() {
    let swagger: SwaggerOptions =
        serde_json::from_value(json!({ "title": "Catalog", "path": "/docs/" })).expect("swagger deserialize");

    assert_eq!(swagger.docs_path(), "docs");
    assert_eq!(swagger.default_version(), "v1");
    assert_eq!(SwaggerOptions { versions: vec![], ..swagger }.default_version(), "v1");
    assert_eq!(SwaggerOptions::default().docs_path(), "swagger");
}
