/// Process environment variable that selects the runtime environment.
pub const ENVIRONMENT_VARIABLE: &str = "APP_ENV";
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Directory (relative to the working directory) holding the settings files.
pub const CONFIG_DIR: &str = "config";
pub const BASE_SETTINGS_FILE: &str = "appsettings.json";
/// Directory under [`CONFIG_DIR`] holding `.env.<environment>` files.
pub const DOTENV_DIR: &str = "env";

/// Separator between nesting levels in section paths (`appOptions:port`).
pub const SECTION_SEPARATOR: char = ':';
/// Separator between nesting levels in environment variable names (`APP_OPTIONS__PORT`).
pub const ENV_NESTING_SEPARATOR: &str = "__";

// Well-known option sections.
pub const APP_OPTIONS: &str = "appOptions";
pub const CORS_OPTIONS: &str = "corsOptions";
pub const LOGGER_OPTIONS: &str = "loggerOptions";
pub const VERSIONING_OPTIONS: &str = "versioningOptions";
pub const SWAGGER_OPTIONS: &str = "swaggerOptions";

pub const PROBLEM_JSON_CONTENT_TYPE: &str = "application/problem+json";
pub const RESPONSE_TIME_HEADER: &str = "x-response-time";
/// Request header read by header versioning when `headerName` is not configured.
pub const DEFAULT_VERSION_HEADER: &str = "x-api-version";
/// Path segment of the API reference when `swaggerOptions.path` is not configured.
pub const DEFAULT_DOCS_PATH: &str = "swagger";

// OpenAPI tags.
pub const SYSTEM_TAG: &str = "System";
pub const SERVICE_TAG: &str = "Service";
