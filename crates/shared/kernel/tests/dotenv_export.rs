use catalog_kernel::config::ConfigResolver;
use catalog_kernel::domain::environment::Environment;
use std::fs;
use tempfile::TempDir;

fn dotenv_dir(contents: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("env")).unwrap();
    fs::write(dir.path().join("env/.env.development"), contents).unwrap();
    dir
}

#[test]
fn live_resolution_exports_dotenv_without_overriding() {
    let original_path = std::env::var("PATH").unwrap();
    let dir = dotenv_dir("CATALOG_EXPORTED_FROM_DOTENV=1\nPATH=/from/dotenv\n");

    let config = ConfigResolver::builder()
        .config_dir(dir.path())
        .environment(Environment::Development)
        .resolve();

    assert_eq!(std::env::var("CATALOG_EXPORTED_FROM_DOTENV").as_deref(), Ok("1"));
    assert_eq!(config.env_var("CATALOG_EXPORTED_FROM_DOTENV"), Some("1"));
    assert_eq!(std::env::var("PATH").unwrap(), original_path);
    assert_eq!(config.env_var("PATH"), Some(original_path.as_str()));
}

#[test]
fn snapshot_resolution_keeps_dotenv_private() {
    let dir = dotenv_dir("CATALOG_SNAPSHOT_ONLY=1\n");

    let config = ConfigResolver::builder()
        .config_dir(dir.path())
        .environment(Environment::Development)
        .env_vars([("APP_ENV", "development")])
        .resolve();

    assert_eq!(config.env_var("CATALOG_SNAPSHOT_ONLY"), Some("1"));
    assert!(std::env::var("CATALOG_SNAPSHOT_ONLY").is_err());
}
