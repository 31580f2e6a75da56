//! Layered configuration resolution.
//!
//! Precedence, lowest first:
//! 1. `appsettings.json`
//! 2. `appsettings.<environment>.json`
//! 3. `env/.env.<environment>` (only for variables not already set; exported to the
//!    process when resolving against the live environment)
//! 4. process environment variables (`SECTION__NESTED_KEY` -> `section.nestedKey`)
//!
//! The result is an immutable [`Configuration`] built once at startup and handed
//! to every consumer explicitly.

mod convert;
mod env;
mod layer;
mod merge;

pub use convert::convert_value;
pub use env::{camel_to_env_name, env_segment_to_camel, env_to_tree, section_to_env_name};
pub use layer::{
    ConfigLayer, ConfigLayerSource, LayerStatus, load_dotenv_file, load_json_file,
};
pub use merge::{merge_values, merged};

use catalog_domain::constants::{
    BASE_SETTINGS_FILE, CONFIG_DIR, DOTENV_DIR, ENVIRONMENT_VARIABLE, SECTION_SEPARATOR,
};
use catalog_domain::environment::Environment;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Errors raised while loading files strictly or binding sections.
#[catalog_derive::catalog_error]
pub enum ConfigError {
    /// A section required by the caller is absent.
    #[error("Config section '{path}' is missing")]
    MissingSection { path: Cow<'static, str> },

    /// The section exists but does not fit the requested type.
    #[error("Failed to bind config section{}: {source}", format_context(.context))]
    Bind { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Failed to read config file{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid config file{}: {message}", format_context(.context))]
    Parse { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid dotenv file{}: {source}", format_context(.context))]
    Dotenv { source: dotenvy::Error, context: Option<Cow<'static, str>> },
}

/// Builder that collects the layer sources and produces a [`Configuration`].
#[must_use = "builders do nothing unless you call .resolve()"]
#[derive(Debug, Default)]
pub struct ConfigResolver {
    config_dir: Option<PathBuf>,
    environment: Option<Environment>,
    env_vars: Option<BTreeMap<String, String>>,
}

impl ConfigResolver {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Directory holding `appsettings*.json` and `env/`. Defaults to `./config`.
    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Overrides the environment otherwise read from `APP_ENV`.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Replaces the live process environment with an explicit snapshot.
    ///
    /// With a snapshot the dotenv entries stay inside the resolved [`Configuration`];
    /// otherwise they are also exported to the process for variables not yet set.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Loads every layer and merges them. Never fails: unreadable layers degrade
    /// to empty ones and are reported through [`Configuration::layers`].
    #[must_use]
    pub fn resolve(self) -> Configuration {
        let live = self.env_vars.is_none();
        let mut env_vars = self.env_vars.unwrap_or_else(process_env_vars);
        let environment = self.environment.unwrap_or_else(|| {
            Environment::from(env_vars.get(ENVIRONMENT_VARIABLE).map(String::as_str))
        });
        let dir = self.config_dir.unwrap_or_else(|| PathBuf::from(CONFIG_DIR));

        let (mut file_tree, base_layer) =
            layer::json_layer(ConfigLayerSource::BaseFile, &dir.join(BASE_SETTINGS_FILE));
        let (env_file, env_file_layer) = layer::json_layer(
            ConfigLayerSource::EnvironmentFile,
            &dir.join(format!("appsettings.{environment}.json")),
        );
        merge_values(&mut file_tree, &env_file);

        let dotenv_path = dir.join(DOTENV_DIR).join(format!(".env.{environment}"));
        let (dotenv, dotenv_layer) = layer::dotenv_layer(&dotenv_path);
        if live && dotenv_layer.status == LayerStatus::Loaded {
            layer::export_dotenv(&dotenv_path);
        }
        for (key, value) in dotenv {
            env_vars.entry(key).or_insert(value);
        }

        let env_tree = env_to_tree(env_vars.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let tree = merged(file_tree.clone(), &env_tree);

        let layers = vec![
            base_layer,
            env_file_layer,
            dotenv_layer,
            ConfigLayer { source: ConfigLayerSource::Process, path: None, status: LayerStatus::Loaded },
        ];
        let failed = layers.iter().filter(|layer| layer.is_failed()).count();

        info!(
            environment = %environment,
            dir = %dir.display(),
            variables = env_vars.len(),
            failed_layers = failed,
            "Configuration resolved"
        );

        Configuration {
            inner: Arc::new(ConfigurationInner { environment, tree, file_tree, env_vars, layers }),
        }
    }
}

fn process_env_vars() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

#[derive(Debug)]
struct ConfigurationInner {
    environment: Environment,
    tree: Value,
    file_tree: Value,
    env_vars: BTreeMap<String, String>,
    layers: Vec<ConfigLayer>,
}

/// The merged, read-only configuration. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Configuration {
    inner: Arc<ConfigurationInner>,
}

impl Configuration {
    /// Wraps an already merged tree (no file layers, no environment).
    #[must_use]
    pub fn from_value(tree: Value, environment: Environment) -> Self {
        let tree = if tree.is_object() { tree } else { Value::Object(Map::new()) };
        Self {
            inner: Arc::new(ConfigurationInner {
                environment,
                file_tree: tree.clone(),
                tree,
                env_vars: BTreeMap::new(),
                layers: Vec::new(),
            }),
        }
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.inner.environment
    }

    #[must_use]
    pub fn tree(&self) -> &Value {
        &self.inner.tree
    }

    #[must_use]
    pub fn layers(&self) -> &[ConfigLayer] {
        &self.inner.layers
    }

    /// `true` when at least one layer failed to load and was replaced by an empty one.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.inner.layers.iter().any(ConfigLayer::is_failed)
    }

    /// Effective variable (live environment first, then the dotenv file).
    #[must_use]
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.inner.env_vars.get(key).map(String::as_str)
    }

    /// Walks a colon-separated path (`openTelemetryOptions:aspireDashboardOTLPOptions`).
    /// Numeric segments index into arrays (`corsOptions:allowedOrigins:0`). An empty
    /// path yields the root.
    #[must_use]
    pub fn section(&self, path: &str) -> Option<&Value> {
        find_section(&self.inner.tree, path)
    }

    /// Deserializes the section at `path`; `Ok(None)` when it is absent.
    ///
    /// # Errors
    /// Returns [`ConfigError::Bind`] when the section does not fit `T`.
    pub fn bind_section<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        self.section(path).map(|value| deserialize(value.clone(), path)).transpose()
    }

    /// Same as [`Self::bind_section`].
    ///
    /// # Errors
    /// Returns [`ConfigError::Bind`] when the section does not fit `T`.
    pub fn get_option<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        self.bind_section(path)
    }

    /// Like [`Self::bind_section`] but an absent section is an error.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingSection`] or [`ConfigError::Bind`].
    pub fn require_section<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        self.bind_section(path)?
            .ok_or_else(|| ConfigError::MissingSection { path: path.to_owned().into() })
    }

    /// Binds a section after converting string leaves to the type of the file value
    /// at the same position (`"3000"` becomes `3000` when the file holds a number).
    ///
    /// # Errors
    /// Returns [`ConfigError::Bind`] when the converted section does not fit `T`.
    pub fn bind_with_conversion<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ConfigError> {
        let Some(section) = self.section(path) else {
            return Ok(None);
        };
        let mut value = section.clone();
        if let Some(base) = find_section(&self.inner.file_tree, path) {
            convert::coerce_to_base(&mut value, base);
        }
        deserialize(value, path).map(Some)
    }

    /// Binds an options type, layering the section over `T::default()`.
    ///
    /// The serialized default, overlaid with the file layers, is the type template for
    /// converting environment strings, so `APP_OPTIONS__PORT=3000` binds to a numeric
    /// port even when no file mentions it. A missing section yields `T::default()`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Bind`] when the default cannot be serialized or the
    /// section does not fit `T`.
    pub fn bind_options<T>(&self, path: &str) -> Result<T, ConfigError>
    where
        T: Default + Serialize + DeserializeOwned,
    {
        let defaults = serde_json::to_value(T::default())
            .map_err(|source| ConfigError::Bind { source, context: Some(path.to_owned().into()) })?;

        let Some(section) = self.section(path) else {
            return Ok(T::default());
        };

        let base = find_section(&self.inner.file_tree, path)
            .map_or_else(|| defaults.clone(), |file| merged(defaults.clone(), file));
        let mut value = section.clone();
        convert::coerce_to_base(&mut value, &base);

        deserialize(merged(defaults, &value), path)
    }
}

fn find_section<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split(SECTION_SEPARATOR).try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    })
}

fn deserialize<T: DeserializeOwned>(value: Value, path: &str) -> Result<T, ConfigError> {
    serde_json::from_value(value)
        .map_err(|source| ConfigError::Bind { source, context: Some(path.to_owned().into()) })
}
