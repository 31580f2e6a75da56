use crate::constants::DEFAULT_ENVIRONMENT;
use std::fmt;

/// Runtime environment selected by the `APP_ENV` process variable.
///
/// Names are matched case-insensitively; anything unknown is kept verbatim as
/// [`Environment::Custom`] so that `appsettings.<name>.json` still resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
    Custom(String),
}

impl Environment {
    /// Parses an environment name, falling back to [`Environment::Development`]
    /// for empty or whitespace-only input.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | DEFAULT_ENVIRONMENT => Self::Development,
            "test" => Self::Test,
            "staging" => Self::Staging,
            "production" => Self::Production,
            _ => Self::Custom(trimmed.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => DEFAULT_ENVIRONMENT,
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Stack traces and other internals are only exposed in development.
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Option<&str>> for Environment {
    fn from(name: Option<&str>) -> Self {
        name.map_or_else(Self::default, Self::from_name)
    }
}
