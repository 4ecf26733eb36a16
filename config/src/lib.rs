//! Configuration for Stepwise.
//!
//! Read from `~/.stepwise/config.toml`:
//!
//! ```toml
//! [navigation]
//! bounds = "pass-through"   # or "clamp" / "reject"
//!
//! [ui]
//! ascii_only = false
//! high_contrast = false
//! ```
//!
//! `STEPWISE_BOUNDS` overrides `navigation.bounds`.

use std::error::Error as _;
use std::{env, fs, path::Path, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

use stepwise_types::{BoundsPolicy, UiOptions};

/// Environment variable overriding `navigation.bounds`.
pub const BOUNDS_ENV: &str = "STEPWISE_BOUNDS";

#[derive(Debug, Default, Deserialize)]
pub struct StepwiseConfig {
    pub navigation: Option<NavigationConfig>,
    pub ui: Option<UiOptions>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NavigationConfig {
    /// How the form treats navigation past either end: "pass-through",
    /// "clamp" or "reject".
    pub bounds: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl StepwiseConfig {
    /// Load the user config. A missing, unreadable or malformed file is
    /// treated as absent; the last two are logged.
    #[must_use]
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                match err.source() {
                    Some(source) => tracing::warn!("{err}: {source}"),
                    None => tracing::warn!("{err}"),
                }
                None
            }
        }
    }

    /// Load from an explicit path. `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Effective bounds policy: `STEPWISE_BOUNDS`, then the config file, then
    /// the default.
    #[must_use]
    pub fn bounds_policy(&self) -> BoundsPolicy {
        let from_env = env::var(BOUNDS_ENV).ok();
        resolve_bounds(self.configured_bounds(), from_env.as_deref())
    }

    fn configured_bounds(&self) -> Option<&str> {
        self.navigation
            .as_ref()
            .and_then(|navigation| navigation.bounds.as_deref())
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui.unwrap_or_default()
    }
}

/// Pick the bounds policy from an optional config value and an optional
/// environment override. Unknown spellings are logged and skipped.
#[must_use]
pub fn resolve_bounds(configured: Option<&str>, from_env: Option<&str>) -> BoundsPolicy {
    for (source, raw) in [(BOUNDS_ENV, from_env), ("navigation.bounds", configured)] {
        let Some(raw) = raw else {
            continue;
        };
        match raw.parse::<BoundsPolicy>() {
            Ok(policy) => return policy,
            Err(err) => tracing::warn!("Ignoring {source}: {err}"),
        }
    }
    BoundsPolicy::default()
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".stepwise").join("config.toml"))
}
