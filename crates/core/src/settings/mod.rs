//! Application settings, stored as TOML.
//!
//! Every field has a default, so a settings file only needs the values it
//! changes:
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "pretty"
//!
//! [navigation]
//! default-tint-color = "#1C1C1E"
//!
//! [navigation.push-transition]
//! kind = "opacity"
//! ```

use crate::color::{Color, DEFAULT_TINT};
use crate::helpers::{load_toml, save_toml};
use crate::view::transition::{Transition, Transitions};
use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_PATH: &str = "Settings.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub logging: LoggingSettings,
    pub navigation: NavigationSettings,
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, Error> {
        load_toml(path.as_ref()).context("can't load settings")
    }

    /// Loads `path`, falling back to the defaults when it is missing or invalid.
    ///
    /// Logging isn't configured yet when settings are read, so problems are
    /// reported on stderr.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Settings {
        let path = path.as_ref();
        if !path.exists() {
            return Settings::default();
        }

        match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{e:#}; using default settings");
                Settings::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        save_toml(self, path.as_ref()).context("can't save settings")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn extension(self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "log",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    /// Filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Log files kept in `directory`, `0` keeps them all.
    pub max_files: usize,
    /// Where run logs go. Logs are written to stderr when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: true,
            level: "info".to_string(),
            max_files: 3,
            directory: None,
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NavigationSettings {
    /// Tint of the navigation bar until some content declares one.
    pub default_tint_color: Color,
    pub push_transition: Transition,
    pub pop_transition: Transition,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        let transitions = Transitions::default();
        NavigationSettings {
            default_tint_color: DEFAULT_TINT,
            push_transition: transitions.push,
            pop_transition: transitions.pop,
        }
    }
}

impl NavigationSettings {
    pub fn transitions(&self) -> Transitions {
        Transitions {
            push: self.push_transition.clone(),
            pop: self.pop_transition.clone(),
        }
    }
}
