//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsopml/rsopml.toml`
//! 3. Environment variables: `RSOPML_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{OutlineError, OutlineResult};

/// Unified configuration for rsopml.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Title written into the head of exported documents
    pub export_title: String,
    /// Default filename for the export command
    pub export_filename: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_title: "Exported OPML".to_string(),
            export_filename: "exported_opml.opml".to_string(),
        }
    }
}

/// Get the XDG config directory for rsopml.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsopml").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsopml.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> OutlineResult<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("export_title", defaults.export_title.clone())
            .map_err(config_err)?
            .set_default("export_filename", defaults.export_filename.clone())
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        builder = builder.add_source(Environment::with_prefix("RSOPML"));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> OutlineResult<String> {
        toml::to_string_pretty(self).map_err(|e| OutlineError::Config(e.to_string()))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rsopml configuration
#
# Location: ~/.config/rsopml/rsopml.toml
# Environment variables with the RSOPML_ prefix override file values.

# Title written into the head of exported documents
# export_title = "Exported OPML"

# Default filename for the export command
# export_filename = "exported_opml.opml"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> OutlineError {
    OutlineError::Config(e.to_string())
}
