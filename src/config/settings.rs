use std::path::{Component, Path, PathBuf};
use std::fs;
use serde::{Deserialize, Serialize};
use crate::error::{Result, LinkError, ErrorContext};

/// Subdirectory appended to a project root when no explicit target is given.
pub const DEFAULT_SUBDIR: &str = "node_modules";

/// Main modlink configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkerConfig {
    pub link: LinkSettings,
    pub ui: UiConfig,
}

/// Link workflow preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkSettings {
    /// Directory name created inside a project root (`--project`)
    pub subdir: String,
    /// Overwrite an existing target without asking
    pub assume_yes: bool,
}

/// UI and display configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to show colored output
    pub colored: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            subdir: DEFAULT_SUBDIR.to_string(),
            assume_yes: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            colored: std::env::var_os("NO_COLOR").is_none(),
            log_level: "warn".to_string(),
        }
    }
}

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: [&str; 4] = ["link.subdir", "link.assume_yes", "ui.colored", "ui.log_level"];

impl LinkerConfig {
    /// Load configuration from file or fall back to defaults
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_io_context(|| format!("reading config file {}", config_path.display()))?;

            toml::from_str(&content)
                .map_err(|e| LinkError::Config {
                    message: format!("Invalid TOML: {}", e),
                    path: Some(config_path.to_path_buf()),
                })
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, config_path: P) -> Result<()> {
        let config_path = config_path.as_ref();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_io_context(|| format!("creating config directory {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| LinkError::Config {
                message: format!("Failed to serialize config: {}", e),
                path: Some(config_path.to_path_buf()),
            })?;

        fs::write(config_path, content)
            .with_io_context(|| format!("writing config file {}", config_path.display()))?;

        Ok(())
    }

    /// Get global configuration file path (~/.config/modlink/config.toml)
    pub fn global_config_path() -> Result<PathBuf> {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .ok_or_else(|| LinkError::Config {
                message: "HOME environment variable not set".to_string(),
                path: None,
            })?;
        Ok(Path::new(&home).join(".config").join("modlink").join("config.toml"))
    }

    /// Read a single value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "link.subdir" => Ok(self.link.subdir.clone()),
            "link.assume_yes" => Ok(self.link.assume_yes.to_string()),
            "ui.colored" => Ok(self.ui.colored.to_string()),
            "ui.log_level" => Ok(self.ui.log_level.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a single value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "link.subdir" => {
                let value = value.trim();
                validate_subdir(value)?;
                self.link.subdir = value.to_string();
            }
            "link.assume_yes" => self.link.assume_yes = parse_bool(key, value)?,
            "ui.colored" => self.ui.colored = parse_bool(key, value)?,
            "ui.log_level" => {
                let level = value.trim().to_lowercase();
                if !["error", "warn", "info", "debug", "trace"].contains(&level.as_str()) {
                    return Err(LinkError::Config {
                        message: format!("unknown log level '{}'", value),
                        path: None,
                    });
                }
                self.ui.log_level = level;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

/// A subdirectory must be one plain name: no separators, `.` or `..`.
pub fn validate_subdir(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single || name.contains(['/', '\\']) {
        return Err(LinkError::Config {
            message: format!("link.subdir must be a single directory name, got '{}'", name),
            path: None,
        });
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(LinkError::Config {
            message: format!("{} expects true or false, got '{}'", key, value),
            path: None,
        }),
    }
}

fn unknown_key(key: &str) -> LinkError {
    LinkError::Config {
        message: format!("unknown key '{}' (known: {})", key, CONFIG_KEYS.join(", ")),
        path: None,
    }
}
