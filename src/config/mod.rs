pub mod settings;

pub use settings::{LinkerConfig, LinkSettings, UiConfig, CONFIG_KEYS, DEFAULT_SUBDIR, validate_subdir};
