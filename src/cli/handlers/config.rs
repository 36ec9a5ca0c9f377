use crate::app::AppState;
use crate::cli::commands::ConfigCmd;
use crate::cli::ui::print_success;
use crate::config::LinkerConfig;
use crate::error::{LinkError, Result};

/// Handle configuration operations
pub fn handle_config(state: &mut AppState, cmd: Option<ConfigCmd>) -> Result<()> {
    match cmd.unwrap_or(ConfigCmd::Show) {
        ConfigCmd::Show => {
            let content = toml::to_string_pretty(&state.config).map_err(|e| LinkError::Config {
                message: format!("Failed to serialize config: {}", e),
                path: None,
            })?;
            print!("{}", content);
        }
        ConfigCmd::Path => {
            println!("{}", state.config_path.display());
        }
        ConfigCmd::Reset => {
            state.config = LinkerConfig::default();
            state.config.save(&state.config_path)?;
            print_success(&format!("Configuration reset ({})", state.config_path.display()));
        }
        ConfigCmd::Get { key } => {
            println!("{}", state.config.get(&key)?);
        }
        ConfigCmd::Set { key, value } => {
            state.config.set(&key, &value)?;
            state.config.save(&state.config_path)?;
            print_success(&format!("{} = {}", key, state.config.get(&key)?));
        }
    }
    Ok(())
}
