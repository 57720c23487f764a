use std::path::Path;

use serde::{Deserialize, Serialize};
pub(crate) use tictactoe_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_engine::tictactoe::FirstPlayerMode;

pub const CONFIG_FILE: &str = "tictactoe_cli_config.yaml";

const MAX_LOG_PREFIX_LEN: usize = 32;

pub fn get_config_manager(
    path: impl AsRef<Path>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub first_player: FirstPlayerMode,
    pub show_evaluations: bool,
    pub log_prefix: Option<String>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if let Some(prefix) = &self.log_prefix {
            if prefix.trim().is_empty() {
                return Err("log_prefix must not be blank".to_string());
            }
            if prefix.len() > MAX_LOG_PREFIX_LEN {
                return Err(format!("log_prefix must not exceed {} characters", MAX_LOG_PREFIX_LEN));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_player: FirstPlayerMode::Human,
            show_evaluations: false,
            log_prefix: None,
        }
    }
}
