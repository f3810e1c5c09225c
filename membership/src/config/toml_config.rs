//! module for handling file-based (TOML) configuration.

use crate::util;
use std::{fs, io};

use super::{ConfigResult, Deserialize, LogFormat, LogLevel, MembershipCommand};

#[derive(Debug, thiserror::Error)]
pub enum TomlConfigError {
    #[error("failed to read config file")]
    Io(#[from] io::Error),

    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TomlConfig {
    #[serde(default)]
    pub core: CoreConfig,
    #[serde(default)]
    pub tree: TreeConfig,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CoreConfig {
    pub command: Option<MembershipCommand>,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
    pub proof_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TreeConfig {
    pub depth: Option<usize>,
    pub arity: Option<usize>,
    pub zero: Option<String>,
    pub index: Option<usize>,
}

/// Read the TOML configuration file, if present in the `config` sub-directory under the
/// root directory.
pub(super) fn read_config(root_dir: &str) -> ConfigResult<Option<TomlConfig>> {
    let Some(config_file) = util::get_toml_config_file(root_dir, "config") else {
        return Ok(None);
    };

    if !config_file.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(config_file).map_err(TomlConfigError::from)?;
    let config = toml::from_str::<TomlConfig>(&contents).map_err(TomlConfigError::from)?;

    Ok(Some(config))
}
