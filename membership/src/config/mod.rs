//! Configuration for the membership tool - using the CLI (clap), env (clap), and configuration
//! file (toml).

mod clap_config;
mod toml_config;

use clap::{parser::ValueSource, ArgMatches, ValueEnum};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("toml config error")]
    TomlConfig(#[from] toml_config::TomlConfigError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Option<MembershipCommand>,

    /// Root directory that the data, inputs and build directories live in
    pub root_dir: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Number of levels between the leaves and the root
    pub depth: usize,

    /// Number of children of each node
    pub arity: usize,

    /// Value of an empty leaf slot, as a decimal string
    pub zero: String,

    /// Index of the leaf to generate a proof for
    pub index: usize,

    /// Circuit input file to verify, relative to the root directory
    pub proof_file: String,
}

impl Config {
    pub fn new() -> ConfigResult<Self> {
        Self::from_matches(clap_config::command().get_matches())
    }

    pub(crate) fn from_matches(matches: ArgMatches) -> ConfigResult<Self> {
        let mut config: Config = matches.clone().into();
        config.merge_toml_config(&matches)?;

        Ok(config)
    }

    fn was_supplied_by_user(key: &str, matches: &ArgMatches) -> bool {
        !matches!(matches.value_source(key), Some(ValueSource::DefaultValue))
    }

    /// The order of priority is (in decreasing order):
    /// cli -> env -> toml -> default
    ///
    /// As such, here we will check if a field with a default value was supplied by the user. If
    /// so, do nothing. If not, if the TOML config has a value for the same field, use that
    /// instead.
    fn merge_toml_config(&mut self, matches: &ArgMatches) -> ConfigResult<()> {
        let Some(toml_config) = toml_config::read_config(&self.root_dir)? else {
            return Ok(());
        };

        let core = toml_config.core;
        let tree = toml_config.tree;

        if self.command.is_none() {
            self.command = core.command;
        }

        if let Some(log_level) = core.log_level {
            if !Self::was_supplied_by_user("log-level", matches) {
                self.log_level = log_level;
            }
        }

        if let Some(log_format) = core.log_format {
            if !Self::was_supplied_by_user("log-format", matches) {
                self.log_format = log_format;
            }
        }

        if let Some(proof_file) = core.proof_file {
            if !Self::was_supplied_by_user("proof-file", matches) {
                self.proof_file = proof_file;
            }
        }

        if let Some(depth) = tree.depth {
            if !Self::was_supplied_by_user("depth", matches) {
                self.depth = depth;
            }
        }

        if let Some(arity) = tree.arity {
            if !Self::was_supplied_by_user("arity", matches) {
                self.arity = arity;
            }
        }

        if let Some(zero) = tree.zero {
            if !Self::was_supplied_by_user("zero", matches) {
                self.zero = zero;
            }
        }

        if let Some(index) = tree.index {
            if !Self::was_supplied_by_user("index", matches) {
                self.index = index;
            }
        }

        Ok(())
    }
}

// To convert from an ArgMatches into the main `Config` entity.
// `clap` does not provide an automated way to do so in builder mode.
#[allow(clippy::unwrap_used)]
impl From<ArgMatches> for Config {
    fn from(am: ArgMatches) -> Self {
        Config {
            command: match am.subcommand() {
                Some(("hash-leaves", _)) => Some(MembershipCommand::HashLeaves),
                Some(("prove", _)) => Some(MembershipCommand::Prove),
                Some(("prove-incremental", _)) => Some(MembershipCommand::ProveIncremental),
                Some(("verify", _)) => Some(MembershipCommand::Verify),
                Some(("calldata", _)) => Some(MembershipCommand::Calldata),
                _ => None,
            },

            root_dir: am.get_one::<String>("root-dir").unwrap().clone(),
            log_level: *am.get_one::<LogLevel>("log-level").unwrap(),
            log_format: *am.get_one::<LogFormat>("log-format").unwrap(),
            depth: *am.get_one::<usize>("depth").unwrap(),
            arity: *am.get_one::<usize>("arity").unwrap(),
            zero: am.get_one::<String>("zero").unwrap().clone(),
            index: *am.get_one::<usize>("index").unwrap(),
            proof_file: am.get_one::<String>("proof-file").unwrap().clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum MembershipCommand {
    /// Hash the member list into leaves
    #[serde(rename = "hash-leaves")]
    HashLeaves,
    /// Build the fixed-depth tree and write the circuit input for one leaf
    #[serde(rename = "prove")]
    Prove,
    /// Build the incremental tree and write the circuit input for one leaf
    #[serde(rename = "prove-incremental")]
    ProveIncremental,
    /// Check a circuit input file against the tree shape
    #[serde(rename = "verify")]
    Verify,
    /// Format exported calldata for the on-chain verifier
    #[serde(rename = "calldata")]
    Calldata,
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize, ValueEnum)]
#[clap(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    #[serde(rename = "DEBUG")]
    Debug,
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "ERROR")]
    Error,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Deserialize)]
#[clap(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogFormat {
    #[serde(rename = "PRETTY")]
    Pretty,
    #[serde(rename = "JSON")]
    Json,
}
