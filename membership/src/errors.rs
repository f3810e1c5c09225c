use std::{io, path::PathBuf};

use crate::{calldata::CalldataError, config::ConfigError};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("accumulator error")]
    Accumulator(#[from] accumulator::Error),

    #[error("config error")]
    Config(#[from] ConfigError),

    #[error("calldata error")]
    Calldata(#[from] CalldataError),

    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed JSON in {}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    #[error("root directory {0:?} could not be resolved")]
    RootDir(String),

    #[error("no command given, run with --help to see the available commands")]
    NoCommand,

    #[error("data/hashedLeaves.json has {len} leaves, so there is no leaf at index {index}")]
    NoSuchLeaf { index: usize, len: usize },

    #[error("proof in {} does not verify against its root", path.display())]
    ProofRejected { path: PathBuf },

    #[error("tracing parse error")]
    TracingParse(#[from] tracing_subscriber::filter::ParseError),

    #[error("error setting tracing global subscriber")]
    TracingSetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}
