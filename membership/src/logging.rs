use tracing_subscriber::EnvFilter;

use crate::{
    config::{LogFormat, LogLevel},
    errors::Result,
};

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Error => "error",
        }
    }
}

/// Install the global subscriber. `RUST_LOG`, if set, takes precedence over the configured level
pub(crate) fn init(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::builder().parse(level.directive()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => {
            tracing::subscriber::set_global_default(builder.with_target(false).finish())?;
        }
        LogFormat::Json => {
            tracing::subscriber::set_global_default(builder.json().finish())?;
        }
    }

    Ok(())
}
