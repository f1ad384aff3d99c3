use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::errors::GenerationError;

/// Installs a JSON `tracing` subscriber on stderr filtered by `filter`
/// (e.g. `autofixture_generate=debug`).
pub fn init_logging(filter: &str) -> Result<(), GenerationError> {
    let filter =
        EnvFilter::try_new(filter).map_err(|err| GenerationError::Logging(err.to_string()))?;

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| GenerationError::Logging(err.to_string()))
}
