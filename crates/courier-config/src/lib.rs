#![allow(clippy::must_use_candidate)]

mod loader;
pub mod logging;
pub mod status;
pub mod transport;

use courier_core::DecoderConfig;
use serde::Deserialize;

pub use logging::*;
pub use status::*;
pub use transport::*;

/// Top-level courier configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Accepted status codes and empty-body rules
    #[serde(default)]
    pub status: StatusConfig,
    /// JSON decoding options for success bodies
    #[serde(default)]
    pub decoder: DecoderConfig,
    /// HTTP client settings for the bundled transport
    #[serde(default)]
    pub transport: TransportConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}
