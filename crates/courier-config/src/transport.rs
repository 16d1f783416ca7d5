use std::time::Duration;

use serde::Deserialize;

/// Settings for the bundled HTTP transport
///
/// Durations are human-readable strings such as `"30s"` or `"1m 30s"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Total request timeout
    #[serde(default)]
    pub timeout: Option<String>,
    /// Connection establishment timeout
    #[serde(default)]
    pub connect_timeout: Option<String>,
    /// How long idle pooled connections are kept
    #[serde(default)]
    pub pool_idle_timeout: Option<String>,
    /// `User-Agent` header sent with every request
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl TransportConfig {
    pub fn timeout(&self) -> anyhow::Result<Option<Duration>> {
        parse_duration("timeout", self.timeout.as_deref())
    }

    pub fn connect_timeout(&self) -> anyhow::Result<Option<Duration>> {
        parse_duration("connect_timeout", self.connect_timeout.as_deref())
    }

    pub fn pool_idle_timeout(&self) -> anyhow::Result<Option<Duration>> {
        parse_duration("pool_idle_timeout", self.pool_idle_timeout.as_deref())
    }
}

fn parse_duration(field: &str, value: Option<&str>) -> anyhow::Result<Option<Duration>> {
    value
        .map(|s| duration_str::parse(s).map_err(|e| anyhow::anyhow!("invalid transport.{field} '{s}': {e}")))
        .transpose()
}
