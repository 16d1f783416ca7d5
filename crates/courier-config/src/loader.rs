use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails, or
    /// validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml_str(&raw)?;

        tracing::debug!(path = %path.display(), "loaded configuration");

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if TOML parsing or validation fails
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the status rules or transport durations are
    /// invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.status.to_policy()?;
        self.validate_transport_config()?;
        Ok(())
    }

    fn validate_transport_config(&self) -> anyhow::Result<()> {
        self.transport.timeout()?;
        self.transport.connect_timeout()?;
        self.transport.pool_idle_timeout()?;

        if let Some(ref user_agent) = self.transport.user_agent
            && user_agent.trim().is_empty()
        {
            anyhow::bail!("transport.user_agent must not be empty when set");
        }

        Ok(())
    }
}
