use courier_core::StatusPolicy;
use http::{Method, StatusCode};
use serde::Deserialize;

/// Status validation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusConfig {
    /// Lowest status treated as success
    #[serde(default = "default_success_min")]
    pub success_min: u16,
    /// Highest status treated as success
    #[serde(default = "default_success_max")]
    pub success_max: u16,
    /// Success statuses that may carry an empty body
    #[serde(default = "default_empty_body_codes")]
    pub empty_body_codes: Vec<u16>,
    /// Request methods whose responses may always be empty
    #[serde(default = "default_empty_body_methods")]
    pub empty_body_methods: Vec<String>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            success_min: default_success_min(),
            success_max: default_success_max(),
            empty_body_codes: default_empty_body_codes(),
            empty_body_methods: default_empty_body_methods(),
        }
    }
}

impl StatusConfig {
    /// Convert into the policy handed to transports
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or not made of valid status
    /// codes, if an empty-body code falls outside the range, or if a method
    /// name is invalid
    pub fn to_policy(&self) -> anyhow::Result<StatusPolicy> {
        for code in [self.success_min, self.success_max] {
            StatusCode::from_u16(code).map_err(|_| anyhow::anyhow!("invalid status code in success range: {code}"))?;
        }

        if self.success_min > self.success_max {
            anyhow::bail!(
                "status.success_min ({}) must not exceed status.success_max ({})",
                self.success_min,
                self.success_max
            );
        }

        let range = self.success_min..=self.success_max;

        if let Some(code) = self.empty_body_codes.iter().find(|code| !range.contains(*code)) {
            anyhow::bail!("empty body code {code} is outside the success range {range:?}");
        }

        let methods = self
            .empty_body_methods
            .iter()
            .map(|name| {
                Method::from_bytes(name.to_ascii_uppercase().as_bytes())
                    .map_err(|e| anyhow::anyhow!("invalid HTTP method '{name}': {e}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(StatusPolicy::new(range, self.empty_body_codes.iter().copied()).with_empty_body_methods(methods))
    }
}

const fn default_success_min() -> u16 {
    200
}

const fn default_success_max() -> u16 {
    299
}

fn default_empty_body_codes() -> Vec<u16> {
    vec![200, 204, 205]
}

fn default_empty_body_methods() -> Vec<String> {
    vec!["HEAD".to_owned()]
}
