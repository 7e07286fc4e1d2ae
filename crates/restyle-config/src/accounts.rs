use serde::Deserialize;

/// Credit ledger configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountsConfig {
    /// Credits granted the first time a user is seen
    #[serde(default = "default_initial_credits")]
    pub initial_credits: u32,
    /// Credits consumed by one successful batch
    #[serde(default = "default_credits_per_batch")]
    pub credits_per_batch: u32,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            initial_credits: default_initial_credits(),
            credits_per_batch: default_credits_per_batch(),
        }
    }
}

const fn default_initial_credits() -> u32 {
    3
}

const fn default_credits_per_batch() -> u32 {
    1
}
