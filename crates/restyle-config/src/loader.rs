use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the regenerator or accounts sections are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_regenerator()?;
        self.validate_accounts()?;
        Ok(())
    }

    fn validate_regenerator(&self) -> anyhow::Result<()> {
        let regenerator = &self.regenerator;

        if regenerator.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("regenerator.api_key must not be empty");
        }

        if !matches!(regenerator.base_url.scheme(), "http" | "https") {
            anyhow::bail!("regenerator.base_url must be an http(s) URL");
        }

        if regenerator.model.trim().is_empty() {
            anyhow::bail!("regenerator.model must not be empty");
        }

        if regenerator.max_tokens == 0 {
            anyhow::bail!("regenerator.max_tokens must be greater than 0");
        }

        if regenerator.default_style.trim().is_empty() {
            anyhow::bail!("regenerator.default_style must not be empty");
        }

        if let Some(timeout) = regenerator.request_timeout()?
            && timeout.is_zero()
        {
            anyhow::bail!("regenerator.request_timeout must be greater than 0");
        }

        Ok(())
    }

    fn validate_accounts(&self) -> anyhow::Result<()> {
        if self.accounts.credits_per_batch == 0 {
            anyhow::bail!("accounts.credits_per_batch must be greater than 0");
        }

        if self.accounts.initial_credits > 1_000_000 {
            anyhow::bail!("accounts.initial_credits exceeds maximum of 1,000,000");
        }

        Ok(())
    }
}
