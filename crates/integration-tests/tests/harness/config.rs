//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use restyle_config::{AccountsConfig, Config, LoggingConfig, RegeneratorConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder pointed at a mock chat-completions backend
    pub fn new(base_url: &str) -> Self {
        let mut regenerator = RegeneratorConfig::new(SecretString::from("test-key"));
        regenerator.base_url = base_url.parse().expect("valid URL");

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                regenerator,
                accounts: AccountsConfig::default(),
                logging: LoggingConfig::default(),
            },
        }
    }

    /// Credits granted to a user on first sight
    pub fn with_initial_credits(mut self, credits: u32) -> Self {
        self.config.accounts.initial_credits = credits;
        self
    }

    /// Send `X-Title` with every upstream call
    pub fn with_app_title(mut self, title: &str) -> Self {
        self.config.regenerator.app_title = Some(title.to_owned());
        self
    }

    /// Per-call upstream timeout, e.g. `"1s"`
    pub fn with_request_timeout(mut self, timeout: &str) -> Self {
        self.config.regenerator.request_timeout = Some(timeout.to_owned());
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
