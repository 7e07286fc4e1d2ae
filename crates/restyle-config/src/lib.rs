#![allow(clippy::must_use_candidate)]

pub mod accounts;
mod env;
pub mod health;
mod loader;
pub mod logging;
pub mod regenerator;
pub mod server;
pub mod session;

use serde::Deserialize;

pub use accounts::*;
pub use health::*;
pub use logging::*;
pub use regenerator::*;
pub use server::*;
pub use session::*;

/// Top-level Restyle configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream image regeneration configuration
    pub regenerator: RegeneratorConfig,
    /// Credit ledger configuration
    #[serde(default)]
    pub accounts: AccountsConfig,
    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
