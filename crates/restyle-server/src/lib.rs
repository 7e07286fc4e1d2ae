mod health;
mod identity;
mod request_context;

use std::net::SocketAddr;

use axum::Router;
use restyle_accounts::Accounts;
use restyle_config::Config;
use restyle_regen::GenerateState;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server with in-process credit and photo storage
    ///
    /// # Errors
    ///
    /// Returns an error if the regenerator cannot be initialized
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_accounts(config, Accounts::in_memory(&config.accounts))
    }

    /// Build the server against the given credit ledger and photo store
    ///
    /// # Errors
    ///
    /// Returns an error if the regenerator cannot be initialized
    pub fn with_accounts(config: &Config, accounts: Accounts) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let regenerator = restyle_regen::build_regenerator(&config.regenerator)?;

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Generation routes
        app = app.merge(
            restyle_regen::endpoint_router().with_state(GenerateState::new(regenerator, accounts.clone())),
        );

        // Credit and history routes
        app = app.merge(restyle_accounts::endpoint_router().with_state(accounts));

        // Apply middleware layers (innermost first)

        // Request context (innermost, runs just before handlers)
        app = app.layer(axum::middleware::from_fn(request_context::request_context_middleware));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // Signed-in user
        let session = config.server.session.clone();
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let config = session.clone();
            async move { identity::identity_middleware(config, req, next).await }
        }));

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
