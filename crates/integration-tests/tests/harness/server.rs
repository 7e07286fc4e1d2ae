//! Test server wrapper that starts Restyle on a random port

use std::net::SocketAddr;

use restyle_config::Config;
use restyle_server::Server;
use tokio_util::sync::CancellationToken;

/// Header carrying the signed-in user in tests
pub const USER_HEADER: &str = "x-user-id";

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let server = Server::new(&config)?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    /// URL for a path on the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// `POST /api/generate` as the given user
    pub async fn generate(&self, user: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/generate"))
            .header(USER_HEADER, user)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// `GET` a JSON endpoint as the given user
    pub async fn get_json(&self, user: &str, path: &str) -> serde_json::Value {
        self.client
            .get(self.url(path))
            .header(USER_HEADER, user)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
