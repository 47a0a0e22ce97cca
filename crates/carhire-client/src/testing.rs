//! Test utilities for carhire-client
//!
//! Provides helpers for running integration tests against a local fake of
//! the car hire API.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::ClientConfig;
use crate::error::CarHireError;
use crate::{CarHireClient, Result};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: CarHireClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve an axum Router on a free local port
    ///
    /// The returned client uses the real reqwest transport and has not
    /// been set up yet; call [`setup`](Self::setup).
    ///
    /// # Example
    ///
    /// ```ignore
    /// use carhire_client::testing::TestServer;
    ///
    /// let router = Router::new().route("/json/v1.2", get(details));
    /// let server = TestServer::start(router).await?;
    /// server.setup("abc").await?;
    ///
    /// let suppliers = server.client.suppliers().await?;
    /// ```
    pub async fn start<S>(router: axum::Router<S>) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        Self::start_with_timeout(router, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Serve an axum Router with custom client timeouts
    pub async fn start_with_timeout<S>(
        router: axum::Router<S>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| CarHireError::Transport(format!("Could not bind test server: {}", e)))?;
        let addr = listener
            .local_addr()
            .map_err(|e| CarHireError::Transport(format!("Test server has no address: {}", e)))?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let router: axum::Router = router.into();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let config = ClientConfig::builder()
            .domain(format!("http://{}", addr))
            .request_timeout_ms(duration_ms(timeout))
            .connect_timeout_ms(duration_ms(connect_timeout))
            .build();
        let client = CarHireClient::from_config(&config)?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server, used as the API domain
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &CarHireClient {
        &self.client
    }

    /// Run the client bootstrap against this server
    pub async fn setup(&self, sdk_key: &str) -> Result<String> {
        self.client.setup(sdk_key, &self.base_url()).await
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Wait for a condition with timeout
pub async fn wait_for<F, Fut>(condition: F, timeout: Duration) -> bool
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;

    while tokio::time::Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    false
}
