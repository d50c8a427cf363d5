//! Integration tests for the mock API server.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mock-api-integration-tests
//! ```
//!
//! Each test starts its own server on an ephemeral port with fresh seed
//! data, so tests are independent and need no external setup.
//!
//! # Test Categories
//!
//! - `users` - User CRUD and id assignment
//! - `products` - Product CRUD
//! - `utilities` - Echo, test endpoint, data dump, counter, error envelopes

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use mock_api_core::Store;
use mock_api_server::state::AppState;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tokio::task::JoinHandle;

/// A mock API server running in the background of a test.
pub struct TestServer {
    addr: SocketAddr,
    client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over the seed data.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        Self::with_store(Store::seeded()).await
    }

    /// Start a server over `store`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn with_store(store: Store) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = mock_api_server::app(AppState::new(store));
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            addr,
            client: Client::new(),
            handle,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The shared HTTP client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Send a request with an optional JSON body and decode the JSON reply.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the reply is not JSON.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.expect("Request failed");
        let status = response.status();
        let value = response.json().await.expect("Response was not JSON");
        (status, value)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.call(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<&Value>) -> (StatusCode, Value) {
        self.call(Method::POST, path, body).await
    }

    pub async fn put(&self, path: &str, body: Option<&Value>) -> (StatusCode, Value) {
        self.call(Method::PUT, path, body).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.call(Method::DELETE, path, None).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
