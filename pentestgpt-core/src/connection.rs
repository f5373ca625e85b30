//! Connectivity check against the OpenAI API
//!
//! The CLI runs this once before constructing a session. Every failure mode
//! (missing key, DNS, refused connection, non-2xx status) normalizes to
//! `false`.

use std::time::Duration;

use tracing::{debug, error};

use crate::{Error, Result};

/// Default API endpoint probed by the connection test
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Timeout applied to the probe request
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Preflight check that the OpenAI API is reachable with the configured key
pub struct ConnectionTest {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ConnectionTest {
    /// Build a connection test from OPENAI_API_KEY and OPENAI_BASE_URL
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Config("OPENAI_API_KEY not set".to_string()))?;
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::with_base_url(api_key, base_url)
    }

    /// Build a connection test against a specific endpoint
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| Error::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Issue one request against the models listing endpoint
    pub async fn probe(&self) -> Result<()> {
        let url = format!("{}/models", self.base_url);
        debug!("Probing {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Error::Connection(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Connection(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        Ok(())
    }

    /// Run the check, normalizing every failure to false
    pub async fn run(&self) -> bool {
        match self.probe().await {
            Ok(()) => true,
            Err(e) => {
                error!("Connection test failed: {}", e);
                false
            }
        }
    }
}

/// Check API connectivity using environment configuration
pub async fn check_connection() -> bool {
    match ConnectionTest::from_env() {
        Ok(test) => test.run().await,
        Err(e) => {
            error!("Connection test failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Spawn a one-shot HTTP server that answers with the given status line
    async fn spawn_http_server(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind test server");
        let addr = listener.local_addr().expect("should have local addr");

        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;

                let body = r#"{"data":[]}"#;
                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_probe_succeeds_on_200() {
        let base_url = spawn_http_server("200 OK").await;
        let test =
            ConnectionTest::with_base_url("test-key", base_url).expect("should build client");

        assert!(test.run().await);
    }

    #[tokio::test]
    async fn test_probe_fails_on_401() {
        let base_url = spawn_http_server("401 Unauthorized").await;
        let test =
            ConnectionTest::with_base_url("bad-key", base_url).expect("should build client");

        let err = test.probe().await.expect_err("probe should fail");
        assert!(err.is_connectivity());
        assert!(!test.run().await);
    }

    #[tokio::test]
    async fn test_probe_fails_on_500() {
        let base_url = spawn_http_server("500 Internal Server Error").await;
        let test =
            ConnectionTest::with_base_url("test-key", base_url).expect("should build client");

        assert!(!test.run().await);
    }

    #[tokio::test]
    async fn test_run_normalizes_refused_connection() {
        // Bind then drop to find a port nothing is listening on
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind test server");
        let addr = listener.local_addr().expect("should have local addr");
        drop(listener);

        let test = ConnectionTest::with_base_url("test-key", format!("http://{}", addr))
            .expect("should build client");

        assert!(!test.run().await);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let base_url = spawn_http_server("200 OK").await;
        let test = ConnectionTest::with_base_url("test-key", format!("{}/", base_url))
            .expect("should build client");

        assert!(test.run().await);
    }
}
