//! Blocking HTTP client for collector endpoints

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use super::collector_source::CollectorSource;
use crate::utils::{FetchError, Result};

/// reqwest-backed [`CollectorSource`]
pub struct HttpCollectorClient {
    client: Client,
    timeout: Duration,
}

impl HttpCollectorClient {
    /// Build a client whose requests are bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("otelcol-diagnostics/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else {
            FetchError::Transport(err)
        }
    }
}

impl CollectorSource for HttpCollectorClient {
    fn get(&self, url: &str) -> std::result::Result<String, FetchError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| match self.classify(url, e) {
            FetchError::Transport(e) => FetchError::Body(e),
            other => other,
        })?;

        debug!(url, bytes = body.len(), status = status.as_u16(), "response received");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve exactly one HTTP response on an ephemeral port
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_get_success() {
        let base = serve_once("200 OK", "otelcol_process_uptime 12.5\n");
        let client = HttpCollectorClient::new(Duration::from_secs(5)).unwrap();

        let body = client.get(&format!("{}/metrics", base)).unwrap();
        assert_eq!(body, "otelcol_process_uptime 12.5\n");
    }

    #[test]
    fn test_non_success_status_is_error() {
        let base = serve_once("503 Service Unavailable", "not ready");
        let client = HttpCollectorClient::new(Duration::from_secs(5)).unwrap();

        let err = client.get(&format!("{}/health", base)).unwrap_err();
        assert!(err.is_protocol());
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpCollectorClient::new(Duration::from_secs(2)).unwrap();
        let err = client.get(&format!("http://{}/health", addr)).unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));

        // the root cause is part of the operator-facing message
        let message = err.to_string();
        assert!(message.starts_with("error sending request"), "{}", message);
        assert!(message.to_lowercase().contains("refused"), "{}", message);
    }

    #[test]
    fn test_slow_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((_stream, _)) = listener.accept() {
                thread::sleep(Duration::from_secs(3));
            }
        });

        let client = HttpCollectorClient::new(Duration::from_millis(300)).unwrap();
        let err = client.get(&format!("http://{}/metrics", addr)).unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }
}
