//! Blocking HTTP with a per-request timeout and bounded retries.
//!
//! Only transport failures (timeouts, refused connections) and 5xx responses
//! are retried. Anything else comes back to the caller, which decides what a
//! 4xx means for its service.

use std::thread::sleep;
use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use dxvar_core::errors::UpstreamError;

use super::config::HttpConfig;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
    retry_backoff: Duration,
}

/// Status and body of a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON; decoding problems are the service's fault.
    pub fn decode<T: DeserializeOwned>(&self, service: &str) -> Result<T, UpstreamError> {
        serde_json::from_str(&self.body).map_err(|e| UpstreamError::malformed(service, e.to_string()))
    }

    /// Fail on any non-2xx status.
    pub fn error_for_status(self, service: &str) -> Result<Self, UpstreamError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(UpstreamError::unavailable(
                service,
                format!("HTTP {}", self.status),
            ))
        }
    }
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("dxvar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::unavailable("http", e.to_string()))?;

        Ok(HttpClient {
            client,
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    pub fn get(
        &self,
        service: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, UpstreamError> {
        self.execute(service, || {
            self.client
                .get(url)
                .query(query)
                .header(reqwest::header::ACCEPT, "application/json")
        })
    }

    pub fn post_json(
        &self,
        service: &str,
        url: &str,
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<HttpResponse, UpstreamError> {
        self.execute(service, || {
            let request = self.client.post(url).json(body);
            match bearer {
                Some(token) => request.bearer_auth(token),
                None => request,
            }
        })
    }

    fn execute<F>(&self, service: &str, build: F) -> Result<HttpResponse, UpstreamError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let retryable = match build().send() {
                Ok(response) => {
                    let status = response.status();
                    let body = response
                        .text()
                        .map_err(|e| UpstreamError::unavailable(service, e.to_string()))?;
                    debug!("{} answered HTTP {}", service, status.as_u16());

                    if !status.is_server_error() {
                        return Ok(HttpResponse {
                            status: status.as_u16(),
                            body,
                        });
                    }
                    format!("HTTP {}", status.as_u16())
                }
                Err(e) if e.is_timeout() || e.is_connect() => e.to_string(),
                Err(e) => return Err(UpstreamError::unavailable(service, e.to_string())),
            };

            if attempt >= self.max_retries {
                return Err(UpstreamError::unavailable(service, retryable));
            }
            attempt += 1;
            let delay = self.retry_backoff * attempt;
            warn!(
                "{} request failed ({}), retry {}/{} in {:?}",
                service, retryable, attempt, self.max_retries, delay
            );
            sleep(delay);
        }
    }
}
