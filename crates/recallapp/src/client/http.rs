use super::error::ClientError;
use super::transport::{Method, RawResponse, Request, Transport};
use reqwest::blocking::Client;
use std::time::Duration;

/// Production transport backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recall/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Result<RawResponse, ClientError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            // Content-Type is already among the request headers.
            builder = builder.body(body.to_string());
        }

        let response = builder
            .send()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
