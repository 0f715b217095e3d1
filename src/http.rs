//! HTTP transport for the slideshow service.
//!
//! Builds the reqwest client from [`TransportOptions`] and implements
//! [`ApiClient`] on top of it.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::collections::HashMap;

use crate::client::{ApiClient, ClientError, LineStream};
use crate::ndjson::NdjsonResponseExt;
use crate::options::TransportOptions;

/// Build a configured HTTP client from transport options.
///
/// This applies timeouts and proxies. An unparsable proxy URL is a
/// configuration error rather than being silently ignored.
pub fn build_http_client(transport_options: &TransportOptions) -> Result<Client, ClientError> {
    let mut builder = Client::builder();

    if let Some(timeout) = transport_options.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = &transport_options.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| ClientError::Config(format!("invalid proxy `{}`: {}", proxy_url, e)))?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// Add extra headers to a request if specified in transport options.
pub fn add_extra_headers(
    mut request: RequestBuilder,
    extra_headers: &Option<HashMap<String, String>>,
) -> RequestBuilder {
    if let Some(headers) = extra_headers {
        for (key, value) in headers {
            request = request.header(key, value);
        }
    }
    request
}

/// [`ApiClient`] backed by a reqwest connection.
///
/// The response body is never buffered on success: the returned
/// [`LineStream`] owns the response and the connection is released when the
/// stream is dropped, whether it ran to completion or not.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    transport_options: TransportOptions,
}

impl HttpApiClient {
    /// Create a client from transport options.
    pub fn new(transport_options: TransportOptions) -> Result<Self, ClientError> {
        let client = build_http_client(&transport_options)?;
        Ok(Self {
            client,
            transport_options,
        })
    }

    pub fn transport_options(&self) -> &TransportOptions {
        &self.transport_options
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn send_request(
        &self,
        endpoint: &str,
        payload: &Value,
    ) -> Result<LineStream, ClientError> {
        let mut req = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json");

        req = add_extra_headers(req, &self.transport_options.extra_headers);

        tracing::debug!(endpoint, "sending request");
        let response = req.json(payload).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await?;
            tracing::warn!(status = status.as_u16(), "request rejected");
            return Err(ClientError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), "streaming response body");
        Ok(Box::pin(response.ndjson_lines()))
    }
}
