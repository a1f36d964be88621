use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use convo_types::ErrorDetail;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Shared HTTP plumbing: connection pool, base URL, status handling
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        // Validate early so a typo in --base-url fails before the first request
        Url::parse(&config.base_url).map_err(|e| ClientError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`, with `id` appended as an escaped segment
    pub fn endpoint(&self, path: &str, id: Option<&str>) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl {
                    url: raw.clone(),
                    reason: "URL cannot have path segments".to_string(),
                })?
                .pop_if_empty()
                .push(id);
        }

        Ok(url)
    }

    /// Turn a non-success response into [`ClientError::Server`], using the
    /// server's `detail` when there is one and `fallback` otherwise
    pub async fn check(response: Response, fallback: &str) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::debug!("Server answered {} with body: {}", status, body);
        Err(ClientError::Server {
            status: status.as_u16(),
            message: ErrorDetail::from_body(&body).unwrap_or_else(|| fallback.to_string()),
        })
    }

    /// Read a successful response body as JSON
    pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        let url = client("http://host:8000/chat").endpoint("/api/conversations", None).unwrap();
        assert_eq!(url.as_str(), "http://host:8000/chat/api/conversations");
    }

    #[test]
    fn test_endpoint_escapes_id() {
        let url = client("http://host")
            .endpoint("/api/conversations", Some("a b/c"))
            .unwrap();
        assert_eq!(url.as_str(), "http://host/api/conversations/a%20b%2Fc");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = ApiClient::new(&ClientConfig::new("http://[bad"));
        assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
    }
}
