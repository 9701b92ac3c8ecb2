use crate::{
    config::UpstreamConfig,
    error::{Result, TryOnError},
    seedream::UPSTREAM_PATH,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde_json::Value;

/// Server-side half of the proxy: signs caller bodies with the provider key.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let headers = build_headers(api_key)?;

        let client = Client::builder()
            .build()
            .map_err(|e| TryOnError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), UPSTREAM_PATH),
            headers,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `body` untouched and returns the provider JSON.
    pub async fn forward(&self, body: Vec<u8>) -> Result<Value> {
        log::debug!("Forwarding {} bytes to {}", body.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await
            .map_err(|e| TryOnError::RequestError(format!("Upstream request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("Upstream responded {}: {}", status, error_text);
            return Err(TryOnError::UpstreamStatus(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TryOnError::ResponseError(e.to_string()))
    }
}

fn build_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| TryOnError::ConfigError("API key contains invalid header characters".into()))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_key() {
        let result = UpstreamClient::new(&UpstreamConfig::new());
        assert!(matches!(result, Err(TryOnError::MissingApiKey(_))));
    }

    #[test]
    fn endpoint_points_at_generation_api() {
        let config = UpstreamConfig::new()
            .with_api_key("k")
            .with_base_url("https://ark.example.com/");
        let client = UpstreamClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://ark.example.com/api/v3/images/generations"
        );
    }

    #[test]
    fn rejects_keys_that_cannot_be_headers() {
        let config = UpstreamConfig::new().with_api_key("bad\nkey");
        assert!(matches!(
            UpstreamClient::new(&config),
            Err(TryOnError::ConfigError(_))
        ));
    }
}
