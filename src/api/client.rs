use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Thin adapter over `reqwest`: builds URLs under the configured base
/// address, attaches the bearer token, and folds every non-2xx status into an
/// [`ApiError`] kind.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        Self::with_base_url(&config.api_url, config.request_timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), url = %url, body = %body, "Remote call rejected");
            return Err(ApiError::from_status(status));
        }
        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> ApiResult<T> {
        tracing::debug!(path, "GET");
        let response = self.send(self.request(Method::GET, path, token)).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> ApiResult<T> {
        tracing::debug!(path, "POST");
        let response = self
            .send(self.request(Method::POST, path, token).json(body))
            .await?;
        Ok(response.json().await?)
    }

    /// POST whose response body is not needed.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> ApiResult<()> {
        tracing::debug!(path, "POST");
        self.send(self.request(Method::POST, path, token).json(body))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> ApiResult<()> {
        tracing::debug!(path, "DELETE");
        self.send(self.request(Method::DELETE, path, token)).await?;
        Ok(())
    }
}
