use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::ApiError;
use super::ApiRequest;

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub remote: Url,
    client: Client,
}

impl ApiClient {
    /// Client for the RPC API rooted at `remote` (for example
    /// `http://127.0.0.1:5001/api/v0`).
    pub fn new(remote: &Url) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("ipfs-mfs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(remote, client))
    }

    /// Use an already configured transport (auth headers, timeouts, proxies).
    pub fn with_client(remote: &Url, client: Client) -> Self {
        let mut remote = remote.clone();
        if !remote.path().ends_with('/') {
            let path = format!("{}/", remote.path());
            remote.set_path(&path);
        }

        Self { remote, client }
    }

    /// Send `request` and decode the JSON answer.
    ///
    /// Endpoints that answer with an empty body decode as JSON `null`, so
    /// `()` responses work without a special case.
    pub async fn call<T>(&self, request: T) -> Result<T::Response, ApiError>
    where
        T: ApiRequest,
        T::Response: DeserializeOwned,
    {
        let body = self.fetch(request).await?.bytes().await?;
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };

        Ok(serde_json::from_slice(body)?)
    }

    /// Send `request` and hand back the successful response untouched, for
    /// endpoints that answer with raw content.
    pub async fn fetch<T: ApiRequest>(&self, request: T) -> Result<reqwest::Response, ApiError> {
        let response = request.build_request(&self.remote, &self.client).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.bytes().await.unwrap_or_else(|_| Bytes::new());
            Err(ApiError::from_response(status, &body))
        }
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.remote
    }

    /// Get the underlying HTTP client for custom requests
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}
