use reqwest::{Client, RequestBuilder};
use url::Url;

mod client;
mod error;

pub use client::ApiClient;
pub use error::{ApiError, NodeError};

/// A single call against the node's RPC API.
pub trait ApiRequest {
    type Response;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder;
}

/// Full URL of `endpoint` below the API base. The base always ends with a
/// separator (see [`ApiClient::new`]).
pub(crate) fn endpoint_url(base_url: &Url, endpoint: &str) -> String {
    format!("{}{}", base_url.as_str(), endpoint)
}
