use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{endpoint_url, ApiRequest};

/// `files/cp`: copy within MFS, or link an immutable `/ipfs/<hash>` path
/// into the tree.
#[derive(Debug, Clone)]
pub struct CpRequest {
    pub source: String,
    pub dest: String,
}

impl CpRequest {
    /// Link stored content `hash` at the absolute MFS path `dest`.
    pub fn link(hash: &str, dest: &str) -> Self {
        Self {
            source: format!("/ipfs/{hash}"),
            dest: dest.to_string(),
        }
    }
}

impl ApiRequest for CpRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client
            .post(endpoint_url(base_url, "files/cp"))
            .query(&[("arg", self.source), ("arg", self.dest)])
    }
}
