use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{endpoint_url, ApiRequest};

#[derive(Debug, Clone)]
pub struct ChmodRequest {
    pub path: String,
    /// Permission bits, sent in octal
    pub mode: u32,
}

impl ApiRequest for ChmodRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client
            .post(endpoint_url(base_url, "files/chmod"))
            .query(&[("arg", self.path), ("mode", format!("{:o}", self.mode))])
    }
}
