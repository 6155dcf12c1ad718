use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{endpoint_url, ApiRequest};

#[derive(Debug, Clone)]
pub struct MvRequest {
    pub source: String,
    pub dest: String,
}

impl ApiRequest for MvRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client
            .post(endpoint_url(base_url, "files/mv"))
            .query(&[("arg", self.source), ("arg", self.dest)])
    }
}
