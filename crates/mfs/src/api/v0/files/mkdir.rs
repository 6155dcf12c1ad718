use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{endpoint_url, ApiRequest};

#[derive(Debug, Clone)]
pub struct MkdirRequest {
    /// Absolute MFS path of the directory to create
    pub path: String,
    /// Create missing intermediate directories as well
    pub parents: bool,
}

impl ApiRequest for MkdirRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let request = client
            .post(endpoint_url(base_url, "files/mkdir"))
            .query(&[("arg", self.path)]);

        if self.parents {
            request.query(&[("parents", "true")])
        } else {
            request
        }
    }
}
