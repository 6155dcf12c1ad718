use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{endpoint_url, ApiRequest};

#[derive(Debug, Clone)]
pub struct RmRequest {
    pub path: String,
    /// Required by the node to remove directories
    pub recursive: bool,
}

impl ApiRequest for RmRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let request = client
            .post(endpoint_url(base_url, "files/rm"))
            .query(&[("arg", self.path)]);

        if self.recursive {
            request.query(&[("recursive", "true")])
        } else {
            request
        }
    }
}
