use bytes::Bytes;
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::api::client::{endpoint_url, ApiRequest};

/// `files/read`. The node answers with the raw file content.
#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub path: String,
    pub offset: Option<u64>,
    pub count: Option<u64>,
}

impl ReadRequest {
    pub fn whole(path: String) -> Self {
        Self {
            path,
            offset: None,
            count: None,
        }
    }
}

impl ApiRequest for ReadRequest {
    type Response = Bytes;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let mut request = client
            .post(endpoint_url(base_url, "files/read"))
            .query(&[("arg", self.path)]);

        if let Some(offset) = self.offset {
            request = request.query(&[("offset", offset)]);
        }
        if let Some(count) = self.count {
            request = request.query(&[("count", count)]);
        }

        request
    }
}
