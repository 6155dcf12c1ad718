use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use url::Url;

use crate::api::client::{endpoint_url, ApiRequest};

/// `add`: store raw content in the node's block store.
///
/// The content is neither pinned nor wrapped in a directory; placing it in
/// the path tree is a separate `files/cp`.
#[derive(Debug, Clone)]
pub struct AddRequest {
    /// File name reported back by the node
    pub name: String,
    pub content: Bytes,
}

/// Answer of `add`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddResponse {
    #[serde(rename = "Name")]
    pub name: String,
    /// Content identifier of the stored block
    #[serde(rename = "Hash")]
    pub hash: String,
    /// Reported as a decimal string by current nodes
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(rename = "Size", skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl ApiRequest for AddRequest {
    type Response = AddResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let length = self.content.len() as u64;
        let part = Part::stream_with_length(Body::from(self.content), length).file_name(self.name);

        client
            .post(endpoint_url(base_url, "add"))
            .query(&[
                ("stream-channels", "true"),
                ("pin", "false"),
                ("wrap-with-directory", "false"),
            ])
            .multipart(Form::new().part("file", part))
    }
}
