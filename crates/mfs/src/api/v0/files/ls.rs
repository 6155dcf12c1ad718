use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use super::stat::Mode;
use crate::api::client::{endpoint_url, ApiRequest};

#[derive(Debug, Clone)]
pub struct LsRequest {
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsResponse {
    /// `null` for an empty directory
    #[serde(rename = "Entries")]
    pub entries: Option<Vec<LsEntry>>,
}

impl LsResponse {
    pub fn into_entries(self) -> Vec<LsEntry> {
        self.entries.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: EntryKind,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "CumulativeSize", skip_serializing_if = "Option::is_none")]
    pub cumulative_size: Option<u64>,
    #[serde(rename = "Hash")]
    pub hash: String,
    #[serde(rename = "Mode", skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(rename = "Mtime", skip_serializing_if = "Option::is_none")]
    pub mtime: Option<i64>,
}

/// Entry type in a listing: a UnixFS data type code or a type name.
///
/// ref: <https://github.com/ipfs/specs/blob/main/UNIXFS.md#data-format>
///
/// ```protobuf
/// enum DataType {
///     Raw = 0;
///     Directory = 1;
///     File = 2;
///     Metadata = 3;
///     Symlink = 4;
///     HAMTShard = 5;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryKind {
    Code(i64),
    Name(String),
}

impl Default for EntryKind {
    fn default() -> Self {
        EntryKind::Code(0)
    }
}

impl EntryKind {
    pub fn is_dir(&self) -> bool {
        match self {
            EntryKind::Code(code) => *code == 1 || *code == 5,
            EntryKind::Name(name) => name == "directory",
        }
    }
}

impl ApiRequest for LsRequest {
    type Response = LsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client
            .post(endpoint_url(base_url, "files/ls"))
            .query(&[("arg", self.path.as_str()), ("long", "true")])
    }
}
