use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::client::{endpoint_url, ApiRequest};

#[derive(Debug, Clone)]
pub struct StatRequest {
    /// Absolute MFS path
    pub path: String,
}

/// Answer of `files/stat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatResponse {
    #[serde(rename = "Hash")]
    pub hash: String,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "CumulativeSize")]
    pub cumulative_size: u64,
    #[serde(rename = "Blocks")]
    pub blocks: u64,
    /// `"file"` or `"directory"`
    #[serde(rename = "Type")]
    pub file_type: String,
    #[serde(rename = "Mode", skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(rename = "Mtime", skip_serializing_if = "Option::is_none")]
    pub mtime: Option<i64>,
}

impl StatResponse {
    pub fn is_dir(&self) -> bool {
        self.file_type == "directory"
    }
}

/// Unix permission bits as reported by the node.
///
/// Depending on the node version this is an octal string (`"0644"`) or the
/// plain integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mode {
    Bits(u32),
    Octal(String),
}

impl Mode {
    pub fn bits(&self) -> Option<u32> {
        match self {
            Mode::Bits(bits) => Some(*bits),
            Mode::Octal(raw) => u32::from_str_radix(raw.trim_start_matches("0o"), 8).ok(),
        }
    }
}

impl ApiRequest for StatRequest {
    type Response = StatResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client
            .post(endpoint_url(base_url, "files/stat"))
            .query(&[("arg", self.path)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_directory_stat() {
        let raw = r#"{
            "Hash": "QmDir",
            "Size": 0,
            "CumulativeSize": 4096,
            "Blocks": 3,
            "Type": "directory"
        }"#;

        let stat: StatResponse = serde_json::from_str(raw).unwrap();
        assert!(stat.is_dir());
        assert_eq!(stat.cumulative_size, 4096);
        assert_eq!(stat.mode, None);
        assert_eq!(stat.mtime, None);
    }

    #[test]
    fn test_mode_accepts_octal_string_and_integer() {
        let stat: StatResponse =
            serde_json::from_str(r#"{"Type":"file","Mode":"0644","Mtime":1700000000}"#).unwrap();
        assert_eq!(stat.mode.unwrap().bits(), Some(0o644));
        assert_eq!(stat.mtime, Some(1_700_000_000));

        let stat: StatResponse = serde_json::from_str(r#"{"Type":"file","Mode":420}"#).unwrap();
        assert_eq!(stat.mode.unwrap().bits(), Some(0o644));
    }

    #[test]
    fn test_unparseable_mode_has_no_bits() {
        assert_eq!(Mode::Octal("rwxr-xr-x".into()).bits(), None);
    }
}
