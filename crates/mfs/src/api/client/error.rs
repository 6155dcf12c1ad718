use http::StatusCode;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("node error: {0}")]
    Node(NodeError),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build an error from a failed response's status and body.
    ///
    /// The node answers failed calls with a JSON body `{Message, Code, Type}`;
    /// anything else is kept verbatim.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) if !parsed.message.is_empty() => ApiError::Node(NodeError {
                status,
                message: parsed.message,
                code: parsed.code,
                kind: parsed.kind,
            }),
            _ => ApiError::HttpStatus(status, String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// The node reported that the path (or a component of it) is missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::Node(err) => err.is_not_found(),
            ApiError::HttpStatus(status, _) => *status == StatusCode::NOT_FOUND,
            _ => false,
        }
    }

    /// Failures a caller may reasonably retry later.
    pub fn is_temporary(&self) -> bool {
        let status = match self {
            ApiError::Node(err) => err.status,
            ApiError::HttpStatus(status, _) => *status,
            ApiError::Reqwest(err) => return err.is_timeout() || err.is_connect(),
            ApiError::Decode(_) => return false,
        };

        matches!(
            status,
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
        )
    }

    /// The node answered, as opposed to the request never completing.
    pub fn is_node_response(&self) -> bool {
        matches!(self, ApiError::Node(_) | ApiError::HttpStatus(..))
    }
}

/// Error reported by the node in a failed response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeError {
    pub status: StatusCode,
    pub message: String,
    pub code: i64,
    pub kind: String,
}

impl NodeError {
    pub fn is_not_found(&self) -> bool {
        self.message.contains("does not exist")
            || self.message.contains("not found")
            || self.message.contains("no link named")
    }
}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct ErrorBody {
    #[serde(rename = "Message")]
    message: String,
    #[serde(rename = "Code")]
    code: i64,
    #[serde(rename = "Type")]
    kind: String,
}
