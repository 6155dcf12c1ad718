use crate::api::client::ApiError;
use crate::config::ConfigError;

/// Failure of an adapter operation.
#[derive(Debug, thiserror::Error)]
pub enum MfsError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Content was stored as `hash` but could not be linked at `path`, even
    /// after creating the parent directory. The block stays on the node
    /// unlinked.
    #[error("stored {hash} but failed to link it at {path}: {source}")]
    Link {
        hash: String,
        path: String,
        #[source]
        source: ApiError,
    },

    #[error("no permission table configured, cannot set visibility")]
    VisibilityUnsupported,

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MfsError {
    /// Map an API failure on logical `path`, separating "missing" from
    /// every other failure.
    pub(crate) fn from_api(path: &str, err: ApiError) -> Self {
        if err.is_not_found() {
            MfsError::NotFound(path.to_string())
        } else {
            MfsError::Api(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MfsError::NotFound(_))
    }
}
