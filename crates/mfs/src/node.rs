//! The node as two linked stores.
//!
//! [`ContentStore`] holds immutable blocks keyed by content hash.
//! [`PathTree`] is the mutable MFS name tree mapping absolute paths to those
//! hashes. Storing a file touches both, with no atomicity between the two
//! steps, which is why an upload can leave an unlinked block behind.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};

use crate::api::client::{ApiClient, ApiError};
use crate::api::v0::add::{AddRequest, AddResponse};
use crate::api::v0::files::{
    ChmodRequest, CpRequest, LsRequest, LsResponse, MkdirRequest, MvRequest, ReadRequest,
    RmRequest, StatRequest, StatResponse,
};

/// Streamed file content.
pub type ByteStream = BoxStream<'static, Result<Bytes, ApiError>>;

/// Byte window of a read; the default reads the whole file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadRange {
    pub offset: Option<u64>,
    pub count: Option<u64>,
}

impl ReadRange {
    pub fn new(offset: u64, count: Option<u64>) -> Self {
        Self {
            offset: Some(offset),
            count,
        }
    }
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store `content`, returning the node's answer including its hash.
    async fn add(&self, name: &str, content: Bytes) -> Result<AddResponse, ApiError>;
}

/// Operations on absolute MFS paths.
#[async_trait]
pub trait PathTree: Send + Sync {
    async fn stat(&self, path: &str) -> Result<StatResponse, ApiError>;

    async fn mkdir(&self, path: &str, parents: bool) -> Result<(), ApiError>;

    async fn read(&self, path: &str, range: ReadRange) -> Result<Bytes, ApiError>;

    async fn read_stream(&self, path: &str) -> Result<ByteStream, ApiError>;

    async fn ls(&self, path: &str) -> Result<LsResponse, ApiError>;

    async fn mv(&self, source: &str, dest: &str) -> Result<(), ApiError>;

    async fn cp(&self, source: &str, dest: &str) -> Result<(), ApiError>;

    async fn rm(&self, path: &str) -> Result<(), ApiError>;

    async fn chmod(&self, path: &str, mode: u32) -> Result<(), ApiError>;

    /// Name stored content `hash` at `path`.
    async fn link(&self, hash: &str, path: &str) -> Result<(), ApiError> {
        self.cp(&format!("/ipfs/{hash}"), path).await
    }
}

/// Anything that offers both stores.
pub trait Node: ContentStore + PathTree {}

impl<T: ContentStore + PathTree> Node for T {}

#[async_trait]
impl ContentStore for ApiClient {
    async fn add(&self, name: &str, content: Bytes) -> Result<AddResponse, ApiError> {
        tracing::debug!(name, size = content.len(), "add");
        self.call(AddRequest {
            name: name.to_string(),
            content,
        })
        .await
    }
}

#[async_trait]
impl PathTree for ApiClient {
    async fn stat(&self, path: &str) -> Result<StatResponse, ApiError> {
        tracing::debug!(path, "files/stat");
        self.call(StatRequest {
            path: path.to_string(),
        })
        .await
    }

    async fn mkdir(&self, path: &str, parents: bool) -> Result<(), ApiError> {
        tracing::debug!(path, parents, "files/mkdir");
        self.call(MkdirRequest {
            path: path.to_string(),
            parents,
        })
        .await
    }

    async fn read(&self, path: &str, range: ReadRange) -> Result<Bytes, ApiError> {
        tracing::debug!(path, offset = ?range.offset, count = ?range.count, "files/read");
        let request = ReadRequest {
            path: path.to_string(),
            offset: range.offset,
            count: range.count,
        };

        Ok(self.fetch(request).await?.bytes().await?)
    }

    async fn read_stream(&self, path: &str) -> Result<ByteStream, ApiError> {
        tracing::debug!(path, "files/read (stream)");
        let response = self.fetch(ReadRequest::whole(path.to_string())).await?;

        Ok(response.bytes_stream().map_err(ApiError::from).boxed())
    }

    async fn ls(&self, path: &str) -> Result<LsResponse, ApiError> {
        tracing::debug!(path, "files/ls");
        self.call(LsRequest {
            path: path.to_string(),
        })
        .await
    }

    async fn mv(&self, source: &str, dest: &str) -> Result<(), ApiError> {
        tracing::debug!(source, dest, "files/mv");
        self.call(MvRequest {
            source: source.to_string(),
            dest: dest.to_string(),
        })
        .await
    }

    async fn cp(&self, source: &str, dest: &str) -> Result<(), ApiError> {
        tracing::debug!(source, dest, "files/cp");
        self.call(CpRequest {
            source: source.to_string(),
            dest: dest.to_string(),
        })
        .await
    }

    async fn rm(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!(path, "files/rm");
        self.call(RmRequest {
            path: path.to_string(),
            recursive: true,
        })
        .await
    }

    async fn chmod(&self, path: &str, mode: u32) -> Result<(), ApiError> {
        tracing::debug!(path, mode = %format!("{mode:o}"), "files/chmod");
        self.call(ChmodRequest {
            path: path.to_string(),
            mode,
        })
        .await
    }

    async fn link(&self, hash: &str, path: &str) -> Result<(), ApiError> {
        tracing::debug!(hash, path, "files/cp (link)");
        self.call(CpRequest::link(hash, path)).await
    }
}
