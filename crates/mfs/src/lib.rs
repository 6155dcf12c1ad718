//! Hierarchical file operations on top of an IPFS node's mutable file system.
//!
//! The node keeps two linked stores: an immutable block store addressed by
//! content hash, and the MFS path tree that names those hashes. [`Adapter`]
//! hides that split behind a conventional path-based contract
//! ([`FileOperations`]), speaking to the node only through its HTTP RPC API.
//!
//! ```no_run
//! use mfs::{Adapter, Config, FileOperations};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default().with_root("/apps/uploads");
//! let adapter = Adapter::connect(config).await?;
//!
//! adapter.write("notes/today.txt", "hello".into()).await?;
//! let entry = adapter.get_metadata("notes/today.txt").await?;
//! assert_eq!(entry.size, 5);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod memory;
pub mod node;
pub mod normalize;
pub mod path;
pub mod upload;

pub use adapter::{Adapter, FileContents, FileOperations};
pub use api::client::{ApiClient, ApiError, NodeError};
pub use config::{Config, ConfigError, ModePair, PermissionTable};
pub use error::MfsError;
pub use memory::MemoryNode;
pub use node::{ByteStream, ContentStore, Node, PathTree, ReadRange};
pub use normalize::{EntryType, FileEntry, Visibility};
pub use path::PathResolver;
pub use upload::UploadResult;

pub mod prelude {
    pub use crate::adapter::{Adapter, FileContents, FileOperations};
    pub use crate::config::Config;
    pub use crate::error::MfsError;
    pub use crate::normalize::{EntryType, FileEntry, Visibility};
}
