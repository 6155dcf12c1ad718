use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::api::client::ApiClient;
use crate::bootstrap;
use crate::config::{Config, PermissionTable};
use crate::error::MfsError;
use crate::node::{ByteStream, ContentStore, Node, PathTree, ReadRange};
use crate::normalize::{self, FileEntry, Visibility};
use crate::path::PathResolver;
use crate::upload::{self, UploadResult};

/// Content returned by [`FileOperations::read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContents {
    pub path: String,
    pub contents: Bytes,
}

/// Path-based storage contract.
///
/// All paths are logical: relative to the configured root, with or
/// without a leading separator.
#[async_trait]
pub trait FileOperations: Send + Sync {
    /// Whether a stat of `path` succeeds. Any failure reported by the node
    /// counts as absent; only transport failures are errors.
    async fn has(&self, path: &str) -> Result<bool, MfsError>;

    async fn read(&self, path: &str) -> Result<FileContents, MfsError>;

    async fn read_stream(&self, path: &str) -> Result<ByteStream, MfsError>;

    /// Read `count` bytes (or to the end) starting at `offset`.
    async fn read_range(
        &self,
        path: &str,
        offset: u64,
        count: Option<u64>,
    ) -> Result<Bytes, MfsError>;

    /// Entries directly inside `directory`, each with full stat metadata.
    async fn list_contents(&self, directory: &str) -> Result<Vec<FileEntry>, MfsError>;

    async fn get_metadata(&self, path: &str) -> Result<FileEntry, MfsError>;

    async fn get_size(&self, path: &str) -> Result<FileEntry, MfsError> {
        self.get_metadata(path).await
    }

    async fn get_mimetype(&self, path: &str) -> Result<FileEntry, MfsError> {
        self.get_metadata(path).await
    }

    async fn get_timestamp(&self, path: &str) -> Result<FileEntry, MfsError> {
        self.get_metadata(path).await
    }

    async fn get_visibility(&self, path: &str) -> Result<FileEntry, MfsError> {
        self.get_metadata(path).await
    }

    async fn write(&self, path: &str, contents: Bytes) -> Result<UploadResult, MfsError>;

    async fn write_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<UploadResult, MfsError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        self.write(path, Bytes::from(buf)).await
    }

    /// Overwrite `path`. Storage is content addressed, so this is the same
    /// operation as [`write`](Self::write).
    async fn update(&self, path: &str, contents: Bytes) -> Result<UploadResult, MfsError> {
        self.write(path, contents).await
    }

    async fn update_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<UploadResult, MfsError> {
        self.write_stream(path, reader).await
    }

    async fn rename(&self, path: &str, new_path: &str) -> Result<(), MfsError>;

    async fn copy(&self, path: &str, new_path: &str) -> Result<(), MfsError>;

    async fn delete(&self, path: &str) -> Result<(), MfsError>;

    async fn delete_dir(&self, path: &str) -> Result<(), MfsError> {
        self.delete(path).await
    }

    /// Create `path` and any missing parents.
    async fn create_dir(&self, path: &str) -> Result<(), MfsError>;

    async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<(), MfsError>;

    /// Gateway URL serving the content currently linked at `path`.
    async fn get_public_url(&self, path: &str) -> Result<String, MfsError>;

    async fn get_direct_url(&self, path: &str) -> Result<String, MfsError> {
        self.get_public_url(path).await
    }

    async fn get_url(&self, path: &str) -> Result<String, MfsError> {
        self.get_public_url(path).await
    }
}

/// [`FileOperations`] over an IPFS node's mutable file system.
///
/// Holds no per-call state: clones share the underlying node handle and
/// can be used from many tasks at once.
#[derive(Debug, Clone)]
pub struct Adapter<N = ApiClient> {
    node: N,
    resolver: PathResolver,
    gateway: String,
    permissions: Option<PermissionTable>,
}

impl Adapter<ApiClient> {
    /// Connect to the node at `config.host` and make sure the root exists.
    pub async fn connect(config: Config) -> Result<Self, MfsError> {
        let node = ApiClient::new(&config.host)?;
        Ok(Self::new(node, config).await)
    }
}

impl<N: Node> Adapter<N> {
    /// Build an adapter over `node`, creating the root directory if needed.
    ///
    /// A root that cannot be created does not fail construction; later
    /// operations report the problem instead.
    pub async fn new(node: N, config: Config) -> Self {
        let adapter = Self {
            node,
            resolver: PathResolver::new(&config.root),
            gateway: config.gateway,
            permissions: config.permissions,
        };

        adapter.ensure_root().await;
        adapter
    }

    pub async fn ensure_root(&self) -> bool {
        bootstrap::ensure_root(&self.node, &self.resolver).await
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }
}

#[async_trait]
impl<N: Node> FileOperations for Adapter<N> {
    async fn has(&self, path: &str) -> Result<bool, MfsError> {
        match self.node.stat(&self.resolver.resolve(path)).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_node_response() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn read(&self, path: &str) -> Result<FileContents, MfsError> {
        let contents = self
            .node
            .read(&self.resolver.resolve(path), ReadRange::default())
            .await
            .map_err(|err| MfsError::from_api(path, err))?;

        Ok(FileContents {
            path: path.to_string(),
            contents,
        })
    }

    async fn read_stream(&self, path: &str) -> Result<ByteStream, MfsError> {
        self.node
            .read_stream(&self.resolver.resolve(path))
            .await
            .map_err(|err| MfsError::from_api(path, err))
    }

    async fn read_range(
        &self,
        path: &str,
        offset: u64,
        count: Option<u64>,
    ) -> Result<Bytes, MfsError> {
        self.node
            .read(&self.resolver.resolve(path), ReadRange::new(offset, count))
            .await
            .map_err(|err| MfsError::from_api(path, err))
    }

    #[tracing::instrument(skip(self))]
    async fn list_contents(&self, directory: &str) -> Result<Vec<FileEntry>, MfsError> {
        let listing = self
            .node
            .ls(&self.resolver.resolve(directory))
            .await
            .map_err(|err| MfsError::from_api(directory, err))?;

        let mut entries = Vec::new();
        for entry in listing.into_entries() {
            let target = normalize::listing_target(directory, &entry);
            entries.push(self.get_metadata(&target).await?);
        }

        Ok(entries)
    }

    async fn get_metadata(&self, path: &str) -> Result<FileEntry, MfsError> {
        let stat = self
            .node
            .stat(&self.resolver.resolve(path))
            .await
            .map_err(|err| MfsError::from_api(path, err))?;

        Ok(normalize::normalize(path, &stat))
    }

    #[tracing::instrument(skip(self, contents), fields(size = contents.len()))]
    async fn write(&self, path: &str, contents: Bytes) -> Result<UploadResult, MfsError> {
        upload::upload(&self.node, &self.resolver, path, contents).await
    }

    async fn rename(&self, path: &str, new_path: &str) -> Result<(), MfsError> {
        self.node
            .mv(&self.resolver.resolve(path), &self.resolver.resolve(new_path))
            .await
            .map_err(|err| MfsError::from_api(path, err))
    }

    async fn copy(&self, path: &str, new_path: &str) -> Result<(), MfsError> {
        self.node
            .cp(&self.resolver.resolve(path), &self.resolver.resolve(new_path))
            .await
            .map_err(|err| MfsError::from_api(path, err))
    }

    async fn delete(&self, path: &str) -> Result<(), MfsError> {
        self.node
            .rm(&self.resolver.resolve(path))
            .await
            .map_err(|err| MfsError::from_api(path, err))
    }

    async fn create_dir(&self, path: &str) -> Result<(), MfsError> {
        Ok(self.node.mkdir(&self.resolver.resolve(path), true).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<(), MfsError> {
        let permissions = self.permissions.ok_or(MfsError::VisibilityUnsupported)?;
        let entry = self.get_metadata(path).await?;
        let mode = permissions.mode(entry.entry_type, visibility);

        self.node
            .chmod(&self.resolver.resolve(path), mode)
            .await
            .map_err(|err| MfsError::from_api(path, err))
    }

    async fn get_public_url(&self, path: &str) -> Result<String, MfsError> {
        let stat = self
            .node
            .stat(&self.resolver.resolve(path))
            .await
            .map_err(|err| MfsError::from_api(path, err))?;

        Ok(format!("{}{}", self.gateway, stat.hash))
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use super::*;
    use crate::config::ModePair;
    use crate::memory::MemoryNode;
    use crate::normalize::EntryType;

    async fn setup() -> (Adapter<MemoryNode>, MemoryNode) {
        let node = MemoryNode::new();
        let config = Config::default()
            .with_root("/site")
            .with_gateway("https://ipfs.example/ipfs/");
        let adapter = Adapter::new(node.clone(), config).await;
        node.reset_calls();
        (adapter, node)
    }

    #[tokio::test]
    async fn test_construction_creates_root() {
        let (_adapter, node) = setup().await;
        assert!(node.is_dir("/site"));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let (adapter, _node) = setup().await;

        adapter
            .write("notes/today.txt", Bytes::from_static(b"hello"))
            .await
            .unwrap();
        let read = adapter.read("notes/today.txt").await.unwrap();

        assert_eq!(read.path, "notes/today.txt");
        assert_eq!(read.contents, Bytes::from_static(b"hello"));
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (adapter, _node) = setup().await;

        let err = adapter.read("nope.txt").await.unwrap_err();
        assert!(err.is_not_found(), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_read_stream_yields_content() {
        let (adapter, node) = setup().await;
        node.add_file("/site/a.bin", vec![1u8, 2, 3]);

        let chunks: Vec<Bytes> = adapter
            .read_stream("a.bin")
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(chunks.concat(), vec![1u8, 2, 3]);
    }

    #[tokio::test]
    async fn test_has() {
        let (adapter, node) = setup().await;
        node.add_file("/site/a.txt", "a");

        assert!(adapter.has("a.txt").await.unwrap());
        assert!(!adapter.has("b.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_write_stream() {
        let (adapter, node) = setup().await;
        let mut reader: &[u8] = b"streamed";

        adapter.write_stream("s.txt", &mut reader).await.unwrap();
        assert_eq!(node.file("/site/s.txt").unwrap(), Bytes::from_static(b"streamed"));
    }

    #[tokio::test]
    async fn test_listing_matches_individual_metadata() {
        let (adapter, node) = setup().await;
        node.add_file("/site/docs/a.md", "aaa");
        node.add_file("/site/docs/sub/b.md", "bbbbb");
        node.set_mtime("/site/docs/a.md", 1_700_000_000);
        node.set_mtime("/site/docs/sub", 1_700_000_100);

        let listed = adapter.list_contents("/docs").await.unwrap();
        assert_eq!(listed.len(), 2);

        for entry in &listed {
            let direct = adapter.get_metadata(&entry.path).await.unwrap();
            assert_eq!(entry, &direct);
        }

        let sub = listed.iter().find(|e| e.path == "/docs/sub").unwrap();
        assert_eq!(sub.entry_type, EntryType::Dir);
        assert_eq!(sub.size, 5);
    }

    #[tokio::test]
    async fn test_listing_restats_every_entry() {
        let (adapter, node) = setup().await;
        node.add_file("/site/a.txt", "a");
        node.add_file("/site/b.txt", "b");
        node.reset_calls();

        adapter.list_contents("").await.unwrap();
        assert_eq!(node.calls("ls"), 1);
        assert_eq!(node.calls("stat"), 2);
    }

    #[tokio::test]
    async fn test_rename_copy_delete() {
        let (adapter, node) = setup().await;
        node.add_file("/site/a.txt", "a");

        adapter.copy("a.txt", "b.txt").await.unwrap();
        adapter.rename("a.txt", "c.txt").await.unwrap();
        adapter.delete("b.txt").await.unwrap();

        assert!(node.file("/site/a.txt").is_none());
        assert!(node.file("/site/b.txt").is_none());
        assert_eq!(node.file("/site/c.txt").unwrap(), Bytes::from_static(b"a"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (adapter, _node) = setup().await;
        assert!(adapter.delete("ghost").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_create_and_delete_nested_dir() {
        let (adapter, node) = setup().await;

        adapter.create_dir("a/b/c").await.unwrap();
        assert!(node.is_dir("/site/a/b/c"));

        adapter.delete_dir("a").await.unwrap();
        assert!(!node.is_dir("/site/a"));
    }

    #[tokio::test]
    async fn test_public_url_is_gateway_plus_hash() {
        let (adapter, node) = setup().await;
        let hash = node.add_file("/site/a.txt", "a");

        let url = adapter.get_public_url("a.txt").await.unwrap();
        assert_eq!(url, format!("https://ipfs.example/ipfs/{hash}"));
        assert_eq!(adapter.get_url("a.txt").await.unwrap(), url);
        assert_eq!(adapter.get_direct_url("a.txt").await.unwrap(), url);
    }

    #[tokio::test]
    async fn test_set_visibility_requires_permission_table() {
        let (adapter, node) = setup().await;
        node.add_file("/site/a.txt", "a");

        let err = adapter
            .set_visibility("a.txt", Visibility::Public)
            .await
            .unwrap_err();
        assert!(matches!(err, MfsError::VisibilityUnsupported));
        assert_eq!(node.calls("chmod"), 0);
    }

    #[tokio::test]
    async fn test_set_visibility_uses_table() {
        let node = MemoryNode::new();
        let config = Config::default().with_root("site").with_permissions(PermissionTable {
            file: ModePair {
                public: 0o644,
                private: 0o600,
            },
            dir: ModePair {
                public: 0o755,
                private: 0o700,
            },
        });
        let adapter = Adapter::new(node.clone(), config).await;
        node.add_file("/site/a.txt", "a");

        adapter
            .set_visibility("a.txt", Visibility::Public)
            .await
            .unwrap();
        assert_eq!(
            adapter.get_visibility("a.txt").await.unwrap().visibility,
            Visibility::Public
        );

        adapter
            .set_visibility("a.txt", Visibility::Private)
            .await
            .unwrap();
        assert_eq!(
            adapter.get_visibility("a.txt").await.unwrap().visibility,
            Visibility::Private
        );
    }

    #[tokio::test]
    async fn test_accessors_return_full_entry() {
        let (adapter, node) = setup().await;
        node.add_file("/site/a.txt", "abc");
        node.set_mtime("/site/a.txt", 1_700_000_000);

        let full = adapter.get_metadata("a.txt").await.unwrap();
        assert_eq!(adapter.get_size("a.txt").await.unwrap(), full);
        assert_eq!(adapter.get_mimetype("a.txt").await.unwrap(), full);
        assert_eq!(adapter.get_timestamp("a.txt").await.unwrap(), full);
        assert_eq!(full.size, 3);
    }
}
