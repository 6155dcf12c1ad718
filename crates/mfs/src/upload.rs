//! Two-phase upload: store the content, then name it in the path tree.

use bytes::Bytes;

use crate::api::v0::add::AddResponse;
use crate::error::MfsError;
use crate::node::{ContentStore, PathTree};
use crate::path::{self, PathResolver};

/// What the node reported for stored content.
pub type UploadResult = AddResponse;

/// Store `content` and link it at logical `path`.
///
/// If linking fails the parent directory is created (one level, no
/// `parents` flag) and the link retried once. A failure after that leaves
/// the stored block unlinked; it is not removed.
pub async fn upload<N>(
    node: &N,
    resolver: &PathResolver,
    path: &str,
    content: Bytes,
) -> Result<UploadResult, MfsError>
where
    N: ContentStore + PathTree + ?Sized,
{
    let added = node.add(path::basename(path), content).await?;
    let dest = resolver.resolve(path);

    let first = match node.link(&added.hash, &dest).await {
        Ok(()) => {
            tracing::info!(hash = %added.hash, dest = %dest, "uploaded");
            return Ok(added);
        }
        Err(err) => err,
    };

    let parent = resolver.resolve(path::parent(path));
    tracing::warn!(
        hash = %added.hash,
        dest = %dest,
        parent = %parent,
        error = %first,
        "link failed, creating parent and retrying"
    );

    let retried = match node.mkdir(&parent, false).await {
        Ok(()) => node.link(&added.hash, &dest).await,
        Err(err) => Err(err),
    };

    match retried {
        Ok(()) => {
            tracing::info!(hash = %added.hash, dest = %dest, "uploaded after creating parent");
            Ok(added)
        }
        Err(source) => Err(MfsError::Link {
            hash: added.hash,
            path: path.to_string(),
            source,
        }),
    }
}
