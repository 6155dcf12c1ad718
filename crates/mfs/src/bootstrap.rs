use crate::node::PathTree;
use crate::path::PathResolver;

/// Make sure the configured root directory exists, creating it (with
/// parents) when a stat of it fails.
///
/// Returns whether the root is usable afterwards. This is best effort: a
/// `false` here is logged and left to surface through later operations.
pub async fn ensure_root<N>(node: &N, resolver: &PathResolver) -> bool
where
    N: PathTree + ?Sized,
{
    let root = resolver.root_path();

    match node.stat(&root).await {
        Ok(_) => {
            tracing::debug!(root = %root, "root directory present");
            true
        }
        Err(err) => {
            tracing::debug!(root = %root, error = %err, "root stat failed, creating");
            match node.mkdir(&root, true).await {
                Ok(()) => {
                    tracing::info!(root = %root, "created root directory");
                    true
                }
                Err(err) => {
                    tracing::warn!(root = %root, error = %err, "failed to create root directory");
                    false
                }
            }
        }
    }
}
