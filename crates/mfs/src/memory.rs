//! In-process node keeping both stores in memory.
//!
//! Mirrors the node's MFS semantics closely enough to exercise the adapter
//! without a daemon: copies into a missing directory fail, `mkdir` without
//! `parents` creates a single level, and content is deduplicated by hash.
//! Every call is counted so tests can assert on the request sequence.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use http::StatusCode;
use parking_lot::Mutex;

use crate::api::client::{ApiError, NodeError};
use crate::api::v0::add::AddResponse;
use crate::api::v0::files::{EntryKind, LsEntry, LsResponse, Mode, StatResponse};
use crate::node::{ByteStream, ContentStore, PathTree, ReadRange};

#[derive(Debug, Clone)]
enum Kind {
    Dir,
    File { hash: String },
}

#[derive(Debug, Clone)]
struct Entry {
    kind: Kind,
    mode: Option<u32>,
    mtime: Option<i64>,
}

impl Entry {
    fn dir() -> Self {
        Self {
            kind: Kind::Dir,
            mode: None,
            mtime: None,
        }
    }

    fn file(hash: String) -> Self {
        Self {
            kind: Kind::File { hash },
            mode: None,
            mtime: None,
        }
    }
}

#[derive(Debug)]
struct State {
    blocks: HashMap<String, Bytes>,
    tree: BTreeMap<String, Entry>,
    calls: HashMap<&'static str, usize>,
    refuse_add: bool,
    refuse_mkdir: bool,
}

impl Default for State {
    fn default() -> Self {
        let mut tree = BTreeMap::new();
        tree.insert("/".to_string(), Entry::dir());

        Self {
            blocks: HashMap::new(),
            tree,
            calls: HashMap::new(),
            refuse_add: false,
            refuse_mkdir: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryNode {
    state: Arc<Mutex<State>>,
}

impl MemoryNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `path` and any missing ancestors.
    pub fn add_dir(&self, path: &str) {
        let mut state = self.state.lock();
        for ancestor in ancestors(&clean(path)) {
            state.tree.entry(ancestor).or_insert_with(Entry::dir);
        }
    }

    /// Place `content` at `path`, creating missing ancestors.
    pub fn add_file(&self, path: &str, content: impl Into<Bytes>) -> String {
        let path = clean(path);
        self.add_dir(parent_of(&path));

        let mut state = self.state.lock();
        let hash = store_block(&mut state, content.into());
        state.tree.insert(path, Entry::file(hash.clone()));
        hash
    }

    pub fn set_mtime(&self, path: &str, mtime: i64) {
        if let Some(entry) = self.state.lock().tree.get_mut(&clean(path)) {
            entry.mtime = Some(mtime);
        }
    }

    pub fn is_dir(&self, path: &str) -> bool {
        matches!(
            self.state.lock().tree.get(&clean(path)),
            Some(Entry {
                kind: Kind::Dir,
                ..
            })
        )
    }

    /// Content linked at `path`, if it is a file.
    pub fn file(&self, path: &str) -> Option<Bytes> {
        let state = self.state.lock();
        match state.tree.get(&clean(path)) {
            Some(Entry {
                kind: Kind::File { hash },
                ..
            }) => state.blocks.get(hash).cloned(),
            _ => None,
        }
    }

    pub fn has_block(&self, hash: &str) -> bool {
        self.state.lock().blocks.contains_key(hash)
    }

    /// Number of calls made to `operation` (`"stat"`, `"link"`, ...).
    pub fn calls(&self, operation: &str) -> usize {
        self.state
            .lock()
            .calls
            .get(operation)
            .copied()
            .unwrap_or_default()
    }

    pub fn reset_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Make every following `add` fail.
    pub fn refuse_add(&self) {
        self.state.lock().refuse_add = true;
    }

    /// Make every following `mkdir` fail.
    pub fn refuse_mkdir(&self) {
        self.state.lock().refuse_mkdir = true;
    }

    fn record(&self, operation: &'static str) -> parking_lot::MutexGuard<'_, State> {
        let mut state = self.state.lock();
        *state.calls.entry(operation).or_default() += 1;
        state
    }
}

#[async_trait]
impl ContentStore for MemoryNode {
    async fn add(&self, name: &str, content: Bytes) -> Result<AddResponse, ApiError> {
        let mut state = self.record("add");
        if state.refuse_add {
            return Err(node_error("add refused"));
        }

        let size = content.len() as u64;
        let hash = store_block(&mut state, content);

        Ok(AddResponse {
            name: name.to_string(),
            hash,
            size: Some(size),
        })
    }
}

#[async_trait]
impl PathTree for MemoryNode {
    async fn stat(&self, path: &str) -> Result<StatResponse, ApiError> {
        let state = self.record("stat");
        let path = clean(path);
        let entry = state.tree.get(&path).ok_or_else(not_found)?;

        let mode = entry.mode.map(|bits| Mode::Octal(format!("{bits:04o}")));
        let stat = match &entry.kind {
            Kind::Dir => StatResponse {
                hash: dir_hash(&state, &path),
                size: 0,
                cumulative_size: cumulative_size(&state, &path),
                blocks: children(&state, &path).count() as u64,
                file_type: "directory".to_string(),
                mode,
                mtime: entry.mtime,
            },
            Kind::File { hash } => {
                let size = state.blocks.get(hash).map_or(0, |b| b.len() as u64);
                StatResponse {
                    hash: hash.clone(),
                    size,
                    cumulative_size: size,
                    blocks: 1,
                    file_type: "file".to_string(),
                    mode,
                    mtime: entry.mtime,
                }
            }
        };

        Ok(stat)
    }

    async fn mkdir(&self, path: &str, parents: bool) -> Result<(), ApiError> {
        let mut state = self.record("mkdir");
        if state.refuse_mkdir {
            return Err(node_error("mkdir refused"));
        }

        let path = clean(path);
        if state.tree.contains_key(&path) {
            return if parents {
                Ok(())
            } else {
                Err(node_error("file already exists"))
            };
        }

        if parents {
            for ancestor in ancestors(&path) {
                state.tree.entry(ancestor).or_insert_with(Entry::dir);
            }
            return Ok(());
        }

        require_dir(&state, parent_of(&path))?;
        state.tree.insert(path, Entry::dir());
        Ok(())
    }

    async fn read(&self, path: &str, range: ReadRange) -> Result<Bytes, ApiError> {
        let state = self.record("read");
        let content = file_content(&state, &clean(path))?;

        let len = content.len();
        let start = (range.offset.unwrap_or(0) as usize).min(len);
        let end = match range.count {
            Some(count) => start.saturating_add(count as usize).min(len),
            None => len,
        };

        Ok(content.slice(start..end))
    }

    async fn read_stream(&self, path: &str) -> Result<ByteStream, ApiError> {
        let state = self.record("read");
        let content = file_content(&state, &clean(path))?;

        Ok(futures::stream::iter(vec![Ok::<_, ApiError>(content)]).boxed())
    }

    async fn ls(&self, path: &str) -> Result<LsResponse, ApiError> {
        let state = self.record("ls");
        let path = clean(path);
        require_dir(&state, &path)?;

        let entries: Vec<LsEntry> = children(&state, &path)
            .map(|(child, entry)| {
                let (kind, size, hash) = match &entry.kind {
                    Kind::Dir => (EntryKind::Code(1), 0, dir_hash(&state, child)),
                    Kind::File { hash } => (
                        EntryKind::Code(0),
                        state.blocks.get(hash).map_or(0, |b| b.len() as u64),
                        hash.clone(),
                    ),
                };
                LsEntry {
                    name: name_of(child).to_string(),
                    kind,
                    size,
                    hash,
                    ..Default::default()
                }
            })
            .collect();

        Ok(LsResponse {
            entries: if entries.is_empty() {
                None
            } else {
                Some(entries)
            },
        })
    }

    async fn mv(&self, source: &str, dest: &str) -> Result<(), ApiError> {
        let mut state = self.record("mv");
        let (source, dest) = (clean(source), clean(dest));

        let moved = take_subtree(&mut state, &source)?;
        if let Err(err) = place_subtree(&mut state, &source, &dest, &moved) {
            // put things back the way they were
            for (path, entry) in moved {
                state.tree.insert(path, entry);
            }
            return Err(err);
        }
        Ok(())
    }

    async fn cp(&self, source: &str, dest: &str) -> Result<(), ApiError> {
        let mut state = self.record("cp");
        copy(&mut state, source, dest)
    }

    async fn rm(&self, path: &str) -> Result<(), ApiError> {
        let mut state = self.record("rm");
        let path = clean(path);
        if path == "/" {
            return Err(node_error("cannot remove root"));
        }
        take_subtree(&mut state, &path).map(|_| ())
    }

    async fn chmod(&self, path: &str, mode: u32) -> Result<(), ApiError> {
        let mut state = self.record("chmod");
        let entry = state.tree.get_mut(&clean(path)).ok_or_else(not_found)?;
        entry.mode = Some(mode);
        Ok(())
    }

    async fn link(&self, hash: &str, path: &str) -> Result<(), ApiError> {
        let mut state = self.record("link");
        copy(&mut state, &format!("/ipfs/{hash}"), path)
    }
}

fn copy(state: &mut State, source: &str, dest: &str) -> Result<(), ApiError> {
    let dest = clean(dest);

    if let Some(hash) = source.strip_prefix("/ipfs/") {
        if !state.blocks.contains_key(hash) {
            return Err(not_found());
        }
        require_free(state, &dest)?;
        state.tree.insert(dest, Entry::file(hash.to_string()));
        return Ok(());
    }

    let source = clean(source);
    let copied: Vec<(String, Entry)> = subtree(state, &source).collect();
    if copied.is_empty() {
        return Err(not_found());
    }
    place_subtree(state, &source, &dest, &copied)
}

fn place_subtree(
    state: &mut State,
    source: &str,
    dest: &str,
    entries: &[(String, Entry)],
) -> Result<(), ApiError> {
    require_free(state, dest)?;
    for (path, entry) in entries {
        let relocated = format!("{dest}{}", &path[source.len()..]);
        state.tree.insert(relocated, entry.clone());
    }
    Ok(())
}

fn take_subtree(state: &mut State, path: &str) -> Result<Vec<(String, Entry)>, ApiError> {
    let taken: Vec<(String, Entry)> = subtree(state, path).collect();
    if taken.is_empty() {
        return Err(not_found());
    }
    for (p, _) in &taken {
        state.tree.remove(p);
    }
    Ok(taken)
}

fn subtree<'a>(state: &'a State, path: &'a str) -> impl Iterator<Item = (String, Entry)> + 'a {
    state
        .tree
        .iter()
        .filter(move |(p, _)| is_within(p, path))
        .map(|(p, e)| (p.clone(), e.clone()))
}

fn children<'a>(state: &'a State, dir: &'a str) -> impl Iterator<Item = (&'a String, &'a Entry)> {
    state
        .tree
        .iter()
        .filter(move |(p, _)| p.as_str() != "/" && parent_of(p) == dir)
}

fn require_dir(state: &State, path: &str) -> Result<(), ApiError> {
    match state.tree.get(path) {
        Some(Entry {
            kind: Kind::Dir, ..
        }) => Ok(()),
        Some(_) => Err(node_error("not a directory")),
        None => Err(node_error(&format!(
            "no link named \"{}\" under {}",
            name_of(path),
            parent_of(path)
        ))),
    }
}

fn require_free(state: &State, dest: &str) -> Result<(), ApiError> {
    require_dir(state, parent_of(dest))?;
    if state.tree.contains_key(dest) {
        return Err(node_error("directory already has entry by that name"));
    }
    Ok(())
}

fn file_content(state: &State, path: &str) -> Result<Bytes, ApiError> {
    match state.tree.get(path) {
        Some(Entry {
            kind: Kind::File { hash },
            ..
        }) => Ok(state.blocks.get(hash).cloned().unwrap_or_default()),
        Some(_) => Err(node_error(&format!("{path} was not a file"))),
        None => Err(not_found()),
    }
}

fn cumulative_size(state: &State, dir: &str) -> u64 {
    subtree(state, dir)
        .filter_map(|(_, entry)| match entry.kind {
            Kind::File { hash } => state.blocks.get(&hash).map(|b| b.len() as u64),
            Kind::Dir => None,
        })
        .sum()
}

fn store_block(state: &mut State, content: Bytes) -> String {
    let hash = content_hash(&content);
    state.blocks.entry(hash.clone()).or_insert(content);
    hash
}

fn content_hash(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("bafkrei{:016x}", hasher.finish())
}

fn dir_hash(state: &State, dir: &str) -> String {
    let mut hasher = DefaultHasher::new();
    for (path, entry) in subtree(state, dir) {
        path[dir.len()..].hash(&mut hasher);
        if let Kind::File { hash } = entry.kind {
            hash.hash(&mut hasher);
        }
    }
    format!("bafybei{:016x}", hasher.finish())
}

fn not_found() -> ApiError {
    node_error("file does not exist")
}

fn node_error(message: &str) -> ApiError {
    ApiError::Node(NodeError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.to_string(),
        code: 0,
        kind: "error".to_string(),
    })
}

fn clean(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

fn name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn is_within(path: &str, dir: &str) -> bool {
    dir == "/"
        || path == dir
        || (path.starts_with(dir) && path.as_bytes().get(dir.len()) == Some(&b'/'))
}

fn ancestors(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        current.push('/');
        current.push_str(part);
        out.push(current.clone());
    }
    out
}
