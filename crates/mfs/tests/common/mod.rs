//! A fake node answering the RPC API over HTTP, backed by [`MemoryNode`].
//!
//! Lets the adapter run against a real socket with the same request shapes
//! a kubo daemon sees, while tests inspect the node state directly.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::{Multipart, RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use mfs::{ApiError, Config, ContentStore, MemoryNode, PathTree, ReadRange};

pub const GATEWAY: &str = "https://ipfs.example/ipfs/";

#[derive(Clone)]
struct FakeState {
    node: MemoryNode,
    unavailable: Arc<AtomicBool>,
}

impl FakeState {
    fn check(&self) -> Result<(), Fault> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(Fault::Unavailable)
        } else {
            Ok(())
        }
    }
}

pub struct FakeNode {
    pub node: MemoryNode,
    pub url: Url,
    unavailable: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl FakeNode {
    pub async fn start() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();

        let node = MemoryNode::new();
        let unavailable = Arc::new(AtomicBool::new(false));
        let state = FakeState {
            node: node.clone(),
            unavailable: unavailable.clone(),
        };

        let app = Router::new()
            .route("/api/v0/add", post(add))
            .route("/api/v0/files/stat", post(stat))
            .route("/api/v0/files/mkdir", post(mkdir))
            .route("/api/v0/files/read", post(read))
            .route("/api/v0/files/ls", post(ls))
            .route("/api/v0/files/mv", post(mv))
            .route("/api/v0/files/cp", post(cp))
            .route("/api/v0/files/rm", post(rm))
            .route("/api/v0/files/chmod", post(chmod))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            node,
            url: Url::parse(&format!("http://{addr}/api/v0")).unwrap(),
            unavailable,
            handle,
        }
    }

    /// Adapter config pointing at this node, rooted at `root`.
    pub fn config(&self, root: &str) -> Config {
        Config::default()
            .with_host(self.url.clone())
            .with_root(root)
            .with_gateway(GATEWAY)
    }

    /// Answer every following request with a bare 503.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl Drop for FakeNode {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A URL nothing is listening on.
pub async fn dead_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/api/v0")).unwrap()
}

enum Fault {
    Node(String),
    BadRequest(String),
    Unavailable,
}

impl From<ApiError> for Fault {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Node(err) => Fault::Node(err.message),
            other => Fault::Node(other.to_string()),
        }
    }
}

impl IntoResponse for Fault {
    fn into_response(self) -> Response {
        match self {
            Fault::Node(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "Message": message, "Code": 0, "Type": "error" })),
            )
                .into_response(),
            Fault::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "Message": message, "Code": 1, "Type": "error" })),
            )
                .into_response(),
            Fault::Unavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "service unavailable").into_response()
            }
        }
    }
}

struct Args(Vec<(String, String)>);

impl Args {
    fn parse(query: Option<String>) -> Self {
        let query = query.unwrap_or_default();
        Args(
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    fn arg(&self, index: usize) -> Result<&str, Fault> {
        self.0
            .iter()
            .filter(|(key, _)| key == "arg")
            .nth(index)
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| Fault::BadRequest(format!("argument {index} is required")))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    fn number(&self, key: &str) -> Result<Option<u64>, Fault> {
        self.get(key)
            .map(|raw| {
                raw.parse()
                    .map_err(|_| Fault::BadRequest(format!("invalid {key}: {raw}")))
            })
            .transpose()
    }
}

fn done() -> Response {
    StatusCode::OK.into_response()
}

async fn add(
    State(state): State<FakeState>,
    RawQuery(query): RawQuery,
    mut multipart: Multipart,
) -> Result<Response, Fault> {
    state.check()?;
    let args = Args::parse(query);
    if args.get("pin") != Some("false") || args.get("wrap-with-directory") != Some("false") {
        return Err(Fault::BadRequest("expected pin=false and no wrapping".into()));
    }

    let field = multipart
        .next_field()
        .await
        .map_err(|err| Fault::BadRequest(err.to_string()))?
        .ok_or_else(|| Fault::BadRequest("file argument is required".into()))?;
    let name = field.file_name().unwrap_or_default().to_string();
    let content = field
        .bytes()
        .await
        .map_err(|err| Fault::BadRequest(err.to_string()))?;

    let added = state.node.add(&name, content).await?;

    // current nodes report the size as a decimal string
    Ok(Json(json!({
        "Name": added.name,
        "Hash": added.hash,
        "Size": added.size.unwrap_or_default().to_string(),
    }))
    .into_response())
}

async fn stat(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Result<Response, Fault> {
    state.check()?;
    let args = Args::parse(query);
    Ok(Json(state.node.stat(args.arg(0)?).await?).into_response())
}

async fn mkdir(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Result<Response, Fault> {
    state.check()?;
    let args = Args::parse(query);
    state.node.mkdir(args.arg(0)?, args.flag("parents")).await?;
    Ok(done())
}

async fn read(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Result<Response, Fault> {
    state.check()?;
    let args = Args::parse(query);
    let range = ReadRange {
        offset: args.number("offset")?,
        count: args.number("count")?,
    };
    Ok(state.node.read(args.arg(0)?, range).await?.into_response())
}

async fn ls(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Result<Response, Fault> {
    state.check()?;
    let args = Args::parse(query);
    Ok(Json(state.node.ls(args.arg(0)?).await?).into_response())
}

async fn mv(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Result<Response, Fault> {
    state.check()?;
    let args = Args::parse(query);
    state.node.mv(args.arg(0)?, args.arg(1)?).await?;
    Ok(done())
}

async fn cp(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Result<Response, Fault> {
    state.check()?;
    let args = Args::parse(query);
    let (source, dest) = (args.arg(0)?, args.arg(1)?);

    match source.strip_prefix("/ipfs/") {
        Some(hash) => state.node.link(hash, dest).await?,
        None => state.node.cp(source, dest).await?,
    }
    Ok(done())
}

async fn rm(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Result<Response, Fault> {
    state.check()?;
    let args = Args::parse(query);
    let path = args.arg(0)?;
    if state.node.is_dir(path) && !args.flag("recursive") {
        return Err(Fault::Node(format!("{path} is a directory, use -r to remove directories")));
    }

    state.node.rm(path).await?;
    Ok(done())
}

async fn chmod(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Result<Response, Fault> {
    state.check()?;
    let args = Args::parse(query);
    let raw = args
        .get("mode")
        .ok_or_else(|| Fault::BadRequest("mode is required".into()))?;
    let mode = u32::from_str_radix(raw, 8)
        .map_err(|_| Fault::BadRequest(format!("invalid mode: {raw}")))?;

    state.node.chmod(args.arg(0)?, mode).await?;
    Ok(done())
}
