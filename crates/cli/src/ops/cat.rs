use std::fmt;

use bytes::Bytes;
use clap::Args;
use owo_colors::OwoColorize;

use mfs::{FileOperations, MfsError};

/// Print a file's content
#[derive(Args, Debug, Clone)]
pub struct Cat {
    /// Path relative to the configured root
    pub path: String,

    /// Byte offset to start reading at
    #[arg(long)]
    pub offset: Option<u64>,

    /// Maximum number of bytes to read
    #[arg(long)]
    pub count: Option<u64>,
}

#[derive(Debug)]
pub enum CatContent {
    Text(String),
    Binary(Bytes),
}

#[derive(Debug)]
pub struct CatOutput {
    pub path: String,
    pub size: usize,
    pub content: CatContent,
}

impl fmt::Display for CatOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}  {} {} bytes",
            "File:".dimmed(),
            self.path.bold(),
            "Size:".dimmed(),
            self.size
        )?;

        match &self.content {
            CatContent::Text(text) => write!(f, "{text}"),
            CatContent::Binary(bytes) => {
                let hex = bytes
                    .iter()
                    .map(|b| format!("{:02x}", b))
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(f, "{} {hex}", "Binary content (hex):".dimmed())
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatError {
    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Cat {
    type Error = CatError;
    type Output = CatOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;

        let bytes = match (self.offset, self.count) {
            (None, None) => adapter.read(&self.path).await?.contents,
            (offset, count) => {
                adapter
                    .read_range(&self.path, offset.unwrap_or(0), count)
                    .await?
            }
        };

        let size = bytes.len();
        let content = match std::str::from_utf8(&bytes) {
            Ok(text) => CatContent::Text(text.to_string()),
            Err(_) => CatContent::Binary(bytes),
        };

        Ok(CatOutput {
            path: self.path.clone(),
            size,
            content,
        })
    }
}
