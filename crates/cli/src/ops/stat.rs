use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use mfs::{FileEntry, FileOperations, MfsError};

/// Show metadata for a file or directory
#[derive(Args, Debug, Clone)]
pub struct Stat {
    /// Path relative to the configured root
    pub path: String,

    /// Print the entry as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug)]
pub struct StatOutput {
    pub entry: FileEntry,
    pub json: bool,
}

impl fmt::Display for StatOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.json {
            let json = serde_json::to_string_pretty(&self.entry).map_err(|_| fmt::Error)?;
            return write!(f, "{json}");
        }

        writeln!(f, "{} {}", "Path:".dimmed(), self.entry.path.bold())?;
        writeln!(f, "{} {}", "Type:".dimmed(), self.entry.entry_type)?;
        writeln!(f, "{} {} bytes", "Size:".dimmed(), self.entry.size)?;
        writeln!(
            f,
            "{} {}",
            "Modified:".dimmed(),
            format_timestamp(self.entry.timestamp)
        )?;
        write!(f, "{} {}", "Visibility:".dimmed(), self.entry.visibility)
    }
}

/// Render unix seconds as UTC, falling back to the raw number.
pub fn format_timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum StatError {
    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Stat {
    type Error = StatError;
    type Output = StatOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;
        let entry = adapter.get_metadata(&self.path).await?;

        Ok(StatOutput {
            entry,
            json: self.json,
        })
    }
}
