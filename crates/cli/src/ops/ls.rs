use std::fmt;

use clap::Args;
use comfy_table::Table;

use mfs::{FileEntry, FileOperations, MfsError};

use super::stat::format_timestamp;

/// List a directory
#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Directory relative to the configured root (defaults to the root)
    #[arg(default_value = "")]
    pub path: String,

    /// Print the entries as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug)]
pub struct LsOutput {
    pub items: Vec<FileEntry>,
    pub json: bool,
}

impl fmt::Display for LsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.json {
            let json = serde_json::to_string_pretty(&self.items).map_err(|_| fmt::Error)?;
            return write!(f, "{json}");
        }

        if self.items.is_empty() {
            return write!(f, "No items found");
        }

        let mut table = Table::new();
        table.set_header(vec!["TYPE", "PATH", "SIZE", "MODIFIED", "VISIBILITY"]);
        for item in &self.items {
            table.add_row(vec![
                item.entry_type.to_string(),
                item.path.clone(),
                item.size.to_string(),
                format_timestamp(item.timestamp),
                item.visibility.to_string(),
            ]);
        }
        write!(f, "{table}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Ls {
    type Error = LsError;
    type Output = LsOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;
        let items = adapter.list_contents(&self.path).await?;

        Ok(LsOutput {
            items,
            json: self.json,
        })
    }
}
