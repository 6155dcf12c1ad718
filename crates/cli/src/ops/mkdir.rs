use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use mfs::{FileOperations, MfsError};

/// Create a directory and any missing parents
#[derive(Args, Debug, Clone)]
pub struct Mkdir {
    /// Directory relative to the configured root
    pub path: String,
}

#[derive(Debug)]
pub struct MkdirOutput {
    pub path: String,
}

impl fmt::Display for MkdirOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", "Created".green().bold(), self.path.bold())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MkdirError {
    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Mkdir {
    type Error = MkdirError;
    type Output = MkdirOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;
        adapter.create_dir(&self.path).await?;

        Ok(MkdirOutput {
            path: self.path.clone(),
        })
    }
}
