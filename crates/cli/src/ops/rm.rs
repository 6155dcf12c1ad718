use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use mfs::{FileOperations, MfsError};

/// Remove a file or a directory with everything below it
#[derive(Args, Debug, Clone)]
pub struct Rm {
    pub path: String,
}

#[derive(Debug)]
pub struct RmOutput {
    pub path: String,
}

impl fmt::Display for RmOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", "Removed".red().bold(), self.path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RmError {
    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Rm {
    type Error = RmError;
    type Output = RmOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;
        adapter.delete(&self.path).await?;

        Ok(RmOutput {
            path: self.path.clone(),
        })
    }
}
