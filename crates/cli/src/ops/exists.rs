use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use mfs::{FileOperations, MfsError};

/// Check whether a path exists
#[derive(Args, Debug, Clone)]
pub struct Exists {
    pub path: String,
}

#[derive(Debug)]
pub struct ExistsOutput {
    pub path: String,
    pub exists: bool,
}

impl fmt::Display for ExistsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exists {
            write!(f, "{} {}", "yes".green().bold(), self.path)
        } else {
            write!(f, "{} {}", "no".red().bold(), self.path)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExistsError {
    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Exists {
    type Error = ExistsError;
    type Output = ExistsOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;
        let exists = adapter.has(&self.path).await?;

        Ok(ExistsOutput {
            path: self.path.clone(),
            exists,
        })
    }
}
