use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use mfs::{FileOperations, MfsError};

/// Copy a file or directory
#[derive(Args, Debug, Clone)]
pub struct Cp {
    pub from: String,
    pub to: String,
}

#[derive(Debug)]
pub struct CpOutput {
    pub from: String,
    pub to: String,
}

impl fmt::Display for CpOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            "Copied".green().bold(),
            self.from,
            self.to.bold()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CpError {
    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Cp {
    type Error = CpError;
    type Output = CpOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;
        adapter.copy(&self.from, &self.to).await?;

        Ok(CpOutput {
            from: self.from.clone(),
            to: self.to.clone(),
        })
    }
}
