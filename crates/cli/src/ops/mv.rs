use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use mfs::{FileOperations, MfsError};

/// Move or rename a file or directory
#[derive(Args, Debug, Clone)]
pub struct Mv {
    pub from: String,
    pub to: String,
}

#[derive(Debug)]
pub struct MvOutput {
    pub from: String,
    pub to: String,
}

impl fmt::Display for MvOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            "Moved".green().bold(),
            self.from,
            self.to.bold()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MvError {
    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Mv {
    type Error = MvError;
    type Output = MvOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;
        adapter.rename(&self.from, &self.to).await?;

        Ok(MvOutput {
            from: self.from.clone(),
            to: self.to.clone(),
        })
    }
}
