use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use mfs::{FileOperations, MfsError, Visibility};

/// Make a file or directory public or private
#[derive(Args, Debug, Clone)]
pub struct Chmod {
    pub path: String,

    /// `public` or `private`
    pub visibility: Visibility,
}

#[derive(Debug)]
pub struct ChmodOutput {
    pub path: String,
    pub visibility: Visibility,
}

impl fmt::Display for ChmodOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is now {}",
            "Updated".green().bold(),
            self.path.bold(),
            self.visibility
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChmodError {
    #[error("{0} (run `mfs init --with-permissions --force` to configure modes)")]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Chmod {
    type Error = ChmodError;
    type Output = ChmodOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;
        adapter.set_visibility(&self.path, self.visibility).await?;

        Ok(ChmodOutput {
            path: self.path.clone(),
            visibility: self.visibility,
        })
    }
}
