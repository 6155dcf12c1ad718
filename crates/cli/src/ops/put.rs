use std::fmt;
use std::path::PathBuf;

use clap::Args;
use owo_colors::OwoColorize;

use mfs::{FileOperations, MfsError};

/// Upload a local file (or stdin with `-`)
#[derive(Args, Debug, Clone)]
pub struct Put {
    /// Local file to upload, `-` for stdin
    pub source: PathBuf,

    /// Destination path relative to the configured root
    pub dest: String,
}

#[derive(Debug)]
pub struct PutOutput {
    pub path: String,
    pub hash: String,
    pub size: Option<u64>,
}

impl fmt::Display for PutOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", "Uploaded".green().bold(), self.path.bold())?;
        write!(f, "  {} {}", "Hash:".dimmed(), self.hash)?;
        if let Some(size) = self.size {
            write!(f, "\n  {} {} bytes", "Size:".dimmed(), size)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PutError {
    #[error("failed to open {0}: {1}")]
    Open(PathBuf, std::io::Error),

    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Put {
    type Error = PutError;
    type Output = PutOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;

        let result = if self.source.as_os_str() == "-" {
            let mut stdin = tokio::io::stdin();
            adapter.write_stream(&self.dest, &mut stdin).await?
        } else {
            let mut file = tokio::fs::File::open(&self.source)
                .await
                .map_err(|err| PutError::Open(self.source.clone(), err))?;
            adapter.write_stream(&self.dest, &mut file).await?
        };

        Ok(PutOutput {
            path: self.dest.clone(),
            hash: result.hash,
            size: result.size,
        })
    }
}
