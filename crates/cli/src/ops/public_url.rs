use std::fmt;

use clap::Args;

use mfs::{FileOperations, MfsError};

/// Print the gateway URL for the content at a path
#[derive(Args, Debug, Clone)]
pub struct PublicUrl {
    pub path: String,
}

#[derive(Debug)]
pub struct PublicUrlOutput {
    pub url: String,
}

impl fmt::Display for PublicUrlOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublicUrlError {
    #[error(transparent)]
    Mfs(#[from] MfsError),
}

#[async_trait::async_trait]
impl crate::op::Op for PublicUrl {
    type Error = PublicUrlError;
    type Output = PublicUrlOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let adapter = ctx.adapter().await?;
        let url = adapter.get_public_url(&self.path).await?;

        Ok(PublicUrlOutput { url })
    }
}
