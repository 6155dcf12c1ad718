use std::fmt;
use std::path::PathBuf;

use clap::Args;
use owo_colors::OwoColorize;

use mfs::{ModePair, PermissionTable};

use crate::state::{AppState, StateError};

/// Write a config file from the current flags and environment
#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,

    /// Store a permission table (0644/0600 for files, 0755/0700 for
    /// directories) so `chmod` can set visibility
    #[arg(long)]
    pub with_permissions: bool,
}

#[derive(Debug)]
pub struct InitOutput {
    pub config_path: PathBuf,
    pub host: String,
    pub root: String,
    pub gateway: String,
    pub permissions: bool,
}

impl fmt::Display for InitOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} config at {}",
            "Wrote".green().bold(),
            self.config_path.display().to_string().bold()
        )?;
        writeln!(f, "  {} {}", "Host:".dimmed(), self.host)?;
        writeln!(f, "  {} /{}", "Root:".dimmed(), self.root)?;
        writeln!(f, "  {} {}", "Gateway:".dimmed(), self.gateway)?;
        let permissions = if self.permissions { "configured" } else { "none" };
        write!(f, "  {} {}", "Permissions:".dimmed(), permissions)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    State(#[from] StateError),
}

pub fn default_permissions() -> PermissionTable {
    PermissionTable {
        file: ModePair {
            public: 0o644,
            private: 0o600,
        },
        dir: ModePair {
            public: 0o755,
            private: 0o700,
        },
    }
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = InitOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut config = ctx.config.clone();
        if self.with_permissions {
            config = config.with_permissions(default_permissions());
        }

        let state = AppState::init(ctx.config_dir.clone(), config, self.force)?;

        Ok(InitOutput {
            config_path: state.config_path,
            host: state.config.host.to_string(),
            root: state.config.root.clone(),
            gateway: state.config.gateway.clone(),
            permissions: state.config.permissions.is_some(),
        })
    }
}
