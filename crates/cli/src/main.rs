use std::path::PathBuf;

use clap::Parser;
use owo_colors::OwoColorize;
use url::Url;

mod op;
mod ops;
mod state;

use op::{Op, OpContext};
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "mfs", version, about = "Work with an IPFS node's mutable file system")]
struct Cli {
    #[command(subcommand)]
    command: ops::Command,

    /// Config directory (defaults to ~/.ipfs-mfs)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RPC API base URL, e.g. http://127.0.0.1:5001/api/v0
    #[arg(long, global = true, env = "IPFS_MFS_HOST")]
    host: Option<Url>,

    /// MFS directory all paths are relative to
    #[arg(long, global = true, env = "IPFS_MFS_ROOT")]
    root: Option<String>,

    /// Gateway prefix for public URLs
    #[arg(long, global = true, env = "IPFS_MFS_GATEWAY")]
    gateway: Option<String>,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Cli {
    fn context(&self) -> anyhow::Result<OpContext> {
        let state = AppState::load(self.config.clone())?;
        let mut config = state.config;

        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(root) = &self.root {
            config = config.with_root(root);
        }
        if let Some(gateway) = &self.gateway {
            config = config.with_gateway(gateway.clone());
        }

        Ok(OpContext::new(config, self.config.clone()))
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = cli.context()?;

    match cli.command.execute(&ctx).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            std::process::exit(1);
        }
    }
}
