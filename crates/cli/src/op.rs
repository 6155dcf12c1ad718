use std::fmt::{Debug, Display};
use std::path::PathBuf;

use mfs::{Adapter, Config, MfsError};

/// Everything a command needs: the effective config (file, environment and
/// flags merged) and where the config file lives.
#[derive(Debug, Clone)]
pub struct OpContext {
    pub config: Config,
    pub config_dir: Option<PathBuf>,
}

impl OpContext {
    pub fn new(config: Config, config_dir: Option<PathBuf>) -> Self {
        Self { config, config_dir }
    }

    /// Connect to the configured node. The root directory is created on
    /// the way if it is missing.
    pub async fn adapter(&self) -> Result<Adapter, MfsError> {
        Adapter::connect(self.config.clone()).await
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;
    type Output: Display + Debug + Send;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

/// Build a `Command` subcommand enum from `(Variant, Type)` pairs, with
/// matching `OpOutput` and `OpError` enums and an [`Op`] impl dispatching
/// to each variant.
#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $ty:ty)),* $(,)?) => {
        #[derive(::clap::Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($ty),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$ty as $crate::op::Op>::Output),)*
        }

        impl ::std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(OpOutput::$variant(output) => write!(f, "{}", output),)*
                }
            }
        }

        #[derive(Debug, ::thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$ty as $crate::op::Op>::Error),
            )*
        }

        #[::async_trait::async_trait]
        impl $crate::op::Op for Command {
            type Error = OpError;
            type Output = OpOutput;

            async fn execute(
                &self,
                ctx: &$crate::op::OpContext,
            ) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => <$ty as $crate::op::Op>::execute(op, ctx)
                            .await
                            .map(OpOutput::$variant)
                            .map_err(OpError::$variant),
                    )*
                }
            }
        }
    };
}
