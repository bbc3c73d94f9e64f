use std::io::Read;
use std::path::PathBuf;

use crate::config::{AppConfig, ConfigError};

/// A single CLI operation
///
/// Each subcommand's argument struct implements `Op`; [`crate::command_enum!`]
/// wires them into the top-level `Command` enum.
pub trait Op {
    type Error: std::error::Error + Send + Sync + 'static;
    type Output: std::fmt::Display;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

/// State shared by every operation
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    pub config: AppConfig,
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = AppConfig::load(config_path.as_deref())?;
        Ok(Self {
            config,
            config_path,
        })
    }
}

/// Use `value` if given, otherwise read all of stdin
pub fn arg_or_stdin(value: Option<&str>) -> std::io::Result<String> {
    match value {
        Some(value) => Ok(value.to_string()),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Build the `Command` enum and its dispatcher from `(Variant, OpType)` pairs
#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(clap::Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::op::Op>::Error),
            )*
        }

        impl Command {
            pub fn execute(&self, ctx: &$crate::op::OpContext) -> Result<String, OpError> {
                match self {
                    $(
                        Command::$variant(op) => $crate::op::Op::execute(op, ctx)
                            .map(|output| output.to_string())
                            .map_err(OpError::$variant),
                    )*
                }
            }
        }
    };
}
