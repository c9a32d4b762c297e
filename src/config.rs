use std::str::FromStr;

use thiserror::Error;
use tracing::Level;

use crate::{native::NativeExecutor, operation::OperationKind};

pub const USAGE: &str =
    "usage: flagcheck [--executor native|software] [--op <mnemonic>] [--threads <n>] [-v|-q]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutorChoice {
    Native,
    Software,
}

impl Default for ExecutorChoice {
    fn default() -> ExecutorChoice {
        if NativeExecutor::is_available() {
            ExecutorChoice::Native
        } else {
            ExecutorChoice::Software
        }
    }
}

impl FromStr for ExecutorChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<ExecutorChoice, ConfigError> {
        match s {
            "native" => Ok(ExecutorChoice::Native),
            "software" => Ok(ExecutorChoice::Software),
            _ => Err(ConfigError::InvalidValue {
                option: "--executor",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0}")]
    HelpRequested(&'static str),
    #[error("unknown argument `{0}`")]
    UnknownArgument(String),
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    #[error("invalid value `{value}` for {option}")]
    InvalidValue { option: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    pub executor: ExecutorChoice,
    pub filter: Option<OperationKind>,
    /// 1 runs on the calling thread.
    pub threads: usize,
    pub verbosity: Level,
}

impl Default for HarnessConfig {
    fn default() -> HarnessConfig {
        HarnessConfig {
            executor: ExecutorChoice::default(),
            filter: None,
            threads: 1,
            verbosity: Level::INFO,
        }
    }
}

impl HarnessConfig {
    /// Parses the arguments after the program name.
    pub fn from_args<I>(args: I) -> Result<HarnessConfig, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = HarnessConfig::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Err(ConfigError::HelpRequested(USAGE)),
                "-v" | "--verbose" => config.verbosity = Level::DEBUG,
                "-vv" => config.verbosity = Level::TRACE,
                "-q" | "--quiet" => config.verbosity = Level::WARN,
                "--executor" => {
                    config.executor = value(&mut args, "--executor")?.parse()?;
                }
                "--op" => {
                    let mnemonic = value(&mut args, "--op")?;
                    let op = mnemonic.parse().map_err(|_| ConfigError::InvalidValue {
                        option: "--op",
                        value: mnemonic.clone(),
                    })?;
                    config.filter = Some(op);
                }
                "--threads" => {
                    let raw = value(&mut args, "--threads")?;
                    config.threads = match raw.parse::<usize>() {
                        Ok(n) if n > 0 => n,
                        _ => {
                            return Err(ConfigError::InvalidValue {
                                option: "--threads",
                                value: raw,
                            });
                        }
                    };
                }
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(config)
    }
}

fn value<I>(args: &mut I, option: &'static str) -> Result<String, ConfigError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(ConfigError::MissingValue(option))
}
