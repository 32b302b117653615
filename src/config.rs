//! Configuration for ssh-crontab.
//!
//! `Cli` holds the clap structs for command line arguments and flags. It is
//! resolved once at startup into an immutable `Config` that the loader and the
//! runner receive.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::CrontabError;

pub const DEFAULT_PORT: u16 = 22;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// JSON file listing `{"host": ..., "user": ...}` destinations
    #[arg(value_name = "CONFIGFILE")]
    pub config_file: PathBuf,

    /// Don't show the INFO log
    #[arg(long, short)]
    pub quiet: bool,

    /// Private key. Defaults to `~/.ssh/id_rsa`
    #[arg(long = "identity", short = 'i', value_name = "PATH")]
    pub private_key: Option<PathBuf>,

    /// SSH port used for every destination
    #[arg(long, short, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum number of hosts contacted at once. Unlimited by default.
    #[arg(long, short = 'j', value_name = "N")]
    pub max_parallel: Option<NonZeroUsize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub config_file: PathBuf,
    pub quiet: bool,
    pub key_path: PathBuf,
    pub port: u16,
    pub max_parallel: Option<NonZeroUsize>,
}

impl Cli {
    /// Fills in defaults that depend on the environment.
    pub fn resolve(self) -> Result<Config, CrontabError> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        self.resolve_with_home(home.as_deref())
    }

    fn resolve_with_home(self, home: Option<&Path>) -> Result<Config, CrontabError> {
        let key_path = match self.private_key {
            Some(path) => path,
            None => default_key_path(home)?,
        };
        Ok(Config {
            config_file: self.config_file,
            quiet: self.quiet,
            key_path,
            port: self.port,
            max_parallel: self.max_parallel,
        })
    }
}

fn default_key_path(home: Option<&Path>) -> Result<PathBuf, CrontabError> {
    match home {
        Some(home) if !home.as_os_str().is_empty() => Ok(home.join(".ssh").join("id_rsa")),
        _ => Err(CrontabError::HomeDir),
    }
}
