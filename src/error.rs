use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrontabError {
    #[error("Failed to open config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to resolve the home directory for the default private key")]
    HomeDir,
    #[error("Failed to load private key {}: {reason}", .path.display())]
    Key { path: PathBuf, reason: String },
    #[error("Failed to connect SSH session: {0}")]
    Connection(#[from] openssh::Error),
    #[error("Failed to execute '{command}': {reason}")]
    Execution { command: String, reason: String },
    #[error("Task did not complete: {0}")]
    Aborted(String),
}
