//! SSH destinations.
//!
//! One SSH connection is created for one `Destination`. Each connection runs in
//! its own tokio task, in parallel with the others.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::CrontabError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Destination {
    /// SSH hostname or address to connect to.
    pub host: String,
    /// Remote user to log in as.
    pub user: String,
}

impl Destination {
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.host)
    }
}

/// Reads the JSON destination list at `path`, preserving file order.
pub fn load_destinations(path: &Path) -> Result<Vec<Destination>, CrontabError> {
    let file = File::open(path).map_err(|source| CrontabError::ConfigRead {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CrontabError::ConfigParse {
        path: path.to_owned(),
        source,
    })
}
