//! ssh-crontab: fetch `crontab -l` from many SSH hosts at once.

// Command line arguments and configuration.
pub mod config;
// How to parse and represent destinations.
pub mod destination;
// Error handling.
pub mod error;
// Informational logging.
pub mod logging;
// Concurrent fan-out to all destinations.
pub mod runner;
// SSH session wrapper.
pub mod session;
// Printing per-destination results.
pub mod writer;

pub use config::{Cli, Config};
pub use destination::{load_destinations, Destination};
pub use error::CrontabError;
pub use runner::{run, Report, CRONTAB_COMMAND};
pub use session::{Connector, Session, SshConnector, SshSession};
pub use writer::{SharedBuffer, Writer};
