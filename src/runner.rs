//! Fan-out of one command to every destination.
//!
//! Every destination gets its own tokio task. A failure in one task is printed
//! and recorded in its `Report` but never affects the other tasks.

use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::destination::Destination;
use crate::error::CrontabError;
use crate::session::{Connector, Session};
use crate::writer::Writer;

/// The command fetched from every destination.
pub const CRONTAB_COMMAND: &str = "crontab -l";

/// Outcome of one destination.
#[derive(Debug)]
pub struct Report {
    pub destination: Destination,
    pub outcome: Result<Vec<u8>, CrontabError>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Runs `command` on every destination and waits for all of them.
///
/// Reports come back in destination order. With `max_parallel` set, at most
/// that many sessions are open at the same time.
pub async fn run<C: Connector>(
    connector: Arc<C>,
    destinations: Vec<Destination>,
    command: &str,
    max_parallel: Option<NonZeroUsize>,
    writer: Writer,
) -> Vec<Report> {
    let permits = max_parallel.map(|n| Arc::new(Semaphore::new(n.get())));

    let mut tasks = Vec::with_capacity(destinations.len());
    for destination in destinations.iter().cloned() {
        let connector = Arc::clone(&connector);
        let permits = permits.clone();
        let writer = writer.clone();
        let command = command.to_string();
        tasks.push(tokio::spawn(async move {
            // Held until the result is printed.
            let _permit = match permits {
                Some(permits) => permits.acquire_owned().await.ok(),
                None => None,
            };
            let outcome = fetch(&*connector, &destination, &command).await;
            print_report(&writer, &destination, &outcome);
            outcome
        }));
    }

    let mut reports = Vec::with_capacity(tasks.len());
    for (destination, joined) in destinations.into_iter().zip(join_all(tasks).await) {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(%destination, error = %e, "Destination task did not complete");
                let outcome = Err(CrontabError::Aborted(e.to_string()));
                print_report(&writer, &destination, &outcome);
                outcome
            }
        };
        reports.push(Report {
            destination,
            outcome,
        });
    }

    let succeeded = reports.iter().filter(|report| report.is_success()).count();
    info!(
        succeeded,
        failed = reports.len() - succeeded,
        "All destinations done"
    );
    reports
}

fn print_report(
    writer: &Writer,
    destination: &Destination,
    outcome: &Result<Vec<u8>, CrontabError>,
) {
    let printed = match outcome {
        Ok(content) => writer.success(destination, content),
        Err(error) => writer.failure(destination, error),
    };
    if let Err(e) = printed {
        warn!(%destination, error = %e, "Failed to print result");
    }
}

/// Opens a session, runs `command` and closes the session again.
///
/// The session is closed whether or not the command succeeded.
async fn fetch<C: Connector>(
    connector: &C,
    destination: &Destination,
    command: &str,
) -> Result<Vec<u8>, CrontabError> {
    let session = connector.open(destination).await?;
    let result = session.run(command).await;
    session.close().await;
    result
}
