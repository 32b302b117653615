use std::process::ExitCode;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;

use ssh_crontab::logging::init_logging;
use ssh_crontab::{
    load_destinations, run, Cli, Config, CrontabError, SshConnector, Writer, CRONTAB_COMMAND,
};

async fn run_fanout(config: &Config) -> Result<(), CrontabError> {
    let destinations = load_destinations(&config.config_file)?;
    info!(
        count = destinations.len(),
        file = %config.config_file.display(),
        "Destinations loaded"
    );

    let connector = Arc::new(SshConnector::from(config));
    run(
        connector,
        destinations,
        CRONTAB_COMMAND,
        config.max_parallel,
        Writer::stdio(),
    )
    .await;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_logging(cli.quiet);

    let result = match cli.resolve() {
        Ok(config) => run_fanout(&config).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
