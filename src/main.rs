use clap::Parser;

use marketplace_rs::cli::{Cli, CommandOutcome, execute_command, load_and_merge_config};
use marketplace_rs::logger::init_logger;
use marketplace_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger(settings.logger.clone().into_logger_config()?)?;

    match execute_command(&cli, settings.clone()).await? {
        CommandOutcome::StartServer => Server::new(settings).run().await,
        CommandOutcome::Completed => Ok(()),
    }
}
