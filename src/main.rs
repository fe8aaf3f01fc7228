use clap::Parser;

use raquetas_rs::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};
use raquetas_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    execute_command(&cli, settings.clone()).await?;

    if cli.should_serve() {
        Server::new(settings).run().await?;
    }

    Ok(())
}
