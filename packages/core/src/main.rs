use clap::Parser;
use dotenvy::dotenv;

use board_client::cli::Cli;
use board_client::commands;
use board_client::config::Config;
use board_client::error::AppError;
use board_client::logging::init_logging;
use board_client::services::board::BoardClient;
use board_client::session::SessionStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = Config::from_env().map_err(AppError::Config)?;
    config.apply_cli(&cli);
    tracing::debug!("Starting with config: {:?}", config);

    let session = SessionStore::load(config.session_file.clone())?;
    let client = BoardClient::with_timeout(&config.api_url, session, config.http_timeout)?;

    commands::run(cli.command, &client, &config).await
}
