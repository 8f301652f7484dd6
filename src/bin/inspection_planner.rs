use std::error::Error;

use chrono::Local;
use clap::Parser;
use lib::planner::{
    helpers::get_config,
    inspection_service::HttpService,
    models::Args,
    run_tool::run,
    terminal::{TerminalPopups, TerminalSurface},
};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .init();

    /* Get all the required resources */
    let args = Args::parse();
    let config = get_config(&args)?;
    let service = HttpService::new(&config)?;
    info!("Talking to {}", config.api_base_url);

    let mut view = TerminalSurface::new();
    let mut popups = TerminalPopups {
        assume_yes: args.yes,
    };
    run(
        &service,
        &mut view,
        &mut popups,
        args.command,
        Local::now().date_naive(),
    )
    .await?;
    Ok(())
}
