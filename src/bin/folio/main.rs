use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{info, warn};

use folio::config::Config;
use folio::logger::configure_logger;
use folio::server::server_run;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "folio.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,
}

fn log_startup(config: &Config) {
    info!("Starting Folio for {} =-=-=-=-=-=-=-=-=-=-=-=-=-=-", config.site_url());
    info!("Posts from {}, templates from {}",
        config.paths.content_dir.display(), config.paths.template_dir.display());

    match config.session_token() {
        Some(_) => info!("Chat sign-in enabled through the {} cookie", config.session_cookie()),
        None => warn!("No session token configured. The chat page stays closed"),
    }
    info!("Listening on {}:{}", config.server.address, config.server.port);
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            eprintln!("Please run folio --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    log_startup(&config);
    server_run(config).await?;
    Ok(())
}
