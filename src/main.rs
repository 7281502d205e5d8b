use clap::Parser;
use log::warn;
use pubdash::core::config::{self, CliOverrides, PubdashConfig};
use pubdash::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "pubdash", about = "Publish and browse messages from the terminal")]
struct Args {
    /// Backend base URL (overrides PUBDASH_API_BASE and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Show published messages locally instead of reloading the list
    #[arg(long)]
    echo: bool,

    /// Start with auto refresh disabled
    #[arg(long)]
    no_auto_refresh: bool,

    /// Seconds between automatic list refreshes
    #[arg(long)]
    refresh_secs: Option<u64>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        Self {
            base_url: args.base_url,
            echo: args.echo,
            no_auto_refresh: args.no_auto_refresh,
            refresh_secs: args.refresh_secs,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to pubdash.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("pubdash.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        PubdashConfig::default()
    });
    let resolved = config::resolve(&file_config, &args.into());

    log::info!(
        "pubdash starting up against {} (auto refresh: {})",
        resolved.backend.base_url,
        resolved.auto_refresh
    );

    tui::run(resolved)
}
