use std::fs::File;
use std::rc::Rc;

use beacon::core::config::{load_config, resolve};
use beacon::core::state::App;
use beacon::core::theme::Theme;
use beacon::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use tokio::task::LocalSet;

#[derive(Parser)]
#[command(name = "beacon", about = "Theme and navigation stores with a terminal front end")]
struct Args {
    /// Route to open first (e.g. /dashboard)
    #[arg(short, long)]
    route: Option<String>,

    /// Force a theme for this session, overriding the saved one
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// File to write logs to
    #[arg(long, default_value = "beacon.log")]
    log_file: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger; the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config().map_err(std::io::Error::other)?;
    let config = resolve(&file_config, args.route.as_deref(), args.theme);
    log::info!(
        "Beacon starting up (initial route: {}, delay: {:?})",
        config.initial_route,
        config.navigation_delay
    );

    LocalSet::new()
        .run_until(async move {
            let app = Rc::new(App::from_config(config));
            tui::run(app).await
        })
        .await
}
