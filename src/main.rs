//! coursesync - keeps a course's lessons in sync with the course service
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use coursesync::{HeadlessEvent, HeadlessNotifier};
use coursesync_app::config::{init_config_dir, load_settings};
use coursesync_app::{Engine, RouteContext};
use coursesync_client::HttpTransport;
use coursesync_core::CourseId;

/// coursesync - lesson, file and deadline synchronizer
#[derive(Parser, Debug)]
#[command(name = "coursesync")]
#[command(about = "Keeps a course's lessons, files and deadlines in sync", long_about = None)]
struct Args {
    /// Directory holding .coursesync/config.toml
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Course whose lessons are shown
    #[arg(long)]
    course: u64,

    /// Override the configured service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Allow create, edit and delete commands
    #[arg(long)]
    editing: bool,

    /// Write a default .coursesync/config.toml and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // Get base path from args or use current directory
    let base_path = args
        .path
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if args.init_config {
        init_config_dir(&base_path)?;
        eprintln!(
            "Wrote default config to {}",
            base_path.join(".coursesync").display()
        );
        return Ok(());
    }

    // Log to file; stdout carries NDJSON
    let log_dir = coursesync_core::logging::init()?;
    info!("Log directory: {}", log_dir.display());

    let mut settings = load_settings(&base_path);
    if let Some(base_url) = args.base_url {
        settings.server.base_url = base_url;
    }
    info!("Service: {}", settings.server.base_url);

    let transport =
        match HttpTransport::new(&settings.server.base_url, settings.server.request_timeout()) {
            Ok(transport) => transport,
            Err(e) => {
                HeadlessEvent::error(e.to_string(), true).emit();
                return Err(e.into());
            }
        };

    let route = RouteContext::new(CourseId(args.course), args.editing);
    let engine = Engine::new(route, settings, transport, Arc::new(HeadlessNotifier));

    let result = coursesync::run_headless(engine).await;
    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    result?;
    Ok(())
}
