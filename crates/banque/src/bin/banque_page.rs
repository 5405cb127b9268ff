//! # Banque Page Runner
//!
//! Runs the home page behaviour headless: reveals the cards, binds the
//! buttons, and logs the clock line every minute.
//!
//! ## Usage
//!
//! ```bash
//! banque_page [config.toml] --run-for-ms 5000
//! ```
//!
//! Log level comes from `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use banque::{EventBus, PageEvent, PageRuntime, RuntimeConfig};
use banque_ui::{ClockSource, LineSink, SystemClock, TracingSink, UiConfig, UiResult, UpdateDriver};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CONFIG: &str = "config/banque_page.toml";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    // Parse command line arguments (simple parsing, no external deps)
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut runtime = RuntimeConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--run-for-ms" | "-r" => {
                if i + 1 < args.len() {
                    runtime.run_for = args[i + 1].parse().ok().map(Duration::from_millis);
                    i += 1;
                }
            }
            "--event-capacity" => {
                if i + 1 < args.len() {
                    runtime.event_capacity = args[i + 1].parse().unwrap_or(runtime.event_capacity);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: banque_page [CONFIG] [OPTIONS]");
                println!();
                println!("Arguments:");
                println!("  CONFIG                     TOML config (default: {DEFAULT_CONFIG})");
                println!();
                println!("Options:");
                println!("  -r, --run-for-ms <MS>      Shut down after MS milliseconds");
                println!("      --event-capacity <N>   Event bus capacity (default: 256)");
                println!("  -h, --help                 Show this help");
                return ExitCode::SUCCESS;
            }
            other => config_path = PathBuf::from(other),
        }
        i += 1;
    }

    match run(&config_path, runtime) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, config = %config_path.display(), "banque_page failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &Path, runtime_config: RuntimeConfig) -> UiResult<()> {
    let config = UiConfig::load(config_path)?;
    let source: Arc<dyn ClockSource> = Arc::new(SystemClock);
    let sink: Arc<dyn LineSink> = Arc::new(TracingSink);
    let driver = UpdateDriver::new(&config, source, sink)?;

    let bus = EventBus::new(runtime_config.event_capacity.max(1));
    let document = PageRuntime::build_document(&config);
    tracing::info!(elements = document.len(), page = %config.page.name, "page built");

    let mut runtime = PageRuntime::new(document, driver, bus.receiver(), runtime_config);
    bus.sender().send_blocking(PageEvent::ContentLoaded);

    let stats = runtime.run();
    stats.log_summary();
    Ok(())
}
