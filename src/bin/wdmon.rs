//! wdmon - terminal dashboard for workload disruptions.
//!
//! Usage:
//!   wdmon http://wdmon.cluster:8080      # poll a wdmon server, 5s interval
//!   wdmon http://localhost:8080 -i 10    # slower polling
//!   wdmon --mock                         # canned data, no server needed

use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use wdmon::client::{DisruptionSource, HttpSource, MockSource};
use wdmon::state::{PersistentViewState, StateStore};
use wdmon::tui::App;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Terminal dashboard for workload disruptions.
#[derive(Parser)]
#[command(name = "wdmon", about = "Workload disruption monitor", version)]
struct Args {
    /// Base URL of the wdmon server, e.g. http://localhost:8080.
    #[arg(value_name = "URL", required_unless_present = "mock")]
    url: Option<String>,

    /// Path of the dashboard page on the server.
    #[arg(long, default_value = "/")]
    path: String,

    /// Refresh interval in seconds.
    #[arg(short, long, default_value = "5")]
    interval: u64,

    /// HTTP timeout in seconds.
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Directory for persisted view state (filter and sort survive restarts).
    /// Defaults to the platform state directory.
    #[arg(long, value_name = "DIR")]
    state_dir: Option<String>,

    /// Serve canned data instead of polling a server.
    #[arg(long)]
    mock: bool,

    /// Increase log verbosity (-v: debug, -vv: trace). Logs go to a file
    /// under the state directory.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    let state_dir = args
        .state_dir
        .as_ref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(StateStore::default_dir);

    // Stdout belongs to the TUI; logs go to a file next to the view state.
    init_logging(&state_dir, args.verbose, args.quiet);

    let source: Box<dyn DisruptionSource> = if args.mock {
        Box::new(MockSource::typical_cluster())
    } else {
        // required_unless_present guarantees the URL here
        let url = args.url.as_deref().unwrap_or_default();
        match HttpSource::new(url, &args.path, Duration::from_secs(args.timeout)) {
            Ok(source) => Box::new(source),
            Err(e) => {
                eprintln!("Error: cannot build HTTP client for '{}': {}", url, e);
                std::process::exit(1);
            }
        }
    };

    let view_state = PersistentViewState::load(StateStore::new(state_dir));

    let tick_rate = Duration::from_secs(args.interval.max(1));
    let app = App::new(source, view_state);

    if let Err(e) = app.run(tick_rate) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}

/// Initializes tracing with a file writer under the state directory.
/// Default level is INFO; -q limits to errors. The TUI owns stdout, so a
/// failure to open the log file silently disables logging.
fn init_logging(state_dir: &std::path::Path, verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let Ok(directive) = format!("wdmon={}", level).parse() else {
        return;
    };
    let filter = EnvFilter::from_default_env().add_directive(directive);

    if std::fs::create_dir_all(state_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(state_dir.join("wdmon.log"))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
}
