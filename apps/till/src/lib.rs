//! # Kasse Till Library
//!
//! Terminal front end of the food stand register. Wires operator input,
//! the `Till` state machine and the SQLite gateway into one session.
//!
//! ## Module Organization
//! ```text
//! kasse_till/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration from KASSE_* variables
//! │   └── keypads.rs  ◄─── Numbered item and cash pads
//! ├── input.rs        ◄─── Operator line → Intent
//! ├── presenter.rs    ◄─── DisplayUpdate → text or JSON lines
//! ├── session.rs      ◄─── Line-by-line session loop
//! └── error.rs        ◄─── AppError shown to the operator
//! ```
//!
//! ## Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin  ──► operator lines (taps, words or JSON intents)                │
//! │  stdout ──► the display (one line per update)                           │
//! │  stderr ──► tracing logs                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod input;
pub mod presenter;
pub mod session;
pub mod state;

use directories::ProjectDirs;
use kasse_core::{Catalog, PersistenceGateway, Till};
use kasse_db::{Database, DbConfig, SqliteGateway};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use error::AppError;
use presenter::TerminalPresenter;
use state::{ConfigState, Keypads};

/// Runs one register session on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • KASSE_* environment variables over defaults                       │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • KASSE_DB_PATH or the platform data directory                      │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  4. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • Any malformed row aborts startup                                  │
/// │     • Transaction log gets one column per short code                    │
/// │                                                                         │
/// │  5. Run Session ──────────────────────────────────────────────────────► │
/// │     • Until `quit` or end of input                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), AppError> {
    init_tracing();

    info!("Starting Kasse till");

    let config = ConfigState::from_env();
    let db_path = database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    let gateway = SqliteGateway::new(db.clone());
    let catalog = Catalog::new(gateway.load_catalog().await?)?;
    if catalog.is_empty() {
        warn!("Catalog is empty; run the seed tool to add items");
    }

    let added = db
        .transaction_log()
        .ensure_code_columns(&catalog.codes())
        .await?;
    if !added.is_empty() {
        info!(columns = added.len(), "Transaction log columns added");
    }

    let keypads = Keypads::new(&catalog);
    let mut presenter = TerminalPresenter::new(std::io::stdout(), config, keypads.clone());
    presenter.greet();

    let mut till = Till::new(catalog, gateway, presenter);
    let input = BufReader::new(tokio::io::stdin());
    let result = session::run_session(&mut till, &keypads, input).await;

    db.close().await;
    let summary = result?;
    info!(settled = summary.settled, "Till closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kasse=trace` - Show trace for kasse crates only
/// - Default: INFO, debug for kasse crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kasse=debug,sqlx=warn"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/org.kasse.kasse/kasse.db`
/// - **Windows**: `%APPDATA%\kasse\kasse\data\kasse.db`
/// - **Linux**: `~/.local/share/kasse/kasse.db`
///
/// `KASSE_DB_PATH` overrides all of these.
fn database_path(config: &ConfigState) -> Result<PathBuf, AppError> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("org", "kasse", "kasse")
        .ok_or_else(|| AppError::config("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("kasse.db"))
}
