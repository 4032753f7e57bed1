//! # Vendo Driver Library
//!
//! Drives a `vendo-core` machine: configuration, logging, shared state and
//! the commands customers and operators issue.
//!
//! ## Module Organization
//! ```text
//! vendo_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── machine.rs  ◄─── Shared ledger + per-customer sessions
//! │   └── config.rs   ◄─── Configuration from VENDO_* variables
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── customer.rs ◄─── Coins and purchases
//! │   └── operator.rs ◄─── Stocking and audit
//! ├── demo.rs         ◄─── Demonstration run
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod demo;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{MachineConfig, MachineState, OutputFormat};

/// Runs the demonstration machine.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Driver Startup                                    │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • VENDO_* environment variables over defaults                       │
/// │     • Invalid value: exit non-zero                                      │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • RUST_LOG wins, else VENDO_LOG, else info,vendo=debug              │
/// │                                                                         │
/// │  3. Initialize State ─────────────────────────────────────────────────► │
/// │     • MachineState with the standard five coins                         │
/// │                                                                         │
/// │  4. Run Demo & Print ─────────────────────────────────────────────────► │
/// │     • text or JSON on stdout                                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = MachineConfig::from_env()?;

    init_tracing(&config);

    info!(machine = %config.machine_name, output = ?config.output, "Starting Vendo");

    let state = MachineState::default();
    let outcome = demo::run(&state, &config)?;

    match config.output {
        OutputFormat::Text => print!("{}", demo::render_text(&outcome, &config)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    info!("Demo finished");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vendo_cli=trace` - Show trace for the driver only
/// - Default: `MachineConfig::log_filter`
fn init_tracing(config: &MachineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
