//! # State Module
//!
//! Manages driver state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────┐   ┌──────────────────────────┐   │
//! │  │          MachineState            │   │      MachineConfig       │   │
//! │  │                                  │   │                          │   │
//! │  │  ledger    Arc<Mutex<Ledger>>    │   │  machine_name            │   │
//! │  │  sessions  Arc<Mutex<HashMap<    │   │  currency_symbol         │   │
//! │  │              SessionId,          │   │  output (text / json)    │   │
//! │  │              Session>>>          │   │  log_filter              │   │
//! │  └──────────────────────────────────┘   └──────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • MachineState: Protected by Arc<Mutex<T>>, ledger locked first       │
//! │  • MachineConfig: Read-only after initialization                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod machine;

pub use config::{ConfigError, MachineConfig, OutputFormat};
pub use machine::{MachineState, SessionId};
