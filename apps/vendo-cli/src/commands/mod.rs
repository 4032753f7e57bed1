//! # Commands Module
//!
//! Everything a customer or an operator can ask of the machine.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── customer.rs  ◄─── Sessions, coins, purchases
//! └── operator.rs  ◄─── Stocking, coin refills, audit
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  customer::purchase(&state, session_id, product_id)                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  MachineState ──► vendo_core::Session::checkout ──► CoreResult          │
//! │         │                                                               │
//! │         │ (CoreError ──► ApiError)                                      │
//! │         ▼                                                               │
//! │  Result<PurchaseReceipt, ApiError>   (both serialize to JSON)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command takes the shared `&MachineState` and logs its entry at
//! `debug`.

pub mod customer;
pub mod operator;
