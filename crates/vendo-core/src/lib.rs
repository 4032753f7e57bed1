//! # vendo-core: Purchase Transaction Engine for Vendo
//!
//! This crate is the **heart** of Vendo. It contains the whole coin-operated
//! purchase logic as pure, deterministic code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Vendo Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vendo-cli (driver)                           │   │
//! │  │   config ──► tracing ──► MachineState ──► commands              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vendo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐  ┌─────────────┐  ┌──────────────────────┐   │   │
//! │  │   │   ledger    │  │   engine    │  │ denomination / money │   │   │
//! │  │   │ ProductStock│◄─│  Session    │  │  Denomination        │   │   │
//! │  │   │ CoinStock   │  │  purchase   │  │  Money (cents)       │   │   │
//! │  │   └─────────────┘  └─────────────┘  └──────────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`denomination`] - Coin types and the fixed set a machine accepts
//! - [`types`] - Product, inserted coins, change
//! - [`ledger`] - Inventory Ledger: product stock and coin stock
//! - [`engine`] - Transaction Engine: sessions and the purchase algorithm
//! - [`machine`] - Single-customer façade over ledger + session
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **All-or-nothing purchases**: change is computed on a snapshot and
//!    committed only when exact
//! 2. **Integer Money**: All monetary values are in cents (i64)
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vendo_core::{Denomination, Money, Product, ProductId, VendingMachine};
//!
//! let mut vm = VendingMachine::standard();
//! let water = Product::new(ProductId::new(1), "Water", Money::from_cents(500)).unwrap();
//! vm.add_or_restock(water, 10).unwrap();
//! vm.refill_coins(Denomination::HALF, 20).unwrap();
//!
//! vm.insert_coin(Denomination::FIVE).unwrap();
//! vm.insert_coin(Denomination::HALF).unwrap();
//!
//! let change = vm.purchase(ProductId::new(1)).unwrap();
//! assert_eq!(change.as_slice(), &[Denomination::HALF]);
//! assert_eq!(vm.quantity_of(ProductId::new(1)), 9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod denomination;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod machine;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vendo_core::Money` instead of
// `use vendo_core::money::Money`

pub use denomination::{Denomination, DenominationSet};
pub use engine::{Purchase, Session};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{CoinStock, InventoryLedger, ProductStock};
pub use machine::VendingMachine;
pub use money::Money;
pub use types::*;
