//! # Demonstration Run
//!
//! Stocks a standard machine and walks one customer through a rejected and
//! then a successful purchase.
//!
//! ```text
//! stock Water + Wafers, refill coins
//!        │
//!        ▼
//! insert ONE, TWO, HALF ($3.50) ──► buy Water ($5.00) ──► INSUFFICIENT_FUNDS
//!        │
//!        ▼
//! insert FIVE ($8.50) ──► buy Water ──► change [TWO, ONE, HALF]
//!        │
//!        ▼
//! audit
//! ```

use std::fmt::Write as _;

use serde::Serialize;
use tracing::info;
use vendo_core::{Money, ProductId};

use crate::commands::customer::{self, PurchaseReceipt};
use crate::commands::operator::{self, AuditReport};
use crate::error::{ApiError, ErrorCode};
use crate::state::{MachineConfig, MachineState};

const WATER: ProductId = ProductId::new(1);
const WAFERS: ProductId = ProductId::new(2);

/// Everything the demonstration observed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoOutcome {
    pub machine_name: String,
    /// Why the first attempt was turned down
    pub rejected: ApiError,
    pub receipt: PurchaseReceipt,
    pub audit: AuditReport,
}

/// Runs the demonstration against `state`, which should be empty.
pub fn run(state: &MachineState, config: &MachineConfig) -> Result<DemoOutcome, ApiError> {
    info!(machine = %config.machine_name, "Stocking machine");

    operator::register_product(state, WATER, "Water", 500, 10)?;
    operator::register_product(state, WAFERS, "Wafers", 200, 15)?;
    for (code, count) in [("TEN", 2), ("FIVE", 4), ("TWO", 5), ("ONE", 10), ("HALF", 20)] {
        operator::refill_coins(state, code, count)?;
    }

    let session = customer::open_session(state)?;
    for code in ["ONE", "TWO", "HALF"] {
        customer::insert_coin(state, session, code)?;
    }

    let rejected = expect_insufficient_funds(customer::purchase(state, session, WATER))?;

    customer::insert_coin(state, session, "FIVE")?;
    let receipt = customer::purchase(state, session, WATER)?;
    customer::close_session(state, session)?;

    Ok(DemoOutcome {
        machine_name: config.machine_name.clone(),
        rejected,
        receipt,
        audit: operator::audit(state)?,
    })
}

/// Unwraps the rejection the first, underpaid attempt must produce.
///
/// Any other error, or a sale, is a failure of the run itself.
fn expect_insufficient_funds(attempt: Result<PurchaseReceipt, ApiError>) -> Result<ApiError, ApiError> {
    match attempt {
        Err(err) if err.code == ErrorCode::InsufficientFunds => Ok(err),
        Err(err) => Err(err),
        Ok(receipt) => Err(ApiError::internal(format!(
            "Underpaid purchase of {} was accepted",
            receipt.product_name
        ))),
    }
}

/// Formats an outcome as human-readable lines.
pub fn render_text(outcome: &DemoOutcome, config: &MachineConfig) -> String {
    let money = |cents: i64| config.format_currency(Money::from_cents(cents));
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "== {} ==", outcome.machine_name);
    let _ = writeln!(out, "Rejected: {}", outcome.rejected.message);

    let receipt = &outcome.receipt;
    let _ = writeln!(
        out,
        "Purchased {} for {} (paid {})",
        receipt.product_name,
        money(receipt.price_cents),
        money(receipt.paid_cents)
    );
    let _ = writeln!(
        out,
        "Change returned: [{}] = {}",
        receipt.change.join(", "),
        money(receipt.change_cents)
    );

    let _ = writeln!(out, "-- audit --");
    for coin in &outcome.audit.coins {
        let _ = writeln!(out, "  {:<5} x{}", coin.code, coin.count);
    }
    let _ = writeln!(
        out,
        "  coins total {}",
        money(outcome.audit.total_coin_value_cents)
    );
    for product in &outcome.audit.products {
        let _ = writeln!(
            out,
            "  #{} {} ({}) x{}",
            product.product_id,
            product.name,
            money(product.price_cents),
            product.quantity
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_outcome() {
        let state = MachineState::default();
        let config = MachineConfig::default();

        let outcome = run(&state, &config).unwrap();

        assert_eq!(outcome.rejected.code, ErrorCode::InsufficientFunds);
        assert_eq!(outcome.receipt.paid_cents, 850);
        assert_eq!(outcome.receipt.change, vec!["TWO", "ONE", "HALF"]);
        assert_eq!(outcome.receipt.change_cents, 350);

        // 7000 stocked + 850 paid - 350 change
        assert_eq!(outcome.audit.total_coin_value_cents, 7500);
        let water = &outcome.audit.products[0];
        assert_eq!(water.quantity, 9);
        assert_eq!(state.session_count().unwrap(), 0);
    }

    #[test]
    fn test_only_insufficient_funds_is_an_expected_rejection() {
        let underpaid = ApiError::new(ErrorCode::InsufficientFunds, "Insufficient funds");
        assert_eq!(
            expect_insufficient_funds(Err(underpaid.clone())),
            Ok(underpaid)
        );

        let poisoned = ApiError::internal("Ledger mutex poisoned");
        assert_eq!(
            expect_insufficient_funds(Err(poisoned.clone())),
            Err(poisoned)
        );
    }

    #[test]
    fn test_accepted_underpaid_attempt_is_an_error() {
        let receipt = PurchaseReceipt {
            session_id: crate::state::SessionId::new(),
            product_id: WATER,
            product_name: "Water".to_string(),
            price_cents: 500,
            paid_cents: 350,
            change: vec![],
            change_cents: 0,
            completed_at: chrono::Utc::now(),
        };

        let err = expect_insufficient_funds(Ok(receipt)).unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_render_text() {
        let state = MachineState::default();
        let config = MachineConfig::default();
        let outcome = run(&state, &config).unwrap();

        let text = render_text(&outcome, &config);
        assert!(text.contains("Rejected: Insufficient funds: price $5.00, inserted $3.50"));
        assert!(text.contains("Change returned: [TWO, ONE, HALF] = $3.50"));
        assert!(text.contains("coins total $75.00"));
    }
}
