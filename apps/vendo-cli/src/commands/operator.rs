//! # Operator Commands
//!
//! Stocking and auditing, done with the machine's front open.
//!
//! None of these touch customer sessions.

use serde::Serialize;
use tracing::{debug, info};
use vendo_core::{CoreError, Money, Product, ProductId};

use crate::error::ApiError;
use crate::state::MachineState;

/// One catalog entry with its stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub product_id: ProductId,
    pub name: String,
    pub price_cents: i64,
    pub quantity: u32,
}

/// Coins of one denomination held by the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinLine {
    pub code: String,
    pub face_value_cents: i64,
    pub count: u32,
}

/// Snapshot of everything the machine holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub total_coin_value_cents: i64,
    pub coins: Vec<CoinLine>,
    pub products: Vec<ProductLine>,
}

/// Adds a product to the catalog with an initial quantity.
///
/// Registering an id again replaces its name and price and adds to its
/// quantity.
pub fn register_product(
    state: &MachineState,
    product_id: ProductId,
    name: &str,
    price_cents: i64,
    quantity: u32,
) -> Result<ProductLine, ApiError> {
    debug!(%product_id, name, price_cents, quantity, "register_product command");

    let product =
        Product::new(product_id, name, Money::from_cents(price_cents)).map_err(CoreError::from)?;

    let line = state.with_ledger_mut(|ledger| {
        ledger.add_or_restock(product, quantity)?;
        Ok::<_, CoreError>(product_line(ledger, product_id, ledger.quantity_of(product_id)))
    })??;

    info!(%product_id, name = %line.name, quantity = line.quantity, "Product registered");
    Ok(line)
}

/// Adds units to an already registered product.
///
/// ## Errors
/// `NOT_FOUND` if the product was never registered.
pub fn restock_product(
    state: &MachineState,
    product_id: ProductId,
    quantity: u32,
) -> Result<ProductLine, ApiError> {
    debug!(%product_id, quantity, "restock_product command");

    let line = state.with_ledger_mut(|ledger| {
        ledger.restock(product_id, quantity)?;
        Ok::<_, CoreError>(product_line(ledger, product_id, ledger.quantity_of(product_id)))
    })??;

    info!(%product_id, quantity = line.quantity, "Product restocked");
    Ok(line)
}

/// Loads coins into the change reserve.
pub fn refill_coins(state: &MachineState, code: &str, count: u32) -> Result<CoinLine, ApiError> {
    debug!(code, count, "refill_coins command");

    let coin = state
        .denominations()
        .by_code(code)
        .ok_or_else(|| CoreError::UnknownDenomination(code.to_string()))?;

    let held = state.with_ledger_mut(|ledger| {
        ledger.refill_coins(coin, count)?;
        Ok::<_, CoreError>(ledger.coin_count(&coin))
    })??;

    info!(coin = %coin, added = count, held, "Coins refilled");
    Ok(CoinLine {
        code: coin.code().to_string(),
        face_value_cents: coin.face_value().cents(),
        count: held,
    })
}

/// Reports coin counts and product quantities.
pub fn audit(state: &MachineState) -> Result<AuditReport, ApiError> {
    debug!("audit command");

    state.with_ledger(|ledger| AuditReport {
        total_coin_value_cents: ledger.total_coin_value().cents(),
        coins: ledger
            .coin_stock()
            .iter()
            .map(|(coin, count)| CoinLine {
                code: coin.code().to_string(),
                face_value_cents: coin.face_value().cents(),
                count,
            })
            .collect(),
        products: ledger
            .product_stock()
            .iter()
            .map(|(product_id, quantity)| product_line(ledger, product_id, quantity))
            .collect(),
    })
}

fn product_line(
    ledger: &vendo_core::InventoryLedger,
    product_id: ProductId,
    quantity: u32,
) -> ProductLine {
    let (name, price_cents) = ledger
        .lookup(product_id)
        .map(|p| (p.name().to_string(), p.price().cents()))
        .unwrap_or_default();

    ProductLine {
        product_id,
        name,
        price_cents,
        quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_register_and_restock() {
        let state = MachineState::default();

        let line = register_product(&state, ProductId::new(1), "Cola", 150, 20).unwrap();
        assert_eq!(line.quantity, 20);

        let line = restock_product(&state, ProductId::new(1), 5).unwrap();
        assert_eq!(line.quantity, 25);
        assert_eq!(line.name, "Cola");
    }

    #[test]
    fn test_restock_unknown_product() {
        let state = MachineState::default();
        let err = restock_product(&state, ProductId::new(9), 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_register_rejects_invalid_product() {
        let state = MachineState::default();

        let err = register_product(&state, ProductId::new(1), "   ", 150, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register_product(&state, ProductId::new(1), "Cola", -1, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_refill_coins() {
        let state = MachineState::default();

        refill_coins(&state, "ONE", 3).unwrap();
        let line = refill_coins(&state, "one", 2).unwrap();
        assert_eq!(line.count, 5);

        let err = refill_coins(&state, "PENNY", 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownDenomination);
    }

    #[test]
    fn test_audit() {
        let state = MachineState::default();
        register_product(&state, ProductId::new(2), "Wafers", 200, 15).unwrap();
        register_product(&state, ProductId::new(1), "Water", 500, 10).unwrap();
        refill_coins(&state, "TEN", 2).unwrap();
        refill_coins(&state, "HALF", 20).unwrap();

        let report = audit(&state).unwrap();
        assert_eq!(report.total_coin_value_cents, 3000);
        assert_eq!(report.coins.len(), 5);
        assert_eq!(report.coins[0].code, "HALF");
        assert_eq!(report.coins[0].count, 20);

        let ids: Vec<u32> = report.products.iter().map(|p| p.product_id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(report.products[1].name, "Wafers");
        assert_eq!(report.products[1].price_cents, 200);
        assert_eq!(report.products[1].quantity, 15);
    }
}
