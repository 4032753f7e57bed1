//! # Inventory Ledger
//!
//! Owns the two quantity tables of the machine and nothing else:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       InventoryLedger                                   │
//! │                                                                         │
//! │  catalog        ProductId ──► Product        (id, name, price)          │
//! │  product stock  ProductId ──► u32            (units left)               │
//! │  coin stock     Denomination ──► u32         (every coin always keyed)  │
//! │                                                                         │
//! │  No sessions, no purchases: those live in `engine`.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Missing Ids
//! The ledger is deliberately asymmetric about unknown product ids:
//!
//! | Operation      | Unknown id                          |
//! |----------------|-------------------------------------|
//! | `restock`      | `CoreError::NotFound`               |
//! | `lookup`       | `None`                              |
//! | `quantity_of`  | `0`                                 |
//! | `decrement`    | `CoreError::OutOfStock` (reads as 0)|

use std::collections::HashMap;

use crate::denomination::{Denomination, DenominationSet};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Coin Stock
// =============================================================================

/// Count of each denomination held by the machine.
///
/// ## Invariants
/// - Every denomination of the set has a slot, starting at zero
/// - Counts never go negative (`u32`, checked arithmetic)
///
/// Cloning is cheap (one slot per denomination), which is what the purchase
/// snapshot relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinStock {
    denominations: DenominationSet,
    counts: Vec<u32>,
}

impl CoinStock {
    /// Creates a stock with every denomination at zero.
    pub fn new(denominations: DenominationSet) -> Self {
        let counts = vec![0; denominations.len()];
        CoinStock {
            denominations,
            counts,
        }
    }

    pub fn denominations(&self) -> &DenominationSet {
        &self.denominations
    }

    fn slot(&self, denomination: &Denomination) -> CoreResult<usize> {
        self.denominations
            .position(denomination)
            .ok_or_else(|| CoreError::UnknownDenomination(denomination.code().to_string()))
    }

    /// Number of coins of `denomination` in the machine.
    ///
    /// Denominations outside the set read as zero.
    pub fn count_of(&self, denomination: &Denomination) -> u32 {
        self.denominations
            .position(denomination)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }

    /// Adds `count` coins of `denomination`.
    pub fn deposit(&mut self, denomination: &Denomination, count: u32) -> CoreResult<()> {
        let i = self.slot(denomination)?;
        self.counts[i] = self.counts[i]
            .checked_add(count)
            .ok_or_else(|| CoreError::StockOverflow {
                what: format!("coin {}", denomination.code()),
            })?;
        Ok(())
    }

    /// Removes up to `wanted` coins of `denomination`, returning how many were
    /// actually taken.
    pub fn withdraw_up_to(&mut self, denomination: &Denomination, wanted: u32) -> CoreResult<u32> {
        let i = self.slot(denomination)?;
        let taken = wanted.min(self.counts[i]);
        self.counts[i] -= taken;
        Ok(taken)
    }

    /// Σ(count × face value) over all denominations.
    pub fn total_value(&self) -> Money {
        self.iter()
            .map(|(denomination, count)| denomination.face_value().multiply_count(count))
            .sum()
    }

    /// Iterates `(denomination, count)` in declaration order, zero counts
    /// included.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.denominations.iter().copied().zip(self.counts.iter().copied())
    }
}

// =============================================================================
// Product Stock
// =============================================================================

/// Units left per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductStock {
    quantities: HashMap<ProductId, u32>,
}

impl ProductStock {
    /// Units left; unknown ids read as zero.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.quantities.get(&id).copied().unwrap_or(0)
    }

    fn add(&mut self, id: ProductId, quantity: u32) -> CoreResult<()> {
        let current = self.quantity_of(id);
        let updated = current
            .checked_add(quantity)
            .ok_or_else(|| CoreError::StockOverflow {
                what: format!("product {}", id),
            })?;
        self.quantities.insert(id, updated);
        Ok(())
    }

    fn decrement(&mut self, id: ProductId) -> CoreResult<()> {
        match self.quantities.get_mut(&id) {
            Some(quantity) if *quantity > 0 => {
                *quantity -= 1;
                Ok(())
            }
            _ => Err(CoreError::OutOfStock(id)),
        }
    }

    /// Iterates `(id, quantity)` sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = (ProductId, u32)> {
        let mut entries: Vec<_> = self.quantities.iter().map(|(id, q)| (*id, *q)).collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter()
    }
}

// =============================================================================
// Inventory Ledger
// =============================================================================

/// Catalog, product stock and coin stock of one machine.
///
/// ## Mutation
/// State changes only through the methods below and through
/// the crate-private `commit`, which applies a fully validated purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLedger {
    catalog: HashMap<ProductId, Product>,
    product_stock: ProductStock,
    coin_stock: CoinStock,
}

impl InventoryLedger {
    /// Creates an empty ledger for the given denomination set.
    pub fn new(denominations: DenominationSet) -> Self {
        InventoryLedger {
            catalog: HashMap::new(),
            product_stock: ProductStock::default(),
            coin_stock: CoinStock::new(denominations),
        }
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Registers `product` with `quantity` units, or adds `quantity` to an
    /// already registered id.
    ///
    /// Re-registering replaces the catalog entry (name, price) with the one
    /// given.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::{DenominationSet, InventoryLedger, Money, Product, ProductId};
    ///
    /// let mut ledger = InventoryLedger::new(DenominationSet::standard());
    /// let water = Product::new(ProductId::new(1), "Water", Money::from_cents(500)).unwrap();
    ///
    /// ledger.add_or_restock(water.clone(), 10).unwrap();
    /// ledger.add_or_restock(water, 5).unwrap();
    /// assert_eq!(ledger.quantity_of(ProductId::new(1)), 15);
    /// ```
    pub fn add_or_restock(&mut self, product: Product, quantity: u32) -> CoreResult<()> {
        let id = product.id();
        self.product_stock.add(id, quantity)?;
        self.catalog.insert(id, product);
        Ok(())
    }

    /// Adds `quantity` units to a registered product.
    ///
    /// ## Errors
    /// `CoreError::NotFound` if `id` was never registered.
    pub fn restock(&mut self, id: ProductId, quantity: u32) -> CoreResult<()> {
        if !self.catalog.contains_key(&id) {
            return Err(CoreError::NotFound(id));
        }
        self.product_stock.add(id, quantity)
    }

    /// The registered product, if any.
    pub fn lookup(&self, id: ProductId) -> Option<&Product> {
        self.catalog.get(&id)
    }

    /// Units left; `0` for ids that were never registered.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.product_stock.quantity_of(id)
    }

    /// Removes exactly one unit.
    ///
    /// ## Errors
    /// `CoreError::OutOfStock` when the quantity is zero, including ids that
    /// were never registered.
    pub fn decrement(&mut self, id: ProductId) -> CoreResult<()> {
        self.product_stock.decrement(id)
    }

    /// Units left per registered product.
    pub fn product_stock(&self) -> &ProductStock {
        &self.product_stock
    }

    // -------------------------------------------------------------------------
    // Coins
    // -------------------------------------------------------------------------

    /// Adds `count` coins of `denomination` to the machine.
    ///
    /// ## Errors
    /// `CoreError::UnknownDenomination` for coins outside the machine's set.
    pub fn refill_coins(&mut self, denomination: Denomination, count: u32) -> CoreResult<()> {
        self.coin_stock.deposit(&denomination, count)
    }

    /// Total value of all coins held, in minor units.
    pub fn total_coin_value(&self) -> Money {
        self.coin_stock.total_value()
    }

    pub fn coin_count(&self, denomination: &Denomination) -> u32 {
        self.coin_stock.count_of(denomination)
    }

    pub fn coin_stock(&self) -> &CoinStock {
        &self.coin_stock
    }

    pub fn denominations(&self) -> &DenominationSet {
        self.coin_stock.denominations()
    }

    // -------------------------------------------------------------------------
    // Purchase commit
    // -------------------------------------------------------------------------

    /// Applies a purchase planned by [`crate::engine::plan_purchase`].
    ///
    /// The product decrement runs first; if it fails nothing has been
    /// written. The coin stock is then replaced wholesale by the snapshot
    /// the plan was validated against.
    pub(crate) fn commit(&mut self, product_id: ProductId, coin_stock: CoinStock) -> CoreResult<()> {
        self.product_stock.decrement(product_id)?;
        self.coin_stock = coin_stock;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: u32, price_cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::from_cents(price_cents),
        )
        .unwrap()
    }

    fn ledger() -> InventoryLedger {
        InventoryLedger::new(DenominationSet::standard())
    }

    #[test]
    fn test_add_product_registers_it() {
        let mut ledger = ledger();
        let product = test_product(1, 1000);
        ledger.add_or_restock(product.clone(), 20).unwrap();

        assert_eq!(ledger.lookup(ProductId::new(1)), Some(&product));
        assert_eq!(ledger.quantity_of(ProductId::new(1)), 20);
    }

    #[test]
    fn test_product_stock_iterates_sorted_by_id() {
        let mut ledger = ledger();
        ledger.add_or_restock(test_product(3, 100), 1).unwrap();
        ledger.add_or_restock(test_product(1, 100), 4).unwrap();
        ledger.add_or_restock(test_product(2, 100), 0).unwrap();

        let stock: Vec<_> = ledger.product_stock().iter().collect();
        assert_eq!(
            stock,
            vec![
                (ProductId::new(1), 4),
                (ProductId::new(2), 0),
                (ProductId::new(3), 1),
            ]
        );
    }

    #[test]
    fn test_add_existing_product_adds_quantity_and_replaces_entry() {
        let mut ledger = ledger();
        ledger.add_or_restock(test_product(1, 1000), 20).unwrap();
        ledger.add_or_restock(test_product(1, 1200), 3).unwrap();

        assert_eq!(ledger.quantity_of(ProductId::new(1)), 23);
        assert_eq!(
            ledger.lookup(ProductId::new(1)).map(|p| p.price().cents()),
            Some(1200)
        );
    }

    #[test]
    fn test_lookup_missing_product_is_none() {
        assert!(ledger().lookup(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_restock_existing_product() {
        let mut ledger = ledger();
        ledger.add_or_restock(test_product(1, 1000), 20).unwrap();
        ledger.restock(ProductId::new(1), 5).unwrap();

        assert_eq!(ledger.quantity_of(ProductId::new(1)), 25);
    }

    #[test]
    fn test_restock_unknown_product_fails() {
        let mut ledger = ledger();
        let err = ledger.restock(ProductId::new(99), 5).unwrap_err();

        assert_eq!(err, CoreError::NotFound(ProductId::new(99)));
        assert_eq!(err.to_string(), "Product not found: 99");
        assert_eq!(ledger.quantity_of(ProductId::new(99)), 0);
    }

    #[test]
    fn test_quantity_of_unknown_is_zero() {
        assert_eq!(ledger().quantity_of(ProductId::new(42)), 0);
    }

    #[test]
    fn test_decrement_reduces_by_one() {
        let mut ledger = ledger();
        ledger.add_or_restock(test_product(1, 1000), 20).unwrap();
        ledger.decrement(ProductId::new(1)).unwrap();

        assert_eq!(ledger.quantity_of(ProductId::new(1)), 19);
    }

    #[test]
    fn test_decrement_out_of_stock() {
        let mut ledger = ledger();
        ledger.add_or_restock(test_product(1, 1000), 0).unwrap();

        let err = ledger.decrement(ProductId::new(1)).unwrap_err();
        assert_eq!(err, CoreError::OutOfStock(ProductId::new(1)));
        assert_eq!(ledger.quantity_of(ProductId::new(1)), 0);
    }

    #[test]
    fn test_decrement_unknown_reads_as_out_of_stock() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.decrement(ProductId::new(5)),
            Err(CoreError::OutOfStock(ProductId::new(5)))
        );
    }

    #[test]
    fn test_restock_overflow_is_rejected() {
        let mut ledger = ledger();
        ledger.add_or_restock(test_product(1, 100), u32::MAX).unwrap();

        let err = ledger.restock(ProductId::new(1), 1).unwrap_err();
        assert!(matches!(err, CoreError::StockOverflow { .. }));
        assert_eq!(ledger.quantity_of(ProductId::new(1)), u32::MAX);
    }

    #[test]
    fn test_coin_stock_starts_at_zero_for_every_denomination() {
        let ledger = ledger();
        let counts: Vec<_> = ledger.coin_stock().iter().map(|(_, c)| c).collect();

        assert_eq!(counts, vec![0, 0, 0, 0, 0]);
        assert!(ledger.total_coin_value().is_zero());
    }

    #[test]
    fn test_total_coin_value() {
        let mut ledger = ledger();
        ledger.refill_coins(Denomination::ONE, 2).unwrap();
        ledger.refill_coins(Denomination::TWO, 1).unwrap();
        ledger.refill_coins(Denomination::HALF, 4).unwrap();

        // 2 × 100 + 200 + 4 × 50
        assert_eq!(ledger.total_coin_value().cents(), 600);
    }

    #[test]
    fn test_refill_coins_accumulates() {
        let mut ledger = ledger();
        ledger.refill_coins(Denomination::TWO, 5).unwrap();
        ledger.refill_coins(Denomination::TWO, 1).unwrap();

        assert_eq!(ledger.coin_count(&Denomination::TWO), 6);
        assert_eq!(ledger.total_coin_value().cents(), 1200);
    }

    #[test]
    fn test_refill_unknown_denomination_fails() {
        let mut ledger = InventoryLedger::new(
            DenominationSet::new(vec![Denomination::ONE, Denomination::FIVE]).unwrap(),
        );
        let err = ledger.refill_coins(Denomination::HALF, 3).unwrap_err();

        assert_eq!(err, CoreError::UnknownDenomination("HALF".to_string()));
        assert!(ledger.total_coin_value().is_zero());
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let mut ledger = ledger();
        ledger.add_or_restock(test_product(1, 500), 3).unwrap();
        ledger.refill_coins(Denomination::FIVE, 2).unwrap();
        let before = ledger.clone();

        for _ in 0..10 {
            let _ = ledger.quantity_of(ProductId::new(1));
            let _ = ledger.quantity_of(ProductId::new(2));
            let _ = ledger.total_coin_value();
        }

        assert_eq!(ledger, before);
    }

    #[test]
    fn test_withdraw_up_to_caps_at_available() {
        let mut stock = CoinStock::new(DenominationSet::standard());
        stock.deposit(&Denomination::ONE, 2).unwrap();

        assert_eq!(stock.withdraw_up_to(&Denomination::ONE, 5).unwrap(), 2);
        assert_eq!(stock.count_of(&Denomination::ONE), 0);
    }
}
