//! # Transaction Engine
//!
//! Customer session state plus the purchase algorithm.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      purchase(product_id)                               │
//! │                                                                         │
//! │  PLAN (reads only, works on a snapshot)                                 │
//! │  ───────────────────────────────────────                                │
//! │  1. lookup product ─────────────── missing? ──► InvalidProduct          │
//! │  2. quantity_of(product) ───────── zero?    ──► OutOfStock              │
//! │  3. inserted total vs price ────── short?   ──► InsufficientFunds       │
//! │  4. snapshot = coin stock + inserted coins                              │
//! │  5. greedy change on snapshot ──── remainder? ► ExactChangeUnavailable  │
//! │                                                                         │
//! │  COMMIT (only after every check passed)                                 │
//! │  ───────────────────────────────────────                                │
//! │  6. product stock - 1, coin stock = snapshot, inserted coins cleared    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any error leaves the ledger and the session exactly as they were: the
//! snapshot is simply dropped.
//!
//! ## Determinism
//! The greedy loop walks denominations in descending face value, ties in
//! declaration order. Same ledger + same inserted coins = same outcome.

use serde::Serialize;

use crate::denomination::Denomination;
use crate::error::{CoreError, CoreResult};
use crate::ledger::{CoinStock, InventoryLedger};
use crate::money::Money;
use crate::types::{Change, InsertedCoins, Product, ProductId};

// =============================================================================
// Change Calculation
// =============================================================================

/// Pays out `amount` from `stock`, largest denomination first.
///
/// Coins are removed from `stock` as they are selected, so callers pass a
/// snapshot when the result may still be rejected.
///
/// ## Errors
/// `CoreError::ExactChangeUnavailable` when the coins run out before the
/// amount reaches zero. `stock` is left partially drawn in that case.
///
/// ## Example
/// ```rust
/// use vendo_core::engine::make_change;
/// use vendo_core::{CoinStock, Denomination, DenominationSet, Money};
///
/// let mut stock = CoinStock::new(DenominationSet::standard());
/// stock.deposit(&Denomination::FIVE, 2).unwrap();
/// stock.deposit(&Denomination::ONE, 1).unwrap();
///
/// let change = make_change(&mut stock, Money::from_cents(600)).unwrap();
/// assert_eq!(change.as_slice(), &[Denomination::FIVE, Denomination::ONE]);
/// assert_eq!(stock.count_of(&Denomination::FIVE), 1);
/// ```
pub fn make_change(stock: &mut CoinStock, amount: Money) -> CoreResult<Change> {
    let order = stock.denominations().descending();
    let mut remaining = amount;
    let mut coins: Vec<Denomination> = Vec::new();

    for denomination in order {
        if !remaining.is_positive() {
            break;
        }

        let face = denomination.face_value();
        let wanted = u32::try_from(remaining.cents() / face.cents()).unwrap_or(u32::MAX);
        if wanted == 0 {
            continue;
        }

        let taken = stock.withdraw_up_to(&denomination, wanted)?;
        remaining -= face.multiply_count(taken);
        coins.extend(std::iter::repeat(denomination).take(taken as usize));
    }

    if !remaining.is_zero() {
        return Err(CoreError::ExactChangeUnavailable { amount, remaining });
    }

    Ok(Change::from_coins(coins))
}

// =============================================================================
// Purchase Plan
// =============================================================================

/// A purchase that passed every check, not yet applied.
///
/// Holds the coin stock as it will look after payment absorption and change
/// removal.
#[derive(Debug, Clone)]
pub struct PurchasePlan {
    product: Product,
    paid: Money,
    change: Change,
    coin_stock_after: CoinStock,
}

impl PurchasePlan {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn paid(&self) -> Money {
        self.paid
    }

    pub fn change(&self) -> &Change {
        &self.change
    }

    /// Applies the plan to `ledger`.
    ///
    /// The ledger must be the one the plan was computed against, with no
    /// mutation in between.
    fn apply(self, ledger: &mut InventoryLedger) -> CoreResult<Purchase> {
        ledger.commit(self.product.id(), self.coin_stock_after)?;

        Ok(Purchase {
            product_id: self.product.id(),
            product_name: self.product.name().to_string(),
            price: self.product.price(),
            paid: self.paid,
            change: self.change,
        })
    }
}

/// Runs steps 1–5 of the purchase against `ledger` without mutating it.
pub fn plan_purchase(
    ledger: &InventoryLedger,
    inserted: &InsertedCoins,
    product_id: ProductId,
) -> CoreResult<PurchasePlan> {
    let product = ledger
        .lookup(product_id)
        .ok_or(CoreError::InvalidProduct(product_id))?;

    if ledger.quantity_of(product_id) == 0 {
        return Err(CoreError::OutOfStock(product_id));
    }

    let paid = inserted.total();
    let change_due = paid
        .checked_sub(product.price())
        .ok_or(CoreError::InsufficientFunds {
            price: product.price(),
            inserted: paid,
        })?;

    let mut snapshot = ledger.coin_stock().clone();
    for coin in inserted.iter() {
        snapshot.deposit(coin, 1)?;
    }

    let change = make_change(&mut snapshot, change_due)?;

    Ok(PurchasePlan {
        product: product.clone(),
        paid,
        change,
        coin_stock_after: snapshot,
    })
}

// =============================================================================
// Purchase Outcome
// =============================================================================

/// A completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Money,
    pub paid: Money,
    pub change: Change,
}

// =============================================================================
// Session
// =============================================================================

/// One customer's tendered coins.
///
/// ## Lifecycle
/// ```text
/// insert_coin ──► insert_coin ──► purchase ──┬── Ok  ──► empty session
///                     ▲                      │
///                     └──── top up ◄─────────┴── Err ──► coins kept
///
/// return_coins ──► empty session, coins handed back, ledger untouched
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    inserted: InsertedCoins,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Records a tendered coin. Always legal before a purchase resolves.
    pub fn insert_coin(&mut self, coin: Denomination) {
        self.inserted.push(coin);
    }

    /// Sum of face values inserted this session.
    pub fn inserted_total(&self) -> Money {
        self.inserted.total()
    }

    pub fn inserted_coins(&self) -> &InsertedCoins {
        &self.inserted
    }

    /// Hands back every tendered coin and empties the session.
    pub fn return_coins(&mut self) -> Vec<Denomination> {
        self.inserted.take()
    }

    /// Buys one unit of `product_id` with the coins inserted so far.
    ///
    /// ## Returns
    /// The change, in descending dispensing order.
    ///
    /// ## Errors
    /// `InvalidProduct`, `OutOfStock`, `InsufficientFunds` or
    /// `ExactChangeUnavailable`; none of them mutate the ledger or the
    /// session.
    pub fn purchase(
        &mut self,
        ledger: &mut InventoryLedger,
        product_id: ProductId,
    ) -> CoreResult<Change> {
        self.checkout(ledger, product_id).map(|purchase| purchase.change)
    }

    /// Same as [`Session::purchase`], returning the full [`Purchase`] record.
    pub fn checkout(
        &mut self,
        ledger: &mut InventoryLedger,
        product_id: ProductId,
    ) -> CoreResult<Purchase> {
        let plan = plan_purchase(ledger, &self.inserted, product_id)?;
        let purchase = plan.apply(ledger)?;
        self.inserted.clear();
        Ok(purchase)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
