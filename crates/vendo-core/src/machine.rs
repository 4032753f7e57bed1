//! # Vending Machine
//!
//! One ledger plus one customer session behind the procedural API a driver
//! talks to. Built explicitly and passed around by the caller; there is no
//! process-wide machine.
//!
//! For several customers at once, keep one [`InventoryLedger`] under a lock
//! and give each customer their own [`Session`] instead (see the driver's
//! `MachineState`).

use crate::denomination::{Denomination, DenominationSet};
use crate::engine::{Purchase, Session};
use crate::error::{CoreError, CoreResult};
use crate::ledger::InventoryLedger;
use crate::money::Money;
use crate::types::{Change, InsertedCoins, Product, ProductId};

/// A single-customer vending machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendingMachine {
    ledger: InventoryLedger,
    session: Session,
}

impl VendingMachine {
    /// Creates an empty machine accepting `denominations`.
    pub fn new(denominations: DenominationSet) -> Self {
        VendingMachine {
            ledger: InventoryLedger::new(denominations),
            session: Session::new(),
        }
    }

    /// Creates an empty machine with the standard five-coin set.
    pub fn standard() -> Self {
        VendingMachine::new(DenominationSet::standard())
    }

    // -------------------------------------------------------------------------
    // Operator
    // -------------------------------------------------------------------------

    pub fn add_or_restock(&mut self, product: Product, quantity: u32) -> CoreResult<()> {
        self.ledger.add_or_restock(product, quantity)
    }

    pub fn restock(&mut self, id: ProductId, quantity: u32) -> CoreResult<()> {
        self.ledger.restock(id, quantity)
    }

    pub fn refill_coins(&mut self, denomination: Denomination, count: u32) -> CoreResult<()> {
        self.ledger.refill_coins(denomination, count)
    }

    // -------------------------------------------------------------------------
    // Customer
    // -------------------------------------------------------------------------

    /// Accepts a coin into the current session.
    ///
    /// ## Errors
    /// `CoreError::UnknownDenomination` if the machine does not take this
    /// coin; nothing is recorded.
    pub fn insert_coin(&mut self, coin: Denomination) -> CoreResult<()> {
        if !self.ledger.denominations().contains(&coin) {
            return Err(CoreError::UnknownDenomination(coin.code().to_string()));
        }
        self.session.insert_coin(coin);
        Ok(())
    }

    pub fn inserted_total(&self) -> Money {
        self.session.inserted_total()
    }

    pub fn inserted_coins(&self) -> &InsertedCoins {
        self.session.inserted_coins()
    }

    /// Buys one unit; see [`Session::purchase`].
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::{Denomination, Money, Product, ProductId, VendingMachine};
    ///
    /// let mut vm = VendingMachine::standard();
    /// let cola = Product::new(ProductId::new(2), "Cola", Money::from_cents(400)).unwrap();
    /// vm.add_or_restock(cola, 1).unwrap();
    /// vm.refill_coins(Denomination::FIVE, 2).unwrap();
    /// vm.refill_coins(Denomination::ONE, 1).unwrap();
    ///
    /// vm.insert_coin(Denomination::TEN).unwrap();
    /// let change = vm.purchase(ProductId::new(2)).unwrap();
    ///
    /// assert_eq!(change.total().cents(), 600);
    /// assert_eq!(vm.total_coin_value().cents(), 1500);
    /// ```
    pub fn purchase(&mut self, id: ProductId) -> CoreResult<Change> {
        self.session.purchase(&mut self.ledger, id)
    }

    /// Buys one unit and returns the full purchase record.
    pub fn checkout(&mut self, id: ProductId) -> CoreResult<Purchase> {
        self.session.checkout(&mut self.ledger, id)
    }

    /// Coin return: hands back everything inserted this session.
    pub fn return_coins(&mut self) -> Vec<Denomination> {
        self.session.return_coins()
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.ledger.lookup(id)
    }

    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.ledger.quantity_of(id)
    }

    pub fn total_coin_value(&self) -> Money {
        self.ledger.total_coin_value()
    }

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }
}
