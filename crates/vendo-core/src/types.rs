//! # Domain Types
//!
//! Core domain types used throughout Vendo.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  InsertedCoins  │   │     Change      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  Vec<Denom.>    │   │  Vec<Denom.>    │       │
//! │  │  name           │   │  tender order   │   │  descending     │       │
//! │  │  price (Money)  │   │  one session    │   │  one purchase   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::denomination::Denomination;
use crate::money::Money;
use crate::validation::{validate_price_cents, validate_product_name, ValidationResult};

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product (the slot number on the machine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product the machine sells.
///
/// Immutable once built; the ledger keeps it in its catalog and hands out
/// references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
}

impl Product {
    /// Creates a product after validating its name and price.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::{Money, Product, ProductId};
    ///
    /// let water = Product::new(ProductId::new(1), "Water", Money::from_cents(500)).unwrap();
    /// assert_eq!(water.price().cents(), 500);
    ///
    /// assert!(Product::new(ProductId::new(2), "", Money::from_cents(100)).is_err());
    /// assert!(Product::new(ProductId::new(3), "Gum", Money::from_cents(-1)).is_err());
    /// ```
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> ValidationResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price_cents(price.cents())?;

        Ok(Product {
            id,
            name: name.trim().to_string(),
            price,
        })
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }
}

// =============================================================================
// Inserted Coins
// =============================================================================

/// Coins tendered by the current customer, in insertion order.
///
/// Scoped to one session: a successful purchase drains it, a failed one
/// leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InsertedCoins(Vec<Denomination>);

impl InsertedCoins {
    pub fn new() -> Self {
        InsertedCoins(Vec::new())
    }

    pub fn push(&mut self, coin: Denomination) {
        self.0.push(coin);
    }

    /// Sum of face values tendered so far.
    pub fn total(&self) -> Money {
        self.0.iter().map(Denomination::face_value).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Denomination> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Denomination] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Drains the coins, leaving the sequence empty.
    pub fn take(&mut self) -> Vec<Denomination> {
        std::mem::take(&mut self.0)
    }
}

// =============================================================================
// Change
// =============================================================================

/// Coins handed back for one purchase, in descending dispensing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Change(Vec<Denomination>);

impl Change {
    pub(crate) fn from_coins(coins: Vec<Denomination>) -> Self {
        Change(coins)
    }

    /// Sum of face values handed back.
    pub fn total(&self) -> Money {
        self.0.iter().map(Denomination::face_value).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Denomination> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Denomination] {
        &self.0
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.0.iter().map(|d| d.code()).collect();
        write!(f, "[{}]", codes.join(", "))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
