//! # Machine State
//!
//! Shared machine state for several customers at once.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    MachineState                                         │
//! │                                                                         │
//! │  ledger    Arc<Mutex<InventoryLedger>>   ONE lock, held for the whole   │
//! │                                          purchase (plan + commit)       │
//! │                                                                         │
//! │  sessions  Arc<Mutex<HashMap<SessionId, Session>>>                      │
//! │            every customer has their own inserted coins                  │
//! │                                                                         │
//! │  Lock order: ledger, then sessions. Never the other way round.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two purchases can therefore never read the same coin stock snapshot.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vendo_core::{
    Denomination, DenominationSet, InventoryLedger, ProductId, Purchase, Session,
};

use crate::error::ApiError;

/// Identifier of one customer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Shared ledger plus per-customer sessions.
///
/// Cloning shares the same machine (the inner `Arc`s), which is how worker
/// threads get a handle.
#[derive(Debug, Clone)]
pub struct MachineState {
    denominations: DenominationSet,
    ledger: Arc<Mutex<InventoryLedger>>,
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl MachineState {
    /// Creates an empty machine accepting `denominations`.
    pub fn new(denominations: DenominationSet) -> Self {
        MachineState {
            ledger: Arc::new(Mutex::new(InventoryLedger::new(denominations.clone()))),
            denominations,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The fixed set of coins this machine takes.
    pub fn denominations(&self) -> &DenominationSet {
        &self.denominations
    }

    fn lock_ledger(&self) -> Result<MutexGuard<'_, InventoryLedger>, ApiError> {
        self.ledger
            .lock()
            .map_err(|_| ApiError::internal("Ledger mutex poisoned"))
    }

    fn lock_sessions(&self) -> Result<MutexGuard<'_, HashMap<SessionId, Session>>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::internal("Session mutex poisoned"))
    }

    /// Executes a function with read access to the ledger.
    pub fn with_ledger<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&InventoryLedger) -> R,
    {
        let ledger = self.lock_ledger()?;
        Ok(f(&ledger))
    }

    /// Executes a function with write access to the ledger.
    pub fn with_ledger_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut InventoryLedger) -> R,
    {
        let mut ledger = self.lock_ledger()?;
        Ok(f(&mut ledger))
    }

    // -------------------------------------------------------------------------
    // Sessions
    // -------------------------------------------------------------------------

    /// Starts an empty session for a new customer.
    pub fn open_session(&self) -> Result<SessionId, ApiError> {
        let id = SessionId::new();
        self.lock_sessions()?.insert(id, Session::new());
        Ok(id)
    }

    /// Executes a function with write access to one session.
    pub fn with_session_mut<F, R>(&self, id: SessionId, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut sessions = self.lock_sessions()?;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::session_not_found(id))?;
        Ok(f(session))
    }

    /// Removes a session, returning the coins still inserted in it.
    pub fn close_session(&self, id: SessionId) -> Result<Vec<Denomination>, ApiError> {
        let mut session = self
            .lock_sessions()?
            .remove(&id)
            .ok_or_else(|| ApiError::session_not_found(id))?;
        Ok(session.return_coins())
    }

    pub fn session_count(&self) -> Result<usize, ApiError> {
        Ok(self.lock_sessions()?.len())
    }

    /// Runs the whole purchase for `session` under the ledger lock.
    pub fn purchase(&self, session: SessionId, product_id: ProductId) -> Result<Purchase, ApiError> {
        let mut ledger = self.lock_ledger()?;
        let mut sessions = self.lock_sessions()?;
        let session_state = sessions
            .get_mut(&session)
            .ok_or_else(|| ApiError::session_not_found(session))?;

        Ok(session_state.checkout(&mut ledger, product_id)?)
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new(DenominationSet::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use vendo_core::{Money, Product};

    fn stocked_state(quantity: u32) -> MachineState {
        let state = MachineState::default();
        state
            .with_ledger_mut(|ledger| {
                let cola = Product::new(ProductId::new(1), "Cola", Money::from_cents(150)).unwrap();
                ledger.add_or_restock(cola, quantity).unwrap();
                ledger.refill_coins(Denomination::HALF, 100).unwrap();
            })
            .unwrap();
        state
    }

    #[test]
    fn test_sessions_are_independent() {
        let state = stocked_state(5);
        let alice = state.open_session().unwrap();
        let bob = state.open_session().unwrap();

        state
            .with_session_mut(alice, |s| s.insert_coin(Denomination::TWO))
            .unwrap();

        let bob_total = state.with_session_mut(bob, |s| s.inserted_total()).unwrap();
        assert!(bob_total.is_zero());

        let err = state.purchase(bob, ProductId::new(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientFunds);

        let purchase = state.purchase(alice, ProductId::new(1)).unwrap();
        assert_eq!(purchase.change.total().cents(), 50);
    }

    #[test]
    fn test_unknown_session() {
        let state = MachineState::default();
        let ghost = SessionId::new();

        let err = state.purchase(ghost, ProductId::new(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
        assert_eq!(state.close_session(ghost).unwrap_err().code, ErrorCode::SessionNotFound);
    }

    #[test]
    fn test_close_session_returns_coins() {
        let state = MachineState::default();
        let id = state.open_session().unwrap();
        state
            .with_session_mut(id, |s| s.insert_coin(Denomination::FIVE))
            .unwrap();

        assert_eq!(state.close_session(id).unwrap(), vec![Denomination::FIVE]);
        assert_eq!(state.session_count().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_purchases_never_oversell() {
        let state = stocked_state(10);
        let value_before = state.with_ledger(|l| l.total_coin_value()).unwrap();

        let outcomes: Vec<Result<Purchase, ApiError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    let state = state.clone();
                    scope.spawn(move || {
                        let id = state.open_session()?;
                        state.with_session_mut(id, |s| s.insert_coin(Denomination::TWO))?;
                        state.purchase(id, ProductId::new(1))
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("worker panicked"))
                .collect()
        });

        let sold: Vec<_> = outcomes.iter().filter_map(|o| o.as_ref().ok()).collect();
        assert_eq!(sold.len(), 10);
        assert!(outcomes
            .iter()
            .filter_map(|o| o.as_ref().err())
            .all(|e| e.code == ErrorCode::OutOfStock));

        let value_after = state.with_ledger(|l| l.total_coin_value()).unwrap();
        let change_out: Money = sold.iter().map(|p| p.change.total()).sum();
        assert_eq!(
            value_after,
            value_before + Money::from_cents(200 * 10) - change_out
        );
        assert_eq!(
            state.with_ledger(|l| l.quantity_of(ProductId::new(1))).unwrap(),
            0
        );
    }
}
