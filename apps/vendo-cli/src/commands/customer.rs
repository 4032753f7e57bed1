//! # Customer Commands
//!
//! Commands a customer drives at the coin slot.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Open    │────►│  Coins   │────►│ Purchase │────►│  Empty   │       │
//! │  │ Session  │     │ Inserted │     │          │     │ Session  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                     ▲    │              │                              │
//! │              insert_coin │         rejected: coins kept               │
//! │                     └────┘◄─────────────┘                              │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                   return_coins / close_session ──────► coins back      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use vendo_core::{CoreError, Denomination, Money, ProductId};

use crate::error::ApiError;
use crate::state::{MachineState, SessionId};

/// Coins currently tendered in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBalance {
    pub session_id: SessionId,
    pub coins: Vec<String>,
    pub total_cents: i64,
}

/// Record of a completed purchase, handed to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub product_name: String,
    pub price_cents: i64,
    pub paid_cents: i64,
    /// Change coin codes in dispensing order
    pub change: Vec<String>,
    pub change_cents: i64,
    pub completed_at: DateTime<Utc>,
}

fn coin_codes<'a>(coins: impl IntoIterator<Item = &'a Denomination>) -> Vec<String> {
    coins.into_iter().map(|c| c.code().to_string()).collect()
}

/// Opens a new, empty customer session.
pub fn open_session(state: &MachineState) -> Result<SessionId, ApiError> {
    let session_id = state.open_session()?;
    debug!(%session_id, "open_session command");
    Ok(session_id)
}

/// Inserts one coin, identified by its code (`"HALF"`, `"five"`, ...).
///
/// ## Errors
/// `UNKNOWN_DENOMINATION` if the machine does not take the coin; the coin is
/// not recorded.
pub fn insert_coin(
    state: &MachineState,
    session_id: SessionId,
    code: &str,
) -> Result<SessionBalance, ApiError> {
    debug!(%session_id, code, "insert_coin command");

    let coin = state
        .denominations()
        .by_code(code)
        .ok_or_else(|| CoreError::UnknownDenomination(code.to_string()))?;

    state.with_session_mut(session_id, |session| {
        session.insert_coin(coin);
        SessionBalance {
            session_id,
            coins: coin_codes(session.inserted_coins().iter()),
            total_cents: session.inserted_total().cents(),
        }
    })
}

/// Shows what the customer has inserted so far.
pub fn session_balance(state: &MachineState, session_id: SessionId) -> Result<SessionBalance, ApiError> {
    debug!(%session_id, "session_balance command");

    state.with_session_mut(session_id, |session| SessionBalance {
        session_id,
        coins: coin_codes(session.inserted_coins().iter()),
        total_cents: session.inserted_total().cents(),
    })
}

/// Buys one unit of a product with the session's coins.
///
/// ## Flow
/// ```text
/// purchase(session, 1)
///        │
///        ▼
/// ┌──────────────────────────────────────────────────────────────┐
/// │  lock ledger ──► lock sessions ──► plan on snapshot          │
/// │                                          │                   │
/// │                         ┌────────────────┴──────────┐        │
/// │                         ▼                           ▼        │
/// │                  exact change              any rejection     │
/// │                  commit + clear            nothing changes   │
/// └──────────────────────────────────────────────────────────────┘
/// ```
pub fn purchase(
    state: &MachineState,
    session_id: SessionId,
    product_id: ProductId,
) -> Result<PurchaseReceipt, ApiError> {
    debug!(%session_id, %product_id, "purchase command");

    let purchase = state.purchase(session_id, product_id).map_err(|err| {
        warn!(%session_id, %product_id, code = ?err.code, "Purchase rejected: {}", err.message);
        err
    })?;

    info!(
        %session_id,
        %product_id,
        price = %purchase.price,
        change = %purchase.change,
        "Purchase completed"
    );

    Ok(PurchaseReceipt {
        session_id,
        product_id: purchase.product_id,
        product_name: purchase.product_name,
        price_cents: purchase.price.cents(),
        paid_cents: purchase.paid.cents(),
        change: coin_codes(purchase.change.iter()),
        change_cents: purchase.change.total().cents(),
        completed_at: Utc::now(),
    })
}

/// Hands every inserted coin back; the session stays open.
pub fn return_coins(state: &MachineState, session_id: SessionId) -> Result<Vec<String>, ApiError> {
    debug!(%session_id, "return_coins command");

    let coins = state.with_session_mut(session_id, |session| session.return_coins())?;
    Ok(coin_codes(coins.iter()))
}

/// Ends the session, returning whatever coins were still inserted.
pub fn close_session(state: &MachineState, session_id: SessionId) -> Result<Vec<String>, ApiError> {
    debug!(%session_id, "close_session command");

    let coins = state.close_session(session_id)?;
    if !coins.is_empty() {
        let total: Money = coins.iter().map(|c| c.face_value()).sum();
        info!(%session_id, returned = %total, "Session closed with coins returned");
    }
    Ok(coin_codes(coins.iter()))
}
