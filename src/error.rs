// 🚫 Rejections - Typed, non-fatal refusals
// Every rule the engine can say "no" with, in priority order

use serde::Serialize;
use thiserror::Error;

/// Why an operation was refused.
///
/// Rejections are ordinary return values, never panics: the account stays
/// fully usable after any of them, and every rejected attempt still lands
/// in the audit log with its reason.
///
/// When several conditions hold at once the engine reports exactly one,
/// checked in fixed priority: frozen, then invalid amount, then daily
/// limit, then overdraft floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum Rejection {
    /// Amount is zero, negative, or above the transaction ceiling.
    #[error("invalid amount")]
    InvalidAmount,

    /// Account is frozen; no money moves until unfreeze.
    #[error("account is frozen")]
    Frozen,

    /// Cumulative withdrawals today would exceed the daily limit.
    #[error("daily withdrawal limit exceeded")]
    DailyLimitExceeded,

    /// Balance would drop below the overdraft floor.
    #[error("overdraft floor exceeded")]
    OverdraftExceeded,

    /// Transfer source and destination are the same account.
    #[error("cannot transfer to the same account")]
    SameAccount,

    /// Supplied credential does not match the stored one.
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl Rejection {
    /// Short reason code used in audit-entry notes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::InvalidAmount => "Invalid",
            Rejection::Frozen => "Frozen",
            Rejection::DailyLimitExceeded => "Daily limit",
            Rejection::OverdraftExceeded => "Overdraft",
            Rejection::SameAccount => "Same account",
            Rejection::AuthenticationFailed => "Bad credential",
        }
    }
}
