// ⏰ Passive Flows - Interest clock and recurring deposits
// Time is always an explicit input here; nothing reads the wall clock

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::money::round2;

// ============================================================================
// INTEREST MATH
// ============================================================================

/// Fixed 30-day month approximation used by the interest clock.
pub const DAYS_PER_MONTH: i64 = 30;

/// Whole 30-day months elapsed between two instants. Never negative.
pub fn months_elapsed(since: DateTime<Local>, now: DateTime<Local>) -> i64 {
    let days = (now - since).num_days();
    if days <= 0 {
        0
    } else {
        days / DAYS_PER_MONTH
    }
}

/// Simple monthly interest on a positive balance, rounded to cents.
///
/// `interest = balance * (annual_rate / 12) * months`, half-up to two
/// decimals. Returns 0.0 for non-positive balances or zero months.
pub fn interest_due(balance: f64, annual_rate: f64, months: i64) -> f64 {
    if balance <= 0.0 || months < 1 {
        return 0.0;
    }
    round2(balance * (annual_rate / 12.0) * months as f64)
}

// ============================================================================
// RECURRING DEPOSITS
// ============================================================================

/// A standing order: credit `amount` every `interval_days`.
///
/// `next_due_at` always advances by whole intervals from its previous
/// value, so the cadence survives late processing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringDeposit {
    pub amount: f64,
    pub interval_days: i64,
    pub next_due_at: DateTime<Local>,
}

impl RecurringDeposit {
    /// Schedule a new recurring deposit; first credit lands one full
    /// interval after `now`.
    pub fn new(amount: f64, interval_days: i64, now: DateTime<Local>) -> Self {
        RecurringDeposit {
            amount,
            interval_days,
            next_due_at: now + Duration::days(interval_days),
        }
    }

    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        self.next_due_at <= now
    }

    /// Shift the due time forward by exactly one interval.
    pub fn advance(&mut self) {
        self.next_due_at = self.next_due_at + Duration::days(self.interval_days);
    }
}

// ============================================================================
// TESTS
// ============================================================================
