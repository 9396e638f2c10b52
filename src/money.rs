// 💵 Money Helpers - Two-decimal currency arithmetic
// Every amount that enters or leaves an account passes through here

use std::fmt;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Largest amount a single transaction may carry ($1 billion).
///
/// Guards against unrealistic inputs and against feeding values into the
/// balance that would degrade f64 cent precision.
pub const MAX_TRANSACTION_AMOUNT: f64 = 1e9;

// ============================================================================
// VALIDATION
// ============================================================================

/// Check whether an amount is acceptable for any money-moving operation.
///
/// Valid means strictly positive and at most [`MAX_TRANSACTION_AMOUNT`].
/// Used identically by deposit, withdraw, both transfer legs, and
/// recurring-deposit registration.
pub fn is_valid_amount(amount: f64) -> bool {
    amount > 0.0 && amount <= MAX_TRANSACTION_AMOUNT
}

// ============================================================================
// ROUNDING
// ============================================================================

/// Round to two decimal places, half away from zero.
///
/// All committed balance mutations are rounded through this so that the
/// ledger only ever holds whole-cent values.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Dollar amount with a fixed two-decimal rendering, e.g. `$1234.50`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dollars(pub f64);

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
