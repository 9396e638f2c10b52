// SecureBank Core Library
// In-memory personal-account ledger: balances, transaction rules, interest,
// recurring deposits, and an append-only audit trail. Exposed for use by
// the console demo and tests.

pub mod account;
pub mod audit;
pub mod error;
pub mod money;
pub mod registry;
pub mod schedule;

// Re-export commonly used types
pub use account::{Account, AccountConfig, Credential};
pub use audit::{AuditEntry, AuditLog, OperationKind, Outcome};
pub use error::Rejection;
pub use money::{is_valid_amount, round2, Dollars, MAX_TRANSACTION_AMOUNT};
pub use registry::AccountRegistry;
pub use schedule::{interest_due, months_elapsed, RecurringDeposit, DAYS_PER_MONTH};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
