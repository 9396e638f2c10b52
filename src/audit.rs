// 🧾 Audit Log - Append-only record of every attempted operation
// Successes and failures alike; one entry per attempt, oldest first

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

// ============================================================================
// OPERATION KIND
// ============================================================================

/// What kind of operation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperationKind {
    Open,
    Deposit,
    Withdraw,
    /// Penalty charged when a withdrawal pushes the balance below zero.
    OverdraftFee,
    TransferOut,
    TransferIn,
    Freeze,
    Unfreeze,
    /// Monthly interest credited by the scheduler.
    Interest,
    /// A recurring deposit coming due.
    AutoDeposit,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Open => "OPEN",
            OperationKind::Deposit => "DEPOSIT",
            OperationKind::Withdraw => "WITHDRAW",
            OperationKind::OverdraftFee => "OVERDRAFT FEE",
            OperationKind::TransferOut => "TRANSFER OUT",
            OperationKind::TransferIn => "TRANSFER IN",
            OperationKind::Freeze => "FREEZE",
            OperationKind::Unfreeze => "UNFREEZE",
            OperationKind::Interest => "INTEREST",
            OperationKind::AutoDeposit => "AUTO-DEPOSIT",
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Whether the attempted operation committed or was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

// ============================================================================
// AUDIT ENTRY
// ============================================================================

/// One line of account history. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    /// When the attempt happened.
    pub at: DateTime<Local>,

    /// Operation kind.
    pub kind: OperationKind,

    /// Amount the caller asked to move (0.0 for freeze/unfreeze).
    pub amount: f64,

    /// Committed or rejected.
    pub outcome: Outcome,

    /// Balance snapshot taken right after the attempt.
    pub balance_after: f64,

    /// Rejection reason, counterparty account number, month count, etc.
    pub note: Option<String>,
}

impl AuditEntry {
    pub fn new(
        at: DateTime<Local>,
        kind: OperationKind,
        amount: f64,
        outcome: Outcome,
        balance_after: f64,
    ) -> Self {
        AuditEntry {
            at,
            kind,
            amount,
            outcome,
            balance_after,
            note: None,
        }
    }

    /// Attach a free-text note (builder style).
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl fmt::Display for AuditEntry {
    /// Fixed-width ledger line, e.g.
    /// `2026-08-29 14:03:12 | WITHDRAW     | $    600.00 | SUCCESS | Bal: $    400.00`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:<13} | ${:>10.2} | {:<7} | Bal: ${:>10.2}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.kind.as_str(),
            self.amount,
            if self.outcome.is_success() {
                "SUCCESS"
            } else {
                "FAILED"
            },
            self.balance_after,
        )?;
        if let Some(note) = &self.note {
            write!(f, " | {}", note)?;
        }
        Ok(())
    }
}

// ============================================================================
// AUDIT LOG
// ============================================================================

/// Append-only, oldest-first history of one account.
///
/// Entries only ever accumulate; there is no removal or rewrite path.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        AuditLog {
            entries: Vec::new(),
        }
    }

    /// Append one entry.
    pub fn push(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// The most recent `n` entries, still oldest first.
    /// `n >= len` returns the whole log.
    pub fn recent(&self, n: usize) -> &[AuditEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&AuditEntry> {
        self.entries.last()
    }
}

// ============================================================================
// TESTS
// ============================================================================
