// 💳 Account - The one mutable entity: state, rules, and audit trail
// Deposit/withdraw/transfer/freeze decisions live here; every attempt,
// accepted or refused, appends exactly one history entry (a successful
// transfer appends one per side).
//
// Time is an explicit input: every time-sensitive operation takes `now`,
// so hosts pass `Local::now()` and tests drive a simulated clock.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLog, OperationKind, Outcome};
use crate::error::Rejection;
use crate::money::{is_valid_amount, round2};
use crate::schedule::{interest_due, months_elapsed, RecurringDeposit};

// ============================================================================
// CREDENTIAL
// ============================================================================

/// Opaque holder secret, compared by plain equality.
///
/// This is NOT production-grade authentication: no hashing, no constant-time
/// comparison. The type exists so the secret never leaks through `Debug`,
/// `Display`, or serialization.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Credential(secret.into())
    }

    fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

// ============================================================================
// ACCOUNT CONFIG
// ============================================================================

/// Per-account limits and rates, fixed at open time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountConfig {
    /// Cumulative withdrawal cap per calendar day.
    pub daily_withdrawal_limit: f64,

    /// Most negative balance a withdrawal or transfer may reach (<= 0).
    pub overdraft_floor: f64,

    /// One-time penalty charged when a withdrawal crosses below zero.
    pub overdraft_fee: f64,

    /// Simple annual interest rate on positive balances (0.03 = 3%).
    pub annual_interest_rate: f64,
}

impl Default for AccountConfig {
    fn default() -> Self {
        AccountConfig {
            daily_withdrawal_limit: 5000.0,
            overdraft_floor: 0.0,
            overdraft_fee: 35.0,
            annual_interest_rate: 0.03,
        }
    }
}

// ============================================================================
// ACCOUNT
// ============================================================================

/// A single holder's account.
///
/// # Invariants
///
/// - `balance >= config.overdraft_floor` after every committed operation
/// - `withdrawn_today` resets exactly once per calendar-day boundary
/// - `account_number` and `holder_name` never change after open
/// - `history` only grows
///
/// Accounts are exclusively owned (normally by an
/// [`AccountRegistry`](crate::registry::AccountRegistry)) and never cloned:
/// a copy would duplicate a supposedly unique account number and credential.
#[derive(Debug, Serialize)]
pub struct Account {
    balance: f64,
    holder_name: String,
    account_number: String,
    #[serde(skip)]
    credential: Credential,
    frozen: bool,
    withdrawn_today: f64,
    last_limit_reset_at: DateTime<Local>,
    last_activity_at: DateTime<Local>,
    config: AccountConfig,
    recurring: Vec<RecurringDeposit>,
    history: AuditLog,
}

impl Account {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Open a new account.
    ///
    /// A negative opening balance is corrected to $0.00 with a warning; it
    /// is not an error. The opening balance lands in the history as an
    /// `OPEN` entry.
    pub fn open(
        holder_name: impl Into<String>,
        credential: Credential,
        opening_balance: f64,
        account_number: String,
        config: AccountConfig,
        now: DateTime<Local>,
    ) -> Self {
        let holder_name = holder_name.into();
        let clamped = opening_balance < 0.0;
        let balance = if clamped {
            warn!(
                holder = %holder_name,
                account = %account_number,
                opening_balance,
                "negative opening balance corrected to $0.00"
            );
            0.0
        } else {
            round2(opening_balance)
        };

        let mut account = Account {
            balance,
            holder_name,
            account_number,
            credential,
            frozen: false,
            withdrawn_today: 0.0,
            last_limit_reset_at: now,
            last_activity_at: now,
            config,
            recurring: Vec::new(),
            history: AuditLog::new(),
        };

        let note = clamped.then(|| "Negative opening balance corrected".to_string());
        account.record(now, OperationKind::Open, balance, Outcome::Success, note);
        account
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn withdrawn_today(&self) -> f64 {
        self.withdrawn_today
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    pub fn recurring_deposits(&self) -> &[RecurringDeposit] {
        &self.recurring
    }

    /// Account history, oldest first. `limit` keeps only the most recent
    /// entries; `None` returns everything.
    pub fn history(&self, limit: Option<usize>) -> &[AuditEntry] {
        match limit {
            Some(n) => self.history.recent(n),
            None => self.history.entries(),
        }
    }

    // ========================================================================
    // DEPOSIT / WITHDRAW
    // ========================================================================

    /// Credit `amount`. Refused while frozen or for invalid amounts, in
    /// that order.
    pub fn deposit(&mut self, amount: f64, now: DateTime<Local>) -> Result<(), Rejection> {
        if self.frozen {
            return Err(self.reject(now, OperationKind::Deposit, amount, Rejection::Frozen));
        }
        if !is_valid_amount(amount) {
            return Err(self.reject(now, OperationKind::Deposit, amount, Rejection::InvalidAmount));
        }

        self.balance = round2(self.balance + amount);
        self.record(now, OperationKind::Deposit, amount, Outcome::Success, None);
        self.last_activity_at = now;
        debug!(account = %self.account_number, amount, balance = self.balance, "deposit committed");
        Ok(())
    }

    /// Debit `amount`, subject to the freeze flag, amount validity, the
    /// daily limit, and the overdraft floor — checked in that order.
    ///
    /// A withdrawal that drags the balance from non-negative to negative
    /// additionally charges the overdraft fee, logged as its own entry.
    pub fn withdraw(&mut self, amount: f64, now: DateTime<Local>) -> Result<(), Rejection> {
        self.reset_daily_limit_if_needed(now);

        if let Err(rejection) = self.check_withdraw(amount) {
            return Err(self.reject(now, OperationKind::Withdraw, amount, rejection));
        }

        let before = self.balance;
        self.balance = round2(self.balance - amount);
        self.withdrawn_today = round2(self.withdrawn_today + amount);

        if before >= 0.0 && self.balance < 0.0 {
            // Unconditional penalty on the crossing; deliberately not
            // re-checked against the overdraft floor.
            self.balance = round2(self.balance - self.config.overdraft_fee);
            let fee = self.config.overdraft_fee;
            self.record(
                now,
                OperationKind::OverdraftFee,
                fee,
                Outcome::Success,
                Some("Balance crossed below zero".to_string()),
            );
        }

        self.record(now, OperationKind::Withdraw, amount, Outcome::Success, None);
        self.last_activity_at = now;
        debug!(account = %self.account_number, amount, balance = self.balance, "withdrawal committed");
        Ok(())
    }

    /// The rule checks a withdrawal of `amount` must pass, in rejection
    /// priority order. Assumes the daily reset has already run; mutates
    /// nothing and logs nothing.
    fn check_withdraw(&self, amount: f64) -> Result<(), Rejection> {
        if self.frozen {
            return Err(Rejection::Frozen);
        }
        if !is_valid_amount(amount) {
            return Err(Rejection::InvalidAmount);
        }
        if self.withdrawn_today + amount > self.config.daily_withdrawal_limit {
            return Err(Rejection::DailyLimitExceeded);
        }
        if self.balance - amount < self.config.overdraft_floor {
            return Err(Rejection::OverdraftExceeded);
        }
        Ok(())
    }

    // ========================================================================
    // TRANSFER
    // ========================================================================

    /// Move `amount` to `other`, atomically.
    ///
    /// Both sides are precondition-checked before anything mutates: the
    /// source must pass every withdrawal rule and the destination must not
    /// be frozen. Either all three mutations commit (source debit, daily
    /// counter, destination credit) or none do.
    ///
    /// On refusal exactly one failure entry lands on the source account;
    /// the destination is untouched. Transfers never charge the overdraft
    /// fee, though the floor still binds.
    pub fn transfer_to(
        &mut self,
        other: &mut Account,
        amount: f64,
        now: DateTime<Local>,
    ) -> Result<(), Rejection> {
        if self.account_number == other.account_number {
            return Err(self.reject_same_account_transfer(amount, now));
        }

        self.reset_daily_limit_if_needed(now);

        let decision = self.check_withdraw(amount).and_then(|()| {
            if other.frozen {
                Err(Rejection::Frozen)
            } else {
                Ok(())
            }
        });
        if let Err(rejection) = decision {
            return Err(self.reject(now, OperationKind::TransferOut, amount, rejection));
        }

        self.balance = round2(self.balance - amount);
        self.withdrawn_today = round2(self.withdrawn_today + amount);
        other.balance = round2(other.balance + amount);

        let out_note = format!("To {}", other.account_number);
        let in_note = format!("From {}", self.account_number);
        self.record(
            now,
            OperationKind::TransferOut,
            amount,
            Outcome::Success,
            Some(out_note),
        );
        other.record(
            now,
            OperationKind::TransferIn,
            amount,
            Outcome::Success,
            Some(in_note),
        );
        self.last_activity_at = now;
        other.last_activity_at = now;
        debug!(
            from = %self.account_number,
            to = %other.account_number,
            amount,
            "transfer committed"
        );
        Ok(())
    }

    /// Refuse a self-transfer and audit it. Split out because the registry
    /// hits this case before it can borrow two accounts.
    pub fn reject_same_account_transfer(
        &mut self,
        amount: f64,
        now: DateTime<Local>,
    ) -> Rejection {
        self.reject(now, OperationKind::TransferOut, amount, Rejection::SameAccount)
    }

    // ========================================================================
    // FREEZE / AUTHENTICATE
    // ========================================================================

    /// Freeze the account. Unconditional: already-frozen accounts stay
    /// frozen, but the attempt is still logged.
    pub fn freeze(&mut self, now: DateTime<Local>) {
        self.frozen = true;
        self.record(now, OperationKind::Freeze, 0.0, Outcome::Success, None);
    }

    /// Unfreeze the account. Unconditional, always logged.
    pub fn unfreeze(&mut self, now: DateTime<Local>) {
        self.frozen = false;
        self.record(now, OperationKind::Unfreeze, 0.0, Outcome::Success, None);
    }

    /// Compare a candidate credential against the stored one.
    ///
    /// Mutates nothing and writes nothing to the history, pass or fail.
    pub fn authenticate(&self, candidate: &str) -> bool {
        self.credential.matches(candidate)
    }

    // ========================================================================
    // TIME-DRIVEN FLOWS
    // ========================================================================

    /// Run all passive flows up to `now`: interest first (so it accrues on
    /// the balance that sat through the elapsed months), then any due
    /// recurring deposits. Idempotent for a fixed `now`.
    pub fn tick(&mut self, now: DateTime<Local>) {
        self.apply_interest(now);
        self.process_due_recurring(now);
    }

    /// Credit simple monthly interest for whole 30-day months elapsed
    /// since the last activity. Returns the amount credited (0.0 when
    /// nothing was due). No interest accrues on non-positive balances.
    pub fn apply_interest(&mut self, now: DateTime<Local>) -> f64 {
        let months = months_elapsed(self.last_activity_at, now);
        let interest = interest_due(self.balance, self.config.annual_interest_rate, months);
        if interest <= 0.0 {
            return 0.0;
        }

        self.balance = round2(self.balance + interest);
        let note = format!("{} month(s)", months);
        self.record(
            now,
            OperationKind::Interest,
            interest,
            Outcome::Success,
            Some(note),
        );
        self.last_activity_at = now;
        interest
    }

    /// Schedule a recurring deposit of `amount` every `interval_days`,
    /// first due one full interval from `now`.
    pub fn add_recurring(
        &mut self,
        amount: f64,
        interval_days: i64,
        now: DateTime<Local>,
    ) -> Result<(), Rejection> {
        if !is_valid_amount(amount) || interval_days < 1 {
            return Err(self.reject(
                now,
                OperationKind::AutoDeposit,
                amount,
                Rejection::InvalidAmount,
            ));
        }

        self.recurring
            .push(RecurringDeposit::new(amount, interval_days, now));
        let note = format!("Scheduled every {} day(s)", interval_days);
        self.record(
            now,
            OperationKind::AutoDeposit,
            amount,
            Outcome::Success,
            Some(note),
        );
        Ok(())
    }

    /// Credit every elapsed cycle of every recurring deposit, one
    /// `AUTO-DEPOSIT` entry per credit. Each credit advances its schedule
    /// by exactly one interval from the previous due time, so cadence is
    /// preserved no matter how late this runs. Returns the total credited.
    pub fn process_due_recurring(&mut self, now: DateTime<Local>) -> f64 {
        let mut credited = 0.0;
        for i in 0..self.recurring.len() {
            while self.recurring[i].is_due(now) {
                let amount = self.recurring[i].amount;
                self.recurring[i].advance();

                self.balance = round2(self.balance + amount);
                credited += amount;
                self.record(
                    now,
                    OperationKind::AutoDeposit,
                    amount,
                    Outcome::Success,
                    Some("Recurring deposit due".to_string()),
                );
            }
        }
        if credited > 0.0 {
            self.last_activity_at = now;
        }
        round2(credited)
    }

    /// Lazy daily-limit reset: runs at the head of every withdrawal
    /// attempt. Crossing a local calendar-day boundary zeroes
    /// `withdrawn_today`; repeated calls within one day are no-ops.
    fn reset_daily_limit_if_needed(&mut self, now: DateTime<Local>) {
        if now.date_naive() > self.last_limit_reset_at.date_naive() {
            self.withdrawn_today = 0.0;
            self.last_limit_reset_at = now;
        }
    }

    // ========================================================================
    // AUDIT PLUMBING
    // ========================================================================

    /// Append one history entry with a snapshot of the current balance.
    fn record(
        &mut self,
        at: DateTime<Local>,
        kind: OperationKind,
        amount: f64,
        outcome: Outcome,
        note: Option<String>,
    ) {
        let mut entry = AuditEntry::new(at, kind, amount, outcome, self.balance);
        if let Some(note) = note {
            entry = entry.with_note(note);
        }
        self.history.push(entry);
    }

    /// Audit a refused attempt and hand the rejection back to the caller.
    fn reject(
        &mut self,
        at: DateTime<Local>,
        kind: OperationKind,
        amount: f64,
        rejection: Rejection,
    ) -> Rejection {
        self.record(
            at,
            kind,
            amount,
            Outcome::Failure,
            Some(rejection.as_str().to_string()),
        );
        rejection
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, d, 12, 0, 0).unwrap()
    }

    fn config_with_floor() -> AccountConfig {
        AccountConfig {
            daily_withdrawal_limit: 5000.0,
            overdraft_floor: -50.0,
            overdraft_fee: 35.0,
            annual_interest_rate: 0.03,
        }
    }

    fn open(balance: f64, config: AccountConfig) -> Account {
        Account::open(
            "Alice Johnson",
            Credential::new("1234"),
            balance,
            "ACC1001".to_string(),
            config,
            day(1),
        )
    }

    // ------------------------------------------------------------------ open

    #[test]
    fn test_open_records_opening_entry() {
        let account = open(1000.0, AccountConfig::default());
        assert_eq!(account.balance(), 1000.0);
        assert_eq!(account.history(None).len(), 1);
        let entry = &account.history(None)[0];
        assert_eq!(entry.kind, OperationKind::Open);
        assert_eq!(entry.balance_after, 1000.0);
        assert!(entry.note.is_none());
    }

    #[test]
    fn test_open_clamps_negative_balance() {
        let account = open(-250.0, AccountConfig::default());
        assert_eq!(account.balance(), 0.0);
        let entry = &account.history(None)[0];
        assert_eq!(entry.outcome, Outcome::Success);
        assert!(entry.note.as_deref().unwrap().contains("corrected"));
    }

    // --------------------------------------------------------------- deposit

    #[test]
    fn test_deposit_commits_and_logs() {
        let mut account = open(100.0, AccountConfig::default());
        account.deposit(25.5, day(1)).unwrap();
        assert_eq!(account.balance(), 125.5);
        let last = account.history(None).last().unwrap();
        assert_eq!(last.kind, OperationKind::Deposit);
        assert_eq!(last.outcome, Outcome::Success);
    }

    #[test]
    fn test_deposit_rejects_invalid_amounts_unchanged_balance() {
        let mut account = open(100.0, AccountConfig::default());
        for bad in [0.0, -5.0, crate::money::MAX_TRANSACTION_AMOUNT + 1.0] {
            assert_eq!(account.deposit(bad, day(1)), Err(Rejection::InvalidAmount));
            assert_eq!(account.balance(), 100.0);
        }
        // OPEN + three failures
        assert_eq!(account.history(None).len(), 4);
    }

    #[test]
    fn test_frozen_beats_invalid_amount() {
        let mut account = open(100.0, AccountConfig::default());
        account.freeze(day(1));
        // Both conditions hold; the higher-priority reason wins.
        assert_eq!(account.deposit(-1.0, day(1)), Err(Rejection::Frozen));
        assert_eq!(account.withdraw(-1.0, day(1)), Err(Rejection::Frozen));
    }

    // -------------------------------------------------------------- withdraw

    #[test]
    fn test_withdraw_commits_and_counts_toward_daily_limit() {
        let mut account = open(1000.0, AccountConfig::default());
        account.withdraw(300.0, day(1)).unwrap();
        assert_eq!(account.balance(), 700.0);
        assert_eq!(account.withdrawn_today(), 300.0);
    }

    #[test]
    fn test_daily_limit_boundary() {
        let mut account = open(20_000.0, AccountConfig::default());
        account.withdraw(3000.0, day(1)).unwrap();
        account.withdraw(2000.0, day(1)).unwrap(); // exactly at the limit
        assert_eq!(
            account.withdraw(0.01, day(1)),
            Err(Rejection::DailyLimitExceeded)
        );
        assert_eq!(account.balance(), 15_000.0);
    }

    #[test]
    fn test_daily_limit_resets_at_midnight() {
        let mut account = open(20_000.0, AccountConfig::default());
        account.withdraw(5000.0, day(1)).unwrap();
        assert_eq!(
            account.withdraw(5000.0, day(1)),
            Err(Rejection::DailyLimitExceeded)
        );

        // Next calendar day: full limit available again
        account.withdraw(5000.0, day(2)).unwrap();
        assert_eq!(account.balance(), 10_000.0);
        assert_eq!(account.withdrawn_today(), 5000.0);
    }

    #[test]
    fn test_reset_is_idempotent_within_a_day() {
        let mut account = open(20_000.0, AccountConfig::default());
        account.withdraw(4000.0, day(1)).unwrap();
        // A later withdrawal the same day must not re-zero the counter.
        assert_eq!(
            account.withdraw(1500.0, day(1) + Duration::hours(5)),
            Err(Rejection::DailyLimitExceeded)
        );
    }

    #[test]
    fn test_overdraft_floor_rejection_scenario() {
        // Spec scenario: 1000 opening, limit 5000, floor -50, fee 35.
        let mut account = open(1000.0, config_with_floor());
        account.withdraw(600.0, day(1)).unwrap();
        assert_eq!(account.balance(), 400.0);
        assert_eq!(
            account.withdraw(600.0, day(1)),
            Err(Rejection::OverdraftExceeded)
        );
        assert_eq!(account.balance(), 400.0);
    }

    #[test]
    fn test_overdraft_fee_charged_once_on_crossing() {
        let mut config = config_with_floor();
        config.overdraft_floor = -500.0;
        let mut account = open(100.0, config);

        account.withdraw(200.0, day(1)).unwrap();
        // 100 - 200 = -100, crossing fee 35 on top
        assert_eq!(account.balance(), -135.0);
        let kinds: Vec<_> = account
            .history(None)
            .iter()
            .map(|e| e.kind)
            .collect();
        assert!(kinds.contains(&OperationKind::OverdraftFee));

        // Already negative: no second fee
        account.withdraw(50.0, day(1)).unwrap();
        assert_eq!(account.balance(), -185.0);
        let fee_count = account
            .history(None)
            .iter()
            .filter(|e| e.kind == OperationKind::OverdraftFee)
            .count();
        assert_eq!(fee_count, 1);
    }

    #[test]
    fn test_withdrawal_staying_non_negative_never_pays_fee() {
        let mut account = open(1000.0, config_with_floor());
        account.withdraw(1000.0, day(1)).unwrap();
        assert_eq!(account.balance(), 0.0);
        assert!(account
            .history(None)
            .iter()
            .all(|e| e.kind != OperationKind::OverdraftFee));
    }

    #[test]
    fn test_rejection_priority_daily_limit_before_overdraft() {
        // 6000 > both the daily limit and the floor headroom; the limit
        // is checked first.
        let mut account = open(100.0, config_with_floor());
        assert_eq!(
            account.withdraw(6000.0, day(1)),
            Err(Rejection::DailyLimitExceeded)
        );
    }

    #[test]
    fn test_every_rejected_attempt_is_audited() {
        let mut account = open(100.0, AccountConfig::default());
        let before = account.history(None).len();
        let _ = account.withdraw(-1.0, day(1));
        let _ = account.withdraw(9999.0, day(1));
        assert_eq!(account.history(None).len(), before + 2);
        let last = account.history(None).last().unwrap();
        assert_eq!(last.outcome, Outcome::Failure);
        assert!(last.note.is_some());
    }

    // -------------------------------------------------------------- transfer

    fn open_pair() -> (Account, Account) {
        let a = Account::open(
            "Alice Johnson",
            Credential::new("1234"),
            1000.0,
            "ACC1001".to_string(),
            AccountConfig::default(),
            day(1),
        );
        let b = Account::open(
            "Bob Smith",
            Credential::new("5678"),
            300.0,
            "ACC1002".to_string(),
            AccountConfig::default(),
            day(1),
        );
        (a, b)
    }

    #[test]
    fn test_transfer_moves_exact_amount_both_sides() {
        let (mut a, mut b) = open_pair();
        a.transfer_to(&mut b, 400.0, day(1)).unwrap();
        assert_eq!(a.balance(), 600.0);
        assert_eq!(b.balance(), 700.0);
        assert_eq!(a.withdrawn_today(), 400.0);

        let out = a.history(None).last().unwrap();
        assert_eq!(out.kind, OperationKind::TransferOut);
        assert_eq!(out.note.as_deref(), Some("To ACC1002"));
        let inn = b.history(None).last().unwrap();
        assert_eq!(inn.kind, OperationKind::TransferIn);
        assert_eq!(inn.note.as_deref(), Some("From ACC1001"));
    }

    #[test]
    fn test_transfer_to_frozen_destination_is_atomic() {
        let (mut a, mut b) = open_pair();
        b.freeze(day(1));
        let b_history_before = b.history(None).len();

        assert_eq!(a.transfer_to(&mut b, 400.0, day(1)), Err(Rejection::Frozen));

        // No partial effect on either side
        assert_eq!(a.balance(), 1000.0);
        assert_eq!(b.balance(), 300.0);
        assert_eq!(a.withdrawn_today(), 0.0);

        // Exactly one failure entry, on the source only
        let last = a.history(None).last().unwrap();
        assert_eq!(last.kind, OperationKind::TransferOut);
        assert_eq!(last.outcome, Outcome::Failure);
        assert_eq!(b.history(None).len(), b_history_before);
    }

    #[test]
    fn test_transfer_respects_source_withdraw_rules() {
        let (mut a, mut b) = open_pair();
        assert_eq!(
            a.transfer_to(&mut b, 1000.01, day(1)),
            Err(Rejection::OverdraftExceeded)
        );
        assert_eq!(a.balance(), 1000.0);
        assert_eq!(b.balance(), 300.0);
    }

    #[test]
    fn test_transfer_never_charges_overdraft_fee() {
        let (_, mut b) = open_pair();
        // A floor of -100 leaves room for a fee-free dip below zero.
        let mut config = config_with_floor();
        config.overdraft_floor = -100.0;
        let mut src = open(50.0, config);

        src.transfer_to(&mut b, 100.0, day(1)).unwrap();
        assert_eq!(src.balance(), -50.0);
        assert!(src
            .history(None)
            .iter()
            .all(|e| e.kind != OperationKind::OverdraftFee));
    }

    // ---------------------------------------------------- freeze / authenticate

    #[test]
    fn test_freeze_always_logs_even_when_redundant() {
        let mut account = open(100.0, AccountConfig::default());
        account.freeze(day(1));
        account.freeze(day(1));
        assert!(account.is_frozen());
        let freezes = account
            .history(None)
            .iter()
            .filter(|e| e.kind == OperationKind::Freeze)
            .count();
        assert_eq!(freezes, 2);

        account.unfreeze(day(1));
        assert!(!account.is_frozen());
        assert_eq!(
            account.history(None).last().unwrap().kind,
            OperationKind::Unfreeze
        );
    }

    #[test]
    fn test_authenticate_never_touches_history() {
        let account = open(100.0, AccountConfig::default());
        let before = account.history(None).len();
        assert!(account.authenticate("1234"));
        assert!(!account.authenticate("0000"));
        assert_eq!(account.history(None).len(), before);
    }

    // -------------------------------------------------------------- interest

    #[test]
    fn test_interest_noop_under_one_month() {
        let mut account = open(1000.0, AccountConfig::default());
        assert_eq!(account.apply_interest(day(1) + Duration::days(29)), 0.0);
        assert_eq!(account.balance(), 1000.0);
    }

    #[test]
    fn test_interest_credits_whole_months() {
        let mut account = open(1000.0, AccountConfig::default());
        // 1000 * (0.03 / 12) * 1 = 2.50
        let credited = account.apply_interest(day(1) + Duration::days(30));
        assert_eq!(credited, 2.5);
        assert_eq!(account.balance(), 1002.5);

        let last = account.history(None).last().unwrap();
        assert_eq!(last.kind, OperationKind::Interest);
        assert_eq!(last.note.as_deref(), Some("1 month(s)"));

        // Same instant again: clock already advanced, nothing more accrues
        assert_eq!(account.apply_interest(day(1) + Duration::days(30)), 0.0);
    }

    #[test]
    fn test_interest_skips_non_positive_balance() {
        let mut config = config_with_floor();
        config.overdraft_floor = -500.0;
        let mut account = open(100.0, config);
        account.withdraw(200.0, day(1)).unwrap(); // now negative
        assert_eq!(account.apply_interest(day(1) + Duration::days(90)), 0.0);
    }

    #[test]
    fn test_deposit_resets_interest_clock() {
        let mut account = open(1000.0, AccountConfig::default());
        account
            .deposit(1.0, day(1) + Duration::days(29))
            .unwrap();
        // Only one day since the deposit: nothing due yet
        assert_eq!(account.apply_interest(day(1) + Duration::days(30)), 0.0);
    }

    // ------------------------------------------------------------- recurring

    #[test]
    fn test_recurring_spec_scenario() {
        let mut account = open(1000.0, AccountConfig::default());
        account.add_recurring(50.0, 7, day(1)).unwrap();

        let credited = account.process_due_recurring(day(11));
        assert_eq!(credited, 50.0);
        assert_eq!(account.balance(), 1050.0);

        // Cadence preserved: next due 7 days after the PRIOR due time
        assert_eq!(
            account.recurring_deposits()[0].next_due_at,
            day(1) + Duration::days(14)
        );

        // Nothing further due at the same instant
        assert_eq!(account.process_due_recurring(day(11)), 0.0);
    }

    #[test]
    fn test_recurring_credits_every_elapsed_cycle() {
        let mut account = open(0.0, AccountConfig::default());
        account.add_recurring(50.0, 7, day(1)).unwrap();

        // Days 8 and 15 have both elapsed by day 16
        let credited = account.process_due_recurring(day(16));
        assert_eq!(credited, 100.0);
        let credits = account
            .history(None)
            .iter()
            .filter(|e| e.note.as_deref() == Some("Recurring deposit due"))
            .count();
        assert_eq!(credits, 2);
    }

    #[test]
    fn test_add_recurring_validates_amount_and_interval() {
        let mut account = open(100.0, AccountConfig::default());
        assert_eq!(
            account.add_recurring(0.0, 7, day(1)),
            Err(Rejection::InvalidAmount)
        );
        assert_eq!(
            account.add_recurring(50.0, 0, day(1)),
            Err(Rejection::InvalidAmount)
        );
        assert!(account.recurring_deposits().is_empty());
    }

    #[test]
    fn test_tick_runs_interest_before_recurring() {
        let mut account = open(1000.0, AccountConfig::default());
        account.add_recurring(500.0, 40, day(1)).unwrap();

        // 60 days out: two months of interest on 1000, then one recurring
        // cycle. Interest on 1000 for 2 months = 5.00; the 500 credit must
        // not have inflated it.
        account.tick(day(1) + Duration::days(60));
        assert_eq!(account.balance(), 1000.0 + 5.0 + 500.0);
    }
}
