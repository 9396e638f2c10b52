// 🏦 Account Registry - Owns every live account
// Also owns the account-number sequence: numbering is registry state,
// not a hidden process-wide static.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use tracing::info;

use crate::account::{Account, AccountConfig, Credential};
use crate::error::Rejection;

/// Prefix for generated account numbers.
const NUMBER_PREFIX: &str = "ACC";

/// Generated numbers start above this seed (pre-incremented, so the first
/// is ACC1001).
const NUMBER_SEED: u32 = 1000;

/// Registry of all live accounts, keyed by account number.
///
/// The registry is the sole owner of its accounts and of the number
/// sequence, which only ever moves forward for the registry's lifetime.
/// Account numbers are unique here by construction: `open` refuses
/// duplicates, and the map key is the number itself.
pub struct AccountRegistry {
    accounts: BTreeMap<String, Account>,
    next_seq: u32,
}

impl AccountRegistry {
    pub fn new() -> Self {
        AccountRegistry {
            accounts: BTreeMap::new(),
            next_seq: NUMBER_SEED,
        }
    }

    fn next_number(&mut self) -> String {
        self.next_seq += 1;
        format!("{}{}", NUMBER_PREFIX, self.next_seq)
    }

    // ========================================================================
    // OPEN / LOOKUP
    // ========================================================================

    /// Open a new account and return its number.
    ///
    /// With `number: None` the registry assigns the next sequential
    /// `ACC{n}`. A caller-supplied number that is already in use is an
    /// operational error, not a business rejection.
    pub fn open(
        &mut self,
        holder_name: &str,
        credential: Credential,
        opening_balance: f64,
        number: Option<String>,
        config: AccountConfig,
        now: DateTime<Local>,
    ) -> Result<String> {
        let number = match number {
            Some(n) => {
                if self.accounts.contains_key(&n) {
                    bail!("account number {} already in use", n);
                }
                n
            }
            None => {
                // Skip over any caller-supplied numbers that happen to
                // collide with the sequence.
                let mut n = self.next_number();
                while self.accounts.contains_key(&n) {
                    n = self.next_number();
                }
                n
            }
        };

        let account = Account::open(
            holder_name,
            credential,
            opening_balance,
            number.clone(),
            config,
            now,
        );
        info!(account = %number, holder = %holder_name, "account opened");
        self.accounts.insert(number.clone(), account);
        Ok(number)
    }

    pub fn get(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn get_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All live account numbers, in order.
    pub fn numbers(&self) -> Vec<&str> {
        self.accounts.keys().map(String::as_str).collect()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    // ========================================================================
    // OPERATIONS ACROSS ACCOUNTS
    // ========================================================================

    /// Route a transfer between two registered accounts.
    ///
    /// Unknown account numbers are an operational error (`Err`); business
    /// refusals come back as `Ok(Err(rejection))` so callers can tell the
    /// two apart.
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: f64,
        now: DateTime<Local>,
    ) -> Result<std::result::Result<(), Rejection>> {
        if from == to {
            let source = self
                .accounts
                .get_mut(from)
                .with_context(|| format!("unknown account {}", from))?;
            return Ok(Err(source.reject_same_account_transfer(amount, now)));
        }

        let (source, destination) = self
            .pair_mut(from, to)
            .with_context(|| format!("unknown account in transfer {} -> {}", from, to))?;
        Ok(source.transfer_to(destination, amount, now))
    }

    /// Check a credential against an account.
    ///
    /// An unknown account number fails the same way a wrong credential
    /// does, so callers cannot probe which numbers exist.
    pub fn authenticate(&self, number: &str, candidate: &str) -> std::result::Result<(), Rejection> {
        match self.accounts.get(number) {
            Some(account) if account.authenticate(candidate) => Ok(()),
            _ => Err(Rejection::AuthenticationFailed),
        }
    }

    /// Run the passive flows (interest, recurring deposits) on every
    /// account up to `now`.
    pub fn tick_all(&mut self, now: DateTime<Local>) {
        for account in self.accounts.values_mut() {
            account.tick(now);
        }
    }

    /// Two distinct accounts, mutably. `None` if either is missing.
    fn pair_mut(&mut self, a: &str, b: &str) -> Option<(&mut Account, &mut Account)> {
        debug_assert_ne!(a, b);
        let mut first = None;
        let mut second = None;
        for (number, account) in self.accounts.iter_mut() {
            if number == a {
                first = Some(account);
            } else if number == b {
                second = Some(account);
            }
        }
        Some((first?, second?))
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
