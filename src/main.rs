// SecureBank console demo
// Thin interactive wrapper over the core: prompting, parsing, and
// formatting only. No business rules live here.

use anyhow::{Context, Result};
use chrono::Local;
use std::io::{self, BufRead, Write};

use secure_bank::{Account, AccountConfig, AccountRegistry, Credential, Dollars, VERSION};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut registry = AccountRegistry::new();
    let now = Local::now();
    let demo = [
        ("Alice Johnson", "1234", 1000.0),
        ("Bob Smith", "5678", 300.0),
        ("Charlie Brown", "9999", 5000.0),
    ];
    let mut numbers = Vec::new();
    for (holder, pin, opening) in demo {
        let number = registry.open(
            holder,
            Credential::new(pin),
            opening,
            None,
            AccountConfig::default(),
            now,
        )?;
        numbers.push(number);
    }

    let mut current = 0usize;

    println!("SecureBank Pro v{}", VERSION);
    display(registry.get(&numbers[current]).context("demo account missing")?);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!("1 Deposit   2 Withdraw  3 Transfer  4 Balance");
        println!("5 History   6 Last 5    7 Switch    8 Freeze/Unfreeze");
        println!("9 Export JSON history   0 Exit");
        let choice = read_int(&mut lines, "> ", 0, 9)?;
        if choice == 0 {
            break;
        }

        let now = Local::now();
        // Passive flows run before every command takes effect.
        registry.tick_all(now);
        let number = numbers[current].clone();

        match choice {
            1 => {
                let amount = read_amount(&mut lines, "Deposit $")?;
                let account = registry.get_mut(&number).context("account missing")?;
                report(account.deposit(amount, now));
            }
            2 => {
                let amount = read_amount(&mut lines, "Withdraw $")?;
                let account = registry.get_mut(&number).context("account missing")?;
                report(account.withdraw(amount, now));
            }
            3 => {
                let amount = read_amount(&mut lines, "Amount $")?;
                println!("To which account?");
                for (i, n) in numbers.iter().enumerate() {
                    let holder = registry.get(n).context("account missing")?.holder_name();
                    println!("  {} {} ({})", i + 1, holder, n);
                }
                let target = read_int(&mut lines, "> ", 1, numbers.len() as i64)? as usize - 1;
                let outcome = registry.transfer(&number, &numbers[target], amount, now)?;
                report(outcome);
            }
            4 => display(registry.get(&number).context("account missing")?),
            5 => show_history(registry.get(&number).context("account missing")?, None),
            6 => show_history(registry.get(&number).context("account missing")?, Some(5)),
            7 => {
                println!("Switch to:");
                for (i, n) in numbers.iter().enumerate() {
                    let holder = registry.get(n).context("account missing")?.holder_name();
                    println!("  {} {} ({})", i + 1, holder, n);
                }
                let target = read_int(&mut lines, "> ", 1, numbers.len() as i64)? as usize - 1;
                print!("PIN: ");
                io::stdout().flush()?;
                let pin = lines
                    .next()
                    .context("stdin closed")?
                    .context("failed to read stdin")?;
                match registry.authenticate(&numbers[target], pin.trim()) {
                    Ok(()) => {
                        current = target;
                        display(registry.get(&numbers[current]).context("account missing")?);
                    }
                    Err(rejection) => println!("Rejected: {}", rejection),
                }
            }
            8 => {
                let account = registry.get_mut(&number).context("account missing")?;
                if account.is_frozen() {
                    account.unfreeze(now);
                    println!("Account unfrozen.");
                } else {
                    account.freeze(now);
                    println!("Account frozen.");
                }
            }
            9 => {
                let account = registry.get(&number).context("account missing")?;
                let json = serde_json::to_string_pretty(account.history(None))?;
                println!("{}", json);
            }
            _ => unreachable!(),
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

/// Print the core's answer for a money-moving command.
fn report(outcome: Result<(), secure_bank::Rejection>) {
    match outcome {
        Ok(()) => println!("Done."),
        Err(rejection) => println!("Rejected: {}", rejection),
    }
}

/// Boxed account summary, in the spirit of a printed bank slip.
fn display(account: &Account) {
    let frozen = if account.is_frozen() { " [FROZEN]" } else { "" };
    println!();
    println!("╔══════════════════════════════════════╗");
    println!("║            ACCOUNT SUMMARY           ║");
    println!("╠══════════════════════════════════════╣");
    println!("║ Holder   : {:<25} ║", account.holder_name());
    println!("║ Account  : {:<25} ║", account.account_number());
    println!(
        "║ Balance  : {:<25} ║",
        format!("{}{}", Dollars(account.balance()), frozen)
    );
    println!("╚══════════════════════════════════════╝");
}

fn show_history(account: &Account, limit: Option<usize>) {
    match limit {
        Some(n) => println!("\n=== Transaction History (last {}) ===", n),
        None => println!("\n=== Transaction History ==="),
    }
    let entries = account.history(limit);
    if entries.is_empty() {
        println!("No transactions.");
        return;
    }
    for entry in entries {
        println!("{}", entry);
    }
}

/// Prompt until the user types a non-negative dollar amount.
fn read_amount(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Result<f64> {
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;
        let line = lines
            .next()
            .context("stdin closed")?
            .context("failed to read stdin")?;
        match line.trim().parse::<f64>() {
            Ok(value) if value >= 0.0 => return Ok(value),
            _ => println!("Invalid, try again."),
        }
    }
}

/// Prompt until the user types an integer in `lo..=hi`.
fn read_int(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
    lo: i64,
    hi: i64,
) -> Result<i64> {
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;
        let line = lines
            .next()
            .context("stdin closed")?
            .context("failed to read stdin")?;
        match line.trim().parse::<i64>() {
            Ok(value) if (lo..=hi).contains(&value) => return Ok(value),
            _ => println!("Enter {}-{}.", lo, hi),
        }
    }
}
