//! Property-based tests for the ledger engine.
//!
//! - Money conservation across transfers
//! - Transfer leg pairing
//! - Engine-approved histories never go negative

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::LedgerEngine;
use super::error::LedgerError;
use super::event::EventKind;
use super::memory::{InMemoryAccountDirectory, InMemoryEventStore};
use tally_shared::types::AccountId;

/// One step of a randomly generated session against a small set of
/// accounts, addressed by index so the strategy stays account-agnostic.
#[derive(Debug, Clone)]
enum Step {
    Deposit { account: usize, amount: Decimal },
    Withdraw { account: usize, amount: Decimal },
    Transfer { from: usize, to: usize, amount: Decimal },
}

const ACCOUNTS: usize = 3;

/// Strategy for positive amounts (0.01 to 500.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..50_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..ACCOUNTS, amount_strategy())
            .prop_map(|(account, amount)| Step::Deposit { account, amount }),
        (0..ACCOUNTS, amount_strategy())
            .prop_map(|(account, amount)| Step::Withdraw { account, amount }),
        (0..ACCOUNTS, 0..ACCOUNTS, amount_strategy())
            .prop_map(|(from, to, amount)| Step::Transfer { from, to, amount }),
    ]
}

fn session_strategy() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step_strategy(), 1..40)
}

/// Runs a session and returns the engine plus the account ids used.
async fn run_session(
    steps: &[Step],
) -> (
    LedgerEngine<InMemoryEventStore, InMemoryAccountDirectory>,
    Vec<AccountId>,
) {
    let directory = InMemoryAccountDirectory::new();
    let accounts: Vec<AccountId> = (0..ACCOUNTS).map(|_| directory.register_new()).collect();
    let engine = LedgerEngine::new(InMemoryEventStore::new(), directory);

    for step in steps {
        // Failures (insufficient funds, self transfer) are part of the
        // session; the properties below hold regardless.
        let result = match *step {
            Step::Deposit { account, amount } => engine
                .deposit(accounts[account], amount, "prop deposit".into())
                .await
                .map(|_| ()),
            Step::Withdraw { account, amount } => engine
                .withdraw(accounts[account], amount, "prop withdraw".into())
                .await
                .map(|_| ()),
            Step::Transfer { from, to, amount } => engine
                .transfer(accounts[from], accounts[to], amount, "prop transfer".into())
                .await
                .map(|_| ()),
        };

        if let Err(err) = result {
            assert!(
                matches!(
                    err,
                    LedgerError::InsufficientFunds { .. } | LedgerError::SelfTransfer(_)
                ),
                "unexpected session error: {err}"
            );
        }
    }

    (engine, accounts)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Transfers move money but never create or destroy it: the sum of all
    /// balances equals total deposits minus total withdrawals.
    #[test]
    fn prop_money_is_conserved(steps in session_strategy()) {
        runtime().block_on(async {
            let (engine, accounts) = run_session(&steps).await;

            let mut total = Decimal::ZERO;
            let mut deposited = Decimal::ZERO;
            let mut withdrawn = Decimal::ZERO;
            for &account in &accounts {
                let statement = engine.get_balance(account).await.unwrap();
                total += statement.balance;
                for event in &statement.events {
                    match event.kind {
                        EventKind::Deposit => deposited += event.amount,
                        EventKind::Withdrawal => withdrawn += event.amount,
                        EventKind::TransferOut | EventKind::TransferIn => {}
                    }
                }
            }

            assert_eq!(total, deposited - withdrawn);
        });
    }

    /// Every TransferOut leg has exactly one matching TransferIn leg with
    /// the same amount and mirrored counterparty reference.
    #[test]
    fn prop_transfer_legs_pair_up(steps in session_strategy()) {
        runtime().block_on(async {
            let (engine, accounts) = run_session(&steps).await;

            let mut out_legs = Vec::new();
            let mut in_legs = Vec::new();
            for &account in &accounts {
                for event in engine.get_balance(account).await.unwrap().events {
                    match event.kind {
                        EventKind::TransferOut => out_legs.push(event),
                        EventKind::TransferIn => in_legs.push(event),
                        _ => {}
                    }
                }
            }

            assert_eq!(out_legs.len(), in_legs.len());
            for out in &out_legs {
                let matched = in_legs.iter().filter(|inn| {
                    inn.counterparty_id == Some(out.account_id)
                        && Some(inn.account_id) == out.counterparty_id
                        && inn.amount == out.amount
                });
                assert!(matched.count() >= 1, "unpaired transfer leg");
            }
        });
    }

    /// The engine never approves an event that drives a balance negative,
    /// no matter the session.
    #[test]
    fn prop_balances_never_negative(steps in session_strategy()) {
        runtime().block_on(async {
            let (engine, accounts) = run_session(&steps).await;

            for &account in &accounts {
                let statement = engine.get_balance(account).await.unwrap();
                assert!(
                    statement.balance >= Decimal::ZERO,
                    "negative balance {} on {account}",
                    statement.balance
                );
            }
        });
    }

    /// Histories are ordered: created_at never decreases within an account.
    #[test]
    fn prop_history_timestamps_monotone(steps in session_strategy()) {
        runtime().block_on(async {
            let (engine, accounts) = run_session(&steps).await;

            for &account in &accounts {
                let events = engine.get_balance(account).await.unwrap().events;
                for pair in events.windows(2) {
                    assert!(pair[0].created_at <= pair[1].created_at);
                }
            }
        });
    }
}
