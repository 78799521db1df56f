//! StatsLedger Tests
//!
//! Tests verify:
//! - Counting from the local mark's point of view
//! - Ongoing boards are not counted
//! - FinalStats field order
//! - Remote tallies never touch local counters

use tictacwire::board::{Mark, Outcome};
use tictacwire::protocol::Message;
use tictacwire::stats::{Standing, StatsLedger, StatsSnapshot};

#[test]
fn test_new_ledger_is_zero() {
    let ledger = StatsLedger::new();
    assert_eq!(ledger.snapshot(), StatsSnapshot::default());
    assert_eq!(ledger.remote(), None);
}

#[test]
fn test_record_win_loss_draw_win() {
    let mut ledger = StatsLedger::new();

    assert_eq!(ledger.record(Outcome::Win(Mark::A), Mark::A), Some(Standing::Won));
    assert_eq!(ledger.record(Outcome::Win(Mark::B), Mark::A), Some(Standing::Lost));
    assert_eq!(ledger.record(Outcome::Draw, Mark::A), Some(Standing::Tied));
    assert_eq!(ledger.record(Outcome::Win(Mark::A), Mark::A), Some(Standing::Won));

    assert_eq!(
        ledger.snapshot(),
        StatsSnapshot {
            games: 4,
            wins: 2,
            losses: 1,
            ties: 1,
        }
    );
}

#[test]
fn test_same_outcome_mirrors_between_marks() {
    let mut a = StatsLedger::new();
    let mut b = StatsLedger::new();

    for outcome in [Outcome::Win(Mark::A), Outcome::Win(Mark::B), Outcome::Draw] {
        a.record(outcome, Mark::A);
        b.record(outcome, Mark::B);
    }

    let a = a.snapshot();
    let b = b.snapshot();
    assert_eq!(a.games, b.games);
    assert_eq!(a.wins, b.losses);
    assert_eq!(a.losses, b.wins);
    assert_eq!(a.ties, b.ties);
}

#[test]
fn test_ongoing_is_not_recorded() {
    let mut ledger = StatsLedger::new();
    assert_eq!(ledger.record(Outcome::Ongoing, Mark::B), None);
    assert_eq!(ledger.snapshot().games, 0);
}

#[test]
fn test_snapshot_does_not_mutate() {
    let mut ledger = StatsLedger::new();
    ledger.record_standing(Standing::Tied);

    let first = ledger.snapshot();
    let second = ledger.snapshot();
    assert_eq!(first, second);
    assert_eq!(first.games, 1);
}

#[test]
fn test_to_final_stats_field_order() {
    let mut ledger = StatsLedger::new();
    ledger.record_standing(Standing::Won);
    ledger.record_standing(Standing::Lost);
    ledger.record_standing(Standing::Tied);
    ledger.record_standing(Standing::Won);

    let message = ledger.to_final_stats();
    assert_eq!(
        message,
        Message::FinalStats(StatsSnapshot {
            games: 4,
            wins: 2,
            losses: 1,
            ties: 1,
        })
    );
    assert_eq!(message.payload_text(), "q 4 2 1 1");
}

#[test]
fn test_apply_remote_leaves_local_counts() {
    let mut ledger = StatsLedger::new();
    ledger.record_standing(Standing::Won);

    let remote = StatsSnapshot {
        games: 9,
        wins: 0,
        losses: 8,
        ties: 1,
    };
    ledger.apply_remote(remote);

    assert_eq!(ledger.remote(), Some(remote));
    assert_eq!(
        ledger.snapshot(),
        StatsSnapshot {
            games: 1,
            wins: 1,
            losses: 0,
            ties: 0,
        }
    );
}
