//! The normal meal: both chores finish well within the settle duration.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_test::assert_ok;

use mealprep::kitchen::{collect_transcript, EVENT_BUFFER};
use mealprep::{Config, JoinStrategy, Kitchen};

use crate::fixtures::{
    assert_chores_ordered, KitchenHarness, BOILED, BOILING, CHOPPED, CHOPPING, COMPLETE, UNIT,
};

/// Given the default durations
/// When the kitchen waits on its chores
/// Then five lines print and the announcement follows the longest chore
#[tokio::test(start_paused = true)]
async fn test_wait_prints_full_transcript() {
    let (report, transcript) = KitchenHarness::new(JoinStrategy::Wait, 2, 1).run().await;

    let report = assert_ok!(report);
    assert!(report.all_finished());
    assert_eq!(transcript.len(), 5);
    assert_eq!(transcript.texts().last(), Some(&COMPLETE));

    assert_eq!(transcript.at(BOILING), Some(Duration::ZERO));
    assert_eq!(transcript.at(CHOPPING), Some(Duration::ZERO));
    assert_eq!(transcript.at(CHOPPED), Some(UNIT));
    assert_eq!(transcript.at(BOILED), Some(UNIT * 2));
    assert_eq!(transcript.at(COMPLETE), Some(UNIT * 2));
    assert_chores_ordered(&transcript);
}

/// Given the default durations
/// When the kitchen uses the legacy fixed sleep
/// Then the announcement waits the full three units
#[tokio::test(start_paused = true)]
async fn test_fixed_sleep_prints_full_transcript() {
    let (report, transcript) = KitchenHarness::new(JoinStrategy::FixedSleep, 2, 1).run().await;

    let report = assert_ok!(report);
    assert!(report.outstanding().is_empty());
    assert_eq!(report.elapsed, UNIT * 3);
    assert_eq!(transcript.len(), 5);
    assert_eq!(transcript.position(COMPLETE), Some(4));
    assert_eq!(transcript.at(COMPLETE), Some(UNIT * 3));
    assert_chores_ordered(&transcript);
}

/// Chopping is quicker, so it always finishes first.
#[tokio::test(start_paused = true)]
async fn test_shorter_chore_finishes_first() {
    let (_, transcript) = KitchenHarness::new(JoinStrategy::Wait, 2, 1).run().await;

    let chopped = transcript.position(CHOPPED).unwrap();
    let boiled = transcript.position(BOILED).unwrap();
    assert!(chopped < boiled);
}

/// Both chores are dispatched before either one is waited on.
#[tokio::test(start_paused = true)]
async fn test_chores_start_together() {
    let (_, transcript) = KitchenHarness::new(JoinStrategy::Wait, 2, 2).run().await;

    let first_two: Vec<&str> = transcript.texts().into_iter().take(2).collect();
    assert!(first_two.contains(&BOILING));
    assert!(first_two.contains(&CHOPPING));
    assert_eq!(transcript.at(COMPLETE), Some(UNIT * 2));
}

/// Any durations shorter than the settle duration keep every invariant.
#[tokio::test(start_paused = true)]
async fn test_ordering_holds_for_all_short_durations() {
    for strategy in [JoinStrategy::Wait, JoinStrategy::FixedSleep] {
        for boil in 0..=2 {
            for chop in 0..=2 {
                let (report, transcript) = KitchenHarness::new(strategy, boil, chop).run().await;

                assert_ok!(report);
                assert_eq!(transcript.len(), 5, "{} boil={} chop={}", strategy, boil, chop);
                assert_eq!(transcript.texts().last(), Some(&COMPLETE));
                assert_chores_ordered(&transcript);
            }
        }
    }
}

/// A real multi-threaded run with a short time unit.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_from_config_on_real_clock() {
    let config = Config {
        time_unit_ms: 20,
        ..Default::default()
    };
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let collector = tokio::spawn(collect_transcript(rx));

    let kitchen = Kitchen::from_config(&config, tx);
    let report = assert_ok!(kitchen.prepare_meal().await);
    drop(kitchen);
    let transcript = collector.await.unwrap();

    assert!(report.all_finished());
    assert!(report.elapsed >= Duration::from_millis(40));
    assert_eq!(transcript.len(), 5);
    assert_eq!(transcript.texts().last(), Some(&COMPLETE));
    assert_chores_ordered(&transcript);
}
