//! Test fixtures for integration tests.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use mealprep::kitchen::{collect_transcript, Transcript, EVENT_BUFFER};
use mealprep::{Chore, JoinStrategy, Kitchen, MealReport, Result};

pub const UNIT: Duration = Duration::from_secs(1);

pub const BOILING: &str = "Boiling water...";
pub const BOILED: &str = "Water boiled";
pub const CHOPPING: &str = "Chopping vegetables...";
pub const CHOPPED: &str = "Vegetables chopped";
pub const COMPLETE: &str = "Meal preparation complete";

/// A kitchen wired to a transcript collector.
///
/// Must be created inside a tokio runtime.
pub struct KitchenHarness {
    pub kitchen: Kitchen,
    collector: JoinHandle<Transcript>,
}

impl KitchenHarness {
    /// Boil and chop durations are in units; settling takes 3 units.
    pub fn new(strategy: JoinStrategy, boil_units: u32, chop_units: u32) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let kitchen = Kitchen::new(
            vec![
                Chore::boil_water(UNIT * boil_units),
                Chore::chop_vegetables(UNIT * chop_units),
            ],
            strategy,
            UNIT * 3,
            tx,
        );
        let collector = tokio::spawn(collect_transcript(rx));
        Self { kitchen, collector }
    }

    /// Prepare the meal, then keep collecting until every chore is gone.
    pub async fn run(self) -> (Result<MealReport>, Transcript) {
        let KitchenHarness { kitchen, collector } = self;
        let report = kitchen.prepare_meal().await;
        drop(kitchen);
        let transcript = collector.await.expect("collector panicked");
        (report, transcript)
    }
}

/// Assert each chore announces its finish after its start.
pub fn assert_chores_ordered(transcript: &Transcript) {
    for (start, finish) in [(BOILING, BOILED), (CHOPPING, CHOPPED)] {
        if let Some(f) = transcript.position(finish) {
            let s = transcript
                .position(start)
                .unwrap_or_else(|| panic!("'{}' printed without '{}'", finish, start));
            assert!(s < f, "'{}' printed before '{}'", finish, start);
        }
    }
}
