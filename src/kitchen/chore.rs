//! Simulated chores and the events they announce.

use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::mlog_debug;

pub const BOIL_WATER: &str = "boil water";
pub const CHOP_VEGETABLES: &str = "chop vegetables";

const MEAL_READY_LINE: &str = "Meal preparation complete";

/// A unit of simulated work.
///
/// Announces that it started, stays busy for a fixed duration, then
/// announces that it finished. It has no result and cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chore {
    name: &'static str,
    start_line: &'static str,
    finish_line: &'static str,
    duration: Duration,
}

impl Chore {
    pub fn boil_water(duration: Duration) -> Self {
        Self {
            name: BOIL_WATER,
            start_line: "Boiling water...",
            finish_line: "Water boiled",
            duration,
        }
    }

    pub fn chop_vegetables(duration: Duration) -> Self {
        Self {
            name: CHOP_VEGETABLES,
            start_line: "Chopping vegetables...",
            finish_line: "Vegetables chopped",
            duration,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Run the chore to completion, announcing both ends on `events`.
    ///
    /// A closed channel is ignored; the chore still takes its full time.
    pub async fn perform(self, events: mpsc::Sender<KitchenEvent>) {
        mlog_debug!("Chore '{}' started ({:?})", self.name, self.duration);
        let _ = events.send(KitchenEvent::ChoreStarted(self.clone())).await;

        tokio::time::sleep(self.duration).await;

        mlog_debug!("Chore '{}' finished", self.name);
        let _ = events.send(KitchenEvent::ChoreFinished(self)).await;
    }
}

/// Something the kitchen announces on the console.
///
/// `Display` renders the exact console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KitchenEvent {
    ChoreStarted(Chore),
    ChoreFinished(Chore),
    MealReady,
}

impl KitchenEvent {
    /// The chore this event is about, if any.
    pub fn chore(&self) -> Option<&'static str> {
        match self {
            KitchenEvent::ChoreStarted(c) | KitchenEvent::ChoreFinished(c) => Some(c.name),
            KitchenEvent::MealReady => None,
        }
    }
}

impl fmt::Display for KitchenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KitchenEvent::ChoreStarted(c) => f.write_str(c.start_line),
            KitchenEvent::ChoreFinished(c) => f.write_str(c.finish_line),
            KitchenEvent::MealReady => f.write_str(MEAL_READY_LINE),
        }
    }
}
