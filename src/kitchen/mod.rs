//! The kitchen: chores, their orchestration, and the console transcript.
//!
//! A `Kitchen` dispatches every `Chore` as its own tokio task, then decides
//! when the meal is ready according to its `JoinStrategy`. All console
//! output travels as `KitchenEvent`s over one channel to a single printer.

mod chore;
mod join;
mod orchestrator;
mod transcript;

pub use chore::{Chore, KitchenEvent, BOIL_WATER, CHOP_VEGETABLES};
pub use join::{join_within, ChoreOutcome};
pub use orchestrator::{JoinStrategy, Kitchen, MealReport, EVENT_BUFFER};
pub use transcript::{collect_transcript, print_until_ready, Transcript, TranscriptLine};
