//! The kitchen orchestrator.
//!
//! `Kitchen::prepare_meal` dispatches every chore before waiting on any of
//! them, then settles according to its `JoinStrategy`:
//!
//! - `Wait` joins each chore's handle against a shared timeout and only
//!   announces the meal once every chore truly finished.
//! - `FixedSleep` sleeps for the settle duration and announces the meal
//!   regardless. Chores that overrun are left running; whatever they print
//!   afterwards lands after the completion line.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::kitchen::chore::{Chore, KitchenEvent};
use crate::kitchen::join::{join_within, ChoreOutcome};
use crate::{mlog, mlog_debug, mlog_error, mlog_warn};

/// Capacity of the kitchen event channel.
pub const EVENT_BUFFER: usize = 100;

/// How the kitchen decides every chore is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum JoinStrategy {
    /// Join every chore, bounded by the settle duration.
    #[default]
    Wait,
    /// Sleep for the settle duration and assume every chore is done.
    FixedSleep,
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinStrategy::Wait => write!(f, "wait"),
            JoinStrategy::FixedSleep => write!(f, "fixed-sleep"),
        }
    }
}

/// What happened during one `prepare_meal` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealReport {
    pub strategy: JoinStrategy,
    /// One entry per chore, in dispatch order.
    pub outcomes: Vec<(&'static str, ChoreOutcome)>,
    /// Time from dispatch until the meal was announced.
    pub elapsed: Duration,
}

impl MealReport {
    pub fn all_finished(&self) -> bool {
        self.outcomes.iter().all(|(_, o)| o.is_finished())
    }

    pub fn finished_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_finished()).count()
    }

    /// Chores still running when a fixed-sleep kitchen announced the meal.
    pub fn outstanding(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == ChoreOutcome::Outstanding)
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}: {}/{} chores finished in {:.2}s",
            self.strategy,
            self.finished_count(),
            self.outcomes.len(),
            self.elapsed.as_secs_f64()
        );
        let outstanding = self.outstanding();
        if !outstanding.is_empty() {
            line.push_str(&format!(" (outstanding: {})", outstanding.join(", ")));
        }
        line
    }
}

/// Dispatches chores concurrently and announces the meal.
pub struct Kitchen {
    chores: Vec<Chore>,
    strategy: JoinStrategy,
    /// Fixed-sleep wait, or the join timeout.
    settle: Duration,
    event_tx: mpsc::Sender<KitchenEvent>,
}

impl Kitchen {
    pub fn new(
        chores: Vec<Chore>,
        strategy: JoinStrategy,
        settle: Duration,
        event_tx: mpsc::Sender<KitchenEvent>,
    ) -> Self {
        Self {
            chores,
            strategy,
            settle,
            event_tx,
        }
    }

    /// The two-chore kitchen described by `config`.
    pub fn from_config(config: &Config, event_tx: mpsc::Sender<KitchenEvent>) -> Self {
        Self::new(
            vec![
                Chore::boil_water(config.boil_duration()),
                Chore::chop_vegetables(config.chop_duration()),
            ],
            config.join,
            config.settle_duration(),
            event_tx,
        )
    }

    pub fn chores(&self) -> &[Chore] {
        &self.chores
    }

    pub fn strategy(&self) -> JoinStrategy {
        self.strategy
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }

    fn dispatch(&self) -> Vec<(&'static str, JoinHandle<()>)> {
        self.chores
            .iter()
            .map(|chore| {
                mlog_debug!("Dispatching chore '{}'", chore.name());
                let handle = tokio::spawn(chore.clone().perform(self.event_tx.clone()));
                (chore.name(), handle)
            })
            .collect()
    }

    async fn sleep_then_observe(
        &self,
        handles: Vec<(&'static str, JoinHandle<()>)>,
    ) -> Vec<(&'static str, ChoreOutcome)> {
        tokio::time::sleep(self.settle).await;
        // Handles are only peeked at and then dropped, which detaches the
        // chores instead of cancelling them.
        handles
            .into_iter()
            .map(|(name, handle)| {
                let outcome = if handle.is_finished() {
                    ChoreOutcome::Finished
                } else {
                    mlog_warn!("Chore '{}' still running after {:?}", name, self.settle);
                    ChoreOutcome::Outstanding
                };
                (name, outcome)
            })
            .collect()
    }

    fn check_outcomes(&self, outcomes: &[(&'static str, ChoreOutcome)]) -> Result<()> {
        for (name, outcome) in outcomes {
            if let ChoreOutcome::Failed { reason } = outcome {
                mlog_error!("Chore '{}' failed: {}", name, reason);
                return Err(Error::ChoreFailed {
                    chore: name.to_string(),
                    reason: reason.clone(),
                });
            }
        }

        let timed_out: Vec<&str> = outcomes
            .iter()
            .filter(|(_, o)| *o == ChoreOutcome::TimedOut)
            .map(|(name, _)| *name)
            .collect();
        if !timed_out.is_empty() {
            mlog_error!("Chores timed out after {:?}: {:?}", self.settle, timed_out);
            return Err(Error::ChoresTimedOut {
                chores: timed_out.join(", "),
                after: self.settle,
            });
        }
        Ok(())
    }

    /// Run every chore and announce the meal.
    ///
    /// # Errors
    ///
    /// Only with `JoinStrategy::Wait`: a chore that panicked, or chores that
    /// did not finish within the settle duration. The meal is not announced
    /// in either case.
    pub async fn prepare_meal(&self) -> Result<MealReport> {
        mlog!(
            "Preparing meal: {} chores, strategy={}, settle={:?}",
            self.chores.len(),
            self.strategy,
            self.settle
        );
        let started = Instant::now();
        let handles = self.dispatch();

        let outcomes = match self.strategy {
            JoinStrategy::FixedSleep => self.sleep_then_observe(handles).await,
            JoinStrategy::Wait => {
                let outcomes = join_within(handles, self.settle).await;
                self.check_outcomes(&outcomes)?;
                outcomes
            }
        };

        let _ = self.event_tx.send(KitchenEvent::MealReady).await;

        let report = MealReport {
            strategy: self.strategy,
            outcomes,
            elapsed: started.elapsed(),
        };
        mlog!("{}", report.summary());
        Ok(report)
    }
}
