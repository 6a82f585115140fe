//! Joining dispatched chores against a shared deadline.

use futures::future::join_all;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{timeout_at, Instant};

/// How a dispatched chore ended, as seen by the kitchen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoreOutcome {
    /// Ran to completion.
    Finished,
    /// Panicked or was cancelled.
    Failed { reason: String },
    /// Did not finish before the deadline and was aborted.
    TimedOut,
    /// Still running when a fixed-sleep kitchen declared the meal ready.
    Outstanding,
}

impl ChoreOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, ChoreOutcome::Finished)
    }
}

fn failure_reason(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked".to_string()
    }
}

/// Wait for every handle, giving all of them the same `limit`.
///
/// Chores run concurrently, so the total wait is bounded by `limit`, not
/// by the sum. Overrunning chores are aborted. Outcomes keep input order.
///
/// The deadline is exclusive: a chore whose own duration equals `limit` is
/// racing the deadline and is reported as `TimedOut`. A `limit` too large
/// to add to the clock means no deadline at all.
pub async fn join_within(
    handles: Vec<(&'static str, JoinHandle<()>)>,
    limit: Duration,
) -> Vec<(&'static str, ChoreOutcome)> {
    let deadline = Instant::now().checked_add(limit);
    let joins = handles.into_iter().map(|(name, mut handle)| async move {
        let joined = match deadline {
            Some(deadline) => timeout_at(deadline, &mut handle).await,
            None => Ok((&mut handle).await),
        };
        let outcome = match joined {
            Ok(Ok(())) => ChoreOutcome::Finished,
            Ok(Err(err)) => ChoreOutcome::Failed {
                reason: failure_reason(err),
            },
            Err(_) => {
                handle.abort();
                ChoreOutcome::TimedOut
            }
        };
        (name, outcome)
    });
    join_all(joins).await
}
