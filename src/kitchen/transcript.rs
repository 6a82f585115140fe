//! Console output of the kitchen.
//!
//! The printer is the only writer to the console. Lines appear in the
//! order their events were sent, each stamped with the time since the
//! transcript began.

use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::Result;
use crate::kitchen::chore::KitchenEvent;
use crate::mlog_trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub text: String,
    /// Offset from the start of the transcript.
    pub at: Duration,
}

#[derive(Debug, Clone)]
pub struct Transcript {
    started: Instant,
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            lines: Vec::new(),
        }
    }

    fn record(&mut self, event: &KitchenEvent) -> &TranscriptLine {
        let line = TranscriptLine {
            text: event.to_string(),
            at: self.started.elapsed(),
        };
        mlog_trace!("[{:?}] {}", line.at, line.text);
        self.lines.push(line);
        &self.lines[self.lines.len() - 1]
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn position(&self, text: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.text == text)
    }

    /// When `text` was printed, if it was.
    pub fn at(&self, text: &str) -> Option<Duration> {
        self.lines.iter().find(|l| l.text == text).map(|l| l.at)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Write each event to `out` until the meal is announced or every sender
/// is gone.
///
/// Stopping at the announcement leaves lines from chores that are still
/// running unprinted, as when a process exits under them.
pub async fn print_until_ready<W: Write>(
    mut events: mpsc::Receiver<KitchenEvent>,
    mut out: W,
) -> Result<Transcript> {
    let mut transcript = Transcript::new();
    while let Some(event) = events.recv().await {
        let line = transcript.record(&event);
        writeln!(out, "{}", line.text)?;
        out.flush()?;
        if event == KitchenEvent::MealReady {
            break;
        }
    }
    Ok(transcript)
}

/// Record every event until all senders are dropped, without printing.
pub async fn collect_transcript(mut events: mpsc::Receiver<KitchenEvent>) -> Transcript {
    let mut transcript = Transcript::new();
    while let Some(event) = events.recv().await {
        transcript.record(&event);
    }
    transcript
}
