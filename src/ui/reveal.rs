//! Delayed announcement of a finished game. The engine decides the outcome
//! immediately; the UI only shows it once the last piece has landed.

use std::time::{Duration, Instant};

use crate::game::WinLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Won(WinLine),
    Drawn,
}

#[derive(Debug, Default)]
pub struct Reveal {
    pending: Option<(Outcome, Instant)>,
    shown: Option<Outcome>,
}

impl Reveal {
    pub fn schedule(&mut self, outcome: Outcome, due: Instant) {
        self.pending = Some((outcome, due));
    }

    /// Move a due outcome to shown. Returns it the first time only.
    pub fn poll(&mut self, now: Instant) -> Option<&Outcome> {
        match self.pending.take() {
            Some((outcome, due)) if now >= due => {
                self.shown = Some(outcome);
                self.shown.as_ref()
            }
            still_pending => {
                self.pending = still_pending;
                None
            }
        }
    }

    pub fn shown(&self) -> Option<&Outcome> {
        self.shown.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop both pending and shown outcomes.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.shown = None;
    }
}

/// A message visible for a fixed time.
#[derive(Debug, Default)]
pub struct TimedNotice {
    current: Option<(String, Instant)>,
}

impl TimedNotice {
    pub fn show(&mut self, text: impl Into<String>, now: Instant, duration: Duration) {
        self.current = Some((text.into(), now + duration));
    }

    pub fn active(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|(_, expires)| now < *expires)
            .map(|(text, _)| text.as_str())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
