//! The settlement chronicle: the player-facing log.
//!
//! Every line goes three places: the latest-line readout, a short rolling
//! history, and a pending queue the presentation layer drains. Lines are
//! also emitted as `tracing` events on the `homestead::chronicle` target.

use std::collections::VecDeque;

/// Line shown before anything has happened.
pub const OPENING_LINE: &str = "an empty clearing awaits settlers.";

/// Chronicle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chronicle {
    text: String,
    history: VecDeque<String>,
    pending: Vec<String>,
    history_len: usize,
}

impl Chronicle {
    /// A chronicle holding only the opening line (which is not pending).
    pub fn new(history_len: usize) -> Self {
        Self::from_parts(history_len, vec![OPENING_LINE.to_owned()])
    }

    /// Restore from a stored history, oldest first. Only the newest
    /// `history_len` lines are kept; the latest line is the last of them.
    pub fn from_parts(history_len: usize, history: Vec<String>) -> Self {
        let history_len = history_len.max(1);
        let skip = history.len().saturating_sub(history_len);
        let history: VecDeque<String> = history.into_iter().skip(skip).collect();
        let text = history.back().cloned().unwrap_or_default();
        Self {
            text,
            history,
            pending: Vec::new(),
            history_len,
        }
    }

    /// Record a line.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!(target: "homestead::chronicle", "{line}");
        self.pending.push(line.clone());
        self.history.push_back(line.clone());
        while self.history.len() > self.history_len {
            self.history.pop_front();
        }
        self.text = line;
    }

    /// The latest line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Overwrite the latest-line readout without recording a new line.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Recent lines, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Take every line recorded since the last drain.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}
