//! Pending-Displacement Controller
//!
//! Coalesces contiguous `u`/`r` tokens into one signed counter `P` and
//! applies the net displacement lazily, at the next observable event
//! (`print`) or fresh mutation (`change`/`delete`). Modeled as a three-state
//! machine over `(sign(P), redoable)`: `Neutral` (P=0), `UndoPending`
//! (P>0), `RedoPending` (P<0).

use tracing::{debug, warn};

use crate::document::Document;
use crate::history::History;

/// State of the pending-displacement machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    Neutral,
    UndoPending,
    RedoPending,
}

/// The coalescing counter itself.
///
/// `redoable` tracks whether an undo has been issued since the most recent
/// fresh mutation; `r` tokens received while it is `false` are discarded.
#[derive(Debug, Default)]
pub struct Pending {
    p: i64,
    redoable: bool,
}

impl Pending {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PendingState {
        match self.p.cmp(&0) {
            std::cmp::Ordering::Equal => PendingState::Neutral,
            std::cmp::Ordering::Greater => PendingState::UndoPending,
            std::cmp::Ordering::Less => PendingState::RedoPending,
        }
    }

    /// Queues `n` undos.
    pub fn on_u(&mut self, n: u64, undo_len: usize, redo_len: usize) {
        self.redoable = true;
        self.p = self.p.saturating_add(n as i64);
        self.saturate(undo_len, redo_len);
        debug!(p = self.p, "queued undo");
    }

    /// Queues `n` redos. Ignored if no undo has happened since the last
    /// fresh mutation.
    pub fn on_r(&mut self, n: u64, undo_len: usize, redo_len: usize) {
        if !self.redoable {
            warn!(n, "redo token discarded, nothing undone since last mutation");
            return;
        }
        self.p = self.p.saturating_sub(n as i64);
        self.saturate(undo_len, redo_len);
        debug!(p = self.p, "queued redo");
    }

    fn saturate(&mut self, undo_len: usize, redo_len: usize) {
        let undo_len = undo_len as i64;
        let redo_len = redo_len as i64;
        if self.p > undo_len {
            self.p = undo_len;
        }
        if -self.p > redo_len {
            self.p = -redo_len;
        }
    }

    /// Marks a fresh mutation: called by the dispatcher *after* drain, once
    /// the mutation's own record has been pushed.
    pub fn note_fresh_mutation(&mut self) {
        self.redoable = false;
    }

    /// Replays the net displacement against `history`/`doc`, then resets to
    /// `Neutral`. Must be called before any `print` and before any fresh
    /// `change`/`delete`.
    pub fn drain(&mut self, history: &mut History, doc: &mut Document) {
        if self.p == 0 {
            return;
        }
        debug!(p = self.p, "draining pending displacement");
        if self.p > 0 {
            for _ in 0..self.p {
                if !history.undo_one(doc) {
                    break;
                }
            }
        } else {
            for _ in 0..(-self.p) {
                if !history.redo_one(doc) {
                    break;
                }
            }
        }
        self.p = 0;
    }
}
