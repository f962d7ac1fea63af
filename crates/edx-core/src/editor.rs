//! Editor Context (C6 core half)
//!
//! Bundles a [`Document`], [`History`] and [`Pending`] behind the dispatch
//! contract every command handler needs: drain-then-mutate for `change`/
//! `delete`, drain-then-observe for `print`. Wire parsing, payload-line
//! reading and output formatting stay in the binary crate — this type only
//! knows about already-decoded addresses and already-read payload bytes.

use tracing::info;

use crate::document::Document;
use crate::history::History;
use crate::line::{LineHandle, MAX_LINE};
use crate::pending::Pending;
use crate::Result;

/// One item of a `print` result: either a line body or a marker for a
/// position outside the current document.
#[derive(Debug, Clone)]
pub enum PrintItem {
    Line(LineHandle),
    Missing,
}

/// The mutable state a single editing session owns: one document, one
/// history, one pending counter, bundled so tests can construct independent
/// editors instead of relying on module-level singletons.
pub struct Editor {
    doc: Document,
    history: History,
    pending: Pending,
    max_line: usize,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_limits(capacity, MAX_LINE)
    }

    /// Builds an editor with a configured initial capacity and line-length
    /// ceiling, e.g. from `limits.initial_capacity`/`limits.max_line_bytes`.
    pub fn with_limits(capacity: usize, max_line: usize) -> Self {
        Self {
            doc: Document::with_capacity(capacity),
            history: History::new(),
            pending: Pending::new(),
            max_line,
        }
    }

    pub fn doc_len(&self) -> usize {
        self.doc.len()
    }

    /// `change(a1, a2)`: drains pending history, then installs `payload`
    /// (exactly `a2 - a1 + 1` lines) at `a1..=a2`.
    pub fn change<I>(&mut self, a1: usize, a2: usize, payload: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        self.pending.drain(&mut self.history, &mut self.doc);
        self.history.apply_change(&mut self.doc, a1, a2, self.max_line, payload)?;
        self.pending.note_fresh_mutation();
        Ok(())
    }

    /// `delete(a1, a2)`: drains pending history, then removes `a1..=a2`
    /// (clamped to the document, or recorded as a no-op if invalid).
    pub fn delete(&mut self, a1: usize, a2: usize) {
        self.pending.drain(&mut self.history, &mut self.doc);
        self.history.apply_delete(&mut self.doc, a1, a2);
        self.pending.note_fresh_mutation();
    }

    /// `print(a1, a2)`: drains pending history, then reads `a1..=a2`
    /// without mutating, emitting [`PrintItem::Missing`] for positions
    /// outside the document (including non-positive addresses).
    pub fn print(&mut self, a1: usize, a2: usize) -> Vec<PrintItem> {
        self.pending.drain(&mut self.history, &mut self.doc);
        let mut out = Vec::new();
        let mut i = a1;
        while i <= a2 {
            if i >= 1 && i <= self.doc.len() {
                out.push(PrintItem::Line(self.doc.get(i).clone()));
            } else {
                out.push(PrintItem::Missing);
            }
            i += 1;
        }
        out
    }

    /// `<n>u`: queues `n` undos (coalesced, not yet applied).
    pub fn queue_undo(&mut self, n: u64) {
        self.pending.on_u(n, self.history.undo_len(), self.history.redo_len());
    }

    /// `<n>r`: queues `n` redos (coalesced, not yet applied; ignored if
    /// nothing has been undone since the last fresh mutation).
    pub fn queue_redo(&mut self, n: u64) {
        self.pending.on_r(n, self.history.undo_len(), self.history.redo_len());
    }

    /// Called once at process exit, purely for diagnostics.
    pub fn note_quit(&self) {
        info!(doc_len = self.doc.len(), "quit");
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
