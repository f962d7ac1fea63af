//! History Engine
//!
//! The pair of stacks that make `change`/`delete` reversible. Mirrors the
//! push/undo/redo/clear-redo shape of a conventional command-pattern
//! history, but stores a tagged `EditRecord` instead of a boxed trait
//! object, and additionally knows how to *construct* change/delete records
//! against a `Document` — that construction, and its exact reversal, is the
//! part worth getting right.

use tracing::trace;

use crate::document::Document;
use crate::line::make_line;
use crate::record::EditRecord;
use crate::Result;

/// Two LIFO stacks of edit records: `undo` and `redo`.
///
/// Invariant: pushing a new record (via [`History::apply_change`] or
/// [`History::apply_delete`]) always clears `redo` first, so the forward
/// history is discarded the moment a fresh mutation arrives after undos.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<EditRecord>,
    redo: Vec<EditRecord>,
}

/// A range `(a1, a2)` is valid when `a1 > 0 ∧ a2 ≥ a1 ∧ (a1 ≤ doc_len ∨ a1 == 1)`.
/// The `a1 == 1` exemption lets an empty document accept its first
/// change/delete starting at line 1.
pub fn is_valid_range(a1: usize, a2: usize, doc_len: usize) -> bool {
    a1 > 0 && a2 >= a1 && (a1 <= doc_len || a1 == 1)
}

/// Number of positions covered by `a1..=min(a2, doc_len)`, or 0 if that span
/// is empty (`a1` already past `doc_len`).
fn clamped_span(a1: usize, a2: usize, doc_len: usize) -> usize {
    let last = a2.min(doc_len);
    last.saturating_sub(a1).checked_add(1).filter(|_| last >= a1).unwrap_or(0)
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// `swap_top`: detaches the head of `from` and splices it onto `to`
    /// without touching the record's handle arrays, preserving reference
    /// sharing across undo/redo cycles.
    fn swap_top(from: &mut Vec<EditRecord>, to: &mut Vec<EditRecord>) {
        if let Some(record) = from.pop() {
            to.push(record);
        }
    }

    /// Clears the redo stack. Called whenever a fresh mutation arrives.
    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    /// Applies a `change` command against `doc`, installing lines read from
    /// `payload` at `a1..=a2`, and pushes the resulting record onto the undo
    /// stack. Clears the redo stack.
    ///
    /// `payload` must yield exactly `a2 - a1 + 1` byte strings; the wire
    /// layer is responsible for reading up to the `.` terminator before
    /// calling this. `max_line` is the configured line-length ceiling,
    /// enforced here rather than assumed to match [`crate::line::MAX_LINE`].
    pub fn apply_change<I>(&mut self, doc: &mut Document, a1: usize, a2: usize, max_line: usize, payload: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut old = Vec::new();
        let mut new = Vec::new();

        for (j, bytes) in payload.into_iter().enumerate() {
            let pos = a1 + j;
            let handle = make_line(&bytes, max_line)?;
            if pos <= doc.len() {
                old.push(doc.replace(pos, handle.clone()));
            } else {
                doc.append(handle.clone());
            }
            new.push(handle);
        }

        trace!(a1, a2, installed = new.len(), "applied change");
        self.undo.push(EditRecord::change_record(a1, a2, old, new));
        self.clear_redo();
        Ok(())
    }

    /// Applies a `delete` command against `doc` and pushes the resulting
    /// record onto the undo stack. Clears the redo stack. An invalid range
    /// still produces a record (with empty `old`) so the undo counter stays
    /// aligned with the number of mutating commands issued.
    pub fn apply_delete(&mut self, doc: &mut Document, a1: usize, a2: usize) {
        if !is_valid_range(a1, a2, doc.len()) {
            trace!(a1, a2, "delete range invalid, recording no-op");
            self.undo.push(EditRecord::delete_record(a1, a2, Vec::new()));
            self.clear_redo();
            return;
        }

        let m = clamped_span(a1, a2, doc.len());
        let mut old = Vec::with_capacity(m);
        for _ in 0..m {
            old.push(doc.remove(a1));
        }

        trace!(a1, a2, removed = old.len(), "applied delete");
        self.undo.push(EditRecord::delete_record(a1, a2, old));
        self.clear_redo();
    }

    /// Undoes the top undo-stack record against `doc`, moving it to the
    /// redo stack. No-op (returns `false`) if the undo stack is empty.
    pub fn undo_one(&mut self, doc: &mut Document) -> bool {
        let Some(record) = self.undo.last() else {
            return false;
        };
        let (a1, a2) = (record.a1(), record.a2());

        match record {
            EditRecord::Change { a1, old, new, .. } => {
                let a1 = *a1;
                let o = old.len();
                let k = new.len();
                for j in 0..o {
                    doc.replace(a1 + j, old[j].clone());
                }
                for _ in o..k {
                    doc.remove(doc.len());
                }
            }
            EditRecord::Delete { a1, old, .. } => {
                if !old.is_empty() {
                    let a1 = *a1;
                    if a1 > doc.len() {
                        for handle in old {
                            doc.append(handle.clone());
                        }
                    } else {
                        for (j, handle) in old.iter().enumerate() {
                            doc.insert(a1 + j, handle.clone());
                        }
                    }
                }
            }
        }

        trace!(a1, a2, undo_len = self.undo.len(), "undo applied");
        Self::swap_top(&mut self.undo, &mut self.redo);
        true
    }

    /// Redoes the top redo-stack record against `doc`, moving it back to the
    /// undo stack. No-op (returns `false`) if the redo stack is empty.
    pub fn redo_one(&mut self, doc: &mut Document) -> bool {
        let Some(record) = self.redo.last_mut() else {
            return false;
        };
        let (a1, a2) = (record.a1(), record.a2());

        match record {
            EditRecord::Change { a1, new, .. } => {
                let a1 = *a1;
                for (j, handle) in new.iter().enumerate() {
                    let pos = a1 + j;
                    if pos <= doc.len() {
                        doc.replace(pos, handle.clone());
                    } else {
                        doc.append(handle.clone());
                    }
                }
            }
            EditRecord::Delete { a1, a2, old } => {
                let (a1v, a2v) = (*a1, *a2);
                if is_valid_range(a1v, a2v, doc.len()) {
                    let m = clamped_span(a1v, a2v, doc.len());
                    old.clear();
                    for _ in 0..m {
                        old.push(doc.remove(a1v));
                    }
                }
            }
        }

        trace!(a1, a2, redo_len = self.redo.len(), "redo applied");
        Self::swap_top(&mut self.redo, &mut self.undo);
        true
    }
}
