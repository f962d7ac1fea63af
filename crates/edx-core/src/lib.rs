//! edx-core — History Engine
//!
//! The in-memory line document and its reversible history: line storage
//! (C1), the ordered line buffer (C2), edit records (C3), the two-stack
//! history engine (C4), and the pending-displacement controller (C5) that
//! coalesces `undo`/`redo` tokens. [`editor::Editor`] bundles the three into
//! the context a command dispatcher drives.
//!
//! Wire parsing and process I/O are not part of this crate; see the `edx`
//! binary.

pub mod document;
pub mod editor;
pub mod error;
pub mod history;
pub mod line;
pub mod pending;
pub mod record;

pub use document::Document;
pub use editor::{Editor, PrintItem};
pub use error::{EdError, Result};
pub use history::{is_valid_range, History};
pub use line::{body, make_line, LineHandle, MAX_LINE};
pub use pending::{Pending, PendingState};
pub use record::EditRecord;
