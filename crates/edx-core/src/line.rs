//! Line Storage
//!
//! Lines are immutable byte strings shared by handle: the same body can be
//! referenced at once by the document and by any number of history records,
//! without copying. Handles are cheap `Rc` clones; a body is freed the
//! instant its last handle is dropped, which happens naturally whenever a
//! document position is overwritten or an `EditRecord` is popped off both
//! stacks.

use std::rc::Rc;

use crate::error::{EdError, Result};

/// Default maximum byte length of a single line body, used when no
/// configured limit is supplied. `limits.max_line_bytes` overrides this at
/// the `Editor` level.
pub const MAX_LINE: usize = 1024;

/// A cheaply-cloneable reference to an immutable line body.
pub type LineHandle = Rc<[u8]>;

/// Allocates a new line handle from `bytes`.
///
/// Rejects bodies longer than `max_line`; the wire layer treats this the
/// same as a malformed command: fatal.
pub fn make_line(bytes: &[u8], max_line: usize) -> Result<LineHandle> {
    if bytes.len() > max_line {
        return Err(EdError::LineTooLong {
            len: bytes.len(),
            max: max_line,
        });
    }
    Ok(Rc::from(bytes))
}

/// Returns the byte body referenced by `handle`.
pub fn body(handle: &LineHandle) -> &[u8] {
    handle.as_ref()
}
