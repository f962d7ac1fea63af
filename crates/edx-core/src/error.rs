//! Error Types
//!
//! Typed errors for the history engine. Out-of-range addresses are data, not
//! exceptions (see `history` and `pending`); these variants cover only the
//! conditions treated as fatal.

use thiserror::Error;

/// Core editor errors
#[derive(Error, Debug)]
pub enum EdError {
    #[error("line of {len} bytes exceeds the maximum of {max} bytes")]
    LineTooLong { len: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EdError>;
