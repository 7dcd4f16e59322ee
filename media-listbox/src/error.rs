//! Error types.
//!
//! Interaction never fails: unknown values, boundary movement and disabled
//! targets are no-ops. Errors only come from parsing host input and from the
//! timer channel.

use thiserror::Error;

/// A DOM-style key name that can't be mapped to a [`crate::Key`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized key name: {0:?}")]
pub struct ParseKeyError(pub String);

/// An attribute name the listbox doesn't observe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown listbox attribute: {0:?}")]
pub struct ParseAttributeError(pub String);

/// Errors from the tokio decay timer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// Every timer sender was dropped.
    #[error("decay timer channel closed")]
    Closed,
}
