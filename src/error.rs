use thiserror::Error;

/// Errors raised by the cursors of a [`BidiHashMap`](crate::BidiHashMap).
///
/// All of these are contract violations on the caller's side. None of them leave the map in a
/// partially modified state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidiError {
    /// The map was structurally modified by something other than the cursor since the cursor
    /// was created.
    #[error("the map was modified outside of this cursor")]
    ConcurrentModification,

    /// The new value is already mapped from a different key.
    #[error("the value is already mapped from a different key")]
    DuplicateValue,

    /// The cursor has no current pair, either because `next` was never called or because the
    /// current pair was already removed.
    #[error("the cursor is not positioned on a pair")]
    IllegalState,

    /// The operation is not available through this cursor.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
