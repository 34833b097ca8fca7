//! A bidirectional hash map.
//!
//! [`BidiHashMap`] maps keys to values one-to-one and answers lookups in both directions.
//! All pairs are kept in a single table that is chained by key and by value at once. The map
//! can be seen through set views of its keys, values and pairs, and through an [`Inverse`]
//! view that swaps the roles of keys and values. Changes made through any view show up in all
//! of them.
//!
//! Iterators borrow the map. For walking the map while changing it, use one of the fail-fast
//! cursors, such as [`MapCursor`].

#![deny(unused_imports, missing_debug_implementations, unreachable_pub)]
#![cfg_attr(doc, deny(missing_docs, rustdoc::broken_intra_doc_links))]
#![warn(rust_2018_idioms)]

/// The map itself
pub mod bidi_hash_map;
pub use crate::bidi_hash_map::*;

/// Fail-fast cursors over the map
pub mod cursor;
pub use crate::cursor::*;

/// Errors raised by cursors
pub mod error;
pub use crate::error::*;

/// Borrowing and owning iterators
pub mod iter;
pub use crate::iter::*;

/// Key, value, pair and inverse views
pub mod views;
pub use crate::views::*;

/// Various helpful functions
pub(crate) mod utils;
pub use crate::utils::{EXPAND_FILL_FACTOR, INITIAL_CAPACITY, SHRINK_FILL_FACTOR};

#[cfg(feature = "serde")]
mod serde;
