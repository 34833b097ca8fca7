//! Fail-fast cursors over a [`BidiHashMap`].
//!
//! A cursor does not hold on to the map. Every operation takes the map it walks as an argument,
//! which lets the caller change the map between two cursor steps. The cursor notices such a
//! change and refuses to continue with [`BidiError::ConcurrentModification`]. Changes made
//! through the cursor itself (`remove` and `set_value`) keep it valid.
//!
//! Passing a cursor a different map than the one it was created from is a logic error. The
//! outcome is unspecified and may be a panic.

use std::hash::{BuildHasher, Hash};

use crate::{bidi_hash_map::BidiHashMap, error::BidiError, iter::step, utils::make_hash};

// The traversal state shared by all cursors.
//
// `walk` is the entry the traversal stands on and `has_value` says whether that entry is still
// waiting to be handed out by `next`. `current` is the entry handed out last, which is the only
// one `remove` and `set_value` act on.
#[derive(Debug, Clone)]
pub(crate) struct RawCursor {
    next_slot: usize,
    walk: Option<usize>,
    has_value: bool,
    current: Option<usize>,
    expected_generation: u64,
}

impl RawCursor {
    pub(crate) fn new<K, V, S>(map: &BidiHashMap<K, V, S>) -> Self {
        Self {
            next_slot: 0,
            walk: None,
            has_value: false,
            current: None,
            expected_generation: map.generation,
        }
    }

    fn check<K, V, S>(&self, map: &BidiHashMap<K, V, S>) -> Result<(), BidiError> {
        if map.generation == self.expected_generation {
            Ok(())
        } else {
            Err(BidiError::ConcurrentModification)
        }
    }

    pub(crate) fn has_next<K, V, S>(
        &mut self,
        map: &BidiHashMap<K, V, S>,
    ) -> Result<bool, BidiError> {
        self.check(map)?;
        Ok(self.peek(map))
    }

    fn peek<K, V, S>(&mut self, map: &BidiHashMap<K, V, S>) -> bool {
        if !self.has_value {
            self.walk = step(&map.slots, &map.entries, &mut self.next_slot, self.walk);
            self.has_value = self.walk.is_some();
        }
        self.has_value
    }

    pub(crate) fn next<K, V, S>(
        &mut self,
        map: &BidiHashMap<K, V, S>,
    ) -> Result<Option<usize>, BidiError> {
        self.check(map)?;
        Ok(self.advance(map))
    }

    // `next` without the generation check, for walks the map itself drives.
    pub(crate) fn advance<K, V, S>(&mut self, map: &BidiHashMap<K, V, S>) -> Option<usize> {
        if !self.peek(map) {
            return None;
        }
        self.current = self.walk;
        self.has_value = false;
        self.current
    }

    pub(crate) fn current<K, V, S>(&self, map: &BidiHashMap<K, V, S>) -> Result<usize, BidiError> {
        self.check(map)?;
        self.current.ok_or(BidiError::IllegalState)
    }

    pub(crate) fn remove<K, V, S>(
        &mut self,
        map: &mut BidiHashMap<K, V, S>,
    ) -> Result<(K, V), BidiError> {
        let current = self.current(map)?;
        Ok(self.take(map, current))
    }

    // Removes the entry at `current`, which must be the entry last handed out by `advance`.
    pub(crate) fn take<K, V, S>(
        &mut self,
        map: &mut BidiHashMap<K, V, S>,
        current: usize,
    ) -> (K, V) {
        let next_by_key = map.entries[current].next_by_key;

        // No resize here, a rehash would reorder the chains under the cursor.
        let (entry, moved) = map.detach(current);
        map.touch();
        self.expected_generation = map.generation;
        self.current = None;

        // `detach` may have moved the last entry into the freed index.
        let follow = |idx: Option<usize>| match (idx, moved) {
            (Some(idx), Some(from)) if idx == from => Some(current),
            _ => idx,
        };
        if self.has_value {
            // `has_next` already moved on, keep that position.
            self.walk = follow(self.walk);
        } else {
            // Resume right behind the removed entry.
            self.walk = follow(next_by_key);
            self.has_value = self.walk.is_some();
        }
        (entry.key, entry.value)
    }

    pub(crate) fn set_value<K, V, S>(
        &mut self,
        map: &mut BidiHashMap<K, V, S>,
        value: V,
    ) -> Result<V, BidiError>
    where
        K: Eq + Hash,
        V: Eq + Hash,
        S: BuildHasher,
    {
        let current = self.current(map)?;
        let value_hash = make_hash::<V, S>(&map.hash_builder, &value);
        let entry = &map.entries[current];
        if entry.value_hash == value_hash && entry.value == value {
            return Ok(value);
        }
        if map.find_by_value(&value, value_hash).is_some() {
            return Err(BidiError::DuplicateValue);
        }
        let old_value = map.replace_value(current, value, value_hash);
        map.touch();
        self.expected_generation = map.generation;
        Ok(old_value)
    }
}

/// A cursor over the keys of a [`BidiHashMap`] that can read, replace, and remove the value of
/// the pair it stands on.
///
/// Returned by [`BidiHashMap::cursor`] and [`KeySet::cursor`](crate::KeySet::cursor).
///
/// # Examples
/// ```rust
/// use bidi_map::{BidiError, BidiHashMap};
///
/// let mut map: BidiHashMap<u64, String> = (0..3).map(|i| (i, i.to_string())).collect();
/// let mut cursor = map.cursor();
///
/// // Nothing has been handed out yet
/// assert_eq!(cursor.remove(&mut map), Err(BidiError::IllegalState));
///
/// while let Some(&key) = cursor.next(&map)? {
///     let old = cursor.set_value(&mut map, format!("#{key}"))?;
///     assert_eq!(old, key.to_string());
/// }
/// assert_eq!(map.get(&1), Some(&"#1".to_string()));
/// # Ok::<(), BidiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MapCursor {
    raw: RawCursor,
}

impl MapCursor {
    pub(crate) fn new<K, V, S>(map: &BidiHashMap<K, V, S>) -> Self {
        Self {
            raw: RawCursor::new(map),
        }
    }

    /// Returns true if a call to [`next`](MapCursor::next) would yield a key.
    pub fn has_next<K, V, S>(&mut self, map: &BidiHashMap<K, V, S>) -> Result<bool, BidiError> {
        self.raw.has_next(map)
    }

    /// Moves to the next pair and returns its key, or `None` once all pairs have been visited.
    pub fn next<'m, K, V, S>(
        &mut self,
        map: &'m BidiHashMap<K, V, S>,
    ) -> Result<Option<&'m K>, BidiError> {
        Ok(self.raw.next(map)?.map(|idx| &map.entries[idx].key))
    }

    /// The key of the pair last returned by [`next`](MapCursor::next).
    pub fn key<'m, K, V, S>(&self, map: &'m BidiHashMap<K, V, S>) -> Result<&'m K, BidiError> {
        Ok(&map.entries[self.raw.current(map)?].key)
    }

    /// The value of the pair last returned by [`next`](MapCursor::next).
    pub fn value<'m, K, V, S>(&self, map: &'m BidiHashMap<K, V, S>) -> Result<&'m V, BidiError> {
        Ok(&map.entries[self.raw.current(map)?].value)
    }

    /// Replaces the value of the current pair and returns the old one.
    ///
    /// Fails with [`BidiError::DuplicateValue`] if `value` is already mapped from another key, in
    /// which case the map is left untouched.
    pub fn set_value<K, V, S>(
        &mut self,
        map: &mut BidiHashMap<K, V, S>,
        value: V,
    ) -> Result<V, BidiError>
    where
        K: Eq + Hash,
        V: Eq + Hash,
        S: BuildHasher,
    {
        self.raw.set_value(map, value)
    }

    /// Removes the current pair from the map and returns it.
    pub fn remove<K, V, S>(&mut self, map: &mut BidiHashMap<K, V, S>) -> Result<(K, V), BidiError> {
        self.raw.remove(map)
    }
}

/// A cursor over the values of a [`BidiHashMap`].
///
/// Returned by [`ValueSet::cursor`](crate::ValueSet::cursor).
#[derive(Debug, Clone)]
pub struct ValueCursor {
    raw: RawCursor,
}

impl ValueCursor {
    pub(crate) fn new<K, V, S>(map: &BidiHashMap<K, V, S>) -> Self {
        Self {
            raw: RawCursor::new(map),
        }
    }

    /// Returns true if a call to [`next`](ValueCursor::next) would yield a value.
    pub fn has_next<K, V, S>(&mut self, map: &BidiHashMap<K, V, S>) -> Result<bool, BidiError> {
        self.raw.has_next(map)
    }

    /// Moves to the next pair and returns its value.
    pub fn next<'m, K, V, S>(
        &mut self,
        map: &'m BidiHashMap<K, V, S>,
    ) -> Result<Option<&'m V>, BidiError> {
        Ok(self.raw.next(map)?.map(|idx| &map.entries[idx].value))
    }

    /// Removes the current pair from the map and returns it.
    pub fn remove<K, V, S>(&mut self, map: &mut BidiHashMap<K, V, S>) -> Result<(K, V), BidiError> {
        self.raw.remove(map)
    }
}

/// A cursor over the `(key, value)` pairs of a [`BidiHashMap`].
///
/// Returned by [`EntrySet::cursor`](crate::EntrySet::cursor).
#[derive(Debug, Clone)]
pub struct EntryCursor {
    raw: RawCursor,
}

impl EntryCursor {
    pub(crate) fn new<K, V, S>(map: &BidiHashMap<K, V, S>) -> Self {
        Self {
            raw: RawCursor::new(map),
        }
    }

    /// Returns true if a call to [`next`](EntryCursor::next) would yield a pair.
    pub fn has_next<K, V, S>(&mut self, map: &BidiHashMap<K, V, S>) -> Result<bool, BidiError> {
        self.raw.has_next(map)
    }

    /// Moves to the next pair and returns it.
    pub fn next<'m, K, V, S>(
        &mut self,
        map: &'m BidiHashMap<K, V, S>,
    ) -> Result<Option<(&'m K, &'m V)>, BidiError> {
        Ok(self.raw.next(map)?.map(|idx| {
            let entry = &map.entries[idx];
            (&entry.key, &entry.value)
        }))
    }

    /// Replaces the value of the current pair, see [`MapCursor::set_value`].
    pub fn set_value<K, V, S>(
        &mut self,
        map: &mut BidiHashMap<K, V, S>,
        value: V,
    ) -> Result<V, BidiError>
    where
        K: Eq + Hash,
        V: Eq + Hash,
        S: BuildHasher,
    {
        self.raw.set_value(map, value)
    }

    /// Removes the current pair from the map and returns it.
    pub fn remove<K, V, S>(&mut self, map: &mut BidiHashMap<K, V, S>) -> Result<(K, V), BidiError> {
        self.raw.remove(map)
    }
}

/// A cursor over an [`Inverse`](crate::Inverse) view: it yields the values of the underlying
/// map as keys.
///
/// The pairs are visited in the same order as by a [`MapCursor`]. Replacing the current pair's
/// key is not supported here; use [`MapCursor::set_value`] on the forward map instead.
#[derive(Debug, Clone)]
pub struct InverseCursor {
    raw: RawCursor,
}

impl InverseCursor {
    pub(crate) fn new<K, V, S>(map: &BidiHashMap<K, V, S>) -> Self {
        Self {
            raw: RawCursor::new(map),
        }
    }

    /// Returns true if a call to [`next`](InverseCursor::next) would yield a value.
    pub fn has_next<K, V, S>(&mut self, map: &BidiHashMap<K, V, S>) -> Result<bool, BidiError> {
        self.raw.has_next(map)
    }

    /// Moves to the next pair and returns its value, which is the key of the inverse view.
    pub fn next<'m, K, V, S>(
        &mut self,
        map: &'m BidiHashMap<K, V, S>,
    ) -> Result<Option<&'m V>, BidiError> {
        Ok(self.raw.next(map)?.map(|idx| &map.entries[idx].value))
    }

    /// The inverse key (the map's value) of the current pair.
    pub fn key<'m, K, V, S>(&self, map: &'m BidiHashMap<K, V, S>) -> Result<&'m V, BidiError> {
        Ok(&map.entries[self.raw.current(map)?].value)
    }

    /// The inverse value (the map's key) of the current pair.
    pub fn value<'m, K, V, S>(&self, map: &'m BidiHashMap<K, V, S>) -> Result<&'m K, BidiError> {
        Ok(&map.entries[self.raw.current(map)?].key)
    }

    /// Always fails with [`BidiError::Unsupported`].
    pub fn set_value<K, V, S>(
        &mut self,
        _map: &mut BidiHashMap<K, V, S>,
        _key: K,
    ) -> Result<K, BidiError> {
        Err(BidiError::Unsupported(
            "set_value on an inverse cursor, use the forward map cursor",
        ))
    }

    /// Removes the current pair from the map and returns it as `(value, key)`.
    pub fn remove<K, V, S>(&mut self, map: &mut BidiHashMap<K, V, S>) -> Result<(V, K), BidiError> {
        let (key, value) = self.raw.remove(map)?;
        Ok((value, key))
    }
}
