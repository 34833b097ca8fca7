use core::{borrow::Borrow, mem};
use std::{
    fmt,
    hash::{BuildHasher, Hash},
};

use hashbrown::hash_map::DefaultHashBuilder;

use crate::{
    cursor::{MapCursor, RawCursor},
    iter::{IntoIter, InverseIter, Iter, Keys, Values},
    utils::*,
    views::{EntrySet, Inverse, KeySet, ValueSet},
};

// A pair stored in the table. Every entry sits in exactly one by-key chain and exactly one
// by-value chain, both rooted in `BidiHashMap::slots`.
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) key_hash: u64,
    pub(crate) value_hash: u64,
    pub(crate) next_by_key: Option<usize>,
    pub(crate) next_by_value: Option<usize>,
}

// What a `put` did to the table.
pub(crate) enum PutOutcome<K, V> {
    // The key was already mapped to an equal value. The arguments are handed back.
    Unchanged { key: K, value: V },
    // The key existed and its value was replaced.
    Replaced { old_value: V, evicted_key: Option<K> },
    // A new pair was added.
    Inserted { evicted_key: Option<K> },
}

/// A hash map that supports lookups by key and by value.
///
/// [`BidiHashMap`] keeps keys and values in a strict one-to-one relation: no two pairs share a
/// key and no two pairs share a value. Putting a pair whose value is already mapped from another
/// key drops that other pair.
///
/// Unlike a pair of ordinary hash maps, all pairs live in a single table. The table is a flat
/// array of chain heads split into a by-key half (even slots) and a by-value half (odd slots).
/// Each pair is stored once and is linked into one chain of each half, so both directions of
/// lookup are O(1) on average while the map holds only as many entries as it has pairs.
///
/// Keys and values that should be able to express "nothing" are modelled with [`Option`]: a
/// `BidiHashMap<Option<&str>, Option<u64>>` distinguishes a key mapped to `None` from a key that
/// is not mapped at all.
///
/// The map can be looked at through several views ([`KeySet`], [`ValueSet`], [`EntrySet`] and
/// [`Inverse`]). None of them copies anything, so a change made through one is immediately seen
/// by all of them.
///
/// # Examples
/// ```rust
/// use bidi_map::BidiHashMap;
///
/// let mut map: BidiHashMap<&str, u64> = BidiHashMap::new();
/// map.put("a", 1);
/// map.put("b", 2);
///
/// // 1 is now owned by "c", so "a" is dropped
/// map.put("c", 1);
///
/// assert_eq!(map.get(&"a"), None);
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get_by_value(&1), Some(&"c"));
/// assert_eq!(map.get_by_value(&2), Some(&"b"));
/// ```
pub struct BidiHashMap<K, V, S = DefaultHashBuilder> {
    pub(crate) hash_builder: S,
    pub(crate) entries: Vec<Entry<K, V>>,
    // Length is `2 * modulus`. Slot `2 * i` heads by-key chain `i`, slot `2 * i + 1` heads
    // by-value chain `i`.
    pub(crate) slots: Vec<Option<usize>>,
    modulus: usize,
    max_size: usize,
    min_size: usize,
    // Bumped on every structural change. Cursors compare against it to fail fast.
    pub(crate) generation: u64,
}

impl<K, V> BidiHashMap<K, V, DefaultHashBuilder> {
    /// Creates an empty `BidiHashMap`.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    /// let map: BidiHashMap<u64, String> = BidiHashMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `BidiHashMap` that can hold at least `capacity` pairs before its table
    /// grows.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    /// let map: BidiHashMap<u64, String> = BidiHashMap::with_capacity(100);
    /// assert!(map.capacity() >= 100);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> BidiHashMap<K, V, S> {
    /// Creates an empty `BidiHashMap` that uses the given hasher for both keys and values.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty `BidiHashMap` that uses the given hasher and can hold at least
    /// `capacity` pairs before its table grows.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let mut map = BidiHashMap::with_capacity_and_hasher(10, RandomState::new());
    /// map.put(1, "1");
    /// assert_eq!(map.get_by_value(&"1"), Some(&1));
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let modulus = increase_modulus(INITIAL_CAPACITY, capacity);
        Self {
            hash_builder,
            entries: Vec::with_capacity(capacity),
            slots: vec![None; 2 * modulus],
            modulus,
            max_size: max_size(modulus),
            min_size: min_size(modulus),
            generation: 0,
        }
    }

    /// Returns a reference to the [`BuildHasher`] used by the map
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the number of pairs the map can hold before its table grows.
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Returns the number of pairs in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all pairs from the map. A table that has grown past its initial size is shrunk
    /// back.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    ///
    /// let mut map: BidiHashMap<u64, String> = (0..100).map(|i| (i, i.to_string())).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.get_by_value(&"1".to_string()), None);
    /// ```
    pub fn clear(&mut self) {
        self.touch();
        self.entries.clear();
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.shrink_check();
    }

    /// Returns an iterator over all pairs of the map, in no particular order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::pairs(self)
    }

    /// Returns an iterator over the keys of the map, in the same order as [`iter`].
    ///
    /// [`iter`]: BidiHashMap::iter
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::keys(self)
    }

    /// Returns an iterator over the values of the map, in the same order as [`iter`].
    ///
    /// [`iter`]: BidiHashMap::iter
    pub fn values(&self) -> Values<'_, K, V> {
        Values::values(self)
    }

    pub(crate) fn iter_inverse(&self) -> InverseIter<'_, K, V> {
        InverseIter::inverse(self)
    }

    /// Returns a fail-fast cursor over the keys of the map.
    ///
    /// The cursor does not borrow the map; every operation takes the map as an argument. If the
    /// map is changed by anything other than the cursor itself, the cursor's next operation
    /// fails with [`BidiError::ConcurrentModification`](crate::BidiError::ConcurrentModification).
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    ///
    /// let mut map: BidiHashMap<u64, String> = (0..10).map(|i| (i, i.to_string())).collect();
    /// let mut cursor = map.cursor();
    /// while let Some(key) = cursor.next(&map).unwrap() {
    ///     if key % 2 == 1 {
    ///         cursor.remove(&mut map).unwrap();
    ///     }
    /// }
    /// assert_eq!(map.len(), 5);
    /// ```
    pub fn cursor(&self) -> MapCursor {
        MapCursor::new(self)
    }

    /// A view of the keys of this map.
    pub fn key_set(&self) -> KeySet<&Self> {
        KeySet::new(self)
    }

    /// A view of the keys of this map that can also remove pairs.
    pub fn key_set_mut(&mut self) -> KeySet<&mut Self> {
        KeySet::new(self)
    }

    /// A view of the values of this map.
    pub fn value_set(&self) -> ValueSet<&Self> {
        ValueSet::new(self)
    }

    /// A view of the values of this map that can also remove pairs.
    pub fn value_set_mut(&mut self) -> ValueSet<&mut Self> {
        ValueSet::new(self)
    }

    /// A view of the pairs of this map.
    pub fn entry_set(&self) -> EntrySet<&Self> {
        EntrySet::new(self)
    }

    /// A view of the pairs of this map that can also remove pairs.
    pub fn entry_set_mut(&mut self) -> EntrySet<&mut Self> {
        EntrySet::new(self)
    }

    /// The value-to-key view of this map.
    ///
    /// Calling [`Inverse::inverse`] on the result hands back this very map.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    ///
    /// let mut map = BidiHashMap::new();
    /// map.put("one", 1);
    ///
    /// let inverse = map.inverse();
    /// assert_eq!(inverse.get(&1), Some(&"one"));
    /// assert!(std::ptr::eq(inverse.inverse(), &map));
    /// ```
    pub fn inverse(&self) -> Inverse<&Self> {
        Inverse::new(self)
    }

    /// The value-to-key view of this map, with mutation.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    ///
    /// let mut map = BidiHashMap::new();
    /// map.inverse_mut().put(1, "one");
    /// assert_eq!(map.get(&"one"), Some(&1));
    /// ```
    pub fn inverse_mut(&mut self) -> Inverse<&mut Self> {
        Inverse::new(self)
    }

    /// Retains only the pairs for which `f` returns true.
    ///
    /// Pairs are removed as the map is walked, and the table is only resized once the walk is
    /// done.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    ///
    /// let mut map: BidiHashMap<u64, String> = (0..100).map(|i| (i, i.to_string())).collect();
    /// map.retain(|k, _| k % 2 == 0);
    /// assert_eq!(map.len(), 50);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut cursor = RawCursor::new(self);
        while let Some(idx) = cursor.advance(self) {
            let entry = &self.entries[idx];
            if !f(&entry.key, &entry.value) {
                cursor.take(self, idx);
            }
        }
        self.shrink_check();
    }

    #[inline]
    pub(crate) fn key_slot(&self, hash: u64) -> usize {
        2 * (hash % self.modulus as u64) as usize
    }

    #[inline]
    pub(crate) fn value_slot(&self, hash: u64) -> usize {
        self.key_slot(hash) + 1
    }

    #[inline]
    pub(crate) fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn link_by_key(&mut self, idx: usize) {
        let slot = self.key_slot(self.entries[idx].key_hash);
        self.entries[idx].next_by_key = self.slots[slot];
        self.slots[slot] = Some(idx);
    }

    fn link_by_value(&mut self, idx: usize) {
        let slot = self.value_slot(self.entries[idx].value_hash);
        self.entries[idx].next_by_value = self.slots[slot];
        self.slots[slot] = Some(idx);
    }

    fn unlink_by_key(&mut self, idx: usize) {
        let slot = self.key_slot(self.entries[idx].key_hash);
        let next = self.entries[idx].next_by_key.take();
        if self.slots[slot] == Some(idx) {
            self.slots[slot] = next;
            return;
        }
        let mut walk = self.slots[slot];
        while let Some(i) = walk {
            if self.entries[i].next_by_key == Some(idx) {
                self.entries[i].next_by_key = next;
                return;
            }
            walk = self.entries[i].next_by_key;
        }
    }

    fn unlink_by_value(&mut self, idx: usize) {
        let slot = self.value_slot(self.entries[idx].value_hash);
        let next = self.entries[idx].next_by_value.take();
        if self.slots[slot] == Some(idx) {
            self.slots[slot] = next;
            return;
        }
        let mut walk = self.slots[slot];
        while let Some(i) = walk {
            if self.entries[i].next_by_value == Some(idx) {
                self.entries[i].next_by_value = next;
                return;
            }
            walk = self.entries[i].next_by_value;
        }
    }

    // Points every chain link that refers to `from` at `to` instead. The entry itself must
    // already sit at `to`.
    fn relocate(&mut self, from: usize, to: usize) {
        let slot = self.key_slot(self.entries[to].key_hash);
        if self.slots[slot] == Some(from) {
            self.slots[slot] = Some(to);
        } else {
            let mut walk = self.slots[slot];
            while let Some(i) = walk {
                if self.entries[i].next_by_key == Some(from) {
                    self.entries[i].next_by_key = Some(to);
                    break;
                }
                walk = self.entries[i].next_by_key;
            }
        }

        let slot = self.value_slot(self.entries[to].value_hash);
        if self.slots[slot] == Some(from) {
            self.slots[slot] = Some(to);
        } else {
            let mut walk = self.slots[slot];
            while let Some(i) = walk {
                if self.entries[i].next_by_value == Some(from) {
                    self.entries[i].next_by_value = Some(to);
                    break;
                }
                walk = self.entries[i].next_by_value;
            }
        }
    }

    /// Unlinks the entry at `idx` from both of its chains and takes it out of the arena.
    ///
    /// To keep the arena dense, the last entry is moved into the freed position. If that
    /// happened, the entry's former index is returned alongside the removed entry so that callers
    /// holding indices can follow it. Neither the generation nor the resize policy is touched.
    pub(crate) fn detach(&mut self, idx: usize) -> (Entry<K, V>, Option<usize>) {
        self.unlink_by_key(idx);
        self.unlink_by_value(idx);
        let last = self.entries.len() - 1;
        let entry = self.entries.swap_remove(idx);
        if idx == last {
            (entry, None)
        } else {
            self.relocate(last, idx);
            (entry, Some(last))
        }
    }

    pub(crate) fn remove_at(&mut self, idx: usize) -> (K, V) {
        self.touch();
        let (entry, _) = self.detach(idx);
        self.shrink_check();
        (entry.key, entry.value)
    }

    /// Swaps the value of the entry at `idx`, moving it to another by-value chain if needed.
    /// The caller is responsible for uniqueness of the new value.
    pub(crate) fn replace_value(&mut self, idx: usize, value: V, value_hash: u64) -> V {
        let relink = self.value_slot(self.entries[idx].value_hash) != self.value_slot(value_hash);
        if relink {
            self.unlink_by_value(idx);
        }
        let entry = &mut self.entries[idx];
        entry.value_hash = value_hash;
        let old_value = mem::replace(&mut entry.value, value);
        if relink {
            self.link_by_value(idx);
        }
        old_value
    }

    fn grow_check(&mut self) {
        if self.len() > self.max_size {
            self.rehash(increase_modulus(self.modulus, self.len()));
        }
    }

    pub(crate) fn shrink_check(&mut self) {
        if self.len() < self.min_size {
            self.rehash(decrease_modulus(self.modulus, self.len()));
        }
    }

    fn rehash(&mut self, new_modulus: usize) {
        if new_modulus == self.modulus {
            return;
        }
        log::debug!(
            "rehashing bidirectional map from modulus {} to {} with {} pairs",
            self.modulus,
            new_modulus,
            self.len()
        );
        let old_slots = mem::replace(&mut self.slots, vec![None; 2 * new_modulus]);
        self.modulus = new_modulus;
        self.max_size = max_size(new_modulus);
        self.min_size = min_size(new_modulus);
        self.touch();

        // Only the by-key half is walked; it reaches every entry exactly once.
        for head in old_slots.into_iter().step_by(2) {
            let mut walk = head;
            while let Some(idx) = walk {
                walk = self.entries[idx].next_by_key;
                self.link_by_key(idx);
                self.link_by_value(idx);
            }
        }
    }
}

impl<K, V, S> BidiHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher,
{
    /// Maps `key` to `value`.
    ///
    /// Any other pair that holds `value` is dropped first, so that `value` ends up mapped from
    /// `key` only. Returns the value `key` was mapped to before, or `None` if `key` was not in
    /// the map. If `key` already mapped to `value`, nothing changes and `value` is handed back.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    ///
    /// let mut map: BidiHashMap<u64, String> = BidiHashMap::new();
    /// assert_eq!(map.put(1, "one".to_string()), None);
    /// assert_eq!(map.put(1, "uno".to_string()), Some("one".to_string()));
    ///
    /// // "uno" moves from 1 to 2
    /// assert_eq!(map.put(2, "uno".to_string()), None);
    /// assert_eq!(map.get(&1), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.put_inner(key, value) {
            PutOutcome::Unchanged { value, .. } => Some(value),
            PutOutcome::Replaced { old_value, .. } => Some(old_value),
            PutOutcome::Inserted { .. } => None,
        }
    }

    pub(crate) fn put_inner(&mut self, key: K, value: V) -> PutOutcome<K, V> {
        let key_hash = make_hash::<K, S>(&self.hash_builder, &key);
        let value_hash = make_hash::<V, S>(&self.hash_builder, &value);

        match self.find_by_key(&key, key_hash) {
            Some(mut idx) => {
                let entry = &self.entries[idx];
                if entry.value_hash == value_hash && entry.value == value {
                    return PutOutcome::Unchanged { key, value };
                }
                self.touch();
                let evicted_key = match self.find_by_value(&value, value_hash) {
                    Some(other) => {
                        let (evicted, moved) = self.detach(other);
                        if moved == Some(idx) {
                            idx = other;
                        }
                        log::trace!("put evicted the pair that previously held the value");
                        Some(evicted.key)
                    }
                    None => None,
                };
                let old_value = self.replace_value(idx, value, value_hash);
                self.shrink_check();
                PutOutcome::Replaced {
                    old_value,
                    evicted_key,
                }
            }
            None => {
                self.touch();
                let evicted_key = match self.find_by_value(&value, value_hash) {
                    Some(other) => {
                        let (evicted, _) = self.detach(other);
                        log::trace!("put evicted the pair that previously held the value");
                        Some(evicted.key)
                    }
                    None => None,
                };
                let idx = self.entries.len();
                self.entries.push(Entry {
                    key,
                    value,
                    key_hash,
                    value_hash,
                    next_by_key: None,
                    next_by_value: None,
                });
                self.link_by_key(idx);
                self.link_by_value(idx);
                self.grow_check();
                PutOutcome::Inserted { evicted_key }
            }
        }
    }

    pub(crate) fn find_by_key<Q>(&self, key: &Q, hash: u64) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut walk = self.slots[self.key_slot(hash)];
        while let Some(idx) = walk {
            let entry = &self.entries[idx];
            if entry.key_hash == hash && key.eq(entry.key.borrow()) {
                return Some(idx);
            }
            walk = entry.next_by_key;
        }
        None
    }

    pub(crate) fn find_by_value<Q>(&self, value: &Q, hash: u64) -> Option<usize>
    where
        V: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut walk = self.slots[self.value_slot(hash)];
        while let Some(idx) = walk {
            let entry = &self.entries[idx];
            if entry.value_hash == hash && value.eq(entry.value.borrow()) {
                return Some(idx);
            }
            walk = entry.next_by_value;
        }
        None
    }

    fn lookup_key<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = make_hash::<Q, S>(&self.hash_builder, key);
        self.find_by_key(key, hash)
    }

    fn lookup_value<Q>(&self, value: &Q) -> Option<usize>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = make_hash::<Q, S>(&self.hash_builder, value);
        self.find_by_value(value, hash)
    }

    /// Gets the value `key` is mapped to.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    /// let mut map = BidiHashMap::new();
    /// map.put(1, "1");
    /// assert_eq!(map.get(&1), Some(&"1"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.lookup_key(key)?;
        Some(&self.entries[idx].value)
    }

    /// Gets the key that is mapped to `value`.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    /// let mut map = BidiHashMap::new();
    /// map.put(1, "1");
    /// assert_eq!(map.get_by_value(&"1"), Some(&1));
    /// assert_eq!(map.get_by_value(&"2"), None);
    /// ```
    pub fn get_by_value<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.lookup_value(value)?;
        Some(&self.entries[idx].key)
    }

    /// Gets the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = &self.entries[self.lookup_key(key)?];
        Some((&entry.key, &entry.value))
    }

    /// Returns true if `key` is mapped to some value.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup_key(key).is_some()
    }

    /// Returns true if some key is mapped to `value`.
    pub fn contains_value<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup_value(value).is_some()
    }

    /// Returns true if `key` is mapped to exactly `value`.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    /// let mut map = BidiHashMap::new();
    /// map.put(1, "1");
    /// assert!(map.contains_mapping(&1, &"1"));
    /// assert!(!map.contains_mapping(&1, &"2"));
    /// ```
    pub fn contains_mapping<Q, P>(&self, key: &Q, value: &P) -> bool
    where
        K: Borrow<Q>,
        V: Borrow<P>,
        Q: Hash + Eq + ?Sized,
        P: Eq + ?Sized,
    {
        match self.lookup_key(key) {
            Some(idx) => value.eq(self.entries[idx].value.borrow()),
            None => false,
        }
    }

    /// Removes `key` and the value it is mapped to. Returns that value.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    /// let mut map = BidiHashMap::new();
    /// map.put(1, "1");
    /// assert_eq!(map.remove(&1), Some("1"));
    /// assert_eq!(map.get_by_value(&"1"), None);
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and the value it is mapped to. Returns both.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.lookup_key(key)?;
        Some(self.remove_at(idx))
    }

    /// Removes `value` and the key that is mapped to it. Returns that key.
    ///
    /// # Examples
    /// ```rust
    /// use bidi_map::BidiHashMap;
    /// let mut map = BidiHashMap::new();
    /// map.put(1, "1");
    /// assert_eq!(map.remove_by_value(&"1"), Some(1));
    /// assert_eq!(map.get(&1), None);
    /// ```
    pub fn remove_by_value<Q>(&mut self, value: &Q) -> Option<K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.lookup_value(value)?;
        Some(self.remove_at(idx).0)
    }

    /// Removes the pair only if `key` is mapped to exactly `value`. Returns true if the pair was
    /// removed.
    pub fn remove_mapping<Q, P>(&mut self, key: &Q, value: &P) -> bool
    where
        K: Borrow<Q>,
        V: Borrow<P>,
        Q: Hash + Eq + ?Sized,
        P: Eq + ?Sized,
    {
        match self.lookup_key(key) {
            Some(idx) if value.eq(self.entries[idx].value.borrow()) => {
                self.remove_at(idx);
                true
            }
            _ => false,
        }
    }

    fn check_capacity(&mut self) {
        self.grow_check();
        self.shrink_check();
    }
}

impl<K, V, S> Clone for BidiHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            hash_builder: self.hash_builder.clone(),
            entries: self.entries.clone(),
            slots: self.slots.clone(),
            modulus: self.modulus,
            max_size: self.max_size,
            min_size: self.min_size,
            generation: 0,
        }
    }
}

impl<K, V, S> Default for BidiHashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V, S> fmt::Debug for BidiHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for BidiHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.contains_mapping(k, v))
    }
}

impl<K, V, S> Eq for BidiHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for BidiHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for BidiHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher + Default,
{
    /// Later pairs win whenever two pairs share a key or a value.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut digest = Self::with_capacity_and_hasher(iter.size_hint().0, S::default());
        digest.extend(iter);
        digest.check_capacity();
        digest
    }
}

impl<'a, K, V, S> IntoIterator for &'a BidiHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for BidiHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.entries)
    }
}
