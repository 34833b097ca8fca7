//! Views of a [`BidiHashMap`].
//!
//! Every view wraps a handle to the map, either `&BidiHashMap` for reading or
//! `&mut BidiHashMap` for reading and removing. Views hold no state of their own and go to the
//! map on every call, so they always agree with each other and with the map.

use core::borrow::Borrow;
use std::{
    fmt,
    hash::{BuildHasher, Hash},
    ops::{Deref, DerefMut},
};

use crate::{
    bidi_hash_map::{BidiHashMap, PutOutcome},
    cursor::{EntryCursor, InverseCursor, MapCursor, ValueCursor},
    iter::{InverseIter, Iter, Keys, Values},
};

/// The keys of a [`BidiHashMap`], seen as a set.
///
/// # Examples
/// ```rust
/// use bidi_map::BidiHashMap;
///
/// let mut map: BidiHashMap<u64, String> = (0..5).map(|i| (i, i.to_string())).collect();
///
/// let mut keys = map.key_set_mut();
/// assert!(keys.contains(&3));
/// assert!(keys.remove(&3));
/// assert!(!keys.remove(&3));
/// assert_eq!(keys.len(), 4);
///
/// assert_eq!(map.get_by_value(&"3".to_string()), None);
/// ```
pub struct KeySet<M> {
    map: M,
}

impl<M> KeySet<M> {
    pub(crate) fn new(map: M) -> Self {
        Self { map }
    }
}

impl<M, K, V, S> KeySet<M>
where
    M: Deref<Target = BidiHashMap<K, V, S>>,
{
    /// The number of keys, which is the number of pairs in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns true if `key` is mapped to some value.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Eq + Hash,
        V: Eq + Hash,
        S: BuildHasher,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// An iterator over the keys.
    pub fn iter<'a>(&'a self) -> Keys<'a, K, V>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        self.map.keys()
    }

    /// A fail-fast cursor over the keys.
    pub fn cursor(&self) -> MapCursor {
        self.map.cursor()
    }
}

impl<M, K, V, S> KeySet<M>
where
    M: DerefMut<Target = BidiHashMap<K, V, S>>,
{
    /// Removes `key` and its value from the map. Returns true if `key` was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q> + Eq + Hash,
        V: Eq + Hash,
        S: BuildHasher,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key).is_some()
    }

    /// Removes all pairs from the map.
    pub fn clear(&mut self) {
        self.map.clear()
    }
}

impl<M, K, V, S> fmt::Debug for KeySet<M>
where
    M: Deref<Target = BidiHashMap<K, V, S>>,
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The values of a [`BidiHashMap`], seen as a set.
///
/// Since every value is mapped from exactly one key, values are as unique as keys.
pub struct ValueSet<M> {
    map: M,
}

impl<M> ValueSet<M> {
    pub(crate) fn new(map: M) -> Self {
        Self { map }
    }
}

impl<M, K, V, S> ValueSet<M>
where
    M: Deref<Target = BidiHashMap<K, V, S>>,
{
    /// The number of values, which is the number of pairs in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns true if some key is mapped to `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        K: Eq + Hash,
        V: Borrow<Q> + Eq + Hash,
        S: BuildHasher,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_value(value)
    }

    /// An iterator over the values.
    pub fn iter<'a>(&'a self) -> Values<'a, K, V>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        self.map.values()
    }

    /// A fail-fast cursor over the values.
    pub fn cursor(&self) -> ValueCursor {
        ValueCursor::new(&*self.map)
    }
}

impl<M, K, V, S> ValueSet<M>
where
    M: DerefMut<Target = BidiHashMap<K, V, S>>,
{
    /// Removes `value` and its key from the map. Returns true if `value` was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        K: Eq + Hash,
        V: Borrow<Q> + Eq + Hash,
        S: BuildHasher,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove_by_value(value).is_some()
    }

    /// Removes all pairs from the map.
    pub fn clear(&mut self) {
        self.map.clear()
    }
}

impl<M, K, V, S> fmt::Debug for ValueSet<M>
where
    M: Deref<Target = BidiHashMap<K, V, S>>,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The `(key, value)` pairs of a [`BidiHashMap`], seen as a set.
pub struct EntrySet<M> {
    map: M,
}

impl<M> EntrySet<M> {
    pub(crate) fn new(map: M) -> Self {
        Self { map }
    }
}

impl<M, K, V, S> EntrySet<M>
where
    M: Deref<Target = BidiHashMap<K, V, S>>,
{
    /// The number of pairs in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns true if `key` is mapped to exactly `value`.
    pub fn contains<Q, P>(&self, key: &Q, value: &P) -> bool
    where
        K: Borrow<Q> + Eq + Hash,
        V: Borrow<P> + Eq + Hash,
        S: BuildHasher,
        Q: Hash + Eq + ?Sized,
        P: Eq + ?Sized,
    {
        self.map.contains_mapping(key, value)
    }

    /// An iterator over the pairs.
    pub fn iter<'a>(&'a self) -> Iter<'a, K, V>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        self.map.iter()
    }

    /// A fail-fast cursor over the pairs.
    pub fn cursor(&self) -> EntryCursor {
        EntryCursor::new(&*self.map)
    }
}

impl<M, K, V, S> EntrySet<M>
where
    M: DerefMut<Target = BidiHashMap<K, V, S>>,
{
    /// Removes the pair if `key` is mapped to exactly `value`. Returns true if it was removed.
    pub fn remove<Q, P>(&mut self, key: &Q, value: &P) -> bool
    where
        K: Borrow<Q> + Eq + Hash,
        V: Borrow<P> + Eq + Hash,
        S: BuildHasher,
        Q: Hash + Eq + ?Sized,
        P: Eq + ?Sized,
    {
        self.map.remove_mapping(key, value)
    }

    /// Removes all pairs from the map.
    pub fn clear(&mut self) {
        self.map.clear()
    }
}

impl<M, K, V, S> fmt::Debug for EntrySet<M>
where
    M: Deref<Target = BidiHashMap<K, V, S>>,
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A [`BidiHashMap`] with the roles of keys and values swapped.
///
/// Every operation is carried out on the underlying map: `get` looks up by value, `put(v, k)`
/// puts `(k, v)`, and so on. [`inverse`](Inverse::inverse) hands back the map handle the view
/// was made from rather than wrapping it again.
///
/// # Examples
/// ```rust
/// use bidi_map::BidiHashMap;
///
/// let mut map: BidiHashMap<&str, u64> = BidiHashMap::new();
/// map.put("one", 1);
///
/// let mut inverse = map.inverse_mut();
/// assert_eq!(inverse.get(&1), Some(&"one"));
///
/// // 1 moves over to "uno"
/// assert_eq!(inverse.put(1, "uno"), Some("one"));
/// assert_eq!(inverse.put(2, "two"), None);
///
/// let map = inverse.inverse();
/// assert_eq!(map.get(&"one"), None);
/// assert_eq!(map.get(&"uno"), Some(&1));
/// assert_eq!(map.get_by_value(&2), Some(&"two"));
/// ```
pub struct Inverse<M> {
    map: M,
}

impl<M> Inverse<M> {
    pub(crate) fn new(map: M) -> Self {
        Self { map }
    }

    /// Returns the handle of the map this view was made from.
    pub fn inverse(self) -> M {
        self.map
    }
}

impl<M, K, V, S> Inverse<M>
where
    M: Deref<Target = BidiHashMap<K, V, S>>,
{
    /// The number of pairs in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Gets the key of the map that `value` is mapped from.
    pub fn get<'a, Q>(&'a self, value: &Q) -> Option<&'a K>
    where
        K: Eq + Hash,
        V: Borrow<Q> + Eq + Hash + 'a,
        S: BuildHasher + 'a,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get_by_value(value)
    }

    /// Gets the value of the map that `key` is mapped to.
    pub fn get_by_value<'a, Q>(&'a self, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q> + Eq + Hash + 'a,
        V: Eq + Hash,
        S: BuildHasher + 'a,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    /// Returns true if the map contains `value`.
    pub fn contains_key<Q>(&self, value: &Q) -> bool
    where
        K: Eq + Hash,
        V: Borrow<Q> + Eq + Hash,
        S: BuildHasher,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_value(value)
    }

    /// Returns true if the map contains `key`.
    pub fn contains_value<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Eq + Hash,
        V: Eq + Hash,
        S: BuildHasher,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns true if `value` is mapped from exactly `key`.
    pub fn contains_entry<Q, P>(&self, value: &P, key: &Q) -> bool
    where
        K: Borrow<Q> + Eq + Hash,
        V: Borrow<P> + Eq + Hash,
        S: BuildHasher,
        Q: Hash + Eq + ?Sized,
        P: Eq + ?Sized,
    {
        self.map.contains_mapping(key, value)
    }

    /// An iterator over `(value, key)` pairs.
    pub fn iter<'a>(&'a self) -> InverseIter<'a, K, V>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        self.map.iter_inverse()
    }

    /// An iterator over the keys of this view, which are the values of the map.
    pub fn keys<'a>(&'a self) -> Values<'a, K, V>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        self.map.values()
    }

    /// An iterator over the values of this view, which are the keys of the map.
    pub fn values<'a>(&'a self) -> Keys<'a, K, V>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        self.map.keys()
    }

    /// The keys of this view as a set.
    pub fn key_set(&self) -> ValueSet<&BidiHashMap<K, V, S>> {
        self.map.value_set()
    }

    /// The values of this view as a set.
    pub fn value_set(&self) -> KeySet<&BidiHashMap<K, V, S>> {
        self.map.key_set()
    }

    /// A fail-fast cursor over the keys of this view. The cursor cannot replace values.
    pub fn cursor(&self) -> InverseCursor {
        InverseCursor::new(&*self.map)
    }
}

impl<M, K, V, S> Inverse<M>
where
    M: DerefMut<Target = BidiHashMap<K, V, S>>,
    K: Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher,
{
    /// Maps `value` to `key` in this view, which puts `(key, value)` into the map.
    ///
    /// Returns the key `value` was mapped from before, if any.
    pub fn put(&mut self, value: V, key: K) -> Option<K> {
        match self.map.put_inner(key, value) {
            PutOutcome::Unchanged { key, .. } => Some(key),
            PutOutcome::Replaced { evicted_key, .. } | PutOutcome::Inserted { evicted_key } => {
                evicted_key
            }
        }
    }

    /// Removes `value` and its key from the map. Returns the key.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove_by_value(value)
    }

    /// Removes `key` and its value from the map. Returns the value.
    pub fn remove_by_value<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Removes the pair if `value` is mapped from exactly `key`.
    pub fn remove_entry<Q, P>(&mut self, value: &P, key: &Q) -> bool
    where
        K: Borrow<Q>,
        V: Borrow<P>,
        Q: Hash + Eq + ?Sized,
        P: Eq + ?Sized,
    {
        self.map.remove_mapping(key, value)
    }

    /// Removes all pairs from the map.
    pub fn clear(&mut self) {
        self.map.clear()
    }

    /// The keys of this view as a set that can remove pairs.
    pub fn key_set_mut(&mut self) -> ValueSet<&mut BidiHashMap<K, V, S>> {
        self.map.value_set_mut()
    }

    /// The values of this view as a set that can remove pairs.
    pub fn value_set_mut(&mut self) -> KeySet<&mut BidiHashMap<K, V, S>> {
        self.map.key_set_mut()
    }
}

impl<M, K, V, S> Extend<(V, K)> for Inverse<M>
where
    M: DerefMut<Target = BidiHashMap<K, V, S>>,
    K: Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (V, K)>>(&mut self, iter: T) {
        for (v, k) in iter {
            self.map.put(k, v);
        }
    }
}

impl<M, K, V, S> fmt::Debug for Inverse<M>
where
    M: Deref<Target = BidiHashMap<K, V, S>>,
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
