use std::{fmt, iter::FusedIterator, vec};

use crate::bidi_hash_map::{BidiHashMap, Entry};

/// Moves one step along the by-key chains.
///
/// `walk` is the entry visited last, if any. Its by-key successor is returned if there is one,
/// otherwise the next non-empty by-key slot at or after `next_slot` is located and `next_slot`
/// is moved past it. Every cursor and iterator of the map walks the table through this function.
pub(crate) fn step<K, V>(
    slots: &[Option<usize>],
    entries: &[Entry<K, V>],
    next_slot: &mut usize,
    walk: Option<usize>,
) -> Option<usize> {
    if let Some(idx) = walk {
        if let Some(next) = entries[idx].next_by_key {
            return Some(next);
        }
    }
    while *next_slot < slots.len() {
        let head = slots[*next_slot];
        *next_slot += 2;
        if head.is_some() {
            return head;
        }
    }
    None
}

struct Chains<'a, K, V> {
    slots: &'a [Option<usize>],
    entries: &'a [Entry<K, V>],
    next_slot: usize,
    walk: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Chains<'a, K, V> {
    fn new<S>(map: &'a BidiHashMap<K, V, S>) -> Self {
        Self {
            slots: &map.slots,
            entries: &map.entries,
            next_slot: 0,
            walk: None,
            remaining: map.len(),
        }
    }

    fn next(&mut self) -> Option<&'a Entry<K, V>> {
        if self.remaining == 0 {
            return None;
        }
        self.walk = step(self.slots, self.entries, &mut self.next_slot, self.walk);
        let idx = self.walk?;
        self.remaining -= 1;
        Some(&self.entries[idx])
    }
}

impl<K, V> Clone for Chains<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            entries: self.entries,
            next_slot: self.next_slot,
            walk: self.walk,
            remaining: self.remaining,
        }
    }
}

/// A borrowing iterator over a [`BidiHashMap`].
///
/// All of the map's iterators walk the table the same way and only differ in what they yield
/// for each pair. Use the aliases [`Iter`], [`Keys`], [`Values`] and [`InverseIter`].
pub struct MapIter<'a, K, V, T> {
    chains: Chains<'a, K, V>,
    project: fn(&'a Entry<K, V>) -> T,
}

/// An iterator over the `(key, value)` pairs of a [`BidiHashMap`].
pub type Iter<'a, K, V> = MapIter<'a, K, V, (&'a K, &'a V)>;

/// An iterator over the keys of a [`BidiHashMap`].
pub type Keys<'a, K, V> = MapIter<'a, K, V, &'a K>;

/// An iterator over the values of a [`BidiHashMap`].
pub type Values<'a, K, V> = MapIter<'a, K, V, &'a V>;

/// An iterator over the `(value, key)` pairs of a [`BidiHashMap`], as seen from its
/// [`Inverse`](crate::Inverse).
pub type InverseIter<'a, K, V> = MapIter<'a, K, V, (&'a V, &'a K)>;

impl<'a, K, V> MapIter<'a, K, V, (&'a K, &'a V)> {
    pub(crate) fn pairs<S>(map: &'a BidiHashMap<K, V, S>) -> Self {
        Self {
            chains: Chains::new(map),
            project: |e| (&e.key, &e.value),
        }
    }
}

impl<'a, K, V> MapIter<'a, K, V, &'a K> {
    pub(crate) fn keys<S>(map: &'a BidiHashMap<K, V, S>) -> Self {
        Self {
            chains: Chains::new(map),
            project: |e| &e.key,
        }
    }
}

impl<'a, K, V> MapIter<'a, K, V, &'a V> {
    pub(crate) fn values<S>(map: &'a BidiHashMap<K, V, S>) -> Self {
        Self {
            chains: Chains::new(map),
            project: |e| &e.value,
        }
    }
}

impl<'a, K, V> MapIter<'a, K, V, (&'a V, &'a K)> {
    pub(crate) fn inverse<S>(map: &'a BidiHashMap<K, V, S>) -> Self {
        Self {
            chains: Chains::new(map),
            project: |e| (&e.value, &e.key),
        }
    }
}

impl<K, V, T> Clone for MapIter<'_, K, V, T> {
    fn clone(&self) -> Self {
        Self {
            chains: self.chains.clone(),
            project: self.project,
        }
    }
}

impl<K, V, T> fmt::Debug for MapIter<'_, K, V, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, T> Iterator for MapIter<'a, K, V, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.chains.next().map(self.project)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chains.remaining, Some(self.chains.remaining))
    }
}

impl<K, V, T> ExactSizeIterator for MapIter<'_, K, V, T> {
    fn len(&self) -> usize {
        self.chains.remaining
    }
}

impl<K, V, T> FusedIterator for MapIter<'_, K, V, T> {}

/// An owning iterator over the pairs of a [`BidiHashMap`], in no particular order.
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<Entry<K, V>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(entries: Vec<Entry<K, V>>) -> Self {
        Self {
            inner: entries.into_iter(),
        }
    }
}

impl<K, V> fmt::Debug for IntoIter<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.inner.as_slice().iter().map(|e| (&e.key, &e.value)))
            .finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}
