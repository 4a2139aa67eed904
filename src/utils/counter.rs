//! Frequency counters for weighted multisets.
//!
//! Two flavours share one backing representation:
//!
//! - [`Counter`] is mutable and used while an index is being built or while a
//!   search aggregates its matches.
//! - [`FrozenCounter`] is read-only and is what the index stores and hands
//!   back to callers.
//!
//! Both implement [`CounterView`], which carries the read operations
//! (`get`, `iter`, `plus`). Entries whose count reaches zero are removed, so
//! a zero count and an absent key are indistinguishable.

use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::collections::hash_map::{self, Entry};
use std::hash::Hash;

/// Read-only access shared by [`Counter`] and [`FrozenCounter`].
pub trait CounterView<K: Eq + Hash> {
    /// Count stored for `key`, or `None` if the key is absent
    fn get<Q>(&self, key: &Q) -> Option<i64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Iterate `(key, count)` pairs in unspecified order
    fn iter(&self) -> Iter<'_, K>;

    /// Number of keys with a non-zero count
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all counts, saturating at the bounds of `i64`
    fn total(&self) -> i64 {
        self.iter().fold(0i64, |acc, (_, count)| acc.saturating_add(count))
    }

    /// Additive merge of `self` and `other` as a new frozen counter.
    ///
    /// Neither operand is modified.
    fn plus<O>(&self, other: &O) -> FrozenCounter<K>
    where
        K: Clone,
        O: CounterView<K> + ?Sized,
        Self: Sized,
    {
        let mut result: Counter<K> = self.iter().map(|(k, c)| (k.clone(), c)).collect();
        result.add(other);
        result.freeze()
    }
}

/// Iterator over the `(key, count)` pairs of a counter
pub struct Iter<'a, K> {
    inner: hash_map::Iter<'a, K, i64>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, i64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, &c)| (k, c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

/// Mutable multiset mapping keys to integer counts.
#[derive(Debug, Clone)]
pub struct Counter<K> {
    counts: FxHashMap<K, i64>,
}

impl<K: Eq + Hash> Counter<K> {
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }

    /// Add `amount` to the count of `key`, treating an absent key as 0.
    ///
    /// `amount` may be negative; an entry that lands on zero is removed.
    /// Counts saturate at `i64::MIN` and `i64::MAX` instead of wrapping.
    pub fn increment(&mut self, key: K, amount: i64) {
        if amount == 0 {
            return;
        }
        match self.counts.entry(key) {
            Entry::Occupied(mut entry) => {
                let updated = entry.get().saturating_add(amount);
                if updated == 0 {
                    entry.remove();
                } else {
                    *entry.get_mut() = updated;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(amount);
            }
        }
    }

    /// Add 1 to the count of `key`
    #[inline]
    pub fn increment_one(&mut self, key: K) {
        self.increment(key, 1);
    }

    /// Merge every count of `other` into this counter in place.
    ///
    /// Keys already present are updated without being cloned.
    pub fn add<O>(&mut self, other: &O)
    where
        K: Clone,
        O: CounterView<K> + ?Sized,
    {
        for (key, count) in other.iter() {
            if count == 0 {
                continue;
            }
            match self.counts.get_mut(key) {
                Some(existing) => {
                    *existing = existing.saturating_add(count);
                    if *existing == 0 {
                        self.counts.remove(key);
                    }
                }
                None => {
                    self.counts.insert(key.clone(), count);
                }
            }
        }
    }

    /// Convert into the read-only form without copying
    pub fn freeze(self) -> FrozenCounter<K> {
        FrozenCounter {
            counts: self.counts,
        }
    }
}

impl<K: Eq + Hash> Default for Counter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> CounterView<K> for Counter<K> {
    #[inline]
    fn get<Q>(&self, key: &Q) -> Option<i64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(key).copied()
    }

    fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.counts.iter(),
        }
    }

    fn len(&self) -> usize {
        self.counts.len()
    }
}

impl<K: Eq + Hash> FromIterator<(K, i64)> for Counter<K> {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}

impl<K: Eq + Hash> Extend<(K, i64)> for Counter<K> {
    fn extend<I: IntoIterator<Item = (K, i64)>>(&mut self, iter: I) {
        for (key, count) in iter {
            self.increment(key, count);
        }
    }
}

impl<K> IntoIterator for Counter<K> {
    type Item = (K, i64);
    type IntoIter = hash_map::IntoIter<K, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<K: Eq + Hash> PartialEq for Counter<K> {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl<K: Eq + Hash> Eq for Counter<K> {}

impl<K: Eq + Hash> PartialEq<FrozenCounter<K>> for Counter<K> {
    fn eq(&self, other: &FrozenCounter<K>) -> bool {
        self.counts == other.counts
    }
}

/// Immutable multiset mapping keys to integer counts.
///
/// Safe to share across threads for concurrent reads when `K` is.
#[derive(Debug, Clone)]
pub struct FrozenCounter<K> {
    counts: FxHashMap<K, i64>,
}

impl<K: Eq + Hash> FrozenCounter<K> {
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }

    /// Copy back out into a mutable counter
    pub fn thaw(&self) -> Counter<K>
    where
        K: Clone,
    {
        Counter {
            counts: self.counts.clone(),
        }
    }
}

impl<K: Eq + Hash> Default for FrozenCounter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> CounterView<K> for FrozenCounter<K> {
    #[inline]
    fn get<Q>(&self, key: &Q) -> Option<i64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(key).copied()
    }

    fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.counts.iter(),
        }
    }

    fn len(&self) -> usize {
        self.counts.len()
    }
}

impl<K: Eq + Hash> FromIterator<(K, i64)> for FrozenCounter<K> {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        iter.into_iter().collect::<Counter<K>>().freeze()
    }
}

impl<K: Eq + Hash> From<Counter<K>> for FrozenCounter<K> {
    fn from(counter: Counter<K>) -> Self {
        counter.freeze()
    }
}

impl<K> IntoIterator for FrozenCounter<K> {
    type Item = (K, i64);
    type IntoIter = hash_map::IntoIter<K, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<'a, K: Eq + Hash> IntoIterator for &'a FrozenCounter<K> {
    type Item = (&'a K, i64);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: Eq + Hash> IntoIterator for &'a Counter<K> {
    type Item = (&'a K, i64);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Eq + Hash> PartialEq for FrozenCounter<K> {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl<K: Eq + Hash> Eq for FrozenCounter<K> {}

impl<K: Eq + Hash> PartialEq<Counter<K>> for FrozenCounter<K> {
    fn eq(&self, other: &Counter<K>) -> bool {
        self.counts == other.counts
    }
}
