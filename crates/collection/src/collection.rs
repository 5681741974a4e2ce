use crate::{CollectionError, Key, Result};

/// Ordered collection of keyed entries.
///
/// - Keys are unique.
/// - Iteration follows insertion order.
/// - `push` appends under the next free integer index.
/// - `put` on an existing key overwrites in place without reordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection<T> {
    entries: Vec<(Key, T)>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Builds a list: keys are `0..n` in iteration order.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (Key::Index(i as i64), value))
            .collect();
        Self { entries }
    }

    /// Builds a keyed collection. A repeated key overwrites the earlier value
    /// and keeps its position.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, T)>,
    {
        let mut collection = Self::new();
        for (key, value) in pairs {
            collection.insert(key.into(), value);
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: impl Into<Key>) -> Option<&T> {
        let idx = self.position(&slot(key))?;
        Some(&self.entries[idx].1)
    }

    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut T> {
        let idx = self.position(&slot(key))?;
        Some(&mut self.entries[idx].1)
    }

    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.position(&slot(key)).is_some()
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|(_, v)| v)
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.last().map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn into_values(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values().cloned().collect()
    }

    /// Whether the keys are exactly `0..len` in iteration order.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (k, _))| *k == Key::Index(i as i64))
    }

    /// Appends `values` under successive integer keys.
    ///
    /// Fails without appending anything when an index past `i64::MAX` would be
    /// needed.
    pub fn push<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<&mut Self> {
        let before = self.entries.len();
        let mut next = self.next_index();
        for value in values {
            let Some(index) = next else {
                self.entries.truncate(before);
                log::debug!("push: integer indices exhausted");
                return Err(CollectionError::IndexOverflow(i64::MAX));
            };
            self.entries.push((Key::Index(index), value));
            next = index.checked_add(1);
        }
        log::trace!("push: {} -> {} entries", before, self.entries.len());
        Ok(self)
    }

    /// Removes and returns the last entry.
    pub fn pop(&mut self) -> Result<T> {
        match self.entries.pop() {
            Some((key, value)) => {
                log::trace!("pop: removed key {key}");
                Ok(value)
            }
            None => {
                log::debug!("pop on an empty collection");
                Err(CollectionError::Empty)
            }
        }
    }

    /// Inserts `value` at the front and renumbers every integer key from 0.
    /// Named keys are left untouched.
    pub fn prepend(&mut self, value: T) -> &mut Self {
        self.entries.insert(0, (Key::Index(0), value));
        let mut next = 0;
        for (key, _) in self.entries.iter_mut() {
            if let Key::Index(i) = key {
                *i = next;
                next += 1;
            }
        }
        log::trace!("prepend: {} entries", self.entries.len());
        self
    }

    /// Inserts `value` at the front under `key`, replacing any entry that
    /// already has that key. Other keys are not renumbered.
    pub fn prepend_keyed(&mut self, key: impl Into<Key>, value: T) -> &mut Self {
        let key = slot(key);
        if let Some(idx) = self.position(&key) {
            self.entries.remove(idx);
        }
        log::trace!("prepend_keyed: key {key}");
        self.entries.insert(0, (key, value));
        self
    }

    /// Removes and returns the entry at `key`.
    pub fn pull(&mut self, key: impl Into<Key>) -> Result<T> {
        let key = slot(key);
        match self.position(&key) {
            Some(idx) => {
                log::trace!("pull: removed key {key}");
                Ok(self.entries.remove(idx).1)
            }
            None => {
                log::debug!("pull: no entry for key {key}");
                Err(CollectionError::MissingKey(key))
            }
        }
    }

    /// Sets the entry at `key`. An existing entry keeps its position.
    pub fn put(&mut self, key: impl Into<Key>, value: T) -> &mut Self {
        let key = slot(key);
        log::trace!("put: key {key}");
        self.insert(key, value);
        self
    }

    pub(crate) fn insert(&mut self, key: Key, value: T) -> Option<T> {
        let key = key.normalized();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub(crate) fn entries(&self) -> &[(Key, T)] {
        &self.entries
    }

    pub(crate) fn from_entries(entries: Vec<(Key, T)>) -> Self {
        Self { entries }
    }

    fn position(&self, key: &Key) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// `None` when the largest index is `i64::MAX`.
    fn next_index(&self) -> Option<i64> {
        match self.entries.iter().filter_map(|(k, _)| k.as_index()).max() {
            Some(max) => max.checked_add(1).map(|next| next.max(0)),
            None => Some(0),
        }
    }
}

fn slot(key: impl Into<Key>) -> Key {
    let key: Key = key.into();
    key.normalized()
}

pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, (Key, T)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a Key, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = (&'a Key, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = (Key, T);
    type IntoIter = std::vec::IntoIter<(Key, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<T, const N: usize> From<[T; N]> for Collection<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_values(values)
    }
}
