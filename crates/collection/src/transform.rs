use std::collections::HashMap;
use std::fmt::Display;

use crate::nested::{IntoValues, Items, Spread};
use crate::{Collection, CollectionError, Key, Result};

impl<T> Collection<T> {
    pub fn map<U, F>(&self, mut f: F) -> Collection<U>
    where
        F: FnMut(&T, &Key) -> U,
    {
        let entries = self
            .entries()
            .iter()
            .map(|(k, v)| (k.clone(), f(v, k)))
            .collect();
        Collection::from_entries(entries)
    }

    /// Converts every element with `U::from`.
    pub fn map_into<U>(&self) -> Collection<U>
    where
        T: Clone,
        U: From<T>,
    {
        self.map(|v, _| U::from(v.clone()))
    }

    /// Calls `f` with the items of each nested element as positional
    /// arguments.
    pub fn map_spread<E, Args, U, F>(&self, mut f: F) -> Result<Collection<U>>
    where
        T: Items<Item = E>,
        F: Spread<E, Args, U>,
    {
        let mut entries = Vec::with_capacity(self.len());
        let mut args = Vec::with_capacity(F::ARITY);
        for (key, value) in self.entries() {
            args.clear();
            args.extend(value.items());
            let Some(mapped) = f.spread(&args) else {
                log::debug!(
                    "map_spread: element {key} has {} items, expected {}",
                    args.len(),
                    F::ARITY
                );
                return Err(CollectionError::ArityMismatch {
                    key: key.clone(),
                    expected: F::ARITY,
                    found: args.len(),
                });
            };
            entries.push((key.clone(), mapped));
        }
        Ok(Collection::from_entries(entries))
    }

    /// Groups the values returned by `f` under their group keys, in order of
    /// first appearance.
    pub fn map_to_dictionary<K, U, F>(&self, mut f: F) -> Collection<Vec<U>>
    where
        K: Into<Key>,
        F: FnMut(&T, &Key) -> (K, U),
    {
        let mut groups: Vec<(Key, Vec<U>)> = Vec::new();
        let mut slots: HashMap<Key, usize> = HashMap::new();
        for (key, value) in self.entries() {
            let (group, mapped) = f(value, key);
            let group: Key = group.into();
            let group = group.normalized();
            match slots.get(&group) {
                Some(&slot) => groups[slot].1.push(mapped),
                None => {
                    slots.insert(group.clone(), groups.len());
                    groups.push((group, vec![mapped]));
                }
            }
        }
        Collection::from_entries(groups)
    }

    /// Like `map_to_dictionary`, with every group as a list collection.
    pub fn map_to_groups<K, U, F>(&self, f: F) -> Collection<Collection<U>>
    where
        K: Into<Key>,
        F: FnMut(&T, &Key) -> (K, U),
    {
        let groups = self.map_to_dictionary(f);
        let entries = groups
            .into_iter()
            .map(|(group, values)| (group, Collection::from_values(values)))
            .collect();
        Collection::from_entries(entries)
    }

    /// Rekeys the collection with the pairs returned by `f`. A repeated key
    /// overwrites the earlier value in place.
    pub fn map_with_keys<K, U, F>(&self, mut f: F) -> Collection<U>
    where
        K: Into<Key>,
        F: FnMut(&T, &Key) -> (K, U),
    {
        let mut result = Collection::with_capacity(self.len());
        for (key, value) in self.entries() {
            let (new_key, mapped) = f(value, key);
            result.insert(new_key.into(), mapped);
        }
        result
    }

    /// Pairs the `i`-th elements of `self` and `other` into two-item lists.
    /// Stops at the end of the shorter input.
    pub fn zip<I>(&self, other: I) -> Collection<Collection<T>>
    where
        T: Clone,
        I: IntoValues<Value = T>,
    {
        self.values()
            .zip(other.into_value_iter())
            .map(|(a, b)| Collection::from_values([a.clone(), b]))
            .collect()
    }

    /// Appends the values of `other` after the entries of `self`, each under
    /// the next free integer index.
    pub fn concat<I>(&self, other: I) -> Result<Collection<T>>
    where
        T: Clone,
        I: IntoValues<Value = T>,
    {
        let mut result = self.clone();
        result.push(other.into_value_iter())?;
        Ok(result)
    }

    /// Uses the elements of `self` as keys for `values`, pairwise.
    pub fn combine<V, I>(&self, values: I) -> Result<Collection<V>>
    where
        T: Clone + Into<Key>,
        I: IntoValues<Value = V>,
    {
        let values: Vec<V> = values.into_value_iter().collect();
        if values.len() != self.len() {
            log::debug!("combine: {} keys, {} values", self.len(), values.len());
            return Err(CollectionError::LengthMismatch {
                keys: self.len(),
                values: values.len(),
            });
        }
        Ok(Collection::from_pairs(self.values().cloned().zip(values)))
    }

    /// Flattens one level of nesting into a list.
    pub fn collapse(&self) -> Collection<T::Item>
    where
        T: Items,
        T::Item: Clone,
    {
        self.values()
            .flat_map(|value| value.items().cloned())
            .collect()
    }

    /// Maps every element to a sequence and flattens the results into a list.
    pub fn flat_map<I, F>(&self, mut f: F) -> Collection<I::Item>
    where
        I: IntoIterator,
        F: FnMut(&T, &Key) -> I,
    {
        self.entries().iter().flat_map(|(k, v)| f(v, k)).collect()
    }

    pub fn join(&self, glue: &str) -> String
    where
        T: Display,
    {
        self.join_with_last(glue, glue)
    }

    /// Joins with `glue`, except for the last pair which is joined with
    /// `final_glue`.
    pub fn join_with_last(&self, glue: &str, final_glue: &str) -> String
    where
        T: Display,
    {
        let parts: Vec<String> = self.values().map(|v| v.to_string()).collect();
        match parts.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, init)) => format!("{}{final_glue}{last}", init.join(glue)),
        }
    }

    pub fn filter<F>(&self, mut f: F) -> Collection<T>
    where
        T: Clone,
        F: FnMut(&T, &Key) -> bool,
    {
        let entries = self
            .entries()
            .iter()
            .filter(|(k, v)| f(v, k))
            .cloned()
            .collect();
        Collection::from_entries(entries)
    }

    pub fn reject<F>(&self, mut f: F) -> Collection<T>
    where
        T: Clone,
        F: FnMut(&T, &Key) -> bool,
    {
        self.filter(|v, k| !f(v, k))
    }

    /// Splits into `(passing, failing)`, both keeping the original keys.
    pub fn partition<F>(&self, mut f: F) -> (Collection<T>, Collection<T>)
    where
        T: Clone,
        F: FnMut(&T, &Key) -> bool,
    {
        let (pass, fail): (Vec<_>, Vec<_>) = self
            .entries()
            .iter()
            .cloned()
            .partition(|(k, v)| f(v, k));
        (Collection::from_entries(pass), Collection::from_entries(fail))
    }
}
