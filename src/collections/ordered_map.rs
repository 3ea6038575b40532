use std::{borrow::Borrow, hash::Hash};

use rustc_hash::FxHashMap;

/// A key-value map that iterates in insertion order.
///
/// Entries live in a `Vec`, with a hash index from each key to its position.
/// Updating an existing key keeps its original position and key, only the
/// value is replaced.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: FxHashMap<K, usize>,
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    ///
    /// The iterator is `Clone`, so a partially consumed walk can be restarted
    /// from a saved copy; calling `entries` again always starts from the front.
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.entries(),
        }
    }

    pub fn values(&self) -> impl '_ + DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Visits every entry as `(value, key)`, in insertion order.
    pub fn for_each(&self, mut visit: impl FnMut(&V, &K)) {
        for (k, v) in &self.entries {
            visit(v, k);
        }
    }

    pub fn into_pairs(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        pairs.into_iter().collect()
    }

    pub fn set(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = *self.index.get(key)?;
        Some(&self.entries[position].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = *self.index.get(key)?;
        Some(&mut self.entries[position].1)
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes `key` and returns its value, if it was present.
    pub fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);

        // Everything after the hole moved down by one.
        for (k, _) in &self.entries[position..] {
            if let Some(slot) = self.index.get_mut::<K>(k) {
                *slot -= 1;
            }
        }

        Some(value)
    }

    /// Removes `key`, returning whether anything was removed.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(key).is_some()
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq + Clone, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

#[derive(Debug)]
pub struct Entries<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Clone for Entries<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Entries<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<'a, K, V> ExactSizeIterator for Entries<'a, K, V> {}

#[derive(Debug)]
pub struct Keys<'a, K, V> {
    inner: Entries<'a, K, V>,
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades() -> OrderedMap<String, i32> {
        let mut map = OrderedMap::new();
        map.set("John".to_string(), 85);
        map.set("Jane".to_string(), 92);
        map.set("Sam".to_string(), 78);
        map
    }

    fn assert_index_consistent<K: Hash + Eq + std::fmt::Debug, V>(map: &OrderedMap<K, V>) {
        assert_eq!(map.index.len(), map.entries.len());
        for (position, (k, _)) in map.entries.iter().enumerate() {
            assert_eq!(map.index.get(k), Some(&position), "stale index for {k:?}");
        }
    }

    #[test]
    fn test_student_grades_scenario() {
        let mut map = grades();
        assert_eq!(map.get("Jane"), Some(&92));

        map.set("John".to_string(), 88);
        assert_eq!(map.get("John"), Some(&88));
        assert!(map.has("Sam"));
        assert_eq!(map.size(), 3);

        assert!(map.delete("Sam"));
        assert_eq!(map.size(), 2);

        map.clear();
        assert_eq!(map.size(), 0);
        assert!(map.is_empty());
        assert_eq!(map.entries().count(), 0);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut map = grades();
        map.set("John".to_string(), 88);

        let order: Vec<_> = map.entries().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(order, vec![("John", 88), ("Jane", 92), ("Sam", 78)]);
    }

    #[test]
    fn test_missing_key_is_absent() {
        let mut map = grades();
        assert_eq!(map.get("Nobody"), None);
        assert_eq!(map.get_mut("Nobody"), None);
        assert!(!map.has("Nobody"));
        assert!(!map.delete("Nobody"));
        assert_eq!(map.size(), 3);
    }

    #[test]
    fn test_delete_shifts_index() {
        let mut map: OrderedMap<u32, char> = "abcdef"
            .chars()
            .enumerate()
            .map(|(i, c)| (i as u32, c))
            .collect();

        assert_eq!(map.take(&1), Some('b'));
        assert_eq!(map.take(&4), Some('e'));
        assert_index_consistent(&map);

        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![0, 2, 3, 5]);
        assert_eq!(map.get(&5), Some(&'f'));

        // A re-inserted key goes to the back.
        map.set(1, 'B');
        assert_index_consistent(&map);
        assert_eq!(map.values().copied().collect::<String>(), "acdfB");
    }

    #[test]
    fn test_take_with_borrowed_key() {
        let mut map = grades();

        assert_eq!(map.take("Jane"), Some(92));
        assert_index_consistent(&map);
        assert!(map.delete("John"));
        assert_index_consistent(&map);

        assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), vec!["Sam"]);
        assert_eq!(map.get("Sam"), Some(&78));
    }

    #[test]
    fn test_entries_restartable() {
        let map = grades();
        let mut entries = map.entries();
        entries.next();
        let saved = entries.clone();

        assert_eq!(entries.count(), 2);
        assert_eq!(saved.count(), 2);
        assert_eq!(map.entries().count(), 3);
        assert_eq!(map.entries().len(), 3);
    }

    #[test]
    fn test_for_each_visits_value_then_key() {
        let map = grades();
        let mut lines = Vec::new();
        map.for_each(|grade, student| lines.push(format!("{student}: {grade}")));

        assert_eq!(lines, vec!["John: 85", "Jane: 92", "Sam: 78"]);
    }

    #[test]
    fn test_pairs_round_trip() {
        let pairs = vec![("title", "Gatsby"), ("author", "Fitzgerald"), ("year", "1925")];
        let map = OrderedMap::from_pairs(pairs.clone());

        assert_eq!(map.into_pairs(), pairs);
    }

    #[test]
    fn test_from_pairs_duplicates_keep_first_position() {
        let map = OrderedMap::from_pairs([("a", 1), ("b", 2), ("a", 3)]);

        assert_eq!(map.size(), 2);
        assert_eq!(map.into_iter().collect::<Vec<_>>(), vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab = OrderedMap::from_pairs([("a", 1), ("b", 2)]);
        let ba = OrderedMap::from_pairs([("b", 2), ("a", 1)]);

        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut map = grades();
        if let Some(grade) = map.get_mut("Sam") {
            *grade += 10;
        }

        assert_eq!(map.get("Sam"), Some(&88));
        assert_eq!(map.keys().last().map(String::as_str), Some("Sam"));
    }
}
