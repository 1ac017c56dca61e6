//! Generic helpers over slices of comparable values.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Whether `item` occurs in `list`.
pub fn contains<T: PartialEq>(list: &[T], item: &T) -> bool {
    list.iter().any(|x| x == item)
}

/// Remove repeated elements, keeping the first occurrence of each.
pub fn deduplicate<T: Eq + Hash + Clone>(list: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(list.len());
    list.iter()
        .filter(|item| seen.insert((*item).clone()))
        .cloned()
        .collect()
}

/// `first` followed by the elements of `second` that `first` lacks.
pub fn union<T: Eq + Hash + Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let present: HashSet<&T> = first.iter().collect();
    let mut result = first.to_vec();
    result.extend(second.iter().filter(|v| !present.contains(v)).cloned());
    result
}

/// Elements of `second` that occur exactly once in `first`, in `second`'s order.
///
/// Values repeated in `first` are left out of the result.
pub fn intersect<T: Eq + Hash + Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let mut counts: HashMap<&T, usize> = HashMap::with_capacity(first.len());
    for v in first {
        *counts.entry(v).or_default() += 1;
    }
    second
        .iter()
        .filter(|v| counts.get(v) == Some(&1))
        .cloned()
        .collect()
}

/// Elements of `first` that are not in [`intersect`]`(first, second)`.
pub fn difference<T: Eq + Hash + Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let common: HashSet<T> = intersect(first, second).into_iter().collect();
    first
        .iter()
        .filter(|v| !common.contains(*v))
        .cloned()
        .collect()
}

/// Group `list` by `key_fn`, collecting `value_fn` of each item in input order.
pub fn group_by<T, K, V>(
    list: impl IntoIterator<Item = T>,
    key_fn: impl Fn(&T) -> K,
    value_fn: impl Fn(&T) -> V,
) -> HashMap<K, Vec<V>>
where
    K: Eq + Hash,
{
    let mut result: HashMap<K, Vec<V>> = HashMap::new();
    for item in list {
        result.entry(key_fn(&item)).or_default().push(value_fn(&item));
    }
    result
}
