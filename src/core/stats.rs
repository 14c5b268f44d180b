//! Column aggregates
//!
//! Frequency counting that remembers first-encounter order, so that ties in
//! [`ValueCounts::mode`] and [`ValueCounts::descending`] resolve to the value
//! seen first.

use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts of the values in a column, in encounter order
#[derive(Debug, Clone)]
pub struct ValueCounts<T> {
    entries: Vec<(T, usize)>,
    positions: HashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> ValueCounts<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Count one occurrence of `value`
    pub fn add(&mut self, value: T) {
        match self.positions.get(&value) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(value.clone(), self.entries.len());
                self.entries.push((value, 1));
            }
        }
    }

    /// Most frequent value; ties go to the earliest encountered
    pub fn mode(&self) -> Option<&T> {
        let mut best: Option<&(T, usize)> = None;
        for entry in &self.entries {
            if best.is_none_or(|(_, count)| entry.1 > *count) {
                best = Some(entry);
            }
        }
        best.map(|(value, _)| value)
    }

    /// Counts sorted by descending frequency, ties kept in encounter order
    pub fn descending(&self) -> Vec<(T, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Count recorded for `value`
    pub fn count(&self, value: &T) -> usize {
        self.positions
            .get(value)
            .map_or(0, |&pos| self.entries[pos].1)
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Eq + Hash + Clone> Default for ValueCounts<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for ValueCounts<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut counts = Self::new();
        for value in iter {
            counts.add(value);
        }
        counts
    }
}

/// Sum and mean over the present values of a numeric column
pub fn sum_and_mean<I: IntoIterator<Item = f64>>(values: I) -> (f64, Option<f64>) {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    let mean = (count > 0).then(|| sum / count as f64);
    (sum, mean)
}
