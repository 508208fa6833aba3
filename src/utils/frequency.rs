//! Most-frequent-value analysis used to pick the elision target of a
//! compressed vector.
//!
//! The tally is insertion ordered: an FNV hash index points into a slot
//! table that grows in first-seen order. The mode is found by one scan of
//! that table, keeping the first slot whose count is strictly greater than
//! the best so far. When several values share the maximum count, the one
//! that first appeared in the input wins.

use fnv::FnvHashMap;

use crate::core::traits::Element;
use crate::error::ElideError;

/// Occurrence counts of distinct values, in first-seen order.
#[derive(Debug, Clone)]
pub struct Tally<T: Element> {
    index: FnvHashMap<T::Key, usize>,
    slots: Vec<(T, usize)>,
    total: usize,
}

impl<T: Element> Default for Tally<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Tally<T> {
    pub fn new() -> Self {
        Self {
            index: FnvHashMap::default(),
            slots: Vec::new(),
            total: 0,
        }
    }

    /// Count one occurrence of `value`.
    pub fn add(&mut self, value: T) {
        self.total += 1;
        match self.index.get(&value.key()) {
            Some(&slot) => self.slots[slot].1 += 1,
            None => {
                self.index.insert(value.key(), self.slots.len());
                self.slots.push((value, 1));
            }
        }
    }

    /// Occurrences of `value` seen so far.
    pub fn count(&self, value: T) -> usize {
        self.index
            .get(&value.key())
            .map_or(0, |&slot| self.slots[slot].1)
    }

    /// Number of distinct values.
    pub fn distinct(&self) -> usize {
        self.slots.len()
    }

    /// Number of values added.
    pub fn total(&self) -> usize {
        self.total
    }

    /// `(value, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (T, usize)> + '_ {
        self.slots.iter().copied()
    }

    /// The first value reaching the maximum count, with that count.
    pub fn most_frequent(&self) -> Option<(T, usize)> {
        let mut best: Option<(T, usize)> = None;
        for &(value, count) in &self.slots {
            match best {
                Some((_, c)) if count <= c => {}
                _ => best = Some((value, count)),
            }
        }
        best
    }
}

impl<T: Element> Extend<T> for Tally<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Element> FromIterator<T> for Tally<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tally = Tally::new();
        tally.extend(iter);
        tally
    }
}

/// The most frequent value of `values` and its count.
pub fn frequent_with_count<T, I>(values: I) -> Result<(T, usize), ElideError>
where
    T: Element,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .collect::<Tally<T>>()
        .most_frequent()
        .ok_or(ElideError::EmptyInput)
}

/// The most frequent value of `values`; `EmptyInput` if there are none.
pub fn frequent<T, I>(values: I) -> Result<T, ElideError>
where
    T: Element,
    I: IntoIterator<Item = T>,
{
    frequent_with_count(values).map(|(value, _)| value)
}
