//! Cartesian product of parameter values
//!
//! `generate(&[[a, b], [1, 2]])` yields `[a,1] [a,2] [b,1] [b,2]`: the first
//! list varies slowest, the last fastest. Duplicate values are not merged.
//!
//! Edge cases:
//! - no lists at all → one empty combination (the product's identity)
//! - any empty list → no combinations

use crate::parameter::Parameter;
use std::collections::HashMap;
use std::iter::FusedIterator;

/// One candidate row: a value per parameter, in parameter order
pub type Combination = Vec<String>;

/// Expand value lists into every combination, eagerly
pub fn generate<L: AsRef<[String]>>(value_lists: &[L]) -> Vec<Combination> {
    let rows: Vec<Combination> = combinations(value_lists).collect();
    tracing::debug!(
        lists = value_lists.len(),
        rows = rows.len(),
        "generated combinations"
    );
    rows
}

/// Lazy variant of [`generate`]
pub fn combinations<L: AsRef<[String]>>(value_lists: &[L]) -> Combinations<'_, L> {
    let exhausted = value_lists.iter().any(|l| l.as_ref().is_empty());
    Combinations {
        lists: value_lists,
        cursor: vec![0; value_lists.len()],
        remaining: if exhausted {
            Some(0)
        } else {
            product_size(value_lists)
        },
        done: exhausted,
    }
}

/// Number of rows the product will have, `None` if it overflows `usize`
pub fn product_size<L: AsRef<[String]>>(value_lists: &[L]) -> Option<usize> {
    value_lists
        .iter()
        .try_fold(1usize, |acc, l| acc.checked_mul(l.as_ref().len()))
}

/// Odometer over the value lists; the last position turns fastest
#[derive(Debug, Clone)]
pub struct Combinations<'a, L> {
    lists: &'a [L],
    cursor: Vec<usize>,
    remaining: Option<usize>,
    done: bool,
}

impl<L: AsRef<[String]>> Iterator for Combinations<'_, L> {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let row = self
            .cursor
            .iter()
            .zip(self.lists)
            .map(|(&i, list)| list.as_ref()[i].clone())
            .collect();

        // Advance from the last position, carrying leftwards
        self.done = true;
        for pos in (0..self.cursor.len()).rev() {
            self.cursor[pos] += 1;
            if self.cursor[pos] < self.lists[pos].as_ref().len() {
                self.done = false;
                break;
            }
            self.cursor[pos] = 0;
        }

        if let Some(n) = self.remaining.as_mut() {
            *n = n.saturating_sub(1);
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl<L: AsRef<[String]>> FusedIterator for Combinations<'_, L> {}

/// Parameter id → column position
///
/// Conditions reference parameters by id while combinations are positional,
/// so evaluation goes through this map. Build it from the same parameter list
/// that produced the value lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterIndex {
    positions: HashMap<String, usize>,
}

impl ParameterIndex {
    pub fn get(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for ParameterIndex {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().map(|(id, i)| (id.into(), i)).collect(),
        }
    }
}

/// Index parameters by position. A repeated id keeps its last position.
pub fn build_index(parameters: &[Parameter]) -> ParameterIndex {
    parameters
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect()
}
