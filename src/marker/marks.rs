use std::collections::btree_set::{self, BTreeSet};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::FusedIterator;

use ordered_float::OrderedFloat;

/// The set of peak positions that have been marked.
///
/// A position that is not present has not been marked (yet). There is no
/// way to record a rejection, and nothing can be removed, so running more
/// markers over the same [`PeakMarks`] only ever grows it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakMarks {
    marked: BTreeSet<OrderedFloat<f64>>,
}

impl PeakMarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the position `mz`, returning `true` if it was not already marked
    pub fn mark(&mut self, mz: f64) -> bool {
        self.marked.insert(OrderedFloat(mz))
    }

    pub fn is_marked(&self, mz: f64) -> bool {
        self.marked.contains(&OrderedFloat(mz))
    }

    /// Add every position marked in `other`
    pub fn merge(&mut self, other: &PeakMarks) {
        self.marked.extend(other.marked.iter().copied());
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Iterate over the marked positions in ascending order
    pub fn iter(&self) -> PeakMarksIter<'_> {
        PeakMarksIter {
            iter: self.marked.iter(),
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// A position-to-flag view for consumers that expect one. Every key
    /// maps to `true`; unmarked positions are simply absent.
    pub fn as_bool_map(&self) -> BTreeMap<OrderedFloat<f64>, bool> {
        self.marked.iter().map(|mz| (*mz, true)).collect()
    }
}

impl fmt::Display for PeakMarks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeakMarks(<{} Positions>)", self.len())
    }
}

impl Extend<f64> for PeakMarks {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        self.marked.extend(iter.into_iter().map(OrderedFloat))
    }
}

impl FromIterator<f64> for PeakMarks {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

pub struct PeakMarksIter<'a> {
    iter: btree_set::Iter<'a, OrderedFloat<f64>>,
}

impl Iterator for PeakMarksIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|mz| mz.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for PeakMarksIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|mz| mz.0)
    }
}

impl ExactSizeIterator for PeakMarksIter<'_> {}

impl FusedIterator for PeakMarksIter<'_> {}

impl<'a> IntoIterator for &'a PeakMarks {
    type Item = f64;
    type IntoIter = PeakMarksIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_marks_only_grow() {
        let mut marks = PeakMarks::new();
        assert!(marks.mark(1001.0));
        assert!(marks.mark(1000.0));
        assert!(!marks.mark(1000.0));
        assert_eq!(marks.len(), 2);
        assert_eq!(marks.to_vec(), vec![1000.0, 1001.0]);

        let other: PeakMarks = [1002.0, 1000.0].into_iter().collect();
        marks.merge(&other);
        assert_eq!(marks.to_vec(), vec![1000.0, 1001.0, 1002.0]);
        assert!(marks.is_marked(1002.0));
        assert!(!marks.is_marked(1003.0));
    }

    #[test]
    fn test_bool_map_view() {
        let marks: PeakMarks = [500.25, 501.25].into_iter().collect();
        let view = marks.as_bool_map();
        assert_eq!(view.len(), 2);
        assert!(view.values().all(|v| *v));
        assert_eq!(view.get(&OrderedFloat(500.25)), Some(&true));
        assert_eq!(view.get(&OrderedFloat(502.0)), None);
        assert_eq!(marks.to_string(), "PeakMarks(<2 Positions>)");
    }
}
