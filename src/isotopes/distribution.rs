use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsotopeDistributionError {
    #[error("An isotope distribution needs at least the monoisotopic abundance")]
    Empty,
    #[error("Abundance {abundance} at offset {offset} is not a non-negative number")]
    InvalidAbundance { offset: usize, abundance: f64 },
}

/// A theoretical isotope distribution over nominal isotope offsets.
///
/// Entry `k` holds the relative abundance of the isotope peak `k` mass units
/// above the monoisotopic peak. Offsets are contiguous and the offset 0 entry
/// always exists.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct IsotopeDistribution {
    abundances: Vec<f64>,
}

impl Default for IsotopeDistribution {
    fn default() -> Self {
        Self::monoisotopic_only()
    }
}

impl IsotopeDistribution {
    /// Create a distribution from abundances indexed by offset. An empty
    /// vector is treated as a single monoisotopic peak.
    pub fn new(abundances: Vec<f64>) -> Self {
        if abundances.is_empty() {
            Self::monoisotopic_only()
        } else {
            Self { abundances }
        }
    }

    /// The distribution of a species with no heavy isotopes
    pub fn monoisotopic_only() -> Self {
        Self {
            abundances: vec![1.0],
        }
    }

    pub fn len(&self) -> usize {
        self.abundances.len()
    }

    /// Always `false`, the offset 0 entry is never removed
    pub fn is_empty(&self) -> bool {
        self.abundances.is_empty()
    }

    /// The abundance at `offset`, if the distribution extends that far
    pub fn get(&self, offset: usize) -> Option<f64> {
        self.abundances.get(offset).copied()
    }

    /// The abundance at `offset`, or zero past the end of the distribution
    pub fn abundance(&self, offset: usize) -> f64 {
        self.get(offset).unwrap_or(0.0)
    }

    /// The relative abundance of the monoisotopic peak
    pub fn monoisotopic(&self) -> f64 {
        self.abundances[0]
    }

    /// The offset and abundance of the most abundant isotope peak
    pub fn most_abundant(&self) -> (u32, f64) {
        self.iter()
            .fold((0, f64::NEG_INFINITY), |best, (offset, abundance)| {
                if abundance > best.1 {
                    (offset, abundance)
                } else {
                    best
                }
            })
    }

    /// Scale the abundances so they sum to 1
    pub fn renormalize(&mut self) {
        let total: f64 = self.abundances.iter().sum();
        if total > 0.0 {
            self.abundances.iter_mut().for_each(|a| *a /= total);
        }
    }

    /// Drop trailing isotope peaks less abundant than `min_abundance`
    pub fn trim_right(&mut self, min_abundance: f64) {
        while self.abundances.len() > 1
            && self
                .abundances
                .last()
                .is_some_and(|a| *a < min_abundance)
        {
            self.abundances.pop();
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.abundances
    }

    pub fn iter(&self) -> IsotopeDistributionIter<'_> {
        IsotopeDistributionIter {
            iter: self.abundances.iter().enumerate(),
        }
    }
}

impl TryFrom<Vec<f64>> for IsotopeDistribution {
    type Error = IsotopeDistributionError;

    /// Unlike [`IsotopeDistribution::new`], reject abundances that cannot
    /// form a distribution instead of substituting one
    fn try_from(abundances: Vec<f64>) -> Result<Self, Self::Error> {
        if abundances.is_empty() {
            return Err(IsotopeDistributionError::Empty);
        }
        if let Some((offset, abundance)) = abundances
            .iter()
            .enumerate()
            .find(|(_, a)| !(a.is_finite() && **a >= 0.0))
        {
            return Err(IsotopeDistributionError::InvalidAbundance {
                offset,
                abundance: *abundance,
            });
        }
        Ok(Self { abundances })
    }
}

impl From<IsotopeDistribution> for Vec<f64> {
    fn from(value: IsotopeDistribution) -> Self {
        value.abundances
    }
}

impl fmt::Display for IsotopeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IsotopeDistribution([")?;
        for (offset, abundance) in self.iter() {
            if offset > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{offset}: {abundance:.4}")?;
        }
        write!(f, "])")
    }
}

/// Iterate over `(offset, abundance)` pairs of an [`IsotopeDistribution`]
pub struct IsotopeDistributionIter<'a> {
    iter: std::iter::Enumerate<slice::Iter<'a, f64>>,
}

impl Iterator for IsotopeDistributionIter<'_> {
    type Item = (u32, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(i, a)| (i as u32, *a))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for IsotopeDistributionIter<'_> {}

impl FusedIterator for IsotopeDistributionIter<'_> {}

impl<'a> IntoIterator for &'a IsotopeDistribution {
    type Item = (u32, f64);
    type IntoIter = IsotopeDistributionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_is_monoisotopic() {
        let dist = IsotopeDistribution::new(Vec::new());
        assert_eq!(dist.len(), 1);
        assert_eq!(dist.monoisotopic(), 1.0);
        assert_eq!(dist.abundance(3), 0.0);
    }

    #[test]
    fn test_try_from_abundances() {
        assert_eq!(
            IsotopeDistribution::try_from(Vec::new()),
            Err(IsotopeDistributionError::Empty)
        );
        assert!(matches!(
            IsotopeDistribution::try_from(vec![0.6, f64::NAN]),
            Err(IsotopeDistributionError::InvalidAbundance { offset: 1, .. })
        ));
        assert!(IsotopeDistribution::try_from(vec![0.6, -0.1]).is_err());
        let dist = IsotopeDistribution::try_from(vec![0.6, 0.4]).unwrap();
        assert_eq!(dist.monoisotopic(), 0.6);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_empty() {
        let dist = IsotopeDistribution::new(vec![0.6, 0.3, 0.1]);
        let text = serde_json::to_string(&dist).unwrap();
        assert_eq!(text, "[0.6,0.3,0.1]");
        let back: IsotopeDistribution = serde_json::from_str(&text).unwrap();
        assert_eq!(back, dist);

        assert!(serde_json::from_str::<IsotopeDistribution>("[]").is_err());
    }

    #[test]
    fn test_renormalize_and_trim() {
        let mut dist = IsotopeDistribution::new(vec![2.0, 1.5, 0.5, 0.0001, 0.00001]);
        dist.renormalize();
        let total: f64 = dist.iter().map(|(_, a)| a).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(dist.most_abundant().0, 0);

        dist.trim_right(1e-3);
        assert_eq!(dist.len(), 3);
        let offsets: Vec<u32> = dist.iter().map(|(o, _)| o).collect();
        assert_eq!(offsets, vec![0, 1, 2]);

        let mut tiny = IsotopeDistribution::new(vec![1e-9]);
        tiny.trim_right(1e-3);
        assert_eq!(tiny.len(), 1);
    }
}
