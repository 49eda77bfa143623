use std::fmt;
use std::ops;
use std::slice;

use thiserror::Error;

use mzpeaks::{CoordinateLike, IndexedCoordinate};
use super::peak::Peak;

/// Data integrity problems that prevent a [`Spectrum`] from being ordered by m/z
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectrumError {
    #[error("Peak {index} has a non-finite m/z {mz}")]
    NonFinitePosition { index: usize, mz: f64 },
    #[error("Peak {index} has an invalid intensity {intensity}")]
    InvalidIntensity { index: usize, intensity: f32 },
}

/// An ordered list of [`Peak`]s.
///
/// Unlike a peak set that is always kept sorted, a [`Spectrum`] preserves
/// whatever order it was built in until [`Spectrum::sort_by_position`] is
/// called. Marking operations do that themselves, so callers should not rely
/// on the original order surviving.
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spectrum {
    pub peaks: Vec<Peak>,
}

impl Spectrum {
    /// Wrap `peaks` without reordering them
    pub fn new(peaks: Vec<Peak>) -> Self {
        Self { peaks }
    }

    /// Wrap `peaks` and sort them by m/z
    pub fn sorted(peaks: Vec<Peak>) -> Result<Self, SpectrumError> {
        let mut this = Self::new(peaks);
        this.sort_by_position()?;
        Ok(this)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            peaks: Vec::with_capacity(capacity),
        }
    }

    pub fn empty() -> Self {
        Self::with_capacity(0)
    }

    /// Check that every peak has a finite m/z and a non-negative intensity
    pub fn validate(&self) -> Result<(), SpectrumError> {
        for (index, peak) in self.peaks.iter().enumerate() {
            if !peak.mz.is_finite() {
                return Err(SpectrumError::NonFinitePosition { index, mz: peak.mz });
            }
            if peak.intensity.is_nan() || peak.intensity < 0.0 {
                return Err(SpectrumError::InvalidIntensity {
                    index,
                    intensity: peak.intensity,
                });
            }
        }
        Ok(())
    }

    /// Sort the peaks in ascending m/z order and renumber their indices.
    ///
    /// The sort is stable. If any peak cannot be ordered, the spectrum is
    /// left as it was and the offending peak is reported.
    pub fn sort_by_position(&mut self) -> Result<(), SpectrumError> {
        self.validate()?;
        self.peaks
            .sort_by(|a, b| a.coordinate().total_cmp(&b.coordinate()));
        for (i, p) in self.peaks.iter_mut().enumerate() {
            p.set_index(i as u32);
        }
        Ok(())
    }

    /// Whether the peaks are in non-decreasing m/z order
    pub fn is_sorted(&self) -> bool {
        self.peaks.windows(2).all(|w| w[0].mz <= w[1].mz)
    }

    /// Append a peak to the end of the spectrum, wherever it falls in m/z
    pub fn push(&mut self, mut peak: Peak) {
        peak.set_index(self.peaks.len() as u32);
        self.peaks.push(peak);
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Peak> {
        self.peaks.get(i)
    }

    pub fn as_slice(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn iter(&self) -> slice::Iter<'_, Peak> {
        self.peaks.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Peak> {
        self.peaks.iter_mut()
    }
}

impl ops::Index<usize> for Spectrum {
    type Output = Peak;

    fn index(&self, i: usize) -> &Self::Output {
        &(self.peaks[i])
    }
}

impl fmt::Display for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Spectrum(<{} Peaks>)", self.len())
    }
}

impl From<Vec<Peak>> for Spectrum {
    fn from(v: Vec<Peak>) -> Spectrum {
        Spectrum::new(v)
    }
}

impl From<&mzpeaks::PeakSet> for Spectrum {
    fn from(peaks: &mzpeaks::PeakSet) -> Spectrum {
        peaks.iter().map(Peak::from).collect()
    }
}

impl FromIterator<Peak> for Spectrum {
    fn from_iter<T: IntoIterator<Item = Peak>>(iter: T) -> Self {
        let mut this = Self::empty();
        for peak in iter {
            this.push(peak);
        }
        this
    }
}

impl FromIterator<(f64, f32)> for Spectrum {
    fn from_iter<T: IntoIterator<Item = (f64, f32)>>(iter: T) -> Self {
        iter.into_iter().map(Peak::from).collect()
    }
}

impl<'a> IntoIterator for &'a Spectrum {
    type Item = &'a Peak;
    type IntoIter = slice::Iter<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

impl<'a> IntoIterator for &'a mut Spectrum {
    type Item = &'a mut Peak;
    type IntoIter = slice::IterMut<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter_mut()
    }
}

impl IntoIterator for Spectrum {
    type Item = Peak;
    type IntoIter = std::vec::IntoIter<Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn unsorted() -> Spectrum {
        let pairs: Vec<(f64, f32)> =
            vec![(1002.0, 20.0), (1000.0, 100.0), (1001.0, 55.0), (1000.0, 3.0)];
        pairs.into_iter().collect()
    }

    #[test_log::test]
    fn test_sort_by_position() {
        let mut spec = unsorted();
        assert!(!spec.is_sorted());
        assert_eq!(spec[3].index, 3);

        spec.sort_by_position().unwrap();
        assert!(spec.is_sorted());
        let mzs: Vec<f64> = spec.iter().map(|p| p.mz).collect();
        assert_eq!(mzs, vec![1000.0, 1000.0, 1001.0, 1002.0]);

        // equal positions stay distinct, in their original relative order
        assert_eq!(spec[0].intensity, 100.0);
        assert_eq!(spec[1].intensity, 3.0);
        for (i, p) in spec.iter().enumerate() {
            assert_eq!(p.index as usize, i);
        }
    }

    #[test_log::test]
    fn test_sort_rejects_non_finite() {
        let mut spec = unsorted();
        spec.push(Peak::new(f64::NAN, 5.0, 0));
        let before = spec.clone();
        let err = spec.sort_by_position().unwrap_err();
        assert!(matches!(err, SpectrumError::NonFinitePosition { index: 4, .. }));
        assert_eq!(spec, before);

        let mut spec = unsorted();
        spec.push(Peak::new(999.0, -1.0, 0));
        assert_eq!(
            spec.sort_by_position(),
            Err(SpectrumError::InvalidIntensity {
                index: 4,
                intensity: -1.0
            })
        );
    }

    #[test]
    fn test_empty() {
        let mut spec = Spectrum::empty();
        assert!(spec.is_empty());
        spec.sort_by_position().unwrap();
        assert!(spec.is_sorted());
        assert_eq!(spec.to_string(), "Spectrum(<0 Peaks>)");
    }

    #[test]
    fn test_from_peak_set() {
        let peaks = mzpeaks::PeakSet::new(vec![
            mzpeaks::CentroidPeak::new(400.2, 12.0, 0),
            mzpeaks::CentroidPeak::new(401.2, 6.0, 1),
        ]);
        let spec = Spectrum::from(&peaks);
        assert_eq!(spec.len(), 2);
        assert_eq!(spec[1].mz, 401.2);
        assert!(spec.is_sorted());
    }
}
