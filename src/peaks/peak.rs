use std::cmp;
use std::fmt;

use mzpeaks::{
    CentroidLike, CentroidPeak, CoordinateLike, IndexType, IndexedCoordinate, IntensityMeasurement,
    MZ,
};

/// A single m/z-intensity measurement in a [`Spectrum`](crate::peaks::Spectrum).
///
/// `index` records the peak's position in its spectrum as of the last
/// sort. Two peaks at the same m/z are still separate entries.
///
/// Unlike [`CentroidPeak`], equality is exact: two peaks are equal when their
/// m/z and intensity compare equal, and ordering is by m/z, then intensity.
#[derive(Default, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Peak {
    pub mz: f64,
    pub intensity: f32,
    pub index: IndexType,
}

impl Peak {
    pub fn new(mz: f64, intensity: f32, index: IndexType) -> Self {
        Self {
            mz,
            intensity,
            index,
        }
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Peak({}, {}, {})", self.mz, self.intensity, self.index)
    }
}

impl cmp::PartialOrd<Peak> for Peak {
    fn partial_cmp(&self, other: &Peak) -> Option<cmp::Ordering> {
        match self.mz.partial_cmp(&other.mz) {
            Some(cmp::Ordering::Equal) => self.intensity.partial_cmp(&other.intensity),
            ord => ord,
        }
    }
}

impl cmp::PartialEq<Peak> for Peak {
    fn eq(&self, other: &Peak) -> bool {
        self.mz == other.mz && self.intensity == other.intensity
    }
}

impl CoordinateLike<MZ> for Peak {
    #[inline]
    fn coordinate(&self) -> f64 {
        self.mz
    }
}

impl IndexedCoordinate<MZ> for Peak {
    fn get_index(&self) -> IndexType {
        self.index
    }

    fn set_index(&mut self, index: IndexType) {
        self.index = index;
    }
}

impl IntensityMeasurement for Peak {
    #[inline]
    fn intensity(&self) -> f32 {
        self.intensity
    }
}

impl From<(f64, f32)> for Peak {
    fn from((mz, intensity): (f64, f32)) -> Self {
        Self::new(mz, intensity, 0)
    }
}

impl From<&CentroidPeak> for Peak {
    fn from(peak: &CentroidPeak) -> Self {
        Self::new(peak.mz, peak.intensity, peak.index)
    }
}

impl From<CentroidPeak> for Peak {
    fn from(peak: CentroidPeak) -> Self {
        (&peak).into()
    }
}

impl From<Peak> for CentroidPeak {
    fn from(peak: Peak) -> Self {
        peak.as_centroid()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use mzpeaks::MZLocated;

    #[test]
    fn test_ordering_by_mz() {
        let a = Peak::new(500.0, 10.0, 0);
        let b = Peak::new(500.5, 1.0, 1);
        assert!(a < b);
        assert_eq!(a.mz(), 500.0);
        assert_eq!(IntensityMeasurement::intensity(&b), 1.0);
    }

    #[test]
    fn test_equality_ignores_index() {
        let a = Peak::new(500.0, 10.0, 0);
        let b = Peak::new(500.0, 10.0, 7);
        assert_eq!(a, b);
        assert_eq!(a.partial_cmp(&b), Some(cmp::Ordering::Equal));
        assert_ne!(a, Peak::new(500.0, 11.0, 0));
    }

    #[test]
    fn test_ordering_agrees_with_equality() {
        let dim = Peak::new(500.0, 1.0, 0);
        let bright = Peak::new(500.0, 2.0, 0);
        assert_ne!(dim, bright);
        assert_eq!(dim.partial_cmp(&bright), Some(cmp::Ordering::Less));
        assert_eq!(bright.partial_cmp(&dim), Some(cmp::Ordering::Greater));

        let lighter = Peak::new(499.0, 100.0, 0);
        assert!(lighter < dim);

        let nan = Peak::new(f64::NAN, 1.0, 0);
        assert_ne!(nan, nan);
        assert_eq!(nan.partial_cmp(&nan), None);
    }

    #[test]
    fn test_centroid_conversion() {
        let c = CentroidPeak::new(301.5, 42.0, 3);
        let p: Peak = (&c).into();
        assert_eq!(p.mz, 301.5);
        assert_eq!(p.intensity, 42.0);
        assert_eq!(p.index, 3);
        assert_eq!(p.to_string(), "Peak(301.5, 42, 3)");

        let back: CentroidPeak = p.into();
        assert_eq!(back.index, 3);
        assert_eq!(back.as_centroid().mz, 301.5);
    }
}
