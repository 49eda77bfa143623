pub mod peak;
pub mod spectrum;

pub use mzpeaks::{
    CentroidLike, CoordinateLike, IndexType, IndexedCoordinate, IntensityMeasurement, MZLocated,
    MZ,
};

pub use crate::peaks::peak::Peak;
pub use crate::peaks::spectrum::{Spectrum, SpectrumError};
