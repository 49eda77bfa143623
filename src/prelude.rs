pub use crate::io::consumer::SpectrumConsumer;
pub use crate::marker::PeakMarker;
pub use crate::params::ParamLike;
pub use crate::peaks::{CentroidLike, CoordinateLike, IndexedCoordinate, IntensityMeasurement, MZLocated};
