//! `mzmarker` annotates the peaks of centroided mass spectra that take part in
//! spectral relationships, starting with isotopic envelopes.
//!
//! A [`Spectrum`] is a list of [`Peak`]s. A [`PeakMarker`] inspects a spectrum
//! and records the positions it considers related in a [`PeakMarks`] set. The
//! [`IsotopeMarker`] compares pairs of peaks against the isotopic distribution
//! an averagine [`IsotopeModel`] predicts for the lighter peak's mass.
//!
//! ```
//! use mzmarker::prelude::*;
//! use mzmarker::{MarkerRegistry, Param, Spectrum};
//!
//! let registry = MarkerRegistry::default();
//! let marker = registry
//!     .create_with("IsotopeMarker", &[Param::new_key_value("mz_variation", 0.05)])
//!     .unwrap();
//! let mut spectrum: Spectrum = vec![(1000.0, 100.0f32), (1001.0, 57.0), (1500.0, 3.0)]
//!     .into_iter()
//!     .collect();
//! let marks = marker.mark(&mut spectrum).unwrap();
//! assert_eq!(marks.to_vec(), vec![1000.0, 1001.0]);
//! ```
pub mod io;
pub mod isotopes;
pub mod marker;
pub mod params;
pub mod peaks;
pub mod prelude;

pub use crate::peaks::MZ;
pub use crate::peaks::{Peak, Spectrum, SpectrumError};

pub use crate::isotopes::{IsotopeDistribution, IsotopeModel, IsotopeModelError};

pub use crate::marker::{
    mark_spectra, IsotopeMarker, IsotopeMarkerParams, IsotopeReference, Marker, MarkerError,
    MarkerRegistry, PeakMarker, PeakMarks,
};

pub use crate::params::{Param, ParamError, ParamList};
