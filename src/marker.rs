//! Peak markers annotate the peaks of a [`Spectrum`] that take part in some
//! spectral relationship, like an isotopic envelope.
//!
//! The shared contract is the [`PeakMarker`] trait. Concrete markers can be
//! used directly, or created by name from a [`MarkerRegistry`] as a
//! [`Marker`].
//!
//! ```
//! use mzmarker::prelude::*;
//! use mzmarker::{IsotopeMarker, IsotopeMarkerParams, Spectrum};
//!
//! let params = IsotopeMarkerParams::builder()
//!     .mz_variation(0.05)
//!     .in_variation(0.5)
//!     .build()
//!     .unwrap();
//! let marker = IsotopeMarker::with_params(params).unwrap();
//! let mut spectrum: Spectrum = vec![(1001.0, 57.0f32), (1000.0, 100.0)].into_iter().collect();
//! let marks = marker.mark(&mut spectrum).unwrap();
//! assert!(marks.is_marked(1000.0));
//! assert!(marks.is_marked(1001.0));
//! ```
mod dispatch;
mod isotope;
mod marks;
mod registry;
mod traits;

pub use dispatch::Marker;
pub use isotope::{
    IsotopeMarker, IsotopeMarkerParams, IsotopeMarkerParamsBuilder, IsotopeReference,
    ISOTOPE_WINDOW,
};
pub use marks::{PeakMarks, PeakMarksIter};
pub use registry::{MarkerConstructor, MarkerRegistry};
pub use traits::{MarkerError, PeakMarker};

use crate::peaks::Spectrum;

/// Mark each of `spectra` independently with `marker`, returning one
/// [`PeakMarks`] per spectrum in the same order.
///
/// With the `parallelism` feature enabled, spectra are processed in parallel.
/// The first error encountered is returned.
pub fn mark_spectra<M: PeakMarker + Sync>(
    marker: &M,
    spectra: &mut [Spectrum],
) -> Result<Vec<PeakMarks>, MarkerError> {
    #[cfg(feature = "parallelism")]
    {
        use rayon::prelude::*;
        spectra
            .par_iter_mut()
            .map(|spectrum| marker.mark(spectrum))
            .collect()
    }
    #[cfg(not(feature = "parallelism"))]
    {
        spectra
            .iter_mut()
            .map(|spectrum| marker.mark(spectrum))
            .collect()
    }
}
