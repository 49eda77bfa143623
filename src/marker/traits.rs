use thiserror::Error;

use crate::isotopes::IsotopeModelError;
use crate::params::{Param, ParamError, ParamList};
use crate::peaks::{Spectrum, SpectrumError};

use super::marks::PeakMarks;

/// Errors that may arise while configuring or running a [`PeakMarker`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkerError {
    #[error("Invalid marker configuration: {0}")]
    InvalidConfiguration(String),
    #[error("The spectrum could not be ordered by m/z: {0}")]
    MalformedSpectrum(
        #[from]
        #[source]
        SpectrumError,
    ),
    #[error("The theoretical isotope distribution could not be estimated: {0}")]
    IsotopeModel(
        #[from]
        #[source]
        IsotopeModelError,
    ),
    #[error("No peak marker named {0:?} is registered")]
    UnknownMarker(String),
    #[error("An error occurred while reading marker parameters: {0}")]
    Parameter(
        #[from]
        #[source]
        ParamError,
    ),
}

/// Something that looks at a spectrum and marks the peaks that satisfy some
/// spectral relationship.
///
/// Markers are additive: [`PeakMarker::apply`] only ever adds positions to the
/// [`PeakMarks`] it is given, so several markers, or several configurations of
/// one marker, can be run over the same accumulator.
pub trait PeakMarker {
    /// A stable name, unique to each kind of marker, used for registry lookup
    fn name(&self) -> &str;

    /// Inspect `spectrum` and add the positions of the peaks this marker
    /// accepts to `marks`.
    ///
    /// `spectrum` may be sorted by m/z in place. A configuration error or a
    /// spectrum that cannot be ordered is reported before any marks are added.
    fn apply(&self, marks: &mut PeakMarks, spectrum: &mut Spectrum) -> Result<(), MarkerError>;

    /// The marker's current configuration as named parameters
    fn parameters(&self) -> ParamList;

    /// Update the marker's configuration from named parameters. Parameters not
    /// mentioned keep their current value. Nothing is changed if any parameter
    /// is unknown, unparsable or leaves the configuration invalid.
    fn set_parameters(&mut self, params: &[Param]) -> Result<(), MarkerError>;

    /// Mark `spectrum` into a fresh [`PeakMarks`]
    fn mark(&self, spectrum: &mut Spectrum) -> Result<PeakMarks, MarkerError> {
        let mut marks = PeakMarks::new();
        self.apply(&mut marks, spectrum)?;
        Ok(marks)
    }
}
