use std::fmt::Debug;

use crate::params::{Param, ParamList};
use crate::peaks::Spectrum;

use super::isotope::IsotopeMarker;
use super::marks::PeakMarks;
use super::traits::{MarkerError, PeakMarker};

/// A marker dispatching ADT over the kinds of [`PeakMarker`] this crate knows
/// about, so that a marker chosen by name at run time can be held by value.
///
/// Marker kinds defined elsewhere can be carried in [`Marker::Custom`].
#[non_exhaustive]
pub enum Marker {
    Isotope(IsotopeMarker),
    Custom(Box<dyn PeakMarker + Send + Sync>),
}

impl Debug for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Isotope(arg0) => f.debug_tuple("Isotope").field(arg0).finish(),
            Self::Custom(arg0) => f.debug_tuple("Custom").field(&arg0.name()).finish(),
        }
    }
}

impl From<IsotopeMarker> for Marker {
    fn from(value: IsotopeMarker) -> Self {
        Self::Isotope(value)
    }
}

impl Marker {
    pub fn as_isotope(&self) -> Option<&IsotopeMarker> {
        match self {
            Self::Isotope(marker) => Some(marker),
            _ => None,
        }
    }
}

impl PeakMarker for Marker {
    fn name(&self) -> &str {
        match self {
            Self::Isotope(marker) => marker.name(),
            Self::Custom(marker) => marker.name(),
        }
    }

    fn apply(&self, marks: &mut PeakMarks, spectrum: &mut Spectrum) -> Result<(), MarkerError> {
        match self {
            Self::Isotope(marker) => marker.apply(marks, spectrum),
            Self::Custom(marker) => marker.apply(marks, spectrum),
        }
    }

    fn parameters(&self) -> ParamList {
        match self {
            Self::Isotope(marker) => marker.parameters(),
            Self::Custom(marker) => marker.parameters(),
        }
    }

    fn set_parameters(&mut self, params: &[Param]) -> Result<(), MarkerError> {
        match self {
            Self::Isotope(marker) => marker.set_parameters(params),
            Self::Custom(marker) => marker.set_parameters(params),
        }
    }
}
