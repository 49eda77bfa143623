//! Theoretical isotope distributions estimated from a mass and an averaged
//! elemental composition.
pub mod distribution;
pub mod model;

pub use distribution::{IsotopeDistribution, IsotopeDistributionError, IsotopeDistributionIter};
pub use model::{IsotopeModel, IsotopeModelError, DEFAULT_MAX_ISOTOPES, PEPTIDE_AVERAGINE};
