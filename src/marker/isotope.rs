//! Mark peak pairs which could represent an ion and one of its isotopes.
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use log::{debug, trace, warn};
use num_traits::Float;
use ordered_float::OrderedFloat;

use crate::isotopes::{IsotopeDistribution, IsotopeModel, DEFAULT_MAX_ISOTOPES};
use crate::params::{Param, ParamError, ParamLike, ParamList, Unit};
use crate::peaks::Spectrum;

use super::marks::PeakMarks;
use super::traits::{MarkerError, PeakMarker};

/// How many isotope steps past a candidate monoisotopic peak are searched
pub const ISOTOPE_WINDOW: f64 = 3.0;

/// Which entry of the theoretical distribution the expected intensity of a
/// neighbouring peak is computed from
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsotopeReference {
    /// Always the offset 0 abundance, whatever the isotope offset of the pair
    #[default]
    Monoisotopic,
    /// The abundance at the pair's isotope offset
    Offset,
}

impl Display for IsotopeReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monoisotopic => f.write_str("monoisotopic"),
            Self::Offset => f.write_str("offset"),
        }
    }
}

impl FromStr for IsotopeReference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monoisotopic" => Ok(Self::Monoisotopic),
            "offset" => Ok(Self::Offset),
            _ => Err(s.to_string()),
        }
    }
}

/// The configuration of an [`IsotopeMarker`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsotopeMarkerParams {
    /// How many accepted isotope pairs a peak must take part in to be marked
    pub marks: u32,
    /// The m/z tolerance on the distance between isotope peaks
    pub mz_variation: f64,
    /// The intensity tolerance as a fraction of the theoretical isotope peak
    pub in_variation: f64,
    /// The number of isotope offsets the theoretical distribution is truncated to
    pub max_isotopes: usize,
    pub reference: IsotopeReference,
}

impl Default for IsotopeMarkerParams {
    fn default() -> Self {
        Self {
            marks: 1,
            mz_variation: 0.1,
            in_variation: 0.5,
            max_isotopes: DEFAULT_MAX_ISOTOPES,
            reference: IsotopeReference::Monoisotopic,
        }
    }
}

impl IsotopeMarkerParams {
    pub const MARKS: &'static str = "marks";
    pub const MZ_VARIATION: &'static str = "mz_variation";
    pub const IN_VARIATION: &'static str = "in_variation";
    pub const MAX_ISOTOPES: &'static str = "max_isotopes";
    pub const REFERENCE: &'static str = "reference";

    pub fn builder() -> IsotopeMarkerParamsBuilder {
        IsotopeMarkerParamsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), MarkerError> {
        if self.marks == 0 {
            return Err(MarkerError::InvalidConfiguration(
                "marks must be at least 1".to_string(),
            ));
        }
        if !(self.mz_variation.is_finite() && self.mz_variation >= 0.0) {
            return Err(MarkerError::InvalidConfiguration(format!(
                "mz_variation must be a non-negative number, got {}",
                self.mz_variation
            )));
        }
        if !(self.in_variation.is_finite() && self.in_variation >= 0.0) {
            return Err(MarkerError::InvalidConfiguration(format!(
                "in_variation must be a non-negative number, got {}",
                self.in_variation
            )));
        }
        if self.max_isotopes == 0 {
            return Err(MarkerError::InvalidConfiguration(
                "max_isotopes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Overwrite the named fields from `param`
    fn update(&mut self, param: &Param) -> Result<(), ParamError> {
        match param.name() {
            Self::MARKS => self.marks = param.parse_value()?,
            Self::MZ_VARIATION => self.mz_variation = param.parse_value()?,
            Self::IN_VARIATION => self.in_variation = param.parse_value()?,
            Self::MAX_ISOTOPES => self.max_isotopes = param.parse_value()?,
            Self::REFERENCE => self.reference = param.parse_value()?,
            name => return Err(ParamError::Unknown(name.to_string())),
        }
        Ok(())
    }

    pub fn to_params(&self) -> ParamList {
        vec![
            Param::new_key_value(Self::MARKS, self.marks).with_unit_t(&Unit::Count),
            Param::new_key_value(Self::MZ_VARIATION, self.mz_variation).with_unit_t(&Unit::MZ),
            Param::new_key_value(Self::IN_VARIATION, self.in_variation)
                .with_unit_t(&Unit::Fraction),
            Param::new_key_value(Self::MAX_ISOTOPES, self.max_isotopes)
                .with_unit_t(&Unit::Count),
            Param::new_key_value(Self::REFERENCE, self.reference),
        ]
    }

    /// Build a configuration from the defaults and named overrides
    pub fn from_params(params: &[Param]) -> Result<Self, MarkerError> {
        let mut this = Self::default();
        for param in params {
            this.update(param)?;
        }
        this.validate()?;
        Ok(this)
    }
}

/// A builder for [`IsotopeMarkerParams`], starting from the defaults.
#[derive(Debug, Default, Clone)]
pub struct IsotopeMarkerParamsBuilder {
    params: IsotopeMarkerParams,
}

impl IsotopeMarkerParamsBuilder {
    pub fn marks(mut self, marks: u32) -> Self {
        self.params.marks = marks;
        self
    }

    pub fn mz_variation(mut self, mz_variation: f64) -> Self {
        self.params.mz_variation = mz_variation;
        self
    }

    pub fn in_variation(mut self, in_variation: f64) -> Self {
        self.params.in_variation = in_variation;
        self
    }

    pub fn max_isotopes(mut self, max_isotopes: usize) -> Self {
        self.params.max_isotopes = max_isotopes;
        self
    }

    pub fn reference(mut self, reference: IsotopeReference) -> Self {
        self.params.reference = reference;
        self
    }

    pub fn build(self) -> Result<IsotopeMarkerParams, MarkerError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Marks peak pairs which could represent an ion and its isotope.
///
/// Every peak is treated in turn as a monoisotopic candidate. Its m/z is used
/// as a stand-in for its mass to estimate an averagine isotope distribution,
/// and every later peak within [`ISOTOPE_WINDOW`] isotope steps (plus the m/z
/// tolerance) is tested:
///
/// 1. The pair must be a whole, non-zero number of mass units apart, within
///    `mz_variation`.
/// 2. The later peak's intensity must be within `in_variation` (as a fraction)
///    of the candidate's intensity scaled by the theoretical abundance ratio.
///
/// Both peaks of an accepted pair get one vote. Peaks with at least `marks`
/// votes are marked.
///
/// By default the abundance ratio is always the monoisotopic abundance of the
/// distribution, whichever isotope offset the pair spans. Setting
/// [`IsotopeMarkerParams::reference`] to [`IsotopeReference::Offset`] looks up
/// the abundance at the pair's offset instead.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeMarker {
    params: IsotopeMarkerParams,
    model: IsotopeModel,
}

impl Default for IsotopeMarker {
    fn default() -> Self {
        let params = IsotopeMarkerParams::default();
        Self {
            model: IsotopeModel::peptide().with_max_isotopes(params.max_isotopes),
            params,
        }
    }
}

#[inline]
fn round_half_up<T: Float>(x: T) -> T {
    let half = T::one() / (T::one() + T::one());
    (x + half).floor()
}

/// Whether `observed` is within `tolerance * expected` of `expected`. An
/// expected intensity of zero only matches an observed intensity of zero.
#[inline]
fn intensity_matches(expected: f64, observed: f64, tolerance: f64) -> bool {
    if expected == 0.0 {
        observed == 0.0
    } else {
        (expected - observed).abs() < tolerance * expected
    }
}

impl IsotopeMarker {
    pub const NAME: &'static str = "IsotopeMarker";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: IsotopeMarkerParams) -> Result<Self, MarkerError> {
        let mut this = Self::default();
        this.set_params(params)?;
        Ok(this)
    }

    pub fn params(&self) -> &IsotopeMarkerParams {
        &self.params
    }

    pub fn set_params(&mut self, params: IsotopeMarkerParams) -> Result<(), MarkerError> {
        params.validate()?;
        if params.in_variation > 1.0 {
            warn!(
                "in_variation {} is wider than the expected intensity itself",
                params.in_variation
            );
        }
        self.model = self.model.clone().with_max_isotopes(params.max_isotopes);
        self.params = params;
        Ok(())
    }

    pub fn model(&self) -> &IsotopeModel {
        &self.model
    }

    fn reference_abundance(&self, distribution: &IsotopeDistribution, offset: usize) -> f64 {
        match self.params.reference {
            IsotopeReference::Monoisotopic => distribution.monoisotopic(),
            IsotopeReference::Offset => distribution.abundance(offset),
        }
    }

    /// Count how many accepted isotope pairs each position takes part in.
    /// `spectrum` must already be sorted by m/z.
    fn count_votes(
        &self,
        spectrum: &Spectrum,
    ) -> Result<(BTreeMap<OrderedFloat<f64>, u32>, usize), MarkerError> {
        let mz_variation = self.params.mz_variation;
        let in_variation = self.params.in_variation;
        let peaks = spectrum.as_slice();

        let mut votes: BTreeMap<OrderedFloat<f64>, u32> = BTreeMap::new();
        let mut accepted = 0;

        for (i, candidate) in peaks.iter().enumerate() {
            let mz = candidate.mz;
            let intensity = candidate.intensity as f64;
            let distribution = self.model.estimate(mz)?;
            let upper_bound = mz + ISOTOPE_WINDOW + mz_variation;

            for neighbor in peaks[i + 1..]
                .iter()
                .take_while(|p| p.mz <= upper_bound)
            {
                let delta = neighbor.mz - mz;
                let iso = round_half_up(delta);
                if iso == 0.0 || (delta - iso).abs() > mz_variation {
                    continue;
                }
                let expected = self.reference_abundance(&distribution, iso as usize) * intensity;
                if intensity_matches(expected, neighbor.intensity as f64, in_variation) {
                    trace!(
                        "Isotope pair {mz:.4} -> {:.4} (+{iso}), expected {expected:.2}, observed {:.2}",
                        neighbor.mz,
                        neighbor.intensity
                    );
                    *votes.entry(OrderedFloat(mz)).or_default() += 1;
                    *votes.entry(OrderedFloat(neighbor.mz)).or_default() += 1;
                    accepted += 1;
                }
            }
        }
        Ok((votes, accepted))
    }
}

impl PeakMarker for IsotopeMarker {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, marks: &mut PeakMarks, spectrum: &mut Spectrum) -> Result<(), MarkerError> {
        self.params.validate()?;
        spectrum.sort_by_position()?;

        let (votes, accepted) = self.count_votes(spectrum)?;
        let mut marked = 0;
        for (mz, count) in votes.iter() {
            if *count >= self.params.marks && marks.mark(mz.0) {
                marked += 1;
            }
        }
        debug!(
            "{} marked {marked} new positions from {accepted} isotope pairs over {} peaks",
            Self::NAME,
            spectrum.len()
        );
        Ok(())
    }

    fn parameters(&self) -> ParamList {
        self.params.to_params()
    }

    fn set_parameters(&mut self, params: &[Param]) -> Result<(), MarkerError> {
        let mut updated = self.params;
        for param in params {
            updated.update(param)?;
        }
        self.set_params(updated)
    }
}
