use chemical_elements::isotopic_pattern::{
    BafflingRecursiveIsotopicPatternGenerator, TheoreticalIsotopicPattern,
};
use chemical_elements::{ChemicalComposition, ElementSpecification, PROTON};
use log::trace;
use thiserror::Error;

use super::distribution::IsotopeDistribution;

/// The average amino acid residue composition of Senko et al.
pub const PEPTIDE_AVERAGINE: [(&str, f64); 5] = [
    ("C", 4.9384),
    ("H", 7.7583),
    ("N", 1.3577),
    ("O", 1.4773),
    ("S", 0.0417),
];

/// The default number of isotope offsets a distribution is truncated to
pub const DEFAULT_MAX_ISOTOPES: usize = 10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsotopeModelError {
    #[error("{0:?} is not a known element")]
    UnknownElement(String),
    #[error("Cannot scale the base composition to mass {mass}, an element would need {count} atoms")]
    MassOutOfRange { mass: f64, count: f64 },
}

/// A model for estimating an isotope distribution from a mass alone, by
/// scaling an "average monomer" composition up to that mass.
///
/// This is an implementation of [Senko's Averagine][1] over nominal isotope
/// offsets.
///
/// # References
/// - [1]: <https://doi.org/10.1016/1044-0305(95)00017-8>
///     Senko M, Beu S, McLafferty F: Determination of Monoisotopic Masses and Ion
///     Populations for Large Biomolecules from Resolved Isotopic Distributions.
///     Journal of the American Society for Mass Spectrometry 1995, 6:229-233
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeModel {
    base_composition: Vec<(ElementSpecification<'static>, f64)>,
    base_mass: f64,
    hydrogen: ElementSpecification<'static>,
    max_isotopes: usize,
}

impl Default for IsotopeModel {
    fn default() -> Self {
        Self::peptide()
    }
}

fn parse_element(symbol: &'static str) -> Result<ElementSpecification<'static>, IsotopeModelError> {
    ElementSpecification::parse(symbol)
        .map_err(|_| IsotopeModelError::UnknownElement(symbol.to_string()))
}

impl IsotopeModel {
    /// Create a new [`IsotopeModel`] from a fractional composition given as
    /// element symbols and their average counts
    pub fn new<I: IntoIterator<Item = (&'static str, f64)>>(
        base_composition: I,
    ) -> Result<Self, IsotopeModelError> {
        let base_composition = base_composition
            .into_iter()
            .map(|(symbol, count)| parse_element(symbol).map(|e| (e, count)))
            .collect::<Result<Vec<_>, _>>()?;
        let base_mass = base_composition
            .iter()
            .map(|(e, c)| e.element.most_abundant_mass * *c)
            .sum();
        Ok(Self {
            base_composition,
            base_mass,
            hydrogen: parse_element("H")?,
            max_isotopes: DEFAULT_MAX_ISOTOPES,
        })
    }

    /// The peptide averagine model
    pub fn peptide() -> Self {
        Self::new(PEPTIDE_AVERAGINE).expect("averagine is made of known elements")
    }

    /// Limit estimated distributions to `max_isotopes` offsets, at least one
    pub fn with_max_isotopes(mut self, max_isotopes: usize) -> Self {
        self.max_isotopes = max_isotopes.max(1);
        self
    }

    pub fn max_isotopes(&self) -> usize {
        self.max_isotopes
    }

    /// The mass of one unit of the base composition
    pub fn base_mass(&self) -> f64 {
        self.base_mass
    }

    pub fn base_composition(&self) -> &[(ElementSpecification<'static>, f64)] {
        &self.base_composition
    }

    /// Scale the base composition to an integral composition whose mass is
    /// as close to `mass` as whole hydrogens allow.
    ///
    /// Masses that are not positive and finite scale to an empty composition.
    /// An error is returned if an element count does not fit in the
    /// composition.
    pub fn scale(&self, mass: f64) -> Result<ChemicalComposition<'static>, IsotopeModelError> {
        let mut scaled = ChemicalComposition::new();
        if !(mass.is_finite() && mass > 0.0 && self.base_mass > 0.0) {
            return Ok(scaled);
        }
        let scale = mass / self.base_mass;
        for (elt, count) in self.base_composition.iter() {
            let n = (*count * scale).round();
            if n > i32::MAX as f64 {
                return Err(IsotopeModelError::MassOutOfRange { mass, count: n });
            }
            scaled.set(*elt, n as i32);
        }

        if self.base_composition.iter().any(|(e, _)| *e == self.hydrogen) {
            let delta = (scaled.mass() - mass).round() as i32;
            let hydrogens = scaled[&self.hydrogen];
            if hydrogens > delta {
                scaled[&self.hydrogen] -= delta;
            } else {
                scaled[&self.hydrogen] = 0;
            }
        }
        Ok(scaled)
    }

    /// Estimate the isotope distribution of a species of mass `mass`.
    ///
    /// The result depends only on `mass` and the model, so the same mass
    /// always produces the same distribution. Masses that are not positive
    /// and finite produce a lone monoisotopic peak.
    pub fn estimate(&self, mass: f64) -> Result<IsotopeDistribution, IsotopeModelError> {
        let composition = self.scale(mass)?;
        if composition.mass() <= 0.0 {
            return Ok(IsotopeDistribution::monoisotopic_only());
        }
        let npeaks = i32::try_from(self.max_isotopes).unwrap_or(i32::MAX);
        let peaks = BafflingRecursiveIsotopicPatternGenerator::new()
            .isotopic_variants(composition, npeaks, 1, PROTON);
        let pattern = TheoreticalIsotopicPattern::from(peaks);
        let abundances: Vec<f64> = pattern
            .iter()
            .take(self.max_isotopes)
            .map(|p| p.intensity)
            .collect();
        let mut dist = IsotopeDistribution::new(abundances);
        dist.renormalize();
        trace!("Estimated {dist} for mass {mass:.4}");
        Ok(dist)
    }
}
