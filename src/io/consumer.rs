use log::trace;

use crate::marker::{MarkerError, PeakMarker, PeakMarks};
use crate::peaks::Spectrum;

/// A sink for a stream of spectra, like the tail end of a processing pipeline.
///
/// Implementations are told how many spectra to expect, when that is known up
/// front, and are then handed each spectrum in turn.
pub trait SpectrumConsumer {
    /// Prepare for `size` spectra. Does nothing by default.
    fn set_expected_size(&mut self, size: usize) {
        let _ = size;
    }

    /// Process one spectrum. The spectrum may be reordered in place.
    fn consume_spectrum(&mut self, spectrum: &mut Spectrum) -> Result<(), MarkerError>;
}

/// A [`SpectrumConsumer`] that marks every spectrum it receives with a
/// [`PeakMarker`] and keeps the resulting [`PeakMarks`] in arrival order.
#[derive(Debug)]
pub struct MarkingConsumer<M: PeakMarker> {
    marker: M,
    results: Vec<PeakMarks>,
}

impl<M: PeakMarker> MarkingConsumer<M> {
    pub fn new(marker: M) -> Self {
        Self {
            marker,
            results: Vec::new(),
        }
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }

    pub fn results(&self) -> &[PeakMarks] {
        &self.results
    }

    pub fn into_results(self) -> Vec<PeakMarks> {
        self.results
    }

    /// The number of spectra marked so far
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<M: PeakMarker> SpectrumConsumer for MarkingConsumer<M> {
    fn set_expected_size(&mut self, size: usize) {
        self.results.reserve(size);
    }

    fn consume_spectrum(&mut self, spectrum: &mut Spectrum) -> Result<(), MarkerError> {
        let marks = self.marker.mark(spectrum)?;
        trace!(
            "{} marked {} of {} peaks in spectrum {}",
            self.marker.name(),
            marks.len(),
            spectrum.len(),
            self.results.len()
        );
        self.results.push(marks);
        Ok(())
    }
}
