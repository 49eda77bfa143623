//! Reading peak lists and feeding spectra through a marking pipeline.
pub mod consumer;
pub mod xy;

pub use crate::io::consumer::{MarkingConsumer, SpectrumConsumer};
pub use crate::io::xy::{is_xy, XyParserError, XyReader};

use crate::marker::MarkerError;
use crate::peaks::Spectrum;

/// Drain `source` into `consumer`, returning how many spectra were consumed.
///
/// Stops at the first spectrum the consumer rejects.
pub fn transform<I, C>(source: I, consumer: &mut C) -> Result<usize, MarkerError>
where
    I: IntoIterator<Item = Spectrum>,
    C: SpectrumConsumer,
{
    let iter = source.into_iter();
    if let (lower, Some(upper)) = iter.size_hint() {
        if lower == upper {
            consumer.set_expected_size(upper);
        }
    }
    let mut count = 0;
    for mut spectrum in iter {
        consumer.consume_spectrum(&mut spectrum)?;
        count += 1;
    }
    log::debug!("Consumed {count} spectra");
    Ok(count)
}
