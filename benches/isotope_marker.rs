use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mzmarker::isotopes::IsotopeModel;
use mzmarker::prelude::*;
use mzmarker::{mark_spectra, IsotopeMarker, Peak, Spectrum};

/// Build a spectrum of `n_envelopes` averagine envelopes interleaved with
/// noise peaks, in descending m/z order so the marker has to sort it.
fn synthetic_spectrum(n_envelopes: usize) -> Spectrum {
    let model = IsotopeModel::peptide();
    let mut peaks = Vec::new();
    for i in 0..n_envelopes {
        let mono = 400.0 + (i as f64) * 7.37;
        let base = 1000.0 + ((i * 37) % 11) as f32 * 250.0;
        let dist = model.estimate(mono).unwrap();
        for (k, abundance) in dist.iter().take(4) {
            peaks.push(Peak::new(
                mono + k as f64,
                base * (abundance / dist.monoisotopic()) as f32,
                0,
            ));
        }
        peaks.push(Peak::new(mono + 0.41, base * 0.03, 0));
    }
    peaks.reverse();
    Spectrum::new(peaks)
}

fn isotope_marker(c: &mut Criterion) {
    let marker = IsotopeMarker::new();
    let spectrum = synthetic_spectrum(500);
    c.bench_function("isotope_marker_single", |b| {
        b.iter(|| {
            let mut spectrum = spectrum.clone();
            marker.mark(black_box(&mut spectrum))
        })
    });

    let batch: Vec<Spectrum> = (0..16).map(|i| synthetic_spectrum(100 + i * 10)).collect();
    c.bench_function("isotope_marker_batch", |b| {
        b.iter(|| {
            let mut batch = batch.clone();
            mark_spectra(&marker, black_box(&mut batch))
        })
    });
}

criterion_group!(benches, isotope_marker);
criterion_main!(benches);
