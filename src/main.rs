use std::env;
use std::error::Error;
use std::process;

use log::info;

use mzmarker::io::XyReader;
use mzmarker::prelude::*;
use mzmarker::{IsotopeMarker, MarkerRegistry, Param};

fn usage(registry: &MarkerRegistry) -> ! {
    eprintln!("Usage: mzmarker <peaks.xy> [marker-name] [name=value ...]");
    eprintln!(
        "Markers: {}",
        registry.names().collect::<Vec<_>>().join(", ")
    );
    process::exit(1)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let registry = MarkerRegistry::default();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        usage(&registry)
    };

    let mut name = IsotopeMarker::NAME.to_string();
    let mut params = Vec::new();
    for arg in args {
        if arg.contains('=') {
            params.push(arg.parse::<Param>()?);
        } else {
            name = arg;
        }
    }

    let marker = registry.create_with(&name, &params)?;
    let mut spectrum = XyReader::open_path(&path)?.read_spectrum()?;
    let marks = marker.mark(&mut spectrum)?;

    for peak in spectrum.iter().filter(|p| marks.is_marked(p.mz)) {
        println!("{}\t{}", peak.mz, peak.intensity);
    }
    info!(
        "{} marked {} of {} peaks in {path}",
        marker.name(),
        marks.len(),
        spectrum.len()
    );
    Ok(())
}
