//! Read centroided peak lists stored as two-column text.
mod reader;

pub use reader::*;

/// Check whether the first non-comment line of `buf` looks like an
/// `<mz> <intensity>` pair
pub fn is_xy(buf: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(buf) else {
        return false;
    };
    let first = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'));
    match first {
        None => false,
        Some(line) => {
            let mut columns = line.split_whitespace();
            match (columns.next(), columns.next()) {
                (Some(mz), Some(intensity)) => {
                    mz.parse::<f64>().is_ok() && intensity.parse::<f32>().is_ok()
                }
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_xy() {
        assert!(is_xy(b"# header\n\n1000.5\t20.0\n"));
        assert!(is_xy(b"1000.5 20"));
        assert!(!is_xy(b"BEGIN IONS\nPEPMASS=1000.5\n"));
        assert!(!is_xy(b"1000.5\n"));
        assert!(!is_xy(&[0xff, 0xfe, 0x00]));
    }
}
