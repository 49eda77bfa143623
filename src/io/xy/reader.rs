use std::{
    fs,
    io::{self, BufRead, BufReader, Read, Seek},
    num::ParseFloatError,
    path::Path,
};

use thiserror::Error;

use crate::peaks::{Peak, Spectrum};

#[derive(Debug, Error)]
pub enum XyParserError {
    #[error("Invalid number on line {0:?}: {1}")]
    InvalidNumber(String, #[source] ParseFloatError),
    #[error("Expected an m/z and an intensity column, got {0:?}")]
    MissingColumns(String),
    #[error("I/O error occurred while reading: {0}")]
    IOError(
        #[from]
        #[source]
        io::Error,
    ),
}

#[derive(Debug, Default)]
pub enum XyParserState {
    #[default]
    Initial,
    Error(XyParserError),
    EOF,
}

/**
A parser that reads .xy peak lists. These files solely contain a single spectrum's
peaks as `<mz> <intensity>` separated by spaces or tabs, one peak per line, in any
m/z order. Blank lines and lines starting with `#` are skipped. No metadata is
stored, so iterating over the reader yields exactly one spectrum, or none if there
was an error while reading.
*/
pub struct XyReader<R: Read> {
    /// The raw reader
    handle: BufReader<R>,
    state: XyParserState,
    extra_column_lines: usize,
}

const BUFFER_SIZE: usize = 8192;

impl<R: Read> XyReader<R> {
    /// Create a new [`XyReader`] instance, wrapping the [`io::Read`] handle
    /// provided with an [`io::BufReader`].
    pub fn new(file: R) -> XyReader<R> {
        Self::with_buffer_capacity(file, BUFFER_SIZE)
    }

    /// Get the error if parsing failed
    pub fn error(&self) -> Option<&XyParserError> {
        match &self.state {
            XyParserState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn with_buffer_capacity(file: R, capacity: usize) -> XyReader<R> {
        let handle = BufReader::with_capacity(capacity, file);
        XyReader {
            handle,
            state: XyParserState::Initial,
            extra_column_lines: 0,
        }
    }

    /// The number of lines read so far with columns past the intensity.
    /// Those columns are ignored.
    pub fn extra_column_lines(&self) -> usize {
        self.extra_column_lines
    }

    /// Parse one line into a peak, and whether the line had trailing columns
    fn parse_line(line: &str) -> Result<Option<(Peak, bool)>, XyParserError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let mut columns = trimmed.split_whitespace();
        match (columns.next(), columns.next()) {
            (Some(mz), Some(intensity)) => {
                let mz = mz
                    .parse::<f64>()
                    .map_err(|e| XyParserError::InvalidNumber(line.to_string(), e))?;
                let intensity = intensity
                    .parse::<f32>()
                    .map_err(|e| XyParserError::InvalidNumber(line.to_string(), e))?;
                Ok(Some((Peak::new(mz, intensity, 0), columns.next().is_some())))
            }
            _ => Err(XyParserError::MissingColumns(line.to_string())),
        }
    }

    /// Read every remaining line of the file into a [`Spectrum`], in file order.
    pub fn read_spectrum(&mut self) -> Result<Spectrum, XyParserError> {
        let mut spectrum = Spectrum::empty();
        let mut line = String::new();
        loop {
            line.clear();
            let z = self.handle.read_line(&mut line)?;
            if z == 0 {
                break;
            }
            if let Some((peak, extra_columns)) = Self::parse_line(&line)? {
                if extra_columns {
                    log::warn!("Ignoring columns after the intensity in {:?}", line.trim());
                    self.extra_column_lines += 1;
                }
                spectrum.push(peak);
            }
        }
        log::debug!("Read {} peaks", spectrum.len());
        Ok(spectrum)
    }

    /// Read the next spectrum directly. Used to implement iteration.
    pub fn read_next(&mut self) -> Option<Spectrum> {
        if !matches!(self.state, XyParserState::Initial) {
            return None;
        }
        match self.read_spectrum() {
            Ok(spectrum) => {
                self.state = XyParserState::EOF;
                Some(spectrum)
            }
            Err(e) => {
                log::warn!("Failed to read peak list: {e}");
                self.state = XyParserState::Error(e);
                None
            }
        }
    }
}

impl<R: Read + Seek> XyReader<R> {
    /// Rewind the underlying stream so the spectrum can be read again
    pub fn reset(&mut self) -> io::Result<()> {
        self.state = XyParserState::Initial;
        self.extra_column_lines = 0;
        self.handle.rewind()
    }
}

impl XyReader<fs::File> {
    pub fn open_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let handle = fs::File::open(path)?;
        Ok(Self::new(handle))
    }
}

/// [`XyReader`] instances are [`Iterator`]s over [`Spectrum`]
impl<R: Read> Iterator for XyReader<R> {
    type Item = Spectrum;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next()
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    #[test_log::test]
    fn simple_xy() {
        let data = "60.406 140051.00
61.680 140877.00
 63.589\t 141602.00
# centroided by hand
65.496 142758.00
67.403 138627.00  0.5
\t\t71.217 140428.00

73.129\t \t138416.00";
        let mut reader = XyReader::new(data.as_bytes());
        let spectrum = reader.next().unwrap();
        assert!(reader.error().is_none());
        assert_eq!(spectrum.len(), 7);
        assert_eq!(spectrum[2].mz, 63.589);
        assert_eq!(spectrum[6].intensity, 138416.0);
        assert_eq!(spectrum[6].index, 6);
        assert_eq!(spectrum[4].intensity, 138627.0);
        assert_eq!(reader.extra_column_lines(), 1);
        assert!(reader.next().is_none());
    }

    #[test_log::test]
    fn bad_xy() {
        let mut reader = XyReader::new("100.0 5.0\n101.0\n".as_bytes());
        assert!(reader.next().is_none());
        assert!(matches!(
            reader.error(),
            Some(XyParserError::MissingColumns(_))
        ));

        let mut reader = XyReader::new("100.0 five\n".as_bytes());
        assert!(matches!(
            reader.read_spectrum(),
            Err(XyParserError::InvalidNumber(_, _))
        ));
    }

    #[test]
    fn reset_and_reread() -> io::Result<()> {
        let mut file = tempfile::tempfile()?;
        writeln!(file, "1001.0\t57.0")?;
        writeln!(file, "1000.0\t100.0")?;
        file.rewind()?;
        let mut reader = XyReader::new(file);
        let first = reader.next().unwrap();
        assert_eq!(reader.extra_column_lines(), 0);
        assert!(reader.next().is_none());
        reader.reset()?;
        let second = reader.next().unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].mz, 1001.0);
        Ok(())
    }
}
