//! Four-line band header
//!
//! ```text
//! 1523.000000      first band background level
//! 1187.500000      second band background level
//! 7321             rows
//! 8011             cols
//! ```
//!
//! Fields are newline-delimited, surrounding whitespace (including `\r`)
//! is ignored, and anything after the fourth line is not read.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Contents of a band header file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandHeader {
    /// Per-band background levels, used as the default boundary values
    pub backgrounds: [f64; 2],
    /// Number of rows in each band grid
    pub rows: usize,
    /// Number of columns in each band grid
    pub cols: usize,
}

impl BandHeader {
    pub fn new(backgrounds: [f64; 2], rows: usize, cols: usize) -> Self {
        Self { backgrounds, rows, cols }
    }

    /// Background level of `band` (0 or 1) as an integer flood level.
    ///
    /// Truncates toward zero, the same way a C float-to-int conversion does.
    pub fn boundary_level(&self, band: usize) -> Result<i64> {
        let value = *self.backgrounds.get(band).ok_or(Error::InvalidParameter {
            name: "band",
            value: band.to_string(),
            reason: "header describes bands 0 and 1 only".to_string(),
        })?;

        if !value.is_finite() || value.abs() >= i64::MAX as f64 {
            return Err(Error::InvalidParameter {
                name: "background",
                value: value.to_string(),
                reason: "not representable as an integer level".to_string(),
            });
        }
        Ok(value.trunc() as i64)
    }

    /// Expected byte length of one raw `i16` band
    pub fn band_bytes(&self) -> Result<u64> {
        (self.rows as u64)
            .checked_mul(self.cols as u64)
            .and_then(|n| n.checked_mul(std::mem::size_of::<i16>() as u64))
            .ok_or(Error::InvalidDimensions {
                width: self.cols,
                height: self.rows,
            })
    }
}

/// Read a band header from a file
pub fn read_header<P: AsRef<Path>>(path: P) -> Result<BandHeader> {
    let file = File::open(path.as_ref())?;
    parse_header(BufReader::new(file))
}

/// Parse a band header from any buffered reader
pub fn parse_header<R: BufRead>(reader: R) -> Result<BandHeader> {
    let mut lines = reader.lines();
    let mut next_field = |line: usize| -> Result<String> {
        match lines.next() {
            Some(text) => {
                let text = text?;
                let field = text.trim();
                if field.is_empty() {
                    return Err(Error::Header {
                        line,
                        reason: "empty field".to_string(),
                    });
                }
                Ok(field.to_string())
            }
            None => Err(Error::Header {
                line,
                reason: "unexpected end of file".to_string(),
            }),
        }
    };

    let first = parse_float(&next_field(1)?, 1)?;
    let second = parse_float(&next_field(2)?, 2)?;
    let rows = parse_dim(&next_field(3)?, 3)?;
    let cols = parse_dim(&next_field(4)?, 4)?;

    Ok(BandHeader::new([first, second], rows, cols))
}

fn parse_float(field: &str, line: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|e| Error::Header {
        line,
        reason: format!("'{}' is not a number: {}", field, e),
    })
}

fn parse_dim(field: &str, line: usize) -> Result<usize> {
    let value = field.parse::<usize>().map_err(|e| Error::Header {
        line,
        reason: format!("'{}' is not a dimension: {}", field, e),
    })?;
    if value == 0 {
        return Err(Error::Header {
            line,
            reason: "dimension must be positive".to_string(),
        });
    }
    Ok(value)
}

/// Write a band header to a file
pub fn write_header<P: AsRef<Path>>(header: &BandHeader, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_header_to(header, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a band header to any writer
pub fn write_header_to<W: Write>(header: &BandHeader, writer: &mut W) -> Result<()> {
    writeln!(writer, "{:.6}", header.backgrounds[0])?;
    writeln!(writer, "{:.6}", header.backgrounds[1])?;
    writeln!(writer, "{}", header.rows)?;
    writeln!(writer, "{}", header.cols)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_header() {
        let text = "1523.000000\n1187.500000\n7321\n8011\n";
        let header = parse_header(Cursor::new(text)).unwrap();
        assert_eq!(header.backgrounds, [1523.0, 1187.5]);
        assert_eq!(header.rows, 7321);
        assert_eq!(header.cols, 8011);
    }

    #[test]
    fn test_parse_header_crlf_and_padding() {
        let text = "  12.5\r\n-3.75 \r\n 4\r\n5\r\ntrailing junk\r\n";
        let header = parse_header(Cursor::new(text)).unwrap();
        assert_eq!(header, BandHeader::new([12.5, -3.75], 4, 5));
    }

    #[test]
    fn test_parse_header_short_file() {
        let err = parse_header(Cursor::new("1.0\n2.0\n3\n")).unwrap_err();
        assert!(matches!(err, Error::Header { line: 4, .. }), "got {:?}", err);
    }

    #[test]
    fn test_parse_header_bad_values() {
        let err = parse_header(Cursor::new("abc\n2.0\n3\n4\n")).unwrap_err();
        assert!(matches!(err, Error::Header { line: 1, .. }));

        let err = parse_header(Cursor::new("1.0\n2.0\n3.5\n4\n")).unwrap_err();
        assert!(matches!(err, Error::Header { line: 3, .. }));

        let err = parse_header(Cursor::new("1.0\n2.0\n3\n0\n")).unwrap_err();
        assert!(matches!(err, Error::Header { line: 4, .. }));

        let err = parse_header(Cursor::new("1.0\n\n3\n4\n")).unwrap_err();
        assert!(matches!(err, Error::Header { line: 2, .. }));
    }

    #[test]
    fn test_boundary_level_truncates() {
        let header = BandHeader::new([1523.9, -12.7], 1, 1);
        assert_eq!(header.boundary_level(0).unwrap(), 1523);
        assert_eq!(header.boundary_level(1).unwrap(), -12);
        assert!(header.boundary_level(2).is_err());

        let header = BandHeader::new([f64::NAN, 0.0], 1, 1);
        assert!(header.boundary_level(0).is_err());
    }

    #[test]
    fn test_write_then_parse() {
        let header = BandHeader::new([250.25, 99.0], 3, 7);
        let mut buf = Vec::new();
        write_header_to(&header, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "250.250000\n99.000000\n3\n7\n");
        assert_eq!(parse_header(Cursor::new(buf)).unwrap(), header);
    }

    #[test]
    fn test_band_bytes() {
        assert_eq!(BandHeader::new([0.0, 0.0], 3, 5).band_bytes().unwrap(), 30);

        let huge = BandHeader::new([0.0, 0.0], usize::MAX / 2, 3);
        assert!(matches!(huge.band_bytes(), Err(Error::InvalidDimensions { .. })));
    }
}
