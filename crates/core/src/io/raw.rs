//! Raw binary band grids
//!
//! Row-major, native-endian `i16` samples with no header, magic bytes or
//! compression. The shape comes from the band header.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{ByteOrder, NativeEndian};

use crate::error::{Error, Result};
use crate::raster::Raster;

const SAMPLE_BYTES: usize = std::mem::size_of::<i16>();

/// Read a raw `i16` grid of the given shape from a file
pub fn read_raw_i16<P: AsRef<Path>>(path: P, rows: usize, cols: usize) -> Result<Raster<i16>> {
    let file = File::open(path.as_ref())?;
    read_raw_i16_from(BufReader::new(file), rows, cols)
}

/// Read a raw `i16` grid of the given shape from any reader.
///
/// The reader must hold exactly `rows * cols` samples. Any other length,
/// including an odd byte count, is [`Error::BandLength`].
pub fn read_raw_i16_from<R: Read>(mut reader: R, rows: usize, cols: usize) -> Result<Raster<i16>> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let samples = rows.checked_mul(cols).ok_or(Error::InvalidDimensions {
        width: cols,
        height: rows,
    })?;
    let expected = u64::try_from(samples)
        .ok()
        .and_then(|n| n.checked_mul(SAMPLE_BYTES as u64))
        .ok_or(Error::InvalidDimensions {
            width: cols,
            height: rows,
        })?;

    // Read at most one byte past the expected length.
    let mut bytes = Vec::new();
    let read = (&mut reader)
        .take(expected.saturating_add(1))
        .read_to_end(&mut bytes)? as u64;

    if read != expected {
        let trailing = if read > expected {
            io::copy(&mut reader, &mut io::sink())?
        } else {
            0
        };
        return Err(Error::BandLength {
            expected,
            actual: read + trailing,
        });
    }

    let mut data = vec![0i16; samples];
    NativeEndian::read_i16_into(&bytes, &mut data);

    Raster::from_vec(data, rows, cols)
}

/// Write a grid as raw `i16` samples to a file
pub fn write_raw_i16<P: AsRef<Path>>(raster: &Raster<i16>, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_raw_i16_to(raster, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a grid as raw `i16` samples to any writer
pub fn write_raw_i16_to<W: Write>(raster: &Raster<i16>, writer: &mut W) -> Result<()> {
    let samples: Vec<i16> = raster.data().iter().copied().collect();
    let mut bytes = vec![0u8; samples.len() * SAMPLE_BYTES];
    NativeEndian::write_i16_into(&samples, &mut bytes);
    writer.write_all(&bytes)?;
    Ok(())
}
