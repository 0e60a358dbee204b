//! I/O for the raw band grids and the text header that describes them
//!
//! A band pair on disk is three files: a four-line header and two headerless
//! row-major dumps of native-endian `i16` samples.

mod header;
mod raw;

pub use header::{parse_header, read_header, write_header, write_header_to, BandHeader};
pub use raw::{read_raw_i16, read_raw_i16_from, write_raw_i16, write_raw_i16_to};
