//! Raster element trait for integer cell values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a raster cell.
///
/// Only integer types are supported: every value maps losslessly onto an
/// `i64` flood level, which is what the bucket queue is indexed by.
pub trait RasterElement:
    Copy + Clone + Debug + Ord + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Default no-data value for this type
    fn default_nodata() -> Self;

    /// Check if this value represents no-data
    fn is_nodata(&self, nodata: Option<Self>) -> bool {
        match nodata {
            Some(nd) => *self == nd,
            None => false,
        }
    }

    /// Convert self to a flood level
    fn to_level(self) -> i64;

    /// Convert a flood level back to a cell value, if it fits
    fn from_level(level: i64) -> Option<Self> {
        <Self as NumCast>::from(level)
    }
}

macro_rules! impl_raster_element_int {
    ($t:ty) => {
        impl RasterElement for $t {
            fn default_nodata() -> Self {
                <$t>::MIN
            }

            fn to_level(self) -> i64 {
                <i64 as From<$t>>::from(self)
            }
        }
    };
}

impl_raster_element_int!(i8);
impl_raster_element_int!(i16);
impl_raster_element_int!(i32);
impl_raster_element_int!(i64);
impl_raster_element_int!(u8);
impl_raster_element_int!(u16);
impl_raster_element_int!(u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversion() {
        assert_eq!((-9999i16).to_level(), -9999);
        assert_eq!(u32::MAX.to_level(), 4_294_967_295);
        assert_eq!(i16::from_level(300), Some(300));
        assert_eq!(i16::from_level(40_000), None);
        assert_eq!(u8::from_level(-1), None);
    }

    #[test]
    fn test_level_roundtrip_at_type_limits() {
        for v in [i16::MIN, -1, 0, i16::MAX] {
            assert_eq!(i16::from_level(v.to_level()), Some(v));
        }
        assert_eq!(u16::from_level(u16::MAX.to_level()), Some(u16::MAX));
        assert_eq!(i8::from_level(<i64 as From<i8>>::from(i8::MIN) - 1), None);
    }

    #[test]
    fn test_nodata_check() {
        assert!((-9999i16).is_nodata(Some(-9999)));
        assert!(!0i16.is_nodata(Some(-9999)));
        assert!(!0i16.is_nodata(None));
        assert_eq!(i16::default_nodata(), i16::MIN);
    }
}
