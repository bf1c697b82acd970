//! The struct-under-test and its device byte image.

use std::fmt;

use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
/// The struct-under-test: a 32-bit and a 64-bit signed integer field.
///
/// The `#[repr(C)]` layout is the one the device sees: `i` at offset
/// [`Simple::OFFSET_I`], four bytes of padding, and `l` at offset
/// [`Simple::OFFSET_L`], for a total of [`Simple::SIZE`] bytes.
pub struct Simple {
    /// The 32-bit field, `I`
    pub i: i32,
    /// The 64-bit field, `L`
    pub l: i64,
}

impl Simple {
    /// Alignment of the struct on both host and device
    pub const ALIGN: usize = 8;
    /// Byte offset of the `i` field
    pub const OFFSET_I: usize = 0;
    /// Byte offset of the `l` field
    pub const OFFSET_L: usize = 8;
    /// Size of the struct and of its device byte image
    pub const SIZE: usize = 16;

    #[must_use]
    /// Creates a struct with the given field values.
    pub const fn new(i: i32, l: i64) -> Self {
        Self { i, l }
    }

    #[must_use]
    /// Marshals the struct into its little-endian device byte image.
    ///
    /// The padding between the two fields is zeroed.
    pub fn to_device_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0_u8; Self::SIZE];

        for (dst, src) in bytes
            .iter_mut()
            .skip(Self::OFFSET_I)
            .zip(self.i.to_le_bytes())
        {
            *dst = src;
        }
        for (dst, src) in bytes
            .iter_mut()
            .skip(Self::OFFSET_L)
            .zip(self.l.to_le_bytes())
        {
            *dst = src;
        }

        bytes
    }

    /// Unmarshals a struct from its little-endian device byte image.
    ///
    /// The padding bytes are ignored.
    ///
    /// # Errors
    /// Returns [`Error::SizeMismatch`] iff `bytes` is not exactly
    /// [`Self::SIZE`] bytes long.
    pub fn from_device_bytes(bytes: &[u8]) -> Result<Self> {
        let Ok([i0, i1, i2, i3, _, _, _, _, l0, l1, l2, l3, l4, l5, l6, l7]) =
            <[u8; Self::SIZE]>::try_from(bytes)
        else {
            return Err(Error::SizeMismatch {
                expected: Self::SIZE,
                found: bytes.len(),
            });
        };

        Ok(Self {
            i: i32::from_le_bytes([i0, i1, i2, i3]),
            l: i64::from_le_bytes([l0, l1, l2, l3, l4, l5, l6, l7]),
        })
    }
}

impl fmt::Display for Simple {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Simple {{ I: {:#010x}, L: {:#018x} }}", self.i, self.l)
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::Simple;
    use crate::Error;

    #[test]
    fn layout_matches_device_image() {
        assert_eq!(mem::size_of::<Simple>(), Simple::SIZE);
        assert_eq!(mem::align_of::<Simple>(), Simple::ALIGN);
        assert_eq!(mem::offset_of!(Simple, i), Simple::OFFSET_I);
        assert_eq!(mem::offset_of!(Simple, l), Simple::OFFSET_L);
    }

    #[test]
    fn byte_image_is_little_endian_with_zeroed_padding() {
        let simple = Simple::new(0x1234_5678, 0x7654_3210_fedc_ba98);

        assert_eq!(
            simple.to_device_bytes(),
            [
                0x78, 0x56, 0x34, 0x12, 0, 0, 0, 0, 0x98, 0xba, 0xdc, 0xfe, 0x10, 0x32, 0x54,
                0x76,
            ]
        );
    }

    #[test]
    fn padding_is_ignored_when_unmarshalling() {
        let simple = Simple::new(-7, i64::MIN);

        let mut bytes = simple.to_device_bytes();
        bytes[4..8].copy_from_slice(&[0xAA; 4]);

        assert_eq!(Simple::from_device_bytes(&bytes), Ok(simple));
    }

    #[test]
    fn wrong_image_length_is_rejected() {
        assert_eq!(
            Simple::from_device_bytes(&[0; 12]),
            Err(Error::SizeMismatch {
                expected: 16,
                found: 12
            })
        );
    }
}
