//! Byte-source adapter.
//!
//! A small trait so TGA's backward probe (read the trailing 26-byte footer
//! before anything else) and BMP's forward-only header walk share one
//! abstraction. The only implementor is [`SliceSource`]: both decoders run
//! on a fully-buffered file.

use crate::error::BlightError;

/// A seekable, size-queryable byte stream.
///
/// No locking or asynchronous operations are assumed:
/// every decode in this crate runs single-threaded and to completion.
pub trait ByteSource {
    /// Total size of the underlying data, in bytes.
    fn size(&self) -> u64;

    /// Read exactly `buf.len()` bytes starting at absolute `offset`.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), BlightError>;

    /// Borrow the full contents, if the source is backed by contiguous
    /// memory. Decoders use this to avoid copying when slicing out color
    /// tables, extension areas, and pixel data.
    fn as_slice(&self) -> Option<&[u8]>;
}

/// A [`ByteSource`] over an in-memory byte slice.
pub struct SliceSource<'a> {
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> ByteSource for SliceSource<'a> {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), BlightError> {
        let offset = offset as usize;
        let end = offset
            .checked_add(buf.len())
            .ok_or(BlightError::UnexpectedEof {
                offset: offset as u64,
                needed: buf.len() as u64,
                available: 0,
            })?;
        if end > self.data.len() {
            return Err(BlightError::UnexpectedEof {
                offset: offset as u64,
                needed: buf.len() as u64,
                available: self.data.len().saturating_sub(offset) as u64,
            });
        }
        buf.copy_from_slice(&self.data[offset..end]);
        Ok(())
    }

    fn as_slice(&self) -> Option<&[u8]> {
        Some(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_in_bounds_slice() {
        let data = [1u8, 2, 3, 4, 5];
        let src = SliceSource::new(&data);
        let mut buf = [0u8; 2];
        src.read_at(1, &mut buf).unwrap();
        assert_eq!(buf, [2, 3]);
    }

    #[test]
    fn rejects_out_of_bounds_read() {
        let data = [1u8, 2, 3];
        let src = SliceSource::new(&data);
        let mut buf = [0u8; 2];
        assert!(src.read_at(2, &mut buf).is_err());
    }

    #[test]
    fn size_reports_slice_length() {
        let data = [0u8; 7];
        assert_eq!(SliceSource::new(&data).size(), 7);
    }
}
