//! TGA format decoder and (stubbed) encoder.

pub mod info;

mod decode;
mod encode;

use crate::container::Image;
use crate::error::BlightError;
use crate::options::Options;
use crate::source::ByteSource;

/// Decode a TGA image from `source`. Requires a
/// memory-backed source, same as [`crate::bmp::decode`].
pub(crate) fn decode(source: &dyn ByteSource, options: &Options) -> Result<Image<'static>, BlightError> {
    let data = source.as_slice().ok_or(BlightError::UnexpectedEndOfImageBuffer)?;
    decode::decode(data, options)
}

pub(crate) fn encode(image: &Image<'_>, options: &Options) -> Result<alloc::vec::Vec<u8>, BlightError> {
    encode::encode(image, options)
}
