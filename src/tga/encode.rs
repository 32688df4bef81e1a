//! TGA save path.
//!
//! Encoding is out of scope for this crate; kept as a stub with the real
//! error type so a caller's `save()` call fails typed rather than being
//! absent from the public surface.

use crate::container::Image;
use crate::error::BlightError;
use crate::options::Options;

pub fn encode(_image: &Image<'_>, _options: &Options) -> Result<alloc::vec::Vec<u8>, BlightError> {
    Err(BlightError::NotImplemented)
}
