//! Caller-configurable policy.
//!
//! A pre-allocation policy object: format whitelists the dispatcher
//! consults before decoding, an allocation ceiling checked before the
//! output buffer is sized, and a save-time alpha policy.

use crate::dispatch::BitFormat;
use crate::error::BlightError;
use crate::pixel::PixelTag;

/// How a saved image's alpha channel should be written.
/// Save itself is scaffolded (see [`crate::BlightError::NotImplemented`]);
/// this only records caller intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AlphaPolicy {
    #[default]
    Drop,
    Straight,
    Premultiplied,
}

/// Fixed-size whitelist over the four input formats this crate recognizes.
#[derive(Clone, Copy, Debug)]
pub struct FormatSet {
    pub bmp: bool,
    pub png: bool,
    pub jpg: bool,
    pub tga: bool,
}

impl FormatSet {
    pub const fn all() -> Self {
        Self { bmp: true, png: true, jpg: true, tga: true }
    }

    pub fn allows(&self, format: BitFormat) -> bool {
        match format {
            BitFormat::Bmp => self.bmp,
            BitFormat::Png => self.png,
            BitFormat::Jpg => self.jpg,
            BitFormat::Tga => self.tga,
        }
    }

    pub fn disallow(&mut self, format: BitFormat) {
        match format {
            BitFormat::Bmp => self.bmp = false,
            BitFormat::Png => self.png = false,
            BitFormat::Jpg => self.jpg = false,
            BitFormat::Tga => self.tga = false,
        }
    }
}

impl Default for FormatSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Whitelist over the four canonical output pixel tags.
#[derive(Clone, Copy, Debug)]
pub struct PixelTagSet {
    pub rgba32: bool,
    pub rgb16: bool,
    pub r8: bool,
    pub r16: bool,
}

impl PixelTagSet {
    pub const fn all() -> Self {
        Self { rgba32: true, rgb16: true, r8: true, r16: true }
    }

    pub fn allows(&self, tag: PixelTag) -> bool {
        match tag {
            PixelTag::Rgba32 => self.rgba32,
            PixelTag::Rgb16 => self.rgb16,
            PixelTag::R8 => self.r8,
            PixelTag::R16 => self.r16,
            _ => false,
        }
    }
}

impl Default for PixelTagSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Caller-configurable policy passed to [`crate::load`].
#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub input_format_allowed: FormatSet,
    pub output_format_allowed: PixelTagSet,
    pub alpha: AlphaPolicy,
    /// When true, resolve the joined path relative to the current
    /// directory; when false, require and use an absolute path.
    pub local_path: bool,
    /// Ceiling, in bytes, for the decoded pixel buffer. Checked before the
    /// buffer is allocated.
    pub max_alloc_sz: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input_format_allowed: FormatSet::default(),
            output_format_allowed: PixelTagSet::default(),
            alpha: AlphaPolicy::default(),
            local_path: true,
            max_alloc_sz: 256 * 1024 * 1024,
        }
    }
}

impl Options {
    pub fn check_input_format(&self, format: BitFormat) -> Result<(), BlightError> {
        if self.input_format_allowed.allows(format) {
            Ok(())
        } else {
            Err(BlightError::InputFormatDisallowed(format))
        }
    }

    pub fn check_alloc(&self, requested: u64) -> Result<(), BlightError> {
        if requested > self.max_alloc_sz {
            Err(BlightError::AllocTooLarge { requested, limit: self.max_alloc_sz })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_everything() {
        let opts = Options::default();
        assert!(opts.check_input_format(BitFormat::Bmp).is_ok());
        assert!(opts.output_format_allowed.allows(PixelTag::R16));
    }

    #[test]
    fn disallowed_format_rejected() {
        let mut opts = Options::default();
        opts.input_format_allowed.disallow(BitFormat::Png);
        let err = opts.check_input_format(BitFormat::Png).unwrap_err();
        assert!(matches!(err, BlightError::InputFormatDisallowed(BitFormat::Png)));
    }

    #[test]
    fn alloc_over_limit_rejected() {
        let opts = Options { max_alloc_sz: 100, ..Options::default() };
        assert!(opts.check_alloc(101).is_err());
        assert!(opts.check_alloc(100).is_ok());
    }
}
