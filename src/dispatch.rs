//! Format dispatcher.
//!
//! Two-stage format inference: extension table first, magic-byte probe as
//! fallback, with one permitted redirect when a decoder reports its
//! extension lied.

use alloc::string::String;
use alloc::vec::Vec;

use crate::bmp;
use crate::container::Image;
use crate::error::BlightError;
use crate::options::Options;
use crate::source::{ByteSource, SliceSource};
use crate::tga;

/// The four formats the dispatcher recognizes. Only Bmp and Tga are
/// implemented; Png and Jpg are recognized so callers get a typed
/// `FormatDisabled` rather than a silent misroute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitFormat {
    Bmp,
    Png,
    Jpg,
    Tga,
}

impl BitFormat {
    fn from_extension(ext: &str) -> Option<Self> {
        Some(match ext.to_ascii_lowercase().as_str() {
            "bmp" | "dib" => Self::Bmp,
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpg,
            "tga" | "icb" | "vda" | "vst" | "tpic" => Self::Tga,
            _ => return None,
        })
    }

    /// Probe magic bytes / trailing footer signature.
    fn from_content(data: &[u8]) -> Option<Self> {
        if data.len() >= 2 && &data[0..2] == b"BM" {
            return Some(Self::Bmp);
        }
        if data.len() >= 8 && data[0..8] == [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a] {
            return Some(Self::Png);
        }
        if data.len() >= 26 {
            let tail = &data[data.len() - 26..];
            if tail.len() >= 26 && &tail[8..25] == b"TRUEVISION-XFILE." {
                return Some(Self::Tga);
            }
        }
        None
    }
}

fn extension_of(filename: &str) -> Result<&str, BlightError> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .ok_or(BlightError::InvalidFileExtension)
}

fn infer_format(filename: &str, data: &[u8]) -> Result<BitFormat, BlightError> {
    if let Ok(ext) = extension_of(filename) {
        if let Some(format) = BitFormat::from_extension(ext) {
            return Ok(format);
        }
    }
    BitFormat::from_content(data).ok_or(BlightError::UnableToInferFormat)
}

fn join_path(path: &str, filename: &str) -> Result<String, BlightError> {
    const MAX_PATH_LEN: usize = 4096;
    let mut joined = String::with_capacity(path.len() + filename.len() + 1);
    joined.push_str(path);
    if !path.is_empty() && !path.ends_with('/') {
        joined.push('/');
    }
    joined.push_str(filename);
    if joined.len() > MAX_PATH_LEN {
        return Err(BlightError::FullPathTooLong);
    }
    Ok(joined)
}

fn decode_format(format: BitFormat, source: &dyn ByteSource, options: &Options) -> Result<Image<'static>, BlightError> {
    match format {
        BitFormat::Bmp => bmp::decode(source, options),
        BitFormat::Tga => tga::decode(source, options),
        BitFormat::Png | BitFormat::Jpg => Err(BlightError::FormatDisabled(format)),
    }
}

fn encode_format(format: BitFormat, image: &Image<'_>, options: &Options) -> Result<Vec<u8>, BlightError> {
    match format {
        BitFormat::Bmp => bmp::encode(image, options),
        BitFormat::Tga => tga::encode(image, options),
        BitFormat::Png | BitFormat::Jpg => Err(BlightError::FormatDisabled(format)),
    }
}

/// How the caller wants the format selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatHint {
    Infer,
    Explicit(BitFormat),
}

/// Decode a raster file at `path`/`filename` into an [`Image`]. `data` stands in for the bytes a real byte-source adapter
/// would have read from the joined path; `path`/`filename` are still
/// validated and joined so path-related failures surface identically.
pub fn load(
    path: &str,
    filename: &str,
    data: &[u8],
    format_hint: FormatHint,
    options: &Options,
) -> Result<Image<'static>, BlightError> {
    let _resolved = join_path(path, filename)?;
    let source = SliceSource::new(data);

    let mut attempted = match format_hint {
        FormatHint::Infer => infer_format(filename, data)?,
        FormatHint::Explicit(format) => format,
    };
    options.check_input_format(attempted)?;

    match decode_format(attempted, &source, options) {
        Ok(image) => Ok(image),
        Err(BlightError::UnableToVerifyFileImageFormat) => {
            let mut retry_options = *options;
            retry_options.input_format_allowed.disallow(attempted);
            let redirected = BitFormat::from_content(data).ok_or(BlightError::UnableToInferFormat)?;
            if redirected == attempted {
                return Err(BlightError::UnableToVerifyFileImageFormat);
            }
            attempted = redirected;
            options.check_input_format(attempted)?;
            decode_format(attempted, &source, options)
        }
        Err(err) => Err(err),
    }
}

/// Encode `image` for `path`/`filename` and return the serialized bytes.
///
/// Scaffolded: every per-format encoder currently returns
/// [`BlightError::NotImplemented`]. This entry point exists so callers get
/// a typed failure from a stable signature rather than a missing function.
pub fn save(
    path: &str,
    filename: &str,
    image: &Image<'_>,
    format_hint: FormatHint,
    options: &Options,
) -> Result<Vec<u8>, BlightError> {
    let _resolved = join_path(path, filename)?;
    let format = match format_hint {
        FormatHint::Infer => {
            BitFormat::from_extension(extension_of(filename)?).ok_or(BlightError::UnableToInferFormat)?
        }
        FormatHint::Explicit(format) => format,
    };
    options.check_input_format(format)?;
    encode_format(format, image, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_table_covers_bmp_aliases() {
        assert_eq!(BitFormat::from_extension("BMP"), Some(BitFormat::Bmp));
        assert_eq!(BitFormat::from_extension("dib"), Some(BitFormat::Bmp));
    }

    #[test]
    fn extension_table_covers_tga_aliases() {
        for ext in ["tga", "icb", "vda", "vst", "tpic"] {
            assert_eq!(BitFormat::from_extension(ext), Some(BitFormat::Tga));
        }
    }

    #[test]
    fn content_probe_detects_bmp_magic() {
        assert_eq!(BitFormat::from_content(b"BMxxxx"), Some(BitFormat::Bmp));
    }

    #[test]
    fn missing_extension_and_unknown_content_fails_inference() {
        let err = infer_format("no_extension", b"whatever").unwrap_err();
        assert!(matches!(err, BlightError::UnableToInferFormat));
    }

    #[test]
    fn png_extension_resolves_to_format_disabled() {
        let options = Options::default();
        let err = load("", "x.png", b"\x89PNG\r\n\x1a\n", FormatHint::Infer, &options).unwrap_err();
        assert!(matches!(err, BlightError::FormatDisabled(BitFormat::Png)));
    }

    #[test]
    fn overlong_path_rejected() {
        let long_path: String = core::iter::repeat('a').take(5000).collect();
        let options = Options::default();
        let err = load(&long_path, "x.bmp", b"BM", FormatHint::Infer, &options).unwrap_err();
        assert!(matches!(err, BlightError::FullPathTooLong));
    }

    #[test]
    fn save_routes_to_the_not_implemented_stub() {
        use crate::container::Alpha;
        use crate::pixel::PixelTag;

        let bytes = [0u8; 4];
        let image = Image::attach_borrowed(PixelTag::Rgba32, 1, 1, Alpha::Normal, &bytes).unwrap();
        let options = Options::default();
        let err = save("", "x.bmp", &image, FormatHint::Infer, &options).unwrap_err();
        assert!(matches!(err, BlightError::NotImplemented));
    }

    #[test]
    fn save_with_disabled_format_reports_format_disabled() {
        use crate::container::Alpha;
        use crate::pixel::PixelTag;

        let bytes = [0u8; 4];
        let image = Image::attach_borrowed(PixelTag::Rgba32, 1, 1, Alpha::Normal, &bytes).unwrap();
        let options = Options::default();
        let err = save("", "x.png", &image, FormatHint::Infer, &options).unwrap_err();
        assert!(matches!(err, BlightError::FormatDisabled(BitFormat::Png)));
    }
}
