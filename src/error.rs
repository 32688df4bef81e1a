//! Closed error taxonomy for Blight decoding.
//!
//! Callers pattern-match on `BlightError`'s variant kind, not on the
//! rendered message, so every variant that carries a concrete quantity
//! (offsets, sizes, masks) stores it as structured fields rather than a
//! free-form string.

use alloc::string::String;

use crate::dispatch::BitFormat;
use crate::pixel::PixelTag;

/// Errors from BMP/TGA decoding and format dispatch.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BlightError {
    // ── Path / IO ─────────────────────────────────────────────────
    #[error("resolved path exceeds the maximum supported length")]
    FullPathTooLong,
    #[error("unexpected end of file: needed {needed} bytes at offset {offset}, had {available}")]
    UnexpectedEof {
        offset: u64,
        needed: u64,
        available: u64,
    },
    #[error("partial read: expected {expected} bytes, got {actual}")]
    PartialRead { expected: usize, actual: usize },

    // ── Policy ────────────────────────────────────────────────────
    #[error("input format {0:?} is disabled by caller options")]
    FormatDisabled(BitFormat),
    #[error("input format {0:?} is not in the allowed set")]
    InputFormatDisallowed(BitFormat),
    #[error("output pixel format {0:?} is not in the allowed set")]
    OutputFormatDisallowed(PixelTag),
    #[error("no candidate output pixel format is allowed by caller options")]
    NoImageFormatsAllowed,
    #[error("allocation of {requested} bytes exceeds the configured limit of {limit}")]
    AllocTooLarge { requested: u64, limit: u64 },

    // ── Inference ─────────────────────────────────────────────────
    #[error("could not infer an image format from filename or content")]
    UnableToInferFormat,
    #[error("could not verify the declared image format against file content")]
    UnableToVerifyFileImageFormat,
    #[error("filename has no usable extension")]
    InvalidFileExtension,

    // ── Structural ────────────────────────────────────────────────
    #[error("file is smaller than the minimum size for this format: got {actual}, need at least {minimum}")]
    InvalidSizeForFormat { actual: u64, minimum: u64 },
    #[error("byte range [{begin}, {end}) overlaps a previously recorded range")]
    OverlappingData { begin: u32, end: u32 },
    #[error("pixel buffer ended before the declared image data was fully read")]
    UnexpectedEndOfImageBuffer,
    #[error("dimension {0} exceeds the supported maximum")]
    DimensionTooLarge(u32),

    // ── BMP-specific ──────────────────────────────────────────────
    #[error("invalid bytes in BMP file header")]
    BmpInvalidBytesInFileHeader,
    #[error("invalid bytes in BMP info header")]
    BmpInvalidBytesInInfoHeader,
    #[error("BMP info header size {0} is not a known/supported variant")]
    BmpInvalidHeaderSizeOrVersionUnsupported(u32),
    #[error("BMP width/height declaration is invalid: {0}")]
    BmpInvalidSizeInfo(String),
    #[error("BMP color depth {0} is not supported")]
    BmpInvalidColorDepth(u16),
    #[error("BMP palette color count {0} is invalid for a {1}-bit image")]
    BmpInvalidColorCount(u32, u16),
    #[error("BMP color table is truncated or malformed")]
    BmpInvalidColorTable,
    #[error("BMP color space {0} is not supported")]
    BmpColorSpaceUnsupported(u32),
    #[error("BMP compression scheme {0} is not supported")]
    BmpCompressionUnsupported(u32),
    #[error("BMP compression field {0} is not a recognized value")]
    BmpInvalidCompression(u32),
    #[error("BMP channel masks overlap or exceed the declared bit depth")]
    BmpInvalidColorMasks,
    #[error("BMP RLE coordinate delta moved the write cursor outside the image")]
    BmpRLECoordinatesOutOfBounds,
    #[error("BMP RLE stream is malformed: {0}")]
    BmpInvalidRLEData(String),

    // ── TGA-specific ──────────────────────────────────────────────
    #[error("TGA image type {0} is not supported")]
    TgaImageTypeUnsupported(u8),
    #[error("TGA file declares color map data but is not a color-map image type")]
    TgaColorMapDataInNonColorMapImage,
    #[error("TGA color table entry bit depth {0} is not supported")]
    TgaNonStandardColorTableUnsupported(u8),
    #[error("TGA color depth {0} is not supported")]
    TgaNonStandardColorDepthUnsupported(u8),
    #[error("TGA color depth {0} is not valid for pixel format {1:?}")]
    TgaNonStandardColorDepthForPixelFormat(u8, PixelTag),
    #[error("TGA color-table image must be 8-bit, got {0}")]
    TgaColorTableImageNot8BitColorDepth(u8),
    #[error("TGA file declares zero-sized image data")]
    TgaNoData,
    #[error("TGA Huffman/quadtree flavor is not supported")]
    TgaFlavorUnsupported,
    #[error("color table index {index} is out of range for a {palette_len}-entry palette")]
    InvalidColorTableIndex { index: usize, palette_len: usize },

    // ── Container ─────────────────────────────────────────────────
    #[error("container already holds a buffer on create")]
    NotEmptyOnCreate,
    #[error("pixel tag {0:?} is not active for this operation")]
    InactivePixelTag(PixelTag),
    #[error("no image type is attached to pixel tag {0:?}")]
    NoImageTypeAttachedToPixelTag(PixelTag),

    // ── Save (scaffolded, not specified) ─────────────────────────
    #[error("saving is not implemented for this format")]
    NotImplemented,
}
