//! Pixel type catalog.
//!
//! [`PixelTag`] names every pixel byte layout Blight understands: the four
//! canonical output layouts an [`crate::Image`] may carry after a successful
//! decode, a handful of auxiliary in-memory-only layouts carried through as
//! opaque container tags, and the source-only layouts describing how bytes
//! sit in a BMP or TGA file before the transfer engine gets to them.

/// A closed enum naming every pixel layout Blight's decoders and transfer
/// engine understand.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelTag {
    // ── Canonical output layouts ─────────────────────────────────────
    /// Four 8-bit channels in R,G,B,A order. The default output choice for
    /// any color source.
    Rgba32,
    /// 5-6-5 RGB packed into one little-endian 16-bit word.
    Rgb16,
    /// Single 8-bit grayscale channel.
    R8,
    /// Single 16-bit grayscale channel (native endian).
    R16,

    // ── Auxiliary in-memory-only layouts (pass-through, no transfer) ──
    /// Four 32-bit float channels, RGBA order.
    Rgba128F,
    /// Four 32-bit integer channels, RGBA order.
    Rgba128,
    /// Single 32-bit float grayscale channel.
    R32F,
    /// Two 32-bit float channels.
    Rg64F,
    /// Three 8-bit channels, B,G,R order.
    Bgr24,
    /// Four 8-bit channels, B,G,R,A order.
    Bgr32,

    // ── Source-only layouts (file byte layout, pre-transfer) ─────────
    /// One 8-bit grayscale byte per pixel, as read from the file.
    U8R,
    /// One 16-bit grayscale word per pixel, as read from the file.
    U16R,
    /// 16-bit word, standard 565 RGB channel positions.
    U16Rgb,
    /// 16-bit word, standard 555 RGB channel positions (1 bit unused).
    U16Rgb15,
    /// 16-bit word with a caller/header-supplied custom channel mask
    /// (BITFIELDS/ALPHABITFIELDS with a non-zero alpha mask).
    U16Rgba,
    /// Three 8-bit channels, R,G,B order, as read from the file.
    U24Rgb,
    /// Four 8-bit channels, R,G,B order plus one unused byte.
    U32Rgb,
    /// Four 8-bit channels, R,G,B,A order.
    U32Rgba,
}

impl PixelTag {
    /// Size in bytes of one pixel under this layout.
    pub const fn size_bytes(self) -> usize {
        use PixelTag::*;
        match self {
            U8R | R8 => 1,
            U16R | U16Rgb | U16Rgb15 | U16Rgba | R16 | Rgb16 => 2,
            Bgr24 | U24Rgb => 3,
            Rgba32 | Bgr32 | U32Rgb | U32Rgba | R32F => 4,
            Rg64F => 8,
            Rgba128 | Rgba128F => 16,
        }
    }

    /// Whether this layout carries color information (as opposed to a
    /// single grayscale channel).
    pub const fn is_color(self) -> bool {
        use PixelTag::*;
        !matches!(self, U8R | U16R | R8 | R16 | R32F)
    }

    /// Whether this layout's byte representation includes an alpha channel.
    pub const fn has_alpha(self) -> bool {
        use PixelTag::*;
        matches!(
            self,
            Rgba32 | Rgba128F | Rgba128 | Bgr32 | U16Rgba | U32Rgba
        )
    }

    /// Whether `self` and `other` have an identical in-memory byte layout.
    pub fn is_memory_compatible(self, other: PixelTag) -> bool {
        self == other
    }

    /// True for the four layouts a successfully decoded [`crate::Image`]
    /// may carry.
    pub const fn is_canonical_output(self) -> bool {
        use PixelTag::*;
        matches!(self, Rgba32 | Rgb16 | R8 | R16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_layout() {
        assert_eq!(PixelTag::R8.size_bytes(), 1);
        assert_eq!(PixelTag::U16Rgb.size_bytes(), 2);
        assert_eq!(PixelTag::U24Rgb.size_bytes(), 3);
        assert_eq!(PixelTag::Rgba32.size_bytes(), 4);
        assert_eq!(PixelTag::Rg64F.size_bytes(), 8);
        assert_eq!(PixelTag::Rgba128F.size_bytes(), 16);
    }

    #[test]
    fn greyscale_predicates() {
        assert!(!PixelTag::R8.is_color());
        assert!(!PixelTag::U16R.is_color());
        assert!(PixelTag::Rgba32.is_color());
        assert!(PixelTag::U16Rgb15.is_color());
    }

    #[test]
    fn alpha_predicates() {
        assert!(PixelTag::Rgba32.has_alpha());
        assert!(PixelTag::U32Rgba.has_alpha());
        assert!(!PixelTag::U32Rgb.has_alpha());
        assert!(!PixelTag::Rgb16.has_alpha());
    }

    #[test]
    fn canonical_outputs() {
        assert!(PixelTag::Rgba32.is_canonical_output());
        assert!(PixelTag::Rgb16.is_canonical_output());
        assert!(PixelTag::R8.is_canonical_output());
        assert!(PixelTag::R16.is_canonical_output());
        assert!(!PixelTag::U24Rgb.is_canonical_output());
        assert!(!PixelTag::Bgr24.is_canonical_output());
    }
}
