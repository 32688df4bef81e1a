//! Decoded BMP header state.

/// Which of the four historically accreted info-header variants a file
/// declared, selected by the info-header size field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmpHeaderVariant {
    /// 12-byte OS/2 1.x `BITMAPCOREHEADER`. Width/height are signed 16-bit.
    Core,
    /// 40-byte `BITMAPINFOHEADER`.
    V1,
    /// 108-byte `BITMAPV4HEADER`: adds channel masks, color space, CIE XYZ
    /// primaries, and per-channel gamma.
    V4,
    /// 124-byte `BITMAPV5HEADER`: adds rendering intent and an embedded or
    /// linked ICC profile pointer.
    V5,
}

/// BMP compression tag. All ten values the header
/// field can carry are named so an unsupported-compression error can say
/// which one was seen; only the first five are implemented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmpCompression {
    Rgb,
    Rle8,
    Rle4,
    Bitfields,
    Jpeg,
    Png,
    AlphaBitfields,
    Cmyk,
    CmykRle8,
    CmykRle4,
}

impl BmpCompression {
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::Bitfields,
            4 => Self::Jpeg,
            5 => Self::Png,
            6 => Self::AlphaBitfields,
            7 => Self::Cmyk,
            8 => Self::CmykRle8,
            9 => Self::CmykRle4,
            _ => return None,
        })
    }

    /// Whether this crate's pixel-transfer path implements this scheme.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            Self::Rgb | Self::Rle8 | Self::Rle4 | Self::Bitfields | Self::AlphaBitfields
        )
    }
}

/// CIE 1931 XYZ primaries as stored in a V4/V5 header: nine 2.30 fixed-point
/// values, three per channel (red, green, blue), kept as raw `u32`s since
/// Blight recognizes but never applies color management.
#[derive(Clone, Copy, Debug, Default)]
pub struct CieXyzTriple {
    pub red: [u32; 3],
    pub green: [u32; 3],
    pub blue: [u32; 3],
}

/// Embedded/linked ICC profile pointer, present only in V5 headers.
#[derive(Clone, Copy, Debug)]
pub struct ProfilePointer {
    pub offset: u32,
    pub size: u32,
}

/// Fully decoded BMP header state: file header plus whichever info-header
/// variant the file declared.
#[derive(Clone, Debug)]
pub struct BitmapInfo {
    pub file_size: u32,
    pub data_offset: u32,
    pub header_variant: BmpHeaderVariant,
    /// Signed: OS/2 Core headers store these as i16.
    pub width: i32,
    pub height: i32,
    pub depth: u16,
    pub compression: BmpCompression,
    pub data_size: u32,
    pub color_count: u32,
    /// Red, green, blue, alpha channel masks, in that order. Zero means
    /// "unset"; standard positions are substituted for unset masks.
    pub masks: [u32; 4],
    pub color_space: u32,
    pub cie_xyz: Option<CieXyzTriple>,
    pub gamma: Option<[u32; 3]>,
    pub profile: Option<ProfilePointer>,
}

impl BitmapInfo {
    /// Unsigned image height, independent of row-direction sign.
    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Row order: bottom-up when `height > 0`, top-down when `height < 0`.
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    /// Bytes between consecutive row starts: `((width * depth + 31) / 32) * 4`.
    pub fn row_stride(&self) -> u32 {
        ((self.width as u32 * self.depth as u32 + 31) / 32) * 4
    }
}
