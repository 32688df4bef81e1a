//! Decoded TGA header, footer, and extension-area state.

/// Whether a V2 footer (26 bytes, `"TRUEVISION-XFILE.\0"` signature) was
/// found at the end of the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TgaFileVersion {
    V1,
    V2,
}

/// TGA image type byte. Only the six supported
/// values have a named variant here; anything else fails to parse as
/// `TgaImageTypeUnsupported`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TgaImageType {
    ColorMap,
    TrueColor,
    Greyscale,
    ColorMapRle,
    TrueColorRle,
    GreyscaleRle,
}

impl TgaImageType {
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::ColorMap,
            2 => Self::TrueColor,
            3 => Self::Greyscale,
            9 => Self::ColorMapRle,
            10 => Self::TrueColorRle,
            11 => Self::GreyscaleRle,
            _ => return None,
        })
    }

    pub fn is_rle(self) -> bool {
        matches!(self, Self::ColorMapRle | Self::TrueColorRle | Self::GreyscaleRle)
    }

    pub fn is_color_map(self) -> bool {
        matches!(self, Self::ColorMap | Self::ColorMapRle)
    }

    pub fn is_greyscale(self) -> bool {
        matches!(self, Self::Greyscale | Self::GreyscaleRle)
    }
}

/// Color-map specification fields from the 18-byte header.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorMapSpec {
    pub first_index: u16,
    pub length: u16,
    pub entry_bit_ct: u8,
}

/// Image specification fields from the 18-byte header: placement, size,
/// and the descriptor byte.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageSpec {
    pub origin_x: u16,
    pub origin_y: u16,
    pub width: u16,
    pub height: u16,
    pub depth: u8,
    pub descriptor: u8,
}

impl ImageSpec {
    /// Bits 4–5 of the descriptor byte select which corner the first pixel
    /// in file order corresponds to.
    pub fn origin_top(&self) -> bool {
        self.descriptor & 0x20 != 0
    }

    pub fn origin_right(&self) -> bool {
        self.descriptor & 0x10 != 0
    }

    /// Number of attribute (alpha) bits packed per pixel, descriptor bits
    /// 0–3.
    pub fn attribute_bits(&self) -> u8 {
        self.descriptor & 0x0f
    }
}

/// The 18-byte header common to every TGA file.
#[derive(Clone, Copy, Debug, Default)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub colormap_spec: ColorMapSpec,
    pub image_spec: ImageSpec,
}

/// The 26-byte V2 footer.
#[derive(Clone, Copy, Debug)]
pub struct TgaFooter {
    pub extension_area_offset: u32,
    pub developer_directory_offset: u32,
}

/// The optional 495-byte extension area a V2 file may point to
///. Fixed-width text fields are kept as raw byte
/// arrays; Blight does not interpret their encoding.
#[derive(Clone, Debug)]
pub struct ExtensionArea {
    pub author_name: [u8; 41],
    pub author_comments: [u8; 324],
    /// Month, day, year, hour, minute, second.
    pub timestamp: [u16; 6],
    pub job_name: [u8; 41],
    /// Hours, minutes, seconds of job time.
    pub job_time: [u16; 3],
    pub software_id: [u8; 41],
    pub software_version: (u16, u8),
    /// ARGB key color.
    pub key_color: [u8; 4],
    /// Pixel aspect ratio numerator/denominator.
    pub pixel_aspect_ratio: (u16, u16),
    /// Gamma numerator/denominator.
    pub gamma: (u16, u16),
    pub color_correction_offset: u32,
    pub postage_stamp_offset: u32,
    pub scanline_table_offset: u32,
    pub attributes_type: u8,
}

/// Fully decoded TGA header state.
#[derive(Clone, Debug)]
pub struct TgaInfo {
    pub file_version: TgaFileVersion,
    pub file_size: u64,
    pub header: TgaHeader,
    pub image_type: TgaImageType,
    pub footer: Option<TgaFooter>,
    pub extension_area: Option<ExtensionArea>,
    /// One u32 byte-offset per scanline, if the extension area pointed to a
    /// scanline table.
    pub scanline_table: Option<alloc::vec::Vec<u32>>,
    /// 256-entry ARGB color-correction table, if present.
    pub color_correction_table: Option<alloc::boxed::Box<[[u16; 4]; 256]>>,
}

impl TgaInfo {
    pub fn width(&self) -> u16 {
        self.header.image_spec.width
    }

    pub fn height(&self) -> u16 {
        self.header.image_spec.height
    }
}
