//! BMP header and pixel decoding.
//!
//! Walks the file/info header with a local `Cursor`, resolves channel masks
//! and palette, and decodes RLE4/RLE8 with a byte-pair state machine, then
//! transfers into a canonical [`Image`] through the shared color-transfer
//! engine.

use alloc::vec;
use alloc::vec::Vec;

use crate::bmp::info::{BitmapInfo, BmpCompression, BmpHeaderVariant, CieXyzTriple};
use crate::container::{Alpha, FormatSpecificInfo, Image, PixelContainer};
use crate::error::BlightError;
use crate::options::Options;
use crate::pixel::PixelTag;
use crate::transfer::{self, ChannelMasks, IndexType, PaletteEntry};

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BlightError> {
        if pos > self.data.len() {
            return Err(eof(pos as u64, 0, self.data.len() as u64));
        }
        self.pos = pos;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), BlightError> {
        self.set_position(self.pos + n)
    }

    fn u8(&mut self) -> Result<u8, BlightError> {
        let v = *self.data.get(self.pos).ok_or_else(|| eof(self.pos as u64, 1, 0))?;
        self.pos += 1;
        Ok(v)
    }

    fn u16le(&mut self) -> Result<u16, BlightError> {
        let b = self.bytes::<2>()?;
        Ok(u16::from_le_bytes(b))
    }

    fn i16le(&mut self) -> Result<i16, BlightError> {
        let b = self.bytes::<2>()?;
        Ok(i16::from_le_bytes(b))
    }

    fn u32le(&mut self) -> Result<u32, BlightError> {
        let b = self.bytes::<4>()?;
        Ok(u32::from_le_bytes(b))
    }

    fn i32le(&mut self) -> Result<i32, BlightError> {
        let b = self.bytes::<4>()?;
        Ok(i32::from_le_bytes(b))
    }

    fn bytes<const N: usize>(&mut self) -> Result<[u8; N], BlightError> {
        if self.pos + N > self.data.len() {
            return Err(eof(self.pos as u64, N as u64, self.data.len().saturating_sub(self.pos) as u64));
        }
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BlightError> {
        let n = buf.len();
        if self.pos + n > self.data.len() {
            return Err(eof(self.pos as u64, n as u64, self.data.len().saturating_sub(self.pos) as u64));
        }
        buf.copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(())
    }
}

fn eof(offset: u64, needed: u64, available: u64) -> BlightError {
    BlightError::UnexpectedEof { offset, needed, available }
}

/// Parse the BMP file header, info header, channel masks, and color table.
/// Pixel data is left unread; the caller reads rows at `info.data_offset +
/// row * info.row_stride()`.
fn parse_header<'a>(data: &'a [u8]) -> Result<(BitmapInfo, Vec<PaletteEntry>, ChannelMasks), BlightError> {
    const MIN_BMP_SIZE: u64 = 14 + 12;
    if (data.len() as u64) < MIN_BMP_SIZE {
        return Err(BlightError::InvalidSizeForFormat { actual: data.len() as u64, minimum: MIN_BMP_SIZE });
    }

    let mut c = Cursor::new(data);
    if c.u8()? != b'B' || c.u8()? != b'M' {
        return Err(BlightError::UnableToVerifyFileImageFormat);
    }
    let file_size = c.u32le()?;
    let reserved: [u8; 4] = c.bytes()?;
    if reserved != [0u8; 4] {
        return Err(BlightError::BmpInvalidBytesInFileHeader);
    }
    let data_offset = c.u32le()?;
    let ihsize = c.u32le()?;

    let variant = match ihsize {
        12 => BmpHeaderVariant::Core,
        40 => BmpHeaderVariant::V1,
        108 => BmpHeaderVariant::V4,
        124 => BmpHeaderVariant::V5,
        other => return Err(BlightError::BmpInvalidHeaderSizeOrVersionUnsupported(other)),
    };

    if (data_offset as u64) < 14 + ihsize as u64 {
        return Err(BlightError::BmpInvalidBytesInInfoHeader);
    }

    let (width, height, depth, compression_raw) = if variant == BmpHeaderVariant::Core {
        let w = c.i16le()? as i32;
        let h = c.i16le()? as i32;
        let _planes = c.u16le()?;
        let d = c.u16le()?;
        (w, h, d, 0u32)
    } else {
        let w = c.i32le()?;
        let h = c.i32le()?;
        let _planes = c.u16le()?;
        let d = c.u16le()?;
        let comp = c.u32le()?;
        (w, h, d, comp)
    };

    if width <= 0 || height == 0 {
        return Err(BlightError::BmpInvalidSizeInfo("width must be > 0 and height must be nonzero".into()));
    }

    let compression = BmpCompression::from_u32(compression_raw).ok_or(BlightError::BmpInvalidCompression(compression_raw))?;
    if !compression.is_supported() {
        return Err(BlightError::BmpCompressionUnsupported(compression_raw));
    }

    let mut data_size = 0u32;
    let mut color_count = 0u32;
    let mut masks = [0u32; 4];
    let mut color_space = 0u32;
    let mut cie_xyz = None;
    let mut gamma = None;
    let mut profile = None;

    if variant != BmpHeaderVariant::Core {
        data_size = c.u32le()?;
        let _x_ppm = c.i32le()?;
        let _y_ppm = c.i32le()?;
        color_count = c.u32le()?;
        let _important = c.u32le()?;

        if matches!(compression, BmpCompression::Bitfields | BmpCompression::AlphaBitfields) && variant == BmpHeaderVariant::V1 {
            masks[0] = c.u32le()?;
            masks[1] = c.u32le()?;
            masks[2] = c.u32le()?;
            if compression == BmpCompression::AlphaBitfields {
                masks[3] = c.u32le()?;
            }
        }

        if variant == BmpHeaderVariant::V4 || variant == BmpHeaderVariant::V5 {
            masks[0] = c.u32le()?;
            masks[1] = c.u32le()?;
            masks[2] = c.u32le()?;
            masks[3] = c.u32le()?;
            color_space = c.u32le()?;
            let mut xyz = CieXyzTriple::default();
            for channel in [&mut xyz.red, &mut xyz.green, &mut xyz.blue] {
                for v in channel.iter_mut() {
                    *v = c.u32le()?;
                }
            }
            cie_xyz = Some(xyz);
            let mut g = [0u32; 3];
            for v in g.iter_mut() {
                *v = c.u32le()?;
            }
            gamma = Some(g);
        }

        if variant == BmpHeaderVariant::V5 {
            let _intent = c.u32le()?;
            let profile_offset = c.u32le()?;
            let profile_size = c.u32le()?;
            c.skip(4)?; // reserved
            profile = Some(crate::bmp::info::ProfilePointer { offset: profile_offset, size: profile_size });
        }
    }

    if depth == 0 || !matches!(depth, 1 | 4 | 8 | 16 | 24 | 32) {
        return Err(BlightError::BmpInvalidColorDepth(depth));
    }

    let has_palette = matches!(depth, 1 | 4 | 8);
    let mut palette = Vec::new();
    if has_palette {
        let max_colors = 1u32 << depth;
        let count = if (2..=max_colors).contains(&color_count) { color_count } else { max_colors };
        c.set_position((14 + ihsize) as usize)?;
        let entry_size = if variant == BmpHeaderVariant::Core { 3 } else { 4 };
        palette.reserve(count as usize);
        let mut any_color = false;
        let mut raw_entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut entry = [0u8; 4];
            c.read_exact(&mut entry[..entry_size])?;
            let (b, g, r) = (entry[0], entry[1], entry[2]);
            if r != g || g != b {
                any_color = true;
            }
            raw_entries.push((r, g, b));
        }
        for (r, g, b) in raw_entries {
            if any_color {
                palette.push(PaletteEntry { r, g, b, a: 255 });
            } else {
                palette.push(PaletteEntry { r: g, g, b: g, a: 255 });
            }
        }
        if count > 256 || palette.len() != count as usize {
            return Err(BlightError::BmpInvalidColorCount(color_count, depth));
        }
    }

    let channel_masks = if depth == 16 || depth == 24 || depth == 32 {
        let m = if masks == [0u32; 4] {
            match depth {
                16 => ChannelMasks::RGB555,
                24 => ChannelMasks::RGB24,
                32 => ChannelMasks::RGB32,
                _ => unreachable!(),
            }
        } else {
            ChannelMasks { r: masks[0], g: masks[1], b: masks[2], a: masks[3] }
        };
        if !m.is_valid_for_depth(depth as u32) {
            return Err(BlightError::BmpInvalidColorMasks);
        }
        m
    } else {
        ChannelMasks::default()
    };

    let info = BitmapInfo {
        file_size,
        data_offset,
        header_variant: variant,
        width,
        height,
        depth,
        compression,
        data_size,
        color_count,
        masks,
        color_space,
        cie_xyz,
        gamma,
        profile,
    };

    Ok((info, palette, channel_masks))
}

fn source_tag_for(info: &BitmapInfo, masks: &ChannelMasks, grey_palette: bool) -> PixelTag {
    match info.depth {
        1 | 4 | 8 => {
            if grey_palette {
                PixelTag::U8R
            } else {
                PixelTag::Rgba32
            }
        }
        16 => {
            if masks.a != 0 {
                PixelTag::U16Rgba
            } else if *masks == ChannelMasks::RGB565 {
                PixelTag::U16Rgb
            } else {
                PixelTag::U16Rgb15
            }
        }
        24 => PixelTag::U24Rgb,
        32 => {
            if masks.a != 0 {
                PixelTag::U32Rgba
            } else {
                PixelTag::U32Rgb
            }
        }
        other => unreachable!("unsupported BMP depth {other} reached source_tag_for"),
    }
}

/// Decode a full BMP image from `data`.
pub fn decode(data: &[u8], options: &Options) -> Result<Image<'static>, BlightError> {
    let (info, palette, masks) = parse_header(data)?;

    let width = info.width as u32;
    let height = info.height.unsigned_abs();
    let bottom_up = info.is_bottom_up();
    let row_stride = info.row_stride() as usize;

    let grey_palette = palette.iter().all(|p| p.r == p.g && p.g == p.b);
    let source_tag = source_tag_for(&info, &masks, grey_palette);
    let out_tag = transfer::select_output_tag(source_tag, |t| options.output_format_allowed.allows(t))?;

    let dst_pixel_size = out_tag.size_bytes();
    let out_row_stride = width as usize * dst_pixel_size;
    let requested_bytes = out_row_stride as u64 * height as u64;
    options.check_alloc(requested_bytes)?;
    let mut container = PixelContainer::new_zeroed(out_tag, width, height, options.max_alloc_sz)?;

    let is_rle = matches!(info.compression, BmpCompression::Rle4 | BmpCompression::Rle8);

    if is_rle {
        if !bottom_up {
            return Err(BlightError::BmpInvalidRLEData("RLE compression requires bottom-up row order".into()));
        }
        let pixel_start = info.data_offset as usize;
        if pixel_start > data.len() {
            return Err(eof(pixel_start as u64, 0, data.len() as u64));
        }
        let indices = decode_rle(&data[pixel_start..], width as usize, height as usize, info.compression)?;
        let index_type = if info.depth == 4 { IndexType::U4 } else { IndexType::U8 };
        let out_bytes = container.as_bytes_mut();
        for row in 0..height as usize {
            let row_indices_start = row * width as usize;
            let row_indices = &indices[row_indices_start..row_indices_start + width as usize];
            let row_index_bytes = pack_u8_indices_for_transfer(row_indices);
            let dst = &mut out_bytes[row * out_row_stride..(row + 1) * out_row_stride];
            transfer::transfer_color_table_image_row(index_type_for_packed(index_type), &row_index_bytes, &palette, dst, out_tag)?;
        }
    } else {
        let pixel_start = info.data_offset as usize;
        let total_pixel_bytes = row_stride.checked_mul(height as usize).ok_or(BlightError::DimensionTooLarge(height))?;
        let pixel_end = pixel_start.checked_add(total_pixel_bytes).ok_or(BlightError::UnexpectedEndOfImageBuffer)?;
        if pixel_end > data.len() {
            return Err(eof(pixel_start as u64, total_pixel_bytes as u64, data.len().saturating_sub(pixel_start) as u64));
        }
        let pixels = &data[pixel_start..pixel_end];
        let out_bytes = container.as_bytes_mut();

        for file_row in 0..height as usize {
            let dest_row = if bottom_up { height as usize - 1 - file_row } else { file_row };
            let src_row = &pixels[file_row * row_stride..(file_row + 1) * row_stride];
            let dst_row = &mut out_bytes[dest_row * out_row_stride..(dest_row + 1) * out_row_stride];

            match info.depth {
                1 | 4 | 8 => {
                    let index_type = match info.depth {
                        1 => IndexType::U1,
                        4 => IndexType::U4,
                        _ => IndexType::U8,
                    };
                    transfer::transfer_color_table_image_row(index_type, src_row, &palette, dst_row, out_tag)?;
                }
                _ => {
                    transfer::transfer_row_from_bytes(src_row, source_tag, &masks, dst_row, out_tag)?;
                }
            }
        }
    }

    Ok(Image {
        width,
        height,
        alpha: if out_tag.has_alpha() { Alpha::Normal } else { Alpha::None },
        pixels: container,
        file_info: Some(FormatSpecificInfo::Bmp(info)),
    })
}

fn index_type_for_packed(t: IndexType) -> IndexType {
    match t {
        IndexType::U4 => IndexType::U8,
        other => other,
    }
}

/// RLE decoding always yields one byte per pixel regardless of the source
/// depth; re-pack for [`transfer::transfer_color_table_image_row`], which
/// expects raw packed bytes for its index type.
fn pack_u8_indices_for_transfer(indices: &[u8]) -> Vec<u8> {
    indices.to_vec()
}

/// Decode an RLE4/RLE8 pixel stream into one palette index per pixel,
/// `width * height` bytes, in top-to-bottom image-row order.
fn decode_rle(data: &[u8], width: usize, height: usize, compression: BmpCompression) -> Result<Vec<u8>, BlightError> {
    let mut pixels = vec![0u8; width.checked_mul(height).ok_or(BlightError::DimensionTooLarge(width as u32))?];
    let mut cursor = Cursor::new(data);
    let mut line: i64 = height as i64 - 1;
    let mut pos: usize = 0;

    let is_rle4 = compression == BmpCompression::Rle4;

    loop {
        if cursor.pos >= data.len() {
            break;
        }
        let p1 = cursor.u8()?;
        if p1 == 0 {
            let p2 = cursor.u8()?;
            match p2 {
                0 => {
                    line -= 1;
                    if line < 0 {
                        break;
                    }
                    pos = 0;
                }
                1 => break,
                2 => {
                    let dx = cursor.u8()? as usize;
                    let dy = cursor.u8()? as i64;
                    pos += dx;
                    line -= dy;
                    if line < 0 || pos > width {
                        return Err(BlightError::BmpRLECoordinatesOutOfBounds);
                    }
                }
                run_len => {
                    let count = run_len as usize;
                    if pos + count > width + 1 {
                        return Err(BlightError::BmpRLECoordinatesOutOfBounds);
                    }
                    let row_start = line as usize * width;
                    if is_rle4 {
                        let byte_count = count.div_ceil(2);
                        for i in 0..count {
                            if pos >= width {
                                break;
                            }
                            let byte_idx = i / 2;
                            let byte = *data.get(cursor.pos + byte_idx).ok_or_else(|| eof((cursor.pos + byte_idx) as u64, 1, 0))?;
                            let value = if i % 2 == 0 { byte >> 4 } else { byte & 0x0F };
                            pixels[row_start + pos] = value;
                            pos += 1;
                        }
                        cursor.skip(byte_count + (byte_count & 1))?;
                    } else {
                        for i in 0..count {
                            if pos >= width {
                                break;
                            }
                            let byte = *data.get(cursor.pos + i).ok_or_else(|| eof((cursor.pos + i) as u64, 1, 0))?;
                            pixels[row_start + pos] = byte;
                            pos += 1;
                        }
                        cursor.skip(count + (count & 1))?;
                    }
                }
            }
        } else {
            let count = p1 as usize;
            if pos + count > width + 1 {
                return Err(BlightError::BmpRLECoordinatesOutOfBounds);
            }
            let row_start = line as usize * width;
            if is_rle4 {
                let byte = cursor.u8()?;
                let (hi, lo) = (byte >> 4, byte & 0x0F);
                for i in 0..count {
                    if pos >= width {
                        break;
                    }
                    pixels[row_start + pos] = if i % 2 == 0 { hi } else { lo };
                    pos += 1;
                }
            } else {
                let byte = cursor.u8()?;
                for _ in 0..count {
                    if pos >= width {
                        break;
                    }
                    pixels[row_start + pos] = byte;
                    pos += 1;
                }
            }
        }
    }

    Ok(pixels)
}
