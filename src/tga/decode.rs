//! TGA header, footer, extension-area, and pixel decoding.
//!
//! Every structural read is validated against [`crate::extent::ExtentBuffer`]
//! so the footer, header, extension area, image-id, color map, optional
//! tables, and pixel data are all confirmed to occupy disjoint regions of
//! the file before any of it is trusted.

use alloc::vec;
use alloc::vec::Vec;

use crate::container::{Alpha, FormatSpecificInfo, Image, PixelContainer};
use crate::error::BlightError;
use crate::extent::ExtentBuffer;
use crate::options::Options;
use crate::pixel::PixelTag;
use crate::tga::info::{
    ColorMapSpec, ExtensionArea, ImageSpec, TgaFileVersion, TgaFooter, TgaHeader, TgaImageType,
    TgaInfo,
};
use crate::transfer::{self, ChannelMasks, IndexType, PaletteEntry, Rgba8};

const FOOTER_LEN: usize = 26;
const FOOTER_SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";
const HEADER_LEN: usize = 18;
const EXTENSION_AREA_LEN: u32 = 495;

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn u8(&mut self) -> Result<u8, BlightError> {
        let v = *self.data.get(self.pos).ok_or_else(|| eof(self.pos as u64, 1, 0))?;
        self.pos += 1;
        Ok(v)
    }

    fn u16le(&mut self) -> Result<u16, BlightError> {
        Ok(u16::from_le_bytes(self.bytes::<2>()?))
    }

    fn u32le(&mut self) -> Result<u32, BlightError> {
        Ok(u32::from_le_bytes(self.bytes::<4>()?))
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

fn parse_footer(data: &[u8]) -> Option<TgaFooter> {
    if data.len() < FOOTER_LEN {
        return None;
    }
    let tail = &data[data.len() - FOOTER_LEN..];
    if &tail[8..26] != FOOTER_SIGNATURE.as_slice() {
        return None;
    }
    let mut c = Cursor::new(tail);
    let extension_area_offset = c.u32le().ok()?;
    let developer_directory_offset = c.u32le().ok()?;
    Some(TgaFooter { extension_area_offset, developer_directory_offset })
}

fn parse_header(data: &[u8]) -> Result<TgaHeader, BlightError> {
    if data.len() < HEADER_LEN {
        return Err(BlightError::InvalidSizeForFormat { actual: data.len() as u64, minimum: HEADER_LEN as u64 });
    }
    let mut c = Cursor::new(data);
    let id_length = c.u8()?;
    let color_map_type = c.u8()?;
    let image_type = c.u8()?;
    let colormap_spec = ColorMapSpec {
        first_index: c.u16le()?,
        length: c.u16le()?,
        entry_bit_ct: c.u8()?,
    };
    let image_spec = ImageSpec {
        origin_x: c.u16le()?,
        origin_y: c.u16le()?,
        width: c.u16le()?,
        height: c.u16le()?,
        depth: c.u8()?,
        descriptor: c.u8()?,
    };
    Ok(TgaHeader { id_length, color_map_type, image_type, colormap_spec, image_spec })
}

/// Parse the extension area at `offset`. Returns `Ok(None)` rather than an
/// error when the restated length field doesn't equal 495: the area is
/// silently disabled and the footer/V2 status stands on its own.
fn parse_extension_area(data: &[u8], offset: u32) -> Result<Option<ExtensionArea>, BlightError> {
    let start = offset as usize;
    let end = start
        .checked_add(EXTENSION_AREA_LEN as usize)
        .ok_or(BlightError::UnexpectedEndOfImageBuffer)?;
    if end > data.len() {
        return Err(eof(start as u64, EXTENSION_AREA_LEN as u64, data.len().saturating_sub(start) as u64));
    }
    let mut c = Cursor::at(data, start);
    let declared_len = c.u16le()?;
    if declared_len as u32 != EXTENSION_AREA_LEN {
        return Ok(None);
    }
    let mut author_name = [0u8; 41];
    c.read_exact(&mut author_name)?;
    let mut author_comments = [0u8; 324];
    c.read_exact(&mut author_comments)?;
    let mut timestamp = [0u16; 6];
    for v in timestamp.iter_mut() {
        *v = c.u16le()?;
    }
    let mut job_name = [0u8; 41];
    c.read_exact(&mut job_name)?;
    let mut job_time = [0u16; 3];
    for v in job_time.iter_mut() {
        *v = c.u16le()?;
    }
    let mut software_id = [0u8; 41];
    c.read_exact(&mut software_id)?;
    let software_version = (c.u16le()?, c.u8()?);
    let mut key_color = [0u8; 4];
    c.read_exact(&mut key_color)?;
    let pixel_aspect_ratio = (c.u16le()?, c.u16le()?);
    let gamma = (c.u16le()?, c.u16le()?);
    let color_correction_offset = c.u32le()?;
    let postage_stamp_offset = c.u32le()?;
    let scanline_table_offset = c.u32le()?;
    let attributes_type = c.u8()?;

    Ok(Some(ExtensionArea {
        author_name,
        author_comments,
        timestamp,
        job_name,
        job_time,
        software_id,
        software_version,
        key_color,
        pixel_aspect_ratio,
        gamma,
        color_correction_offset,
        postage_stamp_offset,
        scanline_table_offset,
        attributes_type,
    }))
}

fn parse_scanline_table(data: &[u8], offset: u32, height: u16) -> Result<Vec<u32>, BlightError> {
    let mut c = Cursor::at(data, offset as usize);
    let mut table = Vec::with_capacity(height as usize);
    for _ in 0..height {
        table.push(c.u32le()?);
    }
    Ok(table)
}

fn parse_color_correction_table(data: &[u8], offset: u32) -> Result<alloc::boxed::Box<[[u16; 4]; 256]>, BlightError> {
    let mut c = Cursor::at(data, offset as usize);
    let mut table = alloc::boxed::Box::new([[0u16; 4]; 256]);
    for entry in table.iter_mut() {
        for channel in entry.iter_mut() {
            *channel = c.u16le()?;
        }
    }
    Ok(table)
}

fn colormap_entry_size(entry_bit_ct: u8) -> Result<usize, BlightError> {
    match entry_bit_ct {
        15 | 16 => Ok(2),
        24 => Ok(3),
        32 => Ok(4),
        other => Err(BlightError::TgaNonStandardColorTableUnsupported(other)),
    }
}

/// Decode one color-table entry. 15/16-bit entries run through the shared
/// channel-mask machinery; 24/32-bit entries are stored BGR(A) and are
/// unpacked directly.
fn decode_colormap_entry(bytes: &[u8], entry_bit_ct: u8) -> PaletteEntry {
    match entry_bit_ct {
        15 => {
            let word = u16::from_le_bytes([bytes[0], bytes[1]]) as u32;
            transfer::decode_masked_word(word, &ChannelMasks::RGB555)
        }
        16 => {
            let word = u16::from_le_bytes([bytes[0], bytes[1]]) as u32;
            transfer::decode_masked_word(word, &ChannelMasks::RGB565)
        }
        24 => Rgba8 { r: bytes[2], g: bytes[1], b: bytes[0], a: 255 },
        32 => Rgba8 { r: bytes[2], g: bytes[1], b: bytes[0], a: bytes[3] },
        _ => unreachable!("entry_bit_ct validated by colormap_entry_size"),
    }
}

fn pixel_byte_size(depth: u8) -> Result<usize, BlightError> {
    match depth {
        8 => Ok(1),
        15 | 16 => Ok(2),
        24 => Ok(3),
        32 => Ok(4),
        other => Err(BlightError::TgaNonStandardColorDepthUnsupported(other)),
    }
}

/// Source tag + channel masks for a color-map, greyscale, or TrueColor
/// pixel, selected by image type, depth, and (for 32-bit TrueColor) the
/// attribute-bit count.
fn source_layout_for(image_type: TgaImageType, depth: u8, attribute_bits: u8) -> Result<(PixelTag, ChannelMasks), BlightError> {
    if image_type.is_color_map() {
        return if depth == 8 {
            Ok((PixelTag::Rgba32, ChannelMasks::default()))
        } else {
            Err(BlightError::TgaColorTableImageNot8BitColorDepth(depth))
        };
    }
    if image_type.is_greyscale() {
        return match depth {
            8 => Ok((PixelTag::U8R, ChannelMasks::default())),
            15 | 16 => Ok((PixelTag::U16R, ChannelMasks::default())),
            other => Err(BlightError::TgaNonStandardColorDepthUnsupported(other)),
        };
    }
    match depth {
        15 => Ok((PixelTag::U16Rgb15, ChannelMasks::RGB555)),
        16 => Ok((PixelTag::U16Rgb, ChannelMasks::RGB565)),
        24 => Ok((PixelTag::U24Rgb, ChannelMasks::RGB24)),
        32 => {
            if attribute_bits != 0 {
                Ok((PixelTag::U32Rgba, ChannelMasks::RGBA32_STD))
            } else {
                Ok((PixelTag::U32Rgb, ChannelMasks::RGB32))
            }
        }
        other => Err(BlightError::TgaNonStandardColorDepthUnsupported(other)),
    }
}

/// Decode a packet-RLE pixel stream into `pixel_count` pixels of
/// `pixel_size` bytes each, in file scan order. Packets are not bounded by
/// row edges.
fn decode_packet_rle(data: &[u8], pixel_count: usize, pixel_size: usize) -> Result<Vec<u8>, BlightError> {
    let mut out = vec![0u8; pixel_count * pixel_size];
    let mut cursor = Cursor::new(data);
    let mut written = 0usize;
    while written < pixel_count {
        let header = cursor.u8()?;
        let count = (header & 0x7F) as usize + 1;
        if header & 0x80 != 0 {
            let mut pixel = [0u8; 4];
            cursor.read_exact(&mut pixel[..pixel_size])?;
            for _ in 0..count {
                if written >= pixel_count {
                    break;
                }
                out[written * pixel_size..(written + 1) * pixel_size].copy_from_slice(&pixel[..pixel_size]);
                written += 1;
            }
        } else {
            for _ in 0..count {
                if written >= pixel_count {
                    break;
                }
                let mut pixel = [0u8; 4];
                cursor.read_exact(&mut pixel[..pixel_size])?;
                out[written * pixel_size..(written + 1) * pixel_size].copy_from_slice(&pixel[..pixel_size]);
                written += 1;
            }
        }
    }
    Ok(out)
}

/// Reverse the order of `pixel_size`-byte pixels within `row` in place,
/// for the origin-right descriptor bit.
fn reverse_row_pixels(row: &mut [u8], pixel_size: usize) {
    let count = row.len() / pixel_size;
    for i in 0..count / 2 {
        let (lo, hi) = (i * pixel_size, (count - 1 - i) * pixel_size);
        let (left, right) = row.split_at_mut(hi);
        left[lo..lo + pixel_size].swap_with_slice(&mut right[..pixel_size]);
    }
}

/// Decode a full TGA image from `data`.
pub fn decode(data: &[u8], options: &Options) -> Result<Image<'static>, BlightError> {
    let file_size = data.len() as u64;
    let mut extents = ExtentBuffer::new();

    let footer = parse_footer(data);
    let file_version = if footer.is_some() { TgaFileVersion::V2 } else { TgaFileVersion::V1 };
    if footer.is_some() {
        let begin = (data.len() - FOOTER_LEN) as u32;
        extents.validate_and_add(begin, begin + FOOTER_LEN as u32, file_size)?;
    }

    let header = parse_header(data)?;
    extents.validate_and_add(0, HEADER_LEN as u32, file_size)?;

    let image_type = TgaImageType::from_u8(header.image_type)
        .ok_or(BlightError::TgaImageTypeUnsupported(header.image_type))?;

    if header.image_spec.width == 0 || header.image_spec.height == 0 {
        return Err(BlightError::TgaNoData);
    }

    let extension_area = match footer {
        Some(f) if f.extension_area_offset != 0 => parse_extension_area(data, f.extension_area_offset)?,
        _ => None,
    };
    if let (Some(f), Some(_)) = (&footer, &extension_area) {
        extents.validate_and_add(
            f.extension_area_offset,
            f.extension_area_offset + EXTENSION_AREA_LEN,
            file_size,
        )?;
    }

    let scanline_table = match &extension_area {
        Some(ext) if ext.scanline_table_offset != 0 => {
            let table = parse_scanline_table(data, ext.scanline_table_offset, header.image_spec.height)?;
            let len = header.image_spec.height as u32 * 4;
            extents.validate_and_add(ext.scanline_table_offset, ext.scanline_table_offset + len, file_size)?;
            Some(table)
        }
        _ => None,
    };

    let color_correction_table = match &extension_area {
        Some(ext) if ext.color_correction_offset != 0 => {
            let table = parse_color_correction_table(data, ext.color_correction_offset)?;
            extents.validate_and_add(ext.color_correction_offset, ext.color_correction_offset + 256 * 8, file_size)?;
            Some(table)
        }
        _ => None,
    };

    let mut cursor_pos = HEADER_LEN;
    if header.id_length > 0 {
        let begin = cursor_pos as u32;
        let end = begin + header.id_length as u32;
        extents.validate_and_add(begin, end, file_size)?;
    }
    cursor_pos += header.id_length as usize;

    let has_color_map = header.color_map_type != 0;
    if has_color_map != image_type.is_color_map() {
        return Err(BlightError::TgaColorMapDataInNonColorMapImage);
    }

    let mut palette: Vec<PaletteEntry> = Vec::new();
    if has_color_map {
        let entry_size = colormap_entry_size(header.colormap_spec.entry_bit_ct)?;
        let map_len = header.colormap_spec.length as usize;
        let begin = cursor_pos as u32;
        let end = begin + (map_len * entry_size) as u32;
        extents.validate_and_add(begin, end, file_size)?;
        if data.len() < end as usize {
            return Err(eof(begin as u64, (map_len * entry_size) as u64, data.len().saturating_sub(begin as usize) as u64));
        }
        palette.reserve(map_len);
        for i in 0..map_len {
            let entry_start = begin as usize + i * entry_size;
            palette.push(decode_colormap_entry(&data[entry_start..entry_start + entry_size], header.colormap_spec.entry_bit_ct));
        }
        cursor_pos = end as usize;
    }

    let width = header.image_spec.width as u32;
    let height = header.image_spec.height as u32;
    let attribute_bits = header.image_spec.attribute_bits();
    let (source_tag, masks) = source_layout_for(image_type, header.image_spec.depth, attribute_bits)?;
    let pixel_size = pixel_byte_size(header.image_spec.depth)?;

    let pixel_count = width as usize * height as usize;
    let pixel_data_begin = cursor_pos as u32;
    let pixel_data_end = if image_type.is_rle() {
        // RLE length is data-dependent; reserve up to the next recorded
        // extent or EOF.
        extents
            .iter()
            .map(|e| e.begin)
            .filter(|b| *b > pixel_data_begin)
            .min()
            .unwrap_or(data.len() as u32)
    } else {
        pixel_data_begin + (pixel_count * pixel_size) as u32
    };
    extents.validate_and_add(pixel_data_begin, pixel_data_end, file_size)?;

    let pixel_region = data
        .get(pixel_data_begin as usize..pixel_data_end as usize)
        .ok_or_else(|| eof(pixel_data_begin as u64, (pixel_data_end - pixel_data_begin) as u64, 0))?;

    let source_bytes: Vec<u8> = if image_type.is_rle() {
        decode_packet_rle(pixel_region, pixel_count, pixel_size)?
    } else {
        if pixel_region.len() < pixel_count * pixel_size {
            return Err(BlightError::UnexpectedEndOfImageBuffer);
        }
        pixel_region[..pixel_count * pixel_size].to_vec()
    };

    let out_tag = transfer::select_output_tag(source_tag, |t| options.output_format_allowed.allows(t))?;
    let dst_pixel_size = out_tag.size_bytes();
    let out_row_stride = width as usize * dst_pixel_size;
    let requested_bytes = out_row_stride as u64 * height as u64;
    options.check_alloc(requested_bytes)?;
    let mut container = PixelContainer::new_zeroed(out_tag, width, height, options.max_alloc_sz)?;

    let origin_top = header.image_spec.origin_top();
    let origin_right = header.image_spec.origin_right();
    let index_type = if image_type.is_color_map() { Some(IndexType::U8) } else { None };

    let out_bytes = container.as_bytes_mut();
    for file_row in 0..height as usize {
        let dest_row = if origin_top { file_row } else { height as usize - 1 - file_row };
        let src_row = &source_bytes[file_row * width as usize * pixel_size..(file_row + 1) * width as usize * pixel_size];
        let dst_row = &mut out_bytes[dest_row * out_row_stride..(dest_row + 1) * out_row_stride];
        match index_type {
            Some(it) => transfer::transfer_color_table_image_row(it, src_row, &palette, dst_row, out_tag)?,
            None => transfer::transfer_row_from_bytes(src_row, source_tag, &masks, dst_row, out_tag)?,
        }
        if origin_right {
            reverse_row_pixels(dst_row, dst_pixel_size);
        }
    }

    let alpha = match &extension_area {
        Some(ext) if ext.attributes_type == 3 && header.image_spec.depth == 32 => Alpha::Normal,
        Some(ext) if ext.attributes_type == 4 => Alpha::Premultiplied,
        _ if out_tag.has_alpha() => Alpha::Normal,
        _ => Alpha::None,
    };

    let info = TgaInfo {
        file_version,
        file_size,
        header,
        image_type,
        footer,
        extension_area,
        scanline_table,
        color_correction_table,
    };

    Ok(Image { width, height, alpha, pixels: container, file_info: Some(FormatSpecificInfo::Tga(info)) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(image_type: u8, width: u16, height: u16, depth: u8, descriptor: u8) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(0); // id_length
        buf.push(0); // color_map_type
        buf.push(image_type);
        buf.extend_from_slice(&0u16.to_le_bytes()); // colormap first_index
        buf.extend_from_slice(&0u16.to_le_bytes()); // colormap length
        buf.push(0); // colormap entry_bit_ct
        buf.extend_from_slice(&0u16.to_le_bytes()); // origin_x
        buf.extend_from_slice(&0u16.to_le_bytes()); // origin_y
        buf.extend_from_slice(&width.to_le_bytes());
        buf.extend_from_slice(&height.to_le_bytes());
        buf.push(depth);
        buf.push(descriptor);
        buf
    }

    #[test]
    fn v1_truecolor_24bit_top_down_decodes() {
        let mut data = header_bytes(2, 2, 1, 24, 0x20); // origin_top set
        data.extend_from_slice(&[0x11, 0x22, 0x33]); // B,G,R
        data.extend_from_slice(&[0x44, 0x55, 0x66]);
        let options = Options::default();
        let image = decode(&data, &options).unwrap();
        assert_eq!(image.pixel_tag(), PixelTag::Rgba32);
        let bytes = image.pixels.as_bytes();
        assert_eq!(&bytes[0..4], &[0x33, 0x22, 0x11, 255]);
        assert_eq!(&bytes[4..8], &[0x66, 0x55, 0x44, 255]);
    }

    #[test]
    fn default_origin_bottom_left_flips_rows() {
        // origin bottom-left (default, descriptor=0): file row 0 is the
        // image's bottom row, so it lands at dest row height-1.
        let mut data = header_bytes(2, 1, 2, 24, 0x00);
        data.extend_from_slice(&[0x00, 0x00, 0xFF]); // file row 0, pixel 0: B,G,R = blue-channel-only -> red out
        data.extend_from_slice(&[0x00, 0xFF, 0x00]); // file row 0, pixel 1: green
        data.extend_from_slice(&[0xFF, 0x00, 0x00]); // file row 1, pixel 0: blue
        data.extend_from_slice(&[0x00, 0x00, 0x00]); // file row 1, pixel 1: black
        let options = Options::default();
        let image = decode(&data, &options).unwrap();
        let bytes = image.pixels.as_bytes();
        // dest row 1 (bottom, bytes[8..16]) holds file row 0.
        assert_eq!(&bytes[8..12], &[255, 0, 0, 255]);
        assert_eq!(&bytes[12..16], &[0, 255, 0, 255]);
        // dest row 0 (top, bytes[0..8]) holds file row 1.
        assert_eq!(&bytes[0..4], &[0, 0, 255, 255]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 255]);
    }

    #[test]
    fn zero_dimension_rejected() {
        let data = header_bytes(2, 0, 1, 24, 0);
        let options = Options::default();
        let err = decode(&data, &options).unwrap_err();
        assert!(matches!(err, BlightError::TgaNoData));
    }

    #[test]
    fn unsupported_image_type_reports_for_redirect() {
        let data = header_bytes(5, 1, 1, 24, 0);
        let options = Options::default();
        let err = decode(&data, &options).unwrap_err();
        assert!(matches!(err, BlightError::TgaImageTypeUnsupported(5)));
    }

    #[test]
    fn footer_signature_detects_v2() {
        let mut data = header_bytes(2, 1, 1, 24, 0x20);
        data.extend_from_slice(&[0x10, 0x20, 0x30]);
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(FOOTER_SIGNATURE.as_slice());
        let options = Options::default();
        let image = decode(&data, &options).unwrap();
        match image.file_info {
            Some(FormatSpecificInfo::Tga(ref info)) => assert_eq!(info.file_version, TgaFileVersion::V2),
            _ => panic!("expected TGA info"),
        }
    }

    #[test]
    fn extension_offset_into_header_is_overlap_error() {
        // Buffer large enough that the extension area's declared 495-byte
        // span fits inside the file, so the overlap check (not a length
        // check) is what rejects it.
        let mut data = vec![0u8; 600];
        let header = header_bytes(2, 1, 1, 24, 0x20);
        data[..header.len()].copy_from_slice(&header);
        data[4..6].copy_from_slice(&495u16.to_le_bytes()); // extension area restates its own length
        let footer_start = data.len() - FOOTER_LEN;
        data[footer_start..footer_start + 4].copy_from_slice(&4u32.to_le_bytes()); // extension offset = 4, inside [0,18)
        data[footer_start + 4..footer_start + 8].copy_from_slice(&0u32.to_le_bytes());
        data[footer_start + 8..].copy_from_slice(FOOTER_SIGNATURE.as_slice());
        let options = Options::default();
        let err = decode(&data, &options).unwrap_err();
        assert!(matches!(err, BlightError::OverlappingData { .. }));
    }

    #[test]
    fn mismatched_extension_length_silently_disables_extension_area() {
        let mut data = vec![0u8; 600];
        let header = header_bytes(2, 1, 1, 24, 0x20);
        data[..header.len()].copy_from_slice(&header);
        data[100..102].copy_from_slice(&1u16.to_le_bytes()); // wrong restated length
        let footer_start = data.len() - FOOTER_LEN;
        data[footer_start..footer_start + 4].copy_from_slice(&100u32.to_le_bytes());
        data[footer_start + 4..footer_start + 8].copy_from_slice(&0u32.to_le_bytes());
        data[footer_start + 8..].copy_from_slice(FOOTER_SIGNATURE.as_slice());
        // real pixel data lives right after the header for this test, at
        // [18, 21); the rest of the zeroed buffer up to the footer is
        // incidental padding the decoder never reads.
        data[18..21].copy_from_slice(&[0x10, 0x20, 0x30]);
        let options = Options::default();
        let image = decode(&data, &options).unwrap();
        match image.file_info {
            Some(FormatSpecificInfo::Tga(ref info)) => {
                assert_eq!(info.file_version, TgaFileVersion::V2);
                assert!(info.extension_area.is_none());
            }
            _ => panic!("expected TGA info"),
        }
    }

    #[test]
    fn colormap_image_decodes_8bit_palette_indices() {
        let mut data = header_bytes(1, 2, 1, 8, 0x20); // ColorMap, origin top
        data[1] = 1; // color_map_type
        data[3..5].copy_from_slice(&0u16.to_le_bytes()); // first_index
        data[5..7].copy_from_slice(&2u16.to_le_bytes()); // length = 2
        data[7] = 24; // entry_bit_ct
        // color map: index 0 = pure red, index 1 = pure green (BGR on disk)
        data.extend_from_slice(&[0x00, 0x00, 0xFF]);
        data.extend_from_slice(&[0x00, 0xFF, 0x00]);
        // pixel data: indices 1, 0
        data.extend_from_slice(&[1, 0]);
        let options = Options::default();
        let image = decode(&data, &options).unwrap();
        let bytes = image.pixels.as_bytes();
        assert_eq!(&bytes[0..4], &[0, 255, 0, 255]);
        assert_eq!(&bytes[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn rle_truecolor_packet_run_then_literal() {
        // width=3, height=1, depth 24. One repeat packet of 2 pixels (count
        // field 1 -> +1 = 2) then one literal packet of 1 pixel.
        let mut data = header_bytes(10, 3, 1, 24, 0x20); // RleTrueColor, origin top
        data.push(0x81); // repeat, count = 2
        data.extend_from_slice(&[0x10, 0x20, 0x30]); // B,G,R
        data.push(0x00); // literal, count = 1
        data.extend_from_slice(&[0x40, 0x50, 0x60]);
        let options = Options::default();
        let image = decode(&data, &options).unwrap();
        let bytes = image.pixels.as_bytes();
        assert_eq!(&bytes[0..4], &[0x30, 0x20, 0x10, 255]);
        assert_eq!(&bytes[4..8], &[0x30, 0x20, 0x10, 255]);
        assert_eq!(&bytes[8..12], &[0x60, 0x50, 0x40, 255]);
    }
}
