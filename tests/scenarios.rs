//! End-to-end transcriptions of representative decode scenarios, run
//! through the public [`blight::load`] entry point rather than the
//! per-format internal decoders.

use blight::{Alpha, BitFormat, BlightError, FormatHint, Image, Options, PixelTag};

fn core_header_24bit(width: i16, height: i16, pixel_rows: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"BM");
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    buf.extend_from_slice(&26u32.to_le_bytes()); // data offset = 14 + 12
    buf.extend_from_slice(&12u32.to_le_bytes()); // Core header
    buf.extend_from_slice(&width.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&24u16.to_le_bytes());
    buf.extend_from_slice(pixel_rows);
    buf
}

#[test]
fn bmp_bottom_up_24bit_round_trips_through_load() {
    let row0 = [0x00, 0xFF, 0x00, 0xFF, 0x00, 0x00];
    let row1 = [0xFF, 0xFF, 0xFF, 0x00, 0x00, 0xFF];
    let mut pixel_rows = Vec::new();
    pixel_rows.extend_from_slice(&row0);
    pixel_rows.extend_from_slice(&row1);
    let data = core_header_24bit(2, 2, &pixel_rows);

    let options = Options::default();
    let image = blight::load("", "photo.bmp", &data, FormatHint::Infer, &options).unwrap();
    assert_eq!(image.pixel_tag(), PixelTag::Rgba32);
    assert_eq!(image.width, 2);
    assert_eq!(image.height, 2);
    let bytes = image.pixels.as_bytes();
    assert_eq!(&bytes[0..4], &[255, 255, 255, 255]);
    assert_eq!(&bytes[12..16], &[255, 0, 0, 255]);
}

#[test]
fn bmp_rle8_run_then_absolute_round_trips_through_load() {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"BM");
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    let header_len = 14 + 40 + 256 * 4;
    buf.extend_from_slice(&(header_len as u32).to_le_bytes());
    buf.extend_from_slice(&40u32.to_le_bytes());
    buf.extend_from_slice(&4i32.to_le_bytes());
    buf.extend_from_slice(&2i32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes());
    buf.extend_from_slice(&1u32.to_le_bytes()); // RLE8
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&0i32.to_le_bytes());
    buf.extend_from_slice(&0i32.to_le_bytes());
    buf.extend_from_slice(&256u32.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    for i in 0..256u32 {
        buf.push(i as u8);
        buf.push(i as u8);
        buf.push(i as u8);
        buf.push(0);
    }
    buf.extend_from_slice(&[0x04, 0x07, 0x00, 0x00, 0x02, 0x09, 0x00, 0x01]);

    let options = Options::default();
    let image = blight::load("", "sprite.bmp", &buf, FormatHint::Infer, &options).unwrap();
    assert_eq!(image.width, 4);
    assert_eq!(image.height, 2);
    let bytes = image.pixels.as_bytes();
    let bottom_row = &bytes[1 * 4 * 4..2 * 4 * 4];
    assert_eq!(&bottom_row[0..4], &[7, 7, 7, 255]);
    assert_eq!(&bottom_row[12..16], &[7, 7, 7, 255]);
}

fn tga_header_bytes(image_type: u8, width: u16, height: u16, depth: u8, descriptor: u8) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.push(0);
    buf.push(0);
    buf.push(image_type);
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.push(0);
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&width.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());
    buf.push(depth);
    buf.push(descriptor);
    buf
}

#[test]
fn tga_truecolor_round_trips_through_load() {
    let mut data = tga_header_bytes(2, 2, 1, 24, 0x20); // origin top
    data.extend_from_slice(&[0x11, 0x22, 0x33]);
    data.extend_from_slice(&[0x44, 0x55, 0x66]);

    let options = Options::default();
    let image = blight::load("", "photo.tga", &data, FormatHint::Infer, &options).unwrap();
    assert_eq!(image.pixel_tag(), PixelTag::Rgba32);
    let bytes = image.pixels.as_bytes();
    assert_eq!(&bytes[0..4], &[0x33, 0x22, 0x11, 255]);
    assert_eq!(&bytes[4..8], &[0x66, 0x55, 0x44, 255]);
}

#[test]
fn tga_rle_packet_run_then_literal_round_trips_through_load() {
    // One 2-pixel repeat packet (header 0x81 -> 2 pixels) followed by a
    // 1-pixel literal packet (header 0x00 -> 1 pixel), against a 3-pixel,
    // single-row 24-bit truecolor image.
    let mut data = tga_header_bytes(10, 3, 1, 24, 0x20); // TrueColorRle, origin top
    data.push(0x81);
    data.extend_from_slice(&[0x00, 0x00, 0xFF]); // repeated pixel: B,G,R = red
    data.push(0x00);
    data.extend_from_slice(&[0xFF, 0x00, 0x00]); // literal pixel: blue

    let options = Options::default();
    let image = blight::load("", "run.tga", &data, FormatHint::Infer, &options).unwrap();
    let bytes = image.pixels.as_bytes();
    assert_eq!(&bytes[0..4], &[255, 0, 0, 255]);
    assert_eq!(&bytes[4..8], &[255, 0, 0, 255]);
    assert_eq!(&bytes[8..12], &[0, 0, 255, 255]);
}

#[test]
fn bmp_data_offset_inside_info_header_is_rejected() {
    let mut data = core_header_24bit(2, 2, &[0u8; 12]);
    data[10..14].copy_from_slice(&10u32.to_le_bytes());
    let options = Options::default();
    let err = blight::load("", "bad.bmp", &data, FormatHint::Infer, &options).unwrap_err();
    assert!(matches!(err, BlightError::BmpInvalidBytesInInfoHeader));
}

#[test]
fn bmp_extension_with_png_magic_redirects_once_then_reports_format_disabled() {
    // A `.bmp`-named file whose bytes are actually a PNG: extension
    // inference picks Bmp first, the BMP decoder rejects the magic bytes
    // and asks for a redirect, content-probing picks Png, and Png decoding
    // is out of scope for this crate.
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    data.extend_from_slice(&[0u8; 24]);
    let options = Options::default();
    let err = blight::load("", "mislabeled.bmp", &data, FormatHint::Infer, &options).unwrap_err();
    assert!(matches!(err, BlightError::FormatDisabled(BitFormat::Png)));
}

#[test]
fn explicit_format_hint_bypasses_extension_inference() {
    let mut data = tga_header_bytes(2, 1, 1, 24, 0x20);
    data.extend_from_slice(&[0x10, 0x20, 0x30]);
    let options = Options::default();
    let image = blight::load(
        "",
        "no_extension_at_all",
        &data,
        FormatHint::Explicit(BitFormat::Tga),
        &options,
    )
    .unwrap();
    assert_eq!(image.width, 1);
    assert_eq!(image.height, 1);
}

#[test]
fn save_is_reachable_through_the_public_api_and_reports_not_implemented() {
    let bytes = [0u8; 16];
    let image = Image::attach_borrowed(PixelTag::Rgba32, 2, 2, Alpha::Normal, &bytes).unwrap();
    let options = Options::default();
    let err = blight::save("", "out.bmp", &image, FormatHint::Infer, &options).unwrap_err();
    assert!(matches!(err, BlightError::NotImplemented));
}

#[test]
fn image_attached_to_a_caller_buffer_round_trips_through_load_decoded_data() {
    let row0 = [0x00, 0xFF, 0x00, 0xFF, 0x00, 0x00];
    let row1 = [0xFF, 0xFF, 0xFF, 0x00, 0x00, 0xFF];
    let mut pixel_rows = Vec::new();
    pixel_rows.extend_from_slice(&row0);
    pixel_rows.extend_from_slice(&row1);
    let data = core_header_24bit(2, 2, &pixel_rows);

    let options = Options::default();
    let decoded = blight::load("", "photo.bmp", &data, FormatHint::Infer, &options).unwrap();
    assert!(decoded.format_info().is_ok());
    assert!(!decoded.pixels.is_borrowed());

    let borrowed_bytes = decoded.pixels.as_bytes().to_vec();
    let attached = Image::attach_borrowed(decoded.pixel_tag(), decoded.width, decoded.height, decoded.alpha, &borrowed_bytes).unwrap();
    assert!(attached.pixels.is_borrowed());
    assert!(attached.format_info().is_err());
    assert_eq!(attached.pixels.as_bytes(), decoded.pixels.as_bytes());
}
