//! # blight
//!
//! BMP and TGA raster decoders with a uniform pixel-transfer engine.
//!
//! Blight decodes Windows Bitmap (OS/2 Core, V1, V4, V5 header variants) and
//! Truevision Targa (V1 and V2) files into one of four canonical in-memory
//! pixel layouts: [`PixelTag::Rgba32`], [`PixelTag::Rgb16`], [`PixelTag::R8`],
//! or [`PixelTag::R16`]. Both formats' on-disk layouts — arbitrary bit
//! depths, channel bitmasks, palette indirection, and two flavors of
//! run-length encoding — are normalized through the same
//! [`transfer::transfer_row_from_bytes`] / [`transfer::transfer_color_table_image_row`]
//! engine.
//!
//! ## Usage
//!
//! ```no_run
//! use blight::{load, FormatHint, Options};
//!
//! let data = std::fs::read("photo.bmp")?;
//! let image = load("", "photo.bmp", &data, FormatHint::Infer, &Options::default())?;
//! assert!(image.pixel_tag().is_canonical_output());
//! # Ok::<(), blight::BlightError>(())
//! ```
//!
//! ## Scope
//!
//! Saving to BMP or TGA is not implemented; [`BlightError::NotImplemented`]
//! is returned by any [`save`] call. Color management (ICC profiles, gamma,
//! CIE XYZ primaries) is recognized in decoded headers but never applied.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod container;
mod dispatch;
mod error;
mod extent;
mod options;
mod pixel;
mod source;
mod tga;
mod transfer;

pub use container::{Alpha, FormatSpecificInfo, Image, PixelContainer};
pub use dispatch::{load, save, BitFormat, FormatHint};
pub use error::BlightError;
pub use extent::{BlockExtent, ExtentBuffer, MAX_EXTENTS};
pub use options::{AlphaPolicy, FormatSet, Options, PixelTagSet};
pub use pixel::PixelTag;
pub use source::{ByteSource, SliceSource};
pub use transfer::{ChannelMasks, IndexType, PaletteEntry, Rgba8};

pub mod bmp_info {
    //! Decoded BMP-specific header state, re-exported for callers that
    //! inspect [`crate::FormatSpecificInfo::Bmp`].
    pub use crate::bmp::info::*;
}

pub mod tga_info {
    //! Decoded TGA-specific header state, re-exported for callers that
    //! inspect [`crate::FormatSpecificInfo::Tga`].
    pub use crate::tga::info::*;
}
