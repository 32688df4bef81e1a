//! Decoded image container.
//!
//! A tagged container that can hold any of the four canonical [`PixelTag`]
//! layouts, plus the format-specific header a caller can inspect after
//! decoding.

use alloc::borrow::Cow;

use crate::bmp::info::BitmapInfo;
use crate::error::BlightError;
use crate::pixel::PixelTag;
use crate::tga::info::TgaInfo;

/// How a decoded image's alpha channel, if any, should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Alpha {
    /// The layout carries no alpha channel.
    #[default]
    None,
    /// Straight (non-premultiplied) alpha.
    Normal,
    /// Color channels are pre-multiplied by alpha.
    Premultiplied,
}

/// The source format's fully decoded header, kept alongside the pixel data
/// for callers that want format-specific metadata.
#[derive(Clone, Debug)]
pub enum FormatSpecificInfo {
    Bmp(BitmapInfo),
    Tga(TgaInfo),
}

/// A buffer of pixels tagged with the [`PixelTag`] it was written under.
/// Either *owning* (allocated and freed by this container) or *borrowed*
/// (a non-owning view over a buffer the caller already owns, attached with
/// [`Self::attach_borrowed`]). Only a canonical output tag may ever be
/// attached to an [`Image`] returned from [`crate::load`].
#[derive(Debug)]
pub struct PixelContainer<'a> {
    tag: PixelTag,
    bytes: Cow<'a, [u8]>,
}

impl<'a> PixelContainer<'a> {
    /// Allocate a zeroed buffer sized for `width * height` pixels of `tag`.
    ///
    /// Fails with [`BlightError::AllocTooLarge`] if the byte count would
    /// exceed `max_alloc_sz`; the check runs before any allocation happens.
    pub fn new_zeroed(
        tag: PixelTag,
        width: u32,
        height: u32,
        max_alloc_sz: u64,
    ) -> Result<Self, BlightError> {
        let byte_count = Self::byte_count(tag, width, height);
        if byte_count > max_alloc_sz {
            return Err(BlightError::AllocTooLarge {
                requested: byte_count,
                limit: max_alloc_sz,
            });
        }
        let bytes = alloc::vec![0u8; byte_count as usize];
        Ok(Self { tag, bytes: Cow::Owned(bytes) })
    }

    /// Construct an empty container carrying `tag` with no buffer attached
    /// yet. Pair with [`Self::attach_borrowed`] to attach a caller-owned
    /// buffer without copying it.
    pub fn new_empty(tag: PixelTag) -> Self {
        Self { tag, bytes: Cow::Borrowed(&[]) }
    }

    /// Attach a caller-owned buffer without copying it; this is the
    /// "borrowed" container mode. `bytes` must be exactly
    /// `width * height * tag.size_bytes()` long.
    ///
    /// Fails with [`BlightError::NotEmptyOnCreate`] if this container
    /// already has a buffer attached.
    pub fn attach_borrowed(&mut self, bytes: &'a [u8], width: u32, height: u32) -> Result<(), BlightError> {
        if !self.bytes.is_empty() {
            return Err(BlightError::NotEmptyOnCreate);
        }
        let expected = Self::byte_count(self.tag, width, height);
        if bytes.len() as u64 != expected {
            return Err(BlightError::UnexpectedEndOfImageBuffer);
        }
        self.bytes = Cow::Borrowed(bytes);
        Ok(())
    }

    fn byte_count(tag: PixelTag, width: u32, height: u32) -> u64 {
        width as u64 * height as u64 * tag.size_bytes() as u64
    }

    pub fn tag(&self) -> PixelTag {
        self.tag
    }

    /// Whether this container has no buffer attached (the state
    /// [`Self::new_empty`] leaves it in until [`Self::attach_borrowed`]
    /// is called).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the pixel data is a caller-owned view rather than a buffer
    /// this container allocated and owns.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.bytes, Cow::Borrowed(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable access to the buffer. For a borrowed container this copies
    /// the data into an owned buffer first, same as [`Cow::to_mut`].
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.bytes.to_mut()
    }

    /// Borrow the buffer as a fixed-size pixel row, failing if `tag` isn't
    /// memory-compatible with the layout this container is active under.
    pub fn row(&self, tag: PixelTag, row: u32, row_stride_bytes: usize) -> Result<&[u8], BlightError> {
        if !self.tag.is_memory_compatible(tag) {
            return Err(BlightError::InactivePixelTag(tag));
        }
        let start = row as usize * row_stride_bytes;
        let end = start + row_stride_bytes;
        self.bytes
            .get(start..end)
            .ok_or(BlightError::UnexpectedEndOfImageBuffer)
    }

    pub fn row_mut(
        &mut self,
        tag: PixelTag,
        row: u32,
        row_stride_bytes: usize,
    ) -> Result<&mut [u8], BlightError> {
        if !self.tag.is_memory_compatible(tag) {
            return Err(BlightError::InactivePixelTag(tag));
        }
        let start = row as usize * row_stride_bytes;
        let end = start + row_stride_bytes;
        self.bytes
            .to_mut()
            .get_mut(start..end)
            .ok_or(BlightError::UnexpectedEndOfImageBuffer)
    }
}

/// A decoded or caller-assembled image: pixel data in a canonical layout,
/// its dimensions, alpha interpretation, and (for decoder output) the
/// source format's decoded header.
#[derive(Debug)]
pub struct Image<'a> {
    pub width: u32,
    pub height: u32,
    pub alpha: Alpha,
    pub pixels: PixelContainer<'a>,
    pub file_info: Option<FormatSpecificInfo>,
}

impl<'a> Image<'a> {
    pub fn pixel_tag(&self) -> PixelTag {
        self.pixels.tag()
    }

    /// Assemble an image around a caller-owned pixel buffer without
    /// copying it. No format-specific header is available since no
    /// decode happened; [`Self::format_info`] fails for images built this
    /// way.
    pub fn attach_borrowed(
        tag: PixelTag,
        width: u32,
        height: u32,
        alpha: Alpha,
        bytes: &'a [u8],
    ) -> Result<Self, BlightError> {
        let mut pixels = PixelContainer::new_empty(tag);
        pixels.attach_borrowed(bytes, width, height)?;
        Ok(Self { width, height, alpha, pixels, file_info: None })
    }

    /// The source format's decoded header.
    ///
    /// Fails with [`BlightError::NoImageTypeAttachedToPixelTag`] for
    /// images assembled with [`Self::attach_borrowed`], which never went
    /// through a decoder.
    pub fn format_info(&self) -> Result<&FormatSpecificInfo, BlightError> {
        self.file_info
            .as_ref()
            .ok_or(BlightError::NoImageTypeAttachedToPixelTag(self.pixel_tag()))
    }
}
