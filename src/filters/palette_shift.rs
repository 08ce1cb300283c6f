//! Palette shift: block-wise quantization to a fixed palette.
//!
//! The image is tiled into blocks of `block_width x block_height` pixels,
//! anchored at (0, 0). Blocks on the right and bottom edges are truncated to
//! the image. Each block is replaced by the palette color nearest to the
//! block's mean color, which gives a pixelated, posterized result.
//!
//! ## Supported Formats
//!
//! - **RGB**: packed `width * height * 3` bytes, or (height, width, 3) arrays
//! - **RGBA**: (height, width, 4) arrays or strided frames; alpha is left
//!   untouched and does not take part in the mean
//! - **Strided frames**: rows separated by `stride` bytes, padding preserved
//!
//! ## Parallelism
//!
//! Blocks never share pixels, so the buffer is cut into bands of
//! `block_height` rows and every band is processed by its own rayon task.
//! The palette is shared read-only.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use super::palette::Palette;
use crate::error::{ConfigurationError, Result, ShapeError};

/// Block dimensions in pixels, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSize {
    width: usize,
    height: usize,
}

impl BlockSize {
    /// Validate block dimensions.
    ///
    /// Sizes larger than the image are legal and collapse to one block along
    /// that axis.
    pub fn new(width: usize, height: usize) -> std::result::Result<Self, ConfigurationError> {
        if width == 0 || height == 0 {
            return Err(ConfigurationError::InvalidBlockSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn square(size: usize) -> std::result::Result<Self, ConfigurationError> {
        Self::new(size, size)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl Default for BlockSize {
    /// 1x1, i.e. plain per-pixel nearest-color mapping.
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }
}

/// Memory layout of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub width: usize,
    pub height: usize,
    /// Bytes per pixel: 3 (RGB) or 4 (RGBA).
    pub channels: usize,
    /// Bytes from the start of one row to the start of the next.
    pub stride: usize,
}

impl FrameLayout {
    pub fn new(width: usize, height: usize, channels: usize, stride: usize) -> Self {
        Self {
            width,
            height,
            channels,
            stride,
        }
    }

    /// Packed RGB rows with no padding.
    pub fn packed_rgb(width: usize, height: usize) -> Self {
        Self::packed(width, height, 3)
    }

    pub fn packed(width: usize, height: usize, channels: usize) -> Self {
        Self::new(width, height, channels, width.saturating_mul(channels))
    }

    fn row_bytes(&self) -> std::result::Result<usize, ShapeError> {
        self.width
            .checked_mul(self.channels)
            .ok_or(ShapeError::DimensionOverflow {
                width: self.width,
                height: self.height,
            })
    }

    /// Bytes needed to hold the image. The last row needs no padding.
    pub fn required_len(&self) -> std::result::Result<usize, ShapeError> {
        let row_bytes = self.row_bytes()?;
        if self.height == 0 || row_bytes == 0 {
            return Ok(0);
        }
        (self.height - 1)
            .checked_mul(self.stride)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or(ShapeError::DimensionOverflow {
                width: self.width,
                height: self.height,
            })
    }

    fn check_format(&self) -> std::result::Result<usize, ShapeError> {
        if self.channels != 3 && self.channels != 4 {
            return Err(ShapeError::UnsupportedChannels(self.channels));
        }
        let row_bytes = self.row_bytes()?;
        if self.stride < row_bytes {
            return Err(ShapeError::StrideTooShort {
                stride: self.stride,
                row_bytes,
            });
        }
        self.required_len()
    }
}

// ============================================================================
// Public entry points
// ============================================================================

/// Palette shift a packed RGB buffer into a new buffer.
///
/// # Arguments
/// * `data` - Row-major RGB bytes, exactly `width * height * 3` long
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `palette` - Target colors
/// * `block` - Block dimensions
///
/// # Returns
/// A buffer of the same shape where every block holds one palette color
pub fn palette_shift_rgb(
    data: &[u8],
    width: usize,
    height: usize,
    palette: &Palette,
    block: BlockSize,
) -> Result<Vec<u8>> {
    let layout = FrameLayout::packed_rgb(width, height);
    check_exact(&layout, data.len())?;

    let mut output = data.to_vec();
    shift_blocks(&mut output, layout, palette, block);
    Ok(output)
}

/// Palette shift a packed RGB buffer in place.
pub fn palette_shift_rgb_in_place(
    data: &mut [u8],
    width: usize,
    height: usize,
    palette: &Palette,
    block: BlockSize,
) -> Result<()> {
    let layout = FrameLayout::packed_rgb(width, height);
    check_exact(&layout, data.len())?;

    shift_blocks(data, layout, palette, block);
    Ok(())
}

/// Palette shift a strided RGB or RGBA frame in place.
///
/// Row padding and alpha bytes are never written. `data` may be longer than
/// the frame; bytes past the last row are ignored.
pub fn palette_shift_frame(
    data: &mut [u8],
    layout: FrameLayout,
    palette: &Palette,
    block: BlockSize,
) -> Result<()> {
    let required = layout.check_format()?;
    if data.len() < required {
        return Err(ShapeError::LengthMismatch {
            expected: required,
            actual: data.len(),
        }
        .into());
    }

    shift_blocks(&mut data[..required], layout, palette, block);
    Ok(())
}

/// Palette shift an ndarray image.
///
/// # Arguments
/// * `input` - Image with 3 or 4 channels (height, width, channels)
/// * `palette` - Target colors
/// * `block` - Block dimensions
///
/// # Returns
/// Shifted image with the same shape; alpha (if present) preserved
pub fn palette_shift_u8(
    input: ArrayView3<u8>,
    palette: &Palette,
    block: BlockSize,
) -> Result<Array3<u8>> {
    let (height, width, channels) = input.dim();
    let layout = FrameLayout::packed(width, height, channels);
    layout.check_format()?;

    // iter() walks in logical order, which yields a standard-layout buffer
    let mut data: Vec<u8> = input.iter().copied().collect();
    shift_blocks(&mut data, layout, palette, block);

    let len = data.len();
    Array3::from_shape_vec((height, width, channels), data).map_err(|_| {
        ShapeError::LengthMismatch {
            expected: height * width * channels,
            actual: len,
        }
        .into()
    })
}

fn check_exact(layout: &FrameLayout, actual: usize) -> std::result::Result<(), ShapeError> {
    let expected = layout.check_format()?;
    if actual != expected {
        return Err(ShapeError::LengthMismatch { expected, actual });
    }
    Ok(())
}

// ============================================================================
// Block processing
// ============================================================================

/// Quantize every block of an already validated buffer.
///
/// `data` must be exactly `layout.required_len()` bytes.
fn shift_blocks(data: &mut [u8], layout: FrameLayout, palette: &Palette, block: BlockSize) {
    if layout.width == 0 || layout.height == 0 {
        return;
    }

    let blocks_x = layout.width.div_ceil(block.width);
    let blocks_y = layout.height.div_ceil(block.height);
    tracing::debug!(
        width = layout.width,
        height = layout.height,
        channels = layout.channels,
        block_width = block.width,
        block_height = block.height,
        colors = palette.len(),
        blocks = blocks_x * blocks_y,
        "palette shift"
    );

    let band_len = layout.stride.saturating_mul(block.height);
    data.par_chunks_mut(band_len)
        .enumerate()
        .for_each(|(band_index, band)| {
            let top = band_index * block.height;
            let rows = block.height.min(layout.height.saturating_sub(top));
            shift_band(band, rows, layout, palette, block);
        });
}

/// Quantize one row of blocks. `band` starts at the band's first row.
fn shift_band(
    band: &mut [u8],
    rows: usize,
    layout: FrameLayout,
    palette: &Palette,
    block: BlockSize,
) {
    let FrameLayout {
        width,
        channels,
        stride,
        ..
    } = layout;

    for left in (0..width).step_by(block.width) {
        let right = left.saturating_add(block.width).min(width);

        let mut sum = [0.0f64; 3];
        for y in 0..rows {
            let row = &band[y * stride + left * channels..y * stride + right * channels];
            for pixel in row.chunks_exact(channels) {
                sum[0] += pixel[0] as f64;
                sum[1] += pixel[1] as f64;
                sum[2] += pixel[2] as f64;
            }
        }

        let count = rows * (right - left);
        if count > 0 {
            for channel in sum.iter_mut() {
                *channel /= count as f64;
            }
        }

        let color = palette.nearest(sum);
        for y in 0..rows {
            let row = &mut band[y * stride + left * channels..y * stride + right * channels];
            for pixel in row.chunks_exact_mut(channels) {
                pixel[0] = color.r;
                pixel[1] = color.g;
                pixel[2] = color.b;
            }
        }
    }
}
