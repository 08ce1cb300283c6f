//! WebAssembly exports for palette shifting.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Palette Encoding
//!
//! Palettes cross the boundary as flat `r, g, b, r, g, b, ...` byte lists
//! (a `Uint8Array` on the JavaScript side), 1-256 colors.

use wasm_bindgen::prelude::*;

use crate::error::PaletteShiftError;
use crate::filters::palette::{Palette, Rgb};
use crate::filters::palette_shift::{
    palette_shift_frame, palette_shift_rgb, BlockSize, FrameLayout,
};

fn to_js_err(err: impl Into<PaletteShiftError>) -> JsError {
    JsError::new(&err.into().to_string())
}

fn build_palette(palette: &[u8]) -> Result<Palette, JsError> {
    if palette.len() % 3 != 0 {
        return Err(JsError::new(&format!(
            "palette length {} is not a multiple of 3",
            palette.len()
        )));
    }
    let colors = palette
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();
    Palette::new(colors).map_err(to_js_err)
}

// ============================================================================
// Palette Shift - RGB
// ============================================================================

/// Palette shift a packed RGB image.
///
/// # Arguments
/// * `data` - Flat array of RGB bytes (length = width * height * 3)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `palette` - Flat array of palette RGB bytes
/// * `block_width` - Block width in pixels (>= 1)
/// * `block_height` - Block height in pixels (>= 1)
///
/// # Returns
/// Flat array of RGB bytes restricted to the palette
#[wasm_bindgen]
pub fn palette_shift_rgb_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    palette: &[u8],
    block_width: usize,
    block_height: usize,
) -> Result<Vec<u8>, JsError> {
    let palette = build_palette(palette)?;
    let block = BlockSize::new(block_width, block_height).map_err(to_js_err)?;
    palette_shift_rgb(data, width, height, &palette, block).map_err(to_js_err)
}

// ============================================================================
// Palette Shift - RGBA (canvas ImageData)
// ============================================================================

/// Palette shift a packed RGBA image, preserving alpha.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `palette` - Flat array of palette RGB bytes
/// * `block_width` - Block width in pixels (>= 1)
/// * `block_height` - Block height in pixels (>= 1)
///
/// # Returns
/// Flat array of RGBA bytes
#[wasm_bindgen]
pub fn palette_shift_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    palette: &[u8],
    block_width: usize,
    block_height: usize,
) -> Result<Vec<u8>, JsError> {
    let palette = build_palette(palette)?;
    let block = BlockSize::new(block_width, block_height).map_err(to_js_err)?;
    let layout = FrameLayout::packed(width, height, 4);

    let expected = layout.required_len().map_err(to_js_err)?;
    if data.len() != expected {
        return Err(to_js_err(crate::error::ShapeError::LengthMismatch {
            expected,
            actual: data.len(),
        }));
    }

    let mut output = data.to_vec();
    palette_shift_frame(&mut output, layout, &palette, block).map_err(to_js_err)?;
    Ok(output)
}

// ============================================================================
// Palette Parsing
// ============================================================================

/// Parse whitespace-separated hex colors into a flat RGB byte list.
#[wasm_bindgen]
pub fn parse_hex_palette_wasm(text: &str) -> Result<Vec<u8>, JsError> {
    let palette = Palette::from_hex_list(text).map_err(to_js_err)?;
    Ok(palette
        .colors()
        .iter()
        .flat_map(|c| [c.r, c.g, c.b])
        .collect())
}
