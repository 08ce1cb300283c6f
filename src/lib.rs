//! Palette Shift
//!
//! Block-wise palette quantization: every rectangular block of an image is
//! replaced by the palette color nearest to the block's mean color, giving a
//! pixelated, posterized image restricted to a fixed set of colors.
//!
//! Python bindings are available via PyO3 (`python` feature) and JavaScript
//! bindings via wasm-bindgen (`wasm` feature).
//!
//! ## Image Format
//! - **RGB**: (height, width, 3) arrays or packed `width * height * 3` bytes
//! - **RGBA**: (height, width, 4) arrays or strided frames, alpha preserved
//!
//! ## Example
//!
//! ```
//! use palette_shift::{palette_shift_rgb, BlockSize, Palette};
//!
//! let palette = Palette::from_hex_list("#000000 #ffffff").unwrap();
//! let image = vec![10u8; 4 * 4 * 3];
//!
//! let result = palette_shift_rgb(&image, 4, 4, &palette, BlockSize::square(2).unwrap()).unwrap();
//! assert_eq!(result, vec![0u8; 4 * 4 * 3]);
//! ```
//!
//! ## Matching
//! The block mean is an unrounded `f64` per channel. The nearest palette entry
//! minimizes squared Euclidean RGB distance; on equal distance the entry with
//! the lowest index wins.

pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{ConfigurationError, PaletteShiftError, ParseColorError, ShapeError};
pub use filters::palette::{Palette, Rgb, MAX_COLORS};
pub use filters::palette_shift::{
    palette_shift_frame, palette_shift_rgb, palette_shift_rgb_in_place, palette_shift_u8,
    BlockSize, FrameLayout,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::PaletteShiftError;
    use crate::filters::palette::{Palette, Rgb};
    use crate::filters::palette_shift::{palette_shift_u8, BlockSize};

    fn to_py_err(err: impl Into<PaletteShiftError>) -> PyErr {
        PyValueError::new_err(err.into().to_string())
    }

    fn build_palette(colors: Vec<(u8, u8, u8)>) -> PyResult<Palette> {
        Palette::new(colors.into_iter().map(Rgb::from).collect()).map_err(to_py_err)
    }

    fn palette_to_tuples(palette: &Palette) -> Vec<(u8, u8, u8)> {
        palette.colors().iter().map(|c| (c.r, c.g, c.b)).collect()
    }

    // ========================================================================
    // Palette Shift
    // ========================================================================

    /// Replace every block with the palette color nearest to its mean.
    ///
    /// # Arguments
    /// * `image` - uint8 array (height, width, 3) or (height, width, 4)
    /// * `palette` - List of (r, g, b) tuples, 1-256 entries
    /// * `block_width` - Block width in pixels (>= 1)
    /// * `block_height` - Block height in pixels (>= 1)
    ///
    /// Raises ValueError for an invalid palette, block size or shape.
    #[pyfunction]
    #[pyo3(name = "palette_shift", signature = (image, palette, block_width=1, block_height=1))]
    pub fn palette_shift_py<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        palette: Vec<(u8, u8, u8)>,
        block_width: usize,
        block_height: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let palette = build_palette(palette)?;
        let block = BlockSize::new(block_width, block_height).map_err(to_py_err)?;
        let input = image.as_array();

        let result = py
            .allow_threads(|| palette_shift_u8(input, &palette, block))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Palette Parsing
    // ========================================================================

    /// Parse whitespace-separated hex colors (`#rrggbb`, `rrggbb`, `#rgb`).
    #[pyfunction]
    pub fn parse_hex_palette(text: &str) -> PyResult<Vec<(u8, u8, u8)>> {
        let palette = Palette::from_hex_list(text).map_err(to_py_err)?;
        Ok(palette_to_tuples(&palette))
    }

    /// Parse `r,g,b;r,g,b;...` decimal triples.
    #[pyfunction]
    pub fn parse_triples_palette(text: &str) -> PyResult<Vec<(u8, u8, u8)>> {
        let palette = Palette::from_triples(text).map_err(to_py_err)?;
        Ok(palette_to_tuples(&palette))
    }

    /// Palette Shift Rust extension module
    #[pymodule]
    pub fn palette_shift(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(palette_shift_py, m)?)?;
        m.add_function(wrap_pyfunction!(parse_hex_palette, m)?)?;
        m.add_function(wrap_pyfunction!(parse_triples_palette, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::palette_shift;
