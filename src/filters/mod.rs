//! Filter modules for palette quantization.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGB8 | (H, W, 3) or packed bytes | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) or strided frame | u8 | RGB + alpha, alpha preserved |
//!
//! ## Architecture
//!
//! - **Pure functions** - Buffers and palettes are borrowed for one call only
//! - **Validated inputs** - [`palette::Palette`] and [`palette_shift::BlockSize`]
//!   reject bad configuration at construction, shapes are checked before any write
//! - **Thread-safe** - Bands of blocks run in parallel with rayon

pub mod palette;
pub mod palette_shift;
