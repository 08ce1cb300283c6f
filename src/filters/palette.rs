//! Palette type and in-memory palette sources.
//!
//! A [`Palette`] is an ordered list of 1-256 [`Rgb`] colors. Order only
//! matters for tie-breaking: when two entries are equally close to a color,
//! the one with the lower index wins.
//!
//! ## Sources
//!
//! Hosts hand palettes over in two textual forms:
//! - **Hex list**: whitespace-separated `#rrggbb` tokens, `#` optional,
//!   `#rgb` shorthand accepted (`Palette::from_hex_list`)
//! - **Triples**: `r,g,b;r,g,b;...` decimal components (`Palette::from_triples`)
//!
//! Reading the text from disk is left to the host.

use crate::error::{ConfigurationError, ParseColorError, Result};

/// Largest palette the engine accepts.
pub const MAX_COLORS: usize = 256;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    ///
    /// Errors carry entry index 1.
    pub fn from_hex(text: &str) -> std::result::Result<Self, ParseColorError> {
        parse_hex(text, 1)
    }

    /// Channels as `f64`, the precision used for means and distances.
    #[inline]
    pub fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Squared Euclidean distance to a real-valued color.
    #[inline]
    pub fn distance_sq(self, color: [f64; 3]) -> f64 {
        let [r, g, b] = self.to_f64();
        let dr = color[0] - r;
        let dg = color[1] - g;
        let db = color[2] - b;
        dr * dr + dg * dg + db * db
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Validated, ordered list of 1-256 colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette, rejecting empty and oversized color lists.
    pub fn new(colors: Vec<Rgb>) -> std::result::Result<Self, ConfigurationError> {
        if colors.is_empty() {
            return Err(ConfigurationError::EmptyPalette);
        }
        if colors.len() > MAX_COLORS {
            return Err(ConfigurationError::TooManyColors {
                count: colors.len(),
            });
        }
        Ok(Self { colors })
    }

    /// Parse whitespace-separated hex colors.
    ///
    /// Every token must be a valid color; nothing is skipped.
    pub fn from_hex_list(text: &str) -> Result<Self> {
        let colors = text
            .split_whitespace()
            .enumerate()
            .map(|(i, token)| parse_hex(token, i + 1))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::trace!(count = colors.len(), "parsed hex palette");
        Ok(Self::new(colors)?)
    }

    /// Parse `r,g,b;r,g,b;...` decimal triples. A trailing `;` is allowed.
    pub fn from_triples(text: &str) -> Result<Self> {
        let colors = text
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .enumerate()
            .map(|(i, entry)| parse_triple(entry, i + 1))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::trace!(count = colors.len(), "parsed triple palette");
        Ok(Self::new(colors)?)
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the entry closest to `color` by squared Euclidean distance.
    ///
    /// Scans in palette order with a strict comparison, so exact ties resolve
    /// to the lowest index.
    pub fn nearest_index(&self, color: [f64; 3]) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, entry) in self.colors.iter().enumerate() {
            let distance = entry.distance_sq(color);
            if distance < best_distance {
                best_distance = distance;
                best = i;
            }
        }
        best
    }

    #[inline]
    pub fn nearest(&self, color: [f64; 3]) -> Rgb {
        self.colors[self.nearest_index(color)]
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = ConfigurationError;

    fn try_from(colors: Vec<Rgb>) -> std::result::Result<Self, Self::Error> {
        Self::new(colors)
    }
}

fn parse_hex(text: &str, entry: usize) -> std::result::Result<Rgb, ParseColorError> {
    let hex = text.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseColorError::InvalidHex {
            entry,
            text: text.to_string(),
        });
    }

    let digit = |i: usize| -> u8 {
        // all chars are ASCII hex digits at this point
        (hex.as_bytes()[i] as char).to_digit(16).unwrap_or(0) as u8
    };

    match hex.len() {
        // #rgb expands each digit: f -> ff
        3 => Ok(Rgb::new(digit(0) * 17, digit(1) * 17, digit(2) * 17)),
        6 => Ok(Rgb::new(
            digit(0) << 4 | digit(1),
            digit(2) << 4 | digit(3),
            digit(4) << 4 | digit(5),
        )),
        _ => Err(ParseColorError::InvalidLength {
            entry,
            text: text.to_string(),
        }),
    }
}

fn parse_triple(text: &str, entry: usize) -> std::result::Result<Rgb, ParseColorError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let &[r, g, b] = parts.as_slice() else {
        return Err(ParseColorError::InvalidTriple {
            entry,
            text: text.to_string(),
        });
    };

    let component = |part: &str| -> std::result::Result<u8, ParseColorError> {
        let value: i64 = part.parse().map_err(|_| ParseColorError::InvalidTriple {
            entry,
            text: text.to_string(),
        })?;
        u8::try_from(value).map_err(|_| ParseColorError::ComponentOutOfRange {
            entry,
            text: part.to_string(),
        })
    };

    Ok(Rgb::new(component(r)?, component(g)?, component(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaletteShiftError;

    fn bw() -> Palette {
        Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Palette::new(vec![]), Err(ConfigurationError::EmptyPalette));
    }

    #[test]
    fn test_new_accepts_256_rejects_257() {
        let colors: Vec<Rgb> = (0..=255u8).map(|v| Rgb::new(v, v, v)).collect();
        assert_eq!(Palette::new(colors.clone()).unwrap().len(), 256);

        let mut too_many = colors;
        too_many.push(Rgb::new(1, 2, 3));
        assert_eq!(
            Palette::new(too_many),
            Err(ConfigurationError::TooManyColors { count: 257 })
        );
    }

    #[test]
    fn test_nearest_exact_match() {
        let palette = Palette::new(vec![
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
        ])
        .unwrap();
        assert_eq!(palette.nearest_index([0.0, 255.0, 0.0]), 1);
    }

    #[test]
    fn test_nearest_dark_grey_goes_black() {
        // 300 vs ~60075
        assert_eq!(bw().nearest([10.0, 10.0, 10.0]), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_nearest_tie_keeps_lowest_index() {
        let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(20, 0, 0)]).unwrap();
        assert_eq!(palette.nearest_index([10.0, 0.0, 0.0]), 0);

        let reversed = Palette::new(vec![Rgb::new(20, 0, 0), Rgb::new(0, 0, 0)]).unwrap();
        assert_eq!(reversed.nearest_index([10.0, 0.0, 0.0]), 0);
    }

    #[test]
    fn test_nearest_duplicate_entries_pick_first() {
        let c = Rgb::new(40, 40, 40);
        let palette = Palette::new(vec![Rgb::new(200, 0, 0), c, c]).unwrap();
        assert_eq!(palette.nearest_index([40.0, 40.0, 40.0]), 1);
    }

    #[test]
    fn test_from_hex_forms() {
        assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("FF8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("#f80").unwrap(), Rgb::new(255, 136, 0));
    }

    #[test]
    fn test_from_hex_errors() {
        assert!(matches!(
            Rgb::from_hex("#ff80"),
            Err(ParseColorError::InvalidLength { .. })
        ));
        assert!(matches!(
            Rgb::from_hex("#gg0000"),
            Err(ParseColorError::InvalidHex { .. })
        ));
        assert!(matches!(
            Rgb::from_hex("+1+2+3"),
            Err(ParseColorError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_from_hex_list() {
        let palette = Palette::from_hex_list("#000000\n#FFFFFF\r\n  ff0000 \n\n").unwrap();
        assert_eq!(
            palette.colors(),
            &[
                Rgb::new(0, 0, 0),
                Rgb::new(255, 255, 255),
                Rgb::new(255, 0, 0)
            ]
        );
    }

    #[test]
    fn test_from_hex_list_reports_bad_entry() {
        let err = Palette::from_hex_list("#000000 #zzzzzz").unwrap_err();
        assert_eq!(
            err,
            PaletteShiftError::ParseColor(ParseColorError::InvalidHex {
                entry: 2,
                text: "#zzzzzz".to_string(),
            })
        );
    }

    #[test]
    fn test_from_hex_list_empty_and_oversized() {
        assert_eq!(
            Palette::from_hex_list("  \n "),
            Err(ConfigurationError::EmptyPalette.into())
        );

        let text = vec!["#102030"; 257].join("\n");
        assert_eq!(
            Palette::from_hex_list(&text),
            Err(ConfigurationError::TooManyColors { count: 257 }.into())
        );
    }

    #[test]
    fn test_from_triples() {
        let palette = Palette::from_triples("0,0,0; 255, 128, 7;").unwrap();
        assert_eq!(palette.colors(), &[Rgb::new(0, 0, 0), Rgb::new(255, 128, 7)]);
    }

    #[test]
    fn test_from_triples_errors() {
        assert!(matches!(
            Palette::from_triples("1,2"),
            Err(PaletteShiftError::ParseColor(ParseColorError::InvalidTriple { entry: 1, .. }))
        ));
        assert!(matches!(
            Palette::from_triples("1,2,3;4,x,6"),
            Err(PaletteShiftError::ParseColor(ParseColorError::InvalidTriple { entry: 2, .. }))
        ));
        assert!(matches!(
            Palette::from_triples("1,2,300"),
            Err(PaletteShiftError::ParseColor(ParseColorError::ComponentOutOfRange { .. }))
        ));
        assert!(matches!(
            Palette::from_triples("-1,2,3"),
            Err(PaletteShiftError::ParseColor(ParseColorError::ComponentOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_to_hex_strings() {
        assert_eq!(bw().to_hex_strings(), vec!["#000000", "#ffffff"]);
    }
}
