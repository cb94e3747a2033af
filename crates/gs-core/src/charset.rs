use crate::error::CoreError;

/// Blocs Unicode ombrés, du plus clair au plus dense. Palette par défaut.
pub const CHARSET_BLOCKS: &str = "░▒▓█";

/// Blocs avec espace initial — le noir devient transparent.
pub const CHARSET_SHADE: &str = " ░▒▓█";

/// 10 caractères ASCII — compact, bon contraste.
pub const CHARSET_ASCII: &str = " .:-=+*#%@";

/// Resolve a named preset (`blocks`, `shade`, `ascii`).
///
/// # Example
/// ```
/// use gs_core::charset::{preset, CHARSET_ASCII};
/// assert_eq!(preset("ascii"), Some(CHARSET_ASCII));
/// assert_eq!(preset("nope"), None);
/// ```
#[must_use]
pub fn preset(name: &str) -> Option<&'static str> {
    match name {
        "blocks" => Some(CHARSET_BLOCKS),
        "shade" => Some(CHARSET_SHADE),
        "ascii" => Some(CHARSET_ASCII),
        _ => None,
    }
}

/// Palette ordonnée de glyphes, du plus clair (index 0) au plus dense.
///
/// Never empty: construction fails on an empty string, so every lookup
/// has at least one glyph to return.
///
/// # Example
/// ```
/// use gs_core::charset::Palette;
/// let palette = Palette::new("░▒▓█").unwrap();
/// assert_eq!(palette.len(), 4);
/// assert_eq!(palette.glyph(0), '░');
/// assert_eq!(palette.glyph(99), '█');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    glyphs: Vec<char>,
}

impl Palette {
    /// Build a palette from a string ordered sparse → dense.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyPalette`] if `glyphs` has no character.
    pub fn new(glyphs: &str) -> Result<Self, CoreError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(CoreError::EmptyPalette);
        }
        Ok(Self { glyphs })
    }

    /// Number of glyphs (always ≥ 1).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, clamped to the last glyph.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        let last = self.glyphs.len().saturating_sub(1);
        self.glyphs.get(index.min(last)).copied().unwrap_or(' ')
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            glyphs: CHARSET_BLOCKS.chars().collect(),
        }
    }
}

impl std::fmt::Display for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in &self.glyphs {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_rejects_empty() {
        assert!(matches!(Palette::new(""), Err(CoreError::EmptyPalette)));
    }

    #[test]
    fn palette_single_glyph_always_returned() {
        let palette = Palette::new("#").unwrap();
        assert_eq!(palette.glyph(0), '#');
        assert_eq!(palette.glyph(10), '#');
    }

    #[test]
    fn palette_counts_chars_not_bytes() {
        // Les blocs Unicode font 3 octets chacun.
        let palette = Palette::new(CHARSET_BLOCKS).unwrap();
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.to_string(), CHARSET_BLOCKS);
    }

    #[test]
    fn default_palette_is_blocks() {
        assert_eq!(Palette::default().to_string(), "░▒▓█");
    }
}
