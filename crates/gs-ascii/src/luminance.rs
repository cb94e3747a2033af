use gs_core::charset::Palette;
use gs_core::color::luminance;

/// Tolérance d'arrondi sur la position dans la palette.
pub const LUMA_EPSILON: f64 = 1e-9;

/// Index de glyphe pour une luminance [0, 255] et une palette de `len` glyphes.
///
/// `floor(lum / 255 * (len - 1))`, clamped to `[0, len - 1]`. NaN and
/// negative inputs map to 0. A tolerance of [`LUMA_EPSILON`] absorbs the
/// rounding of the BT.709 weights, so pure white lands on the last glyph.
///
/// # Example
/// ```
/// use gs_ascii::luminance::glyph_index;
/// assert_eq!(glyph_index(0.0, 4), 0);
/// assert_eq!(glyph_index(255.0, 4), 3);
/// assert_eq!(glyph_index(128.0, 4), 1);
/// assert_eq!(glyph_index(1000.0, 4), 3);
/// ```
#[inline(always)]
#[must_use]
pub fn glyph_index(lum: f64, len: usize) -> usize {
    let last = len.saturating_sub(1);
    if last == 0 || lum.is_nan() || lum <= 0.0 {
        return 0;
    }
    let idx = (lum / 255.0 * last as f64 + LUMA_EPSILON).floor() as usize;
    idx.min(last)
}

/// Glyphe pour une couleur moyenne.
///
/// # Example
/// ```
/// use gs_core::charset::Palette;
/// use gs_ascii::luminance::map_glyph;
/// let palette = Palette::new("░▒▓█").unwrap();
/// assert_eq!(map_glyph(&palette, (0.0, 0.0, 0.0)), '░');
/// assert_eq!(map_glyph(&palette, (255.0, 255.0, 255.0)), '█');
/// ```
#[inline(always)]
#[must_use]
pub fn map_glyph(palette: &Palette, rgb: (f64, f64, f64)) -> char {
    let lum = luminance(rgb.0, rgb.1, rgb.2);
    palette.glyph(glyph_index(lum, palette.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_index_monotonic_and_in_range() {
        for len in 1..=12usize {
            let mut prev = 0usize;
            for step in 0..=2550u32 {
                let lum = f64::from(step) / 10.0;
                let idx = glyph_index(lum, len);
                assert!(idx < len, "index {idx} hors palette de {len}");
                assert!(idx >= prev, "non monotone à {lum} (len {len})");
                prev = idx;
            }
        }
    }

    #[test]
    fn degenerate_luminance_maps_to_sparsest() {
        assert_eq!(glyph_index(f64::NAN, 4), 0);
        assert_eq!(glyph_index(-5.0, 4), 0);
        assert_eq!(glyph_index(200.0, 1), 0);
        assert_eq!(glyph_index(200.0, 0), 0);
    }

    #[test]
    fn tolerance_only_moves_exact_thresholds() {
        // Palette de 4 : seuils à 85 et 170.
        assert_eq!(glyph_index(85.0 - 1e-6, 4), 0);
        assert_eq!(glyph_index(85.0, 4), 1);
        assert_eq!(glyph_index(170.0 - 1e-6, 4), 1);
        assert_eq!(glyph_index(170.0, 4), 2);
        assert_eq!(glyph_index(255.0 - 1e-6, 4), 2);
        assert_eq!(glyph_index(255.0, 4), 3);
    }

    #[test]
    fn white_reaches_densest_glyph() {
        // 0.2126 + 0.7152 + 0.0722 = 1.0 : le blanc pur vaut 255.
        let palette = Palette::new(" .:-=+*#%@").unwrap();
        assert_eq!(map_glyph(&palette, (255.0, 255.0, 255.0)), '@');
    }
}
