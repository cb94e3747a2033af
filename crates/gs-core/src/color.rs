/// Couleur moyenne d'une cellule, canaux entiers [0, 255].
///
/// Produced by truncating the floating-point block mean, so two cells
/// compare equal only when their truncated channels match exactly.
///
/// # Example
/// ```
/// use gs_core::color::CellColor;
/// let c = CellColor::from_mean(12.9, 200.2, 255.0);
/// assert_eq!(c, CellColor { r: 12, g: 200, b: 255 });
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellColor {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl CellColor {
    /// Black.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Truncate a floating-point mean to integer channels.
    #[inline(always)]
    #[must_use]
    pub fn from_mean(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 255.0) as u8,
            g: g.clamp(0.0, 255.0) as u8,
            b: b.clamp(0.0, 255.0) as u8,
        }
    }
}

/// Luminance perceptuelle BT.709 sur des canaux flottants [0, 255].
///
/// # Example
/// ```
/// use gs_core::color::luminance;
/// assert!((luminance(255.0, 255.0, 255.0) - 255.0).abs() < 1e-9);
/// assert_eq!(luminance(0.0, 0.0, 0.0), 0.0);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}
