use std::fmt::Write as _;

use crate::color::CellColor;
use crate::error::CoreError;

/// Image décodée en mémoire, RGBA row-major, 4 bytes par pixel.
///
/// Owned by the worker that decoded it and dropped once rendered.
///
/// # Example
/// ```
/// use gs_core::frame::DecodedImage;
/// let img = DecodedImage::new(10, 10);
/// assert_eq!(img.data.len(), 400);
/// assert_eq!(img.pixel(0, 0), (0, 0, 0, 0));
/// ```
#[derive(Clone, Debug)]
pub struct DecodedImage {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl DecodedImage {
    /// Crée une image transparente aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `data` is not exactly
    /// `width * height * 4` bytes long.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Image opaque d'une seule couleur.
    ///
    /// # Example
    /// ```
    /// use gs_core::frame::DecodedImage;
    /// let img = DecodedImage::filled(2, 3, (10, 20, 30));
    /// assert_eq!(img.pixel(1, 2), (10, 20, 30, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        let mut img = Self::new(width, height);
        for px in img.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[rgb.0, rgb.1, rgb.2, 255]);
        }
        img
    }

    /// Set pixel (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&[rgba.0, rgba.1, rgba.2, rgba.3]);
    }

    /// Accès au pixel (x, y) → (r, g, b, a). Hors limites → (0, 0, 0, 0).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0, 0);
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        match self.data.get(idx..idx + 4) {
            Some(px) => (px[0], px[1], px[2], px[3]),
            None => (0, 0, 0, 0),
        }
    }
}

/// Suite de cellules adjacentes partageant exactement la même couleur.
///
/// # Example
/// ```
/// use gs_core::color::CellColor;
/// use gs_core::frame::ColorRun;
/// let mut run = ColorRun::new(CellColor { r: 255, g: 0, b: 0 }, '█');
/// run.push('▓');
/// let mut out = String::new();
/// run.write_to(&mut out);
/// assert_eq!(out, "\x1b[38;2;255;0;0m█▓\x1b[0m");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorRun {
    /// Couleur commune à tous les glyphes du run.
    pub color: CellColor,
    /// Glyphes dans l'ordre de la ligne.
    pub glyphs: String,
}

impl ColorRun {
    /// Start a run with its first glyph.
    #[must_use]
    pub fn new(color: CellColor, glyph: char) -> Self {
        let mut glyphs = String::with_capacity(16);
        glyphs.push(glyph);
        Self { color, glyphs }
    }

    /// Append one glyph.
    #[inline]
    pub fn push(&mut self, glyph: char) {
        self.glyphs.push(glyph);
    }

    /// Number of glyphs (cells) covered by the run.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.glyphs.chars().count()
    }

    /// Serialize as `ESC[38;2;R;G;Bm<glyphs>ESC[0m`.
    pub fn write_to(&self, out: &mut String) {
        let CellColor { r, g, b } = self.color;
        // Writing into a String cannot fail.
        let _ = write!(out, "\x1b[38;2;{r};{g};{b}m");
        out.push_str(&self.glyphs);
        out.push_str("\x1b[0m");
    }
}

/// Texte complet d'une image rendue, prêt à être affiché.
///
/// Immutable once built; moved through the output queue to the pump.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    text: String,
    rows: usize,
    runs: usize,
}

impl Frame {
    /// Assemble a frame from its serialized text and counters.
    #[must_use]
    pub fn new(text: String, rows: usize, runs: usize) -> Self {
        Self { text, rows, runs }
    }

    /// Serialized bytes to print.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of grid rows rendered.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of color runs emitted across all rows.
    #[must_use]
    pub fn runs(&self) -> usize {
        self.runs
    }
}
