use gs_core::frame::DecodedImage;

/// Accumulateur de moyenne couleur, sommes entières 64 bits par canal.
///
/// A cell can cover hundreds of thousands of pixels; `u64` sums stay exact
/// where 8-bit or `f32` accumulation would drift.
///
/// # Example
/// ```
/// use gs_ascii::average::BlockAverage;
/// let mut avg = BlockAverage::default();
/// avg.add(10, 20, 30);
/// avg.add(20, 40, 60);
/// assert_eq!(avg.mean(), Some((15.0, 30.0, 45.0)));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockAverage {
    r: u64,
    g: u64,
    b: u64,
    count: u64,
}

impl BlockAverage {
    /// Add one sample.
    #[inline(always)]
    pub fn add(&mut self, r: u8, g: u8, b: u8) {
        self.r += u64::from(r);
        self.g += u64::from(g);
        self.b += u64::from(b);
        self.count += 1;
    }

    /// Number of samples accumulated.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean color, or `None` when no sample was added.
    #[must_use]
    pub fn mean(&self) -> Option<(f64, f64, f64)> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some((self.r as f64 / n, self.g as f64 / n, self.b as f64 / n))
    }
}

/// Couleur moyenne du bloc `width`×`height` dont le coin haut-gauche est (x, y).
///
/// Samples every pixel of the rectangle, clipped to the image bounds.
/// Color channels are weighted by alpha, so transparent pixels count as
/// black. Returns `None` when the block lies entirely outside the image.
///
/// # Example
/// ```
/// use gs_core::frame::DecodedImage;
/// use gs_ascii::average::average_block;
/// let img = DecodedImage::filled(8, 8, (40, 80, 120));
/// assert_eq!(average_block(&img, 2, 2, 4, 4), Some((40.0, 80.0, 120.0)));
/// assert_eq!(average_block(&img, 8, 0, 4, 4), None);
/// ```
#[must_use]
pub fn average_block(
    image: &DecodedImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Option<(f64, f64, f64)> {
    if x >= image.width || y >= image.height {
        return None;
    }
    let x_end = x.saturating_add(width.max(1)).min(image.width);
    let y_end = y.saturating_add(height.max(1)).min(image.height);

    let mut avg = BlockAverage::default();
    for py in y..y_end {
        for px in x..x_end {
            let (r, g, b, a) = image.pixel(px, py);
            avg.add(premultiply(r, a), premultiply(g, a), premultiply(b, a));
        }
    }
    avg.mean()
}

#[inline(always)]
fn premultiply(c: u8, a: u8) -> u8 {
    if a == u8::MAX {
        return c;
    }
    (u16::from(c) * u16::from(a) / 255) as u8
}
