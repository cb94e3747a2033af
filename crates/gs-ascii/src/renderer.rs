use gs_core::charset::Palette;
use gs_core::color::CellColor;
use gs_core::frame::{DecodedImage, Frame};
use gs_core::grid::GridSpec;

use crate::average::average_block;
use crate::encoder::{RowEncoder, write_runs};
use crate::luminance::map_glyph;

/// Renderer orchestre moyenne → glyphe → runs pour une image entière.
///
/// # Example
/// ```
/// use gs_core::charset::Palette;
/// use gs_ascii::renderer::Renderer;
/// let r = Renderer::new(Palette::default());
/// assert_eq!(r.palette().len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    /// Create a renderer bound to a palette.
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Active palette.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render `image` onto `grid`.
    ///
    /// Each grid row starts with a line break, then its color runs. Cells
    /// whose block lies outside the image emit nothing. Pure: identical
    /// inputs give byte-identical frames.
    ///
    /// # Example
    /// ```
    /// use gs_core::charset::Palette;
    /// use gs_core::frame::DecodedImage;
    /// use gs_core::grid::GridSpec;
    /// use gs_ascii::renderer::Renderer;
    ///
    /// let img = DecodedImage::filled(1, 1, (255, 255, 255));
    /// let grid = GridSpec::for_image((1, 1), 1, 1);
    /// let frame = Renderer::new(Palette::default()).render(&img, &grid);
    /// assert_eq!(frame.as_str(), "\n\x1b[38;2;255;255;255m█\x1b[0m");
    /// ```
    #[must_use]
    pub fn render(&self, image: &DecodedImage, grid: &GridSpec) -> Frame {
        let (block_w, block_h) = grid.block_size();
        // Estimation : ~20 octets d'échappement par run, 3 par glyphe.
        let cells = usize::from(grid.columns) * usize::from(grid.rows);
        let mut text = String::with_capacity(cells * 4 + usize::from(grid.rows) * 24);
        let mut runs = 0usize;

        for row in 0..grid.rows {
            text.push('\n');
            let mut encoder = RowEncoder::new();
            for column in 0..grid.columns {
                let (x, y) = grid.origin(column, row);
                let Some((r, g, b)) = average_block(image, x, y, block_w, block_h) else {
                    continue;
                };
                let glyph = map_glyph(&self.palette, (r, g, b));
                encoder.push(CellColor::from_mean(r, g, b), glyph);
            }
            let row_runs = encoder.finish();
            runs += row_runs.len();
            write_runs(&row_runs, &mut text);
        }

        log::trace!(
            "frame {}x{} cells, {runs} runs, {} bytes",
            grid.columns,
            grid.rows,
            text.len()
        );
        Frame::new(text, usize::from(grid.rows), runs)
    }

    /// Compute the grid for `capacity` then render.
    #[must_use]
    pub fn render_for_terminal(&self, image: &DecodedImage, capacity: (u16, u16)) -> Frame {
        let grid = GridSpec::for_image(capacity, image.width, image.height);
        self.render(image, &grid)
    }
}
