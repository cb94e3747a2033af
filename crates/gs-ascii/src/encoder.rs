use gs_core::color::CellColor;
use gs_core::frame::ColorRun;

/// Compression glouton d'une ligne en runs de même couleur.
///
/// Single pass, left to right, no lookahead: a cell joins the current run
/// only when its color is identical, otherwise the run is closed and a new
/// one starts.
///
/// # Example
/// ```
/// use gs_core::color::CellColor;
/// use gs_ascii::encoder::RowEncoder;
///
/// let red = CellColor { r: 255, g: 0, b: 0 };
/// let mut enc = RowEncoder::new();
/// enc.push(red, '█');
/// enc.push(red, '▓');
/// enc.push(CellColor::BLACK, '░');
/// let runs = enc.finish();
/// assert_eq!(runs.len(), 2);
/// assert_eq!(runs[0].glyphs, "█▓");
/// ```
#[derive(Debug, Default)]
pub struct RowEncoder {
    current: Option<ColorRun>,
    done: Vec<ColorRun>,
}

impl RowEncoder {
    /// Empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one cell.
    #[inline]
    pub fn push(&mut self, color: CellColor, glyph: char) {
        match &mut self.current {
            Some(run) if run.color == color => run.push(glyph),
            current => {
                if let Some(run) = current.replace(ColorRun::new(color, glyph)) {
                    self.done.push(run);
                }
            }
        }
    }

    /// Close the row and return its runs in order.
    #[must_use]
    pub fn finish(mut self) -> Vec<ColorRun> {
        if let Some(run) = self.current.take() {
            self.done.push(run);
        }
        self.done
    }
}

/// Encode a whole row of `(color, glyph)` cells.
///
/// # Example
/// ```
/// use gs_core::color::CellColor;
/// use gs_ascii::encoder::encode_row;
/// assert!(encode_row(&[]).is_empty());
/// let runs = encode_row(&[(CellColor::BLACK, '░'), (CellColor::BLACK, '░')]);
/// assert_eq!(runs.len(), 1);
/// ```
#[must_use]
pub fn encode_row(cells: &[(CellColor, char)]) -> Vec<ColorRun> {
    let mut enc = RowEncoder::new();
    for &(color, glyph) in cells {
        enc.push(color, glyph);
    }
    enc.finish()
}

/// Serialize runs into `out`, one color escape pair per run.
pub fn write_runs(runs: &[ColorRun], out: &mut String) {
    for run in runs {
        run.write_to(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(v: u8) -> CellColor {
        CellColor { r: v, g: v, b: v }
    }

    /// Nombre de groupes maximaux contigus de même couleur.
    fn groups(cells: &[(CellColor, char)]) -> usize {
        cells
            .iter()
            .enumerate()
            .filter(|(i, (color, _))| *i == 0 || cells[i - 1].0 != *color)
            .count()
    }

    fn sample_rows() -> Vec<Vec<(CellColor, char)>> {
        vec![
            vec![],
            vec![(c(1), 'a')],
            vec![(c(1), 'a'), (c(1), 'b'), (c(1), 'c')],
            vec![(c(1), 'a'), (c(2), 'b'), (c(1), 'c')],
            vec![(c(0), '░'), (c(0), '▒'), (c(9), '█'), (c(9), '█'), (c(0), '░')],
            (0..50).map(|i| (c((i / 7) as u8), '▓')).collect(),
        ]
    }

    #[test]
    fn replay_reproduces_glyphs() {
        for row in sample_rows() {
            let runs = encode_row(&row);
            let replay: String = runs.iter().map(|r| r.glyphs.as_str()).collect();
            let expected: String = row.iter().map(|(_, g)| *g).collect();
            assert_eq!(replay, expected);
        }
    }

    #[test]
    fn run_count_matches_color_groups() {
        for row in sample_rows() {
            assert_eq!(encode_row(&row).len(), groups(&row), "ligne {row:?}");
        }
    }

    #[test]
    fn runs_never_mix_colors() {
        for row in sample_rows() {
            let runs = encode_row(&row);
            let mut cursor = 0;
            for run in &runs {
                for _ in run.glyphs.chars() {
                    assert_eq!(row[cursor].0, run.color);
                    cursor += 1;
                }
            }
            assert_eq!(cursor, row.len());
        }
    }

    #[test]
    fn no_merge_across_gap() {
        // a b a : pas de réordonnancement, trois runs.
        let runs = encode_row(&[(c(1), 'x'), (c(2), 'y'), (c(1), 'z')]);
        assert_eq!(runs.len(), 3);
    }

    #[test]
    fn serialized_row_has_one_escape_pair_per_run() {
        let runs = encode_row(&[
            (CellColor { r: 1, g: 2, b: 3 }, '░'),
            (CellColor { r: 1, g: 2, b: 3 }, '▒'),
            (CellColor { r: 200, g: 100, b: 0 }, '█'),
        ]);
        let mut out = String::new();
        write_runs(&runs, &mut out);
        assert_eq!(
            out,
            "\x1b[38;2;1;2;3m░▒\x1b[0m\x1b[38;2;200;100;0m█\x1b[0m"
        );
        assert_eq!(out.matches("\x1b[38;2;").count(), 2);
        assert_eq!(out.matches("\x1b[0m").count(), 2);
    }
}
