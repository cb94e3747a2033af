use crate::error::CoreError;
use crate::traits::SizeProbe;

/// Pixels retirés de chaque dimension de l'image avant découpage,
/// pour éviter les artefacts de bord.
pub const EDGE_MARGIN: u32 = 2;

/// Fixed terminal-size caps. `None` means "follow the probed terminal".
///
/// # Example
/// ```
/// use gs_core::grid::SizeOverrides;
/// let o = SizeOverrides { width: Some(40), height: None };
/// assert!(!o.is_fixed());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeOverrides {
    /// Fixed column count.
    pub width: Option<u16>,
    /// Fixed row count.
    pub height: Option<u16>,
}

impl SizeOverrides {
    /// `true` when both axes are fixed and no probe is needed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }
}

/// Apply width/height caps to a probed terminal size.
///
/// A width cap smaller than the probed width rescales the rows to keep the
/// terminal's aspect ratio; otherwise a height cap smaller than the probed
/// height rescales the columns. Results are never below 1.
///
/// # Example
/// ```
/// use gs_core::grid::{scale_capacity, SizeOverrides};
/// let o = SizeOverrides { width: Some(40), height: None };
/// assert_eq!(scale_capacity((80, 24), o), (40, 12));
/// ```
#[must_use]
pub fn scale_capacity(probed: (u16, u16), overrides: SizeOverrides) -> (u16, u16) {
    if let (Some(w), Some(h)) = (overrides.width, overrides.height) {
        return (w.max(1), h.max(1));
    }
    let (cols, rows) = (u32::from(probed.0.max(1)), u32::from(probed.1.max(1)));
    let (cols, rows) = match (overrides.width, overrides.height) {
        (Some(w), _) if u32::from(w) < cols => {
            let w = u32::from(w);
            (w, rows * w / cols)
        }
        (_, Some(h)) if u32::from(h) < rows => {
            let h = u32::from(h);
            (cols * h / rows, h)
        }
        _ => (cols, rows),
    };
    (clamp_u16(cols), clamp_u16(rows))
}

fn clamp_u16(v: u32) -> u16 {
    v.clamp(1, u32::from(u16::MAX)) as u16
}

/// Number of cells available for one frame.
///
/// The probe is skipped entirely when both overrides are set.
///
/// # Errors
/// Propagates the probe failure; there is no sensible fallback grid.
pub fn terminal_capacity(
    probe: &dyn SizeProbe,
    overrides: SizeOverrides,
) -> Result<(u16, u16), CoreError> {
    if overrides.is_fixed() {
        return Ok(scale_capacity((1, 1), overrides));
    }
    let probed = probe.size()?;
    Ok(scale_capacity(probed, overrides))
}

/// Correspondance entre la grille de caractères et les pixels source.
///
/// Spans are fractional so cells tile the image evenly; the sampled block
/// is the integer part of the span, never smaller than one pixel.
///
/// # Example
/// ```
/// use gs_core::grid::GridSpec;
/// let grid = GridSpec::for_image((2, 2), 4, 4);
/// assert_eq!((grid.columns, grid.rows), (2, 2));
/// assert_eq!(grid.block_size(), (1, 1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    /// Cells per row.
    pub columns: u16,
    /// Rows of cells.
    pub rows: u16,
    /// Horizontal pixel span of a cell (≥ 1.0).
    pub cell_width: f64,
    /// Vertical pixel span of a cell (≥ 1.0).
    pub cell_height: f64,
}

impl GridSpec {
    /// Derive the grid for an image of `width`×`height` pixels.
    #[must_use]
    pub fn for_image(capacity: (u16, u16), width: u32, height: u32) -> Self {
        let columns = capacity.0.max(1);
        let rows = capacity.1.max(1);
        let extent_w = width.saturating_sub(EDGE_MARGIN).max(1);
        let extent_h = height.saturating_sub(EDGE_MARGIN).max(1);
        Self {
            columns,
            rows,
            cell_width: (f64::from(extent_w) / f64::from(columns)).max(1.0),
            cell_height: (f64::from(extent_h) / f64::from(rows)).max(1.0),
        }
    }

    /// Integer pixel block sampled per cell, at least 1×1.
    #[inline]
    #[must_use]
    pub fn block_size(&self) -> (u32, u32) {
        (
            (self.cell_width as u32).max(1),
            (self.cell_height as u32).max(1),
        )
    }

    /// Top-left source pixel of cell (`column`, `row`).
    #[inline(always)]
    #[must_use]
    pub fn origin(&self, column: u16, row: u16) -> (u32, u32) {
        (
            (f64::from(column) * self.cell_width) as u32,
            (f64::from(row) * self.cell_height) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FixedSize;

    struct FailingProbe;
    impl SizeProbe for FailingProbe {
        fn size(&self) -> Result<(u16, u16), CoreError> {
            Err(CoreError::TerminalSize("no tty".into()))
        }
    }

    #[test]
    fn fixed_width_halves_rows() {
        let cap = terminal_capacity(
            &FixedSize(80, 24),
            SizeOverrides {
                width: Some(40),
                height: None,
            },
        )
        .unwrap();
        assert_eq!(cap, (40, 12));
        let grid = GridSpec::for_image(cap, 802, 602);
        assert_eq!(grid.columns, 40);
        assert_eq!(grid.rows, 12);
    }

    #[test]
    fn fixed_height_scales_columns() {
        let o = SizeOverrides {
            width: None,
            height: Some(12),
        };
        assert_eq!(scale_capacity((80, 24), o), (40, 12));
    }

    #[test]
    fn larger_override_is_ignored() {
        let o = SizeOverrides {
            width: Some(200),
            height: None,
        };
        assert_eq!(scale_capacity((80, 24), o), (80, 24));
    }

    #[test]
    fn both_overrides_skip_probe() {
        let o = SizeOverrides {
            width: Some(30),
            height: Some(7),
        };
        assert_eq!(terminal_capacity(&FailingProbe, o).unwrap(), (30, 7));
    }

    #[test]
    fn probe_failure_is_propagated() {
        let err = terminal_capacity(&FailingProbe, SizeOverrides::default());
        assert!(matches!(err, Err(CoreError::TerminalSize(_))));
    }

    #[test]
    fn degenerate_inputs_keep_invariants() {
        for &(cap, w, h) in &[
            ((0u16, 0u16), 0u32, 0u32),
            ((1, 1), 1, 1),
            ((500, 300), 3, 3),
            ((80, 24), 10_000, 1),
        ] {
            let grid = GridSpec::for_image(cap, w, h);
            assert!(grid.columns >= 1 && grid.rows >= 1, "grille vide pour {cap:?}");
            assert!(grid.cell_width >= 1.0 && grid.cell_height >= 1.0);
            let (bw, bh) = grid.block_size();
            assert!(bw >= 1 && bh >= 1);
        }
    }

    #[test]
    fn scaled_capacity_never_zero() {
        let o = SizeOverrides {
            width: Some(1),
            height: None,
        };
        assert_eq!(scale_capacity((80, 24), o), (1, 1));
    }

    #[test]
    fn origin_steps_by_fractional_span() {
        let grid = GridSpec::for_image((4, 1), 12, 3);
        // extent 10 / 4 = 2.5 px par cellule
        assert_eq!(grid.origin(0, 0), (0, 0));
        assert_eq!(grid.origin(1, 0), (2, 0));
        assert_eq!(grid.origin(2, 0), (5, 0));
        assert_eq!(grid.block_size(), (2, 1));
    }
}
