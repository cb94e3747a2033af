use gs_core::error::CoreError;
use gs_core::traits::SizeProbe;

/// Taille du terminal de contrôle via crossterm.
///
/// A zero dimension (detached or redirected terminal on some platforms) is
/// reported as a failure rather than an empty grid.
///
/// # Example
/// ```no_run
/// use gs_core::traits::SizeProbe;
/// use gs_render::terminal::TerminalProbe;
/// let (cols, rows) = TerminalProbe.size().unwrap();
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalProbe;

impl SizeProbe for TerminalProbe {
    fn size(&self) -> Result<(u16, u16), CoreError> {
        let (cols, rows) =
            crossterm::terminal::size().map_err(|e| CoreError::TerminalSize(e.to_string()))?;
        if cols == 0 || rows == 0 {
            return Err(CoreError::TerminalSize(format!(
                "terminal de taille nulle ({cols}x{rows})"
            )));
        }
        Ok((cols, rows))
    }
}
