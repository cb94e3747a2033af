use std::path::Path;

use crate::error::CoreError;
use crate::frame::DecodedImage;

/// Fournit la taille courante du terminal en cellules `(colonnes, lignes)`.
///
/// Implémenté par : `TerminalProbe` (crossterm), [`FixedSize`].
///
/// # Example
/// ```
/// use gs_core::traits::{FixedSize, SizeProbe};
/// assert_eq!(FixedSize(80, 24).size().unwrap(), (80, 24));
/// ```
pub trait SizeProbe: Send + Sync {
    /// Current terminal capacity.
    ///
    /// # Errors
    /// Returns [`CoreError::TerminalSize`] when the size cannot be read.
    fn size(&self) -> Result<(u16, u16), CoreError>;
}

/// Taille constante, pour les tests et l'usage sans terminal.
#[derive(Clone, Copy, Debug)]
pub struct FixedSize(pub u16, pub u16);

impl SizeProbe for FixedSize {
    fn size(&self) -> Result<(u16, u16), CoreError> {
        Ok((self.0, self.1))
    }
}

/// Décode un fichier en image RGBA.
///
/// # Example
/// ```
/// use gs_core::traits::ImageDecoder;
/// use gs_core::frame::DecodedImage;
/// use gs_core::CoreError;
/// use std::path::Path;
///
/// struct Solid;
/// impl ImageDecoder for Solid {
///     fn decode(&self, _path: &Path) -> Result<DecodedImage, CoreError> {
///         Ok(DecodedImage::filled(1, 1, (0, 0, 0)))
///     }
/// }
/// assert_eq!(Solid.decode(Path::new("x")).unwrap().width, 1);
/// ```
pub trait ImageDecoder: Send + Sync {
    /// Open and decode `path`. The file handle is closed before returning.
    ///
    /// # Errors
    /// [`CoreError::Io`] if the file cannot be opened, [`CoreError::Decode`]
    /// if its content is not a supported raster image.
    fn decode(&self, path: &Path) -> Result<DecodedImage, CoreError>;
}
