use std::path::Path;

use gs_core::error::CoreError;
use gs_core::frame::DecodedImage;
use gs_core::traits::ImageDecoder;
use image::ImageReader;

/// Décodeur raster basé sur la crate `image` (PNG, JPEG, BMP, GIF).
///
/// The format is sniffed from the file content, not its extension, so a
/// misnamed file still decodes and a non-image file is rejected here.
///
/// # Example
/// ```no_run
/// use gs_core::traits::ImageDecoder;
/// use gs_source::image::FileDecoder;
/// use std::path::Path;
/// let img = FileDecoder.decode(Path::new("photo.jpg")).unwrap();
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FileDecoder;

impl ImageDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, CoreError> {
        load_image(path)
    }
}

/// Open, sniff and decode `path` into an RGBA image.
///
/// The file is closed when this returns, success or not.
///
/// # Errors
/// [`CoreError::Io`] when the file cannot be opened or read,
/// [`CoreError::Decode`] when the content is not a supported image.
pub fn load_image(path: &Path) -> Result<DecodedImage, CoreError> {
    let io_err = |source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;
    let img = reader.decode().map_err(|e| CoreError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::from_rgba(width, height, rgba.into_raw())
}
