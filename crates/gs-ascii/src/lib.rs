/// Conversion engine for glyphshow.
///
/// Turns decoded images into truecolor glyph frames: block averaging,
/// luminance → glyph mapping, and run-length color encoding.
pub mod average;
pub mod encoder;
pub mod luminance;
pub mod renderer;

pub use renderer::Renderer;
