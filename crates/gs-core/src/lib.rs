/// Configuration, types, and shared structures for glyphshow.
///
/// This crate contains all shared types, traits, and configuration logic
/// used across the glyphshow workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod grid;
pub mod traits;

pub use charset::Palette;
pub use color::CellColor;
pub use config::ShowConfig;
pub use error::CoreError;
pub use frame::{ColorRun, DecodedImage, Frame};
pub use grid::{GridSpec, SizeOverrides};
