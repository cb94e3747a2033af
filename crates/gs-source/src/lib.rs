/// Visual source modules for glyphshow: folder enumeration and image decoding.

pub mod folder;
pub mod image;

pub use crate::folder::{ImageEntry, list_entries, shuffle_entries};
pub use crate::image::{FileDecoder, load_image};
