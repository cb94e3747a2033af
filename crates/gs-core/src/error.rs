use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// The glyph palette contains no character.
    #[error("Palette vide : au moins un glyphe est requis")]
    EmptyPalette,

    /// The terminal size could not be determined.
    #[error("Taille du terminal indisponible : {0}")]
    TerminalSize(String),

    /// A file could not be opened or read.
    #[error("Lecture impossible : {path}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A file was read but is not a decodable raster image.
    #[error("Image non décodable : {path} ({reason})")]
    Decode {
        /// Path of the offending file.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
