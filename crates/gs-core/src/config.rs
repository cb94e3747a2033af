use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{CHARSET_BLOCKS, Palette};
use crate::error::CoreError;
use crate::grid::SizeOverrides;

/// Configuration complète du diaporama, construite une fois au démarrage.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use gs_core::config::ShowConfig;
/// let config = ShowConfig::default();
/// assert_eq!(config.workers, 2);
/// assert_eq!(config.queue_size, 2);
/// assert_eq!(config.palette, "░▒▓█");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ShowConfig {
    /// Dossier contenant les images.
    pub source_dir: PathBuf,
    /// Capacité de la file de frames (plus grand = moins de latence, plus de mémoire).
    pub queue_size: usize,
    /// Glyphes, du plus clair au plus dense.
    pub palette: String,
    /// Nombre de workers de rendu.
    pub workers: usize,
    /// Largeur fixe en colonnes.
    pub fixed_width: Option<u16>,
    /// Hauteur fixe en lignes.
    pub fixed_height: Option<u16>,
    /// Mélanger les images avant lecture.
    pub shuffle: bool,
    /// Seed du mélange. `None` = aléatoire.
    pub seed: Option<u64>,
    /// Pause entre deux frames, en millisecondes.
    pub delay_ms: u64,
    /// Taille du buffer de sortie, en octets.
    pub buffer_size: usize,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            queue_size: 2,
            palette: CHARSET_BLOCKS.to_string(),
            workers: 2,
            fixed_width: None,
            fixed_height: None,
            shuffle: true,
            seed: None,
            delay_ms: 3000,
            buffer_size: 4096 * 2,
        }
    }
}

impl ShowConfig {
    /// Check the values the pipeline cannot run without.
    ///
    /// # Errors
    /// Returns a [`CoreError`] for an empty palette or a zero worker,
    /// queue or buffer size.
    pub fn validate(&self) -> Result<(), CoreError> {
        Palette::new(&self.palette)?;
        if self.workers == 0 {
            return Err(CoreError::Config("workers doit être ≥ 1".into()));
        }
        if self.queue_size == 0 {
            return Err(CoreError::Config("queue_size doit être ≥ 1".into()));
        }
        if self.buffer_size == 0 {
            return Err(CoreError::Config("buffer_size doit être ≥ 1".into()));
        }
        Ok(())
    }

    /// Validated glyph palette.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyPalette`] if the palette string is empty.
    pub fn palette(&self) -> Result<Palette, CoreError> {
        Palette::new(&self.palette)
    }

    /// Terminal-size caps. Zero is treated as unset.
    #[must_use]
    pub fn overrides(&self) -> SizeOverrides {
        SizeOverrides {
            width: self.fixed_width.filter(|&w| w > 0),
            height: self.fixed_height.filter(|&h| h > 0),
        }
    }

    /// Inter-frame pause.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    show: Option<ShowSection>,
}

/// Show section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct ShowSection {
    source_dir: Option<PathBuf>,
    queue_size: Option<usize>,
    palette: Option<String>,
    workers: Option<usize>,
    fixed_width: Option<u16>,
    fixed_height: Option<u16>,
    shuffle: Option<bool>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
    buffer_size: Option<usize>,
}

/// Parse a TOML document and merge it over the defaults.
///
/// # Errors
/// Returns an error if the document is not valid TOML for [`ShowConfig`].
///
/// # Example
/// ```
/// use gs_core::config::parse_config;
/// let config = parse_config("[show]\nworkers = 4\n").unwrap();
/// assert_eq!(config.workers, 4);
/// assert_eq!(config.queue_size, 2);
/// ```
pub fn parse_config(content: &str) -> Result<ShowConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = ShowConfig::default();

    let Some(s) = file.show else {
        return Ok(config);
    };
    if let Some(v) = s.source_dir {
        config.source_dir = v;
    }
    if let Some(v) = s.queue_size {
        config.queue_size = v;
    }
    if let Some(v) = s.palette {
        config.palette = v;
    }
    if let Some(v) = s.workers {
        config.workers = v;
    }
    if let Some(v) = s.fixed_width {
        config.fixed_width = Some(v);
    }
    if let Some(v) = s.fixed_height {
        config.fixed_height = Some(v);
    }
    if let Some(v) = s.shuffle {
        config.shuffle = v;
    }
    if let Some(v) = s.seed {
        config.seed = Some(v);
    }
    if let Some(v) = s.delay_ms {
        config.delay_ms = v;
    }
    if let Some(v) = s.buffer_size {
        config.buffer_size = v;
    }
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gs_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("glyphshow.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ShowConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Config invalide dans {}", path.display()))?;
    log::info!("Config chargée depuis {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        assert!(ShowConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zeroes_and_empty_palette() {
        let mut c = ShowConfig {
            palette: String::new(),
            ..ShowConfig::default()
        };
        assert!(matches!(c.validate(), Err(CoreError::EmptyPalette)));
        c.palette = "#".into();
        c.workers = 0;
        assert!(matches!(c.validate(), Err(CoreError::Config(_))));
        c.workers = 1;
        c.queue_size = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_overrides_are_unset() {
        let c = ShowConfig {
            fixed_width: Some(0),
            fixed_height: Some(30),
            ..ShowConfig::default()
        };
        let o = c.overrides();
        assert_eq!(o.width, None);
        assert_eq!(o.height, Some(30));
    }

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), ShowConfig::default());
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(parse_config("[show]\nworkers = \"beaucoup\"\n").is_err());
    }

    #[test]
    fn load_config_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[show]\npalette = \" .:#\"\nshuffle = false\ndelay_ms = 250\nfixed_width = 40"
        )
        .unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.palette, " .:#");
        assert!(!config.shuffle);
        assert_eq!(config.delay(), Duration::from_millis(250));
        assert_eq!(config.fixed_width, Some(40));
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn load_config_missing_file_fails() {
        assert!(load_config(Path::new("/nonexistent/glyphshow.toml")).is_err());
    }
}
