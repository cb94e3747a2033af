use std::path::PathBuf;

use clap::Parser;
use gs_core::config::ShowConfig;

/// glyphshow — diaporama d'images en glyphes truecolor dans le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dossier contenant les images à afficher. Défaut : dossier courant.
    #[arg(short = 'p', long = "path")]
    pub path: Option<PathBuf>,

    /// Nombre de frames en file (plus grand = moins de latence, plus de mémoire).
    #[arg(long = "qs")]
    pub queue_size: Option<usize>,

    /// Glyphes utilisés pour le rendu, du plus clair au plus dense.
    #[arg(long)]
    pub chars: Option<String>,

    /// Palette nommée : blocks, shade, ascii. Ignorée si --chars est donné.
    #[arg(long)]
    pub preset: Option<String>,

    /// Nombre de workers de rendu.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Largeur fixe en colonnes (≤ 0 = suivre le terminal).
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i32>,

    /// Hauteur fixe en lignes (≤ 0 = suivre le terminal).
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i32>,

    /// Mélanger les images avant lecture (true/false).
    #[arg(long)]
    pub shuffle: Option<bool>,

    /// Seed du mélange, pour un ordre reproductible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause entre deux images, en millisecondes.
    #[arg(long = "sleep-ms")]
    pub sleep_ms: Option<u64>,

    /// Taille du buffer de sortie, en octets.
    #[arg(long = "buf")]
    pub buffer_size: Option<usize>,

    /// Fichier de configuration TOML. Défaut : glyphshow.toml s'il existe.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    ///
    /// # Errors
    /// Returns an error for an unknown `--preset` name.
    pub fn apply(&self, config: &mut ShowConfig) -> anyhow::Result<()> {
        if let Some(ref path) = self.path {
            config.source_dir.clone_from(path);
        }
        if let Some(v) = self.queue_size {
            config.queue_size = v;
        }
        if let Some(ref name) = self.preset {
            let Some(glyphs) = gs_core::charset::preset(name) else {
                anyhow::bail!("Preset inconnu : {name}. Disponibles : blocks, shade, ascii");
            };
            if self.chars.is_some() {
                log::warn!("--chars est prioritaire sur --preset {name}");
            }
            config.palette = glyphs.to_string();
        }
        if let Some(ref chars) = self.chars {
            config.palette.clone_from(chars);
        }
        if let Some(v) = self.workers {
            config.workers = v;
        }
        if let Some(v) = self.width {
            config.fixed_width = positive_u16(v);
        }
        if let Some(v) = self.height {
            config.fixed_height = positive_u16(v);
        }
        if let Some(v) = self.shuffle {
            config.shuffle = v;
        }
        if let Some(v) = self.seed {
            config.seed = Some(v);
        }
        if let Some(v) = self.sleep_ms {
            config.delay_ms = v;
        }
        if let Some(v) = self.buffer_size {
            config.buffer_size = v;
        }
        Ok(())
    }
}

/// Negative or zero means "unset".
fn positive_u16(v: i32) -> Option<u16> {
    (v > 0).then(|| v.min(i32::from(u16::MAX)) as u16)
}
