use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use gs_core::config::ShowConfig;
use gs_core::grid::terminal_capacity;
use gs_render::terminal::TerminalProbe;
use gs_source::image::FileDecoder;

pub mod cli;
pub mod pipeline;

/// Fichier de config lu dans le dossier courant quand `--config` est absent.
const DEFAULT_CONFIG: &str = "glyphshow.toml";

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging (stderr, la sortie standard porte les frames)
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply(&mut config)?;
    config.validate()?;
    log::debug!("Config : {config:?}");

    // 4. Sonde terminal : échouer avant de lancer les workers
    let capacity = terminal_capacity(&TerminalProbe, config.overrides())?;
    log::info!("Capacité terminal : {}x{}", capacity.0, capacity.1);

    // 5. Lister le dossier source
    let entries = pipeline::prepare_entries(&config)?;

    // 6. Workers + pompe de sortie
    let (stats, _) = pipeline::run_show(
        &config,
        entries,
        Arc::new(FileDecoder),
        Arc::new(TerminalProbe),
        std::io::stdout().lock(),
    )?;

    log::info!(
        "Terminé : {} rendues, {} affichées, {} ignorées",
        stats.rendered,
        stats.shown,
        stats.skipped
    );
    Ok(())
}

/// Resolve config: explicit `--config`, then `glyphshow.toml`, then defaults.
fn resolve_config(cli: &cli::Cli) -> Result<ShowConfig> {
    if let Some(ref path) = cli.config {
        if path.exists() {
            return gs_core::config::load_config(path);
        }
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        return Ok(ShowConfig::default());
    }
    let local = Path::new(DEFAULT_CONFIG);
    if local.exists() {
        gs_core::config::load_config(local)
    } else {
        Ok(ShowConfig::default())
    }
}
