use std::fs;
use std::path::{Path, PathBuf};

use gs_core::error::CoreError;

/// Entrée du dossier source, consommée par exactement un worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    /// File name, for logs.
    pub name: String,
    /// Full path.
    pub path: PathBuf,
}

/// Liste les fichiers immédiats de `dir`, triés par nom.
///
/// Non-recursive: sub-directories are ignored. No extension filter is
/// applied; files that do not decode are dropped later by the workers.
///
/// # Errors
/// Returns [`CoreError::Io`] if the directory cannot be read.
pub fn list_entries(dir: &Path) -> Result<Vec<ImageEntry>, CoreError> {
    let io_err = |source| CoreError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        entries.push(ImageEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    log::debug!("{} fichiers trouvés dans {}", entries.len(), dir.display());
    Ok(entries)
}

/// Mélange les entrées une fois, avant le démarrage des workers.
///
/// A fixed `seed` gives a reproducible order.
///
/// # Example
/// ```
/// use gs_source::folder::{ImageEntry, shuffle_entries};
/// let make = || (0..20)
///     .map(|i| ImageEntry { name: i.to_string(), path: i.to_string().into() })
///     .collect::<Vec<_>>();
/// let (mut a, mut b) = (make(), make());
/// shuffle_entries(&mut a, Some(7));
/// shuffle_entries(&mut b, Some(7));
/// assert_eq!(a, b);
/// ```
pub fn shuffle_entries(entries: &mut [ImageEntry], seed: Option<u64>) {
    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    rng.shuffle(entries);
}
