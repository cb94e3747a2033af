use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow};
use gs_ascii::renderer::Renderer;
use gs_core::config::ShowConfig;
use gs_core::frame::Frame;
use gs_core::grid::{SizeOverrides, terminal_capacity};
use gs_core::traits::{ImageDecoder, SizeProbe};
use gs_render::pump::OutputPump;
use gs_source::folder::{ImageEntry, list_entries, shuffle_entries};

/// Compteurs de fin de diaporama.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames handed to the output queue.
    pub rendered: usize,
    /// Files dropped because they did not decode.
    pub skipped: usize,
    /// Frames actually written by the pump.
    pub shown: usize,
}

#[derive(Default)]
struct Counters {
    rendered: AtomicUsize,
    skipped: AtomicUsize,
    /// Set by the first worker hitting a fatal error; stops the whole show.
    aborted: AtomicBool,
}

/// Handle sur le pool de workers et son superviseur.
pub struct PoolHandle {
    supervisor: JoinHandle<Result<PipelineStats>>,
    counters: Arc<Counters>,
}

impl PoolHandle {
    /// Live `(rendered, skipped)` counts.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (
            self.counters.rendered.load(Ordering::Relaxed),
            self.counters.skipped.load(Ordering::Relaxed),
        )
    }

    /// `true` once a worker hit a fatal error. Workers stop taking entries
    /// and the pump should stop showing frames.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.counters.aborted.load(Ordering::Acquire)
    }

    /// Wait for every worker to exit.
    ///
    /// # Errors
    /// Returns the first worker error (terminal-size probe failure) or
    /// a panic report.
    pub fn join(self) -> Result<PipelineStats> {
        self.supervisor
            .join()
            .map_err(|_| anyhow!("Superviseur du pool paniqué"))?
    }
}

/// Read the source directory and apply the optional shuffle.
///
/// # Errors
/// Returns an error if the directory cannot be listed.
pub fn prepare_entries(config: &ShowConfig) -> Result<Vec<ImageEntry>> {
    let mut entries = list_entries(&config.source_dir)
        .with_context(|| format!("Lecture de {}", config.source_dir.display()))?;
    if config.shuffle {
        shuffle_entries(&mut entries, config.seed);
    }
    log::info!(
        "{} entrées dans {} (shuffle: {})",
        entries.len(),
        config.source_dir.display(),
        config.shuffle
    );
    Ok(entries)
}

/// Start `config.workers` render threads over `entries`.
///
/// Every entry is queued before the workers start, so each is taken by
/// exactly one worker. Frames go to a bounded queue of `config.queue_size`;
/// workers block when it is full. The returned receiver is closed once
/// all workers have exited.
///
/// A terminal-size failure in any worker aborts the pool: pending entries
/// are dropped and the other workers stop before their next entry.
///
/// # Errors
/// Returns an error for an empty palette or if a thread cannot be spawned.
pub fn spawn_pool(
    entries: Vec<ImageEntry>,
    config: &ShowConfig,
    decoder: Arc<dyn ImageDecoder>,
    probe: Arc<dyn SizeProbe>,
) -> Result<(PoolHandle, flume::Receiver<Frame>)> {
    let renderer = Renderer::new(config.palette()?);
    let overrides = config.overrides();

    let (work_tx, work_rx) = flume::bounded(entries.len().max(1));
    for entry in entries {
        work_tx
            .send(entry)
            .map_err(|_| anyhow!("File de travail fermée avant le démarrage"))?;
    }
    drop(work_tx);

    let (frame_tx, frame_rx) = flume::bounded(config.queue_size.max(1));
    let counters = Arc::new(Counters::default());

    let mut workers = Vec::with_capacity(config.workers);
    for id in 0..config.workers.max(1) {
        let worker = Worker {
            id,
            work: work_rx.clone(),
            frames: frame_tx.clone(),
            renderer: renderer.clone(),
            decoder: Arc::clone(&decoder),
            probe: Arc::clone(&probe),
            overrides,
            counters: Arc::clone(&counters),
        };
        let handle = thread::Builder::new()
            .name(format!("render-{id}"))
            .spawn(move || worker.run())
            .context("Impossible de lancer un worker")?;
        workers.push(handle);
    }
    drop(work_rx);

    let stats = Arc::clone(&counters);
    let supervisor = thread::Builder::new()
        .name("render-supervisor".into())
        .spawn(move || {
            let mut first_err = None;
            for handle in workers {
                let outcome = handle
                    .join()
                    .unwrap_or_else(|_| Err(anyhow!("Worker de rendu paniqué")));
                if let Err(e) = outcome {
                    log::error!("{e:#}");
                    first_err.get_or_insert(e);
                }
            }
            // Fermeture de la file : plus aucun worker ne peut produire.
            drop(frame_tx);
            match first_err {
                Some(e) => Err(e),
                None => Ok(PipelineStats {
                    rendered: stats.rendered.load(Ordering::Relaxed),
                    skipped: stats.skipped.load(Ordering::Relaxed),
                    shown: 0,
                }),
            }
        })
        .context("Impossible de lancer le superviseur")?;

    Ok((
        PoolHandle {
            supervisor,
            counters,
        },
        frame_rx,
    ))
}

struct Worker {
    id: usize,
    work: flume::Receiver<ImageEntry>,
    frames: flume::Sender<Frame>,
    renderer: Renderer,
    decoder: Arc<dyn ImageDecoder>,
    probe: Arc<dyn SizeProbe>,
    overrides: SizeOverrides,
    counters: Arc<Counters>,
}

impl Worker {
    fn run(self) -> Result<()> {
        while !self.counters.aborted.load(Ordering::Acquire) {
            let Ok(entry) = self.work.recv() else {
                break;
            };
            let image = match self.decoder.decode(&entry.path) {
                Ok(img) => img,
                Err(e) => {
                    log::debug!("[render-{}] {} ignoré : {e}", self.id, entry.name);
                    self.counters.skipped.fetch_add(1, Ordering::Relaxed);
                    continue;
                }
            };
            let capacity = match terminal_capacity(self.probe.as_ref(), self.overrides) {
                Ok(capacity) => capacity,
                Err(e) => {
                    self.counters.aborted.store(true, Ordering::Release);
                    let dropped = self.work.drain().count();
                    log::debug!(
                        "[render-{}] abandon, {dropped} entrées retirées de la file",
                        self.id
                    );
                    return Err(e.into());
                }
            };
            let frame = self.renderer.render_for_terminal(&image, capacity);
            log::trace!(
                "[render-{}] {} → {} lignes",
                self.id,
                entry.name,
                frame.rows()
            );
            if self.frames.send(frame).is_err() {
                log::debug!("[render-{}] file de sortie fermée, arrêt", self.id);
                break;
            }
            self.counters.rendered.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }
}

/// Run the whole slideshow: worker pool in the background, output pump on
/// the calling thread. Returns the stats and the writer once the
/// completion message is written.
///
/// A fatal worker error ends the show after the frame currently on screen;
/// no completion message is written in that case.
///
/// # Errors
/// Returns the first worker error, or an IO error from `writer`.
pub fn run_show<W: Write>(
    config: &ShowConfig,
    entries: Vec<ImageEntry>,
    decoder: Arc<dyn ImageDecoder>,
    probe: Arc<dyn SizeProbe>,
    writer: W,
) -> Result<(PipelineStats, W)> {
    let (pool, frames) = spawn_pool(entries, config, decoder, probe)?;
    let mut pump = OutputPump::new(writer, config.buffer_size, config.delay());
    let shown = pump.run_while(&frames, || !pool.is_aborted());
    // Débloque les workers si la sortie a échoué.
    drop(frames);

    let mut stats = pool.join()?;
    stats.shown = shown.context("Écriture de la frame")?;
    let writer = pump.finish().context("Écriture du message final")?;
    log::info!(
        "{} frames affichées, {} fichiers ignorés",
        stats.shown,
        stats.skipped
    );
    Ok((stats, writer))
}
