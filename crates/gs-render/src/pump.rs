use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use gs_core::frame::Frame;

/// Message affiché une fois toutes les images passées.
pub const COMPLETION_MESSAGE: &str = "That's all folks!";

/// Consommateur unique de la file de frames.
///
/// Clears the screen, writes each frame through a sized buffer, flushes,
/// then sleeps the configured delay before taking the next frame.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use gs_core::frame::Frame;
/// use gs_render::pump::OutputPump;
///
/// let (tx, rx) = flume::bounded(2);
/// tx.send(Frame::new("\nhello".into(), 1, 1)).unwrap();
/// drop(tx);
/// let mut pump = OutputPump::new(Vec::new(), 64, Duration::ZERO);
/// assert_eq!(pump.run(&rx).unwrap(), 1);
/// let out = String::from_utf8(pump.finish().unwrap()).unwrap();
/// assert!(out.contains("hello"));
/// ```
pub struct OutputPump<W: Write> {
    out: BufWriter<W>,
    delay: Duration,
}

impl<W: Write> OutputPump<W> {
    /// Wrap `writer` in a buffer of `buffer_size` bytes.
    pub fn new(writer: W, buffer_size: usize, delay: Duration) -> Self {
        Self {
            out: BufWriter::with_capacity(buffer_size.max(1), writer),
            delay,
        }
    }

    /// Clear the screen, then write and flush one frame.
    ///
    /// # Errors
    /// Returns any IO error from the underlying writer.
    pub fn show(&mut self, frame: &Frame) -> io::Result<()> {
        self.out.queue(MoveTo(0, 0))?.queue(Clear(ClearType::All))?;
        self.out.write_all(frame.as_str().as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    /// Drain `frames` in arrival order until the queue is closed and empty.
    ///
    /// Returns the number of frames shown.
    ///
    /// # Errors
    /// Stops at the first IO error.
    pub fn run(&mut self, frames: &flume::Receiver<Frame>) -> io::Result<usize> {
        self.run_while(frames, || true)
    }

    /// Like [`run`](Self::run), but checks `keep_going` before each frame
    /// and stops as soon as it returns `false`. Frames still queued at that
    /// point are never shown.
    ///
    /// # Errors
    /// Stops at the first IO error.
    pub fn run_while(
        &mut self,
        frames: &flume::Receiver<Frame>,
        keep_going: impl Fn() -> bool,
    ) -> io::Result<usize> {
        let started = Instant::now();
        let mut shown = 0usize;
        for frame in frames.iter() {
            if !keep_going() {
                log::debug!("arrêt demandé, {} frames abandonnées", frames.len() + 1);
                break;
            }
            self.show(&frame)?;
            shown += 1;
            log::debug!(
                "frame {shown} affichée ({} lignes, {} runs)",
                frame.rows(),
                frame.runs()
            );
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }
        log::info!(
            "{shown} frames affichées en {:.1}s",
            started.elapsed().as_secs_f64()
        );
        Ok(shown)
    }

    /// Print the completion message and hand back the writer.
    ///
    /// # Errors
    /// Returns any IO error raised while flushing.
    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.out, "{COMPLETION_MESSAGE}")?;
        self.out.into_inner().map_err(io::IntoInnerError::into_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(text: &str) -> Frame {
        Frame::new(text.to_string(), 1, 1)
    }

    #[test]
    fn frames_are_shown_in_arrival_order() {
        let (tx, rx) = flume::bounded(4);
        for name in ["un", "deux", "trois"] {
            tx.send(frame(name)).unwrap();
        }
        drop(tx);

        let mut pump = OutputPump::new(Vec::new(), 16, Duration::ZERO);
        assert_eq!(pump.run(&rx).unwrap(), 3);
        let out = String::from_utf8(pump.finish().unwrap()).unwrap();

        let un = out.find("un\n").unwrap();
        let deux = out.find("deux\n").unwrap();
        let trois = out.find("trois\n").unwrap();
        assert!(un < deux && deux < trois);
        assert!(out.ends_with("That's all folks!\n"));
    }

    #[test]
    fn each_frame_is_preceded_by_clear() {
        let (tx, rx) = flume::bounded(2);
        tx.send(frame("a")).unwrap();
        tx.send(frame("b")).unwrap();
        drop(tx);

        let mut pump = OutputPump::new(Vec::new(), 8192, Duration::ZERO);
        pump.run(&rx).unwrap();
        let out = String::from_utf8(pump.finish().unwrap()).unwrap();
        assert_eq!(out.matches("\x1b[2J").count(), 2);
        assert_eq!(out.matches("\x1b[1;1H").count(), 2);
    }

    #[test]
    fn closed_empty_queue_shows_nothing() {
        let (tx, rx) = flume::bounded::<Frame>(1);
        drop(tx);
        let mut pump = OutputPump::new(Vec::new(), 8, Duration::from_secs(10));
        assert_eq!(pump.run(&rx).unwrap(), 0);
        assert_eq!(pump.finish().unwrap(), b"That's all folks!\n");
    }

    #[test]
    fn stop_condition_drops_queued_frames() {
        let (tx, rx) = flume::bounded(4);
        for name in ["un", "deux", "trois"] {
            tx.send(frame(name)).unwrap();
        }
        drop(tx);

        let budget = std::cell::Cell::new(1u32);
        let mut pump = OutputPump::new(Vec::new(), 64, Duration::ZERO);
        let shown = pump
            .run_while(&rx, || {
                let left = budget.get();
                budget.set(left.saturating_sub(1));
                left > 0
            })
            .unwrap();
        assert_eq!(shown, 1);
        let out = String::from_utf8(pump.finish().unwrap()).unwrap();
        assert!(out.contains("un\n"));
        assert!(!out.contains("deux"));
        assert_eq!(out.matches("\x1b[2J").count(), 1);
    }

    #[test]
    fn delay_paces_frames() {
        let (tx, rx) = flume::bounded(3);
        for _ in 0..3 {
            tx.send(frame("x")).unwrap();
        }
        drop(tx);

        let delay = Duration::from_millis(15);
        let mut pump = OutputPump::new(io::sink(), 64, delay);
        let start = Instant::now();
        assert_eq!(pump.run(&rx).unwrap(), 3);
        assert!(start.elapsed() >= delay * 3);
    }
}
