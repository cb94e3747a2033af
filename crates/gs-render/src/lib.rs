/// Terminal output module for glyphshow.
///
/// Provides the terminal size probe and the paced output pump.
pub mod pump;
pub mod terminal;

pub use pump::OutputPump;
pub use terminal::TerminalProbe;
