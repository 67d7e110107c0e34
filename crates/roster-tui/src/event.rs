//! TUI event types for input and background completions.

use crossterm::event::KeyEvent;
use roster_core::{EncodeError, UserRecord};

/// Application event emitted by input handlers or background tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick event.
    Tick,
    /// Scroll event in the user list.
    Scroll(i16),
    /// Image encoding for the in-flight submission finished.
    ImageEncoded(Result<UserRecord, EncodeError>),
}
