//! Configuration schema for Roster.

use roster_core::image::supported_extensions;
use serde::{Deserialize, Serialize};

/// Root config for the Roster front end.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RosterConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Image picker and encoder settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageConfig {
    /// File extensions the picker accepts.
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: Vec<String>,
    /// Largest file the encoder will read; unbounded when absent.
    #[serde(default)]
    pub max_bytes: Option<u64>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            accepted_extensions: default_accepted_extensions(),
            max_bytes: None,
        }
    }
}

fn default_accepted_extensions() -> Vec<String> {
    supported_extensions().map(str::to_string).collect()
}

/// Terminal UI timing and input settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    #[serde(default = "default_mouse_scroll_lines")]
    pub mouse_scroll_lines: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            event_buffer: default_event_buffer(),
            mouse_scroll_lines: default_mouse_scroll_lines(),
        }
    }
}

fn default_tick_ms() -> u64 {
    250
}

fn default_event_buffer() -> usize {
    256
}

fn default_mouse_scroll_lines() -> u16 {
    3
}
