//! Test helpers shared across Roster crates.

pub mod draft;
pub mod encoder;
pub mod files;

pub use draft::{ADA, DraftValues, fill_form};
pub use encoder::{FailingEncoder, FixedEncoder, RecordingEncoder};
pub use files::{PIXEL_PNG, accepted_extensions, write_image};
