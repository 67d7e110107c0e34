//! Error types for the registration core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown whenever the draft is incomplete.
pub const VALIDATION_MESSAGE: &str = "Please fill in all fields and agree to the privacy policy.";

/// Message shown when a second submission arrives while one is encoding.
pub const IN_FLIGHT_MESSAGE: &str = "A submission is already in progress.";

/// The draft is missing at least one required value.
///
/// Deliberately carries no field information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", VALIDATION_MESSAGE)]
pub struct ValidationError;

/// Errors returned when a path is offered to the image picker.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Nothing exists at the path.
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),
    /// The path exists but is not a regular file.
    #[error("not a file: {}", .0.display())]
    NotAFile(PathBuf),
    /// The file extension is not an accepted image type.
    #[error("not an image file: {}", .0.display())]
    UnsupportedType(PathBuf),
    /// Inspecting the path failed.
    #[error("cannot inspect {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned while converting an image into a data URI.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Reading the file failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file exceeds the configured size limit.
    #[error("{} is {size} bytes, limit is {limit}", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}

/// Errors returned when a submission cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The draft failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// An earlier submission is still encoding its image.
    #[error("{}", IN_FLIGHT_MESSAGE)]
    InFlight,
}

/// Failure of a full submit cycle run inline.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The submission never started.
    #[error(transparent)]
    Rejected(#[from] SubmitError),
    /// The image could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
