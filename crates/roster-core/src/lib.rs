//! Core registration primitives for Roster.
//!
//! This crate owns the draft form state and its validation, the image
//! encoder, the in-memory registry of accepted records, and the submit flow
//! that ties them together. It has no terminal or configuration concerns.

pub mod error;
pub mod form;
pub mod image;
pub mod registry;
pub mod submission;
pub mod types;

pub use error::{
    EncodeError, IN_FLIGHT_MESSAGE, SelectError, SubmissionError, SubmitError, VALIDATION_MESSAGE,
    ValidationError,
};
pub use form::RegistrationForm;
pub use image::{FileImageEncoder, ImageEncoder, ImageRef};
pub use registry::Registry;
pub use submission::{ENCODE_FAILED_PREFIX, PendingSubmission, submit};
pub use types::{Country, DraftRecord, FieldId, FieldUpdate, UserRecord};
