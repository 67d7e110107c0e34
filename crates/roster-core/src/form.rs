//! Draft state, validation, and the transient error message.

use crate::error::{VALIDATION_MESSAGE, ValidationError};
use crate::types::{DraftRecord, FieldUpdate};
use log::debug;

/// Owns the draft record being edited and the message shown above Submit.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub(crate) draft: DraftRecord,
    pub(crate) error: Option<String>,
    pub(crate) in_flight: bool,
}

impl RegistrationForm {
    /// Create a form with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft values.
    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    /// Apply a single field edit to the draft.
    pub fn update(&mut self, update: FieldUpdate) {
        debug!("field updated (field={})", update.field());
        self.draft.apply(update);
    }

    /// Check that every field is populated.
    ///
    /// Sets the error message on failure and clears it on success.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.draft.is_complete() {
            self.error = None;
            Ok(())
        } else {
            debug!("draft incomplete");
            self.error = Some(VALIDATION_MESSAGE.to_string());
            Err(ValidationError)
        }
    }

    /// Restore the empty draft.
    pub fn reset(&mut self) {
        self.draft = DraftRecord::default();
        self.in_flight = false;
    }

    /// Message to render, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submission is waiting on its image encoding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
