//! Submit flow: validate, encode the image, append, reset.
//!
//! The flow is split around its one suspension point so an event loop can
//! run the encoding in the background and feed the result back later.
//! A form accepts one submission at a time; while the image of an accepted
//! draft is still encoding, further submits are rejected.

use crate::error::{EncodeError, SubmissionError, SubmitError, ValidationError};
use crate::form::RegistrationForm;
use crate::image::{ImageEncoder, ImageRef};
use crate::registry::Registry;
use crate::types::{Country, UserRecord};
use log::{debug, info, warn};

/// Prefix for the message shown when the image cannot be encoded.
pub const ENCODE_FAILED_PREFIX: &str = "Could not read the selected image";

/// A validated draft snapshot waiting for its image to be encoded.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    first_name: String,
    last_name: String,
    email: String,
    company: String,
    country: Country,
    phone: String,
    message: String,
    image: ImageRef,
}

impl PendingSubmission {
    /// The image that will be encoded.
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Encode the image and build the final record.
    pub async fn encode(self, encoder: &dyn ImageEncoder) -> Result<UserRecord, EncodeError> {
        let image = encoder.encode(&self.image).await?;
        Ok(UserRecord {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            company: self.company,
            country: self.country,
            phone: self.phone,
            message: self.message,
            image,
            agree_to_policy: true,
        })
    }
}

impl RegistrationForm {
    /// Validate the draft and mark the form busy.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        if self.in_flight {
            debug!("submit rejected while encoding");
            return Err(SubmitError::InFlight);
        }
        self.validate()?;
        let draft = &self.draft;
        let (Some(country), Some(image)) = (draft.country, draft.image.clone()) else {
            return Err(ValidationError.into());
        };
        let pending = PendingSubmission {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            company: draft.company.clone(),
            country,
            phone: draft.phone.clone(),
            message: draft.message.clone(),
            image,
        };
        self.in_flight = true;
        info!(
            "submission started (image={})",
            pending.image.path.display()
        );
        Ok(pending)
    }

    /// Finish a submission once its encoding has resolved.
    ///
    /// On success the record is appended and the draft reset; the new
    /// record's 1-based position is returned. On failure the draft is kept
    /// for correction and the error message explains what went wrong.
    pub fn complete_submit(
        &mut self,
        registry: &mut Registry,
        result: Result<UserRecord, EncodeError>,
    ) -> Result<usize, EncodeError> {
        self.in_flight = false;
        match result {
            Ok(record) => {
                let position = registry.append(record);
                self.reset();
                self.error = None;
                Ok(position)
            }
            Err(err) => {
                warn!("image encoding failed: {err}");
                self.error = Some(format!("{ENCODE_FAILED_PREFIX}: {err}"));
                Err(err)
            }
        }
    }
}

/// Run a whole submission inline.
pub async fn submit(
    form: &mut RegistrationForm,
    registry: &mut Registry,
    encoder: &dyn ImageEncoder,
) -> Result<usize, SubmissionError> {
    let pending = form.begin_submit()?;
    let result = pending.encode(encoder).await;
    Ok(form.complete_submit(registry, result)?)
}
