//! Submit flow integration tests.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pretty_assertions::assert_eq;
use roster_core::{
    Country, DraftRecord, ENCODE_FAILED_PREFIX, FileImageEncoder, ImageRef, Registry,
    RegistrationForm, SubmissionError, SubmitError, VALIDATION_MESSAGE, submit,
};
use roster_test_utils::{
    ADA, FailingEncoder, FixedEncoder, PIXEL_PNG, RecordingEncoder, accepted_extensions,
    fill_form, write_image,
};
use tempfile::tempdir;

/// A complete draft without an image is rejected and nothing is stored.
#[tokio::test]
async fn missing_image_fails_validation() {
    let mut form = RegistrationForm::new();
    let mut registry = Registry::new();
    fill_form(&mut form, &ADA, None);

    let err = submit(&mut form, &mut registry, &FileImageEncoder::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmissionError::Rejected(SubmitError::Validation(_))
    ));
    assert_eq!(form.error(), Some(VALIDATION_MESSAGE));
    assert!(registry.is_empty());
    assert_eq!(form.draft().first_name, "Ada");
}

/// A valid submission stores one record with the encoded image and resets the form.
#[tokio::test]
async fn valid_submission_appends_and_resets() {
    let dir = tempdir().expect("tempdir");
    let path = write_image(dir.path(), "ada.png");
    let image = ImageRef::from_path(&path, &accepted_extensions()).expect("select");
    let mut form = RegistrationForm::new();
    let mut registry = Registry::new();
    fill_form(&mut form, &ADA, Some(image));

    let position = submit(&mut form, &mut registry, &FileImageEncoder::new())
        .await
        .expect("submit");

    assert_eq!(position, 1);
    let record = &registry.list()[0];
    assert_eq!(record.first_name, "Ada");
    assert_eq!(record.last_name, "Lovelace");
    assert_eq!(record.email, "ada@example.com");
    assert_eq!(record.company, "Analytical");
    assert_eq!(record.country, Country::Uk);
    assert_eq!(record.phone, "555-0100");
    assert_eq!(record.message, "Hello");
    assert!(record.agree_to_policy);

    let payload = record
        .image
        .strip_prefix("data:image/png;base64,")
        .expect("png data uri");
    assert_eq!(STANDARD.decode(payload).expect("base64"), PIXEL_PNG);

    assert_eq!(form.draft(), &DraftRecord::default());
    assert_eq!(form.error(), None);
    assert!(!form.is_in_flight());
}

/// Back-to-back submissions land in submission order.
#[tokio::test]
async fn sequential_submissions_keep_order() {
    let dir = tempdir().expect("tempdir");
    let first = write_image(dir.path(), "first.png");
    let second = write_image(dir.path(), "second.jpg");
    let encoder = RecordingEncoder::new();
    let mut form = RegistrationForm::new();
    let mut registry = Registry::new();

    for (path, name) in [(&first, "Ada"), (&second, "Grace")] {
        let image = ImageRef::from_path(path, &accepted_extensions()).expect("select");
        fill_form(&mut form, &ADA, Some(image));
        form.update(roster_core::FieldUpdate::FirstName(name.to_string()));
        submit(&mut form, &mut registry, &encoder)
            .await
            .expect("submit");
        assert_eq!(form.draft(), &DraftRecord::default());
    }

    let names: Vec<_> = registry
        .list()
        .iter()
        .map(|record| record.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Ada", "Grace"]);
    assert_eq!(encoder.seen(), vec![first, second]);
    assert_eq!(
        registry.list()[1].image_media_type(),
        Some("image/jpeg")
    );
}

/// A second submit is rejected until the first one completes.
#[tokio::test]
async fn second_submit_rejected_while_encoding() {
    let dir = tempdir().expect("tempdir");
    let path = write_image(dir.path(), "ada.png");
    let image = ImageRef::from_path(&path, &accepted_extensions()).expect("select");
    let mut form = RegistrationForm::new();
    let mut registry = Registry::new();
    fill_form(&mut form, &ADA, Some(image));

    let pending = form.begin_submit().expect("begin");
    assert!(form.is_in_flight());
    let before = form.draft().clone();
    assert_eq!(form.begin_submit().unwrap_err(), SubmitError::InFlight);
    assert_eq!(form.draft(), &before);

    let encoder = FixedEncoder::new("data:image/png;base64,AA==");
    let result = pending.encode(&encoder).await;
    form.complete_submit(&mut registry, result)
        .expect("complete");

    assert_eq!(registry.len(), 1);
    assert!(!form.is_in_flight());
}

/// Encoding failures keep the draft and release the form for a retry.
#[tokio::test]
async fn encode_failure_keeps_draft_and_allows_retry() {
    let dir = tempdir().expect("tempdir");
    let path = write_image(dir.path(), "ada.png");
    let image = ImageRef::from_path(&path, &accepted_extensions()).expect("select");
    let mut form = RegistrationForm::new();
    let mut registry = Registry::new();
    fill_form(&mut form, &ADA, Some(image));
    let before = form.draft().clone();

    let err = submit(&mut form, &mut registry, &FailingEncoder)
        .await
        .unwrap_err();

    assert!(matches!(err, SubmissionError::Encode(_)));
    assert!(registry.is_empty());
    assert_eq!(form.draft(), &before);
    assert!(!form.is_in_flight());
    assert!(
        form.error()
            .is_some_and(|message| message.starts_with(ENCODE_FAILED_PREFIX))
    );

    submit(&mut form, &mut registry, &FileImageEncoder::new())
        .await
        .expect("retry");
    assert_eq!(registry.len(), 1);
    assert_eq!(form.error(), None);
}
