//! Record types shared by the form, the registry, and the UI.

use crate::image::ImageRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Country choices offered by the form's select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Thailand,
    #[serde(rename = "USA")]
    Usa,
    #[serde(rename = "UK")]
    Uk,
}

impl Country {
    /// All options in display order.
    pub const ALL: [Country; 3] = [Country::Thailand, Country::Usa, Country::Uk];

    /// Return the label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Country::Thailand => "Thailand",
            Country::Usa => "USA",
            Country::Uk => "UK",
        }
    }

    /// Step through the select options, with `None` as the placeholder slot.
    pub fn cycle(current: Option<Country>, forward: bool) -> Option<Country> {
        let slots = Self::ALL.len() + 1;
        let index = match current {
            None => 0,
            Some(country) => Self::ALL.iter().position(|c| *c == country).unwrap_or(0) + 1,
        };
        let next = if forward {
            (index + 1) % slots
        } else {
            (index + slots - 1) % slots
        };
        if next == 0 {
            None
        } else {
            Some(Self::ALL[next - 1])
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier for each control on the form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    Company,
    Country,
    Phone,
    Message,
    Image,
    AgreeToPolicy,
}

impl FieldId {
    /// Every field in the order the form lays them out.
    pub const ALL: [FieldId; 9] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Company,
        FieldId::Country,
        FieldId::Phone,
        FieldId::Message,
        FieldId::Image,
        FieldId::AgreeToPolicy,
    ];

    /// Record key for the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName",
            FieldId::LastName => "lastName",
            FieldId::Email => "email",
            FieldId::Company => "company",
            FieldId::Country => "country",
            FieldId::Phone => "phone",
            FieldId::Message => "message",
            FieldId::Image => "image",
            FieldId::AgreeToPolicy => "agreeToPolicy",
        }
    }

    /// Placeholder text shown while the field is empty.
    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldId::FirstName => "First Name",
            FieldId::LastName => "Last Name",
            FieldId::Email => "Email",
            FieldId::Company => "Company",
            FieldId::Country => "Select Country",
            FieldId::Phone => "Phone Number",
            FieldId::Message => "Message",
            FieldId::Image => "Path to an image file (Enter to select)",
            FieldId::AgreeToPolicy => "By selecting this, you agree to our privacy policy",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| format!("unknown field: {value}"))
    }
}

/// A single edit to the draft, one variant per field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    Email(String),
    Company(String),
    Country(Option<Country>),
    Phone(String),
    Message(String),
    Image(Option<ImageRef>),
    AgreeToPolicy(bool),
}

impl FieldUpdate {
    /// Build an update for one of the text fields.
    ///
    /// Returns `None` when `field` is not a text field.
    pub fn text(field: FieldId, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let update = match field {
            FieldId::FirstName => FieldUpdate::FirstName(value),
            FieldId::LastName => FieldUpdate::LastName(value),
            FieldId::Email => FieldUpdate::Email(value),
            FieldId::Company => FieldUpdate::Company(value),
            FieldId::Phone => FieldUpdate::Phone(value),
            FieldId::Message => FieldUpdate::Message(value),
            FieldId::Country | FieldId::Image | FieldId::AgreeToPolicy => return None,
        };
        Some(update)
    }

    /// Keep the first file of a picker selection; an empty selection unsets the image.
    pub fn image_from_selection(files: impl IntoIterator<Item = ImageRef>) -> Self {
        FieldUpdate::Image(files.into_iter().next())
    }

    /// The field this update targets.
    pub fn field(&self) -> FieldId {
        match self {
            FieldUpdate::FirstName(_) => FieldId::FirstName,
            FieldUpdate::LastName(_) => FieldId::LastName,
            FieldUpdate::Email(_) => FieldId::Email,
            FieldUpdate::Company(_) => FieldId::Company,
            FieldUpdate::Country(_) => FieldId::Country,
            FieldUpdate::Phone(_) => FieldId::Phone,
            FieldUpdate::Message(_) => FieldId::Message,
            FieldUpdate::Image(_) => FieldId::Image,
            FieldUpdate::AgreeToPolicy(_) => FieldId::AgreeToPolicy,
        }
    }
}

/// In-progress form data before acceptance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub country: Option<Country>,
    pub phone: String,
    pub message: String,
    pub image: Option<ImageRef>,
    pub agree_to_policy: bool,
}

impl DraftRecord {
    /// Apply a single field update.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FirstName(value) => self.first_name = value,
            FieldUpdate::LastName(value) => self.last_name = value,
            FieldUpdate::Email(value) => self.email = value,
            FieldUpdate::Company(value) => self.company = value,
            FieldUpdate::Country(value) => self.country = value,
            FieldUpdate::Phone(value) => self.phone = value,
            FieldUpdate::Message(value) => self.message = value,
            FieldUpdate::Image(value) => self.image = value,
            FieldUpdate::AgreeToPolicy(value) => self.agree_to_policy = value,
        }
    }

    /// Current value of a text field, or `None` for non-text fields.
    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::FirstName => Some(&self.first_name),
            FieldId::LastName => Some(&self.last_name),
            FieldId::Email => Some(&self.email),
            FieldId::Company => Some(&self.company),
            FieldId::Phone => Some(&self.phone),
            FieldId::Message => Some(&self.message),
            FieldId::Country | FieldId::Image | FieldId::AgreeToPolicy => None,
        }
    }

    /// Whether a given field holds a value that counts as filled in.
    pub fn is_filled(&self, field: FieldId) -> bool {
        match field {
            FieldId::Country => self.country.is_some(),
            FieldId::Image => self.image.is_some(),
            FieldId::AgreeToPolicy => self.agree_to_policy,
            text => self.text(text).is_some_and(|value| !value.is_empty()),
        }
    }

    /// Whether every field is filled in.
    pub fn is_complete(&self) -> bool {
        FieldId::ALL.iter().all(|field| self.is_filled(*field))
    }

    /// Path of the selected image, if any.
    pub fn image_path(&self) -> Option<&Path> {
        self.image.as_ref().map(|image| image.path.as_path())
    }
}

/// An accepted registration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub country: Country,
    pub phone: String,
    pub message: String,
    /// `data:` URI holding the encoded image bytes.
    pub image: String,
    pub agree_to_policy: bool,
}

impl UserRecord {
    /// First and last name joined for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Media type embedded in the image data URI.
    pub fn image_media_type(&self) -> Option<&str> {
        self.image
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn country_cycle_walks_through_placeholder() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            current = Country::cycle(current, true);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(Country::Thailand),
                Some(Country::Usa),
                Some(Country::Uk),
                None
            ]
        );
        assert_eq!(Country::cycle(None, false), Some(Country::Uk));
    }

    #[test]
    fn field_ids_round_trip_record_keys() {
        for field in FieldId::ALL {
            assert_eq!(field.as_str().parse::<FieldId>(), Ok(field));
        }
        assert!("first_name".parse::<FieldId>().is_err());
    }

    #[test]
    fn text_update_rejects_non_text_fields() {
        assert_eq!(
            FieldUpdate::text(FieldId::Phone, "555-0100"),
            Some(FieldUpdate::Phone("555-0100".to_string()))
        );
        assert_eq!(FieldUpdate::text(FieldId::AgreeToPolicy, "true"), None);
        assert_eq!(FieldUpdate::text(FieldId::Country, "UK"), None);
    }

    #[test]
    fn empty_selection_unsets_image() {
        let update = FieldUpdate::image_from_selection(Vec::new());
        assert_eq!(update, FieldUpdate::Image(None));
    }

    #[test]
    fn selection_keeps_only_the_first_file() {
        let first = ImageRef {
            path: PathBuf::from("first.png"),
            media_type: "image/png",
        };
        let second = ImageRef {
            path: PathBuf::from("second.jpg"),
            media_type: "image/jpeg",
        };
        let update = FieldUpdate::image_from_selection(vec![first.clone(), second]);
        assert_eq!(update, FieldUpdate::Image(Some(first)));

        let mut draft = DraftRecord::default();
        draft.apply(update);
        assert_eq!(draft.image_path(), Some(Path::new("first.png")));
    }

    #[test]
    fn whitespace_counts_as_filled() {
        let mut draft = DraftRecord::default();
        draft.apply(FieldUpdate::Message(" ".to_string()));
        assert!(draft.is_filled(FieldId::Message));
        assert!(!draft.is_filled(FieldId::FirstName));
    }

    #[test]
    fn user_record_serializes_with_record_keys() {
        let record = UserRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            company: "Analytical".to_string(),
            country: Country::Uk,
            phone: "555-0100".to_string(),
            message: "Hello".to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
            agree_to_policy: true,
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["country"], "UK");
        assert_eq!(value["agreeToPolicy"], true);
        assert_eq!(record.image_media_type(), Some("image/png"));
        assert_eq!(record.full_name(), "Ada Lovelace");
    }
}
