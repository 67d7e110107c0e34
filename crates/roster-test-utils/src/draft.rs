use roster_core::{Country, FieldUpdate, ImageRef, RegistrationForm};

/// Textual values for a complete draft.
#[derive(Debug, Clone, Copy)]
pub struct DraftValues {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
    pub company: &'static str,
    pub country: Country,
    pub phone: &'static str,
    pub message: &'static str,
}

pub const ADA: DraftValues = DraftValues {
    first_name: "Ada",
    last_name: "Lovelace",
    email: "ada@example.com",
    company: "Analytical",
    country: Country::Uk,
    phone: "555-0100",
    message: "Hello",
};

impl DraftValues {
    /// Field updates for every value, policy agreed, without the image.
    pub fn updates(&self) -> Vec<FieldUpdate> {
        vec![
            FieldUpdate::FirstName(self.first_name.to_string()),
            FieldUpdate::LastName(self.last_name.to_string()),
            FieldUpdate::Email(self.email.to_string()),
            FieldUpdate::Company(self.company.to_string()),
            FieldUpdate::Country(Some(self.country)),
            FieldUpdate::Phone(self.phone.to_string()),
            FieldUpdate::Message(self.message.to_string()),
            FieldUpdate::AgreeToPolicy(true),
        ]
    }
}

/// Fill every field of `form`, selecting `image` when given.
pub fn fill_form(form: &mut RegistrationForm, values: &DraftValues, image: Option<ImageRef>) {
    for update in values.updates() {
        form.update(update);
    }
    form.update(FieldUpdate::Image(image));
}
