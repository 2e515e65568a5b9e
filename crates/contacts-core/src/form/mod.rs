//! Contact form state
//!
//! A form edits the four contact fields, validates them locally, and hands
//! valid input to [`ContactSync`]. Invalid input never reaches the network;
//! it ends up as per-field error text instead.

mod phone;

pub use phone::PhoneMask;

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

use crate::config::FormConfig;
use crate::contact::{Contact, ContactFields};
use crate::error::{Error, Result};
use crate::sync::{ContactSync, SyncOutcome};

/// Which operation a form submits to
///
/// Edit mode always carries the record being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Contact),
}

/// The editable fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::FirstName, Field::LastName, Field::Email, Field::Phone];

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Phone => "Phone Number",
        }
    }

    fn value(self, fields: &ContactFields) -> &str {
        match self {
            Field::FirstName => &fields.first_name,
            Field::LastName => &fields.last_name,
            Field::Email => &fields.email,
            Field::Phone => &fields.phone,
        }
    }

    fn value_mut(self, fields: &mut ContactFields) -> &mut String {
        match self {
            Field::FirstName => &mut fields.first_name,
            Field::LastName => &mut fields.last_name,
            Field::Email => &mut fields.email,
            Field::Phone => &mut fields.phone,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

/// Field rules for a contact
#[derive(Debug, Clone)]
pub struct ContactValidator {
    email: Regex,
    phone: Regex,
    mask: PhoneMask,
}

impl ContactValidator {
    pub fn new(config: &FormConfig) -> Result<Self> {
        let mask = PhoneMask::new(config.country_code.clone());
        let phone = Regex::new(&mask.pattern())
            .map_err(|e| Error::config(format!("Invalid phone pattern: {}", e)))?;
        let email = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .map_err(|e| Error::config(format!("Invalid email pattern: {}", e)))?;

        Ok(Self { email, phone, mask })
    }

    pub fn mask(&self) -> &PhoneMask {
        &self.mask
    }

    /// Check all four fields, collecting one message per failing field
    pub fn validate(&self, fields: &ContactFields) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if fields.first_name.trim().is_empty() {
            errors.insert(Field::FirstName, "First name is required");
        }
        if fields.last_name.trim().is_empty() {
            errors.insert(Field::LastName, "Last name is required");
        }

        if fields.email.trim().is_empty() {
            errors.insert(Field::Email, "Email is required");
        } else if !self.email.is_match(&fields.email) {
            errors.insert(Field::Email, "Invalid email format");
        }

        if fields.phone.trim().is_empty() {
            errors.insert(Field::Phone, "Phone number is required");
        } else if !self.phone.is_match(&fields.phone) {
            errors.insert(
                Field::Phone,
                format!("Phone number format: {}", self.mask.example()),
            );
        }

        errors
    }
}

/// Result of pressing submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent and the form stays open
    Invalid(FieldErrors),
    /// The sync hook is busy; nothing was sent
    Busy,
    /// The request was issued and the dialog should close
    Closed(SyncOutcome),
}

/// One add/edit dialog's worth of state
#[derive(Debug, Clone)]
pub struct ContactForm {
    mode: FormMode,
    values: ContactFields,
    errors: FieldErrors,
    validator: ContactValidator,
}

impl ContactForm {
    pub fn new(mode: FormMode, config: &FormConfig) -> Result<Self> {
        let validator = ContactValidator::new(config)?;
        let values = initial_values(&mode);

        Ok(Self {
            mode,
            values,
            errors: FieldErrors::default(),
            validator,
        })
    }

    /// An empty form that creates a contact
    pub fn for_create(config: &FormConfig) -> Result<Self> {
        Self::new(FormMode::Create, config)
    }

    /// A form pre-filled from `contact` that updates it
    pub fn for_edit(contact: Contact, config: &FormConfig) -> Result<Self> {
        Self::new(FormMode::Edit(contact), config)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Contact",
            FormMode::Edit(_) => "Edit Contact",
        }
    }

    pub fn values(&self) -> &ContactFields {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        field.value(&self.values)
    }

    /// Set a field as typed; the phone field goes through the mask
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let value = match field {
            Field::Phone => self.validator.mask().apply(&value),
            _ => value,
        };
        *field.value_mut(&mut self.values) = value;
    }

    /// Set a field verbatim, bypassing the phone mask
    pub fn set_raw(&mut self, field: Field, value: impl Into<String>) {
        *field.value_mut(&mut self.values) = value.into();
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validate without submitting, keeping the messages on the form
    pub fn validate(&mut self) -> bool {
        self.errors = self.validator.validate(&self.values);
        self.errors.is_empty()
    }

    /// Validate and, if valid, create or update through the hook
    ///
    /// Refused while the hook is busy.
    pub async fn submit(&mut self, sync: &ContactSync) -> SubmitOutcome {
        if sync.is_busy() {
            return SubmitOutcome::Busy;
        }

        if !self.validate() {
            return SubmitOutcome::Invalid(self.errors.clone());
        }

        let outcome = match &self.mode {
            FormMode::Create => sync.create(self.values.clone()).await,
            FormMode::Edit(contact) => sync.update(&contact.id, self.values.clone().into()).await,
        };

        SubmitOutcome::Closed(outcome)
    }

    /// Throw away edits and errors
    pub fn cancel(&mut self) {
        self.values = initial_values(&self.mode);
        self.errors = FieldErrors::default();
    }
}

fn initial_values(mode: &FormMode) -> ContactFields {
    match mode {
        FormMode::Create => ContactFields::default(),
        FormMode::Edit(contact) => contact.fields(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactFields {
        ContactFields {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+998 (99) 999-99-99".to_string(),
        }
    }

    fn validator() -> ContactValidator {
        ContactValidator::new(&FormConfig::default()).unwrap()
    }

    #[test]
    fn valid_fields_pass() {
        assert!(validator().validate(&valid()).is_empty());
    }

    #[test]
    fn short_phone_is_a_format_error() {
        let mut fields = valid();
        fields.phone = "555-1234".to_string();

        let errors = validator().validate(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::Phone),
            Some("Phone number format: +998 (99) 999-99-99")
        );
    }

    #[test]
    fn non_ascii_digits_are_a_format_error() {
        let mut fields = valid();
        fields.phone = "+998 (٩٩) ٩٩٩-٩٩-٩٩".to_string();

        assert_eq!(
            validator().validate(&fields).get(Field::Phone),
            Some("Phone number format: +998 (99) 999-99-99")
        );
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = validator().validate(&ContactFields::default());

        assert_eq!(errors.get(Field::FirstName), Some("First name is required"));
        assert_eq!(errors.get(Field::LastName), Some("Last name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Phone), Some("Phone number is required"));
    }

    #[test]
    fn bad_email_syntax() {
        let mut fields = valid();
        for email in ["ada", "ada@example", "ada @example.com", "@example.com"] {
            fields.email = email.to_string();
            assert_eq!(
                validator().validate(&fields).get(Field::Email),
                Some("Invalid email format"),
                "{} should be rejected",
                email
            );
        }
    }

    #[test]
    fn whitespace_names_are_missing() {
        let mut fields = valid();
        fields.first_name = "   ".to_string();
        assert!(validator().validate(&fields).get(Field::FirstName).is_some());
    }

    #[test]
    fn other_country_codes_follow_config() {
        let config = FormConfig {
            country_code: "7".to_string(),
        };
        let validator = ContactValidator::new(&config).unwrap();

        let mut fields = valid();
        assert!(validator.validate(&fields).get(Field::Phone).is_some());

        fields.phone = "+7 (99) 999-99-99".to_string();
        assert!(validator.validate(&fields).is_empty());
    }

    #[test]
    fn edit_form_is_prefilled_and_cancel_restores() {
        let contact = Contact::from_fields("3", valid());
        let mut form = ContactForm::for_edit(contact, &FormConfig::default()).unwrap();
        assert_eq!(form.title(), "Edit Contact");
        assert_eq!(form.value(Field::FirstName), "Ada");

        form.set_field(Field::FirstName, "");
        assert!(!form.validate());

        form.cancel();
        assert_eq!(form.value(Field::FirstName), "Ada");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn phone_input_is_masked() {
        let mut form = ContactForm::for_create(&FormConfig::default()).unwrap();
        assert_eq!(form.title(), "Add Contact");

        form.set_field(Field::Phone, "991234567");
        assert_eq!(form.value(Field::Phone), "+998 (99) 123-45-67");

        form.set_raw(Field::Phone, "555-1234");
        assert_eq!(form.value(Field::Phone), "555-1234");
    }
}
