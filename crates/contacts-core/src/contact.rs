//! Contact record types
//!
//! The remote collection speaks camelCase JSON:
//!
//! ```json
//! { "id": "7", "firstName": "Ada", "lastName": "Lovelace",
//!   "email": "ada@example.com", "phone": "+998 (99) 999-99-99" }
//! ```
//!
//! Keys the store adds on its own (timestamps, avatars) are ignored.

use serde::{Deserialize, Serialize};

/// A contact as held by the remote store
///
/// The `id` is assigned by the store on creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Store-assigned identifier
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    /// Build a record from store-assigned id and user-entered fields
    pub fn from_fields(id: impl Into<String>, fields: ContactFields) -> Self {
        Self {
            id: id.into(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
        }
    }

    /// The editable part of the record
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// "First Last", as shown in the table
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Apply a partial update, leaving absent fields alone
    pub fn apply(&mut self, patch: &ContactPatch) {
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
    }
}

/// Contact fields without an identifier (the create payload)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Partial update payload
///
/// Absent fields are left out of the request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<ContactFields> for ContactPatch {
    fn from(fields: ContactFields) -> Self {
        Self {
            first_name: Some(fields.first_name),
            last_name: Some(fields.last_name),
            email: Some(fields.email),
            phone: Some(fields.phone),
        }
    }
}
