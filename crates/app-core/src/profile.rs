//! Profile editing
//!
//! This module provides the editable profile form, the per-field error map
//! produced by validation, the normalized payload sent to the backend, and
//! the collaborator trait that performs the update.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Profile update error types
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The backend refused the update, optionally explaining why
    #[error("Profile update rejected{}", .0.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Rejected(Option<String>),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No signed-in user
    #[error("No active session")]
    NoSession,
}

impl ProfileError {
    /// The most specific message suitable for showing to the user, if any
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ProfileError::Rejected(message) => message.as_deref(),
            ProfileError::Network(message) if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Result type for profile operations
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Editable profile fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// Email address
    Email,
    /// Phone number (optional)
    PhoneNumber,
    /// Free-form location (optional)
    Location,
}

impl ProfileField {
    /// Every field in form order
    pub const ALL: [ProfileField; 5] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Email,
        ProfileField::PhoneNumber,
        ProfileField::Location,
    ];

    /// Field name as used in payloads and error maps
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::Email => "email",
            ProfileField::PhoneNumber => "phoneNumber",
            ProfileField::Location => "location",
        }
    }

    /// Translation key of the field label
    pub fn label_key(&self) -> &'static str {
        match self {
            ProfileField::FirstName => i18n::keys::PROFILE_FIRST_NAME,
            ProfileField::LastName => i18n::keys::PROFILE_LAST_NAME,
            ProfileField::Email => i18n::keys::PROFILE_EMAIL,
            ProfileField::PhoneNumber => i18n::keys::PROFILE_PHONE,
            ProfileField::Location => i18n::keys::PROFILE_LOCATION,
        }
    }

    /// Whether the field may be left empty
    pub fn is_optional(&self) -> bool {
        matches!(self, ProfileField::PhoneNumber | ProfileField::Location)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record as returned by the backend and cached on device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Backend identifier
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserRecord {
    /// Name shown in greetings
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// In-progress profile edit
///
/// Every field is held as the raw text the user typed; optional fields are
/// empty strings until normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone_number: String,
    /// Location
    pub location: String,
}

impl ProfileForm {
    /// Pre-fill the form from an existing user
    pub fn from_user(user: &UserRecord) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            location: user.location.clone().unwrap_or_default(),
        }
    }

    /// Current text of a field
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Email => &self.email,
            ProfileField::PhoneNumber => &self.phone_number,
            ProfileField::Location => &self.location,
        }
    }

    /// Replace the text of a field
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::FirstName => self.first_name = value,
            ProfileField::LastName => self.last_name = value,
            ProfileField::Email => self.email = value,
            ProfileField::PhoneNumber => self.phone_number = value,
            ProfileField::Location => self.location = value,
        }
    }

    /// Build the payload sent to the backend: trimmed strings, lower-cased
    /// email, `None` for empty optional fields
    pub fn normalize(&self) -> ProfileUpdate {
        fn optional(value: &str) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        ProfileUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone_number: optional(&self.phone_number),
            location: optional(&self.location),
        }
    }
}

/// Normalized profile payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Given name, trimmed
    pub first_name: String,
    /// Family name, trimmed
    pub last_name: String,
    /// Email, trimmed and lower-cased
    pub email: String,
    /// Phone number, `None` when left empty
    pub phone_number: Option<String>,
    /// Location, `None` when left empty
    pub location: Option<String>,
}

/// Human-readable message per invalid field
///
/// Only fields that are currently invalid have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<ProfileField, String>);

impl FieldErrors {
    /// Create an empty error map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field, replacing any previous one
    pub fn insert(&mut self, field: ProfileField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for a field, if it is invalid
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether a field currently has an error
    pub fn contains(&self, field: ProfileField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the error for one field, returning whether there was one
    pub fn clear(&mut self, field: ProfileField) -> bool {
        self.0.remove(&field).is_some()
    }

    /// True when no field is invalid
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of invalid fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Invalid fields in form order
    pub fn fields(&self) -> impl Iterator<Item = ProfileField> + '_ {
        self.0.keys().copied()
    }

    /// Field/message pairs in form order
    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Backend collaborator that persists profile edits
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ProfileUpdater: Send + Sync {
    /// Apply the update and return the stored user
    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserRecord>;
}
