//! Core client logic for MedAlert
//!
//! This crate contains the logic-bearing parts of the screens: the profile
//! form and its validation, the collaborator traits the screens call into,
//! and medication report records with delete/undo.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod phone;
pub mod profile;
pub mod reports;
pub mod validation;

pub use phone::{DigitCountValidator, PhoneValidator};
pub use profile::{
    FieldErrors, ProfileError, ProfileField, ProfileForm, ProfileUpdate, ProfileUpdater, UserRecord,
};

#[cfg(any(test, feature = "mocks"))]
pub use phone::MockPhoneValidator;
#[cfg(any(test, feature = "mocks"))]
pub use profile::MockProfileUpdater;
pub use reports::{DeletedReport, Report, ReportId, ReportKind, ReportList};
pub use validation::{validate, validate_localized};
