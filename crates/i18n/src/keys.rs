//! Translation key paths used by the screens
//!
//! Screens refer to strings through these constants rather than ad-hoc
//! literals. Every entry of [`ALL`] must resolve in the default language;
//! [`crate::TableBuilder::build`] rejects a table where one does not.

/// Application name
pub const COMMON_APP_NAME: &str = "common.appName";
/// Generic save button
pub const COMMON_SAVE: &str = "common.save";
/// Generic cancel button
pub const COMMON_CANCEL: &str = "common.cancel";
/// Busy indicator label
pub const COMMON_LOADING: &str = "common.loading";
/// Alert title for failures
pub const COMMON_ERROR: &str = "common.error";
/// Alert title for successes
pub const COMMON_SUCCESS: &str = "common.success";
/// Undo affordance
pub const COMMON_UNDO: &str = "common.undo";

/// Home greeting, takes `{{name}}`
pub const HOME_GREETING: &str = "home.greeting";
/// Nearby flagged locations heading
pub const HOME_NEARBY_FLAGGED: &str = "home.nearbyFlagged";

/// Settings screen title
pub const SETTINGS_TITLE: &str = "settings.title";
/// Language row label
pub const SETTINGS_LANGUAGE: &str = "settings.language";
/// Theme row label
pub const SETTINGS_THEME: &str = "settings.theme";
/// Two-factor toggle label
pub const SETTINGS_TWO_FACTOR: &str = "settings.twoFactor";
/// Sign-out button
pub const SETTINGS_LOGOUT: &str = "settings.logout";
/// Confirmation after a language change, takes `{{language}}`
pub const SETTINGS_LANGUAGE_CHANGED: &str = "settings.languageChanged";

/// Edit profile screen title
pub const PROFILE_EDIT_TITLE: &str = "profile.editTitle";
/// First name field label
pub const PROFILE_FIRST_NAME: &str = "profile.firstName";
/// Last name field label
pub const PROFILE_LAST_NAME: &str = "profile.lastName";
/// Email field label
pub const PROFILE_EMAIL: &str = "profile.email";
/// Phone field label
pub const PROFILE_PHONE: &str = "profile.phone";
/// Location field label
pub const PROFILE_LOCATION: &str = "profile.location";
/// Success message after saving
pub const PROFILE_UPDATE_SUCCESS: &str = "profile.updateSuccess";
/// Generic failure message after saving
pub const PROFILE_UPDATE_FAILED: &str = "profile.updateFailed";

/// Missing first name
pub const VALIDATION_FIRST_NAME_REQUIRED: &str = "validation.firstNameRequired";
/// Missing last name
pub const VALIDATION_LAST_NAME_REQUIRED: &str = "validation.lastNameRequired";
/// Missing email
pub const VALIDATION_EMAIL_REQUIRED: &str = "validation.emailRequired";
/// Malformed email
pub const VALIDATION_INVALID_EMAIL: &str = "validation.invalidEmail";
/// Phone number rejected for the region
pub const VALIDATION_INVALID_PHONE: &str = "validation.invalidPhone";

/// Report history title
pub const REPORTS_TITLE: &str = "reports.title";
/// Empty report list
pub const REPORTS_EMPTY: &str = "reports.empty";
/// Deletion notice, takes `{{medication}}`
pub const REPORTS_DELETED: &str = "reports.deleted";
/// Recycle listing title
pub const REPORTS_DELETED_TITLE: &str = "reports.deletedTitle";

/// Forum screen title
pub const FORUM_TITLE: &str = "forum.title";
/// Education screen title
pub const EDUCATION_TITLE: &str = "education.title";

/// Every key the default language must provide
pub const ALL: &[&str] = &[
    COMMON_APP_NAME,
    COMMON_SAVE,
    COMMON_CANCEL,
    COMMON_LOADING,
    COMMON_ERROR,
    COMMON_SUCCESS,
    COMMON_UNDO,
    HOME_GREETING,
    HOME_NEARBY_FLAGGED,
    SETTINGS_TITLE,
    SETTINGS_LANGUAGE,
    SETTINGS_THEME,
    SETTINGS_TWO_FACTOR,
    SETTINGS_LOGOUT,
    SETTINGS_LANGUAGE_CHANGED,
    PROFILE_EDIT_TITLE,
    PROFILE_FIRST_NAME,
    PROFILE_LAST_NAME,
    PROFILE_EMAIL,
    PROFILE_PHONE,
    PROFILE_LOCATION,
    PROFILE_UPDATE_SUCCESS,
    PROFILE_UPDATE_FAILED,
    VALIDATION_FIRST_NAME_REQUIRED,
    VALIDATION_LAST_NAME_REQUIRED,
    VALIDATION_EMAIL_REQUIRED,
    VALIDATION_INVALID_EMAIL,
    VALIDATION_INVALID_PHONE,
    REPORTS_TITLE,
    REPORTS_EMPTY,
    REPORTS_DELETED,
    REPORTS_DELETED_TITLE,
    FORUM_TITLE,
    EDUCATION_TITLE,
];
