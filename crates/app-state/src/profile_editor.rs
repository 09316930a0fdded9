//! Edit-profile screen state
//!
//! The screen owns the form and its error map. Editing a field clears that
//! field's error immediately; the full map is only recomputed on submit.
//! While an update is in flight further submissions are refused.

use app_core::validation::validate_localized;
use app_core::{FieldErrors, PhoneValidator, ProfileField, ProfileForm, ProfileUpdater, UserRecord};
use i18n::keys;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::auth::AuthContext;
use crate::language::LanguageContext;

/// One-shot message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Alert title
    pub title: String,
    /// Alert body
    pub message: String,
}

/// Result of pressing "save"
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend accepted the update
    Saved(UserRecord),
    /// Validation failed; nothing was sent
    Invalid(FieldErrors),
    /// The backend call failed; the form is kept for a retry
    Failed(Alert),
    /// A previous submission is still in flight
    AlreadySubmitting,
}

#[derive(Debug, Default)]
struct EditorState {
    form: ProfileForm,
    errors: FieldErrors,
}

/// Clears the busy flag however the submission ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// State behind the edit-profile screen
pub struct EditProfileScreen {
    language: Arc<LanguageContext>,
    auth: Arc<AuthContext>,
    phone: Option<Arc<dyn PhoneValidator>>,
    region: String,
    state: Mutex<EditorState>,
    submitting: AtomicBool,
}

impl EditProfileScreen {
    /// Mount the screen, pre-filling the form from the signed-in user
    pub fn new(language: Arc<LanguageContext>, auth: Arc<AuthContext>) -> Self {
        let form = auth.user().map(|user| ProfileForm::from_user(&user)).unwrap_or_default();
        Self {
            language,
            auth,
            phone: None,
            region: String::new(),
            state: Mutex::new(EditorState { form, errors: FieldErrors::new() }),
            submitting: AtomicBool::new(false),
        }
    }

    /// Check phone numbers with `validator` for the given default region
    pub fn with_phone_validator(
        mut self,
        validator: Arc<dyn PhoneValidator>,
        region: impl Into<String>,
    ) -> Self {
        self.phone = Some(validator);
        self.region = region.into();
        self
    }

    /// Snapshot of the form
    pub fn form(&self) -> ProfileForm {
        self.state.lock().form.clone()
    }

    /// Snapshot of the current errors
    pub fn errors(&self) -> FieldErrors {
        self.state.lock().errors.clone()
    }

    /// Error for one field, if any
    pub fn error(&self, field: ProfileField) -> Option<String> {
        self.state.lock().errors.get(field).map(str::to_string)
    }

    /// Whether an update is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Apply a keystroke to a field and clear that field's error
    pub fn set_field(&self, field: ProfileField, value: impl Into<String>) {
        let mut state = self.state.lock();
        state.form.set(field, value);
        state.errors.clear(field);
    }

    /// Recompute the error map, replacing the previous one
    pub fn validate(&self) -> bool {
        let mut state = self.state.lock();
        state.errors = self.validate_form(&state.form);
        state.errors.is_empty()
    }

    fn validate_form(&self, form: &ProfileForm) -> FieldErrors {
        validate_localized(
            form,
            self.phone.as_deref(),
            &self.region,
            self.language.translator(),
            &self.language.current(),
        )
    }

    /// Validate and, when clean, send the normalized form to `updater`
    pub async fn submit(&self, updater: &dyn ProfileUpdater) -> SubmitOutcome {
        if self.submitting.swap(true, Ordering::AcqRel) {
            return SubmitOutcome::AlreadySubmitting;
        }
        let _busy = BusyGuard(&self.submitting);

        let update = {
            let mut state = self.state.lock();
            state.errors = self.validate_form(&state.form);
            if !state.errors.is_empty() {
                return SubmitOutcome::Invalid(state.errors.clone());
            }
            state.form.normalize()
        };

        match updater.update_profile(update).await {
            Ok(user) => {
                if let Err(e) = self.auth.update_user(user.clone()).await {
                    tracing::warn!("Failed to cache updated user: {}", e);
                }
                SubmitOutcome::Saved(user)
            }
            Err(e) => {
                tracing::warn!("Profile update failed: {}", e);
                let message = match e.user_message() {
                    Some(message) => message.to_string(),
                    None => self.language.t(keys::PROFILE_UPDATE_FAILED, &[]),
                };
                SubmitOutcome::Failed(Alert { title: self.language.t(keys::COMMON_ERROR, &[]), message })
            }
        }
    }
}
