//! Profile form validation
//!
//! Validation never fails: it returns a [`FieldErrors`] map that is empty
//! when the form may be submitted. Each call produces a complete map; callers
//! replace their previous map with it rather than merging.

use i18n::{keys, Translator};
use regex::Regex;
use std::sync::OnceLock;

use crate::phone::PhoneValidator;
use crate::profile::{FieldErrors, ProfileField, ProfileForm};

/// Message for a blank first name
pub const FIRST_NAME_REQUIRED: &str = "First name is required";
/// Message for a blank last name
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
/// Message for a blank email
pub const EMAIL_REQUIRED: &str = "Email is required";
/// Message for a malformed email
pub const INVALID_EMAIL: &str = "Invalid email address";
/// Message for a phone number rejected by the validator
pub const INVALID_PHONE: &str = "Invalid phone number";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// Check the `local@domain.tld` shape: ASCII only, exactly one `@`, and a
/// dot somewhere after it with text on both sides
pub fn is_valid_email(email: &str) -> bool {
    email.is_ascii() && email_regex().is_match(email)
}

/// Validate a profile form with the built-in English messages
///
/// The phone number is only checked when a validator is supplied and the
/// field is not blank.
pub fn validate(
    form: &ProfileForm,
    phone: Option<&dyn PhoneValidator>,
    region: &str,
) -> FieldErrors {
    collect_errors(form, phone, region, |_, english| english.to_string())
}

/// Validate a profile form with messages resolved through the translator
pub fn validate_localized(
    form: &ProfileForm,
    phone: Option<&dyn PhoneValidator>,
    region: &str,
    translator: &Translator,
    language: &str,
) -> FieldErrors {
    collect_errors(form, phone, region, |key, english| {
        translator.t_or(language, key, &[], english)
    })
}

fn collect_errors<F>(
    form: &ProfileForm,
    phone: Option<&dyn PhoneValidator>,
    region: &str,
    message: F,
) -> FieldErrors
where
    F: Fn(&'static str, &'static str) -> String,
{
    let mut errors = FieldErrors::new();

    if form.first_name.trim().is_empty() {
        errors.insert(
            ProfileField::FirstName,
            message(keys::VALIDATION_FIRST_NAME_REQUIRED, FIRST_NAME_REQUIRED),
        );
    }

    if form.last_name.trim().is_empty() {
        errors.insert(
            ProfileField::LastName,
            message(keys::VALIDATION_LAST_NAME_REQUIRED, LAST_NAME_REQUIRED),
        );
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert(ProfileField::Email, message(keys::VALIDATION_EMAIL_REQUIRED, EMAIL_REQUIRED));
    } else if !is_valid_email(email) {
        errors.insert(ProfileField::Email, message(keys::VALIDATION_INVALID_EMAIL, INVALID_EMAIL));
    }

    if let Some(validator) = phone {
        let number = form.phone_number.trim();
        if !number.is_empty() && !validator.is_valid(number, region) {
            errors.insert(
                ProfileField::PhoneNumber,
                message(keys::VALIDATION_INVALID_PHONE, INVALID_PHONE),
            );
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phone::{DigitCountValidator, MockPhoneValidator};
    use i18n::TranslationTable;
    use std::sync::Arc;

    fn form(first: &str, last: &str, email: &str) -> ProfileForm {
        ProfileForm {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate(&form("Jane", "Doe", "jane@example.com"), None, "US").is_empty());
    }

    #[test]
    fn test_missing_first_name_only() {
        let errors = validate(&form("", "Doe", "a@b.com"), None, "US");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ProfileField::FirstName), Some(FIRST_NAME_REQUIRED));
    }

    #[test]
    fn test_blank_required_fields_produce_exactly_those_keys() {
        let cases = [
            (form(" ", "Doe", "a@b.com"), vec![ProfileField::FirstName]),
            (form("Jane", "\t", "a@b.com"), vec![ProfileField::LastName]),
            (form("Jane", "Doe", "  "), vec![ProfileField::Email]),
            (
                form("", "", ""),
                vec![ProfileField::FirstName, ProfileField::LastName, ProfileField::Email],
            ),
        ];

        for (form, expected) in cases {
            let errors = validate(&form, None, "US");
            assert_eq!(errors.fields().collect::<Vec<_>>(), expected, "form: {:?}", form);
        }
    }

    #[test]
    fn test_email_required_beats_format() {
        let errors = validate(&form("Jane", "Doe", ""), None, "US");
        assert_eq!(errors.get(ProfileField::Email), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn test_valid_email_shapes() {
        for email in ["x@y.z", "a@b.com", "JANE.DOE+med@Mail.Example.ORG", " padded@ex.io "] {
            let errors = validate(&form("Jane", "Doe", email), None, "US");
            assert!(!errors.contains(ProfileField::Email), "rejected {}", email);
        }
    }

    #[test]
    fn test_invalid_email_shapes() {
        for email in ["plain", "a@b", "@b.com", "a@.com", "a@b.", "a@@b.com", "a@b@c.com", "a b@c.com", "é@x.fr"] {
            let errors = validate(&form("Jane", "Doe", email), None, "US");
            assert_eq!(errors.get(ProfileField::Email), Some(INVALID_EMAIL), "accepted {}", email);
        }
    }

    #[test]
    fn test_phone_skipped_without_validator() {
        let mut f = form("Jane", "Doe", "a@b.com");
        f.phone_number = "not a number".to_string();

        assert!(validate(&f, None, "US").is_empty());
    }

    #[test]
    fn test_phone_checked_with_validator() {
        let mut f = form("Jane", "Doe", "a@b.com");
        f.phone_number = "12".to_string();

        let validator = DigitCountValidator::new();
        let errors = validate(&f, Some(&validator), "US");
        assert_eq!(errors.get(ProfileField::PhoneNumber), Some(INVALID_PHONE));

        f.phone_number = "+1 415 555 0100".to_string();
        assert!(validate(&f, Some(&validator), "US").is_empty());
    }

    #[test]
    fn test_phone_validator_receives_region() {
        let mut validator = MockPhoneValidator::new();
        validator
            .expect_is_valid()
            .withf(|number, region| number == "0803 123 4567" && region == "NG")
            .times(1)
            .return_const(false);

        let mut f = form("Jane", "Doe", "a@b.com");
        f.phone_number = " 0803 123 4567 ".to_string();

        let errors = validate(&f, Some(&validator), "NG");
        assert!(errors.contains(ProfileField::PhoneNumber));
    }

    #[test]
    fn test_blank_phone_not_sent_to_validator() {
        let mut validator = MockPhoneValidator::new();
        validator.expect_is_valid().never();

        let mut f = form("Jane", "Doe", "a@b.com");
        f.phone_number = "   ".to_string();
        assert!(validate(&f, Some(&validator), "NG").is_empty());
    }

    #[test]
    fn test_validate_localized() {
        let translator = Translator::new(Arc::new(TranslationTable::bundled().unwrap()));

        let errors = validate_localized(&form("", "Doe", "nope"), None, "US", &translator, "French");
        assert_eq!(errors.get(ProfileField::FirstName), Some("Le prénom est obligatoire"));
        assert_eq!(errors.get(ProfileField::Email), Some("Adresse e-mail invalide"));

        let english = validate_localized(&form("", "Doe", "a@b.com"), None, "US", &translator, "English");
        assert_eq!(english, validate(&form("", "Doe", "a@b.com"), None, "US"));
    }
}
