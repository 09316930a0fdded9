//! Phone number validity
//!
//! The phone input on the profile screen delegates validity checks to a
//! [`PhoneValidator`]. [`DigitCountValidator`] is a lightweight
//! implementation that checks dialing code and national number length.

use std::collections::HashMap;

/// Decides whether a formatted number is valid for a default region
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait PhoneValidator: Send + Sync {
    /// `region` is an ISO 3166-1 alpha-2 code such as `"NG"`
    fn is_valid(&self, number: &str, region: &str) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct RegionRule {
    dial_code: &'static str,
    national_lengths: &'static [usize],
}

const DEFAULT_RULES: &[(&str, RegionRule)] = &[
    ("US", RegionRule { dial_code: "1", national_lengths: &[10] }),
    ("CA", RegionRule { dial_code: "1", national_lengths: &[10] }),
    ("GB", RegionRule { dial_code: "44", national_lengths: &[10] }),
    ("FR", RegionRule { dial_code: "33", national_lengths: &[9] }),
    ("ES", RegionRule { dial_code: "34", national_lengths: &[9] }),
    ("NG", RegionRule { dial_code: "234", national_lengths: &[10] }),
    ("GH", RegionRule { dial_code: "233", national_lengths: &[9] }),
    ("KE", RegionRule { dial_code: "254", national_lengths: &[9] }),
    ("IN", RegionRule { dial_code: "91", national_lengths: &[10] }),
];

/// E.164 bounds used for regions without a rule
const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

/// Validates by dialing code and national number length
#[derive(Debug, Clone)]
pub struct DigitCountValidator {
    rules: HashMap<&'static str, RegionRule>,
}

impl Default for DigitCountValidator {
    fn default() -> Self {
        Self { rules: DEFAULT_RULES.iter().copied().collect() }
    }
}

impl DigitCountValidator {
    /// Create a validator with the built-in region rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions with a specific rule
    pub fn regions(&self) -> Vec<&'static str> {
        let mut regions: Vec<_> = self.rules.keys().copied().collect();
        regions.sort_unstable();
        regions
    }

    fn digits(number: &str) -> Option<(bool, String)> {
        let trimmed = number.trim();
        let (international, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '(' | ')' | '.' => {}
                _ => return None,
            }
        }
        Some((international, digits))
    }
}

impl PhoneValidator for DigitCountValidator {
    fn is_valid(&self, number: &str, region: &str) -> bool {
        let Some((international, digits)) = Self::digits(number) else {
            return false;
        };
        if digits.is_empty() {
            return false;
        }

        let region = region.trim().to_ascii_uppercase();
        let Some(rule) = self.rules.get(region.as_str()) else {
            return (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len());
        };

        let national = if international {
            match digits.strip_prefix(rule.dial_code) {
                Some(national) => national,
                None => return false,
            }
        } else {
            digits.as_str()
        };

        // Trunk prefix used for domestic dialing, e.g. 0803... in Nigeria
        let national = match national.strip_prefix('0') {
            Some(stripped) if !international && rule.national_lengths.contains(&stripped.len()) => {
                stripped
            }
            _ => national,
        };

        rule.national_lengths.contains(&national.len())
    }
}
