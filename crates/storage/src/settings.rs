//! Persisted settings schema
//!
//! Keys under which the application contexts persist their state, and the
//! value types stored there.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage keys shared by the application contexts
pub mod keys {
    /// Selected UI language (language name, e.g. "English")
    pub const LANGUAGE: &str = "language";
    /// Selected color mode
    pub const THEME: &str = "theme";
    /// Two-factor authentication flag ("true"/"false")
    pub const TWO_FACTOR: &str = "twoFactorEnabled";
    /// Cached user record (JSON)
    pub const USER: &str = "user";
    /// Session token
    pub const TOKEN: &str = "token";

    /// Keys wiped on sign-out
    pub const SESSION_KEYS: &[&str] = &[USER, TOKEN, TWO_FACTOR];
}

/// Color mode preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Follow system color scheme
    #[default]
    System,
    /// Always use light mode
    Light,
    /// Always use dark mode
    Dark,
}

impl ColorMode {
    /// The stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::System => "system",
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    /// Resolve against the system scheme, returning whether dark colors apply
    pub fn is_dark(&self, system_is_dark: bool) -> bool {
        match self {
            ColorMode::System => system_is_dark,
            ColorMode::Light => false,
            ColorMode::Dark => true,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(ColorMode::System),
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            _ => Err(format!("Unknown color mode: {}", s)),
        }
    }
}
