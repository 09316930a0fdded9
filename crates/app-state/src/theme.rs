//! Theme context
//!
//! Holds the user's color mode and persists every change.

use parking_lot::RwLock;
use std::sync::Arc;
use storage::{keys, ColorMode, KeyValueStore};

use crate::Result;

/// Process-wide color mode selection
pub struct ThemeContext {
    store: Arc<dyn KeyValueStore>,
    mode: RwLock<ColorMode>,
}

impl ThemeContext {
    /// Create a context following the system scheme until [`ThemeContext::init`]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, mode: RwLock::new(ColorMode::default()) }
    }

    /// Load the persisted color mode, keeping the default when it is absent
    /// or unreadable
    pub async fn init(&self) -> ColorMode {
        let mode = match self.store.get(keys::THEME).await {
            Ok(Some(saved)) => saved.parse::<ColorMode>().unwrap_or_else(|e| {
                tracing::debug!("{}", e);
                ColorMode::default()
            }),
            Ok(None) => ColorMode::default(),
            Err(e) => {
                tracing::warn!("Failed to read saved theme: {}", e);
                ColorMode::default()
            }
        };

        *self.mode.write() = mode;
        mode
    }

    /// Current color mode
    pub fn mode(&self) -> ColorMode {
        *self.mode.read()
    }

    /// Whether dark colors apply given the system scheme
    pub fn is_dark(&self, system_is_dark: bool) -> bool {
        self.mode().is_dark(system_is_dark)
    }

    /// Persist and apply a color mode
    pub async fn set(&self, mode: ColorMode) -> Result<()> {
        self.store.set(keys::THEME, mode.as_str()).await?;
        *self.mode.write() = mode;
        Ok(())
    }

    /// Flip between light and dark based on what is currently shown
    pub async fn toggle(&self, system_is_dark: bool) -> Result<ColorMode> {
        let next = if self.is_dark(system_is_dark) { ColorMode::Light } else { ColorMode::Dark };
        self.set(next).await?;
        Ok(next)
    }
}
