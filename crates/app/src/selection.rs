//! The currently selected playback device.

use std::sync::{Arc, PoisonError, RwLock};

/// Shared cell holding the name of the selected device.
///
/// Cloning shares the same cell. Every read sees the latest write, so a
/// dispatch always targets whatever was selected most recently.
#[derive(Debug, Clone, Default)]
pub struct SelectedDevice(Arc<RwLock<Option<String>>>);

impl SelectedDevice {
    #[must_use]
    pub fn new(initial: Option<String>) -> Self {
        Self(Arc::new(RwLock::new(initial)))
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, name: impl Into<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(name.into());
    }
}
