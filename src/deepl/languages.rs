//! Lazily populated cache of the supported languages.
//!
//! Filled by a background fetch, read synchronously by the pickers while
//! rendering. Both sides only ever hold the lock for a clone or a swap.

use std::sync::{Arc, RwLock};

use log::warn;

use super::types::{Language, Languages};

#[derive(Default)]
pub struct LanguageCache {
    inner: RwLock<Option<Languages>>,
}

pub type SharedLanguages = Arc<LanguageCache>;

impl LanguageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached lists.
    pub fn store(&self, languages: Languages) {
        match self.inner.write() {
            Ok(mut guard) => *guard = Some(languages),
            Err(_) => warn!("Language cache lock poisoned, dropping fetched languages"),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.read().map(|guard| guard.is_some()).unwrap_or(false)
    }

    /// Source languages, or `None` if nothing has been fetched yet.
    pub fn source(&self) -> Option<Vec<Language>> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|l| l.source.clone()))
    }

    /// Target languages, or `None` if nothing has been fetched yet.
    pub fn target(&self) -> Option<Vec<Language>> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|l| l.target.clone()))
    }
}
