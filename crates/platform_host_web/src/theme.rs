//! Theme preference controller owned by the presentation context.
//!
//! The theme slot is the only persisted state of the shell. It lives in the webview's
//! `localStorage` under one key and is mirrored onto the document root as a presentation
//! attribute; the trusted host never reads or writes it.

use std::cell::Cell;

use platform_host::PrefsStore;

use crate::storage::local_prefs::WebPrefsStore;

/// Key under which the preferred theme is persisted.
pub const THEME_PREF_KEY: &str = "preferred-theme";

/// Attribute on the document root reflecting the applied theme.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// One of the two allowed theme values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    /// Light presentation.
    Light,
    /// Dark presentation, the default when nothing valid is persisted.
    #[default]
    Dark,
}

impl ThemePreference {
    /// Parses a persisted or attribute value, defaulting to [`ThemePreference::Dark`] when the
    /// value is absent or unrecognized.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            Some("dark") => Self::Dark,
            _ => Self::Dark,
        }
    }

    /// The persisted/attribute representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other allowed value. Applying this twice returns the original preference.
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Reads, applies, and persists the theme preference through any [`PrefsStore`].
///
/// Purely local and synchronous; applying the same value twice is a no-op by construction.
#[derive(Debug)]
pub struct ThemeController<S: PrefsStore = WebPrefsStore> {
    store: S,
    // Mirror of the applied document attribute, authoritative on targets without a DOM.
    applied: Cell<ThemePreference>,
}

impl Default for ThemeController<WebPrefsStore> {
    fn default() -> Self {
        Self::new(WebPrefsStore)
    }
}

impl<S: PrefsStore> ThemeController<S> {
    /// Creates a controller over the given preference store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            applied: Cell::new(ThemePreference::Dark),
        }
    }

    /// Loads the persisted preference (defaulting to dark) and applies it to the document root.
    pub fn init(&self) -> ThemePreference {
        let preference = ThemePreference::parse(self.store.load_pref(THEME_PREF_KEY).as_deref());
        self.apply(preference);
        preference
    }

    /// Flips the currently applied theme, applies the new value, and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error when the preference store write fails; the attribute is still applied so
    /// the visible theme and a failed persist cannot deadlock the toggle.
    pub fn toggle(&self) -> Result<ThemePreference, String> {
        let next = self.current().flipped();
        self.apply(next);
        self.store.save_pref(THEME_PREF_KEY, next.as_str())?;
        Ok(next)
    }

    /// The theme currently applied to the document root.
    pub fn current(&self) -> ThemePreference {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(value) = document_theme_attribute() {
                return ThemePreference::parse(Some(&value));
            }
        }
        self.applied.get()
    }

    fn apply(&self, preference: ThemePreference) {
        #[cfg(target_arch = "wasm32")]
        set_document_theme_attribute(preference);
        self.applied.set(preference);
    }
}

#[cfg(target_arch = "wasm32")]
fn document_theme_attribute() -> Option<String> {
    web_sys::window()?
        .document()?
        .document_element()?
        .get_attribute(THEME_ATTRIBUTE)
}

#[cfg(target_arch = "wasm32")]
fn set_document_theme_attribute(preference: ThemePreference) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute(THEME_ATTRIBUTE, preference.as_str());
    }
}
