//! Persisted UI preferences: colour theme and the dismissible announcement bar.

use vitrine_core::Theme;

use crate::store::{self, KeyValueStore, StoreError, keys};

/// The stored theme, or `default` if none is stored.
#[must_use]
pub fn theme(store: &dyn KeyValueStore, default: Theme) -> Theme {
    store::load_json(store, keys::THEME, default)
}

/// Persist a theme choice.
///
/// # Errors
///
/// Returns `StoreError` if the write fails.
pub fn set_theme(store: &mut dyn KeyValueStore, theme: Theme) -> Result<(), StoreError> {
    store::save_json(store, keys::THEME, &theme)
}

/// Switch to the opposite of the current theme and return it.
///
/// # Errors
///
/// Returns `StoreError` if the write fails.
pub fn toggle_theme(store: &mut dyn KeyValueStore, default: Theme) -> Result<Theme, StoreError> {
    let next = theme(store, default).toggled();
    set_theme(store, next)?;
    Ok(next)
}

/// Whether the announcement bar has been dismissed.
#[must_use]
pub fn topbar_dismissed(store: &dyn KeyValueStore) -> bool {
    store::load_json(store, keys::TOPBAR_CLOSED, false)
}

/// Remember that the announcement bar was dismissed.
///
/// # Errors
///
/// Returns `StoreError` if the write fails.
pub fn dismiss_topbar(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store::save_json(store, keys::TOPBAR_CLOSED, &true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_theme_defaults_then_persists() {
        let mut store = MemoryStore::new();
        assert_eq!(theme(&store, Theme::Dark), Theme::Dark);

        set_theme(&mut store, Theme::Light).unwrap();
        assert_eq!(theme(&store, Theme::Dark), Theme::Light);
    }

    #[test]
    fn test_toggle_theme() {
        let mut store = MemoryStore::new();
        assert_eq!(toggle_theme(&mut store, Theme::Light).unwrap(), Theme::Dark);
        assert_eq!(toggle_theme(&mut store, Theme::Light).unwrap(), Theme::Light);
    }

    #[test]
    fn test_unknown_stored_theme_falls_back() {
        let mut store = MemoryStore::new();
        store.set(keys::THEME, r#""sepia""#).unwrap();
        assert_eq!(theme(&store, Theme::Light), Theme::Light);
    }

    #[test]
    fn test_topbar() {
        let mut store = MemoryStore::new();
        assert!(!topbar_dismissed(&store));
        dismiss_topbar(&mut store).unwrap();
        assert!(topbar_dismissed(&store));
    }
}
