//! Window registry.

use std::collections::HashMap;

use crate::domain::{SearchWindow, WindowKey};

/// Canonical set of tracked windows in insertion order.
///
/// Re-registering a key replaces the window but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct WindowRegistry {
    order: Vec<WindowKey>,
    windows: HashMap<WindowKey, SearchWindow>,
}

impl WindowRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window, replacing any window with the same key.
    pub fn register(&mut self, window: SearchWindow) -> WindowKey {
        let key = window.key();
        if self.windows.insert(key.clone(), window).is_none() {
            self.order.push(key.clone());
        }
        key
    }

    /// Look up a window by key.
    #[must_use]
    pub fn get(&self, key: &WindowKey) -> Option<&SearchWindow> {
        self.windows.get(key)
    }

    /// All windows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&WindowKey, &SearchWindow)> {
        self.order
            .iter()
            .filter_map(|key| self.windows.get(key).map(|w| (key, w)))
    }

    /// Owned copy of all windows in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<(WindowKey, SearchWindow)> {
        self.iter().map(|(k, w)| (k.clone(), w.clone())).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window(origin: &str, dep: u32, ret: u32) -> SearchWindow {
        SearchWindow::try_new(
            origin,
            "UIO",
            NaiveDate::from_ymd_opt(2026, 7, dep).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, ret).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn preserves_insertion_order() {
        let mut registry = WindowRegistry::new();
        registry.register(window("AGP", 1, 20));
        registry.register(window("AGP", 1, 18));
        registry.register(window("AGP", 1, 19));

        let keys: Vec<_> = registry.list().into_iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(
            keys,
            vec!["2026-07-01:2026-07-20", "2026-07-01:2026-07-18", "2026-07-01:2026-07-19"]
        );
    }

    #[test]
    fn last_write_wins_in_place() {
        let mut registry = WindowRegistry::new();
        let first = registry.register(window("AGP", 1, 20));
        registry.register(window("AGP", 1, 18));
        let second = registry.register(window("SVQ", 1, 20));

        assert_eq!(first, second);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&first).unwrap().origin, "SVQ");
        assert_eq!(registry.list()[0].0, first);
    }

    #[test]
    fn unknown_key_is_absent() {
        let registry = WindowRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(&WindowKey::from("2026-07-01:2026-07-20")).is_none());
    }
}
