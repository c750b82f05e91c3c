//! Tab entries and their re-render keys.
//!
//! A [`TabEntry`] is an immutable value. Mutations go through
//! [`TabEntry::patched`], which returns a new entry and bumps the entry's
//! re-render key only when an observed field actually changed. The host
//! renderer keys each tab by [`TabEntry::render_key`], so an unchanged key
//! means "do not redraw this tab".

use crate::app_config::TabBarItem;
use serde::{Deserialize, Serialize};

/// Fields whose change forces a tab to re-render, by their wire names.
pub const OBSERVED_FIELDS: [&str; 5] = [
    "pagePath",
    "text",
    "iconPath",
    "selectedIconPath",
    "badgeText",
];

/// Observed boolean flags. A missing flag counts as `false`.
pub const OBSERVED_FLAGS: [&str; 1] = ["showRedDot"];

/// One tab as rendered, including its live badge state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabEntry {
    pub page_path: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_icon_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_text: Option<String>,
    #[serde(default)]
    pub show_red_dot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<usize>,
}

impl From<&TabBarItem> for TabEntry {
    fn from(item: &TabBarItem) -> Self {
        Self {
            page_path: item.page_path.clone(),
            text: item.text.clone(),
            icon_path: item.icon_path.clone(),
            selected_icon_path: item.selected_icon_path.clone(),
            ..Default::default()
        }
    }
}

impl TabEntry {
    /// Key the renderer uses for this entry; falls back to the position.
    pub fn render_key(&self, index: usize) -> usize {
        match self.key {
            Some(key) if key != 0 => key,
            _ => index,
        }
    }

    /// Compare every observed field, ignoring the key itself.
    pub fn same_observed(&self, other: &TabEntry) -> bool {
        self.page_path == other.page_path
            && self.text == other.text
            && self.icon_path == other.icon_path
            && self.selected_icon_path == other.selected_icon_path
            && self.badge_text == other.badge_text
            && self.show_red_dot == other.show_red_dot
    }

    /// Apply `patch` to a copy of this entry at `index` in a list of `len`.
    pub fn patched(&self, patch: &TabPatch, index: usize, len: usize) -> TabEntry {
        let mut next = self.clone();
        if let Some(badge) = &patch.badge_text {
            next.badge_text = badge.clone();
        }
        if let Some(dot) = patch.show_red_dot {
            next.show_red_dot = dot;
        }
        if let Some(text) = &patch.text {
            next.text = text.clone();
        }
        if let Some(icon) = &patch.icon_path {
            next.icon_path = Some(icon.clone());
        }
        if let Some(icon) = &patch.selected_icon_path {
            next.selected_icon_path = Some(icon.clone());
        }
        if !next.same_observed(self) {
            next.key = Some(next_key(self.key, index, len));
        }
        next
    }
}

/// Partial update for a tab entry; `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabPatch {
    /// `Some(None)` clears the badge.
    pub badge_text: Option<Option<String>>,
    pub show_red_dot: Option<bool>,
    pub text: Option<String>,
    pub icon_path: Option<String>,
    pub selected_icon_path: Option<String>,
}

/// Next re-render key for the entry at `index` in a list of `len`.
///
/// Keys stay congruent to `index` modulo `len`, so entries never collide,
/// and grow by `len` on every change, so a key is never reused.
pub fn next_key(previous: Option<usize>, index: usize, len: usize) -> usize {
    let len = len.max(1);
    let base = match previous {
        Some(key) if key != 0 => key,
        _ => index,
    };
    (base / len + 1) * len + index
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry() -> TabEntry {
        TabEntry::from(&TabBarItem::new("pages/index/index", "Home"))
    }

    #[test]
    fn test_identical_patch_keeps_key() {
        let original = TabEntry {
            badge_text: Some("3".to_string()),
            key: Some(5),
            ..entry()
        };
        let patch = TabPatch {
            badge_text: Some(Some("3".to_string())),
            ..Default::default()
        };

        let next = original.patched(&patch, 1, 2);
        assert_eq!(next.key, Some(5));
        assert_eq!(next, original);
    }

    #[test]
    fn test_clearing_absent_red_dot_keeps_key() {
        let original = entry();
        let patch = TabPatch {
            show_red_dot: Some(false),
            ..Default::default()
        };

        let next = original.patched(&patch, 0, 2);
        assert_eq!(next.key, None);
        assert_eq!(next, original);
    }

    #[test]
    fn test_badge_change_bumps_key() {
        let original = entry();
        let patch = TabPatch {
            badge_text: Some(Some("new".to_string())),
            ..Default::default()
        };

        let next = original.patched(&patch, 1, 3);
        assert_eq!(next.badge_text.as_deref(), Some("new"));
        assert_eq!(next.key, Some(4));
        assert_ne!(next.render_key(1), original.render_key(1));
    }

    #[test]
    fn test_next_key_sequence() {
        assert_eq!(next_key(None, 0, 3), 3);
        assert_eq!(next_key(Some(3), 0, 3), 6);
        assert_eq!(next_key(None, 2, 3), 5);
        assert_eq!(next_key(Some(5), 2, 3), 8);
    }

    proptest! {
        #[test]
        fn prop_keys_stay_congruent_and_grow(len in 1usize..8, offset in 0usize..8, rounds in 1usize..6) {
            let index = offset % len;
            let mut key = None;
            for _ in 0..rounds {
                let next = next_key(key, index, len);
                prop_assert_eq!(next % len, index);
                if let Some(prev) = key {
                    prop_assert!(next > prev);
                }
                key = Some(next);
            }
        }
    }
}
