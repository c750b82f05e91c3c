//! Tab-bar state and its reducer.
//!
//! [`TabBarState::reduce`] is pure: it never touches pages or collaborators.
//! A switch only reports an [`Effect::Switch`]; running the hide, appear and
//! show hooks in order is the caller's job.
//!
//! Entries live in an `Rc<[TabEntry]>` that is replaced wholesale on every
//! accepted entry mutation, so observers can detect change by pointer.
//! Commands aimed at an unknown index leave the very same list in place.

use arkpage_core::{
    BarPosition, StylePatch, TabBarConfig, TabBarStyle, TabCommand, TabEntry, TabPatch,
    TAB_ANIMATION_DURATION_MS,
};
use std::rc::Rc;
use std::time::Duration;
use tracing::trace;

/// Side effect requested by a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The active tab moved; the outgoing page hides before the incoming appears.
    Switch { from: usize, to: usize },
    /// The bar visibility changed with an animated transition.
    Animate { duration: Duration },
}

/// Outcome of reducing one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub state: TabBarState,
    pub effect: Effect,
}

/// Everything the tab bar renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct TabBarState {
    pub entries: Rc<[TabEntry]>,
    pub current_index: usize,
    pub visible: bool,
    pub style: TabBarStyle,
    pub position: BarPosition,
    /// Every entry has an icon; labels render below icons.
    pub with_image: bool,
    pub animation: Duration,
}

impl TabBarState {
    /// Initial state from the app's tab-bar config.
    pub fn from_config(config: &TabBarConfig) -> Self {
        let entries: Rc<[TabEntry]> = config.list.iter().map(TabEntry::from).collect();
        Self {
            with_image: Self::all_have_icons(&entries),
            entries,
            current_index: 0,
            visible: true,
            style: config.style(),
            position: config.bar_position(),
            animation: Duration::from_millis(TAB_ANIMATION_DURATION_MS),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the tab showing `page_path`.
    pub fn index_of(&self, page_path: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.page_path == page_path)
    }

    /// Make `index` active. No hooks run here.
    pub fn with_current_index(&self, index: usize) -> Self {
        Self {
            current_index: index,
            ..self.clone()
        }
    }

    /// Apply one command.
    pub fn reduce(&self, command: &TabCommand) -> Reduction {
        trace!(topic = %command.topic(), "reducing tab command");

        if let Some((index, patch)) = command.entry_patch() {
            let mut state = self.patch_entry(index, &patch);
            if matches!(command, TabCommand::SetItem { .. }) {
                state.with_image = Self::all_have_icons(&state.entries);
            }
            return Reduction {
                state,
                effect: Effect::None,
            };
        }

        match command {
            TabCommand::SwitchTab { page } => match self.index_of(page) {
                Some(to) if to != self.current_index => Reduction {
                    state: self.with_current_index(to),
                    effect: Effect::Switch {
                        from: self.current_index,
                        to,
                    },
                },
                _ => self.unchanged(),
            },
            TabCommand::ShowBar { animation } => self.set_visible(true, *animation),
            TabCommand::HideBar { animation } => self.set_visible(false, *animation),
            TabCommand::SetStyle(patch) => Reduction {
                state: Self {
                    style: Self::restyle(&self.style, patch),
                    ..self.clone()
                },
                effect: Effect::None,
            },
            // Entry commands were handled above.
            _ => self.unchanged(),
        }
    }

    fn unchanged(&self) -> Reduction {
        Reduction {
            state: self.clone(),
            effect: Effect::None,
        }
    }

    fn patch_entry(&self, index: usize, patch: &TabPatch) -> Self {
        let Some(entry) = self.entries.get(index) else {
            return self.clone();
        };
        let next = entry.patched(patch, index, self.len());
        let entries: Rc<[TabEntry]> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| if i == index { next.clone() } else { e.clone() })
            .collect();
        Self {
            entries,
            ..self.clone()
        }
    }

    fn set_visible(&self, visible: bool, animation: bool) -> Reduction {
        let effect = if animation {
            Effect::Animate {
                duration: self.animation,
            }
        } else {
            Effect::None
        };
        Reduction {
            state: Self {
                visible,
                ..self.clone()
            },
            effect,
        }
    }

    fn restyle(style: &TabBarStyle, patch: &StylePatch) -> TabBarStyle {
        let pick = |new: &Option<String>, old: &String| match new {
            Some(value) if !value.is_empty() => value.clone(),
            _ => old.clone(),
        };
        TabBarStyle {
            color: pick(&patch.color, &style.color),
            selected_color: pick(&patch.selected_color, &style.selected_color),
            background_color: pick(&patch.background_color, &style.background_color),
            border_style: patch.border_style.unwrap_or(style.border_style),
        }
    }

    fn all_have_icons(entries: &[TabEntry]) -> bool {
        entries
            .iter()
            .all(|e| e.icon_path.as_deref().is_some_and(|p| !p.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkpage_core::{BorderStyle, TabBarItem};
    use proptest::prelude::*;

    fn state(count: usize) -> TabBarState {
        TabBarState::from_config(&TabBarConfig {
            list: (0..count)
                .map(|i| TabBarItem::new(format!("pages/p{i}"), format!("Tab {i}")))
                .collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_initial_state() {
        let s = state(3);
        assert_eq!(s.len(), 3);
        assert_eq!(s.current_index, 0);
        assert!(s.visible);
        assert!(!s.with_image);
        assert_eq!(s.position, BarPosition::Bottom);
        assert_eq!(s.animation, Duration::from_millis(400));
        assert_eq!(s.style.color, "#7A7E83");
    }

    #[test]
    fn test_switch_reports_effect() {
        let s = state(3);
        let r = s.reduce(&TabCommand::SwitchTab {
            page: "pages/p2".into(),
        });
        assert_eq!(r.state.current_index, 2);
        assert_eq!(r.effect, Effect::Switch { from: 0, to: 2 });
    }

    #[test]
    fn test_switch_to_current_or_unknown_is_noop() {
        let s = state(3);
        for page in ["pages/p0", "pages/missing"] {
            let r = s.reduce(&TabCommand::SwitchTab { page: page.into() });
            assert_eq!(r.effect, Effect::None);
            assert_eq!(r.state.current_index, 0);
        }
    }

    #[test]
    fn test_badge_replaces_list_and_bumps_key() {
        let s = state(3);
        let r = s.reduce(&TabCommand::SetBadge {
            index: 1,
            text: "9".into(),
        });
        assert!(!Rc::ptr_eq(&s.entries, &r.state.entries));
        assert_eq!(r.state.entries[1].badge_text.as_deref(), Some("9"));
        assert_eq!(r.state.entries[1].key, Some(4));
        assert_eq!(r.state.entries[0], s.entries[0]);
        // The previous list is untouched.
        assert_eq!(s.entries[1].badge_text, None);
    }

    #[test]
    fn test_identical_patch_keeps_key() {
        let s = state(2)
            .reduce(&TabCommand::SetBadge {
                index: 0,
                text: "1".into(),
            })
            .state;
        let key = s.entries[0].key;
        let again = s.reduce(&TabCommand::SetBadge {
            index: 0,
            text: "1".into(),
        });
        assert_eq!(again.state.entries[0].key, key);
    }

    #[test]
    fn test_unknown_index_keeps_same_list() {
        let s = state(2);
        for command in [
            TabCommand::SetBadge {
                index: 7,
                text: "x".into(),
            },
            TabCommand::RemoveBadge { index: 7 },
            TabCommand::ShowRedDot { index: 2 },
            TabCommand::HideRedDot { index: 9 },
        ] {
            let r = s.reduce(&command);
            assert!(Rc::ptr_eq(&s.entries, &r.state.entries));
            assert_eq!(r.effect, Effect::None);
        }
    }

    #[test]
    fn test_red_dot_clears_badge() {
        let s = state(2)
            .reduce(&TabCommand::SetBadge {
                index: 0,
                text: "3".into(),
            })
            .state;
        let r = s.reduce(&TabCommand::ShowRedDot { index: 0 });
        assert_eq!(r.state.entries[0].badge_text, None);
        assert!(r.state.entries[0].show_red_dot);
    }

    #[test]
    fn test_set_item_updates_with_image() {
        let s = state(1);
        let r = s.reduce(&TabCommand::SetItem {
            index: 0,
            icon_path: Some("home.png".into()),
            selected_icon_path: None,
            text: Some(String::new()),
        });
        assert!(r.state.with_image);
        assert_eq!(r.state.entries[0].text, "Tab 0");
        assert_eq!(r.state.entries[0].icon_path.as_deref(), Some("home.png"));
    }

    #[test]
    fn test_visibility() {
        let s = state(2);
        let hidden = s.reduce(&TabCommand::HideBar { animation: false });
        assert!(!hidden.state.visible);
        assert_eq!(hidden.effect, Effect::None);

        let shown = hidden.state.reduce(&TabCommand::ShowBar { animation: true });
        assert!(shown.state.visible);
        assert_eq!(
            shown.effect,
            Effect::Animate {
                duration: Duration::from_millis(400)
            }
        );
    }

    #[test]
    fn test_style_patch_skips_empty_fields() {
        let s = state(1);
        let r = s.reduce(&TabCommand::SetStyle(StylePatch {
            color: Some("#000000".into()),
            selected_color: Some(String::new()),
            background_color: None,
            border_style: Some(BorderStyle::White),
        }));
        assert_eq!(r.state.style.color, "#000000");
        assert_eq!(r.state.style.selected_color, "#3CC51F");
        assert_eq!(r.state.style.background_color, "#FFFFFF");
        assert_eq!(r.state.style.border_style, BorderStyle::White);
        assert!(Rc::ptr_eq(&s.entries, &r.state.entries));
    }

    proptest! {
        #[test]
        fn prop_keys_never_collide(
            count in 1usize..6,
            ops in proptest::collection::vec((0usize..8, "[a-c]{0,2}"), 0..20),
        ) {
            let mut s = state(count);
            for (index, text) in ops {
                s = s.reduce(&TabCommand::SetBadge { index, text }).state;
            }
            let keys: Vec<usize> = s
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| e.render_key(i))
                .collect();
            for (i, key) in keys.iter().enumerate() {
                prop_assert_eq!(key % count, i);
            }
        }
    }
}
