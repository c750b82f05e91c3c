//! Event-bus topics and the tab-bar commands they carry.

use crate::tab::TabPatch;
use std::fmt;

/// Topics the tab-bar component listens on.
///
/// The wire names are the host event bus contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    SwitchTab,
    SetTabBarBadge,
    RemoveTabBarBadge,
    ShowTabBarRedDot,
    HideTabBarRedDot,
    ShowTabBar,
    HideTabBar,
    SetTabBarStyle,
    SetTabBarItem,
}

impl Topic {
    /// Every topic, in registration order.
    pub const ALL: [Topic; 9] = [
        Topic::SwitchTab,
        Topic::SetTabBarBadge,
        Topic::RemoveTabBarBadge,
        Topic::ShowTabBarRedDot,
        Topic::HideTabBarRedDot,
        Topic::ShowTabBar,
        Topic::HideTabBar,
        Topic::SetTabBarStyle,
        Topic::SetTabBarItem,
    ];

    /// Name published on the event bus.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::SwitchTab => "__taroSwitchTab",
            Self::SetTabBarBadge => "__taroSetTabBarBadge",
            Self::RemoveTabBarBadge => "__taroRemoveTabBarBadge",
            Self::ShowTabBarRedDot => "__taroShowTabBarRedDotHandler",
            Self::HideTabBarRedDot => "__taroHideTabBarRedDotHandler",
            Self::ShowTabBar => "__taroShowTabBar",
            Self::HideTabBar => "__taroHideTabBar",
            Self::SetTabBarStyle => "__taroSetTabBarStyle",
            Self::SetTabBarItem => "__taroSetTabBarItem",
        }
    }

    /// Variant name, used to derive generated handler names.
    pub fn variant_name(self) -> &'static str {
        match self {
            Self::SwitchTab => "SwitchTab",
            Self::SetTabBarBadge => "SetTabBarBadge",
            Self::RemoveTabBarBadge => "RemoveTabBarBadge",
            Self::ShowTabBarRedDot => "ShowTabBarRedDot",
            Self::HideTabBarRedDot => "HideTabBarRedDot",
            Self::ShowTabBar => "ShowTabBar",
            Self::HideTabBar => "HideTabBar",
            Self::SetTabBarStyle => "SetTabBarStyle",
            Self::SetTabBarItem => "SetTabBarItem",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Partial palette update; empty fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePatch {
    pub color: Option<String>,
    pub selected_color: Option<String>,
    pub background_color: Option<String>,
    pub border_style: Option<crate::app_config::BorderStyle>,
}

/// Closed set of tab-bar mutation commands delivered over the event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabCommand {
    /// Activate the tab whose page path is `page`.
    SwitchTab { page: String },
    SetBadge { index: usize, text: String },
    RemoveBadge { index: usize },
    ShowRedDot { index: usize },
    HideRedDot { index: usize },
    ShowBar { animation: bool },
    HideBar { animation: bool },
    SetStyle(StylePatch),
    SetItem {
        index: usize,
        icon_path: Option<String>,
        selected_icon_path: Option<String>,
        text: Option<String>,
    },
}

impl TabCommand {
    /// Topic this command is published on.
    pub fn topic(&self) -> Topic {
        match self {
            Self::SwitchTab { .. } => Topic::SwitchTab,
            Self::SetBadge { .. } => Topic::SetTabBarBadge,
            Self::RemoveBadge { .. } => Topic::RemoveTabBarBadge,
            Self::ShowRedDot { .. } => Topic::ShowTabBarRedDot,
            Self::HideRedDot { .. } => Topic::HideTabBarRedDot,
            Self::ShowBar { .. } => Topic::ShowTabBar,
            Self::HideBar { .. } => Topic::HideTabBar,
            Self::SetStyle(_) => Topic::SetTabBarStyle,
            Self::SetItem { .. } => Topic::SetTabBarItem,
        }
    }

    /// Entry patch for commands that target a single tab.
    pub fn entry_patch(&self) -> Option<(usize, TabPatch)> {
        let (index, patch) = match self {
            Self::SetBadge { index, text } => (
                *index,
                TabPatch {
                    badge_text: Some(Some(text.clone())),
                    show_red_dot: Some(false),
                    ..Default::default()
                },
            ),
            Self::RemoveBadge { index } => (
                *index,
                TabPatch {
                    badge_text: Some(None),
                    ..Default::default()
                },
            ),
            Self::ShowRedDot { index } => (
                *index,
                TabPatch {
                    badge_text: Some(None),
                    show_red_dot: Some(true),
                    ..Default::default()
                },
            ),
            Self::HideRedDot { index } => (
                *index,
                TabPatch {
                    show_red_dot: Some(false),
                    ..Default::default()
                },
            ),
            Self::SetItem {
                index,
                icon_path,
                selected_icon_path,
                text,
            } => (
                *index,
                TabPatch {
                    text: text.clone().filter(|t| !t.is_empty()),
                    icon_path: icon_path.clone().filter(|p| !p.is_empty()),
                    selected_icon_path: selected_icon_path.clone().filter(|p| !p.is_empty()),
                    ..Default::default()
                },
            ),
            _ => return None,
        };
        Some((index, patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_event_names_are_unique() {
        let names: HashSet<&str> = Topic::ALL.iter().map(|t| t.event_name()).collect();
        assert_eq!(names.len(), Topic::ALL.len());
    }

    #[test]
    fn test_command_topics() {
        assert_eq!(
            TabCommand::SwitchTab { page: "a".into() }.topic(),
            Topic::SwitchTab
        );
        assert_eq!(
            TabCommand::ShowRedDot { index: 0 }.topic(),
            Topic::ShowTabBarRedDot
        );
        assert_eq!(
            TabCommand::SetStyle(StylePatch::default()).topic(),
            Topic::SetTabBarStyle
        );
    }

    #[test]
    fn test_set_badge_clears_red_dot() {
        let (index, patch) = TabCommand::SetBadge { index: 2, text: "9".into() }
            .entry_patch()
            .unwrap();
        assert_eq!(index, 2);
        assert_eq!(patch.badge_text, Some(Some("9".to_string())));
        assert_eq!(patch.show_red_dot, Some(false));
    }

    #[test]
    fn test_bar_commands_have_no_entry_patch() {
        assert!(TabCommand::ShowBar { animation: true }.entry_patch().is_none());
        assert!(TabCommand::SwitchTab { page: "a".into() }.entry_patch().is_none());
    }
}
