//! App-level configuration: window defaults and the tab bar.

use crate::descriptor::NavigationStyle;
use crate::errors::{ConfigError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default unselected label color.
pub const DEFAULT_TAB_COLOR: &str = "#7A7E83";
/// Default selected label color.
pub const DEFAULT_TAB_SELECTED_COLOR: &str = "#3CC51F";
/// Default tab bar background.
pub const DEFAULT_TAB_BACKGROUND_COLOR: &str = "#FFFFFF";
/// Duration of the tab bar show/hide animation, in milliseconds.
pub const TAB_ANIMATION_DURATION_MS: u64 = 400;

/// Global app settings that seed per-page and per-tab defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub pages: Vec<String>,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_bar: Option<TabBarConfig>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl AppConfig {
    /// Parse an app config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Configured tab entries, empty when the app has no tab bar.
    pub fn tab_items(&self) -> &[TabBarItem] {
        self.tab_bar.as_ref().map(|t| t.list.as_slice()).unwrap_or(&[])
    }

    /// Tab entries, failing when there is nothing to switch between.
    pub fn require_tab_items(&self) -> Result<&[TabBarItem]> {
        let items = self.tab_items();
        if items.is_empty() {
            return Err(ConfigError::EmptyTabBar);
        }
        Ok(items)
    }
}

/// Window defaults applied to every page that does not override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_style: Option<NavigationStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_pull_down_refresh: Option<bool>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Tab bar palette, placement and entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabBarConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    /// Free-form; only `"top"` is meaningful, anything else is bottom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default)]
    pub list: Vec<TabBarItem>,
}

impl TabBarConfig {
    /// Resolved bar placement.
    pub fn bar_position(&self) -> BarPosition {
        BarPosition::from_config(self.position.as_deref())
    }

    /// Palette with defaults filled in.
    pub fn style(&self) -> TabBarStyle {
        TabBarStyle {
            color: self.color.clone().unwrap_or_else(|| DEFAULT_TAB_COLOR.to_string()),
            selected_color: self
                .selected_color
                .clone()
                .unwrap_or_else(|| DEFAULT_TAB_SELECTED_COLOR.to_string()),
            background_color: self
                .background_color
                .clone()
                .unwrap_or_else(|| DEFAULT_TAB_BACKGROUND_COLOR.to_string()),
            border_style: self.border_style.unwrap_or_default(),
        }
    }
}

/// One configured tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabBarItem {
    pub page_path: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_icon_path: Option<String>,
}

impl TabBarItem {
    /// Create an item with a path and label.
    pub fn new(page_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            page_path: page_path.into(),
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Top border color of the tab bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Black,
    White,
}

impl BorderStyle {
    /// Keyword used in generated code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

/// Where the tab bar is placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BarPosition {
    Top,
    #[default]
    Bottom,
}

impl BarPosition {
    /// `"top"` maps to the top; anything else, including nothing, to the bottom.
    pub fn from_config(position: Option<&str>) -> Self {
        match position {
            Some("top") => Self::Top,
            _ => Self::Bottom,
        }
    }
}

/// Resolved tab bar palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBarStyle {
    pub color: String,
    pub selected_color: String,
    pub background_color: String,
    pub border_style: BorderStyle,
}

impl Default for TabBarStyle {
    fn default() -> Self {
        TabBarConfig::default().style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let app = AppConfig::from_json(
            r##"{
                "pages": ["pages/index/index", "pages/mine/mine"],
                "window": { "navigationStyle": "custom", "enablePullDownRefresh": true },
                "tabBar": {
                    "color": "#333333",
                    "position": "top",
                    "list": [
                        { "pagePath": "pages/index/index", "text": "Home" },
                        { "pagePath": "pages/mine/mine", "text": "Mine", "iconPath": "a.png" }
                    ]
                }
            }"##,
        )
        .unwrap();

        assert_eq!(app.window.navigation_style, Some(NavigationStyle::Custom));
        assert_eq!(app.tab_items().len(), 2);
        let tab_bar = app.tab_bar.as_ref().unwrap();
        assert_eq!(tab_bar.bar_position(), BarPosition::Top);
        assert_eq!(tab_bar.style().color, "#333333");
        assert_eq!(tab_bar.style().selected_color, DEFAULT_TAB_SELECTED_COLOR);
    }

    #[test]
    fn test_bar_position_defaults_to_bottom() {
        assert_eq!(BarPosition::from_config(None), BarPosition::Bottom);
        assert_eq!(BarPosition::from_config(Some("left")), BarPosition::Bottom);
        assert_eq!(BarPosition::from_config(Some("top")), BarPosition::Top);
    }

    #[test]
    fn test_require_tab_items_rejects_empty_list() {
        let app = AppConfig {
            tab_bar: Some(TabBarConfig::default()),
            ..Default::default()
        };
        assert!(matches!(app.require_tab_items(), Err(ConfigError::EmptyTabBar)));
        assert!(matches!(
            AppConfig::default().require_tab_items(),
            Err(ConfigError::EmptyTabBar)
        ));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(matches!(
            AppConfig::from_json("{ not json"),
            Err(ConfigError::InvalidJson(_))
        ));
    }
}
