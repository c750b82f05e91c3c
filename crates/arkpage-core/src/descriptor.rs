//! Page descriptors and per-page configuration.

use crate::errors::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Navigation bar style of a page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationStyle {
    /// System navigation bar.
    Default,
    /// Page draws its own chrome; the window goes full screen.
    Custom,
}

impl NavigationStyle {
    /// Resolve the effective style from the app default and a page override.
    ///
    /// A custom app default is inherited unless the page explicitly asks for
    /// `default`; a page can always opt into `custom` on its own.
    pub fn resolve(app: Option<NavigationStyle>, page: Option<NavigationStyle>) -> NavigationStyle {
        match (app, page) {
            (_, Some(NavigationStyle::Custom)) => NavigationStyle::Custom,
            (Some(NavigationStyle::Custom), None) => NavigationStyle::Custom,
            _ => NavigationStyle::Default,
        }
    }
}

/// Per-page configuration, as written in a page's config file.
///
/// Keys the generator does not interpret are kept in `extra` so they survive
/// into the emitted config literal in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_style: Option<NavigationStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_pull_down_refresh: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_share_timeline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_share_app_message: Option<bool>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl PageConfig {
    /// Parse a page config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Whether sharing to the timeline was explicitly enabled.
    pub fn shares_timeline(&self) -> bool {
        self.enable_share_timeline == Some(true)
    }

    /// Whether sharing as an app message was explicitly enabled.
    pub fn shares_app_message(&self) -> bool {
        self.enable_share_app_message == Some(true)
    }
}

/// Static metadata for one navigable screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Page identity, also its route path (e.g. `pages/index/index`).
    pub name: String,
    /// Per-page configuration.
    #[serde(default)]
    pub config: PageConfig,
}

impl PageDescriptor {
    /// Create a descriptor with an empty config.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: PageConfig::default(),
        }
    }

    /// Replace the config.
    pub fn with_config(mut self, config: PageConfig) -> Self {
        self.config = config;
        self
    }
}

/// Resolve pull-down-refresh enablement for one page.
///
/// An enabled app default applies unless the page explicitly disables it;
/// otherwise the page must enable it explicitly. An unset app default
/// behaves like `false`.
pub fn resolve_refresh(app_default: Option<bool>, page: Option<bool>) -> bool {
    if app_default == Some(true) && page != Some(false) {
        return true;
    }
    page == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_refresh_truth_table() {
        assert!(resolve_refresh(Some(true), None));
        assert!(resolve_refresh(Some(true), Some(true)));
        assert!(!resolve_refresh(Some(true), Some(false)));
        assert!(!resolve_refresh(Some(false), None));
        assert!(resolve_refresh(Some(false), Some(true)));
        assert!(!resolve_refresh(None, None));
        assert!(!resolve_refresh(None, Some(false)));
        assert!(resolve_refresh(None, Some(true)));
    }

    #[test]
    fn test_navigation_style_resolution() {
        use NavigationStyle::*;
        assert_eq!(NavigationStyle::resolve(Some(Custom), None), Custom);
        assert_eq!(NavigationStyle::resolve(Some(Custom), Some(Default)), Default);
        assert_eq!(NavigationStyle::resolve(None, Some(Custom)), Custom);
        assert_eq!(NavigationStyle::resolve(Some(Default), None), Default);
        assert_eq!(NavigationStyle::resolve(None, None), Default);
    }

    #[test]
    fn test_page_config_keeps_unknown_keys_in_order() {
        let config = PageConfig::from_json(
            r##"{"navigationBarTitleText":"Home","enablePullDownRefresh":true,"backgroundColor":"#fff"}"##,
        )
        .unwrap();

        assert_eq!(config.enable_pull_down_refresh, Some(true));
        let keys: Vec<&str> = config.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["navigationBarTitleText", "backgroundColor"]);
    }

    #[test]
    fn test_share_flags_require_explicit_true() {
        let config = PageConfig {
            enable_share_timeline: Some(true),
            enable_share_app_message: Some(false),
            ..Default::default()
        };
        assert!(config.shares_timeline());
        assert!(!config.shares_app_message());
    }
}
