//! Generation-time options supplied by the build pipeline.

use crate::error::BoxError;
use std::fmt;

/// Default route identity of the tab-bar host page.
pub const DEFAULT_TABBAR_PAGE_PATH: &str = "taro_tabbar";

/// Default module the page factory is imported from.
pub const DEFAULT_CREATOR_LOCATION: &str = "@tarojs/plugin-framework-react/dist/runtime";

/// Which artifact a post-processing hook is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A page component (single page or tab-bar host).
    Page,
    /// The module mapping tab paths to page components.
    TabAggregate,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::TabAggregate => "tabbar",
        }
    }
}

/// Text post-processing hook; its output is trusted as-is.
pub type PostProcess = Box<dyn Fn(&str, ArtifactKind) -> Result<String, BoxError> + Send + Sync>;

/// Options for one generator instance.
pub struct GenerationOptions {
    /// Import statement for the UI framework, spliced into the preamble.
    pub framework_import: Option<String>,
    /// Module path of the page-instance factory.
    pub creator_location: String,
    /// Route identity used for the tab-bar host page.
    pub tabbar_page_path: String,
    /// Indentation step of the generated source.
    pub indent_width: usize,
    /// Emit the node-tree printing button and its method.
    pub debug_overlay: bool,
    /// Optional hook applied to every finished artifact.
    pub post_process: Option<PostProcess>,
}

impl GenerationOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the framework import statement.
    pub fn with_framework_import(mut self, statement: impl Into<String>) -> Self {
        self.framework_import = Some(statement.into());
        self
    }

    /// Set the page factory module path.
    pub fn with_creator_location(mut self, location: impl Into<String>) -> Self {
        self.creator_location = location.into();
        self
    }

    /// Set the tab-bar host route identity.
    pub fn with_tabbar_page_path(mut self, path: impl Into<String>) -> Self {
        self.tabbar_page_path = path.into();
        self
    }

    /// Set the indentation step.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Toggle the diagnostic overlay.
    pub fn with_debug_overlay(mut self, enabled: bool) -> Self {
        self.debug_overlay = enabled;
        self
    }

    /// Install a post-processing hook.
    pub fn with_post_process<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, ArtifactKind) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.post_process = Some(Box::new(hook));
        self
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            framework_import: None,
            creator_location: DEFAULT_CREATOR_LOCATION.to_string(),
            tabbar_page_path: DEFAULT_TABBAR_PAGE_PATH.to_string(),
            indent_width: 2,
            debug_overlay: false,
            post_process: None,
        }
    }
}

impl fmt::Debug for GenerationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationOptions")
            .field("framework_import", &self.framework_import)
            .field("creator_location", &self.creator_location)
            .field("tabbar_page_path", &self.tabbar_page_path)
            .field("indent_width", &self.indent_width)
            .field("debug_overlay", &self.debug_overlay)
            .field("post_process", &self.post_process.is_some())
            .finish()
    }
}
