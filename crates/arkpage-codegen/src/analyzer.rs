//! Descriptor analysis.
//!
//! Classifies the input as single-page or tab-bar mode and derives the flags
//! every emitter reads. The result is built once per generation pass and
//! never reused.

use crate::error::Result;
use crate::options::GenerationOptions;
use arkpage_core::{
    resolve_refresh, AppConfig, NavigationStyle, PageConfig, PageDescriptor, TabBarItem,
};
use tracing::debug;

/// What a generation pass was asked to produce.
#[derive(Debug, Clone, PartialEq)]
pub enum PageInput {
    /// One page component.
    Single(PageDescriptor),
    /// A tab-bar host over several pages, in tab order.
    Tabbar(Vec<PageDescriptor>),
}

impl From<PageDescriptor> for PageInput {
    fn from(page: PageDescriptor) -> Self {
        PageInput::Single(page)
    }
}

impl From<Vec<PageDescriptor>> for PageInput {
    fn from(pages: Vec<PageDescriptor>) -> Self {
        PageInput::Tabbar(pages)
    }
}

impl PageInput {
    /// Descriptors in this input.
    pub fn pages(&self) -> &[PageDescriptor] {
        match self {
            PageInput::Single(page) => std::slice::from_ref(page),
            PageInput::Tabbar(pages) => pages,
        }
    }
}

/// Share capabilities switched on for a single page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShareFlags {
    pub timeline: bool,
    pub app_message: bool,
}

/// Derived state for one generation pass.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    /// Tab-bar mode; decided from the input shape alone.
    pub is_tabbar_page: bool,
    /// Any page may show pull-to-refresh.
    pub enable_refresh: bool,
    /// App-level refresh default is on.
    pub app_refresh_default: bool,
    /// Any page may resolve to the custom navigation style.
    pub immersive: bool,
    /// Share flags (single-page mode only).
    pub share: ShareFlags,
    /// Resolved input.
    pub input: &'a PageInput,
    /// App config.
    pub app: &'a AppConfig,
    /// Tab entries (empty in single-page mode).
    pub tab_items: &'a [TabBarItem],
    /// Loader-supplied options and hooks.
    pub options: &'a GenerationOptions,
}

impl<'a> GenerationContext<'a> {
    /// Route identity used when the router reports no path.
    pub fn page_identity(&self) -> &str {
        match self.input {
            PageInput::Single(page) => &page.name,
            PageInput::Tabbar(_) => &self.options.tabbar_page_path,
        }
    }

    /// Per-page configs in input order.
    pub fn page_configs(&self) -> Vec<&PageConfig> {
        self.input.pages().iter().map(|p| &p.config).collect()
    }

    /// Number of tab slots in the generated component.
    pub fn tab_count(&self) -> usize {
        self.tab_items.len()
    }
}

/// Builds a [`GenerationContext`] from descriptors and app config.
#[derive(Debug, Default)]
pub struct Analyzer;

impl Analyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Classify `input` and compute derived flags.
    pub fn analyze<'a>(
        &self,
        input: &'a PageInput,
        app: &'a AppConfig,
        options: &'a GenerationOptions,
    ) -> Result<GenerationContext<'a>> {
        let is_tabbar_page = matches!(input, PageInput::Tabbar(_));
        let tab_items = if is_tabbar_page {
            app.require_tab_items()?
        } else {
            &[]
        };

        let app_refresh = app.window.enable_pull_down_refresh;
        let enable_refresh = input
            .pages()
            .iter()
            .any(|page| resolve_refresh(app_refresh, page.config.enable_pull_down_refresh));

        let app_style = app.window.navigation_style;
        let immersive = input.pages().iter().any(|page| {
            NavigationStyle::resolve(app_style, page.config.navigation_style)
                == NavigationStyle::Custom
        });

        let share = match input {
            PageInput::Single(page) => ShareFlags {
                timeline: page.config.shares_timeline(),
                app_message: page.config.shares_app_message(),
            },
            PageInput::Tabbar(_) => ShareFlags::default(),
        };

        debug!(
            tabbar = is_tabbar_page,
            enable_refresh,
            immersive,
            pages = input.pages().len(),
            "analyzed page input"
        );

        Ok(GenerationContext {
            is_tabbar_page,
            enable_refresh,
            app_refresh_default: app_refresh == Some(true),
            immersive,
            share,
            input,
            app,
            tab_items,
            options,
        })
    }
}
