//! Interfaces of the host services a page component talks to.
//!
//! All of them are injected into [`PageHost`](crate::PageHost) at
//! construction; nothing is looked up from ambient state.

use crate::error::WindowError;
use crate::tree::TreeNode;
use arkpage_core::{PageConfig, PageStack, RouteParams, RouterState, Topic};

/// Scroll offsets forwarded to a page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset {
    pub scroll_top: f64,
    pub scroll_left: f64,
}

/// States reported by the pull-to-refresh container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    Inactive,
    Drag,
    OverDrag,
    Refresh,
    Done,
}

/// A page object created by the page factory.
///
/// Every hook is optional; the defaults do nothing.
pub trait PageInstance {
    /// Load the page and return its mounted node tree, if any.
    fn on_load(&mut self, _params: &RouteParams) -> Option<TreeNode> {
        None
    }

    fn on_show(&mut self) {}

    fn on_hide(&mut self) {}

    fn on_unload(&mut self) {}

    fn on_page_scroll(&mut self, _offset: ScrollOffset) {}

    fn on_pull_down_refresh(&mut self) {}

    fn on_pull_intercept(&mut self) {}
}

/// Turns a page path and its config into a page object.
pub trait PageFactory {
    fn create(&mut self, page_path: &str, config: &PageConfig) -> Box<dyn PageInstance>;
}

/// The host router and the page stack it shares with every page.
pub trait Router {
    /// Current navigation state.
    fn state(&self) -> RouterState;

    /// Query parameters of the current navigation.
    fn params(&self) -> RouteParams;

    /// The shared page stack.
    fn stack(&self) -> &PageStack;

    fn stack_mut(&mut self) -> &mut PageStack;
}

/// Process-wide publish/subscribe channel for tab-bar commands.
///
/// Subscribing registers the page host as the handler for `topic`; commands
/// published there reach it through [`PageHost::dispatch`](crate::PageHost::dispatch).
pub trait EventBus {
    fn on(&mut self, topic: Topic);

    fn off(&mut self, topic: Topic);
}

/// Window services.
pub trait WindowHost {
    /// Enter full-screen mode and hide the system bars.
    fn enter_full_screen(&mut self) -> Result<(), WindowError>;
}

/// The collaborators one page host needs.
pub struct Collaborators {
    pub router: Box<dyn Router>,
    pub bus: Box<dyn EventBus>,
    pub factory: Box<dyn PageFactory>,
    pub window: Box<dyn WindowHost>,
}
