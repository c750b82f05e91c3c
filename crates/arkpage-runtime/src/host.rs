//! The page host: what a generated page component does at run time.
//!
//! One host serves either a single page or every page of a tab-bar app.
//! Hooks fire in a fixed order:
//!
//! - appear: record router state, instantiate the initial page, subscribe
//! - show: repair the router stack, resync the active tab, show pages
//! - tab change: outgoing hide, index update, page appear, incoming show
//! - disappear: unload every instantiated page, unsubscribe
//!
//! Pages are created lazily and at most once per slot.

use crate::collaborators::{Collaborators, PageInstance, RefreshStatus, ScrollOffset};
use crate::controller::{Effect, Reduction, TabBarState};
use crate::error::Result;
use crate::lifecycle::{LifecycleEvent, LifecycleState};
use crate::tree::{TreeNode, TreePrinter};
use arkpage_core::{
    AppConfig, ConfigError, NavigationStyle, PageConfig, PageDescriptor, PageStack, TabCommand,
    Topic, TAB_PAGE_PARAM,
};
use tracing::{trace, warn};

struct Slot {
    path: String,
    config: PageConfig,
    page: Option<Box<dyn PageInstance>>,
    node: Option<TreeNode>,
    refreshing: bool,
}

impl Slot {
    fn new(path: impl Into<String>, config: PageConfig) -> Self {
        Self {
            path: path.into(),
            config,
            page: None,
            node: None,
            refreshing: false,
        }
    }
}

/// Runtime counterpart of one generated page component.
pub struct PageHost {
    identity: String,
    app_style: Option<NavigationStyle>,
    slots: Vec<Slot>,
    tabs: Option<TabBarState>,
    entry_page_path: Option<String>,
    state: LifecycleState,
    collab: Collaborators,
}

impl PageHost {
    /// Host for a single page.
    pub fn single(page: PageDescriptor, app: &AppConfig, collab: Collaborators) -> Self {
        Self {
            identity: page.name.clone(),
            app_style: app.window.navigation_style,
            slots: vec![Slot::new(page.name, page.config)],
            tabs: None,
            entry_page_path: None,
            state: LifecycleState::NotAppeared,
            collab,
        }
    }

    /// Host for a tab-bar app; `pages` holds the per-tab configs in tab order.
    pub fn tabbar(
        pages: &[PageDescriptor],
        app: &AppConfig,
        identity: impl Into<String>,
        collab: Collaborators,
    ) -> Result<Self> {
        let config = app
            .tab_bar
            .as_ref()
            .filter(|t| !t.list.is_empty())
            .ok_or(ConfigError::EmptyTabBar)?;

        let slots = config
            .list
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let page_config = pages.get(i).map(|p| p.config.clone()).unwrap_or_default();
                Slot::new(item.page_path.clone(), page_config)
            })
            .collect();

        Ok(Self {
            identity: identity.into(),
            app_style: app.window.navigation_style,
            slots,
            tabs: Some(TabBarState::from_config(config)),
            entry_page_path: None,
            state: LifecycleState::NotAppeared,
            collab,
        })
    }

    /// Page path to activate when the router names none.
    pub fn with_entry_page_path(mut self, path: impl Into<String>) -> Self {
        self.entry_page_path = Some(path.into());
        self
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.state
    }

    pub fn tab_bar(&self) -> Option<&TabBarState> {
        self.tabs.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.tabs.as_ref().map_or(0, |t| t.current_index)
    }

    pub fn is_instantiated(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.page.is_some())
    }

    pub fn node(&self, index: usize) -> Option<&TreeNode> {
        self.slots.get(index).and_then(|s| s.node.as_ref())
    }

    pub fn is_refreshing(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.refreshing)
    }

    pub fn page_stack(&self) -> &PageStack {
        self.collab.router.stack()
    }

    fn transition(&mut self, event: LifecycleEvent) -> Result<()> {
        let next = self.state.next(event)?;
        trace!(from = %self.state, to = %next, "lifecycle transition");
        self.state = next;
        Ok(())
    }

    fn page_mut(&mut self, index: usize) -> Option<&mut Box<dyn PageInstance>> {
        self.slots.get_mut(index).and_then(|s| s.page.as_mut())
    }

    fn active_page(&mut self) -> Option<&mut Box<dyn PageInstance>> {
        let index = self.current_index();
        self.page_mut(index)
    }

    fn for_each_page(&mut self, mut hook: impl FnMut(&mut dyn PageInstance)) {
        for page in self.slots.iter_mut().filter_map(|s| s.page.as_mut()) {
            hook(page.as_mut());
        }
    }

    fn set_current_index(&mut self, index: usize) {
        if let Some(tabs) = &mut self.tabs {
            tabs.current_index = index;
        }
    }

    /// The host framework is about to mount the component.
    pub fn appear(&mut self) -> Result<()> {
        self.transition(LifecycleEvent::Appear)?;

        let state = self.collab.router.state().with_default_path(&self.identity);
        self.collab.router.stack_mut().push_state(state);

        let initial = self.tabs.as_ref().map(|tabs| {
            let params = self.collab.router.params();
            let index = match params.get(TAB_PAGE_PARAM) {
                Some(page) => tabs.index_of(page),
                None => self
                    .entry_page_path
                    .as_deref()
                    .and_then(|path| tabs.index_of(path)),
            };
            index.unwrap_or(0)
        });

        match initial {
            Some(index) => {
                self.handle_page_appear(index);
                self.set_current_index(index);
                for topic in Topic::ALL {
                    self.collab.bus.on(topic);
                }
            }
            None => {
                self.handle_page_appear(0);
            }
        }
        Ok(())
    }

    /// The component came to the foreground.
    pub fn show(&mut self) -> Result<()> {
        self.transition(LifecycleEvent::Show)?;

        let state = self.collab.router.state().with_default_path(&self.identity);
        if self.collab.router.stack_mut().correct(state) {
            trace!("router stack corrected");
        }

        if self.tabs.is_some() {
            if let Some(page) = self.collab.router.params().get(TAB_PAGE_PARAM) {
                let command = TabCommand::SwitchTab { page: page.clone() };
                self.apply(&command, false);
            }
            self.for_each_page(|page| page.on_show());
        } else if let Some(page) = self.active_page() {
            page.on_show();
        }
        Ok(())
    }

    /// The component went to the background.
    pub fn hide(&mut self) -> Result<()> {
        self.transition(LifecycleEvent::Hide)?;
        self.for_each_page(|page| page.on_hide());
        Ok(())
    }

    /// The component is being torn down.
    pub fn disappear(&mut self) -> Result<()> {
        self.transition(LifecycleEvent::Disappear)?;
        self.for_each_page(|page| page.on_unload());
        if self.tabs.is_some() {
            for topic in Topic::ALL {
                self.collab.bus.off(topic);
            }
        }
        Ok(())
    }

    /// Make sure the page at `index` exists, creating and loading it once.
    ///
    /// Returns whether a page was created.
    pub fn handle_page_appear(&mut self, index: usize) -> bool {
        let Some(slot) = self.slots.get(index) else {
            return false;
        };

        let style = NavigationStyle::resolve(self.app_style, slot.config.navigation_style);
        if style == NavigationStyle::Custom {
            if let Err(err) = self.collab.window.enter_full_screen() {
                warn!(%err, "full-screen request failed");
            }
        }

        if slot.page.is_some() {
            return false;
        }

        let params = self.collab.router.params();
        let slot = &mut self.slots[index];
        let mut page = self.collab.factory.create(&slot.path, &slot.config);
        slot.node = page.on_load(&params);
        slot.page = Some(page);
        trace!(index, path = %slot.path, "page instantiated");
        true
    }

    /// The tab container reported a change to `index`.
    pub fn on_tab_change(&mut self, index: usize) {
        if self.tabs.is_none() || index >= self.slots.len() {
            return;
        }
        if self.current_index() != index {
            if let Some(page) = self.active_page() {
                page.on_hide();
            }
            self.set_current_index(index);
        }
        self.handle_page_appear(index);
        if let Some(page) = self.active_page() {
            page.on_show();
        }
    }

    /// Handle a command published on the event bus.
    pub fn dispatch(&mut self, command: &TabCommand) -> Effect {
        if !self.state.is_live() {
            trace!(topic = %command.topic(), "command ignored outside the live lifecycle");
            return Effect::None;
        }
        self.apply(command, true)
    }

    fn apply(&mut self, command: &TabCommand, notify: bool) -> Effect {
        let Some(tabs) = &self.tabs else {
            return Effect::None;
        };
        let Reduction { state, effect } = tabs.reduce(command);

        if let Effect::Switch { from, to } = effect {
            if let Some(page) = self.page_mut(from) {
                page.on_hide();
            }
            self.tabs = Some(state);
            self.handle_page_appear(to);
            if notify {
                if let Some(page) = self.page_mut(to) {
                    page.on_show();
                }
            }
        } else {
            self.tabs = Some(state);
        }
        effect
    }

    /// Forward scroll offsets; nothing happens while no page is mounted.
    pub fn on_scroll(&mut self, offset: ScrollOffset) -> bool {
        match self.active_page() {
            Some(page) => {
                page.on_page_scroll(offset);
                true
            }
            None => false,
        }
    }

    /// The pull-to-refresh container changed state.
    pub fn on_refresh_state(&mut self, status: RefreshStatus) {
        let index = self.current_index();
        let tabbed = self.tabs.is_some();
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        match status {
            RefreshStatus::Refresh => {
                slot.refreshing = true;
                if let Some(page) = slot.page.as_mut() {
                    page.on_pull_down_refresh();
                }
            }
            RefreshStatus::Done => slot.refreshing = false,
            RefreshStatus::Drag if tabbed => {
                if let Some(page) = slot.page.as_mut() {
                    page.on_pull_intercept();
                }
            }
            _ => {}
        }
    }

    /// Lines the diagnostic overlay prints for the active page.
    pub fn tree_lines(&self, printer: &TreePrinter) -> Vec<String> {
        self.node(self.current_index())
            .map(|node| printer.lines(node))
            .unwrap_or_default()
    }
}
