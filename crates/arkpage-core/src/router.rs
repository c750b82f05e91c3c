//! Router state and the page stack mirrored from the host router.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Query parameters of the current navigation.
pub type RouteParams = IndexMap<String, String>;

/// Query parameter naming the tab to activate.
pub const TAB_PAGE_PARAM: &str = "$page";

/// Host-supplied record of the current navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterState {
    /// 1-based depth of this page in the host navigation stack.
    pub index: usize,
    /// Route path; may be empty when the host does not report one.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub name: String,
}

impl RouterState {
    /// Create a state at `index` with `path`.
    pub fn new(index: usize, path: impl Into<String>) -> Self {
        Self {
            index,
            path: path.into(),
            name: String::new(),
        }
    }

    /// Fill in an unset path with `identity`.
    pub fn with_default_path(mut self, identity: &str) -> Self {
        if self.path.is_empty() {
            self.path = identity.to_string();
        }
        self
    }
}

/// Local copy of the navigation stack.
///
/// Its length never exceeds the current navigation depth: stale forward
/// history is dropped before a new state is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageStack {
    entries: Vec<RouterState>,
}

impl PageStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&RouterState> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[RouterState] {
        &self.entries
    }

    /// Record a newly appeared page.
    ///
    /// When the stack already reaches `state.index`, it is cut back to
    /// `index - 1` entries first.
    pub fn push_state(&mut self, state: RouterState) {
        if self.entries.len() >= state.index {
            self.entries.truncate(state.index.saturating_sub(1));
        }
        self.entries.push(state);
    }

    /// Repair the stack when the host reports a page whose path differs from
    /// the top entry (out-of-order navigation notifications).
    ///
    /// Returns whether a correction was applied.
    pub fn correct(&mut self, state: RouterState) -> bool {
        if self.top().is_some_and(|top| top.path == state.path) {
            return false;
        }
        self.entries.truncate(state.index);
        match state.index.checked_sub(1) {
            Some(slot) if slot < self.entries.len() => self.entries[slot] = state,
            _ => self.entries.push(state),
        }
        true
    }
}

impl FromIterator<RouterState> for PageStack {
    fn from_iter<I: IntoIterator<Item = RouterState>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(len: usize) -> PageStack {
        (1..=len).map(|i| RouterState::new(i, format!("pages/p{i}"))).collect()
    }

    #[test]
    fn test_push_truncates_stale_history() {
        let mut stack = stack_of(5);
        stack.push_state(RouterState::new(3, "pages/new"));

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.top().unwrap().path, "pages/new");
        assert_eq!(stack.entries()[1].path, "pages/p2");
    }

    #[test]
    fn test_push_onto_shorter_stack_appends() {
        let mut stack = stack_of(1);
        stack.push_state(RouterState::new(2, "pages/next"));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_correct_overwrites_slot() {
        let mut stack = stack_of(4);
        let corrected = stack.correct(RouterState::new(2, "pages/back"));

        assert!(corrected);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top().unwrap().path, "pages/back");
    }

    #[test]
    fn test_correct_is_noop_when_top_matches() {
        let mut stack = stack_of(3);
        assert!(!stack.correct(RouterState::new(3, "pages/p3")));
        assert_eq!(stack, stack_of(3));
    }

    #[test]
    fn test_default_path() {
        let state = RouterState::new(1, "").with_default_path("pages/index/index");
        assert_eq!(state.path, "pages/index/index");
        let state = RouterState::new(1, "pages/a").with_default_path("pages/index/index");
        assert_eq!(state.path, "pages/a");
    }
}
