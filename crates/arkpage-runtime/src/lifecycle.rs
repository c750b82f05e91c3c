//! Page lifecycle states and the transitions between them.

use crate::error::{Result, RuntimeError};
use std::fmt;

/// Where a page host is in its life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    #[default]
    NotAppeared,
    Appeared,
    Shown,
    Hidden,
    /// Terminal.
    Disappeared,
}

/// Notifications delivered by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Appear,
    Show,
    Hide,
    Disappear,
}

impl LifecycleState {
    /// State after `event`, or an error if `event` is not accepted here.
    ///
    /// Appear is accepted once. Show and hide may repeat in any order once
    /// the page has appeared. Nothing is accepted after disappear.
    pub fn next(self, event: LifecycleEvent) -> Result<LifecycleState> {
        use LifecycleEvent as E;
        use LifecycleState as S;

        let next = match (self, event) {
            (S::NotAppeared, E::Appear) => S::Appeared,
            (S::Appeared | S::Shown | S::Hidden, E::Show) => S::Shown,
            (S::Appeared | S::Shown | S::Hidden, E::Hide) => S::Hidden,
            (S::Appeared | S::Shown | S::Hidden, E::Disappear) => S::Disappeared,
            (from, event) => return Err(RuntimeError::InvalidTransition { from, event }),
        };
        Ok(next)
    }

    /// Whether the page has appeared and not yet disappeared.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Appeared | Self::Shown | Self::Hidden)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotAppeared => "not yet appeared",
            Self::Appeared => "appeared",
            Self::Shown => "shown",
            Self::Hidden => "hidden",
            Self::Disappeared => "disappeared",
        })
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Appear => "appear",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Disappear => "disappear",
        })
    }
}
