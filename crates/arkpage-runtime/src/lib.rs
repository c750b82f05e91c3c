//! Behavioral model of the components arkpage generates.
//!
//! The generated code runs inside the host UI framework; this crate states
//! what it does in plain Rust so the behavior can be tested without one:
//! - Lifecycle state machine of a page component
//! - Page hosting: lazy page creation, router stack upkeep, tab switching
//! - The tab-bar reducer behind every event-bus command
//! - The diagnostic node-tree printer
//!
//! Host services (router, event bus, page factory, window) are injected as
//! trait objects through [`Collaborators`].

pub mod collaborators;
pub mod controller;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod tree;

pub use collaborators::{
    Collaborators, EventBus, PageFactory, PageInstance, RefreshStatus, Router, ScrollOffset,
    WindowHost,
};
pub use controller::{Effect, Reduction, TabBarState};
pub use error::{Result, RuntimeError, WindowError};
pub use host::PageHost;
pub use lifecycle::{LifecycleEvent, LifecycleState};
pub use tree::{TreeNode, TreePrinter};
