//! Core types for the arkpage page generator.
//!
//! This crate provides the data model shared by the code generator and the
//! runtime model:
//! - Page descriptors and per-page config
//! - App-level config (window defaults, tab-bar palette and entries)
//! - Tab entries with their re-render keys
//! - Router state and the page stack
//! - Event-bus topics and the closed set of tab-bar commands
//! - Node-tree printer constants
//! - Error types

pub mod app_config;
pub mod descriptor;
pub mod diagnostics;
pub mod errors;
pub mod events;
pub mod router;
pub mod tab;

pub use app_config::*;
pub use descriptor::*;
pub use errors::*;
pub use events::*;
pub use router::*;
pub use tab::*;
