//! Shared constants of the node-tree printer.

/// Prefix of every printed line, so the output can be filtered from logs.
pub const TREE_LOG_PREFIX: &str = "taro-ele";

/// Indentation added per tree level after the first.
pub const TREE_LEVEL_INDENT: &str = "   ";

/// Pause between two printed lines, in milliseconds.
pub const TREE_PRINT_DELAY_MS: u64 = 16;

/// Attributes worth printing, in print order.
pub const TREE_ATTRIBUTES: [&str; 3] = ["_st", "_textContent", "_attrs"];
