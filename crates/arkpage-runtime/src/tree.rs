//! Node trees and the diagnostic tree printer.

use arkpage_core::diagnostics::{
    TREE_LEVEL_INDENT, TREE_LOG_PREFIX, TREE_PRINT_DELAY_MS,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::time::Duration;

/// Node name of text nodes, which print without a tag.
const TEXT_NODE: &str = "TEXT";

/// A rendered element as mounted by a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    pub node_name: String,
    pub style: IndexMap<String, Value>,
    pub text_content: String,
    pub attrs: IndexMap<String, Value>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            node_name: TEXT_NODE.to_string(),
            text_content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    fn tag(&self) -> &str {
        if self.node_name == TEXT_NODE {
            ""
        } else {
            &self.node_name
        }
    }

    /// `key=<json> ` for every non-empty attribute group.
    fn attributes(&self) -> String {
        let mut out = String::new();
        if !self.style.is_empty() {
            out.push_str(&format!("_st={} ", object(&self.style)));
        }
        if !self.text_content.is_empty() {
            out.push_str(&format!("_textContent={} ", Value::from(self.text_content.as_str())));
        }
        if !self.attrs.is_empty() {
            out.push_str(&format!("_attrs={} ", object(&self.attrs)));
        }
        out
    }
}

/// Compact JSON object, keys in insertion order.
fn object(map: &IndexMap<String, Value>) -> Value {
    Value::Object(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

/// Prints a node tree one line per tick, so long trees never hog the loop.
#[derive(Debug, Clone, Copy)]
pub struct TreePrinter {
    delay: Duration,
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(TREE_PRINT_DELAY_MS),
        }
    }
}

impl TreePrinter {
    /// Every printed line, in order.
    pub fn lines(&self, root: &TreeNode) -> Vec<String> {
        let mut lines = Vec::new();
        Self::walk(root, 1, &mut lines);
        lines
    }

    fn walk(node: &TreeNode, level: usize, out: &mut Vec<String>) {
        let prefix = format!("{}{}", TREE_LOG_PREFIX, TREE_LEVEL_INDENT.repeat(level - 1));
        let tag = node.tag();
        let attrs = node.attributes();
        if node.children.is_empty() {
            out.push(format!("{} <{} {}/>", prefix, tag, attrs));
        } else {
            out.push(format!("{} <{} {}>", prefix, tag, attrs));
            for child in &node.children {
                Self::walk(child, level + 1, out);
            }
            out.push(format!("{} </{}>", prefix, tag));
        }
    }

    /// Emit every line through `emit`, pausing between lines.
    ///
    /// Once started it runs to the end.
    pub fn print(
        &self,
        root: &TreeNode,
        mut emit: impl FnMut(&str),
        mut pause: impl FnMut(Duration),
    ) {
        for line in self.lines(root) {
            emit(&line);
            pause(self.delay);
        }
    }
}
