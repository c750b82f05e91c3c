//! View tree intermediate representation.
//!
//! Declarative UI is built as a tree of [`ViewNode`]s and serialized to
//! [`Fragment`]s in one place, so wrappers compose around an inner tree
//! without re-indenting text. Argument and attribute values are raw source;
//! multi-line values keep their relative layout.

use crate::compose::Fragment;

/// A node in the declarative UI tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    /// `Name(args) { children } .attr(value)...`
    Component(Component),
    /// `if (condition) { then } else { otherwise }`
    If {
        condition: String,
        then: Vec<ViewNode>,
        otherwise: Vec<ViewNode>,
    },
    /// `ForEach(source, (params) => { body }, key)`
    ForEach {
        source: String,
        params: String,
        body: Vec<ViewNode>,
        key: Option<String>,
    },
    /// A builder invocation such as `this.renderTabItemBuilder(index, item)`.
    Call(String),
}

/// A UI component with optional children and chained attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Component name (Stack, Scroll, Tabs, ...).
    pub name: String,
    /// Constructor arguments, raw.
    pub args: String,
    /// Children; `None` renders no braces at all.
    pub children: Option<Vec<ViewNode>>,
    /// Chained attribute calls, in order.
    pub attributes: Vec<Attribute>,
}

/// A chained `.name(value)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Component {
    /// Create a component without children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: String::new(),
            children: None,
            attributes: Vec::new(),
        }
    }

    /// Set constructor arguments.
    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into();
        self
    }

    /// Add a child node (opens a body).
    pub fn with_child(mut self, child: ViewNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Add several children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.get_or_insert_with(Vec::new).extend(children);
        self
    }

    /// Chain an attribute call.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Get the value of the first attribute called `name`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Wrap into a node.
    pub fn into_node(self) -> ViewNode {
        ViewNode::Component(self)
    }
}

impl From<Component> for ViewNode {
    fn from(component: Component) -> Self {
        ViewNode::Component(component)
    }
}

impl ViewNode {
    /// Tag for structural inspection: component name, `if`, `ForEach` or `call`.
    pub fn tag(&self) -> &str {
        match self {
            ViewNode::Component(c) => &c.name,
            ViewNode::If { .. } => "if",
            ViewNode::ForEach { .. } => "ForEach",
            ViewNode::Call(_) => "call",
        }
    }

    /// Direct children; for `if` this is the `then` branch.
    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Component(c) => c.children.as_deref().unwrap_or(&[]),
            ViewNode::If { then, .. } => then,
            ViewNode::ForEach { body, .. } => body,
            ViewNode::Call(_) => &[],
        }
    }

    /// Tags along the first-child path from this node down to a leaf.
    pub fn spine(&self) -> Vec<&str> {
        let mut tags = vec![self.tag()];
        let mut node = self;
        while let Some(first) = node.children().first() {
            tags.push(first.tag());
            node = first;
        }
        tags
    }

    /// Depth-first search for the first component called `name`.
    pub fn find(&self, name: &str) -> Option<&Component> {
        if let ViewNode::Component(c) = self {
            if c.name == name {
                return Some(c);
            }
        }
        let branches: &[ViewNode] = match self {
            ViewNode::If { otherwise, .. } => otherwise,
            _ => &[],
        };
        self.children()
            .iter()
            .chain(branches.iter())
            .find_map(|child| child.find(name))
    }

    /// Serialize to fragments.
    pub fn to_fragment(&self) -> Fragment {
        match self {
            ViewNode::Component(c) => c.to_fragment(),
            ViewNode::If {
                condition,
                then,
                otherwise,
            } => {
                let then = Self::fragments(then);
                if otherwise.is_empty() {
                    Fragment::block(format!("if ({})", condition), then)
                } else {
                    Fragment::Group(vec![
                        Fragment::line(format!("if ({}) {{", condition)),
                        Fragment::Indented(then),
                        Fragment::line("} else {"),
                        Fragment::Indented(Self::fragments(otherwise)),
                        Fragment::line("}"),
                    ])
                }
            }
            ViewNode::ForEach {
                source,
                params,
                body,
                key,
            } => {
                let tail = match key {
                    Some(key) => format!("}}, {})", key),
                    None => "})".to_string(),
                };
                Fragment::block_with_tail(
                    format!("ForEach({}, ({}) =>", source, params),
                    Self::fragments(body),
                    tail,
                )
            }
            ViewNode::Call(call) => Fragment::line(call.clone()),
        }
    }

    fn fragments(nodes: &[ViewNode]) -> Vec<Fragment> {
        nodes.iter().map(ViewNode::to_fragment).collect()
    }
}

impl Component {
    /// Serialize to fragments.
    pub fn to_fragment(&self) -> Fragment {
        let head = format!("{}({})", self.name, self.args);
        let mut parts = match &self.children {
            Some(children) => vec![
                Fragment::line(format!("{} {{", head)),
                Fragment::Indented(ViewNode::fragments(children)),
                Fragment::line("}"),
            ],
            None => vec![Fragment::line(head)],
        };
        parts.extend(
            self.attributes
                .iter()
                .map(|a| Fragment::line(format!(".{}({})", a.name, a.value))),
        );
        Fragment::Group(parts)
    }
}
