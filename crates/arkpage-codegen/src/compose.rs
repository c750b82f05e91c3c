//! Line composition with nested indentation.
//!
//! Every emitter produces [`Fragment`]s; the [`Composer`] is the only place
//! that turns them into text. Rules:
//!
//! - each non-empty line is prefixed with the current indentation;
//! - entries that are empty or whitespace-only are dropped, and so are
//!   `None` entries in the `Option` helpers;
//! - a multi-line [`Fragment::Text`] keeps its internal layout, and its
//!   internal blank lines stay blank (they are never indented);
//! - [`Fragment::Indented`] embeds its children one indentation step deeper.
//!
//! Because composed output never carries indentation on blank lines,
//! passing it through again as a single text fragment at zero indent is a
//! no-op.

/// A piece of generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// One or more lines, relative to the enclosing indentation.
    Text(String),
    /// Children rendered one step deeper.
    Indented(Vec<Fragment>),
    /// Children rendered at the same depth.
    Group(Vec<Fragment>),
    /// A single blank separator line.
    Gap,
}

impl Fragment {
    /// A text fragment.
    pub fn line(text: impl Into<String>) -> Self {
        Fragment::Text(text.into())
    }

    /// `head {`, indented body, `}`.
    pub fn block(head: impl Into<String>, body: Vec<Fragment>) -> Self {
        Self::block_with_tail(head, body, "}")
    }

    /// `head {`, indented body, then a custom closing line.
    pub fn block_with_tail(
        head: impl Into<String>,
        body: Vec<Fragment>,
        tail: impl Into<String>,
    ) -> Self {
        Fragment::Group(vec![
            Fragment::Text(format!("{} {{", head.into())),
            Fragment::Indented(body),
            Fragment::Text(tail.into()),
        ])
    }

    /// Keep only the entries that are present.
    pub fn group(entries: impl IntoIterator<Item = Option<Fragment>>) -> Self {
        Fragment::Group(entries.into_iter().flatten().collect())
    }

    fn is_blank(&self) -> bool {
        matches!(self, Fragment::Text(t) if t.trim().is_empty())
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Text(text.to_string())
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::Text(text)
    }
}

/// Renders fragments with a fixed indentation step.
#[derive(Debug, Clone, Copy)]
pub struct Composer {
    step: usize,
}

impl Composer {
    /// Create a composer that indents nested blocks by `step` spaces.
    pub fn new(step: usize) -> Self {
        Self { step }
    }

    /// Compose `fragments`, prefixing every line with `indent` spaces.
    pub fn compose(&self, fragments: &[Fragment], indent: usize) -> String {
        let mut lines = Vec::new();
        self.collect(fragments, indent, &mut lines);
        lines.join("\n")
    }

    /// Compose a single fragment at zero indent.
    pub fn render(&self, fragment: &Fragment) -> String {
        self.compose(std::slice::from_ref(fragment), 0)
    }

    fn collect(&self, fragments: &[Fragment], indent: usize, out: &mut Vec<String>) {
        let prefix = " ".repeat(indent);
        for fragment in fragments {
            if fragment.is_blank() {
                continue;
            }
            match fragment {
                Fragment::Text(text) => {
                    for line in text.split('\n') {
                        if line.trim().is_empty() {
                            out.push(String::new());
                        } else {
                            out.push(format!("{}{}", prefix, line));
                        }
                    }
                }
                Fragment::Indented(children) => self.collect(children, indent + self.step, out),
                Fragment::Group(children) => self.collect(children, indent, out),
                Fragment::Gap => out.push(String::new()),
            }
        }
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(2)
    }
}
