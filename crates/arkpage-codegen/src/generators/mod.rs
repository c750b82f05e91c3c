//! Emitters for the generated page component.
//!
//! The component struct is assembled from independent emitters, each owning
//! a slice of its state fields and members:
//!
//! | Emitter | Contributes |
//! |---------|-------------|
//! | [`LifecycleEmitter`] | page/router state, lifecycle hooks, page-appear handler |
//! | [`TabBarEmitter`] | tab state, switch/badge/style handlers, event-bus (un)registration, tab builders |
//! | [`DiagnosticsEmitter`] | node-tree printer method |
//!
//! [`ContentTreeBuilder`] produces the `build()` body and
//! [`ModuleAssembler`] stitches everything into the final module.

mod content;
mod diagnostics;
mod lifecycle;
mod module;
mod tabbar;
mod templates;

pub use content::{ContentTreeBuilder, Layer};
pub use diagnostics::DiagnosticsEmitter;
pub use lifecycle::LifecycleEmitter;
pub use module::ModuleAssembler;
pub use tabbar::TabBarEmitter;
pub use templates::TemplateEngine;

use crate::analyzer::GenerationContext;
use crate::compose::{Composer, Fragment};

/// A contributor to the generated component struct.
pub trait StructEmitter {
    /// Short name, used in logs.
    fn name(&self) -> &'static str;

    /// Whether this emitter has anything to say for `ctx`.
    fn applies(&self, _ctx: &GenerationContext) -> bool {
        true
    }

    /// State field declarations.
    fn state_fields(&self, ctx: &GenerationContext) -> Vec<Fragment>;

    /// Methods and handler properties.
    fn members(&self, ctx: &GenerationContext) -> Vec<Fragment>;
}

/// `this.<field>` in single-page mode, `this.<field>[<index>]` in tab-bar mode.
pub(crate) fn slot(ctx: &GenerationContext, field: &str, index: &str) -> String {
    if ctx.is_tabbar_page {
        format!("this.{}[{}]", field, index)
    } else {
        format!("this.{}", field)
    }
}

/// Array literal repeating `value` once per tab.
pub(crate) fn per_tab(ctx: &GenerationContext, value: &str) -> String {
    let items = vec![value; ctx.tab_count()];
    format!("[{}]", items.join(", "))
}

/// Single-quoted string literal.
pub(crate) fn quoted(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Composer using the configured indentation step.
pub(crate) fn composer(ctx: &GenerationContext) -> Composer {
    Composer::new(ctx.options.indent_width)
}

/// `(params) => { body }`, for attribute values that take a callback.
pub(crate) fn arrow(ctx: &GenerationContext, params: &str, body: Vec<Fragment>) -> String {
    composer(ctx).render(&Fragment::block(format!("({}) =>", params), body))
}

/// `name = (params) => { body }`, a handler property of the struct.
pub(crate) fn handler(name: &str, params: &str, body: Vec<Fragment>) -> Fragment {
    Fragment::block(format!("{} = ({}) =>", name, params), body)
}
