//! Node-tree printer for the diagnostic overlay.

use super::{slot, StructEmitter};
use crate::analyzer::GenerationContext;
use crate::compose::Fragment;
use crate::view::{Component, ViewNode};
use arkpage_core::diagnostics::{
    TREE_ATTRIBUTES, TREE_LEVEL_INDENT, TREE_LOG_PREFIX, TREE_PRINT_DELAY_MS,
};

/// Emits `showTree()`, which logs the mounted node tree one line per tick.
#[derive(Debug, Default)]
pub struct DiagnosticsEmitter;

impl DiagnosticsEmitter {
    pub fn new() -> Self {
        Self
    }

    /// The round button that triggers `showTree()`.
    pub fn button() -> ViewNode {
        let label = Component::new("Text")
            .with_args("'NodeTree'")
            .attr("fontSize", "7")
            .attr("fontColor", "Color.White")
            .attr("size", "{ width: 25, height: 25 }")
            .attr("textAlign", "TextAlign.Center")
            .into_node();

        Component::new("Button")
            .with_args("{ type: ButtonType.Circle, stateEffect: true }")
            .with_child(label)
            .attr("width", "55")
            .attr("height", "55")
            .attr("margin", "{ left: 20 }")
            .attr("backgroundColor", "Color.Blue")
            .attr("position", "{ x: '75%', y: '80%' }")
            .attr("onClick", "this.showTree.bind(this)")
            .into_node()
    }

    fn show_tree(&self, ctx: &GenerationContext) -> Fragment {
        let attributes = TREE_ATTRIBUTES
            .iter()
            .map(|a| format!("'{}'", a))
            .collect::<Vec<_>>()
            .join(", ");

        let walk = Fragment::block(
            "const walk = (tree, level = 1) =>",
            vec![
                Fragment::line("const name = tree.nodeName === 'TEXT' ? '' : tree.nodeName"),
                Fragment::line(format!("const attrs = [{}]", attributes)),
                Fragment::Indented(vec![
                    Fragment::line(
                        ".filter(k => typeof tree[k] === 'object' ? Object.keys(tree[k] || {}).length > 0 : !!tree[k])",
                    ),
                    Fragment::line(".map(k => `${k}=${JSON.stringify(tree[k])} `)"),
                    Fragment::line(".join('')"),
                ]),
                Fragment::line("if (tree.childNodes?.length) {"),
                Fragment::Indented(vec![
                    Fragment::line("print(level, `<${name} ${attrs}>`)"),
                    Fragment::line("tree.childNodes.forEach(child => walk(child, level + 1))"),
                    Fragment::line("print(level, `</${name}>`)"),
                ]),
                Fragment::line("} else {"),
                Fragment::Indented(vec![Fragment::line("print(level, `<${name} ${attrs}/>`)")]),
                Fragment::line("}"),
            ],
        );

        Fragment::block(
            "async showTree()",
            vec![
                Fragment::line("const tasks: (() => void)[] = []"),
                Fragment::block(
                    "const print = (level: number, text: string) =>",
                    vec![Fragment::line(format!(
                        "tasks.push(() => console.info('{}' + new Array(level).join('{}'), text))",
                        TREE_LOG_PREFIX, TREE_LEVEL_INDENT
                    ))],
                ),
                walk,
                Fragment::Gap,
                Fragment::line(format!("walk({})", slot(ctx, "node", "this.currentIndex"))),
                Fragment::block(
                    "for (const task of tasks)",
                    vec![
                        Fragment::line("task()"),
                        Fragment::line(format!(
                            "await new Promise((resolve) => setTimeout(resolve, {}))",
                            TREE_PRINT_DELAY_MS
                        )),
                    ],
                ),
            ],
        )
    }
}

impl StructEmitter for DiagnosticsEmitter {
    fn name(&self) -> &'static str {
        "diagnostics"
    }

    fn applies(&self, ctx: &GenerationContext) -> bool {
        ctx.options.debug_overlay
    }

    fn state_fields(&self, _ctx: &GenerationContext) -> Vec<Fragment> {
        Vec::new()
    }

    fn members(&self, ctx: &GenerationContext) -> Vec<Fragment> {
        vec![self.show_tree(ctx)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::tests::{page, tab_app};
    use crate::analyzer::{Analyzer, PageInput};
    use crate::compose::Composer;
    use crate::options::GenerationOptions;
    use arkpage_core::AppConfig;

    fn render(fragments: &[Fragment]) -> String {
        Composer::new(2).compose(fragments, 0)
    }

    #[test]
    fn test_only_with_overlay() {
        let input = PageInput::from(page("pages/a", None));
        let app = AppConfig::default();

        let options = GenerationOptions::default();
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();
        assert!(!DiagnosticsEmitter::new().applies(&ctx));

        let options = GenerationOptions::default().with_debug_overlay(true);
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();
        assert!(DiagnosticsEmitter::new().applies(&ctx));
    }

    #[test]
    fn test_show_tree_walks_active_node() {
        let input = PageInput::from(vec![page("pages/a", None)]);
        let app = tab_app(&["pages/a"], None);
        let options = GenerationOptions::default().with_debug_overlay(true);
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();

        let out = render(&DiagnosticsEmitter::new().members(&ctx));
        assert!(out.starts_with("async showTree() {"));
        assert!(out.contains("walk(this.node[this.currentIndex])"));
        assert!(out.contains("setTimeout(resolve, 16)"));
        assert!(out.contains("'taro-ele'"));
    }

    #[test]
    fn test_button_triggers_show_tree() {
        let button = DiagnosticsEmitter::button();
        let component = button.find("Button").unwrap();
        assert_eq!(component.get_attr("onClick"), Some("this.showTree.bind(this)"));
    }
}
