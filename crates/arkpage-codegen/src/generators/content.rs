//! The renderable body of the generated component.
//!
//! The base is a scroll container around the page's node tree. Optional
//! layers wrap it, innermost first: pull-to-refresh, the tab container,
//! then the diagnostic overlay. Each layer takes the finished inner tree and
//! returns a new tree around it; no layer looks inside what it wraps.

use super::{arrow, composer, slot, DiagnosticsEmitter};
use crate::analyzer::GenerationContext;
use crate::compose::Fragment;
use crate::view::{Component, ViewNode};
use arkpage_core::BarPosition;

/// An optional wrapper around the scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    PullToRefresh,
    TabContainer,
    DiagnosticOverlay,
}

/// Builds the `build()` body.
#[derive(Debug, Default)]
pub struct ContentTreeBuilder;

impl ContentTreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Wrappers that apply to `ctx`, innermost first.
    pub fn layers(&self, ctx: &GenerationContext) -> Vec<Layer> {
        let mut layers = Vec::new();
        if ctx.enable_refresh {
            layers.push(Layer::PullToRefresh);
        }
        if ctx.is_tabbar_page {
            layers.push(Layer::TabContainer);
        }
        if ctx.options.debug_overlay {
            layers.push(Layer::DiagnosticOverlay);
        }
        layers
    }

    /// The complete body tree.
    pub fn build(&self, ctx: &GenerationContext) -> ViewNode {
        self.layers(ctx)
            .into_iter()
            .fold(self.scroll_container(ctx), |inner, layer| {
                self.wrap(ctx, layer, inner)
            })
    }

    /// Wrap `inner` in one layer.
    pub fn wrap(&self, ctx: &GenerationContext, layer: Layer, inner: ViewNode) -> ViewNode {
        match layer {
            Layer::PullToRefresh => self.pull_to_refresh(ctx, inner),
            Layer::TabContainer => self.tab_container(ctx, inner),
            Layer::DiagnosticOverlay => self.diagnostic_overlay(inner),
        }
    }

    /// Scroll container forwarding offsets to the mounted page.
    pub fn scroll_container(&self, ctx: &GenerationContext) -> ViewNode {
        let scroller = slot(ctx, "scroller", "index");
        let node = slot(ctx, "node", "index");

        let on_scroll = arrow(
            ctx,
            "",
            vec![
                Fragment::line("if (!this.page) return"),
                Fragment::Gap,
                Fragment::line(format!(
                    "const {{ xOffset: currentXOffset, yOffset: currentYOffset }} = {}.currentOffset()",
                    scroller
                )),
                Fragment::block_with_tail(
                    "this.page?.onPageScroll?.call(this,",
                    vec![
                        Fragment::line("scrollTop: currentYOffset || 0,"),
                        Fragment::line("scrollLeft: currentXOffset || 0,"),
                    ],
                    "})",
                ),
            ],
        );

        Component::new("Stack")
            .with_args("{ alignContent: Alignment.TopStart }")
            .with_child(
                Component::new("Scroll")
                    .with_args(scroller)
                    .with_child(
                        Component::new("Column")
                            .with_child(
                                Component::new("TaroView")
                                    .with_args(format!("{{ node: {} }}", node))
                                    .into_node(),
                            )
                            .into_node(),
                    )
                    .attr("onScroll", on_scroll)
                    .into_node(),
            )
            .attr("width", "'100%'")
            .attr("height", "'100%'")
            .into_node()
    }

    /// Pull-to-refresh around `inner`, only for pages that enable it.
    pub fn pull_to_refresh(&self, ctx: &GenerationContext, inner: ViewNode) -> ViewNode {
        let refreshing = slot(ctx, "isRefreshing", "index");
        let config = if ctx.is_tabbar_page {
            "this.getConfig(index)"
        } else {
            "this.getConfig()"
        };
        let condition = if ctx.app_refresh_default {
            format!("{}.enablePullDownRefresh !== false", config)
        } else {
            format!("{}.enablePullDownRefresh", config)
        };

        let mut transitions = vec![
            Fragment::line("if (state === RefreshStatus.Refresh) {"),
            Fragment::Indented(vec![
                Fragment::line(format!("{} = true", refreshing)),
                Fragment::line("this.page?.onPullDownRefresh?.call(this)"),
            ]),
            Fragment::line("} else if (state === RefreshStatus.Done) {"),
            Fragment::Indented(vec![Fragment::line(format!("{} = false", refreshing))]),
        ];
        if ctx.is_tabbar_page {
            transitions.push(Fragment::line("} else if (state === RefreshStatus.Drag) {"));
            transitions.push(Fragment::Indented(vec![Fragment::line(
                "this.page?.onPullIntercept?.call(this)",
            )]));
        }
        transitions.push(Fragment::line("}"));
        let on_state_change = arrow(ctx, "state: RefreshStatus", transitions);

        let refresh = Component::new("Refresh")
            .with_args(format!("{{ refreshing: {} }}", refreshing))
            .with_child(inner.clone())
            .attr("onStateChange", on_state_change)
            .into_node();

        ViewNode::If {
            condition,
            then: vec![refresh],
            otherwise: vec![inner],
        }
    }

    /// One tab page per entry, with the switch sequence wired to `onChange`.
    pub fn tab_container(&self, ctx: &GenerationContext, inner: ViewNode) -> ViewNode {
        let position = ctx
            .app
            .tab_bar
            .as_ref()
            .map(|t| t.bar_position())
            .unwrap_or_default();
        let bar_position = match position {
            BarPosition::Top => "BarPosition.Start",
            BarPosition::Bottom => "BarPosition.End",
        };
        let args = composer(ctx).render(&Fragment::Group(vec![
            Fragment::line("{"),
            Fragment::Indented(vec![
                Fragment::line(format!("barPosition: {},", bar_position)),
                Fragment::line("controller: this.controller,"),
                Fragment::line("index: this.currentIndex,"),
            ]),
            Fragment::line("}"),
        ]));

        let tab_content = Component::new("TabContent")
            .with_child(inner)
            .attr("tabBar", "this.renderTabItemBuilder(index, item)")
            .into_node();

        // Outgoing hide, index update, appear, incoming show; in that order.
        let on_change = arrow(
            ctx,
            "index: number",
            vec![
                Fragment::block(
                    "if (this.currentIndex !== index)",
                    vec![
                        Fragment::line("this.page?.onHide?.call(this)"),
                        Fragment::line("this.setCurrentIndex(index)"),
                    ],
                ),
                Fragment::line("this.handlePageAppear(index)"),
                Fragment::line("this.page?.onShow?.call(this)"),
            ],
        );

        Component::new("Tabs")
            .with_args(args)
            .with_child(ViewNode::ForEach {
                source: "this.tabBarList".to_string(),
                params: "item: TabBarItem, index: number".to_string(),
                body: vec![tab_content],
                key: Some("(item: TabBarItem, index: number) => `${item.key || index}`".to_string()),
            })
            .attr("vertical", "false")
            .attr("barMode", "BarMode.Fixed")
            .attr("barHeight", "this.isTabbarShow ? 56 : 0")
            .attr("animationDuration", "this.animationDuration")
            .attr("onChange", on_change)
            .attr("backgroundColor", "this.backgroundColor")
            .into_node()
    }

    /// Fixed-position button that prints the node tree.
    pub fn diagnostic_overlay(&self, inner: ViewNode) -> ViewNode {
        Component::new("Stack")
            .with_args("{ alignContent: Alignment.TopStart }")
            .with_child(inner)
            .with_child(DiagnosticsEmitter::button())
            .attr("width", "'100%'")
            .attr("height", "'100%'")
            .into_node()
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

    fn position(spine: &[&str], tag: &str) -> Option<usize> {
        spine.iter().position(|t| *t == tag)
    }

    fn build_for(refresh: bool, tabs: bool, overlay: bool) -> ViewNode {
        let flag = Some(refresh);
        let input = if tabs {
            PageInput::from(vec![page("pages/a", flag), page("pages/b", None)])
        } else {
            PageInput::from(page("pages/a", flag))
        };
        let app = if tabs {
            tab_app(&["pages/a", "pages/b"], None)
        } else {
            AppConfig::default()
        };
        let options = GenerationOptions::default().with_debug_overlay(overlay);
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();
        ContentTreeBuilder::new().build(&ctx)
    }

    #[test]
    fn test_nesting_order_for_all_combinations() {
        for (refresh, tabs) in [(false, false), (true, false), (false, true), (true, true)] {
            let tree = build_for(refresh, tabs, false);
            let spine = tree.spine();

            let scroll = position(&spine, "Scroll").expect("scroll container");
            assert_eq!(spine.last(), Some(&"TaroView"));

            match position(&spine, "Refresh") {
                Some(refresh_at) => {
                    assert!(refresh, "unexpected refresh layer");
                    assert!(refresh_at < scroll);
                    assert_eq!(spine[refresh_at - 1], "if");
                }
                None => assert!(!refresh),
            }

            match position(&spine, "Tabs") {
                Some(tabs_at) => {
                    assert!(tabs, "unexpected tab layer");
                    assert_eq!(tabs_at, 0);
                    assert!(tabs_at < scroll);
                    if let Some(refresh_at) = position(&spine, "Refresh") {
                        assert!(tabs_at < refresh_at);
                    }
                }
                None => assert!(!tabs),
            }
        }
    }

    #[test]
    fn test_overlay_is_outermost() {
        let tree = build_for(true, true, true);
        let spine = tree.spine();
        assert_eq!(&spine[..2], &["Stack", "Tabs"]);
        let overlay = match &tree {
            ViewNode::Component(c) => c,
            _ => panic!("overlay should be a component"),
        };
        let children = overlay.children.as_ref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].tag(), "Button");
    }

    #[test]
    fn test_refresh_keeps_plain_fallback() {
        let tree = build_for(true, false, false);
        match &tree {
            ViewNode::If { then, otherwise, condition } => {
                assert_eq!(condition, "this.getConfig().enablePullDownRefresh");
                assert_eq!(then[0].tag(), "Refresh");
                assert_eq!(otherwise[0].spine(), then[0].children()[0].spine());
            }
            other => panic!("expected conditional refresh, got {:?}", other.tag()),
        }
    }

    #[test]
    fn test_scroll_forwards_only_when_mounted() {
        let tree = build_for(false, false, false);
        let scroll = tree.find("Scroll").unwrap();
        let on_scroll = scroll.get_attr("onScroll").unwrap();
        assert!(on_scroll.contains("if (!this.page) return"));
        assert!(on_scroll.contains("scrollTop: currentYOffset || 0"));
        assert!(on_scroll.contains("this.scroller.currentOffset()"));
    }

    #[test]
    fn test_tab_mode_uses_indexed_slots() {
        let tree = build_for(true, true, false);
        let text = Composer::new(2).render(&tree.to_fragment());
        assert!(text.contains("Scroll(this.scroller[index])"));
        assert!(text.contains("TaroView({ node: this.node[index] })"));
        assert!(text.contains("Refresh({ refreshing: this.isRefreshing[index] })"));
        assert!(text.contains("RefreshStatus.Drag"));
        assert!(text.contains("barPosition: BarPosition.End"));
    }

    #[test]
    fn test_single_mode_has_no_drag_intercept() {
        let tree = build_for(true, false, false);
        let text = Composer::new(2).render(&tree.to_fragment());
        assert!(!text.contains("onPullIntercept"));
    }

    #[test]
    fn test_tab_switch_sequence_order() {
        let tree = build_for(false, true, false);
        let tabs = tree.find("Tabs").unwrap();
        let on_change = tabs.get_attr("onChange").unwrap();

        let hide = on_change.find("onHide").unwrap();
        let set = on_change.find("setCurrentIndex").unwrap();
        let appear = on_change.find("handlePageAppear").unwrap();
        let show = on_change.find("onShow").unwrap();
        assert!(hide < set && set < appear && appear < show);
    }

    #[test]
    fn test_top_position() {
        let input = PageInput::from(vec![page("pages/a", None)]);
        let mut app = tab_app(&["pages/a"], None);
        app.tab_bar.as_mut().unwrap().position = Some("top".to_string());
        let options = GenerationOptions::default();
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();

        let tree = ContentTreeBuilder::new().build(&ctx);
        let tabs = tree.find("Tabs").unwrap();
        assert!(tabs.args.contains("BarPosition.Start"));
    }
}
