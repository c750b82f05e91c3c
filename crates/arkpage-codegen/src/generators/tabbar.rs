//! Tab-bar controller: state, switch and mutation handlers, bus wiring and
//! the tab item builders.
//!
//! Entry mutations never touch the list in place. `patchTabBarItem` copies
//! the target entry, merges the patch, bumps the entry's key only when an
//! observed field changed, and replaces the whole list. Unknown indices
//! return before anything is copied.

use super::{handler, quoted, StructEmitter};
use crate::analyzer::GenerationContext;
use crate::compose::Fragment;
use crate::generators::templates::to_camel_case;
use crate::view::{Component, ViewNode};
use arkpage_core::{
    BorderStyle, Topic, DEFAULT_TAB_BACKGROUND_COLOR, DEFAULT_TAB_COLOR, DEFAULT_TAB_SELECTED_COLOR,
    OBSERVED_FIELDS, OBSERVED_FLAGS, TAB_ANIMATION_DURATION_MS, TAB_PAGE_PARAM,
};

/// Member name of the handler registered for `topic`.
pub(crate) fn handler_name(topic: Topic) -> String {
    format!("{}Handler", to_camel_case(topic.variant_name()))
}

/// Emits the tab-bar half of the component; tab-bar mode only.
#[derive(Debug, Default)]
pub struct TabBarEmitter;

impl TabBarEmitter {
    pub fn new() -> Self {
        Self
    }

    fn set_current_index(&self) -> Fragment {
        Fragment::block(
            "setCurrentIndex(index: number)",
            vec![
                Fragment::line("this.currentIndex = index"),
                Fragment::line("this.page = this.pageList[index]"),
            ],
        )
    }

    fn patch_tab_bar_item(&self) -> Fragment {
        let list = |fields: &[&str]| {
            fields
                .iter()
                .map(|f| quoted(f))
                .collect::<Vec<_>>()
                .join(", ")
        };

        Fragment::block(
            "patchTabBarItem(index: number, patch: Partial<TabBarItem>)",
            vec![
                Fragment::line("if (!(index in this.tabBarList)) return"),
                Fragment::Gap,
                Fragment::line("const list = [...this.tabBarList]"),
                Fragment::line("const previous = list[index]"),
                Fragment::line("const entry: TabBarItem = { ...previous, ...patch }"),
                Fragment::line(format!("const observed = [{}]", list(&OBSERVED_FIELDS))),
                Fragment::line(format!("const flags = [{}]", list(&OBSERVED_FLAGS))),
                Fragment::block(
                    "if (observed.some(k => previous[k] !== entry[k]) || flags.some(k => !!previous[k] !== !!entry[k]))",
                    vec![
                        Fragment::line("const base = previous.key || index"),
                        Fragment::line("entry.key = (Math.floor(base / list.length) + 1) * list.length + index"),
                    ],
                ),
                Fragment::line("list[index] = entry"),
                Fragment::line("this.tabBarList = list"),
            ],
        )
    }

    fn switch_tab(&self) -> Fragment {
        handler(
            &handler_name(Topic::SwitchTab),
            "{ params }, notify = true",
            vec![
                Fragment::line(format!(
                    "const index = this.tabBarList.findIndex(e => e.pagePath === params?.{})",
                    TAB_PAGE_PARAM
                )),
                Fragment::block(
                    "if (index >= 0 && this.currentIndex !== index)",
                    vec![
                        Fragment::line("this.page?.onHide?.call(this)"),
                        Fragment::line("this.setCurrentIndex(index)"),
                        Fragment::line("this.handlePageAppear(index)"),
                        Fragment::line("if (notify) this.page?.onShow?.call(this)"),
                    ],
                ),
            ],
        )
    }

    fn patch_handler(&self, topic: Topic, params: &str, patch: &str) -> Fragment {
        handler(
            &handler_name(topic),
            params,
            vec![Fragment::line(format!("this.patchTabBarItem(index, {})", patch))],
        )
    }

    fn visibility(&self, topic: Topic, visible: bool) -> Fragment {
        let assign = Fragment::line(format!("this.isTabbarShow = {}", visible));
        handler(
            &handler_name(topic),
            "{ animation = false }",
            vec![
                Fragment::line("if (animation) {"),
                Fragment::Indented(vec![
                    Fragment::line("animateTo({"),
                    Fragment::Indented(vec![
                        Fragment::line("duration: this.animationDuration,"),
                        Fragment::line("tempo: 1,"),
                        Fragment::line("playMode: PlayMode.Normal,"),
                        Fragment::line("iterations: 1,"),
                    ]),
                    Fragment::line("}, () => {"),
                    Fragment::Indented(vec![assign.clone()]),
                    Fragment::line("})"),
                ]),
                Fragment::line("} else {"),
                Fragment::Indented(vec![assign]),
                Fragment::line("}"),
            ],
        )
    }

    fn set_style(&self) -> Fragment {
        handler(
            &handler_name(Topic::SetTabBarStyle),
            "{ backgroundColor, borderStyle, color, selectedColor }",
            ["backgroundColor", "borderStyle", "color", "selectedColor"]
                .iter()
                .map(|f| Fragment::line(format!("if ({f}) this.{f} = {f}")))
                .collect(),
        )
    }

    fn set_item(&self) -> Fragment {
        handler(
            &handler_name(Topic::SetTabBarItem),
            "{ index, iconPath, selectedIconPath, text }",
            vec![
                Fragment::line("const patch: Partial<TabBarItem> = {}"),
                Fragment::line("if (iconPath) patch.iconPath = iconPath"),
                Fragment::line("if (selectedIconPath) patch.selectedIconPath = selectedIconPath"),
                Fragment::line("if (text) patch.text = text"),
                Fragment::line("this.patchTabBarItem(index, patch)"),
                Fragment::line("this.withImage = this.tabBarList.every(e => !!e.iconPath)"),
            ],
        )
    }

    fn handlers(&self) -> Vec<Fragment> {
        Topic::ALL
            .iter()
            .map(|topic| match topic {
                Topic::SwitchTab => self.switch_tab(),
                Topic::SetTabBarBadge => self.patch_handler(
                    *topic,
                    "{ index, text = '' }",
                    "{ badgeText: text, showRedDot: false }",
                ),
                Topic::RemoveTabBarBadge => {
                    self.patch_handler(*topic, "{ index }", "{ badgeText: undefined }")
                }
                Topic::ShowTabBarRedDot => self.patch_handler(
                    *topic,
                    "{ index }",
                    "{ badgeText: undefined, showRedDot: true }",
                ),
                Topic::HideTabBarRedDot => {
                    self.patch_handler(*topic, "{ index }", "{ showRedDot: false }")
                }
                Topic::ShowTabBar => self.visibility(*topic, true),
                Topic::HideTabBar => self.visibility(*topic, false),
                Topic::SetTabBarStyle => self.set_style(),
                Topic::SetTabBarItem => self.set_item(),
            })
            .collect()
    }

    /// `bindEvent`/`removeEvent` from one topic list, so they stay symmetric.
    fn bus_wiring(&self, method: &str, call: &str) -> Fragment {
        Fragment::block(
            format!("{}()", method),
            Topic::ALL
                .iter()
                .map(|topic| {
                    Fragment::line(format!(
                        "eventCenter.{}('{}', this.{})",
                        call,
                        topic.event_name(),
                        handler_name(*topic)
                    ))
                })
                .collect(),
        )
    }

    /// Icon and label of one tab, colored by selection.
    pub fn tab_inner_view(&self) -> ViewNode {
        let label = |size: u32, line_height: u32, top: u32| {
            Component::new("Text")
                .with_args("item.text")
                .attr(
                    "fontColor",
                    "this.currentIndex === index ? this.selectedColor : this.color",
                )
                .attr("fontSize", size.to_string())
                .attr("fontWeight", "this.currentIndex === index ? 500 : 400")
                .attr("lineHeight", line_height.to_string())
                .attr("maxLines", "1")
                .attr("textOverflow", "{ overflow: TextOverflow.Ellipsis }")
                .attr("margin", format!("{{ top: {}, bottom: 7 }}", top))
                .into_node()
        };
        let icon = Component::new("Image")
            .with_args("this.currentIndex === index && item.selectedIconPath || item.iconPath")
            .attr("width", "24")
            .attr("height", "24")
            .attr("objectFit", "ImageFit.Contain")
            .into_node();

        Component::new("Column")
            .with_child(ViewNode::If {
                condition: "this.withImage".to_string(),
                then: vec![icon, label(10, 14, 7)],
                otherwise: vec![label(16, 22, 17)],
            })
            .into_node()
    }

    /// Badge wrapper around the inner builder when a badge or dot is set.
    pub fn tab_item_view(&self) -> ViewNode {
        let inner = ViewNode::Call("this.renderTabBarInnerBuilder(index, item)".to_string());
        let badge = Component::new("Badge")
            .with_args(
                "{ value: item.badgeText || '', position: BadgePosition.RightTop, style: { badgeSize: !!item.badgeText ? 16 : 6, badgeColor: Color.Red } }",
            )
            .with_child(inner.clone())
            .into_node();

        Component::new("Column")
            .with_child(ViewNode::If {
                condition: "!!item.badgeText || item.showRedDot".to_string(),
                then: vec![badge],
                otherwise: vec![inner],
            })
            .attr("margin", "{ top: 4 }")
            .attr("width", "'100%'")
            .attr("height", "'100%'")
            .attr("justifyContent", "FlexAlign.SpaceEvenly")
            .into_node()
    }

    fn builder(&self, name: &str, view: ViewNode) -> Fragment {
        Fragment::block(
            format!("@Builder {}(index: number, item: TabBarItem)", name),
            vec![view.to_fragment()],
        )
    }
}

impl StructEmitter for TabBarEmitter {
    fn name(&self) -> &'static str {
        "tabbar"
    }

    fn applies(&self, ctx: &GenerationContext) -> bool {
        ctx.is_tabbar_page
    }

    fn state_fields(&self, _ctx: &GenerationContext) -> Vec<Fragment> {
        vec![
            Fragment::line("@State isTabbarShow: boolean = true"),
            Fragment::line("@State tabBar: TabBar = this.appConfig.tabBar || {}"),
            Fragment::line("@State tabBarList: TabBarItem[] = this.tabBar.list || []"),
            Fragment::line(format!(
                "@State color: string = this.tabBar.color || '{}'",
                DEFAULT_TAB_COLOR
            )),
            Fragment::line(format!(
                "@State selectedColor: string = this.tabBar.selectedColor || '{}'",
                DEFAULT_TAB_SELECTED_COLOR
            )),
            Fragment::line(format!(
                "@State backgroundColor: string = this.tabBar.backgroundColor || '{}'",
                DEFAULT_TAB_BACKGROUND_COLOR
            )),
            Fragment::line(format!(
                "@State borderStyle: 'white' | 'black' = this.tabBar.borderStyle || '{}'",
                BorderStyle::default().as_str()
            )),
            Fragment::line("@State withImage: boolean = this.tabBarList.every(e => !!e.iconPath)"),
            Fragment::line(format!(
                "@State animationDuration: number = {}",
                TAB_ANIMATION_DURATION_MS
            )),
            Fragment::line("@State currentIndex: number = 0"),
            Fragment::line("private controller: TabsController = new TabsController()"),
        ]
    }

    fn members(&self, _ctx: &GenerationContext) -> Vec<Fragment> {
        let mut members = vec![self.set_current_index(), self.patch_tab_bar_item()];
        members.extend(self.handlers());
        members.push(self.bus_wiring("bindEvent", "on"));
        members.push(self.bus_wiring("removeEvent", "off"));
        members.push(self.builder("renderTabBarInnerBuilder", self.tab_inner_view()));
        members.push(self.builder("renderTabItemBuilder", self.tab_item_view()));
        members
    }
}
