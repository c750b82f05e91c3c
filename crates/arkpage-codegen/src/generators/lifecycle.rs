//! Page lifecycle and router-stack reconciliation.
//!
//! The generated component moves through
//! not-yet-appeared → appeared → shown ⇄ hidden → disappeared.
//! `aboutToAppear` records the router state (dropping stale forward history
//! first), `onPageShow` repairs the stack after out-of-order notifications,
//! and `handlePageAppear` instantiates a page at most once per slot.

use super::{per_tab, quoted, slot, StructEmitter};
use crate::analyzer::GenerationContext;
use crate::compose::Fragment;
use arkpage_core::{Topic, TAB_PAGE_PARAM};

/// Emits page state, lifecycle hooks, `handlePageAppear` and `getConfig`.
#[derive(Debug, Default)]
pub struct LifecycleEmitter;

impl LifecycleEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the router state and default its path to the page identity.
    fn router_state(&self, ctx: &GenerationContext) -> Vec<Fragment> {
        vec![
            Fragment::line("const state = router.getState()"),
            Fragment::line(format!("state.path ||= {}", quoted(ctx.page_identity()))),
        ]
    }

    /// Broadcast `hook` to the instantiated page(s).
    fn broadcast(&self, ctx: &GenerationContext, hook: &str) -> Fragment {
        if ctx.is_tabbar_page {
            Fragment::block_with_tail(
                "this.pageList?.forEach(item =>",
                vec![Fragment::line(format!("item?.{}?.call(this)", hook))],
                "})",
            )
        } else {
            Fragment::line(format!("this.page?.{}?.call(this)", hook))
        }
    }

    fn about_to_appear(&self, ctx: &GenerationContext) -> Fragment {
        let mut body = self.router_state(ctx);
        body.push(Fragment::block(
            "if (this.pageStack.length >= state.index)",
            vec![Fragment::line("this.pageStack.length = state.index - 1")],
        ));
        body.push(Fragment::line("this.pageStack.push(state)"));

        if ctx.is_tabbar_page {
            let param = format!("params.{}", TAB_PAGE_PARAM);
            body.extend([
                Fragment::line("const params = router.getParams() || {}"),
                Fragment::line(format!("let index = {}", param)),
                Fragment::Indented(vec![
                    Fragment::line(format!(
                        "? this.tabBarList.findIndex(e => e.pagePath === {})",
                        param
                    )),
                    Fragment::line(": this.tabBarList.findIndex(e => e.pagePath === this.entryPagePath)"),
                ]),
                Fragment::line("index = index >= 0 ? index : 0"),
                Fragment::line("this.handlePageAppear(index)"),
                Fragment::line("this.setCurrentIndex(index)"),
                Fragment::line("this.bindEvent()"),
            ]);
        } else {
            body.push(Fragment::line("this.handlePageAppear()"));
        }

        Fragment::block("aboutToAppear()", body)
    }

    fn on_page_show(&self, ctx: &GenerationContext) -> Fragment {
        let mut body = self.router_state(ctx);
        body.push(Fragment::block(
            "if (this.pageStack[this.pageStack.length - 1]?.path !== state.path)",
            vec![
                Fragment::line("this.pageStack.length = state.index"),
                Fragment::line("this.pageStack[state.index - 1] = state"),
            ],
        ));
        if ctx.is_tabbar_page {
            // Resync the index without its own show; the broadcast covers it.
            body.push(Fragment::line(format!(
                "this.{}({{ params: router.getParams() || {{}} }}, false)",
                super::tabbar::handler_name(Topic::SwitchTab)
            )));
        }
        body.push(self.broadcast(ctx, "onShow"));

        Fragment::block("onPageShow()", body)
    }

    fn on_page_hide(&self, ctx: &GenerationContext) -> Fragment {
        Fragment::block("onPageHide()", vec![self.broadcast(ctx, "onHide")])
    }

    fn about_to_disappear(&self, ctx: &GenerationContext) -> Fragment {
        let mut body = vec![self.broadcast(ctx, "onUnLoad")];
        if ctx.is_tabbar_page {
            body.push(Fragment::line("this.removeEvent()"));
        }
        Fragment::block("aboutToDisappear()", body)
    }

    /// Full-screen request for pages resolving to the custom navigation style.
    ///
    /// Window acquisition is asynchronous and its failure is dropped.
    fn immersive(&self, ctx: &GenerationContext) -> Option<Fragment> {
        if !ctx.immersive {
            return None;
        }
        let config = if ctx.is_tabbar_page {
            "this.getConfig(index)"
        } else {
            "this.getConfig()"
        };
        Some(Fragment::Group(vec![
            Fragment::line("const isCustomStyle = this.appConfig.window?.navigationStyle === 'custom'"),
            Fragment::line(format!("const navigationStyle = {}.navigationStyle", config)),
            Fragment::block(
                "if ((isCustomStyle && navigationStyle !== 'default') || navigationStyle === 'custom')",
                vec![
                    Fragment::line("(Current as any).contextPromise"),
                    Fragment::Indented(vec![
                        Fragment::line("?.then((context) => window.__ohos.getTopWindow(context))"),
                        Fragment::block_with_tail(
                            ".then((mainWindow) =>",
                            vec![
                                Fragment::line("mainWindow.setFullScreen(true)"),
                                Fragment::line("mainWindow.setSystemBarEnable(['status', 'navigation'])"),
                            ],
                            "})",
                        ),
                        Fragment::line(".catch(() => {})"),
                    ]),
                ],
            ),
        ]))
    }

    fn handle_page_appear(&self, ctx: &GenerationContext) -> Fragment {
        let create = if ctx.is_tabbar_page {
            Fragment::block(
                "if (!this.pageList[index])",
                vec![
                    Fragment::line("const pageName = this.tabBarList[index]?.pagePath"),
                    Fragment::line(
                        "this.pageList[index] = createPageConfig(component[pageName], pageName, this.getConfig(index))",
                    ),
                    Fragment::line("this.page = this.pageList[index]"),
                    Fragment::block_with_tail(
                        "this.page.onLoad?.call(this, params, (instance) =>",
                        vec![Fragment::line(format!("{} = instance", slot(ctx, "node", "index")))],
                        "})",
                    ),
                ],
            )
        } else {
            Fragment::block(
                "if (!this.page)",
                vec![
                    Fragment::line(format!(
                        "this.page = createPageConfig(component, {}, config)",
                        quoted(ctx.page_identity())
                    )),
                    Fragment::block_with_tail(
                        "this.page.onLoad?.call(this, params, (instance) =>",
                        vec![Fragment::line(format!("{} = instance", slot(ctx, "node", "index")))],
                        "})",
                    ),
                ],
            )
        };

        let head = if ctx.is_tabbar_page {
            "handlePageAppear(index = this.currentIndex)"
        } else {
            "handlePageAppear()"
        };
        Fragment::block(
            head,
            vec![
                Fragment::group([self.immersive(ctx)]),
                Fragment::line("const params = router.getParams() || {}"),
                Fragment::Gap,
                create,
            ],
        )
    }

    fn get_config(&self, ctx: &GenerationContext) -> Fragment {
        if ctx.is_tabbar_page {
            Fragment::block(
                "getConfig(index = this.currentIndex)",
                vec![Fragment::line("return config[index]")],
            )
        } else {
            Fragment::block("getConfig()", vec![Fragment::line("return config")])
        }
    }
}

impl StructEmitter for LifecycleEmitter {
    fn name(&self) -> &'static str {
        "lifecycle"
    }

    fn state_fields(&self, ctx: &GenerationContext) -> Vec<Fragment> {
        let mut fields = vec![Fragment::line("page?: PageInstance")];
        if ctx.is_tabbar_page {
            fields.push(Fragment::line(format!(
                "scroller: Scroller[] = {}",
                per_tab(ctx, "new Scroller()")
            )));
            fields.push(Fragment::line(format!(
                "@State node: TaroElement[] = {}",
                per_tab(ctx, "new TaroElement('Block')")
            )));
            if ctx.enable_refresh {
                fields.push(Fragment::line(format!(
                    "@State isRefreshing: boolean[] = {}",
                    per_tab(ctx, "false")
                )));
            }
            fields.push(Fragment::line("@State pageList: PageInstance[] = []"));
        } else {
            fields.push(Fragment::line("scroller: Scroller = new Scroller()"));
            fields.push(Fragment::line("@State node: TaroElement = new TaroElement('Block')"));
            if ctx.enable_refresh {
                fields.push(Fragment::line("@State isRefreshing: boolean = false"));
            }
        }
        fields.push(Fragment::line(
            "@State appConfig: AppConfig = window.__taroAppConfig || {}",
        ));
        fields.push(Fragment::line(
            "@StorageLink('__TARO_PAGE_STACK') pageStack: router.RouterState[] = []",
        ));
        if ctx.is_tabbar_page {
            fields.push(Fragment::line(
                "@StorageProp('__TARO_ENTRY_PAGE_PATH') entryPagePath: string = ''",
            ));
        }
        fields
    }

    fn members(&self, ctx: &GenerationContext) -> Vec<Fragment> {
        vec![
            self.about_to_appear(ctx),
            self.on_page_show(ctx),
            self.on_page_hide(ctx),
            self.about_to_disappear(ctx),
            self.handle_page_appear(ctx),
            self.get_config(ctx),
        ]
    }
}
