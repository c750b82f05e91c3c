//! Final module assembly.
//!
//! A page module is the import/config preamble followed by the component
//! struct. The tab aggregate module maps every tab path to its page
//! component. Both pass through the caller's post-processing hook, if any,
//! whose output is returned untouched.

use super::{
    composer, quoted, ContentTreeBuilder, DiagnosticsEmitter, LifecycleEmitter, StructEmitter,
    TabBarEmitter, TemplateEngine,
};
use crate::analyzer::{GenerationContext, PageInput};
use crate::compose::Fragment;
use crate::error::{CodegenError, Result};
use crate::options::{ArtifactKind, GenerationOptions};
use arkpage_core::{AppConfig, PageDescriptor};
use serde::Serialize;
use tracing::{debug, trace};

const PAGE_PREAMBLE: &str = "\
import TaroView from '@tarojs/components/view'
import { createPageConfig } from {{creator_location}}
import { Current, PageInstance, TaroElement, window } from '@tarojs/runtime'
import { eventCenter } from '@tarojs/runtime/dist/runtime.esm'
import { AppConfig, TabBar, TabBarItem } from '@tarojs/taro'
import component from {{raw_id}}
import router from '@ohos.router'
{{#if framework_import}}{{framework_import}}
{{/if}}const config = {{config}}
{{#if share.timeline}}component.enableShareTimeline = true
{{/if}}{{#if share.app_message}}component.enableShareAppMessage = true
{{/if}}";

const TAB_AGGREGATE: &str = "\
{{#each tabs}}import page{{index}} from {{import_path}}
{{/each}}

{{#each tabs}}{{#if share_timeline}}page{{index}}.enableShareTimeline = true
{{/if}}{{#if share_app_message}}page{{index}}.enableShareAppMessage = true
{{/if}}{{/each}}

export default { {{#each tabs}}{{key}}: page{{index}}{{#unless @last}}, {{/unless}}{{/each}} }
";

#[derive(Serialize)]
struct ShareData {
    timeline: bool,
    app_message: bool,
}

#[derive(Serialize)]
struct PreambleData<'a> {
    creator_location: String,
    raw_id: String,
    framework_import: Option<&'a str>,
    config: String,
    share: ShareData,
}

#[derive(Serialize)]
struct AggregateTab {
    index: usize,
    import_path: String,
    key: String,
    share_timeline: bool,
    share_app_message: bool,
}

#[derive(Serialize)]
struct AggregateData {
    tabs: Vec<AggregateTab>,
}

/// Stitches the preamble, the emitters and the content tree into a module.
pub struct ModuleAssembler<'a> {
    templates: TemplateEngine<'a>,
    emitters: Vec<Box<dyn StructEmitter + Send + Sync>>,
    content: ContentTreeBuilder,
}

impl<'a> ModuleAssembler<'a> {
    /// Create an assembler with the built-in templates and emitters.
    pub fn new() -> Result<Self> {
        let mut templates = TemplateEngine::new();
        templates.register_template("page_preamble", PAGE_PREAMBLE)?;
        templates.register_template("tab_aggregate", TAB_AGGREGATE)?;

        Ok(Self {
            templates,
            emitters: vec![
                Box::new(LifecycleEmitter::new()),
                Box::new(TabBarEmitter::new()),
                Box::new(DiagnosticsEmitter::new()),
            ],
            content: ContentTreeBuilder::new(),
        })
    }

    /// Imports, the config literal and share flags.
    pub fn preamble(&self, ctx: &GenerationContext, raw_id: &str) -> Result<String> {
        let config = match ctx.input {
            PageInput::Single(page) => serde_json::to_string_pretty(&page.config)?,
            PageInput::Tabbar(_) => serde_json::to_string_pretty(&ctx.page_configs())?,
        };

        let data = PreambleData {
            creator_location: quoted(&ctx.options.creator_location),
            raw_id: quoted(raw_id),
            framework_import: ctx.options.framework_import.as_deref(),
            config,
            share: ShareData {
                timeline: ctx.share.timeline,
                app_message: ctx.share.app_message,
            },
        };
        Ok(tidy(&self.templates.render("page_preamble", &data)?))
    }

    /// The `@Entry @Component struct Index { ... }` definition.
    pub fn component(&self, ctx: &GenerationContext) -> String {
        let active: Vec<&(dyn StructEmitter + Send + Sync)> = self
            .emitters
            .iter()
            .map(|e| e.as_ref())
            .filter(|e| e.applies(ctx))
            .collect();

        let mut body: Vec<Fragment> = Vec::new();
        for emitter in &active {
            trace!(emitter = emitter.name(), "emitting state");
            body.extend(emitter.state_fields(ctx));
        }
        for emitter in &active {
            trace!(emitter = emitter.name(), "emitting members");
            for member in emitter.members(ctx) {
                body.push(Fragment::Gap);
                body.push(member);
            }
        }
        body.push(Fragment::Gap);
        body.push(Fragment::block(
            "build()",
            vec![self.content.build(ctx).to_fragment()],
        ));

        composer(ctx).compose(
            &[
                Fragment::line("@Entry"),
                Fragment::line("@Component"),
                Fragment::block("struct Index", body),
            ],
            0,
        )
    }

    /// Full page module, before any post-processing.
    pub fn assemble_unprocessed(&self, ctx: &GenerationContext, raw_id: &str) -> Result<String> {
        Ok(format!("{}\n\n{}\n", self.preamble(ctx, raw_id)?, self.component(ctx)))
    }

    /// Full page module, passed through the post-processing hook.
    pub fn assemble(&self, ctx: &GenerationContext, raw_id: &str) -> Result<String> {
        let text = self.assemble_unprocessed(ctx, raw_id)?;
        post_process(ctx.options, text, ArtifactKind::Page)
    }

    /// Module mapping every configured tab path to its page component.
    pub fn assemble_tab_aggregate(
        &self,
        app: &AppConfig,
        pages: &[PageDescriptor],
        options: &GenerationOptions,
    ) -> Result<String> {
        let tabs = app
            .require_tab_items()?
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let config = pages
                    .iter()
                    .find(|p| p.name == item.page_path)
                    .map(|p| &p.config);
                AggregateTab {
                    index,
                    import_path: quoted(&format!("./{}", item.page_path)),
                    key: quoted(&item.page_path),
                    share_timeline: config.is_some_and(|c| c.shares_timeline()),
                    share_app_message: config.is_some_and(|c| c.shares_app_message()),
                }
            })
            .collect();

        let text = tidy(&self.templates.render("tab_aggregate", &AggregateData { tabs })?) + "\n";
        post_process(options, text, ArtifactKind::TabAggregate)
    }
}

/// Apply the caller's hook; its failure reaches the caller unchanged.
fn post_process(options: &GenerationOptions, text: String, kind: ArtifactKind) -> Result<String> {
    let hooked = options.post_process.is_some();
    let text = match &options.post_process {
        Some(hook) => hook(&text, kind).map_err(CodegenError::PostProcess)?,
        None => text,
    };
    debug!(kind = kind.as_str(), bytes = text.len(), hooked, "generated artifact");
    Ok(text)
}

/// Strip trailing whitespace, collapse blank runs and trim blank edges.
fn tidy(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::tests::{page, tab_app};
    use crate::analyzer::Analyzer;
    use arkpage_core::PageConfig;

    #[test]
    fn test_tidy() {
        assert_eq!(tidy("\n\na  \n\n\n\nb\n\n"), "a\n\nb");
    }

    #[test]
    fn test_single_page_preamble() {
        let mut descriptor = page("pages/index/index", None);
        descriptor.config.enable_share_app_message = Some(true);
        let input = PageInput::from(descriptor);
        let app = AppConfig::default();
        let options = GenerationOptions::default()
            .with_framework_import("import React from 'react'")
            .with_creator_location("@tarojs/plugin-framework-react/dist/runtime");
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();

        let preamble = ModuleAssembler::new().unwrap().preamble(&ctx, "./index.tsx").unwrap();
        let lines: Vec<&str> = preamble.lines().collect();
        assert_eq!(lines[0], "import TaroView from '@tarojs/components/view'");
        assert!(lines.contains(&"import component from './index.tsx'"));
        assert!(lines.contains(&"import React from 'react'"));
        assert!(lines.contains(&"component.enableShareAppMessage = true"));
        assert!(!preamble.contains("enableShareTimeline = true"));

        let react = preamble.find("import React").unwrap();
        let config = preamble.find("const config = {").unwrap();
        let share = preamble.find("component.enableShareAppMessage").unwrap();
        assert!(react < config && config < share);
    }

    #[test]
    fn test_import_paths_are_escaped() {
        let input = PageInput::from(page("pages/index/index", None));
        let app = AppConfig::default();
        let options = GenerationOptions::default().with_creator_location("@vendor/it's-runtime");
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();

        let preamble = ModuleAssembler::new()
            .unwrap()
            .preamble(&ctx, "./pages/o'clock.tsx")
            .unwrap();
        assert!(preamble.contains(r"import { createPageConfig } from '@vendor/it\'s-runtime'"));
        assert!(preamble.contains(r"import component from './pages/o\'clock.tsx'"));
    }

    #[test]
    fn test_tab_preamble_has_config_array_and_no_share() {
        let mut first = page("pages/a", Some(true));
        first.config.enable_share_timeline = Some(true);
        let input = PageInput::from(vec![first, page("pages/b", None)]);
        let app = tab_app(&["pages/a", "pages/b"], None);
        let options = GenerationOptions::default();
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();

        let preamble = ModuleAssembler::new().unwrap().preamble(&ctx, "taro_tabbar").unwrap();
        assert!(preamble.contains("const config = ["));
        assert!(preamble.contains("\"enablePullDownRefresh\": true"));
        assert!(!preamble.contains("component.enableShare"));
    }

    #[test]
    fn test_component_shape() {
        let input = PageInput::from(page("pages/index/index", None));
        let app = AppConfig::default();
        let options = GenerationOptions::default();
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();

        let out = ModuleAssembler::new().unwrap().component(&ctx);
        assert!(out.starts_with("@Entry\n@Component\nstruct Index {\n  page?: PageInstance"));
        assert!(out.contains("\n  build() {\n    Stack({ alignContent: Alignment.TopStart }) {"));
        assert!(out.ends_with("\n  }\n}"));
        assert!(!out.contains("bindEvent"));
        assert!(!out.contains("showTree"));
    }

    #[test]
    fn test_indent_width_is_respected() {
        let input = PageInput::from(page("pages/index/index", Some(true)));
        let app = AppConfig::default();
        let options = GenerationOptions::default().with_indent_width(4);
        let ctx = Analyzer::new().analyze(&input, &app, &options).unwrap();

        let out = ModuleAssembler::new().unwrap().component(&ctx);
        assert!(out.contains("\n    build() {\n        if (this.getConfig().enablePullDownRefresh) {"));
        assert!(out.contains("\n                    this.page?.onPullDownRefresh?.call(this)"));
    }

    #[test]
    fn test_tab_aggregate() {
        let pages = vec![
            PageDescriptor::new("pages/a").with_config(PageConfig {
                enable_share_timeline: Some(true),
                ..Default::default()
            }),
            PageDescriptor::new("pages/b"),
        ];
        let app = tab_app(&["pages/a", "pages/b"], None);
        let options = GenerationOptions::default();

        let out = ModuleAssembler::new()
            .unwrap()
            .assemble_tab_aggregate(&app, &pages, &options)
            .unwrap();
        assert_eq!(
            out,
            "import page0 from './pages/a'\n\
             import page1 from './pages/b'\n\
             \n\
             page0.enableShareTimeline = true\n\
             \n\
             export default { 'pages/a': page0, 'pages/b': page1 }\n"
        );
    }

    #[test]
    fn test_tab_aggregate_without_share() {
        let app = tab_app(&["pages/a"], None);
        let options = GenerationOptions::default();

        let out = ModuleAssembler::new()
            .unwrap()
            .assemble_tab_aggregate(&app, &[], &options)
            .unwrap();
        assert_eq!(
            out,
            "import page0 from './pages/a'\n\nexport default { 'pages/a': page0 }\n"
        );
    }
}
