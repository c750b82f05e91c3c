//! ArkUI page generation from page descriptors.
//!
//! Given one page descriptor, this crate produces the source of a page
//! component; given the ordered descriptors of a tab-bar app, it produces a
//! single component hosting every tab, plus the aggregate module mapping tab
//! paths to page components.
//!
//! # Example
//!
//! ```ignore
//! use arkpage_codegen::{GenerationOptions, PageGenerator};
//! use arkpage_core::{AppConfig, PageDescriptor};
//!
//! let app = AppConfig::from_json(app_json)?;
//! let generator = PageGenerator::new(&app, GenerationOptions::default())?;
//! let code = generator.parse("./index.tsx", PageDescriptor::new("pages/index/index"))?;
//! println!("{}", code);
//! ```

pub mod analyzer;
pub mod compose;
pub mod error;
pub mod generators;
pub mod options;
pub mod view;

pub use analyzer::{Analyzer, GenerationContext, PageInput, ShareFlags};
pub use compose::{Composer, Fragment};
pub use error::{BoxError, CodegenError, Result};
pub use generators::{
    ContentTreeBuilder, DiagnosticsEmitter, Layer, LifecycleEmitter, ModuleAssembler,
    StructEmitter, TabBarEmitter, TemplateEngine,
};
pub use options::{ArtifactKind, GenerationOptions, PostProcess};
pub use view::{Attribute, Component, ViewNode};

use arkpage_core::{AppConfig, PageDescriptor};
use tracing::debug;

/// Entry point used by the build pipeline.
///
/// Holds the app config and options for every page of one build. Each call
/// analyzes its input afresh; nothing carries over between calls.
pub struct PageGenerator<'a> {
    app: &'a AppConfig,
    options: GenerationOptions,
    analyzer: Analyzer,
    assembler: ModuleAssembler<'a>,
}

impl<'a> PageGenerator<'a> {
    /// Create a generator for one app.
    pub fn new(app: &'a AppConfig, options: GenerationOptions) -> Result<Self> {
        Ok(Self {
            app,
            options,
            analyzer: Analyzer::new(),
            assembler: ModuleAssembler::new()?,
        })
    }

    /// Generate the page module for `input`.
    ///
    /// `raw_id` is the module the page component is imported from. A list
    /// of descriptors, even of length one, produces the tab-bar host.
    pub fn parse(&self, raw_id: &str, input: impl Into<PageInput>) -> Result<String> {
        let input = input.into();
        debug!("Generating page module for {}", raw_id);
        let ctx = self.analyzer.analyze(&input, self.app, &self.options)?;
        self.assembler.assemble(&ctx, raw_id)
    }

    /// Generate the module mapping every tab path to its page component.
    pub fn parse_tabbar(&self, pages: &[PageDescriptor]) -> Result<String> {
        debug!("Generating tab aggregate module from {} descriptors", pages.len());
        self.assembler
            .assemble_tab_aggregate(self.app, pages, &self.options)
    }
}
