//! Generation benchmarks.

use arkpage_codegen::{GenerationOptions, PageGenerator};
use arkpage_core::{AppConfig, PageConfig, PageDescriptor};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const APP_JSON: &str = r##"{
  "pages": ["pages/index/index", "pages/cart/index", "pages/mine/index"],
  "window": { "enablePullDownRefresh": true },
  "tabBar": {
    "color": "#999999",
    "selectedColor": "#FF4400",
    "list": [
      { "pagePath": "pages/index/index", "text": "Home", "iconPath": "a.png", "selectedIconPath": "a-on.png" },
      { "pagePath": "pages/cart/index", "text": "Cart", "iconPath": "b.png", "selectedIconPath": "b-on.png" },
      { "pagePath": "pages/mine/index", "text": "Mine", "iconPath": "c.png", "selectedIconPath": "c-on.png" }
    ]
  }
}"##;

fn descriptors() -> Vec<PageDescriptor> {
    ["pages/index/index", "pages/cart/index", "pages/mine/index"]
        .iter()
        .map(|name| {
            PageDescriptor::new(*name).with_config(PageConfig {
                enable_share_app_message: Some(true),
                ..Default::default()
            })
        })
        .collect()
}

fn generate_single(c: &mut Criterion) {
    let app = AppConfig::from_json(APP_JSON).unwrap();
    let generator = PageGenerator::new(&app, GenerationOptions::default()).unwrap();
    let page = descriptors().remove(0);

    c.bench_function("generate_single", |b| {
        b.iter(|| generator.parse(black_box("./index.tsx"), black_box(page.clone())))
    });
}

fn generate_tabbar(c: &mut Criterion) {
    let app = AppConfig::from_json(APP_JSON).unwrap();
    let generator = PageGenerator::new(&app, GenerationOptions::default()).unwrap();
    let pages = descriptors();

    c.bench_function("generate_tabbar", |b| {
        b.iter(|| generator.parse(black_box("taro_tabbar"), black_box(pages.clone())))
    });
}

criterion_group!(benches, generate_single, generate_tabbar);
criterion_main!(benches);
