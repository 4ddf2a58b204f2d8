mod common;

use common::fixtures::{FOO_URL, font_table};
use common::{TestResult, count_faces, init_logger};
use fontless::{
    BuildConfig, ChunkInfo, FontFaceData, FontlessConfig, FontlessPlugin, OutputAsset, PassthroughMinifier,
    PreloadRegistry, RewriteError,
};
use std::io::Write;
use std::sync::Arc;

fn plugin(dev: bool) -> Result<FontlessPlugin, RewriteError> {
    FontlessPlugin::builder()
        .with_dev(dev)
        .with_resolver(Arc::new(font_table()))
        .with_preload_policy(Arc::new(|_family: &str, _face: &FontFaceData| true))
        .build()
}

#[tokio::test]
async fn test_transform_only_touches_stylesheets() -> TestResult {
    init_logger();
    let plugin = plugin(true)?;
    let css = "a{font-family:Foo}";

    let rewritten = plugin.transform(css, "/src/app.css").await?;
    assert!(rewritten.is_some_and(|out| out.ends_with("a{font-family:Foo, \"Foo Fallback: Arial\"}")));

    assert_eq!(plugin.transform(css, "/src/app.css?raw").await?, None);
    assert_eq!(plugin.transform(css, "/src/main.ts").await?, None);
    assert_eq!(plugin.transform("a{color:red}", "/src/plain.css").await?, None);
    Ok(())
}

#[tokio::test]
async fn test_transform_keeps_root_absolute_urls() -> TestResult {
    let plugin = plugin(true)?;

    let out = plugin.transform("a{font-family:Foo}", "/src/deep/nested/app.css").await?;

    assert!(out.is_some_and(|out| out.contains("url(\"/_fonts/foo.woff2\")")));
    Ok(())
}

#[tokio::test]
async fn test_generate_bundle_rewrites_changed_css_assets() -> TestResult {
    let plugin = plugin(true)?;
    let mut assets = vec![
        OutputAsset::new("assets/css/index.css", "a{font-family:Foo}"),
        OutputAsset::new("assets/plain.css", "a{color:red}"),
        OutputAsset::new("assets/index.js", "const a = 'font-family:Foo';"),
    ];

    let rewritten = plugin.generate_bundle(&mut assets).await?;

    assert_eq!(rewritten, 1);
    assert!(assets[0].source.contains("url(\"../../_fonts/foo.woff2\")"));
    assert_eq!(assets[1].source, "a{color:red}");
    assert_eq!(assets[2].source, "const a = 'font-family:Foo';");
    assert_eq!(plugin.preload_urls("assets/css/index.css"), vec![FOO_URL]);
    Ok(())
}

#[tokio::test]
async fn test_generate_bundle_aborts_on_invalid_css() -> TestResult {
    let plugin = plugin(true)?;
    let mut assets = vec![OutputAsset::new("broken.css", "a{font-family:Foo")];

    let result = plugin.generate_bundle(&mut assets).await;

    assert!(matches!(result, Err(RewriteError::Parse(_))));
    assert_eq!(assets[0].source, "a{font-family:Foo");
    Ok(())
}

#[tokio::test]
async fn test_render_chunk_moves_preloads_to_facade() -> TestResult {
    let plugin = plugin(true)?;
    plugin.transform("a{font-family:Foo}", "/src/a.css").await?;

    let chunk = ChunkInfo {
        facade_module_id: Some("/src/main.ts".to_string()),
        module_ids: vec!["/src/a.css".to_string(), "/src/b.css".to_string()],
    };
    assert_eq!(plugin.render_chunk(&chunk), 1);
    assert_eq!(plugin.preload_urls("/src/main.ts"), vec![FOO_URL]);
    assert_eq!(plugin.render_chunk(&chunk), 0);

    let orphan = ChunkInfo { facade_module_id: None, module_ids: vec!["/src/a.css".to_string()] };
    assert_eq!(plugin.render_chunk(&orphan), 0);
    Ok(())
}

#[tokio::test]
async fn test_shared_registry() -> TestResult {
    let registry = Arc::new(PreloadRegistry::new());
    let plugin = FontlessPlugin::builder()
        .with_dev(true)
        .with_resolver(Arc::new(font_table()))
        .with_preload_policy(Arc::new(|family: &str, _face: &FontFaceData| family == "Foo"))
        .with_registry(Arc::clone(&registry))
        .build()?;

    plugin.transform("a{font-family:Foo}", "/src/a.css").await?;

    assert_eq!(registry.urls_for("/src/a.css"), vec![FOO_URL]);
    Ok(())
}

#[tokio::test]
async fn test_config_resolved_is_captured_once() -> TestResult {
    let plugin = FontlessPlugin::builder()
        .with_resolver(Arc::new(font_table()))
        .with_minifier(Arc::new(PassthroughMinifier))
        .build()?;
    assert!(plugin.minify_config().is_some());

    plugin.config_resolved(&BuildConfig { css_targets: vec![], minify: false });
    plugin.config_resolved(&BuildConfig { css_targets: vec!["chrome 100".to_string()], minify: true });

    assert!(plugin.minify_config().is_none());
    let out = plugin.transform("a{font-family:Foo}", "/src/a.css").await?;
    assert!(out.is_some_and(|out| out.starts_with("@font-face {\n") && !out.contains("}\n@font-face")));
    Ok(())
}

#[tokio::test]
async fn test_config_resolved_targets() -> TestResult {
    let plugin = plugin(false)?;

    plugin.config_resolved(&BuildConfig { css_targets: vec!["chrome 100".to_string()], minify: true });

    let minify = plugin.minify_config().ok_or("minify config missing")?;
    assert_eq!(minify.targets, vec!["chrome 100"]);
    let out = plugin.transform("a{font-family:Foo}", "/src/a.css").await?.ok_or("unchanged")?;
    assert!(out.starts_with("@font-face{"));
    Ok(())
}

#[tokio::test]
async fn test_dev_mode_ignores_host_minify_settings() -> TestResult {
    let plugin = plugin(true)?;

    plugin.config_resolved(&BuildConfig { css_targets: vec![], minify: true });

    assert!(plugin.minify_config().is_none());
    let out = plugin.transform("a{font-family:Foo}", "/src/a.css").await?.ok_or("unchanged")?;
    assert!(out.contains("}\n@font-face {\n"));
    assert_eq!(count_faces(&out, "Foo"), 1);
    Ok(())
}

#[tokio::test]
async fn test_builder_from_config_file() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, r#"{{ "dev": true, "processCssVariables": true, "fallbacks": {{ "serif": ["Georgia"] }} }}"#)?;

    let plugin = FontlessPlugin::builder()
        .with_config_file(file.path())?
        .with_resolver(Arc::new(font_table()))
        .build()?;

    assert!(plugin.config().dev);
    let out = plugin
        .transform(":root{--body: Foo, serif}", "/src/vars.css")
        .await?
        .ok_or("unchanged")?;
    assert!(out.ends_with(":root{--body: Foo, serif}"));
    Ok(())
}

#[test]
fn test_config_fallbacks_feed_the_in_memory_resolver() -> TestResult {
    let config = FontlessConfig::from_json(r#"{ "fallbacks": { "serif": ["Georgia"] } }"#)?;
    let resolver = config.configure_resolver(fontless::InMemoryFontResolver::new())?;
    resolver.register("Qux", fontless::ResolvedFontFamily::new(vec![]))?;

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let resolved = runtime.block_on(async {
        use fontless::FontResolver;
        resolver
            .resolve(
                "Qux",
                &fontless::ResolveOptions { fallbacks: vec![], generic: Some(fontless::GenericFamily::Serif) },
            )
            .await
    })?;

    assert_eq!(resolved.map(|r| r.fallbacks), Some(vec!["Georgia".to_string()]));
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let result = FontlessPlugin::builder().with_config_file("/definitely/not/here.json");
    assert!(matches!(result, Err(RewriteError::Io(_))));
}
