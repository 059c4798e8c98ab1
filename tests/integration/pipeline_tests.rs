//! Integration tests for the SearchUnused pipeline
//!
//! These tests build small project trees on disk and run the complete
//! corpus -> resolution -> report pipeline against them.

use indicatif::ProgressBar;
use searchunused::config::Config;
use searchunused::corpus::{CorpusBuilder, Passes};
use searchunused::patterns::SymbolExclusions;
use searchunused::report::Report;
use searchunused::resolve::{AssetResolver, SymbolResolver};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Run the whole pipeline on a project root
fn scan_with(root: &Path, config: &Config) -> Report {
    let corpus = CorpusBuilder::new(config)
        .with_passes(Passes::all())
        .build(root)
        .expect("scan should succeed");

    let assets = AssetResolver::new(&corpus.search).resolve_all(&corpus.assets);
    let exclusions = SymbolExclusions::new(&config.symbols);
    let symbols = SymbolResolver::new(&corpus.search, &exclusions)
        .resolve_all(&corpus.symbols, &ProgressBar::hidden());

    Report::build(&corpus, &assets, &symbols, config)
}

fn scan(root: &Path) -> Report {
    scan_with(root, &Config::default())
}

fn asset_names(report: &Report) -> Vec<&str> {
    report.unreferenced_assets.iter().map(|a| a.name.as_str()).collect()
}

fn symbol_names(report: &Report) -> Vec<&str> {
    report.unreferenced_symbols.iter().map(|s| s.name.as_str()).collect()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_unreferenced_imageset_reported_with_bundle_path() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Assets/a.imageset/a.png", "");
    write(temp.path(), "App.swift", "let title = \"hello\"");

    let report = scan(temp.path());

    assert_eq!(asset_names(&report), vec!["a"]);
    assert_eq!(
        report.unreferenced_assets[0].location.as_deref(),
        Some("Assets/a.imageset")
    );
}

#[test]
fn test_symbol_used_in_other_file_is_referenced() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Foo.swift", "class Bar {}");
    write(temp.path(), "Baz.swift", "let x = Bar()");

    let report = scan(temp.path());

    assert!(symbol_names(&report).is_empty());
}

#[test]
fn test_symbol_used_only_in_own_file_is_reported() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "Foo.swift",
        "class Bar {}\nfunc make() -> Bar { return Bar() }\nlet kind = Bar.self",
    );

    let report = scan(temp.path());

    assert_eq!(symbol_names(&report), vec!["Bar"]);
    assert_eq!(report.unreferenced_symbols[0].file, "Foo.swift");
}

#[test]
fn test_framework_and_builtin_names_never_reported() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "Extensions.swift",
        "class NSObjectHelper {}\nclass UIColorPalette {}\nstruct CGPointBox {}\nenum Result {}\nstruct Date {}",
    );

    let report = scan(temp.path());

    assert!(symbol_names(&report).is_empty());
    assert_eq!(report.summary.symbols_declared, 5);
    assert_eq!(report.summary.symbols_checked, 0);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_quoted_reference_never_missed() {
    let temp = TempDir::new().unwrap();
    for name in ["close", "btn_back", "Logo Dark", "icon-24"] {
        write(temp.path(), &format!("Images/{}.png", name), "");
    }
    write(
        temp.path(),
        "Usage.swift",
        r#"let a = "close"; let b = "btn_back"; let c = "Logo Dark"; let d = "icon-24""#,
    );

    let report = scan(temp.path());

    assert!(asset_names(&report).is_empty());
}

#[test]
fn test_markup_name_attribute_reference() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Assets.xcassets/splash.imageset/splash.png", "");
    write(
        temp.path(),
        "Base.lproj/Launch.storyboard",
        "<resources><image name=\"splash\" width=\"320\" height=\"480\"/></resources>",
    );

    let report = scan(temp.path());

    assert!(asset_names(&report).is_empty());
}

#[test]
fn test_collision_count_is_two_for_two_files() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Assets.xcassets/icon.imageset/icon.png", "");
    write(temp.path(), "Legacy/icon.png", "");

    let report = scan(temp.path());

    assert_eq!(report.asset_collisions.len(), 1);
    assert_eq!(report.asset_collisions[0].name, "icon");
    assert_eq!(report.asset_collisions[0].count, 2);
    // Both files register the same logical name, which is reported once
    assert_eq!(asset_names(&report), vec!["icon"]);
    assert_eq!(report.summary.asset_names, 1);
}

#[test]
fn test_excluded_paths_contribute_nothing() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Pods/SDK/Helper.swift", "class SDKHelper {}\nlet i = \"orphan\"\nlet s = Orphan()");
    write(temp.path(), "Pods/SDK/sdk_logo.png", "");
    write(temp.path(), "BUILD/Generated.swift", "class Generated {}");
    write(temp.path(), "App/orphan.png", "");
    write(temp.path(), "App/Orphan.swift", "class Orphan {}");

    let report = scan(temp.path());

    assert_eq!(asset_names(&report), vec!["orphan"]);
    assert_eq!(symbol_names(&report), vec!["Orphan"]);
    assert_eq!(report.summary.source_files, 1);
    assert_eq!(report.summary.image_files, 1);
}

#[test]
fn test_separator_prefixed_exclusion_matches_top_level_directory() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Vendor/Lib.swift", "class VendorThing {}");
    write(temp.path(), "App/A.swift", "class A {}");

    let mut config = Config::default();
    config.exclude = vec!["/vendor/".to_string()];
    let report = scan_with(temp.path(), &config);

    assert_eq!(symbol_names(&report), vec!["A"]);
    assert_eq!(report.summary.source_files, 1);
}

#[test]
fn test_runs_are_deterministic() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "z.png", "");
    write(temp.path(), "m.png", "");
    write(temp.path(), "a.png", "");
    write(temp.path(), "Zed.swift", "class Zed {}");
    write(temp.path(), "Alpha.swift", "class Alpha {}\nstruct Mid {}");

    let first = scan(temp.path());
    let second = scan(temp.path());

    assert_eq!(first.unreferenced_assets, second.unreferenced_assets);
    assert_eq!(first.unreferenced_symbols, second.unreferenced_symbols);
    assert_eq!(asset_names(&first), vec!["a", "m", "z"]);
    assert_eq!(symbol_names(&first), vec!["Alpha", "Mid", "Zed"]);
}

#[test]
fn test_storyboard_custom_class_marks_type_referenced() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Login/LoginViewController.swift", "final class LoginViewController: UIViewController {}");
    write(
        temp.path(),
        "Main.storyboard",
        "<viewController id=\"x1\" customClass=\"LoginViewController\" customModule=\"App\"/>",
    );

    let report = scan(temp.path());

    assert!(symbol_names(&report).is_empty());
}

#[test]
fn test_duplicate_declarations_reported_as_collisions() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "A/Theme.swift", "struct Theme {}");
    write(temp.path(), "B/Theme.swift", "struct Theme {}");

    let report = scan(temp.path());

    assert_eq!(report.symbol_collisions.len(), 1);
    assert_eq!(report.symbol_collisions[0].name, "Theme");
    // Last write wins in walk order
    assert_eq!(report.symbol_collisions[0].kept, "B/Theme.swift");
    assert_eq!(report.symbol_collisions[0].shadowed, vec!["A/Theme.swift".to_string()]);
}

#[test]
fn test_unreadable_file_does_not_abort_scan() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Binary.swift"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
    write(temp.path(), "Good.swift", "class Good {}");

    let report = scan(temp.path());

    assert_eq!(symbol_names(&report), vec!["Good"]);
    assert_eq!(report.summary.source_files, 2);
}

#[test]
fn test_retain_patterns_hide_names() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Cells.swift", "class ProfileCell {}\nclass Orphan {}");
    write(temp.path(), "legacy_banner.png", "");

    let mut config = Config::default();
    config.retain_patterns = vec!["*Cell".to_string(), "legacy_*".to_string()];
    let report = scan_with(temp.path(), &config);

    assert_eq!(symbol_names(&report), vec!["Orphan"]);
    assert!(asset_names(&report).is_empty());
}

#[test]
fn test_custom_extensions_from_config() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Sources/Widget.swift", "class Widget {}");
    write(temp.path(), "Resources/Form.nib.xml", "<object customClass=\"Widget\"/>");

    let mut config = Config::default();
    config.files.markup_extensions.push("xml".to_string());
    let report = scan_with(temp.path(), &config);

    assert!(symbol_names(&report).is_empty());
}
