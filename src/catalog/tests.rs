use super::*;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!("huefinder_{label}_{nanos}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

const TOML_CATALOG: &str = r##"
key = "classic-tee"

[[colors]]
hex = "#ff0000"
name = "Red"
family = "Red"

[[colors]]
hex = "abc"
name = "Ice Grey"
family = "Grey"
tags = ["heather", "heather"]

[[colors]]
rgb = [300, 128, -4]
name = "Clamped Orange"

[[colors]]
hex = "nothex"
name = "Broken"

[[colors]]
name = "No Color"
"##;

const JSON_CATALOG: &str = r##"[
    {"hex": "#FFFFFF", "name": "White", "family": "Neutral"},
    {"hex": "#000000", "name": "Black", "family": "Neutral", "tags": ["antique"]}
]"##;

const CSV_CATALOG: &str = "\
hex,name,family,tags
#1E3A5F, Navy ,Blue,heather; antique
,Partial,,
#00FF00,,Green,
";

#[test]
fn parses_toml_with_warnings() {
    let outcome = parse_catalog(TOML_CATALOG, CatalogFormat::Toml, Some("fallback"))
        .expect("parse toml");
    let catalog = outcome.catalog;
    assert_eq!(catalog.key(), Some("classic-tee"));
    assert_eq!(catalog.len(), 3);
    let hexes: Vec<&str> = catalog.iter().map(ColorEntry::hex).collect();
    assert_eq!(hexes, vec!["#FF0000", "#AABBCC", "#FF8000"]);
    assert_eq!(catalog.entries()[1].tags(), ["heather".to_string()]);
    assert_eq!(
        outcome.warnings,
        vec![
            CatalogWarning::InvalidHex {
                row: 4,
                value: "nothex".to_string(),
            },
            CatalogWarning::MissingColor { row: 5 },
        ]
    );
}

#[test]
fn parses_json_array_and_uses_default_key() {
    let outcome =
        parse_catalog(JSON_CATALOG, CatalogFormat::Json, Some("basics")).expect("parse json");
    assert_eq!(outcome.catalog.key(), Some("basics"));
    assert_eq!(outcome.catalog.len(), 2);
    assert!(outcome.catalog.entries()[1].has_tag("antique"));
    assert!(outcome.warnings.is_empty());
}

#[test]
fn parses_json_document() {
    let text = r##"{"key": "doc", "colors": [{"hex": "#123456"}]}"##;
    let outcome = parse_catalog(text, CatalogFormat::Json, None).expect("parse json");
    assert_eq!(outcome.catalog.key(), Some("doc"));
    assert_eq!(outcome.catalog.entries()[0].name(), None);
}

#[test]
fn parses_csv_rows() {
    let outcome = parse_catalog(CSV_CATALOG, CatalogFormat::Csv, None).expect("parse csv");
    let catalog = outcome.catalog;
    assert_eq!(catalog.len(), 2);
    let navy = &catalog.entries()[0];
    assert_eq!(navy.name(), Some("Navy"));
    assert_eq!(navy.tags(), ["heather".to_string(), "antique".to_string()]);
    let green = &catalog.entries()[1];
    assert_eq!(green.name(), None);
    assert_eq!(green.family(), Some("Green"));
    assert!(green.tags().is_empty());
    assert_eq!(outcome.warnings, vec![CatalogWarning::MissingColor { row: 2 }]);
}

#[test]
fn csv_partial_channels_fall_back_to_black() {
    let text = "r,g,b,name\n255,,10,Half\n";
    let outcome = parse_catalog(text, CatalogFormat::Csv, None).expect("parse csv");
    assert_eq!(outcome.catalog.entries()[0].hex(), "#000000");
}

#[test]
fn malformed_documents_are_errors() {
    assert!(parse_catalog("colors = 5", CatalogFormat::Toml, None).is_err());
    assert!(parse_catalog("{not json", CatalogFormat::Json, None).is_err());
}

#[test]
fn load_catalog_uses_file_stem_as_key() {
    let dir = unique_temp_dir("load");
    let path = dir.join("basics.json");
    fs::write(&path, JSON_CATALOG).expect("write catalog");
    let outcome = load_catalog(&path).expect("load catalog");
    assert_eq!(outcome.format, CatalogFormat::Json);
    assert_eq!(outcome.catalog.key(), Some("basics"));
}

#[test]
fn load_catalog_rejects_unknown_extension() {
    let dir = unique_temp_dir("ext");
    let path = dir.join("colors.yaml");
    fs::write(&path, "- red").expect("write catalog");
    let err = load_catalog(&path).expect_err("unsupported extension");
    assert!(err.to_string().contains("Unsupported catalog file"));
}

#[test]
fn registry_loads_directory_by_stem() {
    let dir = unique_temp_dir("registry");
    fs::write(dir.join("tees.toml"), TOML_CATALOG).expect("write toml");
    fs::write(dir.join("basics.JSON"), JSON_CATALOG).expect("write json");
    fs::write(dir.join("notes.txt"), "ignored").expect("write txt");
    let registry = CatalogRegistry::load_dir(&dir).expect("load dir");
    let keys: Vec<&str> = registry.keys().collect();
    assert_eq!(keys, vec!["basics", "tees"]);
    let tees = registry.get("tees").expect("tees catalog");
    assert_eq!(tees.len(), 3);
    assert!(registry.get("notes").is_none());
}

#[test]
fn registry_rejects_empty_directory() {
    let dir = unique_temp_dir("empty");
    assert!(CatalogRegistry::load_dir(&dir).is_err());
}

#[test]
fn fingerprint_tracks_contents_not_key() {
    let entries = || {
        vec![
            ColorEntry::new("#FF0000").expect("valid hex").with_name("Red"),
            ColorEntry::new("#00FF00").expect("valid hex").with_tags(["heather"]),
        ]
    };
    let a = Catalog::new(entries());
    let b = Catalog::with_key("other", entries());
    assert_eq!(a.fingerprint(), b.fingerprint());

    let mut changed = entries();
    changed.swap(0, 1);
    assert_ne!(a.fingerprint(), Catalog::new(changed).fingerprint());

    let renamed = vec![
        ColorEntry::new("#FF0000").expect("valid hex").with_name("Red!"),
        ColorEntry::new("#00FF00").expect("valid hex").with_tags(["heather"]),
    ];
    assert_ne!(a.fingerprint(), Catalog::new(renamed).fingerprint());
}

#[test]
fn entry_normalizes_and_keeps_duplicates() {
    assert!(ColorEntry::new("#GGGGGG").is_none());
    let entry = ColorEntry::new("f0a")
        .expect("valid shorthand")
        .with_name("  ")
        .with_family("");
    assert_eq!(entry.hex(), "#FF00AA");
    assert_eq!(entry.name(), None);
    assert_eq!(entry.family(), None);
    assert_eq!(entry.label(), "#FF00AA");

    let catalog: Catalog = [entry.clone(), entry].into_iter().collect();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn padded_name_and_family_are_stored_trimmed() {
    let text = r##"
[[colors]]
hex = "#1E3A5F"
name = " Navy "
family = " Blue "
"##;
    let outcome = parse_catalog(text, CatalogFormat::Toml, None).expect("parse toml");
    let navy = &outcome.catalog.entries()[0];
    assert_eq!(navy.name(), Some("Navy"));
    assert_eq!(navy.family(), Some("Blue"));

    let blue = crate::search::SearchFilters::default().family("Blue");
    assert_eq!(crate::search::evaluate(&outcome.catalog, "", &blue).len(), 1);
    assert_eq!(crate::search::available_families(&outcome.catalog), vec!["Blue"]);
}
