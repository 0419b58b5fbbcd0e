use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use theme_viewer::api;
use theme_viewer::preview::{self, ColorClick, Role};
use theme_viewer::theme::{Group, ThemeStore};
use theme_viewer::{WorkspacePaths, WriteMode};

struct Workspace {
    root: PathBuf,
}

impl Workspace {
    fn new(label: &str) -> Self {
        let mut root = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        root.push(format!(
            "theme-viewer-it-{label}-{}-{nanos}",
            std::process::id()
        ));
        fs::create_dir_all(root.join("presets")).unwrap();
        Self { root }
    }

    fn write(&self, relative: &str, contents: &str) {
        fs::write(self.root.join(relative), contents).unwrap();
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).unwrap()
    }

    fn paths(&self) -> WorkspacePaths {
        WorkspacePaths::under_root(&self.root)
    }

    fn path(&self) -> &Path {
        &self.root
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

const STORE: &str = r##"{
  "version": 2,
  "themes": {
    "dark": {
      "background": { "primary": "#002b36", "overlay": "#073642" },
      "foreground": { "primary": "#839496" },
      "semantic": { "keyword": "#859900", "string": "#2aa198", "type": "#b58900" }
    },
    "light": {
      "background": { "primary": "#fdf6e3" },
      "foreground": { "primary": "#657b83" },
      "semantic": { "keyword": "#859900" }
    }
  }
}"##;

const SOLARIZED: &str = r##"{
  "name": "Solarized",
  "description": "Precision colors for machines and people",
  "semantic": { "keyword": "#268bd2", "class": "#cb4b16", "tag": "#d33682" }
}"##;

#[test]
fn listing_then_applying_updates_only_the_target_mode() {
    let workspace = Workspace::new("apply");
    workspace.write("colors.json", STORE);
    workspace.write("presets/solarized.json", SOLARIZED);
    workspace.write("presets/README.md", "not a preset");

    let listing = api::list_presets(&workspace.paths());
    assert_eq!(listing.status, 200);
    assert_eq!(
        listing.body,
        json!([{
            "id": "solarized",
            "name": "Solarized",
            "description": "Precision colors for machines and people"
        }])
    );

    let response = api::apply_preset(
        &workspace.paths(),
        r#"{ "presetId": "solarized", "mode": "dark" }"#,
    );
    assert_eq!(response.status, 200);
    assert_eq!(response.body["success"], true);
    assert_eq!(
        response.body["message"],
        "Applied preset \"Solarized\" to dark theme"
    );

    let written: Value = serde_json::from_str(&workspace.read("colors.json")).unwrap();
    assert_eq!(written["version"], 2);
    let dark = &written["themes"]["dark"]["semantic"];
    assert_eq!(dark["keyword"], "#268bd2");
    assert_eq!(dark["class"], "#cb4b16");
    assert_eq!(dark["tag"], "#d33682");
    assert_eq!(dark["string"], "#2aa198");
    assert_eq!(written["themes"]["light"]["semantic"], json!({ "keyword": "#859900" }));
    assert_eq!(written["themes"]["dark"]["background"]["overlay"], "#073642");
}

#[test]
fn applied_colors_flow_into_the_preview() {
    let workspace = Workspace::new("preview");
    workspace.write("colors.json", STORE);
    workspace.write("presets/solarized.json", SOLARIZED);

    let store = ThemeStore::new(workspace.path().join("colors.json"));
    let before = preview::render(&store.load_mode("dark").unwrap(), Default::default());
    let class_before = first_click(&before, "Item");
    assert_eq!(class_before.name, "class");
    assert_eq!(class_before.color.as_deref(), Some("#b58900"));

    let paths = workspace.paths().with_write_mode(WriteMode::Atomic);
    let response = api::apply_preset(&paths, r#"{ "presetId": "solarized", "mode": "dark" }"#);
    assert!(response.is_success());

    let theme = store.load_mode("dark").unwrap();
    let after = preview::render(&theme, Default::default());
    let class_after = first_click(&after, "Item");
    assert_eq!(class_after.group, Group::Semantic);
    assert_eq!(class_after.color.as_deref(), Some("#cb4b16"));
    assert_eq!(
        Role::Keyword.click(&theme).color.as_deref(),
        Some("#268bd2")
    );
}

#[test]
fn failed_applies_leave_the_store_untouched() {
    let workspace = Workspace::new("failures");
    workspace.write("colors.json", STORE);
    workspace.write("presets/solarized.json", SOLARIZED);
    workspace.write("presets/broken.json", "{ nope");
    workspace.write(
        "presets/numeric.json",
        r##"{ "name": "Numeric", "semantic": { "keyword": 5 } }"##,
    );
    workspace.write("presets/unstyled.json", r##"{ "name": "Unstyled" }"##);
    workspace.write(
        "presets/listed.json",
        r##"{ "name": "Listed", "semantic": ["#ff0000"] }"##,
    );

    let cases = [
        (r#"{ "presetId": "missing", "mode": "dark" }"#, 404, "not_found"),
        (r#"{ "presetId": "solarized", "mode": "sepia" }"#, 404, "not_found"),
        (r#"{ "presetId": "../colors", "mode": "dark" }"#, 400, "client_input"),
        (r#"{ "presetId": "broken", "mode": "dark" }"#, 500, "parse"),
        (r#"{ "presetId": "numeric", "mode": "dark" }"#, 500, "parse"),
        (r#"{ "presetId": "unstyled", "mode": "dark" }"#, 500, "parse"),
        (r#"{ "presetId": "listed", "mode": "dark" }"#, 500, "parse"),
        (r#"{ "presetId": "solarized", "mode": "version" }"#, 404, "not_found"),
        (r#"{ "mode": "dark" }"#, 400, "client_input"),
    ];
    for (body, status, category) in cases {
        let response = api::apply_preset(&workspace.paths(), body);
        assert_eq!(response.status, status, "request {body}");
        assert_eq!(response.body["category"], category, "request {body}");
        assert_eq!(workspace.read("colors.json"), STORE, "request {body}");
    }
}

#[test]
fn unreadable_collection_fails_as_a_whole() {
    let workspace = Workspace::new("collection");
    workspace.write("colors.json", STORE);
    workspace.write("presets/solarized.json", SOLARIZED);
    workspace.write("presets/broken.json", "[1, 2");

    let response = api::list_presets(&workspace.paths());
    assert_eq!(response.status, 500);
    assert_eq!(
        response.body,
        json!({ "error": "Failed to read presets", "category": "collection_read" })
    );
}

fn first_click(rendered: &preview::RenderedPreview, text: &str) -> ColorClick {
    rendered
        .lines
        .iter()
        .flat_map(|line| line.spans.iter())
        .find(|span| span.text == text)
        .and_then(|span| span.click.clone())
        .unwrap_or_else(|| panic!("no clickable span {text}"))
}
