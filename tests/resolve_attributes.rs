//! End-to-end resolution from a config directory and a JSON asset store.
//!
//! Each test writes `config.toml` and `assets.json` into a temp dir, loads
//! them the way the CLI does, and checks the resolved attributes.

use image_attrs::MediaLibrary;
use image_attrs::backend::{MemoryStore, Tier};
use image_attrs::config;
use image_attrs::types::{AssetId, Orientation};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const ASSETS: &str = r#"{
  "assets": {
    "42": {
      "title": "Harbour",
      "mime_type": "image/jpeg",
      "url": "https://site/uploads/2024/pic.jpg",
      "meta": { "focal_point": [0.25, 0.75], "image_alt": "Boats" },
      "renditions": {
        "full": { "src": "https://site/uploads/2024/pic.jpg", "width": 800, "height": 600 }
      },
      "variants": [
        { "width": 300, "height": 300,
          "rendition": { "src": "https://site/fly/pic-300x300.jpg", "width": 300, "height": 300 } }
      ]
    },
    "43": {
      "url": "https://elsewhere/pic.jpg",
      "renditions": {
        "full": { "src": "https://elsewhere/pic.jpg", "width": 400, "height": 900 }
      }
    }
  },
  "featured": { "7": 42 }
}"#;

fn setup(config_toml: &str) -> (TempDir, MediaLibrary) {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), config_toml).unwrap();
    fs::write(tmp.path().join("assets.json"), ASSETS).unwrap();
    let library = load(tmp.path());
    (tmp, library)
}

fn load(dir: &Path) -> MediaLibrary {
    let config = config::load_config(dir).unwrap();
    let store = Arc::new(MemoryStore::load(&dir.join("assets.json")).unwrap());
    MediaLibrary::from_config(&config, store)
}

const CDN_CONFIG: &str = r#"
[cdn]
enabled = true
cloud_name = "demo"
auto_mapping_folder = "app"
upload_url = "https://site/uploads"

[cdn.transformations]
width = 100
height = 200
"#;

// =========================================================================
// Native only
// =========================================================================

#[test]
fn native_only_resolution() {
    let (_tmp, library) = setup("");
    assert_eq!(library.resolver().tiers(), vec![Tier::Native]);

    let image = library.image(AssetId(42));
    assert_eq!(image.src(), Some("https://site/uploads/2024/pic.jpg"));
    assert_eq!(image.width(), Some(800));
    assert_eq!(image.height(), Some(600));
    assert_eq!(image.orientation(), Some(Orientation::Landscape));
    assert_eq!(image.name(), Some("Harbour"));
    assert_eq!(image.alt(), Some("Boats"));
    assert_eq!(image.focal_point().bg_pos, "25%75%");
}

#[test]
fn unknown_asset_has_no_rendition() {
    let (_tmp, library) = setup("");
    let attrs = library.image(AssetId(1)).attributes();
    assert_eq!(attrs.src, None);
    assert_eq!(attrs.width, None);
    assert_eq!(attrs.orientation, None);
    assert_eq!(attrs.focal_point.bg_pos, "50%50%");
}

#[test]
fn missing_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("assets.json"), ASSETS).unwrap();
    let library = load(tmp.path());
    assert_eq!(
        library.image(AssetId(43)).orientation(),
        Some(Orientation::Portrait)
    );
}

// =========================================================================
// CDN
// =========================================================================

#[test]
fn cdn_rewrites_src_with_transformations() {
    let (_tmp, library) = setup(CDN_CONFIG);
    let image = library.image(AssetId(42));
    assert_eq!(
        image.src(),
        Some("https://res.cloudinary.com/demo/w_100,h_200/app/2024/pic.jpg")
    );
    // Dimensions still come from native storage.
    assert_eq!(image.width(), Some(800));
    assert_eq!(image.height(), Some(600));
    assert_eq!(image.original_src(), Some("https://site/uploads/2024/pic.jpg"));
}

#[test]
fn cdn_falls_through_outside_upload_base() {
    let (_tmp, library) = setup(CDN_CONFIG);
    let image = library.image(AssetId(43));
    assert_eq!(image.src(), Some("https://elsewhere/pic.jpg"));
    assert_eq!(image.width(), Some(400));
}

// =========================================================================
// Resizer and featured image
// =========================================================================

#[test]
fn resizer_serves_configured_size() {
    let (_tmp, library) = setup(
        r#"
[images.sizes.thumb]
width = 300
height = 300

[resizer]
enabled = true
"#,
    );
    let thumb = library.image_sized(AssetId(42), "thumb");
    assert_eq!(thumb.src(), Some("https://site/fly/pic-300x300.jpg"));
    assert_eq!(thumb.orientation(), Some(Orientation::Square));
}

#[test]
fn featured_image_of_owner() {
    let (_tmp, library) = setup("");
    let featured = library.featured_image(AssetId(7)).unwrap();
    assert_eq!(featured.id(), AssetId(42));
    assert_eq!(featured.width(), Some(800));
    assert!(library.featured_image(AssetId(42)).is_none());
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[cdn]\nenabled = true\n").unwrap();
    assert!(config::load_config(tmp.path()).is_err());
}
