//! Configuration for backend selection, CDN addressing, and metadata keys.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! layered on top of stock defaults, so a config file only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [images]
//! default_size = "full"      # Logical size resolved when none is requested
//!
//! [images.sizes.poster]      # Pixel box per logical size (responsive resizer)
//! width = 1200
//! height = 800
//! crop = true
//!
//! [cdn]
//! enabled = false
//! cloud_name = ""
//! auto_mapping_folder = ""
//! upload_url = ""            # Local upload base URL
//! urls = ["https://res.cloudinary.com"]
//!
//! [cdn.transformations]      # Applied to CDN URLs resolved for `src`
//! quality = "auto"
//!
//! [resizer]
//! enabled = false
//!
//! [metadata]
//! alt_key = "image_alt"
//! focal_point_key = "focal_point"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::cdn::DEFAULT_CDN_DOMAIN;
use crate::transform::TransformOptions;
use crate::types::{SizeBox, SizeRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttrsConfig {
    /// Logical sizes and the default size.
    pub images: ImagesConfig,
    /// CDN backend and URL rewriting.
    pub cdn: CdnConfig,
    /// Responsive-sizing backend.
    pub resizer: ResizerConfig,
    /// Metadata keys read from the asset store.
    pub metadata: MetadataConfig,
}

impl AttrsConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.default_size.trim().is_empty() {
            return Err(ConfigError::Validation(
                "images.default_size must not be empty".into(),
            ));
        }
        for (name, size) in &self.images.sizes {
            if size.width == 0 || size.height == 0 {
                return Err(ConfigError::Validation(format!(
                    "images.sizes.{name} width and height must be non-zero"
                )));
            }
        }
        if self.cdn.enabled {
            if self.cdn.cloud_name.is_empty() {
                return Err(ConfigError::Validation(
                    "cdn.cloud_name is required when cdn.enabled".into(),
                ));
            }
            if self.cdn.upload_url.is_empty() {
                return Err(ConfigError::Validation(
                    "cdn.upload_url is required when cdn.enabled".into(),
                ));
            }
        }
        if self.cdn.urls.iter().any(|u| u.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "cdn.urls entries must not be empty".into(),
            ));
        }
        if self.metadata.alt_key.is_empty() || self.metadata.focal_point_key.is_empty() {
            return Err(ConfigError::Validation(
                "metadata keys must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Logical image sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Size resolved for assets that don't ask for one.
    pub default_size: String,
    /// Pixel box per logical size name.
    pub sizes: BTreeMap<String, SizeConfig>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            default_size: "full".to_string(),
            sizes: BTreeMap::new(),
        }
    }
}

impl ImagesConfig {
    /// Build the request for a named size, attaching its pixel box if configured.
    pub fn size_request(&self, name: &str) -> SizeRequest {
        SizeRequest {
            name: name.to_string(),
            target: self.sizes.get(name).map(SizeConfig::to_box),
        }
    }
}

/// Pixel dimensions for one logical size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeConfig {
    pub width: u32,
    pub height: u32,
    /// Hard-crop to the exact box. The resizer crops unless told otherwise.
    #[serde(default = "default_crop")]
    pub crop: bool,
}

fn default_crop() -> bool {
    true
}

impl SizeConfig {
    pub fn to_box(&self) -> SizeBox {
        SizeBox {
            width: self.width,
            height: self.height,
            crop: self.crop,
        }
    }
}

/// CDN addressing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CdnConfig {
    /// Whether the CDN backend takes part in resolution.
    pub enabled: bool,
    /// Cloud (account) name, the first path segment on the CDN.
    pub cloud_name: String,
    /// CDN folder mapped onto the local upload directory.
    pub auto_mapping_folder: String,
    /// Local upload base URL. Only URLs under it are rewritten.
    pub upload_url: String,
    /// Candidate CDN domains. The first one is used.
    pub urls: Vec<String>,
    /// Transformation options applied when resolving `src` through the CDN.
    pub transformations: TransformOptions,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cloud_name: String::new(),
            auto_mapping_folder: String::new(),
            upload_url: String::new(),
            urls: vec![DEFAULT_CDN_DOMAIN.to_string()],
            transformations: TransformOptions::new(),
        }
    }
}

/// Responsive-sizing backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizerConfig {
    pub enabled: bool,
}

/// Metadata keys read from the asset store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataConfig {
    /// Key holding the alt text.
    pub alt_key: String,
    /// Key holding the `[x, y]` focal point, each in `0..=1`.
    pub focal_point_key: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            alt_key: "image_alt".to_string(),
            focal_point_key: "focal_point".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a TOML table, the bottom layer of every merge.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AttrsConfig::default()).expect("default config must serialize")
}

/// Tables that hold a single value rather than a config section. The user's
/// table replaces the default whole, keeping the user's key order.
const OPAQUE_TABLES: &[&str] = &["cdn.transformations"];

/// Lay `overlay` over `base`: sections merge per key, anything else in
/// `overlay` wins outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    merge_at("", base, overlay)
}

fn merge_at(path: &str, base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut section), toml::Value::Table(layer))
            if !OPAQUE_TABLES.contains(&path) =>
        {
            for (key, value) in layer {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let value = match section.remove(&key) {
                    Some(default) => merge_at(&child, default, value),
                    None => value,
                };
                section.insert(key, value);
            }
            toml::Value::Table(section)
        }
        (_, overlay) => overlay,
    }
}

/// Parse `<dir>/config.toml`, or `None` when the directory has none.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    match fs::read_to_string(dir.join("config.toml")) {
        Ok(content) => Ok(Some(toml::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Apply the user layer, if any, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AttrsConfig, ConfigError> {
    let config: AttrsConfig = overlay.into_iter().fold(base, merge_toml).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, over stock defaults.
pub fn load_config(dir: &Path) -> Result<AttrsConfig, ConfigError> {
    let config = resolve_config(stock_defaults_value(), load_raw_config(dir)?)?;
    tracing::debug!(
        cdn = config.cdn.enabled,
        resizer = config.resizer.enabled,
        sizes = config.images.sizes.len(),
        "loaded config"
    );
    Ok(config)
}

/// A fully-commented stock `config.toml`. Printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# image-attrs configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Logical sizes
# ---------------------------------------------------------------------------
[images]
# Size resolved for assets that don't request one.
default_size = "full"

# Pixel box per logical size, used by the responsive resizer backend.
# Sizes without a box skip that backend.
# [images.sizes.poster]
# width = 1200
# height = 800
# crop = true

# ---------------------------------------------------------------------------
# CDN backend
# ---------------------------------------------------------------------------
[cdn]
enabled = false

# Account name, the first path segment of every CDN URL.
cloud_name = ""

# CDN folder auto-mapped onto the local upload directory.
auto_mapping_folder = ""

# Local upload base URL. Only URLs under it are rewritten.
upload_url = ""

# Candidate CDN domains; the first is used.
urls = ["https://res.cloudinary.com"]

# Transformations applied to CDN URLs resolved for `src`, in order.
[cdn.transformations]
# quality = "auto"
# fetch_format = "auto"

# ---------------------------------------------------------------------------
# Responsive resizer backend
# ---------------------------------------------------------------------------
[resizer]
enabled = false

# ---------------------------------------------------------------------------
# Metadata keys
# ---------------------------------------------------------------------------
[metadata]
alt_key = "image_alt"
focal_point_key = "focal_point"
"##
}
