//! In-memory asset store, loadable from a JSON file.
//!
//! Implements every boundary trait, so one store can back the record lookups
//! and all three delivery tiers. Used by the CLI (`--store assets.json`) and by
//! tests.
//!
//! ```json
//! {
//!   "assets": {
//!     "42": {
//!       "title": "Harbour at dusk",
//!       "mime_type": "image/jpeg",
//!       "url": "https://site/uploads/2024/harbour.jpg",
//!       "meta": { "focal_point": [0.3, 0.6], "image_alt": "Boats" },
//!       "renditions": { "full": { "src": "https://site/uploads/2024/harbour.jpg", "width": 2400, "height": 1600 } },
//!       "variants": [ { "width": 1200, "height": 800, "crop": true,
//!                       "rendition": { "src": "https://site/fly/harbour-1200x800.jpg", "width": 1200, "height": 800 } } ]
//!     }
//!   },
//!   "featured": { "7": 42 }
//! }
//! ```

use super::source::{AssetStore, BackendError, RenditionSource, SizedVariantSource};
use crate::types::{AssetId, Rendition, SizeBox};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One stored asset record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoredAsset {
    pub title: Option<String>,
    pub mime_type: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub permalink: Option<String>,
    /// Attachment URL of the uploaded original.
    pub url: Option<String>,
    pub meta: BTreeMap<String, serde_json::Value>,
    /// Registered renditions by size name.
    pub renditions: BTreeMap<String, Rendition>,
    /// Pre-generated variants the resizer can serve.
    pub variants: Vec<StoredVariant>,
}

/// A resizer variant and the box it was generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredVariant {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_crop")]
    pub crop: bool,
    pub rendition: Rendition,
}

fn default_crop() -> bool {
    true
}

/// Asset records keyed by id, plus owner → featured image links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryStore {
    pub assets: BTreeMap<AssetId, StoredAsset>,
    pub featured: BTreeMap<AssetId, AssetId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file.
    pub fn load(path: &Path) -> Result<Self, BackendError> {
        let content = std::fs::read_to_string(path)?;
        let store: Self = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            assets = store.assets.len(),
            "loaded asset store"
        );
        Ok(store)
    }

    pub fn insert(&mut self, id: AssetId, asset: StoredAsset) {
        self.assets.insert(id, asset);
    }

    pub fn set_featured(&mut self, owner: AssetId, image: AssetId) {
        self.featured.insert(owner, image);
    }

    pub fn get(&self, id: AssetId) -> Option<&StoredAsset> {
        self.assets.get(&id)
    }

    fn field(
        &self,
        id: AssetId,
        pick: impl FnOnce(&StoredAsset) -> &Option<String>,
    ) -> Option<String> {
        self.get(id).and_then(|a| pick(a).clone())
    }
}

impl AssetStore for MemoryStore {
    fn title(&self, id: AssetId) -> Option<String> {
        self.field(id, |a| &a.title)
    }

    fn mime_type(&self, id: AssetId) -> Option<String> {
        self.field(id, |a| &a.mime_type)
    }

    fn metadata(&self, id: AssetId, key: &str) -> Option<serde_json::Value> {
        self.get(id).and_then(|a| a.meta.get(key).cloned())
    }

    fn permalink(&self, id: AssetId) -> Option<String> {
        self.field(id, |a| &a.permalink)
    }

    fn excerpt(&self, id: AssetId) -> Option<String> {
        self.field(id, |a| &a.excerpt)
    }

    fn content(&self, id: AssetId) -> Option<String> {
        self.field(id, |a| &a.content)
    }

    fn attachment_url(&self, id: AssetId) -> Option<String> {
        self.field(id, |a| &a.url)
    }

    fn featured_image_id(&self, owner: AssetId) -> Option<AssetId> {
        self.featured.get(&owner).copied()
    }
}

impl RenditionSource for MemoryStore {
    fn rendition(&self, id: AssetId, size: &str) -> Result<Option<Rendition>, BackendError> {
        Ok(self.get(id).and_then(|a| a.renditions.get(size).cloned()))
    }
}

impl SizedVariantSource for MemoryStore {
    fn sized_variant(
        &self,
        id: AssetId,
        target: SizeBox,
    ) -> Result<Option<Rendition>, BackendError> {
        Ok(self.get(id).and_then(|a| {
            a.variants
                .iter()
                .find(|v| {
                    v.width == target.width && v.height == target.height && v.crop == target.crop
                })
                .map(|v| v.rendition.clone())
        }))
    }
}
