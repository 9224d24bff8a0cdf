//! Boundary traits for the asset record and the delivery backends.
//!
//! [`AssetStore`] lookups are plain `Option`s: a missing field is just absent.
//! Delivery traits return `Result<Option<_>, BackendError>` so a backend can
//! report a fault, but the [`BackendResolver`](super::BackendResolver) turns
//! every fault into "no match" before it reaches an attribute getter.

use crate::types::{AssetId, Rendition, SizeBox};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// The stored asset record: text fields, metadata, and addressing.
pub trait AssetStore: Send + Sync {
    fn title(&self, id: AssetId) -> Option<String>;

    fn mime_type(&self, id: AssetId) -> Option<String>;

    /// Arbitrary metadata value stored under `key`.
    fn metadata(&self, id: AssetId, key: &str) -> Option<serde_json::Value>;

    /// Canonical permalink for the asset's detail page.
    fn permalink(&self, id: AssetId) -> Option<String>;

    fn excerpt(&self, id: AssetId) -> Option<String>;

    fn content(&self, id: AssetId) -> Option<String>;

    /// Untransformed URL of the uploaded original.
    fn attachment_url(&self, id: AssetId) -> Option<String>;

    /// Featured image of an owning record (a post, a page), if it has one.
    fn featured_image_id(&self, _owner: AssetId) -> Option<AssetId> {
        None
    }
}

/// Native storage: the registered rendition for a named size.
pub trait RenditionSource: Send + Sync {
    fn rendition(&self, id: AssetId, size: &str) -> Result<Option<Rendition>, BackendError>;
}

/// Responsive resizer: a variant fitted (or cropped) to a pixel box.
pub trait SizedVariantSource: Send + Sync {
    fn sized_variant(
        &self,
        id: AssetId,
        target: SizeBox,
    ) -> Result<Option<Rendition>, BackendError>;
}

/// CDN: a delivery URL for the asset. Dimensions come from elsewhere.
pub trait CdnUrlSource: Send + Sync {
    fn cdn_url(&self, id: AssetId) -> Result<Option<String>, BackendError>;
}
