//! Shared test utilities: store fixtures and instrumented backends.
//!
//! Mocks count calls with atomics rather than `Cell` so they stay `Sync` and
//! satisfy the backend trait bounds.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let native = Arc::new(CountingNative::new(Rendition::new("https://x/1.jpg", 10, 20)));
//! let resolver = BackendResolver::new(native.clone());
//! resolver.resolve(AssetId(1), &SizeRequest::named("full"));
//! assert_eq!(native.calls(), 1);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{
    AssetStore, BackendError, CdnUrlSource, MemoryStore, RenditionSource, SizedVariantSource,
    StoredAsset, StoredVariant,
};
use crate::types::{AssetId, Rendition, SizeBox};

// =========================================================================
// Store fixtures
// =========================================================================

/// A store with one asset whose `full` rendition is `src` at `width`×`height`.
pub fn native_store(id: u64, src: &str, width: u32, height: u32) -> Arc<MemoryStore> {
    Arc::new(rendition_asset(id, Rendition::new(src, width, height), None))
}

/// A store with one asset: a `full` rendition plus, optionally, a resizer
/// variant for the cropped 600×400 box.
pub fn rendition_asset(id: u64, full: Rendition, variant: Option<Rendition>) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert(
        AssetId(id),
        StoredAsset {
            renditions: [("full".to_string(), full)].into_iter().collect(),
            variants: variant
                .map(|rendition| StoredVariant {
                    width: 600,
                    height: 400,
                    crop: true,
                    rendition,
                })
                .into_iter()
                .collect(),
            ..StoredAsset::default()
        },
    );
    store
}

// =========================================================================
// Instrumented backends
// =========================================================================

/// Native backend that returns the same rendition for every request and
/// counts how often it was asked.
pub struct CountingNative {
    rendition: Rendition,
    calls: AtomicUsize,
}

impl CountingNative {
    pub fn new(rendition: Rendition) -> Self {
        Self {
            rendition,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RenditionSource for CountingNative {
    fn rendition(&self, _id: AssetId, _size: &str) -> Result<Option<Rendition>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(self.rendition.clone()))
    }
}

/// Asset store wrapper that counts every record lookup.
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> &MemoryStore {
        self.calls.fetch_add(1, Ordering::SeqCst);
        &self.inner
    }
}

impl AssetStore for CountingStore {
    fn title(&self, id: AssetId) -> Option<String> {
        self.hit().title(id)
    }

    fn mime_type(&self, id: AssetId) -> Option<String> {
        self.hit().mime_type(id)
    }

    fn metadata(&self, id: AssetId, key: &str) -> Option<serde_json::Value> {
        self.hit().metadata(id, key)
    }

    fn permalink(&self, id: AssetId) -> Option<String> {
        self.hit().permalink(id)
    }

    fn excerpt(&self, id: AssetId) -> Option<String> {
        self.hit().excerpt(id)
    }

    fn content(&self, id: AssetId) -> Option<String> {
        self.hit().content(id)
    }

    fn attachment_url(&self, id: AssetId) -> Option<String> {
        self.hit().attachment_url(id)
    }
}

/// Every call fails.
pub struct FailingBackend;

impl RenditionSource for FailingBackend {
    fn rendition(&self, _id: AssetId, _size: &str) -> Result<Option<Rendition>, BackendError> {
        Err(BackendError::Unavailable("native storage offline".into()))
    }
}

impl SizedVariantSource for FailingBackend {
    fn sized_variant(
        &self,
        _id: AssetId,
        _target: SizeBox,
    ) -> Result<Option<Rendition>, BackendError> {
        Err(BackendError::Unavailable("resizer offline".into()))
    }
}

impl CdnUrlSource for FailingBackend {
    fn cdn_url(&self, _id: AssetId) -> Result<Option<String>, BackendError> {
        Err(BackendError::Unavailable("cdn offline".into()))
    }
}

/// CDN source that answers every asset with the same URL (or none).
pub struct FixedCdn(pub Option<String>);

impl CdnUrlSource for FixedCdn {
    fn cdn_url(&self, _id: AssetId) -> Result<Option<String>, BackendError> {
        Ok(self.0.clone())
    }
}
