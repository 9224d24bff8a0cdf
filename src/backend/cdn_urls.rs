//! A [`CdnUrlSource`] that rewrites the store's attachment URL onto the CDN.

use super::source::{AssetStore, BackendError, CdnUrlSource};
use crate::cdn::CdnUrlBuilder;
use crate::transform::TransformOptions;
use crate::types::AssetId;
use std::sync::Arc;

/// CDN URLs derived from the asset's attachment URL.
///
/// Attachments outside the upload base have no CDN address, so they report
/// no URL and the resolver moves on to the next tier.
pub struct CdnUrls {
    store: Arc<dyn AssetStore>,
    builder: CdnUrlBuilder,
    transformation: String,
}

impl CdnUrls {
    pub fn new(
        store: Arc<dyn AssetStore>,
        builder: CdnUrlBuilder,
        transformations: &TransformOptions,
    ) -> Self {
        Self {
            store,
            builder,
            transformation: transformations.encode(),
        }
    }
}

impl CdnUrlSource for CdnUrls {
    fn cdn_url(&self, id: AssetId) -> Result<Option<String>, BackendError> {
        let Some(original) = self.store.attachment_url(id) else {
            return Ok(None);
        };
        Ok(self
            .builder
            .try_rewrite(&original, Some(&self.transformation)))
    }
}
