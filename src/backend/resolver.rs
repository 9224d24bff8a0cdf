//! The ordered fallback chain over delivery backends.
//!
//! Every tier either produces a usable [`Rendition`] or is a non-match. A tier
//! that errors, returns nothing, or returns a rendition without a URL or
//! dimensions falls through to the next one. The caller only ever sees
//! `Some(rendition)` or `None`.

use super::cdn_urls::CdnUrls;
use super::source::{AssetStore, BackendError, CdnUrlSource, RenditionSource, SizedVariantSource};
use crate::cdn::CdnUrlBuilder;
use crate::config::AttrsConfig;
use crate::types::{AssetId, Rendition, SizeRequest};
use std::sync::Arc;

/// A delivery tier, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Cdn,
    Resizer,
    Native,
}

impl Tier {
    pub const ORDER: [Tier; 3] = [Tier::Cdn, Tier::Resizer, Tier::Native];

    pub fn name(self) -> &'static str {
        match self {
            Tier::Cdn => "cdn",
            Tier::Resizer => "resizer",
            Tier::Native => "native",
        }
    }
}

/// Tries CDN, then resizer, then native storage, and returns the first hit.
///
/// Optional tiers are present or absent at construction. An absent tier is
/// skipped without an attempt.
pub struct BackendResolver {
    native: Arc<dyn RenditionSource>,
    resizer: Option<Arc<dyn SizedVariantSource>>,
    cdn: Option<Arc<dyn CdnUrlSource>>,
}

impl BackendResolver {
    /// A resolver with only the native tier.
    pub fn new(native: Arc<dyn RenditionSource>) -> Self {
        Self {
            native,
            resizer: None,
            cdn: None,
        }
    }

    pub fn with_resizer(mut self, resizer: Arc<dyn SizedVariantSource>) -> Self {
        self.resizer = Some(resizer);
        self
    }

    pub fn with_cdn(mut self, cdn: Arc<dyn CdnUrlSource>) -> Self {
        self.cdn = Some(cdn);
        self
    }

    /// Wire every enabled tier to one store.
    pub fn from_config<S>(config: &AttrsConfig, store: Arc<S>) -> Self
    where
        S: AssetStore + RenditionSource + SizedVariantSource + 'static,
    {
        let mut resolver = Self::new(store.clone());
        if config.resizer.enabled {
            resolver = resolver.with_resizer(store.clone());
        }
        if let Some(builder) = CdnUrlBuilder::from_config(&config.cdn) {
            let urls = CdnUrls::new(store, builder, &config.cdn.transformations);
            resolver = resolver.with_cdn(Arc::new(urls));
        }
        resolver
    }

    /// Tiers that will be attempted, in order.
    pub fn tiers(&self) -> Vec<Tier> {
        Tier::ORDER
            .into_iter()
            .filter(|tier| self.has_tier(*tier))
            .collect()
    }

    fn has_tier(&self, tier: Tier) -> bool {
        match tier {
            Tier::Cdn => self.cdn.is_some(),
            Tier::Resizer => self.resizer.is_some(),
            Tier::Native => true,
        }
    }

    /// Resolve the best available rendition for `id` at `size`.
    pub fn resolve(&self, id: AssetId, size: &SizeRequest) -> Option<Rendition> {
        for tier in self.tiers() {
            match self.attempt(tier, id, size) {
                Ok(Some(rendition)) if rendition.is_usable() => {
                    tracing::debug!(%id, size = %size.name, tier = tier.name(), "resolved");
                    return Some(rendition);
                }
                Ok(Some(_)) => {
                    tracing::debug!(
                        %id,
                        tier = tier.name(),
                        "incomplete rendition, falling through"
                    );
                }
                Ok(None) => {
                    tracing::debug!(%id, tier = tier.name(), "no match, falling through");
                }
                Err(e) => {
                    tracing::warn!(
                        %id,
                        tier = tier.name(),
                        error = %e,
                        "backend failed, falling through"
                    );
                }
            }
        }
        tracing::debug!(%id, size = %size.name, "no backend resolved the asset");
        None
    }

    fn attempt(
        &self,
        tier: Tier,
        id: AssetId,
        size: &SizeRequest,
    ) -> Result<Option<Rendition>, BackendError> {
        match tier {
            Tier::Cdn => {
                let Some(cdn) = &self.cdn else {
                    return Ok(None);
                };
                // Dimensions come from native storage, the URL from the CDN.
                let Some(base) = self.native.rendition(id, &size.name)? else {
                    return Ok(None);
                };
                Ok(cdn
                    .cdn_url(id)?
                    .filter(|url| !url.is_empty())
                    .map(|src| Rendition {
                        src,
                        width: base.width,
                        height: base.height,
                    }))
            }
            Tier::Resizer => {
                let (Some(resizer), Some(target)) = (&self.resizer, size.target) else {
                    return Ok(None);
                };
                resizer.sized_variant(id, target)
            }
            Tier::Native => self.native.rendition(id, &size.name),
        }
    }
}
