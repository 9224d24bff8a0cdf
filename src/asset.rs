//! Lazily resolved image attributes.
//!
//! A [`MediaLibrary`] holds the store, the backend chain, and the config for
//! one request. It hands out [`ImageAsset`]s, which compute each attribute on
//! first access and keep the result for the rest of the asset's life.
//!
//! ```text
//! library.image(AssetId(42))  boot: resolve rendition + focal point
//!   .src()                    memoized rendition → "https://…/42.jpg"
//!   .width() / .height()      same memoized rendition, no second backend call
//!   .orientation()            recomputed each call from width/height
//!   .caption()                first access hits the store, then cached
//! ```
//!
//! # Memoization
//!
//! Every attribute has its own [`OnceCell`] slot, so the backend chain runs at
//! most once per asset for `src`, `width`, and `height` together. The only way
//! to recompute is [`ImageAsset::refresh`], which needs `&mut`.
//!
//! `ImageAsset` is `!Sync`. Concurrent requests each build their own asset from
//! a shared `MediaLibrary`.
//!
//! # Absent values
//!
//! Getters never fail. Missing store fields and an exhausted backend chain both
//! come back as `None`; `width`/`height` are `None` rather than zero.

use crate::backend::{AssetStore, BackendResolver, RenditionSource, SizedVariantSource};
use crate::config::{AttrsConfig, ImagesConfig, MetadataConfig};
use crate::focal::FocalPoint;
use crate::types::{AssetId, Orientation, Rendition};
use serde::Serialize;
use std::cell::OnceCell;
use std::sync::Arc;

/// Request-scoped context: store, backend chain, and lookup settings.
pub struct MediaLibrary {
    store: Arc<dyn AssetStore>,
    resolver: BackendResolver,
    images: ImagesConfig,
    metadata: MetadataConfig,
}

impl MediaLibrary {
    /// A library over an explicit store and resolver, with default settings.
    pub fn new(store: Arc<dyn AssetStore>, resolver: BackendResolver) -> Self {
        Self {
            store,
            resolver,
            images: ImagesConfig::default(),
            metadata: MetadataConfig::default(),
        }
    }

    /// A library whose record lookups and delivery tiers all use one store.
    pub fn from_config<S>(config: &AttrsConfig, store: Arc<S>) -> Self
    where
        S: AssetStore + RenditionSource + SizedVariantSource + 'static,
    {
        let resolver = BackendResolver::from_config(config, store.clone());
        Self {
            store,
            resolver,
            images: config.images.clone(),
            metadata: config.metadata.clone(),
        }
    }

    pub fn with_images(mut self, images: ImagesConfig) -> Self {
        self.images = images;
        self
    }

    pub fn with_metadata(mut self, metadata: MetadataConfig) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn resolver(&self) -> &BackendResolver {
        &self.resolver
    }

    /// A booted asset at the default size.
    pub fn image(&self, id: AssetId) -> ImageAsset<'_> {
        let size = self.images.default_size.clone();
        self.image_sized(id, size)
    }

    /// A booted asset at a named logical size.
    pub fn image_sized(&self, id: AssetId, size: impl Into<String>) -> ImageAsset<'_> {
        let asset = ImageAsset::new(self, id, size.into());
        asset.boot();
        asset
    }

    /// An asset with nothing resolved yet.
    pub fn lazy_image(&self, id: AssetId) -> ImageAsset<'_> {
        ImageAsset::new(self, id, self.images.default_size.clone())
    }

    /// The featured image of an owning record, if it has one.
    pub fn featured_image(&self, owner: AssetId) -> Option<ImageAsset<'_>> {
        let id = self.store.featured_image_id(owner)?;
        tracing::debug!(%owner, image = %id, "found featured image");
        Some(self.image(id))
    }
}

/// One image asset and its memoized attributes.
pub struct ImageAsset<'a> {
    library: &'a MediaLibrary,
    id: AssetId,
    size: String,
    rendition: OnceCell<Option<Rendition>>,
    focal_point: OnceCell<FocalPoint>,
    name: OnceCell<Option<String>>,
    alt: OnceCell<Option<String>>,
    caption: OnceCell<Option<String>>,
    description: OnceCell<Option<String>>,
    href: OnceCell<Option<String>>,
    mime_type: OnceCell<Option<String>>,
    original_src: OnceCell<Option<String>>,
}

impl<'a> ImageAsset<'a> {
    fn new(library: &'a MediaLibrary, id: AssetId, size: String) -> Self {
        Self {
            library,
            id,
            size,
            rendition: OnceCell::new(),
            focal_point: OnceCell::new(),
            name: OnceCell::new(),
            alt: OnceCell::new(),
            caption: OnceCell::new(),
            description: OnceCell::new(),
            href: OnceCell::new(),
            mime_type: OnceCell::new(),
            original_src: OnceCell::new(),
        }
    }

    /// Resolve the rendition and focal point up front. Everything else stays lazy.
    fn boot(&self) {
        self.rendition();
        self.focal_point();
    }

    /// Drop every memoized value. The next access recomputes.
    pub fn refresh(&mut self) {
        self.rendition.take();
        self.focal_point.take();
        self.name.take();
        self.alt.take();
        self.caption.take();
        self.description.take();
        self.href.take();
        self.mime_type.take();
        self.original_src.take();
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Logical size this asset resolves (`"full"`, `"poster"`, ...).
    pub fn size(&self) -> &str {
        &self.size
    }

    fn store(&self) -> &dyn AssetStore {
        self.library.store.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name
            .get_or_init(|| self.store().title(self.id))
            .as_deref()
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt
            .get_or_init(|| {
                let key = &self.library.metadata.alt_key;
                self.store()
                    .metadata(self.id, key)
                    .and_then(|value| match value {
                        serde_json::Value::String(s) => Some(s),
                        serde_json::Value::Null => None,
                        other => Some(other.to_string()),
                    })
            })
            .as_deref()
    }

    /// Excerpt when non-empty, otherwise the description.
    pub fn caption(&self) -> Option<&str> {
        self.caption
            .get_or_init(|| {
                self.store()
                    .excerpt(self.id)
                    .filter(|s| !s.is_empty())
                    .or_else(|| self.description().map(String::from))
            })
            .as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description
            .get_or_init(|| self.store().content(self.id))
            .as_deref()
    }

    pub fn href(&self) -> Option<&str> {
        self.href
            .get_or_init(|| self.store().permalink(self.id))
            .as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type
            .get_or_init(|| self.store().mime_type(self.id))
            .as_deref()
    }

    /// The untransformed attachment URL, bypassing every delivery tier.
    pub fn original_src(&self) -> Option<&str> {
        self.original_src
            .get_or_init(|| self.store().attachment_url(self.id))
            .as_deref()
    }

    /// The resolved `{src, width, height}` triple, shared by `src`, `width`, and `height`.
    pub fn rendition(&self) -> Option<&Rendition> {
        self.rendition
            .get_or_init(|| {
                let request = self.library.images.size_request(&self.size);
                self.library.resolver.resolve(self.id, &request)
            })
            .as_ref()
    }

    pub fn src(&self) -> Option<&str> {
        self.rendition().map(|r| r.src.as_str())
    }

    pub fn width(&self) -> Option<u32> {
        self.rendition().map(|r| r.width)
    }

    pub fn height(&self) -> Option<u32> {
        self.rendition().map(|r| r.height)
    }

    /// Not memoized; derived from the memoized dimensions on each call.
    pub fn orientation(&self) -> Option<Orientation> {
        let width = self.width()?;
        let height = self.height()?;
        Some(Orientation::from_dimensions(width, height))
    }

    pub fn focal_point(&self) -> &FocalPoint {
        self.focal_point.get_or_init(|| {
            let key = &self.library.metadata.focal_point_key;
            FocalPoint::from_metadata(self.store().metadata(self.id, key).as_ref())
        })
    }

    pub fn fpx(&self) -> f64 {
        self.focal_point().x
    }

    pub fn fpy(&self) -> f64 {
        self.focal_point().y
    }

    /// Resolve every attribute into an owned snapshot.
    pub fn attributes(&self) -> ResolvedAttributes {
        ResolvedAttributes {
            id: self.id,
            size: self.size.clone(),
            name: self.name().map(String::from),
            alt: self.alt().map(String::from),
            caption: self.caption().map(String::from),
            description: self.description().map(String::from),
            href: self.href().map(String::from),
            src: self.src().map(String::from),
            width: self.width(),
            height: self.height(),
            orientation: self.orientation(),
            mime_type: self.mime_type().map(String::from),
            original_src: self.original_src().map(String::from),
            focal_point: self.focal_point().clone(),
        }
    }
}

/// Owned snapshot of every attribute, for output and serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAttributes {
    pub id: AssetId,
    pub size: String,
    pub name: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub href: Option<String>,
    pub src: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub orientation: Option<Orientation>,
    pub mime_type: Option<String>,
    pub original_src: Option<String>,
    pub focal_point: FocalPoint,
}
