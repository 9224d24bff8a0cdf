//! Delivery backends and the fallback chain that picks between them.
//!
//! An image can be delivered three ways, tried in this order:
//!
//! | Tier | Trait | Available when |
//! |---|---|---|
//! | **CDN** | [`CdnUrlSource`] (+ [`RenditionSource`] for dimensions) | `[cdn] enabled` |
//! | **Resizer** | [`SizedVariantSource`] | `[resizer] enabled` and the size has a pixel box |
//! | **Native** | [`RenditionSource`] | always |
//!
//! The module is split into:
//! - **Source**: the boundary traits every backend implements, plus [`AssetStore`]
//!   for the record's text fields and metadata
//! - **Resolver**: [`BackendResolver`], the ordered fallback chain
//! - **CDN URLs**: [`CdnUrls`], a [`CdnUrlSource`] built from the store and a
//!   [`CdnUrlBuilder`](crate::cdn::CdnUrlBuilder)
//! - **Memory**: [`MemoryStore`], an in-memory store implementing every trait,
//!   loadable from JSON

mod cdn_urls;
pub mod memory;
mod resolver;
mod source;

pub use cdn_urls::CdnUrls;
pub use memory::{MemoryStore, StoredAsset, StoredVariant};
pub use resolver::{BackendResolver, Tier};
pub use source::{AssetStore, BackendError, CdnUrlSource, RenditionSource, SizedVariantSource};
