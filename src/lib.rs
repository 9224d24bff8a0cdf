//! # image-attrs
//!
//! Presentation-ready attributes for stored image assets: URL, dimensions,
//! orientation, focal point, and text fields, resolved lazily from whichever
//! delivery backend is available, plus CDN transformation URLs on demand.
//!
//! # Architecture
//!
//! ```text
//! MediaLibrary::image(id)
//!   └─ ImageAsset            memoized per-attribute slots
//!        ├─ AssetStore        title, caption, permalink, metadata
//!        ├─ FocalPoint        [x, y] metadata → CSS percentages
//!        └─ BackendResolver   CDN → resizer → native, first hit wins
//!             └─ CdnUrls      attachment URL → CdnUrlBuilder → TransformOptions
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`asset`] | [`MediaLibrary`] and [`ImageAsset`]: lazy, memoized attribute access |
//! | [`backend`] | Boundary traits, the fallback resolver, and the in-memory store |
//! | [`transform`] | Semantic transformation options and their CDN encoding |
//! | [`cdn`] | Rewriting upload URLs onto the CDN |
//! | [`focal`] | Focal point extraction and background-position strings |
//! | [`render`] | `<img>` tag rendering with Maud |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`types`] | Shared types: `AssetId`, `Rendition`, `Orientation` |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//!
//! # Design Decisions
//!
//! ## Nothing Fails at Attribute Access
//!
//! A backend fault, an empty response, and a missing record field all end up
//! as `None`. Rendering code checks for presence; it never handles errors from
//! a getter. Faults are logged at the resolver with `tracing::warn!`.
//!
//! ## Capabilities, Not Feature Detection
//!
//! Each optional tier is present or absent when the [`BackendResolver`] is
//! built, usually from `[cdn]` and `[resizer]` in `config.toml`. There is no
//! runtime probing.
//!
//! ## Per-Asset Memoization
//!
//! Each attribute has its own slot, computed at most once. Nothing is cached
//! across assets or across requests; `ImageAsset` is deliberately `!Sync`.

pub mod asset;
pub mod backend;
pub mod cdn;
pub mod config;
pub mod focal;
pub mod logging;
pub mod output;
pub mod render;
pub mod transform;
pub mod types;

pub use asset::{ImageAsset, MediaLibrary, ResolvedAttributes};
pub use backend::BackendResolver;
pub use transform::TransformOptions;

#[cfg(test)]
pub(crate) mod test_helpers;
