//! Shared types used across the resolver, the backends, and the CLI.
//!
//! These are the values that cross module boundaries: asset identity, the
//! `{src, width, height}` rendition triple every delivery backend produces,
//! and the orientation derived from it. Serializable so the in-memory store
//! and the `resolve --json` output can use them directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a stored image asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AssetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A concrete delivered variant of an asset: one URL plus its dimensions.
///
/// Width and height always travel together. A backend either produces the
/// whole triple or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

impl Rendition {
    pub fn new(src: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
        }
    }

    /// A rendition is usable only with a non-empty URL and non-zero dimensions.
    pub fn is_usable(&self) -> bool {
        !self.src.is_empty() && self.width > 0 && self.height > 0
    }
}

/// Orientation of an image, a pure function of its width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    /// - `width < height` → portrait
    /// - `width == height` → square
    /// - otherwise → landscape
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width < height {
            Self::Portrait
        } else if width == height {
            Self::Square
        } else {
            Self::Landscape
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target box for the responsive-sizing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBox {
    pub width: u32,
    pub height: u32,
    pub crop: bool,
}

/// A request for one logical size of an asset.
///
/// `name` addresses the native rendition (`"full"`, `"poster"`, ...). `target`
/// is set when the size has configured pixel dimensions, which is what the
/// responsive-sizing backend needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRequest {
    pub name: String,
    pub target: Option<SizeBox>,
}

impl SizeRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
        }
    }
}
