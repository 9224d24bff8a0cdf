//! Transformation options and their CDN encoding.
//!
//! Callers describe *what* they want done to an image with semantic names
//! (`width`, `crop`, `quality`, ...). The CDN wants short codes joined into a
//! single path segment: `w_100,h_200,c_fill`. This module owns that mapping.
//!
//! ## Types
//!
//! - [`TransformValue`] — a string or numeric option value.
//! - [`TransformOptions`] — an insertion-ordered mapping of option name to value.
//!
//! ## Encoding rules
//!
//! Entries are visited in insertion order, so the encoded segment is stable for
//! a given options value:
//!
//! - Unknown names are dropped silently. Use [`TransformOptions::unknown_keys`]
//!   upstream when a typo should be an error.
//! - `width` and `height` are dropped when their value is empty. No other option
//!   has a validity check.
//! - Everything else becomes `<code>_<value>`.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Semantic option name → provider code.
const PARAMS: &[(&str, &str)] = &[
    ("angle", "a"),
    ("aspect_ratio", "ar"),
    ("background", "b"),
    ("border", "bo"),
    ("crop", "c"),
    ("color", "co"),
    ("dpr", "dpr"),
    ("duration", "du"),
    ("effect", "e"),
    ("end_offset", "eo"),
    ("flags", "fl"),
    ("height", "h"),
    ("overlay", "l"),
    ("opacity", "o"),
    ("quality", "q"),
    ("radius", "r"),
    ("start_offset", "so"),
    ("named_transformation", "t"),
    ("underlay", "u"),
    ("video_codec", "vc"),
    ("width", "w"),
    ("x", "x"),
    ("y", "y"),
    ("zoom", "z"),
    ("audio_codec", "ac"),
    ("audio_frequency", "af"),
    ("bit_rate", "br"),
    ("color_space", "cs"),
    ("default_image", "d"),
    ("delay", "dl"),
    ("density", "dn"),
    ("fetch_format", "f"),
    ("gravity", "g"),
    ("prefix", "p"),
    ("page", "pg"),
    ("video_sampling", "vs"),
];

/// Look up the provider code for a semantic option name.
pub fn code_for(name: &str) -> Option<&'static str> {
    PARAMS
        .iter()
        .find(|(semantic, _)| *semantic == name)
        .map(|(_, code)| *code)
}

/// A single option value. Numbers print without a trailing `.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl TransformValue {
    /// Empty string or zero. Only consulted for `width` and `height`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::Text(s) => s.is_empty() || s == "0",
        }
    }
}

impl fmt::Display for TransformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for TransformValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::Text(s.to_string()))
    }
}

impl From<&str> for TransformValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for TransformValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for TransformValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u32> for TransformValue {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for TransformValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

/// Insertion-ordered transformation options.
///
/// Re-inserting an existing name replaces its value in place, so the key keeps
/// its original position in the encoded output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOptions {
    entries: Vec<(String, TransformValue)>,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<TransformValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<TransformValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TransformValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransformValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Names the codec does not recognize, in insertion order.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(|k| code_for(k).is_none())
            .collect()
    }

    /// Parse a `name=value` pair as given on the command line.
    ///
    /// The value is kept verbatim as text, so `007` encodes as `t_007`.
    pub fn parse_pair(pair: &str) -> Result<(String, TransformValue), String> {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected name=value, got '{pair}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing option name in '{pair}'"));
        }
        Ok((name.to_string(), TransformValue::Text(value.to_string())))
    }

    /// Encode into the CDN's transformation segment.
    ///
    /// Returns an empty string when nothing survives the encoding rules.
    pub fn encode(&self) -> String {
        encode(self)
    }
}

impl<K: Into<String>, V: Into<TransformValue>> FromIterator<(K, V)> for TransformOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

impl Serialize for TransformOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TransformOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = TransformOptions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of transformation options")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut options = TransformOptions::new();
                while let Some((k, v)) = access.next_entry::<String, TransformValue>()? {
                    options.insert(k, v);
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

/// Encode options as `code_value` tokens joined with `,`.
pub fn encode(options: &TransformOptions) -> String {
    options
        .iter()
        .filter_map(|(name, value)| {
            let code = code_for(name)?;
            if (name == "width" || name == "height") && value.is_empty() {
                return None;
            }
            Some(format!("{code}_{value}"))
        })
        .collect::<Vec<_>>()
        .join(",")
}
