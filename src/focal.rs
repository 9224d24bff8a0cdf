//! Focal point extraction.
//!
//! The focal point is stored as a two-element `[x, y]` array of normalized
//! coordinates. Without one, the image center `(0.5, 0.5)` is used, so a
//! [`FocalPoint`] is always fully populated.
//!
//! The derived percentage strings feed CSS `background-position` and
//! `object-position`. `bg_pos` joins both percentages with no separator
//! (`"50%50%"`); consumers that need a valid CSS pair should use
//! `bg_pos_x` and `bg_pos_y`.

use serde::Serialize;

/// Normalized focal point plus its CSS percentage forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocalPoint {
    pub x: f64,
    pub y: f64,
    pub bg_pos: String,
    pub bg_pos_x: String,
    pub bg_pos_y: String,
}

impl FocalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        let x = x.clamp(0.0, 1.0);
        let y = y.clamp(0.0, 1.0);
        let bg_pos_x = percent(x);
        let bg_pos_y = percent(y);
        Self {
            x,
            y,
            bg_pos: format!("{bg_pos_x}{bg_pos_y}"),
            bg_pos_x,
            bg_pos_y,
        }
    }

    pub fn center() -> Self {
        Self::new(0.5, 0.5)
    }

    /// Build from a stored metadata value, falling back to the center.
    ///
    /// Accepts `[x, y]` with numbers or numeric strings. Anything else (absent,
    /// empty, malformed, non-finite) yields the center.
    pub fn from_metadata(value: Option<&serde_json::Value>) -> Self {
        value
            .and_then(coordinates)
            .map(|(x, y)| Self::new(x, y))
            .unwrap_or_else(Self::center)
    }
}

impl Default for FocalPoint {
    fn default() -> Self {
        Self::center()
    }
}

fn coordinates(value: &serde_json::Value) -> Option<(f64, f64)> {
    let pair = value.as_array()?;
    let x = number(pair.first()?)?;
    let y = number(pair.get(1)?)?;
    Some((x, y))
}

fn number(value: &serde_json::Value) -> Option<f64> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// `0.5` → `"50%"`, `0.333` → `"33.3%"`. Rounds away float noise from the
/// multiplication so `0.07` prints as `7%`.
fn percent(fraction: f64) -> String {
    let value = (fraction * 100.0 * 1e9).round() / 1e9;
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_metadata_is_center() {
        let fp = FocalPoint::from_metadata(None);
        assert_eq!(fp.x, 0.5);
        assert_eq!(fp.y, 0.5);
        assert_eq!(fp.bg_pos_x, "50%");
        assert_eq!(fp.bg_pos_y, "50%");
    }

    #[test]
    fn bg_pos_has_no_separator() {
        assert_eq!(FocalPoint::center().bg_pos, "50%50%");
        assert_eq!(FocalPoint::new(0.25, 0.75).bg_pos, "25%75%");
    }

    #[test]
    fn empty_array_is_center() {
        let value = json!([]);
        assert_eq!(FocalPoint::from_metadata(Some(&value)), FocalPoint::center());
    }

    #[test]
    fn reads_numeric_pair() {
        let value = json!([0.2, 0.9]);
        let fp = FocalPoint::from_metadata(Some(&value));
        assert_eq!((fp.x, fp.y), (0.2, 0.9));
        assert_eq!(fp.bg_pos_x, "20%");
        assert_eq!(fp.bg_pos_y, "90%");
    }

    #[test]
    fn reads_numeric_strings() {
        let value = json!(["0.1", "0.4"]);
        let fp = FocalPoint::from_metadata(Some(&value));
        assert_eq!((fp.x, fp.y), (0.1, 0.4));
    }

    #[test]
    fn malformed_values_are_center() {
        for value in [json!("0.3,0.4"), json!([0.3]), json!(["a", "b"]), json!(null)] {
            assert_eq!(
                FocalPoint::from_metadata(Some(&value)),
                FocalPoint::center(),
                "value {value}"
            );
        }
    }

    #[test]
    fn out_of_range_is_clamped() {
        let value = json!([-0.5, 1.5]);
        let fp = FocalPoint::from_metadata(Some(&value));
        assert_eq!((fp.x, fp.y), (0.0, 1.0));
        assert_eq!(fp.bg_pos, "0%100%");
    }

    #[test]
    fn percent_strips_float_noise() {
        assert_eq!(percent(0.07), "7%");
        assert_eq!(percent(0.333), "33.3%");
        assert_eq!(percent(1.0), "100%");
    }
}
