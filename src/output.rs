//! CLI output formatting.
//!
//! The `resolve` command prints one header line per asset and an indented
//! line per attribute. Absent attributes are shown as `-`, so an unresolved
//! rendition is visibly different from a zero-sized one.
//!
//! ```text
//! #42 Harbour (full)
//!     src: https://res.cloudinary.com/demo/app/2024/harbour.jpg
//!     size: 2400×1600 landscape
//!     focal point: 30% 60%
//!     caption: Boats at dusk
//!     href: https://site/harbour/
//!     original: https://site/uploads/2024/harbour.jpg
//!     mime: image/jpeg
//! ```
//!
//! Format functions return `Vec<String>` and do no I/O; `print_*` wrappers
//! write to stdout.

use crate::asset::ResolvedAttributes;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Header: id, name, and the logical size resolved.
fn header(attrs: &ResolvedAttributes) -> String {
    match attrs.name.as_deref() {
        Some(name) if !name.is_empty() => format!("#{} {} ({})", attrs.id, name, attrs.size),
        _ => format!("#{} ({})", attrs.id, attrs.size),
    }
}

/// `2400×1600 landscape`, or `-` when the rendition did not resolve.
fn dimensions(attrs: &ResolvedAttributes) -> String {
    match (attrs.width, attrs.height, attrs.orientation) {
        (Some(w), Some(h), Some(orientation)) => format!("{w}×{h} {orientation}"),
        _ => "-".to_string(),
    }
}

pub fn format_attributes(attrs: &ResolvedAttributes) -> Vec<String> {
    let pad = indent(1);
    let mut lines = vec![header(attrs)];
    lines.push(format!("{pad}src: {}", or_dash(attrs.src.as_deref())));
    lines.push(format!("{pad}size: {}", dimensions(attrs)));
    lines.push(format!(
        "{pad}focal point: {} {}",
        attrs.focal_point.bg_pos_x, attrs.focal_point.bg_pos_y
    ));
    if let Some(alt) = attrs.alt.as_deref() {
        lines.push(format!("{pad}alt: {alt}"));
    }
    if let Some(caption) = attrs.caption.as_deref() {
        lines.push(format!("{pad}caption: {}", first_line(caption)));
    }
    lines.push(format!("{pad}href: {}", or_dash(attrs.href.as_deref())));
    lines.push(format!(
        "{pad}original: {}",
        or_dash(attrs.original_src.as_deref())
    ));
    lines.push(format!("{pad}mime: {}", or_dash(attrs.mime_type.as_deref())));
    lines
}

pub fn print_attributes(attrs: &ResolvedAttributes) {
    for line in format_attributes(attrs) {
        println!("{}", line);
    }
}

/// First line of a multi-line value, marked with `…` when truncated.
fn first_line(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.split_once('\n') {
        Some((first, _)) => format!("{}…", first.trim_end()),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focal::FocalPoint;
    use crate::types::{AssetId, Orientation};

    fn attrs() -> ResolvedAttributes {
        ResolvedAttributes {
            id: AssetId(42),
            size: "full".into(),
            name: Some("Harbour".into()),
            alt: None,
            caption: Some("Boats at dusk\nSecond line".into()),
            description: Some("Boats at dusk\nSecond line".into()),
            href: Some("https://site/harbour/".into()),
            src: Some("https://x/42.jpg".into()),
            width: Some(2400),
            height: Some(1600),
            orientation: Some(Orientation::Landscape),
            mime_type: Some("image/jpeg".into()),
            original_src: None,
            focal_point: FocalPoint::new(0.3, 0.6),
        }
    }

    #[test]
    fn formats_resolved_asset() {
        let lines = format_attributes(&attrs());
        assert_eq!(
            lines,
            vec![
                "#42 Harbour (full)",
                "    src: https://x/42.jpg",
                "    size: 2400×1600 landscape",
                "    focal point: 30% 60%",
                "    caption: Boats at dusk…",
                "    href: https://site/harbour/",
                "    original: -",
                "    mime: image/jpeg",
            ]
        );
    }

    #[test]
    fn unresolved_rendition_shows_dashes() {
        let mut a = attrs();
        a.src = None;
        a.width = None;
        a.height = None;
        a.orientation = None;
        a.name = None;
        let lines = format_attributes(&a);
        assert_eq!(lines[0], "#42 (full)");
        assert_eq!(lines[1], "    src: -");
        assert_eq!(lines[2], "    size: -");
    }

    #[test]
    fn alt_line_only_when_present() {
        let mut a = attrs();
        a.alt = Some("Fishing boats".into());
        assert!(format_attributes(&a).contains(&"    alt: Fishing boats".to_string()));
    }
}
