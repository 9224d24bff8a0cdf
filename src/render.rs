//! `<img>` rendering for a resolved asset.
//!
//! Uses [maud](https://maud.lambda.xyz/) so attribute values are escaped.
//! Only resolved attributes are emitted: an asset without a `src` renders to
//! nothing, and `width`/`height`/`alt` are left off when absent.

use crate::asset::ImageAsset;
use maud::{Markup, html};

/// Render the asset as an `<img>` tag.
///
/// The focal point becomes an `object-position` so cropped layouts keep the
/// important region in view.
pub fn img_tag(asset: &ImageAsset<'_>) -> Markup {
    let Some(src) = asset.src() else {
        return html! {};
    };
    let focal = asset.focal_point();
    let position = format!("object-position: {} {}", focal.bg_pos_x, focal.bg_pos_y);
    html! {
        img src=(src)
            width=[asset.width()]
            height=[asset.height()]
            alt=[asset.alt()]
            style=(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::MediaLibrary;
    use crate::backend::MemoryStore;
    use crate::config::AttrsConfig;
    use crate::test_helpers::rendition_asset;
    use crate::types::{AssetId, Rendition};
    use std::sync::Arc;

    fn library(store: MemoryStore) -> MediaLibrary {
        MediaLibrary::from_config(&AttrsConfig::default(), Arc::new(store))
    }

    #[test]
    fn renders_src_and_dimensions() {
        let library = library(rendition_asset(
            42,
            Rendition::new("https://x/42.jpg", 800, 600),
            None,
        ));
        let html = img_tag(&library.image(AssetId(42))).into_string();
        assert!(html.starts_with("<img"));
        assert!(html.contains(r#"src="https://x/42.jpg""#));
        assert!(html.contains(r#"width="800""#));
        assert!(html.contains(r#"height="600""#));
        assert!(html.contains("object-position: 50% 50%"));
        assert!(!html.contains("alt="));
    }

    #[test]
    fn unresolved_asset_renders_nothing() {
        let library = library(MemoryStore::new());
        assert_eq!(img_tag(&library.image(AssetId(1))).into_string(), "");
    }

    #[test]
    fn escapes_attribute_values() {
        let library = library(rendition_asset(
            1,
            Rendition::new(r#"https://x/a.jpg?"onload="x"#, 1, 1),
            None,
        ));
        let html = img_tag(&library.image(AssetId(1))).into_string();
        assert!(html.contains("&quot;onload=&quot;x"));
    }
}
