//! Rewriting locally stored asset URLs into CDN delivery URLs.
//!
//! The CDN auto-maps a folder to the site's upload directory, so any URL
//! under the local upload base can be addressed on the CDN by swapping the
//! base for `domain/cloud_name[/transformations]/auto_mapping_folder`:
//!
//! ```text
//! https://site/uploads/2024/pic.jpg
//!   → https://res.cloudinary.com/demo/w_100,h_200/app/2024/pic.jpg
//! ```
//!
//! URLs outside the upload base are returned unchanged. Rewriting never fails.

use crate::config::CdnConfig;
use crate::transform::TransformOptions;

/// Used when the configuration lists no CDN domains.
pub const DEFAULT_CDN_DOMAIN: &str = "https://res.cloudinary.com";

/// Everything needed to map a local upload URL onto the CDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnUrlBuilder {
    domain: String,
    cloud_name: String,
    auto_mapping_folder: String,
    upload_url: String,
}

impl CdnUrlBuilder {
    pub fn new(
        domain: impl Into<String>,
        cloud_name: impl Into<String>,
        auto_mapping_folder: impl Into<String>,
        upload_url: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into().trim_end_matches('/').to_string(),
            cloud_name: cloud_name.into(),
            auto_mapping_folder: auto_mapping_folder.into(),
            upload_url: upload_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build from the `[cdn]` config section. `None` when the CDN is disabled.
    ///
    /// The first entry of `urls` is the domain; an empty list falls back to
    /// [`DEFAULT_CDN_DOMAIN`].
    pub fn from_config(config: &CdnConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let domain = config
            .urls
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_CDN_DOMAIN);
        Some(Self::new(
            domain,
            &config.cloud_name,
            &config.auto_mapping_folder,
            &config.upload_url,
        ))
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Rewrite `local_url` onto the CDN, or `None` if it is not under the
    /// configured upload base.
    pub fn try_rewrite(&self, local_url: &str, transformation: Option<&str>) -> Option<String> {
        if self.upload_url.is_empty() {
            return None;
        }
        let suffix = local_url.strip_prefix(&self.upload_url)?;

        let mut url = format!("{}/{}", self.domain, self.cloud_name);
        if let Some(segment) = transformation.filter(|s| !s.is_empty()) {
            url.push('/');
            url.push_str(segment);
        }
        url.push('/');
        url.push_str(&self.auto_mapping_folder);
        url.push_str(suffix);
        Some(url)
    }

    /// Rewrite `local_url` onto the CDN, returning it unchanged when it is not
    /// under the configured upload base.
    pub fn rewrite(&self, local_url: &str, transformation: Option<&str>) -> String {
        self.try_rewrite(local_url, transformation)
            .unwrap_or_else(|| {
                tracing::debug!(url = local_url, "outside upload base, leaving URL as is");
                local_url.to_string()
            })
    }

    /// Encode `options` and rewrite in one step.
    pub fn url_with(&self, local_url: &str, options: &TransformOptions) -> String {
        let segment = options.encode();
        self.rewrite(local_url, Some(&segment))
    }
}
