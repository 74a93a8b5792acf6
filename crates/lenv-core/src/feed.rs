use lenv_backend::{LenvError, Version};
use log::debug;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Parse a release listing as returned by the GitHub releases API.
///
/// # Errors
/// Returns a response-parse network error when the payload is not an array
/// of releases.
pub fn parse_releases(body: &str) -> Result<Vec<Release>, LenvError> {
    serde_json::from_str(body).map_err(|e| LenvError::bad_response_from("parse releases", e))
}

/// Vendor token of an asset name: `linux64-temurin.zip` yields `temurin`.
///
/// Returns an empty string when the name has no hyphen.
#[must_use]
pub fn parse_asset_vendor(name: &str) -> &str {
    let Some(segment) = name.split('-').nth(1) else {
        return "";
    };
    segment.strip_suffix(".zip").unwrap_or(segment)
}

/// Installable versions for `prefix`, in feed order then asset order.
#[must_use]
pub fn candidates(releases: &[Release], prefix: &str) -> Vec<Version> {
    let mut versions = Vec::new();

    for release in releases {
        for asset in &release.assets {
            if !asset.name.starts_with(prefix) {
                continue;
            }

            let vendor = parse_asset_vendor(&asset.name);
            if vendor.is_empty() {
                debug!("Skipping asset without vendor: {}", asset.name);
                continue;
            }

            versions.push(Version::new(release.tag_name.clone(), vendor));
        }
    }

    versions
}
