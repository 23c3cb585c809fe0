//! Fixture asset manifest
//!
//! ```json
//! {
//!   "assets": [
//!     { "download_via_script": [ { "url": "https://host/a.bin", "path": "media/a.bin" } ] }
//!   ]
//! }
//! ```
//!
//! Keys other than these are ignored; assets without `download_via_script`
//! are fetched by other means and skipped here.

use serde::Deserialize;

/// Top-level manifest document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetManifest {
    /// Described assets
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// One asset entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Asset {
    /// Files this tool downloads for the asset
    #[serde(default)]
    pub download_via_script: Vec<Download>,
}

/// A remote file and where it lands, relative to the fixture root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Download {
    /// Source URL
    pub url: String,
    /// Destination path relative to the fixture root
    pub path: String,
}

impl AssetManifest {
    /// All downloads in manifest order
    pub fn downloads(&self) -> impl Iterator<Item = &Download> {
        self.assets.iter().flat_map(|a| a.download_via_script.iter())
    }
}
