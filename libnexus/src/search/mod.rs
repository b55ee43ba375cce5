//! Nexus component search model.
//!
//! `GET /service/rest/v1/search` answers with components (one per image tag
//! for Docker repositories), each owning the assets Nexus stores for it.
//! Deleting a tag means deleting the manifest asset found here.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// One page of component search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    /// Token for the next page. Only the first page is ever read.
    #[serde(default)]
    pub continuation_token: Option<String>,
}

/// A component: for Docker repositories, one image tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub group: Option<serde_json::Value>,
    /// Image name
    #[serde(default)]
    pub name: String,
    /// Image tag
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A stored asset, identified by a Nexus id distinct from its Docker digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub checksum: Checksum,
}

/// Asset checksums as reported by Nexus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    #[serde(default)]
    pub sha1: String,
    #[serde(default)]
    pub sha256: String,
}

impl SearchResult {
    /// Returns true when the search matched no component.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Picks the asset to delete for `name:version`.
    ///
    /// The component whose name and version equal the request wins; when none
    /// matches exactly, the first component is used. Within the component the
    /// first asset is returned. `None` if there is no component or it has no
    /// assets.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::search::{Asset, SearchItem, SearchResult};
    ///
    /// let result = SearchResult {
    ///     items: vec![SearchItem {
    ///         name: "app".into(),
    ///         version: "1".into(),
    ///         assets: vec![Asset { id: "asset-1".into(), ..Default::default() }],
    ///         ..Default::default()
    ///     }],
    ///     ..Default::default()
    /// };
    /// assert_eq!(result.find_asset("app", "1").unwrap().id, "asset-1");
    /// ```
    pub fn find_asset(&self, name: &str, version: &str) -> Option<&Asset> {
        let item = self
            .items
            .iter()
            .find(|item| item.name == name && item.version == version)
            .or_else(|| self.items.first())?;

        item.assets.first()
    }
}
