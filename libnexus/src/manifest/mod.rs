//! Docker image manifest (schema 2) data structures.
//!
//! Only the fields the CLI reports on are modelled: the config descriptor
//! and the ordered list of layer descriptors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;


/// Media type requested on every Docker Registry v2 call.
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// A Docker Registry v2 image manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageManifest {
    /// Manifest schema version (2 for Docker v2 manifests)
    pub schema_version: i64,
    /// Media type of the manifest document
    #[serde(default)]
    pub media_type: String,
    /// Descriptor of the image configuration blob
    pub config: LayerInfo,
    /// Layer descriptors, base layer first
    pub layers: Vec<LayerInfo>,
}

/// Content descriptor for a config blob or a layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInfo {
    /// Media type of the referenced blob
    #[serde(default)]
    pub media_type: String,
    /// Size of the blob in bytes
    pub size: u64,
    /// Content digest (e.g. "sha256:...")
    pub digest: String,
}

impl ImageManifest {
    /// Sum of all layer sizes in this manifest, excluding the config blob.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::manifest::{ImageManifest, LayerInfo};
    ///
    /// let manifest = ImageManifest {
    ///     layers: vec![
    ///         LayerInfo { size: 10, ..Default::default() },
    ///         LayerInfo { size: 32, ..Default::default() },
    ///     ],
    ///     ..Default::default()
    /// };
    /// assert_eq!(manifest.layers_size(), 42);
    /// ```
    pub fn layers_size(&self) -> u64 {
        self.layers.iter().map(|layer| layer.size).sum()
    }
}

/// Accumulates layer sizes across manifests, counting each digest once.
///
/// Tags of the same image usually share base layers; summing every
/// manifest's layers would count those blobs several times.
#[derive(Debug, Default, Clone)]
pub struct LayerSizes {
    sizes: HashMap<String, u64>,
}

impl LayerSizes {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every layer of `manifest`.
    pub fn add(&mut self, manifest: &ImageManifest) {
        for layer in &manifest.layers {
            self.sizes.insert(layer.digest.clone(), layer.size);
        }
    }

    /// Number of distinct layer digests seen.
    pub fn unique_layers(&self) -> usize {
        self.sizes.len()
    }

    /// Total size in bytes of the distinct layers.
    pub fn total(&self) -> u64 {
        self.sizes.values().sum()
    }
}
