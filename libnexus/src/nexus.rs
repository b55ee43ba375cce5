//! High-level API for libnexus.
//!
//! [`Nexus`] wraps a [`Client`] and adds the operations that take more than
//! one request: sorted tag listings, retention deletion and the total size
//! of an image across its tags.
//!
//! # Examples
//!
//! ```no_run
//! use libnexus::Nexus;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let nexus = Nexus::builder()
//!         .credentials_file(Path::new(".credentials"))
//!         .build()?;
//!
//!     for image in nexus.list_images()? {
//!         println!("{}", image);
//!     }
//!
//!     // Keep the three newest tags of "backend"
//!     nexus.delete_keeping("backend", 3, |_| {})?;
//!     Ok(())
//! }
//! ```

use crate::client::{Client, ClientConfig, DeleteOutcome};
use crate::config::RegistryConfig;
use crate::error::{NexusError, Result};
use crate::manifest::{ImageManifest, LayerInfo, LayerSizes};
use crate::search::SearchResult;
use crate::tags::{RetentionPlan, plan_retention, sort_tags};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of a single tag's manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    /// Image name
    pub image: String,
    /// Tag
    pub tag: String,
    /// Size of the config blob in bytes
    pub config_size: u64,
    /// Layers, base layer first
    pub layers: Vec<LayerInfo>,
    /// Sum of the layer sizes in bytes
    pub layers_size: u64,
}

impl ImageInfo {
    fn from_manifest(image: &str, tag: &str, manifest: ImageManifest) -> Self {
        let layers_size = manifest.layers_size();
        Self {
            image: image.to_string(),
            tag: tag.to_string(),
            config_size: manifest.config.size,
            layers: manifest.layers,
            layers_size,
        }
    }
}

/// Storage used by an image across all of its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    /// Image name
    pub image: String,
    /// Number of tags whose manifests were read
    pub tags: usize,
    /// Number of distinct layer digests
    pub unique_layers: usize,
    /// Total size in bytes, each layer counted once
    pub total_bytes: u64,
}

/// Progress notifications emitted by [`Nexus::delete_keeping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetentionEvent<'a> {
    /// Deletion is about to start for `total` tags.
    Started { total: usize },
    /// A tag is about to be deleted.
    Deleting { tag: &'a str },
    /// A tag was processed.
    Finished {
        tag: &'a str,
        outcome: &'a DeleteOutcome,
    },
}

/// High-level interface to a Nexus Docker repository.
#[derive(Debug, Clone)]
pub struct Nexus {
    client: Client,
}

impl Nexus {
    /// Connects to the registry described by `config` with default HTTP settings.
    ///
    /// No request is sent until an operation is called.
    pub fn connect(config: &RegistryConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
        })
    }

    /// Creates a builder for advanced configuration.
    pub fn builder() -> NexusBuilder {
        NexusBuilder::new()
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Lists all images in the repository.
    pub fn list_images(&self) -> Result<Vec<String>> {
        self.client.list_images()
    }

    /// Lists the tags of an image, oldest first by embedded number.
    pub fn list_tags_sorted(&self, image: &str) -> Result<Vec<String>> {
        let mut tags = self.client.list_tags(image)?;
        sort_tags(&mut tags);
        Ok(tags)
    }

    /// Returns the manifest digest of `image:tag`.
    pub fn get_digest(&self, image: &str, tag: &str) -> Result<String> {
        self.client.get_digest(image, tag)
    }

    /// Returns the last modification time of `image:tag`.
    pub fn get_last_modified(&self, image: &str, tag: &str) -> Result<DateTime<Utc>> {
        self.client.get_last_modified(image, tag)
    }

    /// Searches components by image name and version.
    pub fn search_assets(&self, image: &str, version: &str) -> Result<SearchResult> {
        self.client.search_assets(image, version)
    }

    /// Fetches the manifest of `image:tag` and summarizes it.
    pub fn image_info(&self, image: &str, tag: &str) -> Result<ImageInfo> {
        let manifest = self.client.get_manifest(image, tag)?;
        Ok(ImageInfo::from_manifest(image, tag, manifest))
    }

    /// Computes the storage used by all tags of an image.
    ///
    /// Every tag's manifest is fetched; layers shared between tags are
    /// counted once. The first failing request aborts the computation.
    pub fn image_size(&self, image: &str) -> Result<ImageSize> {
        let tags = self.client.list_tags(image)?;
        let mut sizes = LayerSizes::new();

        for tag in &tags {
            let manifest = self.client.get_manifest(image, tag)?;
            sizes.add(&manifest);
        }

        Ok(ImageSize {
            image: image.to_string(),
            tags: tags.len(),
            unique_layers: sizes.unique_layers(),
            total_bytes: sizes.total(),
        })
    }

    /// Deletes a single tag.
    pub fn delete_tag(&self, image: &str, tag: &str) -> Result<DeleteOutcome> {
        self.client.delete_tag(image, tag)
    }

    /// Plans which tags [`Nexus::delete_keeping`] would delete, without deleting.
    pub fn plan_keeping(&self, image: &str, keep: usize) -> Result<RetentionPlan> {
        let tags = self.client.list_tags(image)?;
        Ok(plan_retention(tags, keep))
    }

    /// Deletes all but the newest `keep` tags of an image, oldest first.
    ///
    /// Deletions run one at a time. The first failure stops the batch and is
    /// returned; tags already deleted stay deleted and the remaining ones are
    /// left alone, so the command can simply be run again.
    pub fn delete_keeping<F>(&self, image: &str, keep: usize, mut on_event: F) -> Result<RetentionPlan>
    where
        F: FnMut(RetentionEvent<'_>),
    {
        let plan = self.plan_keeping(image, keep)?;

        let to_delete = plan.to_delete();
        if to_delete.is_empty() {
            return Ok(plan);
        }

        on_event(RetentionEvent::Started {
            total: to_delete.len(),
        });

        for tag in to_delete {
            on_event(RetentionEvent::Deleting { tag });
            let outcome = self.client.delete_tag(image, tag)?;
            on_event(RetentionEvent::Finished {
                tag,
                outcome: &outcome,
            });
        }

        Ok(plan)
    }
}

/// Builder for creating a [`Nexus`] instance.
///
/// Either a [`RegistryConfig`] or a credentials file path must be given.
///
/// # Examples
///
/// ```
/// use libnexus::Nexus;
/// use libnexus::config::RegistryConfig;
///
/// let nexus = Nexus::builder()
///     .config(RegistryConfig::new("http://nexus:8081", "admin", "admin123", "docker"))
///     .timeout(30)
///     .build()
///     .unwrap();
/// assert_eq!(nexus.client().repository(), "docker");
/// ```
#[derive(Debug, Default)]
pub struct NexusBuilder {
    config: Option<RegistryConfig>,
    credentials_path: Option<PathBuf>,
    client_config: ClientConfig,
}

impl NexusBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already loaded registry configuration.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the registry configuration from a credentials file at build time.
    pub fn credentials_file(mut self, path: &Path) -> Self {
        self.credentials_path = Some(path.to_path_buf());
        self
    }

    /// Set a request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.client_config = self.client_config.with_timeout(seconds);
        self
    }

    /// Set the User-Agent header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.client_config = self.client_config.with_user_agent(user_agent);
        self
    }

    /// Build the `Nexus` instance.
    pub fn build(self) -> Result<Nexus> {
        let config = match (self.config, self.credentials_path) {
            (Some(config), _) => config,
            (None, Some(path)) => RegistryConfig::load(&path)?,
            (None, None) => {
                return Err(NexusError::configuration(
                    "Either a registry configuration or a credentials file is required",
                    None,
                ));
            }
        };

        Ok(Nexus {
            client: Client::with_config(&config, self.client_config)?,
        })
    }
}
