//! libnexus - Docker image management for Sonatype Nexus
//!
//! libnexus talks to a Docker repository hosted by a Nexus Repository
//! Manager. It lists images and tags through the Docker Registry v2 API,
//! reads manifests and digests, and deletes tags through the Nexus REST
//! search and asset endpoints.
//!
//! # Quick Start
//!
//! ```no_run
//! use libnexus::{Nexus, RegistryConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RegistryConfig::load(Path::new(".credentials"))?;
//!     let nexus = Nexus::connect(&config)?;
//!
//!     for image in nexus.list_images()? {
//!         let tags = nexus.list_tags_sorted(&image)?;
//!         println!("{}: {}", image, tags.join(", "));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Nexus`] - Main entry point for repository operations
//! - [`NexusBuilder`] - Builder for advanced configuration
//! - [`RegistryConfig`] - Contents of the credentials file
//! - [`RetentionPlan`] - Which tags a retention run deletes
//!
//! The low-level modules are public for advanced use but hidden from the
//! documentation.

#![warn(clippy::all)]

/// Returns the libnexus crate version.
///
/// # Examples
///
/// ```
/// let version = libnexus::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// High-level public API (main entry point)
mod nexus;
pub use nexus::{ImageInfo, ImageSize, Nexus, NexusBuilder, RetentionEvent};

// Re-export commonly used types for convenience
pub use auth::Credentials;
pub use client::DeleteOutcome;
pub use config::RegistryConfig;
pub use error::{NexusError, Result};
pub use manifest::ImageManifest;
pub use search::SearchResult;
pub use tags::RetentionPlan;

#[doc(hidden)]
pub mod auth;
#[doc(hidden)]
pub mod client;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod format;
#[doc(hidden)]
pub mod manifest;
#[doc(hidden)]
pub mod search;
#[doc(hidden)]
pub mod tags;
