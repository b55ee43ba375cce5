use crate::context::{AppContext, VerbosityLevel};
use crate::format::{self, Formattable};
use libnexus::format::{human_size, relative_time};
use libnexus::manifest::LayerInfo;
use libnexus::{ImageSize, Nexus};
use serde::Serialize;
use tabled::Tabled;

pub mod handlers;

/// Image row for `image ls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct ImageRow {
    /// Image name
    #[tabled(rename = "IMAGE")]
    pub name: String,
}

/// Tag row for `image tags`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct TagRow {
    /// Tag name
    #[tabled(rename = "TAG")]
    pub tag: String,
}

/// Details shown by `image info`
#[derive(Debug, Clone, Serialize)]
pub struct InfoView {
    pub image: String,
    pub tag: String,
    pub digest: String,
    /// RFC 3339 timestamp, absent when the registry did not send one
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    pub config_size: u64,
    pub layers: Vec<LayerInfo>,
    pub layers_size: u64,
}

impl Formattable for InfoView {
    fn format_pretty(&self) -> String {
        let modified = self
            .last_modified
            .as_ref()
            .map(|t| format!("{} ({})", t.to_rfc2822(), relative_time(t)))
            .unwrap_or_else(|| "unknown".to_string());

        let mut output = format!(
            "Image: {}:{}\nDigest: {}\nLast modified: {}\nSize: {}\nLayers:\n",
            self.image, self.tag, self.digest, modified, self.config_size
        );
        for layer in &self.layers {
            output.push_str(&format!("\t{}\t{}\n", layer.digest, layer.size));
        }
        output.push_str(&format!(
            "Total layers size: {} ({})",
            self.layers_size,
            human_size(self.layers_size)
        ));
        output
    }
}

/// Output of `image size`
#[derive(Debug, Clone, Serialize)]
pub struct SizeView {
    #[serde(flatten)]
    pub size: ImageSize,
    #[serde(skip)]
    pub human: bool,
}

impl Formattable for SizeView {
    fn format_pretty(&self) -> String {
        let total = if self.human {
            human_size(self.size.total_bytes)
        } else {
            self.size.total_bytes.to_string()
        };
        format!("{} {}", total, self.size.image)
    }
}

/// Connect to the registry named in the credentials file
pub(crate) fn connect(ctx: &AppContext) -> Result<Nexus, String> {
    let path = &ctx.settings.credentials_path;
    format::print(
        ctx,
        VerbosityLevel::VeryVerbose,
        &format!("Using credentials file: {}", path.display()),
    );

    let nexus = Nexus::builder()
        .credentials_file(path)
        .user_agent(format!("{}/{}", ctx.settings.name, ctx.settings.version))
        .build()
        .map_err(|e| e.to_string())?;

    tracing::debug!(
        credentials = %path.display(),
        host = nexus.client().host(),
        "Registry client ready"
    );
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!(
            "Connected to {} (repository {})",
            nexus.client().host(),
            nexus.client().repository()
        ),
    );
    Ok(nexus)
}

pub(crate) fn fetch_images(nexus: &Nexus) -> Result<Vec<ImageRow>, String> {
    let images = nexus.list_images().map_err(|e| e.to_string())?;
    Ok(images.into_iter().map(|name| ImageRow { name }).collect())
}

/// Tags sorted oldest first
pub(crate) fn fetch_tags(nexus: &Nexus, image: &str) -> Result<Vec<TagRow>, String> {
    let tags = nexus.list_tags_sorted(image).map_err(|e| e.to_string())?;
    Ok(tags.into_iter().map(|tag| TagRow { tag }).collect())
}

pub(crate) fn fetch_digest(nexus: &Nexus, image: &str, tag: &str) -> Result<String, String> {
    nexus.get_digest(image, tag).map_err(|e| e.to_string())
}

/// Manifest summary plus digest and modification time.
///
/// A missing or unparsable `last-modified` header is not fatal here.
pub(crate) fn fetch_info(nexus: &Nexus, image: &str, tag: &str) -> Result<InfoView, String> {
    let info = nexus.image_info(image, tag).map_err(|e| e.to_string())?;
    let digest = nexus.get_digest(image, tag).map_err(|e| e.to_string())?;
    let last_modified = nexus.get_last_modified(image, tag).ok();

    Ok(InfoView {
        image: info.image,
        tag: info.tag,
        digest,
        last_modified,
        config_size: info.config_size,
        layers: info.layers,
        layers_size: info.layers_size,
    })
}

pub(crate) fn fetch_size(nexus: &Nexus, image: &str, human: bool) -> Result<SizeView, String> {
    let size = nexus.image_size(image).map_err(|e| e.to_string())?;
    Ok(SizeView { size, human })
}

/// Asset id that deleting `image:tag` would remove, if any
pub(crate) fn find_asset_id(nexus: &Nexus, image: &str, tag: &str) -> Result<Option<String>, String> {
    let result = nexus.search_assets(image, tag).map_err(|e| e.to_string())?;
    Ok(result.find_asset(image, tag).map(|asset| asset.id.clone()))
}
