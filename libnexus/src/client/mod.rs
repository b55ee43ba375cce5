//! HTTP client for Nexus-hosted Docker registries.
//!
//! This module provides a thin blocking client built on reqwest. Image data
//! comes from the Docker Registry v2 API that Nexus exposes under
//! `/repository/<repo>/v2/`, while deletion goes through the Nexus REST API
//! (`/service/rest/v1/`), which addresses stored assets by their own ids.
//!
//! Every call is a single authenticated request: no retries, no caching and
//! no pagination beyond the first page the server returns.

use crate::auth::Credentials;
use crate::config::RegistryConfig;
use crate::error::{NexusError, Result};
use crate::manifest::{ImageManifest, MANIFEST_V2_MEDIA_TYPE};
use crate::search::SearchResult;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, LAST_MODIFIED};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;


/// Accept header used for the Nexus REST API.
const JSON_MEDIA_TYPE: &str = "application/json";

/// IMF-fixdate layout used by HTTP date headers (RFC 1123, always GMT).
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Header carrying the manifest digest on manifest responses.
const DOCKER_CONTENT_DIGEST: &str = "docker-content-digest";

/// Response from the catalog API endpoint.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    /// List of repository names
    repositories: Vec<String>,
}

/// Response from the tags list API endpoint.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    /// Repository name
    #[allow(dead_code)]
    name: String,
    /// List of tag names (null for an image without tags)
    tags: Option<Vec<String>>,
}

/// Result of deleting a single tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The asset backing the tag was deleted.
    Deleted {
        /// Nexus id of the deleted asset
        asset_id: String,
    },
    /// The search found nothing to delete; no DELETE request was sent.
    NotFound,
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libnexus::client::ClientConfig;
///
/// let config = ClientConfig::new().with_timeout(60);
/// assert_eq!(config.timeout_seconds, Some(60));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: none)
    pub timeout_seconds: Option<u64>,
    /// Maximum idle connections per host (default: 0, one connection per request)
    pub max_idle_per_host: usize,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            max_idle_per_host: 0,
            user_agent: format!("libnexus/{}", crate::version()),
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }

    /// Sets the User-Agent header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Blocking HTTP client for one Nexus Docker repository.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: ReqwestClient,
    /// Normalized Nexus base URL (e.g., "https://nexus.example.com")
    host: String,
    /// Docker repository name inside Nexus
    repository: String,
    /// Credentials sent with every request
    credentials: Credentials,
}

impl Client {
    /// Creates a client for the registry described by `config` with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::client::Client;
    /// use libnexus::config::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("nexus.local:8081/", "admin", "admin123", "docker");
    /// let client = Client::new(&config).unwrap();
    /// assert_eq!(client.host(), "http://nexus.local:8081");
    /// ```
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        Self::with_config(config, ClientConfig::default())
    }

    /// Creates a client with custom HTTP settings.
    pub fn with_config(config: &RegistryConfig, client_config: ClientConfig) -> Result<Self> {
        let host = Self::normalize_url(&config.host)?;

        let mut builder = ReqwestClient::builder()
            .pool_max_idle_per_host(client_config.max_idle_per_host)
            .user_agent(client_config.user_agent);

        builder = match client_config.timeout_seconds {
            Some(seconds) => builder.timeout(Duration::from_secs(seconds)),
            None => builder.timeout(None),
        };

        let http_client = builder
            .build()
            .map_err(|e| NexusError::transport_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            host,
            repository: config.repository.clone(),
            credentials: config.credentials(),
        })
    }

    /// Normalizes a host URL by ensuring it has a scheme and removing trailing slashes.
    fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();

        if url.is_empty() {
            return Err(NexusError::configuration("Nexus host cannot be empty", None));
        }

        // Add default scheme if missing
        let url = if !url.starts_with("http://") && !url.starts_with("https://") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };

        let url = url.trim_end_matches('/').to_string();

        Url::parse(&url).map_err(|e| {
            NexusError::configuration_with_source(
                format!("Invalid Nexus host: {}", url),
                None,
                e,
            )
        })?;

        Ok(url)
    }

    /// Returns the normalized Nexus base URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the Docker repository name.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Builds a Docker Registry v2 URL for this repository.
    fn registry_url(&self, path: &str) -> String {
        format!("{}/repository/{}/v2/{}", self.host, self.repository, path)
    }

    /// Builds a Nexus REST API URL.
    fn rest_url(&self, path: &str) -> String {
        format!("{}/service/rest/v1/{}", self.host, path)
    }

    /// Prepares an authenticated request with the given Accept header.
    fn request(&self, method: Method, url: &str, accept: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header(AUTHORIZATION, self.credentials.to_header_value())
            .header(ACCEPT, accept)
    }

    /// Sends a request, translating transport failures.
    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request
            .build()
            .map_err(|e| NexusError::transport_with_source("Failed to build request", e))?;

        tracing::debug!(method = %request.method(), url = %request.url(), "Sending registry request");

        self.http_client
            .execute(request)
            .map_err(|e| Self::translate_reqwest_error(e, &self.host))
    }

    /// Lists the images in the repository.
    ///
    /// `GET {host}/repository/{repo}/v2/_catalog`
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::Http`] for any status other than 200 and
    /// [`NexusError::Decode`] when the body is not a catalog document.
    pub fn list_images(&self) -> Result<Vec<String>> {
        let url = self.registry_url("_catalog");
        let response = self.send(self.request(Method::GET, &url, MANIFEST_V2_MEDIA_TYPE))?;
        let response = Self::expect_status(response, StatusCode::OK, None)?;

        let catalog: CatalogResponse = Self::decode(response, "catalog")?;
        Ok(catalog.repositories)
    }

    /// Lists the tags of an image, in the order the registry returns them.
    ///
    /// `GET {host}/repository/{repo}/v2/{image}/tags/list`
    pub fn list_tags(&self, image: &str) -> Result<Vec<String>> {
        let url = self.registry_url(&format!("{}/tags/list", image));
        let response = self.send(self.request(Method::GET, &url, MANIFEST_V2_MEDIA_TYPE))?;
        let response = Self::expect_status(response, StatusCode::OK, None)?;

        let tags: TagsResponse = Self::decode(response, "tags")?;
        Ok(tags.tags.unwrap_or_default())
    }

    /// Issues the manifest GET shared by the manifest, digest and date lookups.
    fn fetch_manifest_response(&self, image: &str, tag: &str) -> Result<Response> {
        let url = self.registry_url(&format!("{}/manifests/{}", image, tag));
        let response = self.send(self.request(Method::GET, &url, MANIFEST_V2_MEDIA_TYPE))?;
        Self::expect_status(response, StatusCode::OK, None)
    }

    /// Fetches the v2 manifest of `image:tag`.
    ///
    /// `GET {host}/repository/{repo}/v2/{image}/manifests/{tag}`
    pub fn get_manifest(&self, image: &str, tag: &str) -> Result<ImageManifest> {
        let response = self.fetch_manifest_response(image, tag)?;
        Self::decode(response, "manifest")
    }

    /// Returns the manifest digest of `image:tag` from the `docker-content-digest` header.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::Decode`] if the registry did not send the header.
    pub fn get_digest(&self, image: &str, tag: &str) -> Result<String> {
        let response = self.fetch_manifest_response(image, tag)?;

        response
            .headers()
            .get(DOCKER_CONTENT_DIGEST)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .ok_or_else(|| NexusError::decode("Response missing docker-content-digest header"))
    }

    /// Returns the `last-modified` time of the manifest of `image:tag`.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::DateParse`] if the header is missing or is not an
    /// RFC 1123 date.
    pub fn get_last_modified(&self, image: &str, tag: &str) -> Result<DateTime<Utc>> {
        let response = self.fetch_manifest_response(image, tag)?;

        let value = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(NexusError::missing_date)?;

        parse_http_date(value)
    }

    /// Searches Nexus components of this repository by image name and version.
    ///
    /// `GET {host}/service/rest/v1/search?repository={repo}&name={image}&version={version}`
    pub fn search_assets(&self, image: &str, version: &str) -> Result<SearchResult> {
        let url = self.rest_url("search");
        let request = self.request(Method::GET, &url, JSON_MEDIA_TYPE).query(&[
            ("repository", self.repository.as_str()),
            ("name", image),
            ("version", version),
        ]);
        let response = self.send(request)?;
        let response = Self::expect_status(response, StatusCode::OK, None)?;

        Self::decode(response, "search")
    }

    /// Deletes a stored asset by its Nexus id.
    ///
    /// `DELETE {host}/service/rest/v1/assets/{asset_id}`. `image` and `tag` only
    /// annotate the error.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::Http`] for any status other than 202.
    pub fn delete_asset_by_id(&self, asset_id: &str, image: &str, tag: &str) -> Result<()> {
        let url = self.rest_url(&format!("assets/{}", asset_id));
        let response = self.send(self.request(Method::DELETE, &url, JSON_MEDIA_TYPE))?;

        Self::expect_status(
            response,
            StatusCode::ACCEPTED,
            Some(format!(
                "Failed to delete image by assetId: {}, {}:{}",
                asset_id, image, tag
            )),
        )?;

        tracing::info!(asset_id, image, tag, "Deleted asset");
        Ok(())
    }

    /// Deletes `image:tag` by resolving it to an asset through the search API.
    ///
    /// An empty search result is not an error: nothing is deleted and
    /// [`DeleteOutcome::NotFound`] is returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use libnexus::client::{Client, DeleteOutcome};
    /// use libnexus::config::RegistryConfig;
    ///
    /// # fn example() -> libnexus::Result<()> {
    /// let config = RegistryConfig::new("http://nexus:8081", "admin", "admin123", "docker");
    /// let client = Client::new(&config)?;
    /// match client.delete_tag("backend", "build-12")? {
    ///     DeleteOutcome::Deleted { asset_id } => println!("deleted asset {}", asset_id),
    ///     DeleteOutcome::NotFound => println!("nothing to delete"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn delete_tag(&self, image: &str, tag: &str) -> Result<DeleteOutcome> {
        let result = self.search_assets(image, tag)?;

        let Some(asset) = result.find_asset(image, tag) else {
            tracing::info!(image, tag, "No assets found");
            return Ok(DeleteOutcome::NotFound);
        };

        self.delete_asset_by_id(&asset.id, image, tag)?;
        Ok(DeleteOutcome::Deleted {
            asset_id: asset.id.clone(),
        })
    }

    /// Reads a response body and decodes it as JSON.
    fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let body = response.bytes().map_err(|e| {
            NexusError::transport_with_source(format!("Failed to read {} response", what), e)
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            NexusError::decode_with_source(format!("Failed to parse {} response", what), e)
        })
    }

    /// Translates a reqwest error into a NexusError.
    fn translate_reqwest_error(error: reqwest::Error, host: &str) -> NexusError {
        if error.is_timeout() {
            NexusError::transport_with_source(format!("Request to {} timed out", host), error)
        } else if error.is_connect() {
            NexusError::transport_with_source(
                format!("Failed to connect to Nexus at {}", host),
                error,
            )
        } else if error.is_request() {
            NexusError::transport_with_source(format!("Failed to send request to {}", host), error)
        } else {
            NexusError::transport_with_source(
                format!("Network error communicating with {}", host),
                error,
            )
        }
    }

    /// Checks that the response has exactly the expected status.
    fn expect_status(
        response: Response,
        expected: StatusCode,
        context: Option<String>,
    ) -> Result<Response> {
        let status = response.status();

        if status == expected {
            return Ok(response);
        }

        tracing::warn!(
            status = status.as_u16(),
            expected = expected.as_u16(),
            url = %response.url(),
            "Unexpected registry response"
        );

        Err(NexusError::Http {
            status_code: status.as_u16(),
            context,
        })
    }
}

/// Parses an HTTP date header (RFC 1123, e.g. "Tue, 15 Aug 2023 10:00:00 GMT").
///
/// # Examples
///
/// ```
/// use libnexus::client::parse_http_date;
///
/// let time = parse_http_date("Tue, 15 Aug 2023 10:00:00 GMT").unwrap();
/// assert_eq!(time.to_rfc3339(), "2023-08-15T10:00:00+00:00");
/// ```
pub fn parse_http_date(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)
        .map(|time| time.and_utc())
        .map_err(|e| NexusError::invalid_date(value, e))
}
