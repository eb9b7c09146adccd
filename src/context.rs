//! Execution context
//!
//! The single shared handle both transformer stages run against: an object
//! store for the input root and one for the output root. Created once at
//! startup and passed by reference into each stage, never concurrently.

use crate::config::EtlConfig;
use crate::error::{Error, Result};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

/// A parsed storage root: an object store plus a path prefix inside it
///
/// Supported URL forms:
/// - `s3://bucket/prefix/` - AWS S3 (credentials from the environment)
/// - `file:///path/` or a bare local path - local filesystem
#[derive(Debug, Clone)]
pub struct StoreLocation {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/root
    prefix: String,
    /// Original URL scheme for logging
    scheme: String,
}

impl StoreLocation {
    /// Parse a root URL and create the appropriate object store
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::parse_s3(url)
        } else {
            Self::parse_local(url)
        }
    }

    fn parse_s3(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("s3://")
            .ok_or_else(|| Error::config(format!("Invalid s3 URL: {url}")))?;

        let (bucket, prefix) = match without_scheme.find('/') {
            Some(idx) => (
                &without_scheme[..idx],
                without_scheme[idx + 1..].trim_matches('/').to_string(),
            ),
            None => (without_scheme, String::new()),
        };

        if bucket.is_empty() {
            return Err(Error::config(format!("Missing bucket in s3 URL: {url}")));
        }

        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create s3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "s3".to_string(),
        })
    }

    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);
        let path = if path.is_empty() { "." } else { path };

        // Create directory if it doesn't exist
        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Get the underlying object store
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Get the scheme (s3, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Check if this is a cloud location (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Build an object path under this location's prefix
    pub fn path(&self, relative: &str) -> ObjectPath {
        let relative = relative.trim_matches('/');
        if self.prefix.is_empty() {
            ObjectPath::from(relative)
        } else {
            ObjectPath::from(format!("{}/{relative}", self.prefix))
        }
    }
}

/// The shared execution context for one pipeline run
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Raw input root (read-only)
    pub input: StoreLocation,
    /// Star-schema output root
    pub output: StoreLocation,
}

impl ExecutionContext {
    /// Create the execution context from configuration
    ///
    /// Credentials must already be installed in the environment; see
    /// [`EtlConfig::install_credentials`]. Fails fatally when either root
    /// URL is invalid or its store cannot be built.
    pub fn new(config: &EtlConfig) -> Result<Self> {
        let input = StoreLocation::parse(&config.input_root)?;
        let output = StoreLocation::parse(&config.output_root)?;
        Ok(Self { input, output })
    }

    /// Create a context directly from two root URLs
    pub fn from_roots(input_root: &str, output_root: &str) -> Result<Self> {
        Ok(Self {
            input: StoreLocation::parse(input_root)?,
            output: StoreLocation::parse(output_root)?,
        })
    }
}
