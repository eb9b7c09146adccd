//! Pipeline configuration
//!
//! Loads the ETL configuration from a YAML file: input/output root URLs and
//! the AWS credential pair used by the S3-backed object stores. Credentials
//! are installed into the process environment before any store is built, so
//! `AmazonS3Builder::from_env()` picks them up.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default input root: the public dataset bucket
fn default_input_root() -> String {
    "s3://udacity-dend/".to_string()
}

/// Default output root: the lake bucket
fn default_output_root() -> String {
    "s3://nd027/".to_string()
}

/// Complete pipeline configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EtlConfig {
    /// Root URL of the raw input data (`s3://bucket/prefix/` or a local path)
    #[serde(default = "default_input_root")]
    pub input_root: String,

    /// Root URL the star-schema tables are written under
    #[serde(default = "default_output_root")]
    pub output_root: String,

    /// AWS credentials section
    #[serde(default)]
    pub aws: Option<AwsCredentials>,
}

/// AWS access credential pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsCredentials {
    /// AWS access key id
    pub access_key_id: String,

    /// AWS secret access key
    pub secret_access_key: String,
}

impl EtlConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: EtlConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.input_root.is_empty() {
            return Err(Error::missing_field("input_root"));
        }
        if self.output_root.is_empty() {
            return Err(Error::missing_field("output_root"));
        }
        if let Some(aws) = &self.aws {
            if aws.access_key_id.is_empty() {
                return Err(Error::missing_field("aws.access_key_id"));
            }
            if aws.secret_access_key.is_empty() {
                return Err(Error::missing_field("aws.secret_access_key"));
            }
        }
        Ok(())
    }

    /// Install the AWS credential pair into the process environment
    ///
    /// Must run before any S3-backed store is constructed. A config without
    /// an `aws` section leaves the ambient environment untouched (instance
    /// profiles, exported variables).
    pub fn install_credentials(&self) {
        if let Some(aws) = &self.aws {
            std::env::set_var("AWS_ACCESS_KEY_ID", &aws.access_key_id);
            std::env::set_var("AWS_SECRET_ACCESS_KEY", &aws.secret_access_key);
        }
    }
}
