// ksops-dry-run Generator Config Module
//
// This module handles parsing the ksops generator config that kustomize hands
// to the plugin through KUSTOMIZE_PLUGIN_CONFIG_STRING.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::resource::{lenient, ResourceMetadata, KSOPS_GENERATOR};

/// A ksops generator config, e.g.
///
/// ```yaml
/// apiVersion: viaduct.ai/v1
/// kind: ksops
/// metadata:
///   name: secret-generator
/// files:
///   - ./secret.enc.yaml
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratorConfig {
    #[serde(rename = "apiVersion", default, deserialize_with = "lenient::string")]
    pub api_version: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub kind: String,

    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub metadata: ResourceMetadata,

    /// Encrypted secret files, relative to the generator's directory
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub files: Vec<String>,
}

impl GeneratorConfig {
    /// Parse and validate a generator config from its literal YAML.
    pub fn parse(body: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_yaml::from_str(body).map_err(Error::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the apiVersion and kind.
    ///
    /// A mismatch can only come from a misconfigured generator, so it is a
    /// hard error rather than something to coerce.
    pub fn validate(&self) -> Result<()> {
        KSOPS_GENERATOR
            .check(&self.api_version, &self.kind)
            .map_err(|mismatch| Error::ConfigIdentity { mismatch })
    }

    /// Resolve every configured file against the directory the generator was
    /// configured from, keeping list order.
    pub fn resolve_files(&self, root: &Path) -> Vec<PathBuf> {
        self.files.iter().map(|file| root.join(file)).collect()
    }
}

impl FromStr for GeneratorConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
