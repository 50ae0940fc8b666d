//! Common testing utilities for ksops-dry-run integration tests.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test context that manages a temporary kustomize directory.
pub struct TestContext {
    /// Path to temporary directory
    pub temp_path: PathBuf,
    /// The temporary directory (kept to prevent early deletion)
    _temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with a temporary directory.
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let temp_path = temp_dir.path().to_path_buf();

        Ok(Self {
            temp_path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a test file with content, creating parent directories.
    pub fn create_file(&self, name: &str, content: &str) -> anyhow::Result<PathBuf> {
        let file_path = self.temp_path.join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&file_path)?;
        file.write_all(content.as_bytes())?;
        Ok(file_path)
    }

    /// Root directory, as passed in KUSTOMIZE_PLUGIN_CONFIG_ROOT.
    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.temp_path
    }
}

/// Build a ksops generator config listing `files`.
#[allow(dead_code)]
pub fn generator_config(files: &[&str]) -> String {
    let mut config = String::from(
        "apiVersion: viaduct.ai/v1\nkind: ksops\nmetadata:\n  name: secret-generator\nfiles:\n",
    );
    for file in files {
        config.push_str(&format!("  - {}\n", file));
    }
    config
}

/// Build a mock SOPS-encrypted secret document.
///
/// Values are wrapped the way sops wraps them, except empty ones which sops
/// leaves empty.
#[allow(dead_code)]
pub fn encrypted_secret(
    name: &str,
    string_data: &[(&str, &str)],
    data: &[(&str, &str)],
) -> String {
    let mut doc = format!("apiVersion: v1\nkind: Secret\nmetadata:\n  name: {}\n", name);

    for (field, entries) in [("stringData", string_data), ("data", data)] {
        if entries.is_empty() {
            continue;
        }
        doc.push_str(&format!("{}:\n", field));
        for (key, value) in entries {
            doc.push_str(&format!("  {}: {}\n", key, sops_wrap(value)));
        }
    }

    doc.push_str(
        "sops:\n  kms: []\n  age:\n    - recipient: age1qyqszqgpqyqszqgpqyqszqgpqyqszqgp\n  \
         lastmodified: \"2024-01-01T00:00:00Z\"\n  \
         mac: ENC[AES256_GCM,data:bWFj,iv:aXY=,tag:dGFn,type:str]\n  version: 3.8.1\n",
    );
    doc
}

fn sops_wrap(value: &str) -> String {
    if value.is_empty() {
        "\"\"".to_string()
    } else {
        format!("ENC[AES256_GCM,data:{},iv:aXY=,tag:dGFn,type:str]", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_context_create_file() {
        let ctx = TestContext::new().unwrap();
        let file_path = ctx.create_file("nested/test.txt", "Hello, World!").unwrap();

        assert!(file_path.exists());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_encrypted_secret_is_valid_yaml() {
        let doc = encrypted_secret("app", &[("TOKEN", "abc"), ("EMPTY", "")], &[("KEY", "a2V5")]);
        let value: serde_yaml::Value = serde_yaml::from_str(&doc).unwrap();

        assert_eq!(value["kind"], "Secret");
        assert_eq!(value["stringData"]["EMPTY"], "");
        assert!(value["sops"].is_mapping());
    }
}
