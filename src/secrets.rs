//! Loading of ksops encrypted secret files and their redaction.
//!
//! # Guarantees
//!
//! - **No decryption**: values are only ever checked for emptiness
//! - **No encoded values in output**: `data` is folded into `stringData` and
//!   cleared, so the placeholder never has to be base64 encoded
//! - **Marked output**: every secret carries [`DRY_RUN_LABEL`] so it can be
//!   selected (and e.g. skipped during `kubectl apply`)

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::resource::{Secret, SECRET};

/// Value substituted for every non-empty secret value.
pub const PLACEHOLDER: &str = "KSOPS_DRY_RUN_PLACEHOLDER";

/// Label added to every generated secret.
pub const DRY_RUN_LABEL: &str = "ksops-dry-run.joshdk.github.com";

/// Load every secret in an encrypted file and redact it.
///
/// # Errors
///
/// Returns an error if:
/// - The file doesn't exist or cannot be read
/// - Any document in the file fails to parse
/// - Any document is not a `v1/Secret`
///
/// Nothing is returned for the file if any of its documents fails.
pub fn parse_encrypted_secrets(path: &Path) -> Result<Vec<Secret>> {
    let content = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_secret_stream(&content, path)
}

/// Decode a stream of YAML documents into redacted secrets, in stream order.
///
/// `origin` is only used to name the source in errors. A document that is
/// present but empty (`~`, or nothing after a `---`) decodes as a secret with
/// no identity and is rejected like any other non-secret document.
pub fn parse_secret_stream(content: &[u8], origin: &Path) -> Result<Vec<Secret>> {
    let mut secrets = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_slice(content).enumerate() {
        let mut secret = Option::<Secret>::deserialize(document)
            .map_err(|source| Error::DocumentParse {
                path: origin.to_path_buf(),
                source,
            })?
            .unwrap_or_default();

        SECRET
            .check(&secret.api_version, &secret.kind)
            .map_err(|mismatch| Error::SecretIdentity {
                path: origin.to_path_buf(),
                mismatch,
            })?;

        redact(&mut secret);

        tracing::debug!(
            file = %origin.display(),
            index,
            name = %secret.metadata.name,
            keys = secret.string_data.len(),
            "redacted secret"
        );

        secrets.push(secret);
    }

    Ok(secrets)
}

/// Replace every value of a secret with [`PLACEHOLDER`].
///
/// Keys from `stringData` and `data` are merged into `stringData`. Empty
/// values stay empty, since they are already visible in the encrypted file.
/// `data` is applied after `stringData`, so for a key present in both maps the
/// `data` value decides whether the result is empty.
pub fn redact(secret: &mut Secret) {
    for value in secret.string_data.values_mut() {
        *value = redacted_value(value).to_string();
    }

    let data = std::mem::take(&mut secret.data);
    merge_redacted(&mut secret.string_data, &data);

    secret
        .metadata
        .labels
        .insert(DRY_RUN_LABEL.to_string(), "true".to_string());
}

fn merge_redacted(target: &mut BTreeMap<String, String>, source: &BTreeMap<String, String>) {
    for (key, value) in source {
        target.insert(key.clone(), redacted_value(value).to_string());
    }
}

fn redacted_value(value: &str) -> &'static str {
    match value {
        "" => "",
        _ => PLACEHOLDER,
    }
}
