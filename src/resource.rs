//! Kubernetes resource shapes consumed and produced by the plugin.
//!
//! Only the fields ksops cares about are modelled. Anything else in an input
//! document (most notably the `sops:` metadata block of an encrypted file) is
//! ignored on decode and therefore never written back out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The `apiVersion`/`kind` pair a document is required to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub api_version: &'static str,
    pub kind: &'static str,
}

/// Identity of a ksops generator config.
pub const KSOPS_GENERATOR: ResourceIdentity = ResourceIdentity {
    api_version: "viaduct.ai/v1",
    kind: "ksops",
};

/// Identity of a core secret.
pub const SECRET: ResourceIdentity = ResourceIdentity {
    api_version: "v1",
    kind: "Secret",
};

impl ResourceIdentity {
    /// Compare a decoded document against this identity.
    ///
    /// `apiVersion` is checked before `kind`; the first differing field is
    /// reported.
    pub fn check(&self, api_version: &str, kind: &str) -> Result<(), IdentityMismatch> {
        if api_version != self.api_version {
            return Err(IdentityMismatch {
                field: "apiVersion",
                expected: self.api_version,
                actual: api_version.to_string(),
            });
        }
        if kind != self.kind {
            return Err(IdentityMismatch {
                field: "kind",
                expected: self.kind,
                actual: kind.to_string(),
            });
        }
        Ok(())
    }
}

/// A single identity field that did not hold its expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMismatch {
    pub field: &'static str,
    pub expected: &'static str,
    pub actual: String,
}

impl fmt::Display for IdentityMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} but got {:?}",
            self.field, self.expected, self.actual
        )
    }
}

/// Standard object metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    #[serde(
        default,
        deserialize_with = "lenient::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: BTreeMap<String, String>,

    #[serde(
        default,
        deserialize_with = "lenient::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub namespace: String,
}

/// A `v1/Secret` resource.
///
/// `string_data` and `data` are kept as two independent maps; the redactor
/// folds both into `string_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    #[serde(rename = "apiVersion", default, deserialize_with = "lenient::string")]
    pub api_version: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub kind: String,

    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub metadata: ResourceMetadata,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub secret_type: String,

    #[serde(
        rename = "stringData",
        default,
        deserialize_with = "lenient::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub string_data: BTreeMap<String, String>,

    #[serde(
        default,
        deserialize_with = "lenient::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub data: BTreeMap<String, String>,

    #[serde(
        default,
        deserialize_with = "lenient::null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub immutable: bool,
}

/// Deserializers that accept the loosely-typed YAML found in hand-written
/// manifests: any scalar where a string is expected, `null` where a
/// collection is expected.
pub(crate) mod lenient {
    use serde::de::{Deserialize, Deserializer, Error};
    use serde_yaml::Value;
    use std::collections::BTreeMap;

    /// Treat an explicit `null` like a missing field.
    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        scalar_to_string(&value).map_err(D::Error::custom)
    }

    pub fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mapping = match Value::deserialize(deserializer)? {
            Value::Null => return Ok(BTreeMap::new()),
            Value::Mapping(mapping) => mapping,
            Value::Tagged(tagged) => match tagged.value {
                Value::Mapping(mapping) => mapping,
                other => return Err(D::Error::custom(unexpected("a mapping", &other))),
            },
            other => return Err(D::Error::custom(unexpected("a mapping", &other))),
        };

        let mut map = BTreeMap::new();
        for (key, value) in &mapping {
            let key = scalar_to_string(key).map_err(D::Error::custom)?;
            let value = scalar_to_string(value).map_err(D::Error::custom)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    fn scalar_to_string(value: &Value) -> Result<String, String> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::Tagged(tagged) => scalar_to_string(&tagged.value),
            other => Err(unexpected("a string", other)),
        }
    }

    fn unexpected(expected: &str, value: &Value) -> String {
        let found = match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Sequence(_) => "a sequence",
            Value::Mapping(_) => "a mapping",
            Value::Tagged(_) => "a tagged value",
        };
        format!("invalid type: {}, expected {}", found, expected)
    }
}
