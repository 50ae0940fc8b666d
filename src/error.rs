//! Error type shared by every stage of the plugin.

use std::fmt;
use std::path::PathBuf;

use crate::resource::IdentityMismatch;

/// Everything that can abort an invocation.
///
/// No variant is recoverable: the binary reports the first error it sees on
/// a single line and exits non-zero.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("required environment variable {variable} was not found")]
    MissingConfig { variable: &'static str },

    #[error("failed to parse ksops generator config: {0}")]
    ConfigParse(#[source] serde_yaml::Error),

    #[error("expected ksops generator config {mismatch}")]
    ConfigIdentity { mismatch: IdentityMismatch },

    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    DocumentParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: expected ksops encrypted secret {mismatch}", path.display())]
    SecretIdentity {
        path: PathBuf,
        mismatch: IdentityMismatch,
    },

    #[error("failed to encode secret: {0}")]
    Encode(#[source] serde_yaml::Error),

    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to exec {}: {source}", path.display())]
    Delegation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of [`Error`], mirroring the failure categories a
/// caller may want to branch on without matching every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingConfig,
    ConfigParse,
    ConfigIdentity,
    Io,
    DocumentParse,
    SecretIdentity,
    Encode,
    Delegation,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingConfig { .. } => ErrorKind::MissingConfig,
            Error::ConfigParse(_) => ErrorKind::ConfigParse,
            Error::ConfigIdentity { .. } => ErrorKind::ConfigIdentity,
            Error::Io { .. } => ErrorKind::Io,
            Error::DocumentParse { .. } => ErrorKind::DocumentParse,
            Error::SecretIdentity { .. } => ErrorKind::SecretIdentity,
            Error::Encode(_) | Error::Write(_) => ErrorKind::Encode,
            Error::Delegation { .. } => ErrorKind::Delegation,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingConfig => "missing config",
            ErrorKind::ConfigParse => "config parse",
            ErrorKind::ConfigIdentity => "config identity",
            ErrorKind::Io => "io",
            ErrorKind::DocumentParse => "document parse",
            ErrorKind::SecretIdentity => "secret identity",
            ErrorKind::Encode => "encode",
            ErrorKind::Delegation => "delegation",
        };
        f.write_str(name)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
