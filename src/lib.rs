//! ksops-dry-run - a stand-in for the ksops kustomize plugin.
//!
//! Without `KSOPS_DRY_RUN` set, the real ksops plugin is executed in place of
//! this process. With it set, the secrets referenced by the generator config
//! are emitted with every value replaced by a placeholder, without decrypting
//! anything.

pub mod config;
pub mod delegate;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod plugin;
pub mod resource;
pub mod secrets;
pub mod settings;

pub use error::{Error, ErrorKind, Result};
