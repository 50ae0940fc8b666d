// ksops-dry-run Settings Module
//
// Snapshot of the environment kustomize sets up for an exec plugin, taken
// once at startup and passed explicitly to the rest of the crate.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Presence (with any value, even empty) selects dry-run mode.
pub const DRY_RUN_VAR: &str = "KSOPS_DRY_RUN";

/// Path to the real ksops plugin, used in pass-through mode.
pub const KSOPS_PATH_VAR: &str = "KSOPS_PATH";

/// Literal YAML of the generator config.
/// See https://github.com/viaduct-ai/kustomize-sops#6-define-ksops-kustomize-generator.
pub const CONFIG_STRING_VAR: &str = "KUSTOMIZE_PLUGIN_CONFIG_STRING";

/// Directory containing the generator; encrypted files are relative to it.
pub const CONFIG_ROOT_VAR: &str = "KUSTOMIZE_PLUGIN_CONFIG_ROOT";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub dry_run: bool,
    pub ksops_path: Option<PathBuf>,
    pub config_string: Option<String>,
    pub config_root: Option<PathBuf>,
}

/// What this invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Replace this process with the real ksops plugin.
    PassThrough { ksops_path: PathBuf },
    /// Emit placeholder secrets.
    DryRun {
        config: String,
        config_root: PathBuf,
    },
}

impl Settings {
    /// Read the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Build settings from arbitrary variables. Empty values count as unset,
    /// except for [`DRY_RUN_VAR`] where only presence matters.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut settings = Settings::default();

        for (key, value) in vars {
            let key = key.into();
            let value = value.into();

            if key == DRY_RUN_VAR {
                settings.dry_run = true;
                continue;
            }
            if value.is_empty() {
                continue;
            }

            if key == KSOPS_PATH_VAR {
                settings.ksops_path = Some(PathBuf::from(value));
            } else if key == CONFIG_STRING_VAR {
                settings.config_string = Some(value.to_string_lossy().into_owned());
            } else if key == CONFIG_ROOT_VAR {
                settings.config_root = Some(PathBuf::from(value));
            }
        }

        settings
    }

    /// Decide between pass-through and dry-run, requiring only the variables
    /// the chosen mode needs.
    pub fn mode(&self) -> Result<Mode> {
        if !self.dry_run {
            let ksops_path = self.ksops_path.clone().ok_or(Error::MissingConfig {
                variable: KSOPS_PATH_VAR,
            })?;
            return Ok(Mode::PassThrough { ksops_path });
        }

        let config = self.config_string.clone().ok_or(Error::MissingConfig {
            variable: CONFIG_STRING_VAR,
        })?;
        let config_root = self.config_root.clone().ok_or(Error::MissingConfig {
            variable: CONFIG_ROOT_VAR,
        })?;

        Ok(Mode::DryRun {
            config,
            config_root,
        })
    }
}
