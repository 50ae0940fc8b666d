//! Plugin driver tying settings, parsing, redaction and output together.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::delegate;
use crate::encoder::SecretEncoder;
use crate::error::Result;
use crate::secrets::parse_encrypted_secrets;
use crate::settings::{Mode, Settings};

/// Run one plugin invocation.
///
/// In pass-through mode this only returns on failure: the process is replaced
/// by the real ksops plugin, which receives `args` unchanged.
pub fn run<W: Write>(settings: &Settings, args: &[OsString], out: W) -> Result<W> {
    match settings.mode()? {
        Mode::PassThrough { ksops_path } => {
            tracing::debug!(ksops = %ksops_path.display(), "passing through to ksops");
            match delegate::exec(&ksops_path, args)? {}
        }
        Mode::DryRun {
            config,
            config_root,
        } => run_dry_run(&config, &config_root, out),
    }
}

/// Generate placeholder secrets for every file referenced by a generator
/// config.
///
/// Secrets are written as soon as each file has been processed, in config
/// file order and then document order. The writer is handed back after the
/// stream has been closed and flushed.
pub fn run_dry_run<W: Write>(config: &str, config_root: &Path, out: W) -> Result<W> {
    let config = GeneratorConfig::parse(config)?;
    tracing::debug!(
        generator = %config.metadata.name,
        files = config.files.len(),
        "parsed generator config"
    );

    let mut encoder = SecretEncoder::new(out);

    for path in config.resolve_files(config_root) {
        tracing::debug!(file = %path.display(), "processing encrypted secrets");

        for secret in parse_encrypted_secrets(&path)? {
            encoder.encode(&secret)?;
        }
    }

    tracing::info!(secrets = encoder.documents(), "generated dry-run secrets");
    encoder.finish()
}
