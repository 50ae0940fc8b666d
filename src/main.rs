// ksops-dry-run - drop-in replacement for the ksops kustomize plugin
//
// This is the main entry point for the application.

use anyhow::Result;
use ksops_dry_run::plugin;
use ksops_dry_run::settings::Settings;
use std::ffi::OsString;
use std::io::{self, BufWriter};

fn run() -> Result<()> {
    let settings = Settings::from_env();
    let args: Vec<OsString> = std::env::args_os().collect();

    let stdout = io::stdout();
    plugin::run(&settings, &args, BufWriter::new(stdout.lock())).map_err(|e| {
        tracing::debug!(kind = %e.kind(), "invocation failed");
        e
    })?;

    Ok(())
}

fn main() {
    ksops_dry_run::logging::init();

    if let Err(e) = run() {
        eprintln!("ksops-dry-run: {}", e);
        std::process::exit(1);
    }
}
