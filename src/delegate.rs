//! Hand-off to the real ksops plugin.

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Replace the current process with `program`, forwarding `args` (including
/// `argv[0]`) and the environment unchanged.
///
/// On success this never returns.
///
/// # Errors
///
/// Returns an error if the program cannot be executed (missing file, not
/// executable, ...).
#[cfg(unix)]
pub fn exec(program: &Path, args: &[OsString]) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;

    let mut command = Command::new(program);
    if let Some((argv0, rest)) = args.split_first() {
        command.arg0(argv0).args(rest);
    }

    tracing::debug!(program = %program.display(), args = args.len(), "exec");

    let source = command.exec();
    Err(Error::Delegation {
        path: program.to_path_buf(),
        source,
    })
}

/// Without `execve`, run `program` as a child with inherited standard
/// streams and exit with its status.
#[cfg(not(unix))]
pub fn exec(program: &Path, args: &[OsString]) -> Result<Infallible> {
    let rest = args.get(1..).unwrap_or_default();

    tracing::debug!(program = %program.display(), args = args.len(), "spawn");

    let status = Command::new(program)
        .args(rest)
        .status()
        .map_err(|source| Error::Delegation {
            path: program.to_path_buf(),
            source,
        })?;

    std::process::exit(status.code().unwrap_or(1))
}
