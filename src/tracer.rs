//! Valgrind Lackey tracer invocation
//!
//! Shells out to `valgrind --tool=lackey --trace-mem=yes`, filters the
//! memory-access lines out of Lackey's stderr stream, and writes them to a
//! trace file the lackey parser consumes. The analysis core never calls
//! this; it is the collection front-end for the CLI.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Lackey install hint shown when valgrind is missing
pub const INSTALL_HINT: &str = "Valgrind not found. Install with:\n\
    \x20 Ubuntu/Debian: sudo apt install valgrind\n\
    \x20 macOS: brew install valgrind\n\
    \x20 Fedora: sudo dnf install valgrind";

/// Check whether a working valgrind is on PATH
pub fn valgrind_available() -> bool {
    Command::new("valgrind")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// True for the ` L addr,size` / ` S ...` / ` M ...` lines Lackey emits
fn is_access_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    (trimmed.starts_with("L ") || trimmed.starts_with("S ") || trimmed.starts_with("M "))
        && trimmed.contains(',')
}

/// Trace a binary under Lackey and write the access lines to `output`.
///
/// Returns the number of access lines captured.
pub fn trace_binary(binary: &Path, args: &[String], output: &Path) -> Result<usize> {
    if !valgrind_available() {
        bail!("{INSTALL_HINT}");
    }
    if !binary.is_file() {
        bail!("binary not found: {}", binary.display());
    }

    tracing::info!(binary = %binary.display(), "tracing under valgrind lackey");

    let run = Command::new("valgrind")
        .arg("--tool=lackey")
        .arg("--basic-counts=no")
        .arg("--trace-mem=yes")
        .arg(binary)
        .args(args)
        .output()
        .context("failed to launch valgrind")?;

    // Lackey writes the trace to stderr, interleaved with its banner
    let stderr = String::from_utf8_lossy(&run.stderr);
    let mut file = fs::File::create(output)
        .with_context(|| format!("cannot create trace file {}", output.display()))?;

    let mut captured = 0usize;
    for line in stderr.lines() {
        if is_access_line(line) {
            writeln!(file, "{line}")?;
            captured += 1;
        }
    }

    if captured == 0 {
        bail!(
            "trace is empty; the program may have crashed or performed no \
             memory accesses (valgrind exit: {})",
            run.status
        );
    }

    Ok(captured)
}
