//! Trace file parsing
//!
//! Three textual formats with auto-detection:
//!
//! - **native**: `# MemGraph Trace v1` header, then `op,address,size,timestamp`
//! - **csv**: `op,address,size` header row, synthetic timestamps
//! - **lackey**: Valgrind Lackey `--trace-mem=yes` output (` L addr,size`,
//!   ` S addr,size`, ` M addr,size`); instruction fetches are ignored
//!
//! Modify records expand to a read followed by a write. Addresses parse as
//! hex with or without a `0x` prefix, falling back to decimal. Unknown or
//! malformed data lines are skipped with a warning rather than aborting the
//! parse; only a missing header is fatal.

use crate::error::{MemGraphError, Result};
use crate::trace::{MemoryAccess, Operation, Trace};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Header line identifying the native format
pub const NATIVE_HEADER: &str = "# MemGraph Trace v1";

/// Supported trace file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    Native,
    Csv,
    Lackey,
}

impl TraceFormat {
    pub fn name(&self) -> &'static str {
        match self {
            TraceFormat::Native => "native",
            TraceFormat::Csv => "csv",
            TraceFormat::Lackey => "lackey",
        }
    }
}

impl std::str::FromStr for TraceFormat {
    type Err = MemGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(TraceFormat::Native),
            "csv" => Ok(TraceFormat::Csv),
            "lackey" => Ok(TraceFormat::Lackey),
            other => Err(MemGraphError::trace_format(format!(
                "unknown format: {other} (expected native, csv, or lackey)"
            ))),
        }
    }
}

/// Guess the format of trace content; native first (explicit header), then
/// csv (header row), lackey last because it is the most ambiguous.
pub fn detect_format(content: &str) -> Option<TraceFormat> {
    let first = content.lines().next()?.trim();
    if first == NATIVE_HEADER {
        return Some(TraceFormat::Native);
    }
    let lowered = first.to_ascii_lowercase();
    if lowered.split(',').any(|f| f.trim() == "op")
        && lowered.split(',').any(|f| f.trim() == "address")
    {
        return Some(TraceFormat::Csv);
    }
    for line in content.lines().take(16) {
        let trimmed = line.trim_start();
        if (trimmed.starts_with("L ") || trimmed.starts_with("S ") || trimmed.starts_with("M "))
            && trimmed.contains(',')
        {
            return Some(TraceFormat::Lackey);
        }
    }
    None
}

/// Parse a trace file, auto-detecting the format when none is given
pub fn parse_trace_file(path: &Path, format: Option<TraceFormat>) -> Result<Trace> {
    let content = fs::read_to_string(path)?;
    let format = match format {
        Some(f) => f,
        None => detect_format(&content).ok_or_else(|| {
            MemGraphError::trace_format(format!(
                "could not detect format of {}; specify one explicitly",
                path.display()
            ))
        })?,
    };
    parse_str(&content, format, &path.display().to_string())
}

/// Parse trace content in a known format
pub fn parse_str(content: &str, format: TraceFormat, source: &str) -> Result<Trace> {
    let accesses = match format {
        TraceFormat::Native => parse_native(content)?,
        TraceFormat::Csv => parse_csv(content)?,
        TraceFormat::Lackey => parse_lackey(content),
    };
    Ok(Trace::from_accesses(accesses, source, format.name()))
}

/// Parse an address written as hex (with or without `0x`) or decimal
fn parse_address(field: &str) -> Option<u64> {
    let field = field.trim();
    if let Some(hex) = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).ok();
    }
    u64::from_str_radix(field, 16)
        .ok()
        .or_else(|| field.parse::<u64>().ok())
}

fn parse_native(content: &str) -> Result<Vec<MemoryAccess>> {
    let mut lines = content.lines();
    let header = lines.next().map(str::trim).unwrap_or("");
    if header != NATIVE_HEADER {
        return Err(MemGraphError::trace_format(format!(
            "invalid native trace: expected header '{NATIVE_HEADER}', got '{header}'"
        )));
    }

    let mut accesses = Vec::new();
    let mut skipped = 0usize;
    for (line_num, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_native_line(line) {
            Some(records) => accesses.extend(records),
            None => {
                skipped += 1;
                tracing::warn!(line = line_num + 2, content = line, "skipping unparseable trace line");
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "native trace contained unparseable lines");
    }
    Ok(accesses)
}

/// One native record; modify expands to read-then-write
fn parse_native_line(line: &str) -> Option<Vec<MemoryAccess>> {
    let mut parts = line.split(',');
    let op = parts.next()?.trim().to_ascii_uppercase();
    let address = parse_address(parts.next()?)?;
    let size: u32 = parts.next()?.trim().parse().ok()?;
    let timestamp: u64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    match op.as_str() {
        "R" => Some(vec![MemoryAccess::new(Operation::Read, address, size, timestamp)]),
        "W" => Some(vec![MemoryAccess::new(Operation::Write, address, size, timestamp)]),
        "M" => Some(vec![
            MemoryAccess::new(Operation::Read, address, size, timestamp),
            MemoryAccess::new(Operation::Write, address, size, timestamp),
        ]),
        _ => None,
    }
}

fn parse_csv(content: &str) -> Result<Vec<MemoryAccess>> {
    let mut lines = content.lines();
    let header = lines.next().map(str::trim).unwrap_or("").to_ascii_lowercase();
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let op_idx = columns.iter().position(|&c| c == "op");
    let addr_idx = columns.iter().position(|&c| c == "address");
    let size_idx = columns.iter().position(|&c| c == "size");
    let (op_idx, addr_idx, size_idx) = match (op_idx, addr_idx, size_idx) {
        (Some(o), Some(a), Some(s)) => (o, a, s),
        _ => {
            return Err(MemGraphError::trace_format(format!(
                "csv trace missing required headers op,address,size (got '{header}')"
            )))
        }
    };

    let mut accesses = Vec::new();
    let mut timestamp = 0u64;
    for (line_num, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        let parsed = (|| {
            let op = fields.get(op_idx)?.trim().to_ascii_uppercase();
            let address = parse_address(fields.get(addr_idx)?)?;
            let size: u32 = fields.get(size_idx)?.trim().parse().ok()?;
            let operation = match op.as_str() {
                "R" => Operation::Read,
                "W" => Operation::Write,
                "M" => Operation::Modify,
                _ => return None,
            };
            Some((operation, address, size))
        })();

        match parsed {
            Some((Operation::Modify, address, size)) => {
                accesses.push(MemoryAccess::new(Operation::Read, address, size, timestamp));
                timestamp += 1;
                accesses.push(MemoryAccess::new(Operation::Write, address, size, timestamp));
                timestamp += 1;
            }
            Some((operation, address, size)) => {
                accesses.push(MemoryAccess::new(operation, address, size, timestamp));
                timestamp += 1;
            }
            None => {
                tracing::warn!(line = line_num + 2, content = line, "skipping unparseable csv row");
            }
        }
    }
    Ok(accesses)
}

/// Lackey output never fails as a whole; unrecognized lines are skipped
fn parse_lackey(content: &str) -> Vec<MemoryAccess> {
    let mut accesses = Vec::new();
    let mut timestamp = 0u64;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || line.starts_with('I') || trimmed.starts_with("==") {
            // Instruction fetches and valgrind banners
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let (op, addr_size) = match (parts.next(), parts.next(), parts.next()) {
            (Some(op), Some(rest), None) => (op, rest),
            _ => continue,
        };
        let Some((addr_str, size_str)) = addr_size.split_once(',') else {
            continue;
        };
        let (Ok(address), Ok(size)) = (
            u64::from_str_radix(addr_str, 16),
            size_str.parse::<u32>(),
        ) else {
            tracing::warn!(content = trimmed, "skipping unparseable lackey line");
            continue;
        };

        match op {
            "L" => {
                accesses.push(MemoryAccess::new(Operation::Read, address, size, timestamp));
                timestamp += 1;
            }
            "S" => {
                accesses.push(MemoryAccess::new(Operation::Write, address, size, timestamp));
                timestamp += 1;
            }
            "M" => {
                accesses.push(MemoryAccess::new(Operation::Read, address, size, timestamp));
                timestamp += 1;
                accesses.push(MemoryAccess::new(Operation::Write, address, size, timestamp));
                timestamp += 1;
            }
            _ => {}
        }
    }
    accesses
}

/// Write a trace in the native format
pub fn write_native(trace: &Trace, path: &Path) -> Result<()> {
    let mut file = fs::File::create(path)?;
    writeln!(file, "{NATIVE_HEADER}")?;
    for access in trace.iter() {
        writeln!(
            file,
            "{},{:#x},{},{}",
            access.operation.symbol(),
            access.address,
            access.size,
            access.timestamp
        )?;
    }
    Ok(())
}
