//! Memory trace data model
//!
//! A trace is an ordered sequence of memory access events plus summary
//! metadata. Timestamps are carried for reporting only; stream order is
//! authoritative for every downstream consumer.

use serde::{Deserialize, Serialize};

/// Kind of memory operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Memory load
    Read,
    /// Memory store
    Write,
    /// Read-modify-write (parsers expand this to a read followed by a write)
    Modify,
}

impl Operation {
    /// Single-letter symbol used by the native trace format
    pub fn symbol(&self) -> char {
        match self {
            Operation::Read => 'R',
            Operation::Write => 'W',
            Operation::Modify => 'M',
        }
    }
}

/// Single memory access event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryAccess {
    /// Operation kind
    pub operation: Operation,
    /// Raw byte address
    pub address: u64,
    /// Access size in bytes (1-64 typical)
    pub size: u32,
    /// Monotonically non-decreasing logical timestamp
    pub timestamp: u64,
}

impl MemoryAccess {
    pub fn new(operation: Operation, address: u64, size: u32, timestamp: u64) -> Self {
        Self {
            operation,
            address,
            size,
            timestamp,
        }
    }

    /// Shorthand for a read access
    pub fn read(address: u64, size: u32, timestamp: u64) -> Self {
        Self::new(Operation::Read, address, size, timestamp)
    }

    /// Shorthand for a write access
    pub fn write(address: u64, size: u32, timestamp: u64) -> Self {
        Self::new(Operation::Write, address, size, timestamp)
    }
}

/// Summary statistics for a trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceMeta {
    /// Where the trace came from (file path or `<generated:pattern>`)
    pub source: String,
    /// Format the trace was parsed from
    pub format: String,
    /// Total number of access records
    pub total_accesses: u64,
    /// Number of distinct raw addresses
    pub unique_addresses: u64,
    /// Number of read operations
    pub read_count: u64,
    /// Number of write operations
    pub write_count: u64,
    /// First and last timestamp observed
    pub timestamp_range: (u64, u64),
    /// Lowest and highest address observed
    pub address_range: (u64, u64),
}

impl TraceMeta {
    fn empty(source: &str, format: &str) -> Self {
        Self {
            source: source.to_string(),
            format: format.to_string(),
            total_accesses: 0,
            unique_addresses: 0,
            read_count: 0,
            write_count: 0,
            timestamp_range: (0, 0),
            address_range: (0, 0),
        }
    }
}

/// Container for a parsed or generated trace
#[derive(Debug, Clone)]
pub struct Trace {
    pub meta: TraceMeta,
    pub accesses: Vec<MemoryAccess>,
}

impl Trace {
    /// Build a trace and compute its metadata in one pass
    pub fn from_accesses(accesses: Vec<MemoryAccess>, source: &str, format: &str) -> Self {
        if accesses.is_empty() {
            return Self {
                meta: TraceMeta::empty(source, format),
                accesses,
            };
        }

        let mut unique = std::collections::HashSet::new();
        let mut read_count = 0u64;
        let mut write_count = 0u64;
        let mut min_addr = u64::MAX;
        let mut max_addr = 0u64;

        for acc in &accesses {
            unique.insert(acc.address);
            match acc.operation {
                Operation::Read => read_count += 1,
                Operation::Write => write_count += 1,
                Operation::Modify => {
                    read_count += 1;
                    write_count += 1;
                }
            }
            min_addr = min_addr.min(acc.address);
            max_addr = max_addr.max(acc.address);
        }

        let meta = TraceMeta {
            source: source.to_string(),
            format: format.to_string(),
            total_accesses: accesses.len() as u64,
            unique_addresses: unique.len() as u64,
            read_count,
            write_count,
            timestamp_range: (
                accesses.first().map(|a| a.timestamp).unwrap_or(0),
                accesses.last().map(|a| a.timestamp).unwrap_or(0),
            ),
            address_range: (min_addr, max_addr),
        };

        Self { meta, accesses }
    }

    pub fn len(&self) -> usize {
        self.accesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accesses.is_empty()
    }

    /// Iterate accesses in stream order
    pub fn iter(&self) -> impl Iterator<Item = &MemoryAccess> {
        self.accesses.iter()
    }
}
