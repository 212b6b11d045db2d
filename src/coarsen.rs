//! Address coarsening
//!
//! Maps raw byte addresses onto graph node identifiers at byte, cache-line,
//! or page resolution. Coarsening is a pure shift; an access that spans a
//! coarsening boundary is attributed to its start address, never split.

use serde::{Deserialize, Serialize};

/// Node identifier: a coarsened address
pub type NodeId = u64;

/// Address resolution for graph nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// No coarsening
    Byte,
    /// 64-byte cache lines
    Cacheline,
    /// 4 KiB pages
    Page,
}

impl Granularity {
    /// Number of low address bits discarded at this resolution
    pub fn shift_bits(&self) -> u32 {
        match self {
            Granularity::Byte => 0,
            Granularity::Cacheline => 6,
            Granularity::Page => 12,
        }
    }

    /// Block size in bytes at this resolution
    pub fn block_size(&self) -> u64 {
        1u64 << self.shift_bits()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Byte => "byte",
            Granularity::Cacheline => "cacheline",
            Granularity::Page => "page",
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = crate::error::MemGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "byte" => Ok(Granularity::Byte),
            "cacheline" | "line" => Ok(Granularity::Cacheline),
            "page" => Ok(Granularity::Page),
            other => Err(crate::error::MemGraphError::config(format!(
                "unknown granularity: {other} (expected byte, cacheline, or page)"
            ))),
        }
    }
}

/// Map an address to its node identifier at the given resolution
#[inline]
pub fn coarsen(address: u64, granularity: Granularity) -> NodeId {
    address >> granularity.shift_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_is_identity() {
        assert_eq!(coarsen(0x1234, Granularity::Byte), 0x1234);
        assert_eq!(coarsen(0, Granularity::Byte), 0);
        assert_eq!(coarsen(u64::MAX, Granularity::Byte), u64::MAX);
    }

    #[test]
    fn test_cacheline_shift() {
        assert_eq!(coarsen(0x1234, Granularity::Cacheline), 0x1234 >> 6);
        // All 64 bytes of a line map to the same node
        assert_eq!(
            coarsen(0x1000, Granularity::Cacheline),
            coarsen(0x103f, Granularity::Cacheline)
        );
        assert_ne!(
            coarsen(0x1000, Granularity::Cacheline),
            coarsen(0x1040, Granularity::Cacheline)
        );
    }

    #[test]
    fn test_page_shift() {
        assert_eq!(coarsen(0x1234, Granularity::Page), 1);
        assert_eq!(
            coarsen(0x2000, Granularity::Page),
            coarsen(0x2fff, Granularity::Page)
        );
    }

    #[test]
    fn test_line_crossing_access_attributes_to_start() {
        // An 8-byte access starting at the last byte of a line belongs to
        // that line, not the next one.
        let start = 0x103f;
        assert_eq!(
            coarsen(start, Granularity::Cacheline),
            coarsen(0x1000, Granularity::Cacheline)
        );
    }

    #[test]
    fn test_block_sizes() {
        assert_eq!(Granularity::Byte.block_size(), 1);
        assert_eq!(Granularity::Cacheline.block_size(), 64);
        assert_eq!(Granularity::Page.block_size(), 4096);
    }

    #[test]
    fn test_parse_granularity() {
        assert_eq!("byte".parse::<Granularity>().unwrap(), Granularity::Byte);
        assert_eq!(
            "CACHELINE".parse::<Granularity>().unwrap(),
            Granularity::Cacheline
        );
        assert_eq!("page".parse::<Granularity>().unwrap(), Granularity::Page);
        assert!("word".parse::<Granularity>().is_err());
    }
}
