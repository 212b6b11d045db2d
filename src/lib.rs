//! MemGraph - memory access pattern analysis via graphlet signatures
//!
//! Ingests a chronologically ordered memory-access trace, builds a temporal
//! adjacency graph over coarsened addresses, counts the nine connected
//! induced subgraphs on 2-4 nodes, and classifies the normalized frequency
//! vector against reference patterns (sequential, strided, random,
//! pointer-chase, working-set, producer-consumer).
//!
//! # Pipeline
//!
//! ```text
//! AccessStream -> GraphBuilder -> Graph -> enumeration -> GraphletCounts
//!                                                             |
//!                                                         Signature
//!                                                             |
//!                                              Classifier -> AnalysisResult
//! ```
//!
//! # Example
//!
//! ```
//! use memgraph::analysis::{analyze, AnalysisConfig};
//! use memgraph::generator;
//!
//! # fn main() -> memgraph::error::Result<()> {
//! let trace = generator::working_set(5_000, 32, 0x1000);
//! let result = analyze(&trace, &AnalysisConfig::default(), None)?;
//!
//! assert_eq!(result.detected_pattern(), "WORKING_SET");
//! assert!(result.best_match().unwrap().similarity >= 0.6);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod builder;
pub mod cancel;
pub mod classifier;
pub mod cli;
pub mod coarsen;
pub mod enumerate;
pub mod error;
pub mod generator;
pub mod graph;
pub mod graphlets;
pub mod html_report;
pub mod parser;
pub mod patterns;
pub mod result;
pub mod sample;
pub mod signature;
pub mod text_report;
pub mod trace;
pub mod tracer;
pub mod window;
