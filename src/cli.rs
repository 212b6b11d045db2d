//! CLI argument parsing and command dispatch

use crate::analysis::{analyze, AnalysisConfig, SamplingMode};
use crate::coarsen::Granularity;
use crate::generator::{self, SyntheticPattern};
use crate::parser::{parse_trace_file, write_native, TraceFormat};
use crate::patterns::builtin_patterns;
use crate::window::WindowStrategy;
use crate::{html_report, text_report, tracer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

/// Report output format for `analyze`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal report (default)
    Text,
    /// Full JSON result for tooling
    Json,
    /// Minimal JSON: pattern, confidence, recommendations
    JsonMinimal,
    /// Standalone HTML report
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "memgraph")]
#[command(version)]
#[command(about = "Memory access pattern analysis via graphlet signatures", long_about = None)]
pub struct Cli {
    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a trace file and report the detected access pattern
    Analyze {
        /// Path to the trace file
        trace_file: PathBuf,

        /// Trace format (auto-detected if not specified)
        #[arg(short = 'f', long = "trace-format")]
        trace_format: Option<String>,

        /// Report format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: ReportFormat,

        /// Window strategy: fixed, sliding, adaptive
        #[arg(short, long, default_value = "sliding")]
        window: String,

        /// Window size in accesses
        #[arg(long = "window-size", default_value = "100")]
        window_size: usize,

        /// Address granularity: byte, cacheline, page
        #[arg(short, long, default_value = "cacheline")]
        granularity: String,

        /// Minimum edge weight kept after the build pass
        #[arg(long = "min-weight", default_value = "1")]
        min_weight: u32,

        /// Sampling mode: auto, always, never
        #[arg(long, default_value = "auto")]
        sampling: String,

        /// Number of edge samples when sampling
        #[arg(long = "sample-size", default_value = "100000")]
        sample_size: usize,

        /// Classification confidence threshold in [0, 1]
        #[arg(long, default_value = "0.6")]
        threshold: f64,

        /// Number of ranked matches to report
        #[arg(long = "top-k", default_value = "3")]
        top_k: usize,

        /// RNG seed for sampling reproducibility
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a trace file and print summary statistics
    Parse {
        /// Path to the trace file
        trace_file: PathBuf,

        /// Trace format (auto-detected if not specified)
        #[arg(short = 'f', long = "trace-format")]
        trace_format: Option<String>,
    },

    /// Generate a synthetic trace in native format
    Generate {
        /// Pattern: sequential, strided, random, pointer_chase,
        /// working_set, producer_consumer
        pattern: String,

        /// Number of memory accesses
        #[arg(short = 'n', long, default_value = "10000")]
        size: usize,

        /// RNG seed for reproducibility
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run a binary under Valgrind Lackey and collect a trace
    Trace {
        /// Binary to trace
        binary: PathBuf,

        /// Arguments passed to the binary
        args: Vec<String>,

        /// Output trace file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List the built-in reference patterns
    Patterns,

    /// List supported trace formats
    Formats,
}

/// Execute a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze {
            trace_file,
            trace_format,
            format,
            window,
            window_size,
            granularity,
            min_weight,
            sampling,
            sample_size,
            threshold,
            top_k,
            seed,
            output,
        } => {
            let config = AnalysisConfig {
                granularity: granularity.parse::<Granularity>()?,
                window_strategy: window.parse::<WindowStrategy>()?,
                window_size,
                min_edge_weight: min_weight,
                sampling: sampling.parse::<SamplingMode>()?,
                sample_size,
                classifier_threshold: threshold,
                top_k,
                rng_seed: seed,
            };

            let trace_format = trace_format
                .map(|f| f.parse::<TraceFormat>())
                .transpose()?;
            let trace = parse_trace_file(&trace_file, trace_format)
                .with_context(|| format!("failed to parse {}", trace_file.display()))?;

            let result = analyze(&trace, &config, None)?;

            let rendered = match format {
                ReportFormat::Text => text_report::render(&result),
                ReportFormat::Json => result.to_json()?,
                ReportFormat::JsonMinimal => result.to_minimal_json()?,
                ReportFormat::Html => html_report::render(&result),
            };

            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    eprintln!("Report written to {}", path.display());
                }
                None => print!("{rendered}"),
            }
        }

        Command::Parse {
            trace_file,
            trace_format,
        } => {
            let trace_format = trace_format
                .map(|f| f.parse::<TraceFormat>())
                .transpose()?;
            let trace = parse_trace_file(&trace_file, trace_format)
                .with_context(|| format!("failed to parse {}", trace_file.display()))?;
            let meta = &trace.meta;

            println!("Source:           {}", meta.source);
            println!("Format:           {}", meta.format);
            println!("Total accesses:   {}", meta.total_accesses);
            println!("Unique addresses: {}", meta.unique_addresses);
            println!("Reads:            {}", meta.read_count);
            println!("Writes:           {}", meta.write_count);
            println!(
                "Address range:    {:#x} - {:#x}",
                meta.address_range.0, meta.address_range.1
            );
        }

        Command::Generate {
            pattern,
            size,
            seed,
            output,
        } => {
            let pattern = pattern.parse::<SyntheticPattern>()?;
            let trace = generator::generate(pattern, size, seed);
            write_native(&trace, &output)
                .with_context(|| format!("cannot write {}", output.display()))?;
            println!(
                "Generated {} accesses with pattern '{}' -> {}",
                size,
                pattern.name(),
                output.display()
            );
        }

        Command::Trace {
            binary,
            args,
            output,
        } => {
            let captured = tracer::trace_binary(&binary, &args, &output)?;
            println!(
                "Captured {} memory accesses -> {}",
                captured,
                output.display()
            );
        }

        Command::Patterns => {
            println!("{:<18} {}", "PATTERN", "DESCRIPTION");
            for p in builtin_patterns() {
                println!("{:<18} {}", p.name, p.description);
            }
        }

        Command::Formats => {
            println!("{:<8} {:<38} {}", "FORMAT", "DESCRIPTION", "EXAMPLE");
            println!("{:<8} {:<38} {}", "native", "MemGraph native format", "R,0x1000,8,1");
            println!("{:<8} {:<38} {}", "csv", "Simple CSV (op,address,size)", "R,0x1000,8");
            println!("{:<8} {:<38} {}", "lackey", "Valgrind Lackey --trace-mem output", " L 7ff000398,8");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::try_parse_from(["memgraph", "analyze", "trace.txt"]).unwrap();
        match cli.command {
            Command::Analyze {
                window,
                window_size,
                granularity,
                threshold,
                top_k,
                ..
            } => {
                assert_eq!(window, "sliding");
                assert_eq!(window_size, 100);
                assert_eq!(granularity, "cacheline");
                assert_eq!(threshold, 0.6);
                assert_eq!(top_k, 3);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_generate_requires_output() {
        assert!(Cli::try_parse_from(["memgraph", "generate", "sequential"]).is_err());
    }
}
