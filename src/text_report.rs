//! Terminal report rendering
//!
//! Plain aligned text: trace statistics, graph statistics, the graphlet
//! distribution as a bar chart, the classification ranking, and the
//! recommendation list. Renders to a string so the CLI owns the printing.

use crate::graphlets::ALL_GRAPHLETS;
use crate::result::AnalysisResult;

const BAR_WIDTH: usize = 25;
const RANK_BAR_WIDTH: usize = 20;

/// Render the full human-readable report
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();

    header(&mut out, result);
    trace_stats(&mut out, result);
    graph_stats(&mut out, result);
    graphlet_distribution(&mut out, result);
    classification(&mut out, result);
    recommendations(&mut out, result);

    out
}

fn header(out: &mut String, result: &AnalysisResult) {
    out.push_str("============================================================\n");
    out.push_str(&format!("MemGraph Analysis Report (v{})\n", result.version));
    out.push_str(&format!("Source: {}\n", result.trace_meta.source));
    out.push_str("============================================================\n\n");
}

fn trace_stats(out: &mut String, result: &AnalysisResult) {
    let meta = &result.trace_meta;
    out.push_str("Trace Statistics\n");
    out.push_str("----------------\n");
    out.push_str(&format!("  Total accesses:   {:>12}\n", meta.total_accesses));
    out.push_str(&format!("  Unique addresses: {:>12}\n", meta.unique_addresses));

    let total = meta.total_accesses.max(1) as f64;
    out.push_str(&format!(
        "  Reads:            {:>12} ({:.1}%)\n",
        meta.read_count,
        meta.read_count as f64 / total * 100.0
    ));
    out.push_str(&format!(
        "  Writes:           {:>12} ({:.1}%)\n",
        meta.write_count,
        meta.write_count as f64 / total * 100.0
    ));
    out.push_str(&format!(
        "  Address range:    {:#x} - {:#x}\n\n",
        meta.address_range.0, meta.address_range.1
    ));
}

fn graph_stats(out: &mut String, result: &AnalysisResult) {
    let stats = &result.graph_stats;
    out.push_str("Graph Statistics\n");
    out.push_str("----------------\n");
    out.push_str(&format!("  Nodes:            {:>12}\n", stats.node_count));
    out.push_str(&format!("  Edges:            {:>12}\n", stats.edge_count));
    out.push_str(&format!("  Density:          {:>12.4}\n", stats.density));
    out.push_str(&format!("  Avg degree:       {:>12.2}\n", stats.avg_degree));
    out.push_str(&format!("  Max degree:       {:>12}\n", stats.max_degree));
    out.push_str(&format!(
        "  Components:       {:>12}\n",
        stats.connected_components
    ));
    out.push_str(&format!(
        "  Avg clustering:   {:>12.4}\n\n",
        stats.avg_clustering
    ));
}

fn graphlet_distribution(out: &mut String, result: &AnalysisResult) {
    out.push_str("Graphlet Distribution");
    if result.sampled {
        out.push_str(" (sampled estimates)");
    }
    out.push('\n');
    out.push_str("---------------------\n");

    let counts = &result.graphlet_counts;
    let norm = counts.normalized();
    let max_freq = norm.iter().cloned().fold(0.0f64, f64::max).max(f64::MIN_POSITIVE);

    for g in ALL_GRAPHLETS {
        let freq = norm[g.index()];
        let bar_len = (freq / max_freq * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "  {:<3}{:<16} {:>12}  {:>6.3}  {}\n",
            g.id(),
            g.shape_name(),
            counts.get(g),
            freq,
            "#".repeat(bar_len)
        ));
    }
    out.push_str(&format!("  Total graphlets: {}\n", counts.total()));
    if let Some(dominant) = counts.dominant() {
        out.push_str(&format!("  Dominant: {}\n", dominant.shape_name()));
    }
    out.push('\n');
}

fn classification(out: &mut String, result: &AnalysisResult) {
    out.push_str("Pattern Classification\n");
    out.push_str("----------------------\n");

    if result.empty_input {
        out.push_str("  Empty trace: nothing to classify.\n\n");
        return;
    }
    if result.classifications.is_empty() {
        out.push_str("  No structure found in the trace.\n\n");
        return;
    }

    out.push_str(&format!("  Detected: {}\n", result.detected_pattern()));
    if let Some(best) = result.best_match() {
        out.push_str(&format!("  Confidence: {:.1}%\n", best.similarity * 100.0));
        if best.low_confidence {
            out.push_str(&format!(
                "  (below threshold; nearest pattern was {})\n",
                best.pattern
            ));
        }
        let evidence: Vec<String> = best
            .top_features
            .iter()
            .map(|f| format!("{} ({:.3})", f.graphlet.id(), f.contribution))
            .collect();
        out.push_str(&format!("  Evidence: {}\n", evidence.join(", ")));
    }

    out.push('\n');
    for m in &result.classifications {
        let bar_len = (m.similarity * RANK_BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "  {:<18} {:>5.1}%  {}{}\n",
            m.pattern,
            m.similarity * 100.0,
            "#".repeat(bar_len),
            "-".repeat(RANK_BAR_WIDTH - bar_len.min(RANK_BAR_WIDTH)),
        ));
    }
    out.push('\n');
}

fn recommendations(out: &mut String, result: &AnalysisResult) {
    out.push_str("Recommendations\n");
    out.push_str("---------------\n");
    match result.best_match() {
        Some(best) if !best.recommendations.is_empty() => {
            for rec in &best.recommendations {
                out.push_str(&format!("  * {rec}\n"));
            }
        }
        _ => out.push_str("  No specific recommendations.\n"),
    }
}
