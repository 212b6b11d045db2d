//! HTML report rendering
//!
//! Self-contained single-file report with embedded CSS: no external assets,
//! safe to attach to CI artifacts or mail around. All dynamic content is
//! escaped.

use crate::graphlets::ALL_GRAPHLETS;
use crate::result::AnalysisResult;

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn styles() -> &'static str {
    r#"
    body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif;
           margin: 2em auto; max-width: 60em; color: #222; }
    h1 { border-bottom: 2px solid #4a7; padding-bottom: 0.2em; }
    h2 { color: #357; margin-top: 1.5em; }
    table { border-collapse: collapse; margin: 0.5em 0; }
    th, td { border: 1px solid #ccc; padding: 0.3em 0.8em; text-align: right; }
    th { background: #eef; text-align: left; }
    td.name { text-align: left; }
    .bar { background: #4a7; height: 0.8em; display: inline-block; }
    .detected { font-size: 1.3em; font-weight: bold; color: #262; }
    .low-confidence { color: #a62; }
    ul.recs li { margin: 0.3em 0; }
    .meta { color: #777; font-size: 0.9em; }
    "#
}

/// Render the analysis result as a standalone HTML document
pub fn render(result: &AnalysisResult) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<h1>MemGraph Analysis Report</h1>\n<p class=\"meta\">Source: {} &middot; v{}</p>\n",
        escape_html(&result.trace_meta.source),
        escape_html(&result.version)
    ));

    // Trace and graph statistics side by side as two tables
    let meta = &result.trace_meta;
    body.push_str("<h2>Trace</h2>\n<table>\n");
    body.push_str(&format!(
        "<tr><th>Total accesses</th><td>{}</td></tr>\n",
        meta.total_accesses
    ));
    body.push_str(&format!(
        "<tr><th>Unique addresses</th><td>{}</td></tr>\n",
        meta.unique_addresses
    ));
    body.push_str(&format!(
        "<tr><th>Reads / Writes</th><td>{} / {}</td></tr>\n",
        meta.read_count, meta.write_count
    ));
    body.push_str(&format!(
        "<tr><th>Address range</th><td>{:#x} &ndash; {:#x}</td></tr>\n",
        meta.address_range.0, meta.address_range.1
    ));
    body.push_str("</table>\n");

    let stats = &result.graph_stats;
    body.push_str("<h2>Graph</h2>\n<table>\n");
    body.push_str(&format!(
        "<tr><th>Nodes</th><td>{}</td></tr>\n<tr><th>Edges</th><td>{}</td></tr>\n",
        stats.node_count, stats.edge_count
    ));
    body.push_str(&format!(
        "<tr><th>Density</th><td>{:.4}</td></tr>\n<tr><th>Avg degree</th><td>{:.2}</td></tr>\n",
        stats.density, stats.avg_degree
    ));
    body.push_str(&format!(
        "<tr><th>Avg clustering</th><td>{:.4}</td></tr>\n",
        stats.avg_clustering
    ));
    body.push_str("</table>\n");

    // Graphlet distribution with inline bars
    body.push_str("<h2>Graphlet Distribution</h2>\n");
    if result.sampled {
        body.push_str("<p class=\"meta\">Counts are sampled estimates.</p>\n");
    }
    body.push_str("<table>\n<tr><th>Graphlet</th><th>Count</th><th>Frequency</th><th></th></tr>\n");
    let norm = result.graphlet_counts.normalized();
    for g in ALL_GRAPHLETS {
        let freq = norm[g.index()];
        body.push_str(&format!(
            "<tr><td class=\"name\">{} ({})</td><td>{}</td><td>{:.3}</td>\
             <td><span class=\"bar\" style=\"width:{}px\"></span></td></tr>\n",
            g.id(),
            g.shape_name(),
            result.graphlet_counts.get(g),
            freq,
            (freq * 200.0).round() as u64
        ));
    }
    body.push_str("</table>\n");

    // Classification
    body.push_str("<h2>Classification</h2>\n");
    if result.empty_input {
        body.push_str("<p>Empty trace: nothing to classify.</p>\n");
    } else if let Some(best) = result.best_match() {
        let class = if best.low_confidence {
            "detected low-confidence"
        } else {
            "detected"
        };
        body.push_str(&format!(
            "<p class=\"{}\">{} <span class=\"meta\">({:.1}% confidence)</span></p>\n",
            class,
            escape_html(result.detected_pattern()),
            best.similarity * 100.0
        ));
        body.push_str("<table>\n<tr><th>Pattern</th><th>Similarity</th></tr>\n");
        for m in &result.classifications {
            body.push_str(&format!(
                "<tr><td class=\"name\">{}</td><td>{:.3}</td></tr>\n",
                escape_html(&m.pattern),
                m.similarity
            ));
        }
        body.push_str("</table>\n");

        body.push_str("<h2>Recommendations</h2>\n<ul class=\"recs\">\n");
        for rec in &best.recommendations {
            body.push_str(&format!("<li>{}</li>\n", escape_html(rec)));
        }
        body.push_str("</ul>\n");
    } else {
        body.push_str("<p>No structure found in the trace.</p>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>MemGraph Report</title>\n<style>{}</style>\n</head>\n\
         <body>\n{}</body>\n</html>\n",
        styles(),
        body
    )
}
