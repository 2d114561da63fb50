//! Human-readable analysis report

use crate::analysis::AnalysisResult;
use crate::analyzer::keywords::HEADING_TAGS;

/// Lists longer than this are cut short in the report
const MAX_LISTED: usize = 20;

/// Formats an analysis result as a plain-text report
///
/// # Arguments
///
/// * `result` - The analysis result to format
///
/// # Returns
///
/// The report text, ending in a newline
pub fn format_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("=== Page Analysis ===\n\n");

    out.push_str("Overview:\n");
    out.push_str(&format!("  URL: {}\n", result.url));
    out.push_str(&format!("  Status: {}\n", result.status_code));
    out.push_str(&format!("  HTML version: {}\n", result.html_version));
    let title = if result.title.is_empty() {
        "(none)"
    } else {
        result.title.as_str()
    };
    out.push_str(&format!("  Title: {}\n", title));
    out.push_str(&format!(
        "  Login form: {}\n",
        if result.has_login_form { "yes" } else { "no" }
    ));
    out.push_str(&format!("  Content length: {} bytes\n", result.content_length));
    out.push_str(&format!("  Load time: {} ms\n\n", result.load_time.as_millis()));

    out.push_str(&format!("Headings ({}):\n", result.heading_total()));
    if result.headings.is_empty() {
        out.push_str("  (none)\n");
    }
    for tag in HEADING_TAGS {
        if let Some(count) = result.headings.get(*tag) {
            out.push_str(&format!("  {}: {}\n", tag, count));
        }
    }
    out.push('\n');

    let links = &result.links;
    out.push_str("Links:\n");
    out.push_str(&format!("  Internal: {}\n", links.internal));
    out.push_str(&format!("  External: {}\n", links.external));
    out.push_str(&format!("  Inaccessible: {}\n", links.inaccessible));
    if links.unchecked > 0 {
        out.push_str(&format!("  Unchecked (canceled): {}\n", links.unchecked));
    }
    out.push('\n');

    push_list(&mut out, "External Hosts", &links.external_hosts);
    push_list(&mut out, "Broken Links", &links.broken_links);

    out
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    out.push_str(&format!("{} ({}):\n", heading, items.len()));
    for item in items.iter().take(MAX_LISTED) {
        out.push_str(&format!("  - {}\n", item));
    }
    if items.len() > MAX_LISTED {
        out.push_str(&format!("  ... and {} more\n", items.len() - MAX_LISTED));
    }
    out.push('\n');
}

/// Prints the report to stdout
pub fn print_report(result: &AnalysisResult) {
    print!("{}", format_report(result));
}

/// Renders an analysis result as pretty-printed JSON
pub fn format_json(result: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
