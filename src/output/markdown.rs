use crate::output::enrich_all;
use crate::ScanReport;

/// Render a scan report as a Markdown document with enrichment sections.
pub fn render(report: &ScanReport) -> String {
    let mut out = String::new();

    out.push_str("# apilens Scan Report\n\n");
    out.push_str(&format!("**URL**: {}\n\n", report.url));
    out.push_str(&format!("**Score**: {}/100\n\n", report.score));

    if report.findings.is_empty() {
        out.push_str("No issues detected.\n");
        return out;
    }

    out.push_str("## Issues\n\n");
    for (i, finding) in enrich_all(&report.findings).iter().enumerate() {
        out.push_str(&format!("### {}. `{}`\n\n", i + 1, finding.code));
        out.push_str(&format!("**Category**: {}  \n", finding.category));
        out.push_str(&format!("**Path**: `{}`\n\n", finding.path));

        if !finding.description.is_empty() {
            out.push_str(&format!("**Description:** {}\n\n", finding.description));
        }
        if !finding.recommendation.is_empty() {
            out.push_str(&format!(
                "**Recommendation:** {}\n\n",
                finding.recommendation
            ));
        }
        if !finding.references.is_empty() {
            out.push_str("**References:**\n");
            for reference in &finding.references {
                out.push_str(&format!("- <{reference}>\n"));
            }
            out.push('\n');
        }
    }

    out
}
