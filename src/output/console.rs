use crate::ScanReport;

/// Compact terminal listing: score, then one line per finding with its
/// remediation hint.
pub fn render(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n  {} — score {}/100\n\n",
        report.url, report.score
    ));

    if report.findings.is_empty() {
        output.push_str("  No issues detected.\n\n");
        return output;
    }

    for finding in &report.findings {
        let extras = crate::knowledge::enrich(finding.code);
        output.push_str(&format!(
            "  [{}] {} {}\n",
            finding.category, finding.code, finding.path
        ));
        if !extras.recommendation.is_empty() {
            output.push_str(&format!("           fix: {}\n", extras.recommendation));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "  {} finding(s), score {}/100\n\n",
        report.findings.len(),
        report.score
    ));

    output
}
