pub mod console;
pub mod json;
pub mod markdown;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::knowledge;
use crate::rules::{Category, Finding, FindingCode};
use crate::ScanReport;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// A finding paired with its knowledge-base enrichment, the shape the
/// structured renderers emit.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedFinding {
    pub code: FindingCode,
    pub category: Category,
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub recommendation: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl From<&Finding> for EnrichedFinding {
    fn from(finding: &Finding) -> Self {
        let extras = knowledge::enrich(finding.code);
        Self {
            code: finding.code,
            category: finding.category,
            path: finding.path.clone(),
            description: extras.description,
            recommendation: extras.recommendation,
            references: extras.references,
        }
    }
}

pub fn enrich_all(findings: &[Finding]) -> Vec<EnrichedFinding> {
    findings.iter().map(EnrichedFinding::from).collect()
}

/// Render a scan report in the specified format.
pub fn render(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(report)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => Ok(markdown::render(report)),
    }
}
