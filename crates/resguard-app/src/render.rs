//! Serialization and artifact writing.

use anyhow::Context;
use camino::Utf8Path;
use resguard_domain::DeletionImpact;
use resguard_types::GovernanceReport;

pub fn serialize_report(report: &GovernanceReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn serialize_impact(impact: &DeletionImpact) -> anyhow::Result<String> {
    serde_json::to_string_pretty(impact).context("serialize impact")
}

/// One id per line.
pub fn format_orphans(ids: &[String]) -> String {
    ids.iter().fold(String::new(), |mut out, id| {
        out.push_str(id);
        out.push('\n');
        out
    })
}

pub fn write_report(path: &Utf8Path, report: &GovernanceReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}
