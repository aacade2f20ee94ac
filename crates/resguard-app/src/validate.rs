//! The `validate` use case: load rule files and report what each one contributed.

use camino::Utf8Path;
use resguard_domain::PolicyEngine;
use resguard_repo::{FileOutcome, LoadSummary};

use crate::config::policy_roots;

#[derive(Clone, Debug)]
pub struct ValidateOutput {
    pub summaries: Vec<LoadSummary>,
    /// Enabled policies across all paths.
    pub total: usize,
}

impl ValidateOutput {
    /// True when a rule file failed or a path did not exist.
    pub fn has_failures(&self) -> bool {
        self.summaries
            .iter()
            .any(|s| !s.root_found || s.has_failures())
    }
}

pub fn run_validate(root: &Utf8Path, paths: &[String]) -> ValidateOutput {
    let mut engine = PolicyEngine::new();
    let summaries: Vec<LoadSummary> = policy_roots(root, paths)
        .iter()
        .map(|path| resguard_repo::load_policies(&mut engine, path))
        .collect();
    ValidateOutput {
        summaries,
        total: engine.len(),
    }
}

/// One line per file, then a total.
pub fn format_validation(output: &ValidateOutput) -> String {
    let mut out = String::new();
    for summary in &output.summaries {
        if !summary.root_found {
            out.push_str(&format!("missing  {}\n", summary.root));
            continue;
        }
        for file in &summary.files {
            let line = match &file.outcome {
                FileOutcome::Loaded { policies } => format!("ok       {} ({} policies)", file.path, policies),
                FileOutcome::Skipped { reason } => format!("skipped  {} ({})", file.path, reason),
                FileOutcome::Failed { error } => format!("failed   {}: {}", file.path, error),
            };
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push_str(&format!("{} policies loaded\n", output.total));
    out
}
