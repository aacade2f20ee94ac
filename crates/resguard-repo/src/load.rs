use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use resguard_domain::{Policy, PolicyEngine};
use resguard_settings::ConfigError;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::discover::discover_rule_files;

/// What happened to one rule file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    /// `policies` counts enabled policies only.
    Loaded { policies: usize },
    /// Parsed, but there was no `policies` key.
    Skipped { reason: String },
    /// Unreadable or malformed. Contributed nothing.
    Failed { error: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: Utf8PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub root: Utf8PathBuf,
    /// False when `root` did not exist.
    pub root_found: bool,
    pub files: Vec<FileReport>,
    pub loaded: usize,
}

impl LoadSummary {
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

enum Parsed {
    Policies(Vec<Policy>),
    NoPoliciesKey,
    Failed(anyhow::Error),
}

fn parse_file(path: &Utf8Path) -> Parsed {
    let text = match std::fs::read_to_string(path).with_context(|| format!("read {}", path)) {
        Ok(text) => text,
        Err(err) => return Parsed::Failed(err),
    };
    match resguard_settings::parse_policies(&text) {
        Ok(policies) => Parsed::Policies(policies),
        Err(ConfigError::MissingPolicies) => Parsed::NoPoliciesKey,
        Err(err) => Parsed::Failed(anyhow::Error::new(err).context(format!("parse {}", path))),
    }
}

/// Load policies from a rule file or a directory of rule files into `engine`.
///
/// A single file is parsed whatever its extension. A directory is searched recursively for
/// `*.yaml` and then `*.yml`, each group in sorted order. Files are parsed in parallel but appended in that
/// order. Each file is all-or-nothing, and a bad file never stops the others from loading.
pub fn load_policies(engine: &mut PolicyEngine, root: &Utf8Path) -> LoadSummary {
    let mut summary = LoadSummary {
        root: root.to_path_buf(),
        root_found: true,
        files: Vec::new(),
        loaded: 0,
    };

    let files: Vec<Utf8PathBuf> = if root.is_file() {
        vec![root.to_path_buf()]
    } else if root.is_dir() {
        match discover_rule_files(root) {
            Ok(rel) => rel.into_iter().map(|p| root.join(p)).collect(),
            Err(err) => {
                error!(path = %root, "failed to discover policy files: {err:#}");
                Vec::new()
            }
        }
    } else {
        warn!(path = %root, "policy path not found");
        summary.root_found = false;
        return summary;
    };

    let parsed: Vec<(Utf8PathBuf, Parsed)> = files
        .into_par_iter()
        .map(|path| {
            let parsed = parse_file(&path);
            (path, parsed)
        })
        .collect();

    for (path, parsed) in parsed {
        let outcome = match parsed {
            Parsed::Policies(policies) => {
                let kept = engine.extend(policies);
                debug!(path = %path, policies = kept, "loaded policy file");
                FileOutcome::Loaded { policies: kept }
            }
            Parsed::NoPoliciesKey => {
                warn!(path = %path, "no 'policies' key");
                FileOutcome::Skipped {
                    reason: "no 'policies' key".to_string(),
                }
            }
            Parsed::Failed(err) => {
                error!(path = %path, "failed to load policy file: {err:#}");
                FileOutcome::Failed {
                    error: format!("{err:#}"),
                }
            }
        };
        if let FileOutcome::Loaded { policies } = outcome {
            summary.loaded += policies;
        }
        summary.files.push(FileReport { path, outcome });
    }

    info!(path = %root, count = summary.loaded, "loaded policies");
    summary
}

/// Count-only form of [`load_policies`]. Never fails; problems are logged.
pub fn load(engine: &mut PolicyEngine, root: &Utf8Path) -> usize {
    load_policies(engine, root).loaded
}
