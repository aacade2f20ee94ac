use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

const RULE_FILE_GLOBS: &[&str] = &["**/*.yaml", "**/*.yml"];

/// Discover rule files under `root`, recursively.
///
/// Returns paths relative to `root` with `/` separators. Each pattern in `RULE_FILE_GLOBS`
/// forms its own group sorted by relative path, and groups follow pattern order: every
/// `.yaml` file comes before any `.yml` file.
pub fn discover_rule_files(root: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let set = build_globset(RULE_FILE_GLOBS).context("compile rule-file globset")?;

    let mut groups: Vec<Vec<Utf8PathBuf>> = vec![Vec::new(); RULE_FILE_GLOBS.len()];
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("walk {}", root))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(abs) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            continue;
        };
        let rel = abs
            .strip_prefix(root)
            .unwrap_or(&abs)
            .as_str()
            .replace('\\', "/");
        if let Some(&group) = set.matches(&rel).first() {
            groups[group].push(Utf8PathBuf::from(rel));
        }
    }

    let mut out = Vec::new();
    for mut group in groups {
        group.sort();
        group.dedup();
        out.append(&mut group);
    }

    Ok(out)
}

fn build_globset(patterns: &[&str]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p)?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
