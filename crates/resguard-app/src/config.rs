use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use resguard_settings::{Overrides, ResolvedConfig};

/// Read the config file. A missing file is allowed and yields an empty document.
pub fn load_config_text(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err).with_context(|| format!("read config: {}", path)),
    }
}

/// Parse and resolve config text (empty is allowed, defaults apply).
pub fn resolve_from_text(text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = resguard_settings::parse_config_yaml(text).context("parse config")?;
    resguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Relative policy paths are taken from `root`.
pub(crate) fn policy_roots(root: &Utf8Path, paths: &[String]) -> Vec<Utf8PathBuf> {
    paths.iter().map(|p| root.join(p)).collect()
}
