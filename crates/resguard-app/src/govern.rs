//! The `govern` use case: load policies, build the graph, evaluate, gate, and report.

use anyhow::Context;
use camino::Utf8Path;
use resguard_domain::report::{decision_record, summarize};
use resguard_domain::{PolicyEngine, decide_all};
use resguard_repo::LoadSummary;
use resguard_settings::{Overrides, ResolvedConfig};
use resguard_types::{GovernanceReport, RunMeta, SCHEMA_REPORT_V1, ToolMeta};
use time::OffsetDateTime;
use tracing::info;

use crate::config::{policy_roots, resolve_from_text};

/// Input for the govern use case.
#[derive(Clone, Debug)]
pub struct GovernInput<'a> {
    /// Base directory for relative policy paths.
    pub root: &'a Utf8Path,
    /// Scanner inventory (JSON).
    pub inventory_path: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the govern use case.
#[derive(Clone, Debug)]
pub struct GovernOutput {
    /// The generated report.
    pub report: GovernanceReport,
    /// The resolved configuration used.
    pub resolved: ResolvedConfig,
    /// One entry per configured policy path, in order.
    pub loads: Vec<LoadSummary>,
}

/// Run one governance cycle over a freshly scanned inventory.
pub fn run_govern(input: GovernInput<'_>) -> anyhow::Result<GovernOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = resolve_from_text(input.config_text, input.overrides)?;

    let mut engine = PolicyEngine::new();
    let loads: Vec<LoadSummary> = policy_roots(input.root, &resolved.policy_paths)
        .iter()
        .map(|path| resguard_repo::load_policies(&mut engine, path))
        .collect();

    let inventory = resguard_repo::read_inventory(input.inventory_path)
        .with_context(|| format!("read inventory: {}", input.inventory_path))?;
    let totals = inventory.summary();
    info!(
        resources = totals.total_resources,
        monthly_cost = totals.total_monthly_cost,
        annual_savings = totals.annual_savings,
        "inventory loaded"
    );

    let graph = resguard_repo::build_graph(&inventory, resolved.derive_hint_edges);
    let result = engine.evaluate(&inventory.resources);
    let decisions = decide_all(&result, &graph, &resolved.gate);

    let summary = summarize(&result, &decisions);
    let decisions = decisions.iter().map(decision_record).collect();

    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;

    let report = GovernanceReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "resguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            ended_at,
            duration_ms,
            dry_run: resolved.dry_run,
            profile: resolved.profile.clone(),
        },
        summary,
        decisions,
    };

    Ok(GovernOutput {
        report,
        resolved,
        loads,
    })
}

/// Map a report to an exit code: 0 = nothing blocked, 2 = at least one blocked decision.
pub fn report_exit_code(report: &GovernanceReport) -> i32 {
    if report.has_blocked() { 2 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use resguard_types::{Action, DecisionState, SafetyStatus};

    fn fixture_root() -> Utf8PathBuf {
        Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../tests/fixtures/governance")
    }

    fn govern_fixture(overrides: Overrides) -> GovernOutput {
        let root = fixture_root();
        let inventory = root.join("inventory.json");
        let config = std::fs::read_to_string(root.join("resguard.yaml")).expect("read config");
        run_govern(GovernInput {
            root: &root,
            inventory_path: &inventory,
            config_text: &config,
            overrides,
        })
        .expect("run_govern")
    }

    #[test]
    fn fixture_cycle_gates_destructive_matches() {
        let output = govern_fixture(Overrides::default());
        let report = &output.report;

        assert_eq!(report.schema, SCHEMA_REPORT_V1);
        assert_eq!(report.summary.policies, 3);
        assert_eq!(report.summary.resources, 3);
        assert_eq!(report.summary.matches, 3);

        let order: Vec<(&str, &str)> = report
            .decisions
            .iter()
            .map(|d| (d.policy.as_str(), d.resource.resource_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("delete-orphaned-disks", "disk-1"),
                ("delete-orphaned-disks", "disk-2"),
                ("delete-stale-snapshots", "snap-1"),
            ]
        );

        let blocked = &report.decisions[0];
        assert_eq!(blocked.action, Action::Delete);
        assert_eq!(blocked.state, DecisionState::BlockedByDependency);
        let safety = blocked.safety.as_ref().expect("destructive decisions carry impact");
        assert_eq!(safety.status, SafetyStatus::Blocked);
        assert_eq!(safety.direct_dependents, vec!["vm-7".to_string()]);

        assert_eq!(report.decisions[1].state, DecisionState::AutoExecutable);
        assert_eq!(report.decisions[2].state, DecisionState::AutoExecutable);
        assert!((report.summary.estimated_monthly_savings - 32.5).abs() < 1e-9);
        assert_eq!(report_exit_code(report), 2);
    }

    #[test]
    fn loads_are_reported_per_policy_path() {
        let output = govern_fixture(Overrides::default());
        assert_eq!(output.loads.len(), 1);
        assert_eq!(output.loads[0].loaded, 3);
        assert!(!output.loads[0].has_failures());
    }

    #[test]
    fn overrides_win_over_config_file() {
        let output = govern_fixture(Overrides {
            profile: Some("cautious".to_string()),
            dry_run: Some(false),
            ..Overrides::default()
        });
        assert_eq!(output.report.run.profile, "cautious");
        assert!(!output.report.run.dry_run);
    }

    #[test]
    fn empty_config_with_no_policies_reports_nothing() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let inventory = root.join("inventory.json");
        std::fs::write(&inventory, r#"{"resources": []}"#).expect("write inventory");

        let output = run_govern(GovernInput {
            root,
            inventory_path: &inventory,
            config_text: "",
            overrides: Overrides::default(),
        })
        .expect("run_govern");

        assert!(output.report.decisions.is_empty());
        assert!(!output.loads[0].root_found);
        assert_eq!(report_exit_code(&output.report), 0);
    }

    #[test]
    fn missing_inventory_is_an_error() {
        let root = fixture_root();
        let missing = root.join("does-not-exist.json");
        let err = run_govern(GovernInput {
            root: &root,
            inventory_path: &missing,
            config_text: "",
            overrides: Overrides::default(),
        })
        .expect_err("missing inventory");
        assert!(format!("{err:#}").contains("read inventory"));
    }
}
