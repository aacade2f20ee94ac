//! CLI entry point for resguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `resguard-app` crate.

mod logging;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use resguard_app::{
    ExplainOutput, GovernInput, ImpactInput, format_orphans, format_validation, load_config_text,
    render_explain, report_exit_code, resolve_from_text, run_explain, run_govern, run_impact,
    run_orphans, run_validate, serialize_impact, write_report,
};
use resguard_settings::{Overrides, ResolvedConfig};

use crate::logging::{LogFormat, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "resguard",
    version,
    about = "Dependency-aware governance for wasteful cloud resources"
)]
struct Cli {
    /// Base directory for the config file and relative policy paths.
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Path to resguard config YAML (a missing file means defaults).
    #[arg(long, default_value = "resguard.yaml")]
    config: Utf8PathBuf,

    /// Override profile (standard|cautious).
    #[arg(long)]
    profile: Option<String>,

    /// Override log level (trace|debug|info|warn|error). `RUST_LOG` wins over both.
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one governance cycle and write the decision report.
    Govern {
        /// Scanner inventory JSON.
        #[arg(long)]
        inventory: Utf8PathBuf,

        /// Policy file or directory; repeatable. Replaces `policies.paths` from config.
        #[arg(long = "policies")]
        policies: Vec<String>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/resguard/report.json")]
        report_out: Utf8PathBuf,

        /// Record the run as a dry run.
        #[arg(long, overrides_with = "no_dry_run")]
        dry_run: bool,

        /// Record the run as live.
        #[arg(long, overrides_with = "dry_run")]
        no_dry_run: bool,
    },

    /// Print the deletion impact of one resource as JSON.
    Impact {
        /// Scanner inventory JSON.
        #[arg(long)]
        inventory: Utf8PathBuf,

        /// Resource id to inspect.
        resource_id: String,
    },

    /// Print resources that depend on something missing from the inventory.
    Orphans {
        /// Scanner inventory JSON.
        #[arg(long)]
        inventory: Utf8PathBuf,
    },

    /// Load rule files and report per-file outcomes.
    Validate {
        /// Policy file or directory; repeatable. Defaults to `policies.paths` from config.
        #[arg(long = "policies")]
        policies: Vec<String>,
    },

    /// Explain an action or decision state and how the gate treats it under the active profile.
    Explain {
        /// The action (e.g., "delete") or decision state (e.g., "blocked_by_dependency").
        identifier: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("resguard error: {err:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.cmd {
        Commands::Govern {
            inventory,
            policies,
            report_out,
            dry_run,
            no_dry_run,
        } => {
            let (cfg_text, _) = prepare(cli)?;
            let overrides = Overrides {
                dry_run: dry_run_override(*dry_run, *no_dry_run),
                policy_paths: policies.clone(),
                ..base_overrides(cli)
            };
            cmd_govern(cli, &cfg_text, inventory, report_out, overrides)
        }
        Commands::Impact {
            inventory,
            resource_id,
        } => {
            let (_, resolved) = prepare(cli)?;
            cmd_impact(&resolved, inventory, resource_id)
        }
        Commands::Orphans { inventory } => {
            let (_, resolved) = prepare(cli)?;
            cmd_orphans(&resolved, inventory)
        }
        Commands::Validate { policies } => {
            let (_, resolved) = prepare(cli)?;
            cmd_validate(cli, &resolved, policies)
        }
        Commands::Explain { identifier } => {
            let (_, resolved) = prepare(cli)?;
            Ok(cmd_explain(&resolved, identifier))
        }
    }
}

/// Read and resolve the config, then start logging at the resolved level.
fn prepare(cli: &Cli) -> anyhow::Result<(String, ResolvedConfig)> {
    let cfg_path = cli.root.join(&cli.config);
    let cfg_text = load_config_text(&cfg_path)?;
    let resolved = resolve_from_text(&cfg_text, base_overrides(cli))?;
    init_logging(&resolved.log_level, cli.log_format);
    Ok((cfg_text, resolved))
}

fn base_overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        log_level: cli.log_level.clone(),
        ..Overrides::default()
    }
}

fn dry_run_override(dry_run: bool, no_dry_run: bool) -> Option<bool> {
    match (dry_run, no_dry_run) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn cmd_govern(
    cli: &Cli,
    cfg_text: &str,
    inventory: &Utf8PathBuf,
    report_out: &Utf8PathBuf,
    overrides: Overrides,
) -> anyhow::Result<i32> {
    let output = run_govern(GovernInput {
        root: &cli.root,
        inventory_path: inventory,
        config_text: cfg_text,
        overrides,
    })?;

    write_report(report_out, &output.report).context("write report json")?;

    let summary = &output.report.summary;
    eprintln!(
        "resguard: {} matches across {} resources; report written to {}",
        summary.matches, summary.resources, report_out
    );

    Ok(report_exit_code(&output.report))
}

fn cmd_impact(
    resolved: &ResolvedConfig,
    inventory: &Utf8PathBuf,
    resource_id: &str,
) -> anyhow::Result<i32> {
    let input = ImpactInput {
        inventory_path: inventory,
        derive_hint_edges: resolved.derive_hint_edges,
    };
    let impact = run_impact(input, resource_id)?;
    println!("{}", serialize_impact(&impact)?);
    Ok(0)
}

fn cmd_orphans(resolved: &ResolvedConfig, inventory: &Utf8PathBuf) -> anyhow::Result<i32> {
    let input = ImpactInput {
        inventory_path: inventory,
        derive_hint_edges: resolved.derive_hint_edges,
    };
    print!("{}", format_orphans(&run_orphans(input)?));
    Ok(0)
}

fn cmd_validate(
    cli: &Cli,
    resolved: &ResolvedConfig,
    policies: &[String],
) -> anyhow::Result<i32> {
    let paths = if policies.is_empty() {
        resolved.policy_paths.as_slice()
    } else {
        policies
    };
    let output = run_validate(&cli.root, paths);
    print!("{}", format_validation(&output));
    Ok(if output.has_failures() { 1 } else { 0 })
}

fn cmd_explain(resolved: &ResolvedConfig, identifier: &str) -> i32 {
    let output = run_explain(identifier, resolved);
    let text = render_explain(&output);
    match output {
        ExplainOutput::Found { .. } => print!("{text}"),
        ExplainOutput::Unknown { .. } => eprint!("{text}"),
    }
    output.exit_code()
}
