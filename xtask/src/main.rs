//! Developer tasks (schema generation, conformance checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use resguard_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// The workspace root (parent of the xtask directory).
fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn governance_fixture_dir() -> PathBuf {
    project_root().join("tests").join("fixtures").join("governance")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

/// Generate the GovernanceReport schema.
fn generate_report_schema() -> schemars::Schema {
    schema_for!(resguard_types::GovernanceReport)
}

/// Generate the rule-file schema.
fn generate_rules_schema() -> schemars::Schema {
    schema_for!(resguard_settings::PolicyFileV1)
}

/// Generate the GovernConfigV1 schema.
fn generate_config_schema() -> schemars::Schema {
    schema_for!(resguard_settings::GovernConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "resguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "resguard.rules.v1.json",
            generate: generate_rules_schema,
        },
        SchemaSpec {
            filename: "resguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();

    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create schemas directory")?;
    }

    for spec in schema_specs() {
        let schema = (spec.generate)();
        let json = serialize_schema(&schema)?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);

        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate the golden report against the report schema");
    eprintln!("  conform-full      conform, plus run the resguard binary and diff against golden");
    eprintln!("  explain-coverage  Validate all actions and states have explanations");
}

fn compiled_report_schema() -> anyhow::Result<jsonschema::Validator> {
    let schema = serde_json::to_value(generate_report_schema()).context("serialize schema")?;
    jsonschema::validator_for(&schema).map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

fn read_golden() -> anyhow::Result<serde_json::Value> {
    let path = governance_fixture_dir().join("expected.report.json");
    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// The golden report uses placeholders; schema validation needs real RFC 3339 timestamps.
fn with_concrete_timestamps(mut value: serde_json::Value) -> serde_json::Value {
    if let Some(run) = value.get_mut("run").and_then(|r| r.as_object_mut()) {
        for key in ["started_at", "ended_at"] {
            run.insert(
                key.to_string(),
                serde_json::Value::String("1970-01-01T00:00:00Z".to_string()),
            );
        }
    }
    value
}

fn conform() -> anyhow::Result<()> {
    let compiled = compiled_report_schema()?;
    println!("✓ resguard.report.v1 schema compiles");

    let golden = with_concrete_timestamps(read_golden()?);
    let errors: Vec<String> = compiled.iter_errors(&golden).map(|e| e.to_string()).collect();
    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - expected.report.json: {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("  ✓ expected.report.json validates");
    Ok(())
}

/// Full conformance: the golden report plus a live run of the built binary.
fn conform_full() -> anyhow::Result<()> {
    conform()?;

    println!("\n--- Full conformance: resguard binary output ---\n");

    let resguard_bin = project_root().join("target").join("debug").join("resguard");

    #[cfg(target_os = "windows")]
    let resguard_bin = resguard_bin.with_extension("exe");

    if !resguard_bin.exists() {
        bail!(
            "resguard binary not found at {}.\n\
            Run `cargo build -p resguard-cli` first.",
            resguard_bin.display()
        );
    }

    let fixture = governance_fixture_dir();
    let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
    let report_out = temp_dir.path().join("report.json");

    let output = std::process::Command::new(&resguard_bin)
        .arg("--root")
        .arg(&fixture)
        .arg("govern")
        .arg("--inventory")
        .arg(fixture.join("inventory.json"))
        .arg("--report-out")
        .arg(&report_out)
        .output()
        .context("Failed to run resguard on the governance fixture")?;

    // The fixture contains one blocked delete.
    if output.status.code() != Some(2) {
        bail!(
            "resguard exited with {:?} (expected 2): {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let report_content = fs::read_to_string(&report_out).context("Failed to read report")?;
    let report_value: serde_json::Value =
        serde_json::from_str(&report_content).context("Failed to parse report")?;

    let compiled = compiled_report_schema()?;
    let mut errors: Vec<String> = compiled
        .iter_errors(&report_value)
        .map(|e| format!("schema validation: {}", e))
        .collect();

    if normalize_nondeterministic(report_value) != normalize_nondeterministic(read_golden()?) {
        errors.push("output differs from golden file expected.report.json".to_string());
    }

    if !errors.is_empty() {
        eprintln!("\nFull conformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!(
            "Full conformance validation failed with {} errors",
            errors.len()
        );
    }

    println!("  ✓ governance fixture matches golden report");
    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

/// Validate that all actions and decision states have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let actions = resguard_types::explain::all_actions();
    let states = resguard_types::explain::all_states();

    let mut errors = Vec::new();
    for id in actions.iter().chain(states.iter()) {
        match resguard_types::explain::lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("'{}' has empty title", id));
                }
                if exp.description.is_empty() {
                    errors.push(format!("'{}' has empty description", id));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("'{}' has empty remediation", id));
                }
            }
            None => errors.push(format!("'{}' has no explanation", id)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} actions have explanations", actions.len());
        println!("✓ {} decision states have explanations", states.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
