//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use serde_json::Value;
use sqlgate_app::{CheckInput, run_check, serialize_report};
use sqlgate_settings::Overrides;
use sqlgate_test_util::normalize_nondeterministic;
use sqlgate_types::explain;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(sqlgate_types::GateReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(sqlgate_settings::SqlgateConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "sqlgate.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "sqlgate.config.v1.json",
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

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
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
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
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
    eprintln!("  conform           Run every fixture and validate reports and verdicts");
    eprintln!("  explain-coverage  Validate all violation and advisory codes have explanations");
}

/// Run one fixture directory through the check use case.
fn run_fixture(fixture_dir: &Path) -> anyhow::Result<Value> {
    let sql = fs::read_to_string(fixture_dir.join("query.sql")).context("read query.sql")?;
    let config_path = fixture_dir.join("sqlgate.toml");
    let config_text = if config_path.exists() {
        fs::read_to_string(&config_path).context("read sqlgate.toml")?
    } else {
        String::new()
    };

    let output = run_check(CheckInput {
        sql: &sql,
        config_text: &config_text,
        overrides: Overrides::default(),
    })?;
    let bytes = serialize_report(&output.report)?;
    let value: Value = serde_json::from_slice(&bytes).context("reparse report")?;
    Ok(normalize_nondeterministic(value))
}

/// Fixture conformance.
///
/// For every directory under `tests/fixtures/` this checks:
/// 1. The emitted report validates against the generated report schema
/// 2. The verdict equals `expected.verdict.json`
/// 3. Every emitted code has an explanation
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema())?;
    let compiled = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {e}"))?;
    println!("✓ sqlgate.report.v1 schema compiles");

    let mut entries: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .context("Failed to read tests/fixtures/")?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    entries.sort();

    let mut errors = Vec::new();
    for fixture_dir in &entries {
        let name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let report = match run_fixture(fixture_dir) {
            Ok(report) => report,
            Err(err) => {
                errors.push(format!("fixture '{name}': {err:#}"));
                continue;
            }
        };

        for err in compiled.iter_errors(&report) {
            errors.push(format!("fixture '{name}': schema validation: {err}"));
        }

        let expected_path = fixture_dir.join("expected.verdict.json");
        let expected: Value = serde_json::from_str(
            &fs::read_to_string(&expected_path)
                .with_context(|| format!("Failed to read {}", expected_path.display()))?,
        )
        .with_context(|| format!("Failed to parse {}", expected_path.display()))?;
        if report["verdict"] != expected {
            errors.push(format!(
                "fixture '{name}': verdict differs from expected.verdict.json"
            ));
        }

        for section in ["violations", "advisories"] {
            let items = report["verdict"][section].as_array().cloned().unwrap_or_default();
            for item in items {
                let code = item["code"].as_str().unwrap_or_default();
                if explain::lookup_explanation(code).is_none() {
                    errors.push(format!("fixture '{name}': code '{code}' has no explanation"));
                }
            }
        }

        println!("  ✓ fixture '{name}'");
    }

    if entries.is_empty() {
        bail!("No fixtures found in {}", fixtures_dir().display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixtures pass conformance checks!", entries.len());
    Ok(())
}

/// Validate that all violation and advisory codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let violation_codes = explain::all_violation_codes();
    let advisory_codes = explain::all_advisory_codes();

    let mut errors = Vec::new();
    for code in violation_codes.iter().chain(advisory_codes) {
        match explain::lookup_explanation(code) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Code '{code}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Code '{code}' has empty description"));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Code '{code}' has empty remediation"));
                }
            }
            None => errors.push(format!("Code '{code}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} violation codes have explanations", violation_codes.len());
        println!("✓ {} advisory codes have explanations", advisory_codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
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
