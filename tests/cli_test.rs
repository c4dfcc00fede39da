use clap::Parser;
use schemaform::cli::Cli;
use schemaform::commands::{self, Outcome};
use schemaform::config::Settings;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SCHEMA: &str = r#"
{
    "properties": {
        "name": { "type": "string", "description": "Full name" },
        "age": { "type": "integer", "minimum": 0 },
        "tags": { "type": "array" }
    },
    "required": ["name"]
}
"#;

fn run(args: &[&str]) -> anyhow::Result<(Outcome, String)> {
    let mut argv = vec!["schemaform"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;

    let mut settings = Settings::default();
    settings.apply_cli_overrides(&cli);

    let mut out = Vec::new();
    let outcome = commands::run(&cli, &settings, &mut out)?;
    Ok((outcome, String::from_utf8(out)?))
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn test_describe_prints_table() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let schema = temp_dir.path().join("person.json");
    fs::write(&schema, SCHEMA)?;

    let (outcome, out) = run(&["describe", &path_str(&schema)])?;
    assert_eq!(outcome, Outcome::Success);
    assert!(out.contains("Full name"));
    assert!(out.contains("minimum 0"));
    assert!(out.ends_with("3 fields, 1 required\n"));
    Ok(())
}

#[test]
fn test_init_merges_initial_values() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let schema = temp_dir.path().join("person.json");
    let initial = temp_dir.path().join("initial.yaml");
    fs::write(&schema, SCHEMA)?;
    fs::write(&initial, "age: 30\n")?;

    let (_, out) = run(&["init", &path_str(&schema), "--initial", &path_str(&initial)])?;
    let data: Value = serde_json::from_str(&out)?;
    assert_eq!(data, json!({ "name": "", "age": 30, "tags": [] }));
    Ok(())
}

#[test]
fn test_validate_reports_errors() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let schema = temp_dir.path().join("person.json");
    let data = temp_dir.path().join("data.json");
    fs::write(&schema, SCHEMA)?;
    fs::write(&data, r#"{ "age": -2 }"#)?;

    let (outcome, out) = run(&["validate", &path_str(&schema), &path_str(&data)])?;
    assert_eq!(outcome, Outcome::Invalid);
    assert_eq!(out, "age: Must be at least 0\nname: This field is required\n");
    Ok(())
}

#[test]
fn test_validate_passes_data_through() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let schema = temp_dir.path().join("person.json");
    let data = temp_dir.path().join("data.json");
    fs::write(&schema, SCHEMA)?;
    fs::write(&data, r#"{ "name": "Ada", "extra": 1 }"#)?;

    let (outcome, out) = run(&[
        "validate",
        &path_str(&schema),
        &path_str(&data),
        "--json",
    ])?;
    assert_eq!(outcome, Outcome::Success);
    let submitted: Value = serde_json::from_str(&out)?;
    assert_eq!(submitted["extra"], json!(1));
    assert_eq!(submitted["name"], json!("Ada"));
    Ok(())
}

#[test]
fn test_render_uses_library_schema() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let schemas = temp_dir.path().join("schemas");
    fs::create_dir_all(&schemas)?;
    fs::write(
        schemas.join("flag.yaml"),
        "name: Flag\nschema:\n  properties:\n    enabled:\n      type: boolean\n",
    )?;

    let (_, out) = run(&[
        "render",
        "@Flag",
        "--schema-dir",
        &path_str(&schemas),
    ])?;
    assert_eq!(out, "enabled <boolean>\n  [ ] No\n\n[ Submit ]\n");
    Ok(())
}

#[test]
fn test_library_ref_without_schema_dir_fails() {
    let err = run(&["describe", "@Flag"]).unwrap_err();
    assert!(err.to_string().contains("schema directory"));
}

#[test]
fn test_data_file_must_hold_an_object() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let schema = temp_dir.path().join("person.json");
    let data = temp_dir.path().join("data.json");
    fs::write(&schema, SCHEMA)?;
    fs::write(&data, "[1, 2]")?;

    let err = run(&["validate", &path_str(&schema), &path_str(&data)]).unwrap_err();
    assert!(err.to_string().contains("must contain an object"));
    Ok(())
}
