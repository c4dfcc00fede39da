//! CLI command execution
//!
//! Each command writes its report to `out`; logging goes through `tracing`.

use anyhow::{bail, Context};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::cli::{Cli, Command, SchemaSource};
use crate::config::Settings;
use crate::form::{seed_form_data, validate, FormData, FormOptions, SchemaForm};
use crate::schema::{load_value, JsonSchema, SchemaLibrary};
use crate::viewer::SchemaSummary;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The data did not pass validation
    Invalid,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Invalid => 1,
        }
    }
}

pub fn run(cli: &Cli, settings: &Settings, out: &mut impl Write) -> anyhow::Result<Outcome> {
    match &cli.command {
        Command::Describe { schema, json } => {
            let schema = load_schema(schema, settings)?;
            let summary = SchemaSummary::from_schema(&schema);
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                write!(out, "{summary}")?;
            }
        }

        Command::Init { schema, initial } => {
            let schema = load_schema(schema, settings)?;
            let initial = initial.as_deref().map(load_data).transpose()?;
            let data = seed_form_data(&schema, initial.as_ref(), &FormData::new());
            writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
        }

        Command::Render { schema, data, json } => {
            let schema = load_schema(schema, settings)?;
            let mut form = SchemaForm::new(schema).with_options(FormOptions::from(&settings.form));
            if let Some(path) = data {
                form = form.with_initial_values(load_data(path)?);
            }

            let view = form.render();
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                write!(out, "{view}")?;
            }
        }

        Command::Validate { schema, data, json } => {
            let schema = load_schema(schema, settings)?;
            let data = seed_form_data(&schema, None, &load_data(data)?);
            let errors = validate(&schema, &data);

            if !errors.is_valid() {
                info!("{} fields failed validation", errors.len());
                if *json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&errors)?)?;
                } else {
                    for (name, issue) in errors.iter() {
                        writeln!(out, "{name}: {issue}")?;
                    }
                }
                return Ok(Outcome::Invalid);
            }

            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
            } else {
                writeln!(out, "valid")?;
            }
        }
    }

    Ok(Outcome::Success)
}

/// Load a schema from a file or the schema library, resolving library `$ref`s
pub fn load_schema(source: &SchemaSource, settings: &Settings) -> anyhow::Result<JsonSchema> {
    let library = match &settings.schema_dir {
        Some(dir) => Some(
            SchemaLibrary::load_dir(dir)
                .with_context(|| format!("Failed to load schema library from {}", dir.display()))?,
        ),
        None => None,
    };

    match source {
        SchemaSource::File(path) => {
            let mut value =
                load_value(path).with_context(|| format!("Failed to read schema {source}"))?;
            if let Some(library) = &library {
                value = library.resolve_refs(&value)?;
            }
            JsonSchema::from_value(&value).with_context(|| format!("Invalid schema {source}"))
        }
        SchemaSource::Library(name) => {
            let Some(library) = library else {
                bail!("{source} needs a schema directory (--schema-dir or schema_dir)");
            };
            Ok(library.resolve(name)?)
        }
    }
}

/// Load form data: a JSON or YAML file holding one object
pub fn load_data(path: &Path) -> anyhow::Result<FormData> {
    match load_value(path).with_context(|| format!("Failed to read data {}", path.display()))? {
        Value::Object(map) => Ok(map),
        other => bail!(
            "{} must contain an object, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
