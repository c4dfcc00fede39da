use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Schemaform - render, seed and validate forms described by JSON schemas
#[derive(Parser, Debug, Clone)]
#[command(name = "schemaform", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "SCHEMAFORM_CONFIG",
        default_value = "schemaform.toml"
    )]
    pub config: PathBuf,

    /// Directory of named schema definitions, referenced as @Name
    #[arg(long, global = true, env = "SCHEMAFORM_SCHEMA_DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SCHEMAFORM_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Describe a schema's fields
    Describe {
        /// Schema file, or @Name for a library schema
        schema: SchemaSource,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the seeded form data for a schema
    Init {
        schema: SchemaSource,

        /// Initial values file (JSON or YAML)
        #[arg(long)]
        initial: Option<PathBuf>,
    },

    /// Draw the form for a schema
    Render {
        schema: SchemaSource,

        /// Current values file (JSON or YAML)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a data file against a schema
    Validate {
        schema: SchemaSource,

        /// Data file (JSON or YAML)
        data: PathBuf,

        /// Print errors or submitted data as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Where a schema comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    File(PathBuf),
    /// Entry of the schema library, written `@Name`
    Library(String),
}

impl FromStr for SchemaSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('@') {
            Some("") => Err("schema reference '@' is missing a name".to_string()),
            Some(name) => Ok(SchemaSource::Library(name.to_string())),
            None => Ok(SchemaSource::File(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::File(path) => write!(f, "{}", path.display()),
            SchemaSource::Library(name) => write!(f, "@{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["schemaform", "describe", "form.json"]);
        assert_eq!(cli.config, PathBuf::from("schemaform.toml"));
        assert!(cli.schema_dir.is_none());
        assert!(cli.log_level.is_none());
        assert_eq!(
            cli.command,
            Command::Describe {
                schema: SchemaSource::File(PathBuf::from("form.json")),
                json: false
            }
        );
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "schemaform",
            "validate",
            "@Signup",
            "data.yaml",
            "--json",
            "--schema-dir",
            "schemas",
            "--log-level",
            "debug",
            "--config",
            "custom.toml",
        ]);

        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.schema_dir, Some(PathBuf::from("schemas")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(
            cli.command,
            Command::Validate {
                schema: SchemaSource::Library("Signup".to_string()),
                data: PathBuf::from("data.yaml"),
                json: true
            }
        );
    }

    #[test]
    fn test_render_and_init_options() {
        let cli = Cli::parse_from(["schemaform", "render", "f.json", "--data", "d.json"]);
        assert!(matches!(
            cli.command,
            Command::Render { data: Some(_), json: false, .. }
        ));

        let cli = Cli::parse_from(["schemaform", "init", "f.json", "--initial", "i.json"]);
        assert!(matches!(cli.command, Command::Init { initial: Some(_), .. }));
    }

    #[test]
    fn test_bare_at_is_rejected() {
        assert!(Cli::try_parse_from(["schemaform", "describe", "@"]).is_err());
    }

    #[test]
    fn test_schema_source_display() {
        assert_eq!(SchemaSource::Library("A".to_string()).to_string(), "@A");
        assert_eq!(
            SchemaSource::File(PathBuf::from("a/b.json")).to_string(),
            "a/b.json"
        );
    }
}
