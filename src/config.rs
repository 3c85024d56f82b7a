use crate::error::{ScResult, ScoutError};
use crate::schema::Schema;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Settings file layout (`--config`). Explicit command line flags win over it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub schema: SchemaParams,
    pub report: ReportParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SchemaParams {
    /// Game schema JSON. The embedded reference schema is used when omitted.
    #[arg(global = true, long)]
    pub schema: Option<PathBuf>,

    /// Reject presets that reference unknown columns.
    #[arg(global = true, long, default_value_t = false)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportParams {
    /// Named column preset from the schema.
    #[arg(long)]
    pub preset: Option<String>,

    /// Show hidden columns too (ignored when a preset is given).
    #[arg(long, default_value_t = false)]
    pub all_columns: bool,

    /// Column key to sort teams by (descending unless --ascending).
    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long, default_value_t = false)]
    pub ascending: bool,

    #[arg(long, default_value_t = 1)]
    pub min_matches: usize,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            preset: None,
            all_columns: false,
            sort_by: None,
            ascending: false,
            min_matches: 1,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ScoutError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ScoutError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

impl SchemaParams {
    pub fn load_schema(&self) -> ScResult<Schema> {
        match &self.schema {
            Some(path) => {
                info!("📂 Loading schema: {}", path.display());
                Schema::load_from_file(path, self.strict)
            }
            None => {
                info!("Using embedded reference schema");
                let schema = Schema::default();
                schema.validate(self.strict)?;
                Ok(schema)
            }
        }
    }

    pub fn merge_from_cli(&mut self, cli: &SchemaParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(schema, "schema");
        update_if_present!(strict, "strict");
    }
}

impl ReportParams {
    pub fn merge_from_cli(&mut self, cli: &ReportParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(preset, "preset");
        update_if_present!(all_columns, "all_columns");
        update_if_present!(sort_by, "sort_by");
        update_if_present!(ascending, "ascending");
        update_if_present!(min_matches, "min_matches");
    }
}
