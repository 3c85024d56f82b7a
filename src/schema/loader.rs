use super::{
    ActionDef, ColumnCategory, PhaseGroup, PresetDef, Schema, StatDef, StatKind, ToggleSet,
};
use crate::error::{ScResult, ScoutError};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

/// On-disk shape of a schema. Only reachable through [`Schema`]'s loaders, which
/// validate it before handing out a `Schema`.
#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    name: String,
    actions: Vec<ActionDef>,
    #[serde(default)]
    toggles: ToggleSet,
    #[serde(default)]
    columns: Vec<ColumnCategory>,
    #[serde(default)]
    presets: Vec<PresetDef>,
    #[serde(default)]
    stats: Vec<StatDef>,
}

impl Schema {
    pub fn load_from_file<P: AsRef<Path>>(path: P, strict: bool) -> ScResult<Self> {
        let path = path.as_ref();
        debug!("Loading schema from: {}", path.display());
        let file = File::open(path).map_err(|e| {
            ScoutError::Config(format!(
                "Could not open schema file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_reader(BufReader::new(file), strict)
    }

    pub fn from_reader<R: Read>(reader: R, strict: bool) -> ScResult<Self> {
        let file: SchemaFile = serde_json::from_reader(reader)?;
        Self::from_file(file, strict)
    }

    pub fn from_json_str(json: &str, strict: bool) -> ScResult<Self> {
        let file: SchemaFile = serde_json::from_str(json)?;
        Self::from_file(file, strict)
    }

    fn from_file(file: SchemaFile, strict: bool) -> ScResult<Self> {
        let schema = Schema {
            name: file.name,
            actions: file.actions,
            toggles: file.toggles,
            columns: file.columns,
            presets: file.presets,
            stats: file.stats,
        };
        schema.validate(strict)?;
        debug!(
            "Schema '{}' ready: {} actions, {} columns, {} presets",
            schema.name,
            schema.actions.len(),
            schema.columns.iter().map(|c| c.columns.len()).sum::<usize>(),
            schema.presets.len()
        );
        Ok(schema)
    }

    /// Checks key uniqueness, phase coverage and cross references.
    ///
    /// Preset keys that do not name a column are an error only when `strict` is set;
    /// otherwise they are logged and later render as empty cells.
    pub fn validate(&self, strict: bool) -> ScResult<()> {
        let mut seen = HashSet::new();
        for a in &self.actions {
            if a.key.is_empty() {
                return Err(invalid("action with an empty key".to_string()));
            }
            if !seen.insert(a.key.as_str()) {
                return Err(invalid(format!("duplicate action key '{}'", a.key)));
            }
            if a.points.is_empty() {
                return Err(invalid(format!(
                    "action '{}' has no point value for any phase",
                    a.key
                )));
            }
        }

        for group in PhaseGroup::iter() {
            let mut seen = HashSet::new();
            for t in self.toggles(group) {
                if t.key.is_empty() {
                    return Err(invalid(format!("{} toggle with an empty key", group)));
                }
                if !seen.insert(t.key.as_str()) {
                    return Err(invalid(format!("duplicate {} toggle key '{}'", group, t.key)));
                }
            }
        }

        let mut categories = HashSet::new();
        let mut column_keys = HashSet::new();
        for cat in &self.columns {
            if !categories.insert(cat.category.as_str()) {
                return Err(invalid(format!(
                    "duplicate column category '{}'",
                    cat.category
                )));
            }
            for col in &cat.columns {
                if col.key.is_empty() {
                    return Err(invalid(format!(
                        "column with an empty key in category '{}'",
                        cat.category
                    )));
                }
                if !column_keys.insert(col.key.as_str()) {
                    return Err(invalid(format!("duplicate column key '{}'", col.key)));
                }
            }
        }

        let mut preset_names = HashSet::new();
        for p in &self.presets {
            if !preset_names.insert(p.name.as_str()) {
                return Err(invalid(format!("duplicate preset '{}'", p.name)));
            }
            for key in &p.columns {
                if column_keys.contains(key.as_str()) {
                    continue;
                }
                if strict {
                    return Err(invalid(format!(
                        "preset '{}' references unknown column '{}'",
                        p.name, key
                    )));
                }
                warn!("Preset '{}' references unknown column '{}'", p.name, key);
            }
        }

        let mut stat_keys = HashSet::new();
        for s in &self.stats {
            if !stat_keys.insert(s.key.as_str()) {
                return Err(invalid(format!("duplicate stat key '{}'", s.key)));
            }
            match &s.kind {
                StatKind::ActionSum(keys) => {
                    if let Some(k) = keys.iter().find(|k| self.action(k).is_none()) {
                        return Err(invalid(format!(
                            "stat '{}' sums unknown action '{}'",
                            s.key, k
                        )));
                    }
                }
                StatKind::ToggleRate { phase, toggle } => {
                    if self.toggle(*phase, toggle).is_none() {
                        return Err(invalid(format!(
                            "stat '{}' rates unknown {} toggle '{}'",
                            s.key, phase, toggle
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn invalid(msg: String) -> ScoutError {
    ScoutError::Schema(msg)
}
