//! Display columns and presets for the team statistics table.

use crate::schema::{PresetDef, Schema};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A flattened, displayable column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Dot-path into a team's statistics, e.g. `auto.mobilityRate`.
    pub key: String,
    pub label: String,
    pub category: String,
    pub visible: bool,
    pub numeric: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<bool>,
}

impl ColumnDef {
    pub fn is_percentage(&self) -> bool {
        self.percentage.unwrap_or(false)
    }
}

/// `teamInfo` -> `TeamInfo`. Only the first character changes.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone)]
pub struct ColumnGenerator {
    schema: Arc<Schema>,
}

impl ColumnGenerator {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    /// All columns in category order, then declaration order within a category.
    pub fn generate_columns(&self) -> Vec<ColumnDef> {
        self.schema
            .column_categories()
            .iter()
            .flat_map(|cat| {
                let label = capitalize_first(&cat.category);
                cat.columns.iter().map(move |c| ColumnDef {
                    key: c.key.clone(),
                    label: c.label.clone(),
                    category: label.clone(),
                    visible: c.visible,
                    numeric: c.numeric,
                    percentage: c.percentage,
                })
            })
            .collect()
    }

    pub fn presets(&self) -> &[PresetDef] {
        self.schema.presets()
    }

    /// Columns selected by a preset, in preset order.
    ///
    /// Keys that name no column come back as `None` so callers can render an empty cell.
    pub fn preset_columns(&self, name: &str) -> Option<Vec<(String, Option<ColumnDef>)>> {
        let preset = self.schema.preset(name)?;
        let columns = self.generate_columns();
        Some(
            preset
                .columns
                .iter()
                .map(|key| (key.clone(), columns.iter().find(|c| &c.key == key).cloned()))
                .collect(),
        )
    }
}
