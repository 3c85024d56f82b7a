//! The game schema: the one place where actions, toggles and their point values live.
//!
//! Everything else (counter records, point totals, report columns, team aggregates)
//! is derived from a [`Schema`]. A schema is validated once when it is built and is
//! read-only afterwards, so it is normally shared as an `Arc<Schema>`.

pub mod defaults;
pub mod loader;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A scoring phase. Actions carry a point value per phase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Auto,
    Teleop,
}

/// One of the three groups a counter record is split into.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PhaseGroup {
    Auto,
    Teleop,
    Endgame,
}

impl PhaseGroup {
    /// The action phase counted inside this group, if any. Endgame has no actions.
    pub fn action_phase(self) -> Option<Phase> {
        match self {
            Self::Auto => Some(Phase::Auto),
            Self::Teleop => Some(Phase::Teleop),
            Self::Endgame => None,
        }
    }
}

impl From<Phase> for PhaseGroup {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Auto => Self::Auto,
            Phase::Teleop => Self::Teleop,
        }
    }
}

/// Points per phase. A missing phase means the action is not counted in that phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasePoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teleop: Option<u32>,
}

impl PhasePoints {
    pub fn get(&self, phase: Phase) -> Option<u32> {
        match phase {
            Phase::Auto => self.auto,
            Phase::Teleop => self.teleop,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.auto.is_none() && self.teleop.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub points: PhasePoints,
}

impl ActionDef {
    /// Name of the counter field this action produces in a counter record.
    pub fn counter_field(&self) -> String {
        counter_field(&self.key)
    }

    pub fn counted_in(&self, phase: Phase) -> bool {
        self.points.get(phase).is_some()
    }
}

pub fn counter_field(action_key: &str) -> String {
    format!("{}Count", action_key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleGroup {
    /// Mutually exclusive: the UI lets at most one sibling be true.
    Selection,
    /// Independent booleans.
    Toggles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleDef {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<ToggleGroup>,
}

impl ToggleDef {
    pub fn point_value(&self) -> u32 {
        self.points.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSet {
    #[serde(default)]
    pub auto: Vec<ToggleDef>,
    #[serde(default)]
    pub teleop: Vec<ToggleDef>,
    #[serde(default)]
    pub endgame: Vec<ToggleDef>,
}

impl ToggleSet {
    pub fn group(&self, group: PhaseGroup) -> &[ToggleDef] {
        match group {
            PhaseGroup::Auto => &self.auto,
            PhaseGroup::Teleop => &self.teleop,
            PhaseGroup::Endgame => &self.endgame,
        }
    }
}

/// A display column as declared in the schema, before its category is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub key: String,
    pub label: String,
    pub visible: bool,
    pub numeric: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCategory {
    pub category: String,
    pub columns: Vec<ColumnEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDef {
    pub name: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKind {
    /// Per-match average of the summed counters, for each phase and overall.
    ActionSum(Vec<String>),
    /// Percentage of matches where the toggle was true.
    ToggleRate { phase: PhaseGroup, toggle: String },
}

/// A named team statistic computed by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDef {
    pub key: String,
    #[serde(flatten)]
    pub kind: StatKind,
}

/// Validated, immutable game configuration.
///
/// Built through [`Schema::default`] (the reference game) or one of the loaders in
/// [`loader`]. All lookups are total: unknown keys resolve to `None` or zero points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub(crate) name: String,
    pub(crate) actions: Vec<ActionDef>,
    pub(crate) toggles: ToggleSet,
    pub(crate) columns: Vec<ColumnCategory>,
    pub(crate) presets: Vec<PresetDef>,
    pub(crate) stats: Vec<StatDef>,
}

impl Schema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[ActionDef] {
        &self.actions
    }

    pub fn action_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.actions.iter().map(|a| a.key.as_str())
    }

    pub fn action(&self, key: &str) -> Option<&ActionDef> {
        self.actions.iter().find(|a| a.key == key)
    }

    /// Actions that are counted (have a point entry) in `phase`, in declaration order.
    pub fn actions_in(&self, phase: Phase) -> impl Iterator<Item = &ActionDef> + '_ {
        self.actions.iter().filter(move |a| a.counted_in(phase))
    }

    /// Point value of `key` in `phase`. Zero when the action is unknown or not scored
    /// in that phase.
    pub fn action_points(&self, key: &str, phase: Phase) -> u32 {
        self.action(key)
            .and_then(|a| a.points.get(phase))
            .unwrap_or(0)
    }

    pub fn toggles(&self, group: PhaseGroup) -> &[ToggleDef] {
        self.toggles.group(group)
    }

    pub fn toggle(&self, group: PhaseGroup, key: &str) -> Option<&ToggleDef> {
        self.toggles(group).iter().find(|t| t.key == key)
    }

    pub fn toggle_points(&self, group: PhaseGroup, key: &str) -> u32 {
        self.toggle(group, key).map_or(0, ToggleDef::point_value)
    }

    pub fn endgame_points(&self, key: &str) -> u32 {
        self.toggle_points(PhaseGroup::Endgame, key)
    }

    pub fn column_categories(&self) -> &[ColumnCategory] {
        &self.columns
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.columns
            .iter()
            .flat_map(|c| c.columns.iter())
            .any(|c| c.key == key)
    }

    pub fn presets(&self) -> &[PresetDef] {
        &self.presets
    }

    pub fn preset(&self, name: &str) -> Option<&PresetDef> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn stats(&self) -> &[StatDef] {
        &self.stats
    }
}
