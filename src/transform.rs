//! Raw match observation → canonical [`CounterRecord`].

use crate::columns::capitalize_first;
use crate::error::ScResult;
use crate::record::{CounterRecord, FieldValue};
use crate::schema::{counter_field, Phase, PhaseGroup, Schema};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

/// One button press recorded by the scouting UI. Only `actionType` matters here;
/// a non-string type reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvent {
    #[serde(
        default,
        deserialize_with = "lenient_action_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub action_type: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ActionEvent {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: Some(action_type.into()),
            details: Map::new(),
        }
    }
}

/// Everything recorded for one team in one match.
///
/// Missing or `null` sections read as empty. Unrecognised top-level fields are kept
/// in `extra` and survive the transform.
///
/// Inside a section, single bad values are dropped rather than failing the match:
/// non-object action entries are skipped, non-boolean statuses are ignored, and any
/// start position entry other than `true` reads as `false`. Only a section whose
/// overall shape is wrong (e.g. `"autoActions": 5`) is an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObservation {
    #[serde(default, deserialize_with = "lenient_actions")]
    pub auto_actions: Vec<ActionEvent>,
    #[serde(default, deserialize_with = "lenient_actions")]
    pub teleop_actions: Vec<ActionEvent>,
    #[serde(default, deserialize_with = "lenient_flags")]
    pub auto_robot_status: BTreeMap<String, bool>,
    #[serde(default, deserialize_with = "lenient_flags")]
    pub teleop_robot_status: BTreeMap<String, bool>,
    #[serde(default, deserialize_with = "lenient_flags")]
    pub endgame_robot_status: BTreeMap<String, bool>,
    #[serde(default, deserialize_with = "lenient_choices")]
    pub start_position: Vec<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawObservation {
    pub fn actions(&self, phase: Phase) -> &[ActionEvent] {
        match phase {
            Phase::Auto => &self.auto_actions,
            Phase::Teleop => &self.teleop_actions,
        }
    }

    pub fn status(&self, group: PhaseGroup) -> &BTreeMap<String, bool> {
        match group {
            PhaseGroup::Auto => &self.auto_robot_status,
            PhaseGroup::Teleop => &self.teleop_robot_status,
            PhaseGroup::Endgame => &self.endgame_robot_status,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_action_type<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => {
            debug!("Ignoring non-string actionType: {}", other);
            Ok(None)
        }
        None => Ok(None),
    }
}

fn lenient_actions<'de, D>(deserializer: D) -> Result<Vec<ActionEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Value> = null_as_default(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<ActionEvent>(entry) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("Skipping malformed action entry: {}", e);
                None
            }
        })
        .collect())
}

fn lenient_flags<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Map<String, Value> = null_as_default(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Bool(b) => Some((name, b)),
            other => {
                debug!("Ignoring non-boolean status '{}': {}", name, other);
                None
            }
        })
        .collect())
}

fn lenient_choices<'de, D>(deserializer: D) -> Result<Vec<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Value> = null_as_default(deserializer)?;
    Ok(entries
        .iter()
        .map(|v| matches!(v, Value::Bool(true)))
        .collect())
}

/// Key an extra field is kept under when its own name is a phase group name,
/// e.g. `auto` -> `rawAuto`.
pub fn reserved_extra_key(group: PhaseGroup) -> String {
    format!("raw{}", capitalize_first(group.as_ref()))
}

/// Index of the first `true` entry. Later `true` entries are ignored.
pub fn first_true_index(choices: &[bool]) -> Option<usize> {
    choices.iter().position(|&selected| selected)
}

#[derive(Debug, Clone)]
pub struct Transformer {
    schema: Arc<Schema>,
}

impl Transformer {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// A record with every declared counter at 0 and every declared toggle false.
    pub fn blank_record(&self) -> CounterRecord {
        let mut record = CounterRecord::default();
        for group in PhaseGroup::iter() {
            let fields = record.group_mut(group);
            if let Some(phase) = group.action_phase() {
                for action in self.schema.actions_in(phase) {
                    fields.set(&action.counter_field(), FieldValue::Count(0));
                }
            }
            for toggle in self.schema.toggles(group) {
                fields.set(&toggle.key, FieldValue::Flag(false));
            }
        }
        record
    }

    pub fn transform(&self, raw: RawObservation) -> CounterRecord {
        let mut record = self.blank_record();
        record.start_position = first_true_index(&raw.start_position);

        for phase in Phase::iter() {
            let fields = record.group_mut(phase.into());
            for event in raw.actions(phase) {
                let Some(action_type) = event.action_type.as_deref() else {
                    continue;
                };
                // Unknown types, and actions not counted in this phase, have no counter.
                fields.increment(&counter_field(action_type));
            }
        }

        for group in PhaseGroup::iter() {
            let fields = record.group_mut(group);
            for (name, &value) in raw.status(group) {
                fields.set(name, FieldValue::Flag(value));
            }
        }

        for (key, value) in raw.extra {
            match PhaseGroup::iter().find(|g| g.to_string() == key) {
                Some(group) => {
                    let renamed = reserved_extra_key(group);
                    warn!(
                        "Raw field '{}' clashes with a phase group; kept as '{}'",
                        key, renamed
                    );
                    record.extra.insert(renamed, value);
                }
                None => {
                    record.extra.insert(key, value);
                }
            }
        }

        record
    }

    /// Transforms an untyped JSON observation.
    pub fn transform_value(&self, value: Value) -> ScResult<CounterRecord> {
        let raw: RawObservation = serde_json::from_value(value)?;
        Ok(self.transform(raw))
    }
}
