//! Canonical per-match counter record, the hand-off between transformation and scoring.

use crate::schema::PhaseGroup;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const START_POSITION_FIELD: &str = "startPosition";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Count(u32),
    Flag(bool),
}

/// Ordered field set of one phase group (`auto`, `teleop` or `endgame`).
///
/// Lookups never fail: a missing or mistyped counter reads as 0, a missing or
/// mistyped flag reads as false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseRecord {
    fields: Vec<(String, FieldValue)>,
}

impl PhaseRecord {
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| *v)
    }

    pub fn count(&self, name: &str) -> u32 {
        match self.get(name) {
            Some(FieldValue::Count(n)) => n,
            _ => 0,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(FieldValue::Flag(true)))
    }

    /// Overwrites `name` in place, or appends it when absent.
    pub fn set(&mut self, name: &str, value: FieldValue) {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Bumps an existing counter. Returns false if `name` is not a counter.
    pub fn increment(&mut self, name: &str) -> bool {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, FieldValue::Count(n))) => {
                *n = n.saturating_add(1);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let idx = self.fields.iter().position(|(k, _)| k == name)?;
        Some(self.fields.remove(idx).1)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldValue)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for PhaseRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PhaseRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PhaseRecordVisitor)
    }
}

struct PhaseRecordVisitor;

impl<'de> Visitor<'de> for PhaseRecordVisitor {
    type Value = PhaseRecord;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of counters and flags")
    }

    // Values that are neither booleans nor non-negative integers are dropped, so a
    // partially populated or drifted record still scores.
    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = PhaseRecord::default();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            let field = match value {
                Value::Bool(b) => FieldValue::Flag(b),
                Value::Number(n) => match n.as_u64().and_then(|v| u32::try_from(v).ok()) {
                    Some(v) => FieldValue::Count(v),
                    None => continue,
                },
                _ => continue,
            };
            record.set(&key, field);
        }
        Ok(record)
    }
}

/// Per-match tally derived from a raw observation.
///
/// Serialises to `{"auto": {"startPosition": .., ..}, "teleop": {..}, "endgame": {..}, ..extra}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "WireRecord")]
pub struct CounterRecord {
    pub start_position: Option<usize>,
    pub auto: PhaseRecord,
    pub teleop: PhaseRecord,
    pub endgame: PhaseRecord,
    /// Raw fields the transformation did not consume, passed through untouched.
    pub extra: Map<String, Value>,
}

impl CounterRecord {
    pub fn group(&self, group: PhaseGroup) -> &PhaseRecord {
        match group {
            PhaseGroup::Auto => &self.auto,
            PhaseGroup::Teleop => &self.teleop,
            PhaseGroup::Endgame => &self.endgame,
        }
    }

    pub fn group_mut(&mut self, group: PhaseGroup) -> &mut PhaseRecord {
        match group {
            PhaseGroup::Auto => &mut self.auto,
            PhaseGroup::Teleop => &mut self.teleop,
            PhaseGroup::Endgame => &mut self.endgame,
        }
    }

    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

#[derive(Deserialize)]
struct WireRecord {
    #[serde(default)]
    auto: PhaseRecord,
    #[serde(default)]
    teleop: PhaseRecord,
    #[serde(default)]
    endgame: PhaseRecord,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<WireRecord> for CounterRecord {
    fn from(mut wire: WireRecord) -> Self {
        let start_position = match wire.auto.remove(START_POSITION_FIELD) {
            Some(FieldValue::Count(i)) => Some(i as usize),
            _ => None,
        };
        Self {
            start_position,
            auto: wire.auto,
            teleop: wire.teleop,
            endgame: wire.endgame,
            extra: wire.extra,
        }
    }
}

struct AutoGroup<'a> {
    start_position: Option<usize>,
    fields: &'a PhaseRecord,
}

impl Serialize for AutoGroup<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(START_POSITION_FIELD, &self.start_position)?;
        for (k, v) in self.fields.fields() {
            map.serialize_entry(k, &v)?;
        }
        map.end()
    }
}

impl Serialize for CounterRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let auto: &str = PhaseGroup::Auto.as_ref();
        let teleop: &str = PhaseGroup::Teleop.as_ref();
        let endgame: &str = PhaseGroup::Endgame.as_ref();

        let mut map = serializer.serialize_map(Some(3 + self.extra.len()))?;
        map.serialize_entry(
            auto,
            &AutoGroup {
                start_position: self.start_position,
                fields: &self.auto,
            },
        )?;
        map.serialize_entry(teleop, &self.teleop)?;
        map.serialize_entry(endgame, &self.endgame)?;
        for (k, v) in &self.extra {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
