pub mod types;

pub use self::types::{PointTotals, ScoredMatch};
use crate::record::CounterRecord;
use crate::schema::{Phase, PhaseGroup, Schema};
use std::sync::Arc;

/// Turns counter records into points using the schema's point values.
///
/// Every method is a pure function of the record. Counters or toggles missing from
/// the record count as 0 / false. Totals saturate at `u32::MAX`.
#[derive(Debug, Clone)]
pub struct Scorer {
    schema: Arc<Schema>,
}

impl Scorer {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn action_points(&self, record: &CounterRecord, phase: Phase) -> u32 {
        let fields = record.group(phase.into());
        self.schema
            .actions_in(phase)
            .map(|a| {
                fields
                    .count(&a.counter_field())
                    .saturating_mul(self.schema.action_points(&a.key, phase))
            })
            .fold(0, u32::saturating_add)
    }

    pub fn auto_points(&self, record: &CounterRecord) -> u32 {
        self.action_points(record, Phase::Auto)
    }

    pub fn teleop_points(&self, record: &CounterRecord) -> u32 {
        self.action_points(record, Phase::Teleop)
    }

    /// Sum of every declared endgame toggle that is set.
    ///
    /// `selection` groups are not treated as exclusive here: if a record has two
    /// selection options set, both are counted.
    pub fn endgame_points(&self, record: &CounterRecord) -> u32 {
        self.schema
            .toggles(PhaseGroup::Endgame)
            .iter()
            .filter(|t| record.endgame.flag(&t.key))
            .map(|t| t.point_value())
            .fold(0, u32::saturating_add)
    }

    pub fn total_points(&self, record: &CounterRecord) -> u32 {
        self.score(record).total_points
    }

    pub fn score(&self, record: &CounterRecord) -> PointTotals {
        PointTotals::new(
            self.auto_points(record),
            self.teleop_points(record),
            self.endgame_points(record),
        )
    }
}
