use crate::aggregate::{Aggregator, TeamStats};
use crate::columns::ColumnGenerator;
use crate::config::SchemaParams;
use crate::error::ScResult;
use crate::schema::Schema;
use crate::scorer::{ScoredMatch, Scorer};
use crate::transform::{RawObservation, Transformer};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// All pipeline stages wired to one shared schema.
///
/// Cheap to clone; every stage only holds an `Arc<Schema>`.
#[derive(Debug, Clone)]
pub struct ScoutSession {
    schema: Arc<Schema>,
    transformer: Transformer,
    scorer: Scorer,
    columns: ColumnGenerator,
    aggregator: Aggregator,
}

impl ScoutSession {
    pub fn new(schema: Arc<Schema>) -> Self {
        debug!("Session created for schema '{}'", schema.name());
        Self {
            transformer: Transformer::new(schema.clone()),
            scorer: Scorer::new(schema.clone()),
            columns: ColumnGenerator::new(schema.clone()),
            aggregator: Aggregator::new(schema.clone()),
            schema,
        }
    }

    pub fn load(params: &SchemaParams) -> ScResult<Self> {
        Ok(Self::new(Arc::new(params.load_schema()?)))
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn columns(&self) -> &ColumnGenerator {
        &self.columns
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn evaluate(&self, raw: RawObservation) -> ScoredMatch {
        let record = self.transformer.transform(raw);
        let points = self.scorer.score(&record);
        ScoredMatch { record, points }
    }

    pub fn evaluate_value(&self, value: Value) -> ScResult<ScoredMatch> {
        let record = self.transformer.transform_value(value)?;
        let points = self.scorer.score(&record);
        Ok(ScoredMatch { record, points })
    }

    pub fn team_stats(&self, observations: Vec<RawObservation>) -> Vec<TeamStats> {
        self.aggregator.aggregate(observations)
    }
}

impl Default for ScoutSession {
    fn default() -> Self {
        Self::new(Arc::new(Schema::default()))
    }
}
