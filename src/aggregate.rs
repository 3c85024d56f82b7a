//! Per-team statistics across many matches, keyed by column key.

use crate::columns::capitalize_first;
use crate::record::CounterRecord;
use crate::schema::{counter_field, Phase, PhaseGroup, Schema, StatKind};
use crate::scorer::{PointTotals, ScoredMatch, Scorer};
use crate::transform::{RawObservation, Transformer};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

pub const TEAM_NUMBER_FIELD: &str = "teamNumber";
pub const EVENT_KEY_FIELD: &str = "eventKey";
pub const MATCH_COUNT_KEY: &str = "matchCount";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Text(String),
    Number(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamStats {
    team: String,
    values: BTreeMap<String, StatValue>,
}

impl TeamStats {
    pub fn team(&self) -> &str {
        &self.team
    }

    /// Value for a column key. Unknown keys are a miss, not an error.
    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.values.get(key)
    }

    pub fn match_count(&self) -> usize {
        self.get(MATCH_COUNT_KEY)
            .and_then(StatValue::as_f64)
            .map_or(0, |n| n as usize)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &StatValue)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn put(&mut self, key: impl Into<String>, value: StatValue) {
        self.values.insert(key.into(), value);
    }

    fn put_number(&mut self, key: impl Into<String>, value: f64) {
        self.put(key, StatValue::Number(value));
    }
}

/// Team number or event key as text; numbers and strings are both accepted.
fn text_field(record: &CounterRecord, key: &str) -> Option<String> {
    match record.extra(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn stat_key(group: impl Display, name: &str) -> String {
    format!("{}.{}", group, name)
}

fn average<F>(matches: &[&ScoredMatch], f: F) -> f64
where
    F: Fn(&ScoredMatch) -> f64,
{
    if matches.is_empty() {
        return 0.0;
    }
    matches.iter().map(|m| f(m)).sum::<f64>() / matches.len() as f64
}

/// Percentage (0-100) of matches with `toggle` set.
fn toggle_rate(matches: &[&ScoredMatch], group: PhaseGroup, toggle: &str) -> f64 {
    average(matches, |m| {
        if m.record.group(group).flag(toggle) {
            100.0
        } else {
            0.0
        }
    })
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    schema: Arc<Schema>,
    transformer: Transformer,
    scorer: Scorer,
}

impl Aggregator {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            transformer: Transformer::new(schema.clone()),
            scorer: Scorer::new(schema.clone()),
            schema,
        }
    }

    /// Transforms and scores every observation in parallel. Output order matches input.
    pub fn score_all(&self, observations: Vec<RawObservation>) -> Vec<ScoredMatch> {
        observations
            .into_par_iter()
            .map(|raw| {
                let record = self.transformer.transform(raw);
                let points = self.scorer.score(&record);
                ScoredMatch { record, points }
            })
            .collect()
    }

    pub fn aggregate(&self, observations: Vec<RawObservation>) -> Vec<TeamStats> {
        let scored = self.score_all(observations);
        self.aggregate_scored(&scored)
    }

    /// Groups matches by team number and computes one [`TeamStats`] per team.
    ///
    /// Teams come back sorted by number (numerically when possible). Matches without a
    /// team number are skipped.
    pub fn aggregate_scored(&self, matches: &[ScoredMatch]) -> Vec<TeamStats> {
        let mut by_team: BTreeMap<String, Vec<&ScoredMatch>> = BTreeMap::new();
        let mut skipped = 0;
        for m in matches {
            match text_field(&m.record, TEAM_NUMBER_FIELD) {
                Some(team) => by_team.entry(team).or_default().push(m),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("Skipped {} matches without a {}", skipped, TEAM_NUMBER_FIELD);
        }
        debug!("Aggregating {} teams", by_team.len());

        let mut teams: Vec<TeamStats> = by_team
            .into_par_iter()
            .map(|(team, team_matches)| self.team_stats(team, &team_matches))
            .collect();

        teams.sort_by_cached_key(|t| {
            let n = t.team.parse::<u64>().ok();
            (n.is_none(), n, t.team.clone())
        });
        teams
    }

    fn action_sum(&self, m: &ScoredMatch, phase: Phase, keys: &[&str]) -> f64 {
        let fields = m.record.group(phase.into());
        keys.iter()
            .filter(|k| self.schema.action(k).is_some_and(|a| a.counted_in(phase)))
            .map(|k| fields.count(&counter_field(k)) as f64)
            .sum()
    }

    fn team_stats(&self, team: String, matches: &[&ScoredMatch]) -> TeamStats {
        let n = matches.len() as f64;
        let mut stats = TeamStats {
            team: team.clone(),
            values: BTreeMap::new(),
        };
        stats.put(TEAM_NUMBER_FIELD, StatValue::Text(team));
        if let Some(event) = matches
            .iter()
            .find_map(|m| text_field(&m.record, EVENT_KEY_FIELD))
        {
            stats.put(EVENT_KEY_FIELD, StatValue::Text(event));
        }
        stats.put_number(MATCH_COUNT_KEY, n);

        let points: [(&str, PhaseGroup, fn(&PointTotals) -> u32); 3] = [
            ("autoPoints", PhaseGroup::Auto, |p| p.auto_points),
            ("teleopPoints", PhaseGroup::Teleop, |p| p.teleop_points),
            ("endgamePoints", PhaseGroup::Endgame, |p| p.endgame_points),
        ];
        for (key, group, get) in points {
            let value = average(matches, |m| get(&m.points) as f64);
            stats.put_number(key, value);
            stats.put_number(stat_key(group, "avgPoints"), value);
        }
        let total = average(matches, |m| m.points.total_points as f64);
        stats.put_number("totalPoints", total);
        stats.put_number("overall.avgTotalPoints", total);

        let all_keys: Vec<&str> = self.schema.action_keys().collect();
        for phase in Phase::iter() {
            for action in self.schema.actions_in(phase) {
                let field = action.counter_field();
                let value = average(matches, |m| m.record.group(phase.into()).count(&field) as f64);
                stats.put_number(
                    stat_key(phase, &format!("avg{}", capitalize_first(&action.key))),
                    value,
                );
            }
        }
        stats.put_number(
            "overall.totalPiecesScored",
            average(matches, |m| Phase::iter().map(|p| self.action_sum(m, p, &all_keys)).sum()),
        );

        for group in PhaseGroup::iter() {
            for toggle in self.schema.toggles(group) {
                stats.put_number(
                    stat_key(group, &format!("{}Rate", toggle.key)),
                    toggle_rate(matches, group, &toggle.key),
                );
            }
        }

        for stat in self.schema.stats() {
            match &stat.kind {
                StatKind::ActionSum(keys) => {
                    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                    for phase in Phase::iter() {
                        stats.put_number(
                            stat_key(phase, &stat.key),
                            average(matches, |m| self.action_sum(m, phase, &keys)),
                        );
                    }
                    stats.put_number(
                        stat_key("overall", &stat.key),
                        average(matches, |m| Phase::iter().map(|p| self.action_sum(m, p, &keys)).sum()),
                    );
                }
                StatKind::ToggleRate { phase, toggle } => {
                    stats.put_number(stat_key(phase, &stat.key), toggle_rate(matches, *phase, toggle));
                }
            }
        }

        stats
    }
}
