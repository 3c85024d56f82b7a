use crate::record::CounterRecord;
use serde::{Deserialize, Serialize};

/// Phase point totals for one match. `total_points` is always the sum of the other three.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointTotals {
    pub auto_points: u32,
    pub teleop_points: u32,
    pub endgame_points: u32,
    pub total_points: u32,
}

impl PointTotals {
    pub fn new(auto_points: u32, teleop_points: u32, endgame_points: u32) -> Self {
        Self {
            auto_points,
            teleop_points,
            endgame_points,
            total_points: auto_points
                .saturating_add(teleop_points)
                .saturating_add(endgame_points),
        }
    }
}

/// A transformed record together with its points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub record: CounterRecord,
    pub points: PointTotals,
}
