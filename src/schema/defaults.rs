// Reference game configuration. Edit `data/schema.json` (or pass --schema) to adapt the
// pipeline to a new season; this copy only backs `Schema::default()`.

use super::{
    ActionDef, ColumnCategory, ColumnEntry, PhasePoints, PresetDef, Schema, StatDef, StatKind,
    ToggleDef, ToggleGroup, ToggleSet, PhaseGroup as Group,
};

fn action(key: &str, label: &str, description: &str, auto: Option<u32>, teleop: Option<u32>) -> ActionDef {
    ActionDef {
        key: key.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        points: PhasePoints { auto, teleop },
    }
}

fn toggle(key: &str, label: &str, description: &str, points: Option<u32>, group: Option<ToggleGroup>) -> ToggleDef {
    ToggleDef {
        key: key.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        points,
        group,
    }
}

fn column(key: &str, label: &str, visible: bool, numeric: bool) -> ColumnEntry {
    ColumnEntry {
        key: key.to_string(),
        label: label.to_string(),
        visible,
        numeric,
        percentage: None,
    }
}

fn percent(key: &str, label: &str, visible: bool) -> ColumnEntry {
    ColumnEntry {
        percentage: Some(true),
        ..column(key, label, visible, true)
    }
}

fn category(name: &str, columns: Vec<ColumnEntry>) -> ColumnCategory {
    ColumnCategory {
        category: name.to_string(),
        columns,
    }
}

fn preset(name: &str, columns: &[&str]) -> PresetDef {
    PresetDef {
        name: name.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
    }
}

impl Default for Schema {
    fn default() -> Self {
        use ToggleGroup::{Selection, Toggles};

        let actions = vec![
            action("action1", "Action 1", "First scoring action", Some(3), Some(2)),
            action("action2", "Action 2", "Second scoring action", Some(5), Some(4)),
            action("action3", "Action 3", "Third scoring action", Some(2), Some(3)),
            action("action4", "Action 4", "Fourth scoring action", Some(4), Some(4)),
            action("teleopSpecial", "Teleop Special", "Special teleop-only action", None, Some(5)),
        ];

        let toggles = ToggleSet {
            auto: vec![toggle("autoToggle", "Auto Toggle", "Example: Left Starting Zone", None, None)],
            teleop: vec![toggle("teleopToggle", "Teleop Toggle", "Example: Played Defense", None, None)],
            endgame: vec![
                toggle("option1", "Option 1", "Example: Shallow Climb", Some(10), Some(Selection)),
                toggle("option2", "Option 2", "Example: Deep Climb", Some(5), Some(Selection)),
                toggle("option3", "Option 3", "Example: Park", Some(2), Some(Selection)),
                toggle("toggle1", "Toggle 1", "Example: Climb Failed", Some(0), Some(Toggles)),
                toggle("toggle2", "Toggle 2", "Example: Broke Down", Some(0), Some(Toggles)),
            ],
        };

        let columns = vec![
            category(
                "teamInfo",
                vec![
                    column("teamNumber", "Team", true, false),
                    column("eventKey", "Event", true, false),
                    column("matchCount", "Matches", true, true),
                ],
            ),
            category(
                "points",
                vec![
                    column("totalPoints", "Total Pts", true, true),
                    column("autoPoints", "Auto Pts", true, true),
                    column("teleopPoints", "Teleop Pts", true, true),
                    column("endgamePoints", "Endgame Pts", true, true),
                ],
            ),
            category(
                "overall",
                vec![
                    column("overall.avgTotalPoints", "Avg Total Pts", false, true),
                    column("overall.totalPiecesScored", "Avg Pieces", true, true),
                    column("overall.avgGamePiece1", "Avg Action 1+2", false, true),
                    column("overall.avgGamePiece2", "Avg Action 3+4", false, true),
                ],
            ),
            category(
                "auto",
                vec![
                    column("auto.avgPoints", "Auto Avg", false, true),
                    column("auto.avgGamePiece1", "Auto Actions 1+2", true, true),
                    column("auto.avgGamePiece2", "Auto Actions 3+4", false, true),
                    percent("auto.mobilityRate", "Mobility %", true),
                ],
            ),
            category(
                "teleop",
                vec![
                    column("teleop.avgPoints", "Teleop Avg", false, true),
                    column("teleop.avgGamePiece1", "Teleop Actions 1+2", true, true),
                    column("teleop.avgGamePiece2", "Teleop Action 3", false, true),
                ],
            ),
            category(
                "endgame",
                vec![
                    column("endgame.avgPoints", "Endgame Avg", false, true),
                    percent("endgame.option1Rate", "Option 1 %", true),
                    percent("endgame.option2Rate", "Option 2 %", true),
                    percent("endgame.option3Rate", "Option 3 %", false),
                    percent("endgame.toggle1Rate", "Toggle 1 %", false),
                    percent("endgame.toggle2Rate", "Toggle 2 %", false),
                ],
            ),
        ];

        let presets = vec![
            preset(
                "essential",
                &["teamNumber", "matchCount", "totalPoints", "overall.totalPiecesScored", "endgame.option1Rate"],
            ),
            preset(
                "auto",
                &["teamNumber", "matchCount", "autoPoints", "auto.avgGamePiece1", "auto.avgGamePiece2", "auto.mobilityRate"],
            ),
            preset(
                "teleop",
                &["teamNumber", "matchCount", "teleopPoints", "teleop.avgGamePiece1", "teleop.avgGamePiece2"],
            ),
            preset(
                "endgame",
                &["teamNumber", "matchCount", "endgamePoints", "endgame.option1Rate", "endgame.option2Rate", "endgame.toggle1Rate"],
            ),
            preset("basic", &["teamNumber", "eventKey", "matchCount"]),
        ];

        let stats = vec![
            StatDef {
                key: "avgGamePiece1".to_string(),
                kind: StatKind::ActionSum(vec!["action1".to_string(), "action2".to_string()]),
            },
            StatDef {
                key: "avgGamePiece2".to_string(),
                kind: StatKind::ActionSum(vec!["action3".to_string(), "action4".to_string()]),
            },
            StatDef {
                key: "mobilityRate".to_string(),
                kind: StatKind::ToggleRate {
                    phase: Group::Auto,
                    toggle: "autoToggle".to_string(),
                },
            },
        ];

        Schema {
            name: "Reference Game".to_string(),
            actions,
            toggles,
            columns,
            presets,
            stats,
        }
    }
}
