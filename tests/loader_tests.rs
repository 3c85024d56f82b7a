use scoutforge::error::ScoutError;
use scoutforge::schema::{Phase, PhaseGroup, Schema, StatKind};
use std::io::Write;
use tempfile::NamedTempFile;

const MINIMAL: &str = r#"{
    "name": "Minimal",
    "actions": [
        {"key": "coral", "label": "Coral", "points": {"auto": 4, "teleop": 2}},
        {"key": "algae", "label": "Algae", "points": {"teleop": 6}}
    ],
    "toggles": {
        "auto": [{"key": "leave", "label": "Leave"}],
        "endgame": [
            {"key": "deep", "label": "Deep", "points": 12, "group": "selection"},
            {"key": "park", "label": "Park", "points": 2, "group": "selection"}
        ]
    },
    "columns": [{"category": "teamInfo", "columns": [
        {"key": "teamNumber", "label": "Team", "visible": true, "numeric": false}
    ]}],
    "presets": [{"name": "basic", "columns": ["teamNumber"]}],
    "stats": [
        {"key": "avgCoral", "actionSum": ["coral"]},
        {"key": "leaveRate", "toggleRate": {"phase": "auto", "toggle": "leave"}}
    ]
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn schema_error(json: &str, strict: bool) -> String {
    match Schema::from_json_str(json, strict) {
        Err(ScoutError::Schema(msg)) => msg,
        other => panic!("expected a schema error, got {:?}", other.map(|s| s.name().to_string())),
    }
}

#[test]
fn test_loader_parses_valid_schema_file() {
    let file = write_temp(MINIMAL);
    let schema = Schema::load_from_file(file.path(), true).unwrap();

    assert_eq!(schema.name(), "Minimal");
    assert_eq!(schema.action_keys().collect::<Vec<_>>(), vec!["coral", "algae"]);
    assert_eq!(schema.action_points("coral", Phase::Auto), 4);
    assert_eq!(schema.action_points("algae", Phase::Auto), 0);
    assert_eq!(schema.actions_in(Phase::Auto).count(), 1);
    assert_eq!(schema.endgame_points("deep"), 12);
    assert!(schema.toggles(PhaseGroup::Teleop).is_empty());
    assert!(schema.has_column("teamNumber"));
    assert!(matches!(
        schema.stats()[1].kind,
        StatKind::ToggleRate { phase: PhaseGroup::Auto, .. }
    ));
}

#[test]
fn test_bundled_schema_matches_default() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/schema.json");
    let schema = Schema::load_from_file(path, true).unwrap();
    assert_eq!(schema, Schema::default());
}

#[test]
fn test_default_schema_is_strictly_valid() {
    Schema::default().validate(true).unwrap();
}

#[test]
fn test_serialised_schema_loads_back() {
    let schema = Schema::default();
    let json = serde_json::to_string(&schema).unwrap();
    assert_eq!(Schema::from_json_str(&json, true).unwrap(), schema);
}

#[test]
fn test_missing_file_is_config_error() {
    let err = Schema::load_from_file("/definitely/not/here.json", false).unwrap_err();
    assert!(matches!(err, ScoutError::Config(_)));
}

#[test]
fn test_malformed_json_is_json_error() {
    let file = write_temp("{ \"actions\": [ ");
    let err = Schema::load_from_file(file.path(), false).unwrap_err();
    assert!(matches!(err, ScoutError::Json(_)));
}

#[test]
fn test_rejects_duplicate_action_keys() {
    let msg = schema_error(
        r#"{"actions": [
            {"key": "a", "label": "A", "points": {"auto": 1}},
            {"key": "a", "label": "A again", "points": {"teleop": 1}}
        ]}"#,
        false,
    );
    assert!(msg.contains("duplicate action key 'a'"), "{}", msg);
}

#[test]
fn test_rejects_action_without_points() {
    let msg = schema_error(r#"{"actions": [{"key": "a", "label": "A", "points": {}}]}"#, false);
    assert!(msg.contains("no point value"), "{}", msg);
}

#[test]
fn test_rejects_duplicate_toggle_within_group() {
    let msg = schema_error(
        r#"{"actions": [], "toggles": {"endgame": [
            {"key": "x", "label": "X"}, {"key": "x", "label": "X"}
        ]}}"#,
        false,
    );
    assert!(msg.contains("duplicate endgame toggle key 'x'"), "{}", msg);
}

#[test]
fn test_same_toggle_key_in_different_groups_is_fine() {
    Schema::from_json_str(
        r#"{"actions": [], "toggles": {
            "auto": [{"key": "x", "label": "X"}],
            "teleop": [{"key": "x", "label": "X"}]
        }}"#,
        true,
    )
    .unwrap();
}

#[test]
fn test_rejects_duplicate_column_keys_across_categories() {
    let msg = schema_error(
        r#"{"actions": [], "columns": [
            {"category": "a", "columns": [{"key": "k", "label": "K", "visible": true, "numeric": true}]},
            {"category": "b", "columns": [{"key": "k", "label": "K", "visible": true, "numeric": true}]}
        ]}"#,
        false,
    );
    assert!(msg.contains("duplicate column key 'k'"), "{}", msg);
}

#[test]
fn test_unknown_preset_column_depends_on_strictness() {
    let json = r#"{"actions": [], "presets": [{"name": "p", "columns": ["ghost"]}]}"#;

    assert!(Schema::from_json_str(json, false).is_ok());
    let msg = schema_error(json, true);
    assert!(msg.contains("unknown column 'ghost'"), "{}", msg);
}

#[test]
fn test_rejects_stats_with_dangling_references() {
    let msg = schema_error(
        r#"{"actions": [], "stats": [{"key": "s", "actionSum": ["nope"]}]}"#,
        false,
    );
    assert!(msg.contains("unknown action 'nope'"), "{}", msg);

    let msg = schema_error(
        r#"{"actions": [], "stats": [{"key": "s", "toggleRate": {"phase": "teleop", "toggle": "t"}}]}"#,
        false,
    );
    assert!(msg.contains("unknown teleop toggle 't'"), "{}", msg);
}
