use scoutforge::columns::ColumnGenerator;
use scoutforge::schema::Schema;
use std::sync::Arc;

fn generator() -> ColumnGenerator {
    ColumnGenerator::new(Arc::new(Schema::default()))
}

#[test]
fn test_columns_follow_declaration_order() {
    let columns = generator().generate_columns();
    let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();

    assert_eq!(columns.len(), 24);
    assert_eq!(&keys[..3], &["teamNumber", "eventKey", "matchCount"]);
    assert_eq!(keys[3], "totalPoints");
    assert_eq!(keys.last(), Some(&"endgame.toggle2Rate"));
}

#[test]
fn test_generation_is_stable() {
    let g = generator();
    assert_eq!(g.generate_columns(), g.generate_columns());
}

#[test]
fn test_category_labels_are_capitalised() {
    let columns = generator().generate_columns();
    let mut categories: Vec<&str> = columns.iter().map(|c| c.category.as_str()).collect();
    categories.dedup();
    assert_eq!(
        categories,
        vec!["TeamInfo", "Points", "Overall", "Auto", "Teleop", "Endgame"]
    );
}

#[test]
fn test_flags_are_carried_over() {
    let columns = generator().generate_columns();
    let find = |key: &str| columns.iter().find(|c| c.key == key).unwrap();

    let team = find("teamNumber");
    assert!(team.visible);
    assert!(!team.numeric);
    assert!(!team.is_percentage());

    let mobility = find("auto.mobilityRate");
    assert!(mobility.numeric);
    assert!(mobility.is_percentage());
    assert_eq!(mobility.label, "Mobility %");

    assert!(!find("endgame.option3Rate").visible);
    assert_eq!(find("totalPoints").percentage, None);

    let avg_total = find("overall.avgTotalPoints");
    assert_eq!(avg_total.category, "Overall");
    assert!(!avg_total.visible);
    assert_eq!(find("teleop.avgGamePiece2").label, "Teleop Action 3");
}

#[test]
fn test_presets_resolve_in_preset_order() {
    let g = generator();
    let names: Vec<&str> = g.presets().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["essential", "auto", "teleop", "endgame", "basic"]);

    let basic = g.preset_columns("basic").unwrap();
    let keys: Vec<&str> = basic.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["teamNumber", "eventKey", "matchCount"]);
    assert!(basic.iter().all(|(_, c)| c.is_some()));

    assert!(g.preset_columns("nope").is_none());
}

#[test]
fn test_preset_with_unknown_column_resolves_to_none() {
    let schema = Schema::from_json_str(
        r#"{
            "actions": [{"key": "a", "label": "A", "points": {"teleop": 1}}],
            "columns": [{"category": "info", "columns": [
                {"key": "teamNumber", "label": "Team", "visible": true, "numeric": false}
            ]}],
            "presets": [{"name": "p", "columns": ["teamNumber", "ghost"]}]
        }"#,
        false,
    )
    .unwrap();
    let g = ColumnGenerator::new(Arc::new(schema));
    let cols = g.preset_columns("p").unwrap();

    assert_eq!(cols.len(), 2);
    assert_eq!(cols[0].1.as_ref().map(|c| c.category.as_str()), Some("Info"));
    assert_eq!(cols[1].0, "ghost");
    assert!(cols[1].1.is_none());
}
