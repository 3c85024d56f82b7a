use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const OBSERVATIONS: &str = r#"[
  {"teamNumber": 254, "eventKey": "2025casj", "autoActions": [{"actionType": "action1"}, {"actionType": "action2"}],
   "autoRobotStatus": {"autoToggle": true}, "endgameRobotStatus": {"option1": true}},
  {"teamNumber": 254, "eventKey": "2025casj", "teleopActions": [{"actionType": "teleopSpecial"}]},
  {"teamNumber": 1678, "eventKey": "2025casj", "teleopActions": [{"actionType": "action4"}]}
]"#;

struct TestContext {
    dir: TempDir,
    input: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("matches.json");
        fs::write(&input, OBSERVATIONS).unwrap();
        Self { dir, input }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scoutforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_score_emits_json_lines() {
    let ctx = TestContext::new();
    let output = run(&["score", ctx.input.to_str().unwrap()]);
    assert!(output.status.success());

    let lines: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["points"]["autoPoints"], 8);
    assert_eq!(lines[0]["points"]["endgamePoints"], 10);
    assert_eq!(lines[0]["points"]["totalPoints"], 18);
    assert_eq!(lines[0]["record"]["auto"]["action1Count"], 1);
    assert_eq!(lines[0]["record"]["teamNumber"], 254);
    assert_eq!(lines[1]["points"]["teleopPoints"], 5);
}

#[test]
fn test_cli_report_writes_csv() {
    let ctx = TestContext::new();
    let csv_path = ctx.path("report.csv");
    let output = run(&[
        "report",
        ctx.input.to_str().unwrap(),
        "--preset",
        "essential",
        "--csv",
        csv_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Team,Matches,Total Pts,Avg Pieces,Option 1 %")
    );
    let row = Regex::new(r"^(\d+),(\d+),([\d.]+),([\d.]+),(\d+)%$").unwrap();
    let rows: Vec<_> = lines.map(|l| row.captures(l).expect(l)).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "254");
    assert_eq!(&rows[0][2], "2");
    assert_eq!(&rows[0][3], "11.5");
    assert_eq!(&rows[0][5], "50");
    assert_eq!(&rows[1][1], "1678");
}

#[test]
fn test_cli_report_sort_and_min_matches() {
    let ctx = TestContext::new();
    let csv_path = ctx.path("sorted.csv");
    let output = run(&[
        "report",
        ctx.input.to_str().unwrap(),
        "--preset",
        "basic",
        "--sort-by",
        "matchCount",
        "--ascending",
        "--csv",
        csv_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let csv = fs::read_to_string(&csv_path).unwrap();
    let teams: Vec<&str> = csv.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(teams, vec!["1678", "254"]);

    let output = run(&[
        "report",
        ctx.input.to_str().unwrap(),
        "--min-matches",
        "2",
        "--csv",
        csv_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 2);
}

#[test]
fn test_cli_report_prints_table() {
    let ctx = TestContext::new();
    let output = run(&["report", ctx.input.to_str().unwrap(), "--preset", "basic"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("TEAM REPORT"));
    let team_row = Regex::new(r"\|\s*254\s*\|\s*2025casj\s*\|\s*2\s*\|").unwrap();
    assert!(team_row.is_match(&out), "{}", out);
}

#[test]
fn test_cli_unknown_preset_fails() {
    let ctx = TestContext::new();
    let output = run(&["report", ctx.input.to_str().unwrap(), "--preset", "nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown preset 'nope'"));
}

#[test]
fn test_cli_columns_lists_schema() {
    let output = run(&["columns"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("auto.mobilityRate"));
    assert!(out.contains("TeamInfo"));
    assert!(out.contains("essential"));
}

#[test]
fn test_cli_validate_accepts_bundled_schema() {
    let schema = concat!(env!("CARGO_MANIFEST_DIR"), "/data/schema.json");
    let output = run(&["validate", "--schema", schema]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Schema is valid"));
}

#[test]
fn test_cli_validate_is_strict() {
    let ctx = TestContext::new();
    let schema = ctx.path("loose.json");
    fs::write(
        &schema,
        r#"{"actions": [{"key": "a", "label": "A", "points": {"auto": 1}}],
            "presets": [{"name": "p", "columns": ["ghost"]}]}"#,
    )
    .unwrap();

    // Tolerated when scoring...
    let output = run(&["score", ctx.input.to_str().unwrap(), "--schema", schema.to_str().unwrap()]);
    assert!(output.status.success());

    // ...rejected by validate.
    let output = run(&["validate", "--schema", schema.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown column 'ghost'"));
}

#[test]
fn test_cli_config_file_supplies_report_defaults() {
    let ctx = TestContext::new();
    let config = ctx.path("settings.json");
    let csv_path = ctx.path("cfg.csv");
    fs::write(&config, r#"{"report": {"preset": "basic"}}"#).unwrap();

    let output = run(&[
        "report",
        ctx.input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--csv",
        csv_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().next(), Some("Team,Event,Matches"));
}
