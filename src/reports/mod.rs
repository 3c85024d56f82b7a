use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use scoutforge::aggregate::{StatValue, TeamStats};
use scoutforge::columns::ColumnDef;
use scoutforge::error::ScResult;
use scoutforge::schema::PresetDef;
use std::cmp::Ordering;
use std::io::Write;

/// A report column: the requested key and the column it resolved to, if any.
pub type Selected = (String, Option<ColumnDef>);

pub fn format_stat(value: Option<&StatValue>, column: Option<&ColumnDef>) -> String {
    match value {
        None => String::new(),
        Some(StatValue::Text(s)) => s.clone(),
        Some(StatValue::Number(v)) => {
            if column.is_some_and(ColumnDef::is_percentage) {
                format!("{:.0}%", v)
            } else if v.fract() == 0.0 {
                format!("{:.0}", v)
            } else {
                format!("{:.1}", v)
            }
        }
    }
}

fn header(selected: &[Selected]) -> Vec<String> {
    selected
        .iter()
        .map(|(key, col)| col.as_ref().map_or_else(|| key.clone(), |c| c.label.clone()))
        .collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_columns(columns: &[ColumnDef]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Label"),
        Cell::new("Category"),
        Cell::new("Visible"),
        Cell::new("Numeric"),
        Cell::new("%"),
    ]);

    for c in columns {
        let visible = if c.visible {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(&c.key).add_attribute(Attribute::Bold),
            Cell::new(&c.label),
            Cell::new(&c.category),
            visible,
            Cell::new(if c.numeric { "yes" } else { "no" }),
            Cell::new(if c.is_percentage() { "yes" } else { "" }),
        ]);
    }
    println!("{}", table);
}

pub fn print_presets(presets: &[PresetDef], known: &[ColumnDef]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Preset").add_attribute(Attribute::Bold),
        Cell::new("Columns"),
    ]);
    for p in presets {
        let keys: Vec<String> = p
            .columns
            .iter()
            .map(|k| {
                if known.iter().any(|c| &c.key == k) {
                    k.clone()
                } else {
                    format!("{} (missing)", k)
                }
            })
            .collect();
        table.add_row(vec![
            Cell::new(&p.name).add_attribute(Attribute::Bold),
            Cell::new(keys.join(", ")),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_team_table(teams: &[TeamStats], selected: &[Selected]) {
    let mut table = new_table();
    table.set_header(
        header(selected)
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    for (i, (_, col)) in selected.iter().enumerate() {
        if col.as_ref().is_some_and(|c| c.numeric) {
            if let Some(column) = table.column_mut(i) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
    }

    for team in teams {
        let row: Vec<Cell> = selected
            .iter()
            .map(|(key, col)| Cell::new(format_stat(team.get(key), col.as_ref())))
            .collect();
        table.add_row(row);
    }
    println!("{}", table);
}

pub fn write_csv<W: Write>(writer: W, teams: &[TeamStats], selected: &[Selected]) -> ScResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header(selected))?;
    for team in teams {
        wtr.write_record(
            selected
                .iter()
                .map(|(key, col)| format_stat(team.get(key), col.as_ref())),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Orders teams by a stat. Teams missing the stat always sort last.
pub fn sort_teams(teams: &mut [TeamStats], key: &str, ascending: bool) {
    teams.sort_by(|a, b| {
        let ord = match (a.get(key), b.get(key)) {
            (Some(StatValue::Number(x)), Some(StatValue::Number(y))) => {
                x.partial_cmp(y).unwrap_or(Ordering::Equal)
            }
            (Some(StatValue::Text(x)), Some(StatValue::Text(y))) => x.cmp(y),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            _ => Ordering::Equal,
        };
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}
