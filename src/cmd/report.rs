use crate::reports::{self, Selected};
use clap::Args;
use scoutforge::api::ScoutSession;
use scoutforge::config::ReportParams;
use scoutforge::error::{ScResult, ScoutError};
use scoutforge::input::read_observations_from_file;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Observations as a JSON array or JSON lines.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub report: ReportParams,

    /// Also write the table to a CSV file.
    #[arg(long, value_name = "OUT")]
    pub csv: Option<PathBuf>,
}

fn select_columns(session: &ScoutSession, params: &ReportParams) -> ScResult<Vec<Selected>> {
    let generator = session.columns();
    if let Some(name) = &params.preset {
        return generator
            .preset_columns(name)
            .ok_or_else(|| ScoutError::Config(format!("Unknown preset '{}'", name)));
    }
    Ok(generator
        .generate_columns()
        .into_iter()
        .filter(|c| params.all_columns || c.visible)
        .map(|c| (c.key.clone(), Some(c)))
        .collect())
}

pub fn run(args: ReportArgs, params: ReportParams, session: &ScoutSession) -> ScResult<()> {
    let selected = select_columns(session, &params)?;

    let observations = read_observations_from_file(&args.input)?;
    info!("Aggregating {} observations", observations.len());
    let mut teams = session.team_stats(observations);

    let before = teams.len();
    teams.retain(|t| t.match_count() >= params.min_matches);
    if teams.len() < before {
        info!(
            "Dropped {} teams with fewer than {} matches",
            before - teams.len(),
            params.min_matches
        );
    }

    if let Some(key) = &params.sort_by {
        if !session.schema().has_column(key) {
            warn!("Sort key '{}' is not a schema column", key);
        }
        reports::sort_teams(&mut teams, key, params.ascending);
    }

    println!("\n📊 === TEAM REPORT: {} ({} teams) ===", session.schema().name(), teams.len());
    reports::print_team_table(&teams, &selected);

    if let Some(path) = &args.csv {
        let file = File::create(path)?;
        reports::write_csv(BufWriter::new(file), &teams, &selected)?;
        info!("💾 Wrote {}", path.display());
    }
    Ok(())
}
