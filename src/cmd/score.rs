use clap::Args;
use scoutforge::api::ScoutSession;
use scoutforge::error::ScResult;
use scoutforge::input::read_observations_from_file;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Observations as a JSON array or JSON lines.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

pub fn run(args: ScoreArgs, session: &ScoutSession) -> ScResult<()> {
    let observations = read_observations_from_file(&args.input)?;
    info!("Scoring {} observations", observations.len());

    let scored = session.aggregator().score_all(observations);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for m in &scored {
        serde_json::to_writer(&mut out, m)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
