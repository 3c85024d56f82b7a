use crate::reports;
use clap::Args;
use scoutforge::api::ScoutSession;
use scoutforge::error::{ScResult, ScoutError};

#[derive(Args, Debug, Clone)]
pub struct ColumnsArgs {
    /// Only list the columns selected by this preset.
    #[arg(short, long)]
    pub preset: Option<String>,
}

pub fn run(args: ColumnsArgs, session: &ScoutSession) -> ScResult<()> {
    let generator = session.columns();
    let columns = generator.generate_columns();

    match args.preset {
        Some(name) => {
            let selected = generator
                .preset_columns(&name)
                .ok_or_else(|| ScoutError::Config(format!("Unknown preset '{}'", name)))?;
            println!("\n📋 === PRESET: {} ===", name);
            let resolved: Vec<_> = selected.into_iter().filter_map(|(_, c)| c).collect();
            reports::print_columns(&resolved);
        }
        None => {
            println!("\n📋 === COLUMNS: {} ===", session.schema().name());
            reports::print_columns(&columns);
            reports::print_presets(generator.presets(), &columns);
        }
    }
    Ok(())
}
