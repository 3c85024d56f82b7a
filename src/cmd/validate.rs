use clap::Args;
use scoutforge::api::ScoutSession;
use scoutforge::error::ScResult;
use scoutforge::schema::PhaseGroup;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Print the schema back as JSON after validating it.
    #[arg(long, default_value_t = false)]
    pub dump: bool,
}

pub fn run(args: ValidateArgs, session: &ScoutSession) -> ScResult<()> {
    let schema = session.schema();

    println!("\n🔎 === SCHEMA: {} === 🔎", schema.name());
    println!("  actions:  {}", schema.actions().len());
    for group in PhaseGroup::iter() {
        println!("  {:<9} {} toggles", format!("{}:", group), schema.toggles(group).len());
    }
    println!("  columns:  {}", session.columns().generate_columns().len());
    println!("  presets:  {}", schema.presets().len());
    println!("  stats:    {}", schema.stats().len());
    println!("✅ Schema is valid");

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&**schema)?);
    }
    Ok(())
}
