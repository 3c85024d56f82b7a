use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use scoutforge::api::ScoutSession;
use scoutforge::config::{Config, SchemaParams};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Schema-driven scoring for match scouting data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    schema: SchemaParams,

    /// JSON settings file (schema + report defaults).
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transform and score each observation, one JSON line per match.
    Score(cmd::score::ScoreArgs),
    /// List the display columns and presets derived from the schema.
    Columns(cmd::columns::ColumnsArgs),
    /// Aggregate observations per team and print the statistics table.
    Report(cmd::report::ReportArgs),
    /// Strictly validate the schema and summarise it.
    Validate(cmd::validate::ValidateArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            info!("⚙️  Loading settings from: {}", path.display());
            Config::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };
    config.schema.merge_from_cli(&cli.schema, &matches);

    if let Commands::Validate(_) = &cli.command {
        config.schema.strict = true;
    }

    let session = ScoutSession::load(&config.schema).unwrap_or_else(|e| {
        error!("❌ FATAL ERROR LOADING SCHEMA:");
        error!("   {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Score(args) => cmd::score::run(args, &session),
        Commands::Columns(args) => cmd::columns::run(args, &session),
        Commands::Report(args) => {
            let mut report = config.report;
            if let Some(sub_matches) = matches.subcommand_matches("report") {
                report.merge_from_cli(&args.report, sub_matches);
            }
            cmd::report::run(args, report, &session)
        }
        Commands::Validate(args) => cmd::validate::run(args, &session),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
