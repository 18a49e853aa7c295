mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use homecal_core::{CategoryType, DateRange};
use tracing_subscriber::EnvFilter;

use commands::report::Report;

#[derive(Parser)]
#[command(name = "homecal")]
#[command(about = "Track your time by category and see where it goes each month")]
struct Cli {
    /// Calendar file to use instead of the one in config.toml
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new calendar file with the default categories
    Init {
        /// Replace the file if it already exists
        #[arg(long)]
        force: bool,
    },
    /// Every event with a running busy-time total
    Items(ReportArgs),
    /// Events grouped by month
    Months(ReportArgs),
    /// Events grouped by category
    Categories(ReportArgs),
    /// Busy time per category for each month, plus totals
    Pivot(ReportArgs),
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage events
    Event {
        #[command(subcommand)]
        action: EventAction,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Include events from this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Include events until the end of this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    /// Only include events of this category id
    #[arg(short, long)]
    category: Option<i64>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum CategoryAction {
    List {
        #[arg(long)]
        json: bool,
    },
    Add {
        description: String,

        /// event, all-day-event, holiday or availability
        #[arg(short = 't', long = "type", default_value = "event")]
        kind: CategoryType,
    },
    Update {
        id: i64,
        description: String,

        #[arg(short = 't', long = "type", default_value = "event")]
        kind: CategoryType,
    },
    /// Delete a category and all of its events
    Delete { id: i64 },
    /// Delete every event and category and restore the defaults
    Reset {
        /// Required, since this cannot be undone
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum EventAction {
    List {
        #[arg(long)]
        json: bool,
    },
    Add {
        details: String,

        /// Start date/time (e.g. "2025-03-20 15:00", "tomorrow 3pm")
        #[arg(short, long)]
        start: String,

        /// Duration (e.g. "30m", "1h 30m", or a number of minutes)
        #[arg(short, long)]
        duration: String,

        /// Category id
        #[arg(short, long)]
        category: i64,
    },
    Update {
        id: i64,

        #[arg(long)]
        details: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        duration: Option<String>,

        #[arg(short, long)]
        category: Option<i64>,
    },
    Delete { id: i64 },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            let path = commands::calendar_path(cli.file)?;
            commands::init::run(&path, force)
        }
        Commands::Items(args) => run_report(cli.file, Report::Items, args),
        Commands::Months(args) => run_report(cli.file, Report::Months, args),
        Commands::Categories(args) => run_report(cli.file, Report::Categories, args),
        Commands::Pivot(args) => run_report(cli.file, Report::Pivot, args),
        Commands::Category { action } => {
            let db = commands::open_database(cli.file)?;
            match action {
                CategoryAction::List { json } => commands::category::list(&db, json),
                CategoryAction::Add { description, kind } => {
                    commands::category::add(&db, &description, kind)
                }
                CategoryAction::Update {
                    id,
                    description,
                    kind,
                } => commands::category::update(&db, id, &description, kind),
                CategoryAction::Delete { id } => commands::category::delete(&db, id),
                CategoryAction::Reset { force } => commands::category::reset(&db, force),
            }
        }
        Commands::Event { action } => {
            let db = commands::open_database(cli.file)?;
            match action {
                EventAction::List { json } => commands::event::list(&db, json),
                EventAction::Add {
                    details,
                    start,
                    duration,
                    category,
                } => commands::event::add(&db, &details, &start, &duration, category),
                EventAction::Update {
                    id,
                    details,
                    start,
                    duration,
                    category,
                } => commands::event::update(
                    &db,
                    id,
                    commands::event::EventChanges {
                        details,
                        start,
                        duration,
                        category,
                    },
                ),
                EventAction::Delete { id } => commands::event::delete(&db, id),
            }
        }
    }
}

fn run_report(file: Option<PathBuf>, report: Report, args: ReportArgs) -> Result<()> {
    let calendar = commands::open_calendar(file)?;
    let range = DateRange::from_args(args.from.as_deref(), args.to.as_deref())?;
    commands::report::run(&calendar, report, range, args.category, args.json)
}

/// Log to stderr, filtered by RUST_LOG (default: warn).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
