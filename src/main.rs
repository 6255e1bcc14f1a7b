mod commands;
mod logging;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::set::SettingKey;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Upcoming events from your calendar directory, grouped by day")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the agenda
    List {
        /// Use the calendar selection of this widget
        #[arg(short, long)]
        widget: Option<i32>,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the event at a row of the agenda in your calendar application
    Open {
        /// Row number as shown by `agenda list`
        row: usize,

        /// Use the calendar selection of this widget
        #[arg(short, long)]
        widget: Option<i32>,
    },
    /// List calendars in the calendar directory
    Calendars {
        /// Mark the calendars selected for this widget
        #[arg(short, long)]
        widget: Option<i32>,
    },
    /// Choose which calendars the agenda shows (by slug)
    Select {
        calendars: Vec<String>,

        /// Store the selection for this widget instead of globally
        #[arg(short, long)]
        widget: Option<i32>,
    },
    /// Change a display preference
    Set { key: SettingKey, value: String },
}

fn main() -> Result<()> {
    logging::init()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::List { widget, json } => commands::list::run(widget, json),
        Commands::Open { row, widget } => commands::open::run(row, widget),
        Commands::Calendars { widget } => commands::calendars::run(widget),
        Commands::Select { calendars, widget } => commands::select::run(calendars, widget),
        Commands::Set { key, value } => commands::set::run(key, &value),
    }
}
