use clap::{Parser, Subcommand};

mod commands;
mod freebusy;

#[derive(Parser)]
#[command(name = "huddle", version, about = "Meeting availability resolution")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find common free slots for a set of attendees
    Slots(commands::slots::SlotsArgs),
    /// Rank available rooms for a time window
    Rooms(commands::rooms::RoomsArgs),
    /// Room catalog inspection
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Rooms(args) => commands::rooms::run(args),
        Commands::Catalog { action } => commands::catalog::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
