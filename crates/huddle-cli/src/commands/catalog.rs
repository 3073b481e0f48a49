use std::error::Error;
use std::path::PathBuf;

use clap::Subcommand;

use huddle_core::RoomCatalog;

use crate::commands::OutputFormat;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List all known rooms
    List {
        /// Room catalog TOML; defaults to the built-in catalog
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn Error>> {
    match action {
        CatalogAction::List { catalog, format } => {
            let catalog = RoomCatalog::load_or_builtin(catalog.as_deref())?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(catalog.rooms())?);
                }
                OutputFormat::Text => {
                    println!("Known rooms:");
                    for room in catalog.rooms() {
                        let preferred = if room.preferred { " *" } else { "" };
                        println!(
                            "  {} ({} seats) [{}] @ {}{}",
                            room.name, room.capacity, room.kind, room.location, preferred
                        );
                        println!("    id: {}", room.resource_id);
                    }
                }
            }
        }
    }
    Ok(())
}
