pub mod catalog;
pub mod rooms;
pub mod slots;

use clap::ValueEnum;

/// Output format shared by all subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
