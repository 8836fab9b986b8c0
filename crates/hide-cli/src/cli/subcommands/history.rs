use clap::Subcommand;

/// History commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HistoryCommands {
    /// List saved measurements, newest first.
    List,
    /// Show one measurement.
    Get { id: String },
    /// Delete one measurement.
    Delete { id: String },
    /// Delete every measurement and the learning reference.
    Clear,
}
