use clap::Subcommand;

/// Learning reference commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LearningCommands {
    /// Show the stored reference (without the thumbnail data).
    Show,
    /// Forget the stored reference.
    Clear,
}
