use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{HistoryCommands, LearningCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Detect the reference sheet and hide in a photograph.
    Measure(MeasureArgs),
    /// Measure from points traced by hand on the 0-1000 grid.
    Trace(TraceArgs),
    /// Move vertices of a saved measurement and save the edited copy.
    Adjust(AdjustArgs),
    /// Saved measurements.
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
    /// The learning reference sent with automatic detections.
    Learning {
        #[command(subcommand)]
        action: LearningCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct MeasureArgs {
    /// Photograph of the hide with the reference sheet beside it.
    pub image: PathBuf,

    /// Print the result without adding it to history.
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Clone, Debug, Args)]
pub struct TraceArgs {
    /// Four reference sheet corners, "x,y x,y x,y x,y".
    #[arg(long)]
    pub reference: String,

    /// Hide outline, at least three "x,y" points.
    #[arg(long)]
    pub target: String,

    /// Photograph the trace belongs to (name and learning thumbnail).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Add the measurement to history.
    #[arg(long)]
    pub save: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AdjustArgs {
    /// ID of the measurement to adjust.
    pub id: String,

    /// Vertex move, "INDEX:x,y". Repeatable.
    #[arg(long = "move", value_name = "INDEX:X,Y", required = true)]
    pub moves: Vec<String>,

    /// Photograph for the learning thumbnail.
    #[arg(long)]
    pub image: Option<PathBuf>,
}
