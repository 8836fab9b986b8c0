use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LearningCommands;
use crate::commands::shared::view::warnings;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct LearningResponse {
    present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    points: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    captured_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    cleared: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// Handle `hidemeter learning`.
pub fn handle(action: &LearningCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        LearningCommands::Show => {
            let reference = ctx.log.learning_reference();
            let response = LearningResponse {
                present: reference.is_some(),
                points: reference.as_ref().map(|r| r.target.len()),
                thumbnail_chars: reference.as_ref().map(|r| r.thumbnail.len()),
                captured_at: reference.map(|r| r.captured_at),
            };
            output(&response, flags.format)
        }
        LearningCommands::Clear => {
            let response = match ctx.log.clear_learning() {
                Ok(()) => ClearResponse {
                    cleared: true,
                    warnings: Vec::new(),
                },
                Err(error) => ClearResponse {
                    cleared: false,
                    warnings: warnings(&[error]),
                },
            };
            output(&response, flags.format)
        }
    }
}
