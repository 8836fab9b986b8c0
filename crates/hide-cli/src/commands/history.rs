use hide_store::StoreError;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HistoryCommands;
use crate::commands::shared::record_id;
use crate::commands::shared::view::{RecordRow, warnings};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct HistoryListResponse {
    records: Vec<RecordRow>,
}

#[derive(Debug, Serialize)]
struct RemovalResponse {
    removed: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// Handle `hidemeter history`.
pub fn handle(action: &HistoryCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        HistoryCommands::List => {
            let records = ctx.log.list().iter().map(RecordRow::from).collect();
            output(&HistoryListResponse { records }, flags.format)
        }
        HistoryCommands::Get { id } => {
            record_id::check(id)?;
            match ctx.log.get(id) {
                Some(record) => output(record, flags.format),
                None => anyhow::bail!("no measurement with id '{id}'"),
            }
        }
        HistoryCommands::Delete { id } => {
            record_id::check(id)?;
            let response = match ctx.log.delete(id) {
                Ok(_) => removal(1, None),
                Err(StoreError::NotFound(id)) => anyhow::bail!("no measurement with id '{id}'"),
                Err(error) => removal(1, Some(error)),
            };
            output(&response, flags.format)
        }
        HistoryCommands::Clear => {
            let count = ctx.log.list().len();
            let response = match ctx.log.clear() {
                Ok(count) => removal(count, None),
                Err(error) => removal(count, Some(error)),
            };
            output(&response, flags.format)
        }
    }
}

/// The in-memory change always happens; a storage failure becomes a warning.
fn removal(removed: usize, error: Option<StoreError>) -> RemovalResponse {
    RemovalResponse {
        removed,
        warnings: error.map(|e| warnings(&[e])).unwrap_or_default(),
    }
}
