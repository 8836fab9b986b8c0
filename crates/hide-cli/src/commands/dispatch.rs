use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Measure(args) => commands::measure::handle(&args, ctx, flags).await,
        Commands::Trace(args) => commands::trace::handle(&args, ctx, flags),
        Commands::Adjust(args) => commands::adjust::handle(&args, ctx, flags),
        Commands::History { action } => commands::history::handle(&action, ctx, flags),
        Commands::Learning { action } => commands::learning::handle(&action, ctx, flags),
    }
}
