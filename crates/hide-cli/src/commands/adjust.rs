use anyhow::{Context, bail};
use hide_core::Point;
use hide_editor::normalize::to_screen;
use hide_editor::{EditorSession, InputOutcome, Surface};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AdjustArgs;
use crate::commands::shared::photo;
use crate::commands::shared::points::parse_move;
use crate::commands::shared::record_id;
use crate::commands::shared::view::MeasurementView;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hidemeter adjust`.
pub fn handle(args: &AdjustArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    record_id::check(&args.id)?;
    let record = ctx
        .log
        .get(&args.id)
        .cloned()
        .with_context(|| format!("no measurement with id '{}'", args.id))?;

    let mut session = EditorSession::adjust(record.result, ctx.settings.clone());
    for raw in &args.moves {
        let (index, point) = parse_move(raw)?;
        move_vertex(&mut session, index, point)
            .with_context(|| format!("cannot apply move '{raw}'"))?;
    }
    let result = session.save()?;

    let thumbnail = args.image.as_deref().and_then(photo::thumbnail);
    let report = ctx.log.save(result, record.image_name, thumbnail.as_deref())?;
    output(&MeasurementView::saved(&report), flags.format)
}

/// Drag one target vertex to a grid position.
fn move_vertex(session: &mut EditorSession, index: usize, to: Point) -> anyhow::Result<()> {
    let surface = Surface::new(0.0, 0.0, 1000.0, 1000.0)?;
    if let InputOutcome::Ignored(reason) = session.begin_drag(index) {
        bail!("vertex {index}: {reason}");
    }
    let screen = to_screen(to, &surface, session.view());
    let moved = session.pointer_move(screen, &surface);
    session.pointer_up();
    if let InputOutcome::Ignored(reason) = moved {
        bail!("vertex {index}: {reason}");
    }
    Ok(())
}
