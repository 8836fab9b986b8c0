use anyhow::bail;
use hide_core::{MeasurementResult, Point};
use hide_editor::EditorSession;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TraceArgs;
use crate::commands::shared::points::parse_points;
use crate::commands::shared::photo;
use crate::commands::shared::view::MeasurementView;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hidemeter trace`.
pub fn handle(args: &TraceArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let reference = parse_points(&args.reference, "reference")?;
    let target = parse_points(&args.target, "target")?;

    let mut session = EditorSession::manual(MeasurementResult::blank_manual(), ctx.settings.clone());
    place_all(&mut session, &reference, "reference")?;
    place_all(&mut session, &target, "target")?;
    let result = session.save()?;

    if !args.save {
        return output(&MeasurementView::unsaved(&result), flags.format);
    }

    let thumbnail = args.image.as_deref().and_then(photo::thumbnail);
    let image_name = args.image.as_deref().and_then(photo::name);
    let report = ctx.log.save(result, image_name, thumbnail.as_deref())?;
    output(&MeasurementView::saved(&report), flags.format)
}

/// Place every point of one polygon, then move to the next step.
fn place_all(session: &mut EditorSession, points: &[Point], field: &str) -> anyhow::Result<()> {
    for (index, point) in points.iter().enumerate() {
        if let hide_editor::InputOutcome::Ignored(reason) = session.place_point(*point) {
            bail!("{field} point #{} rejected: {reason}", index + 1);
        }
    }
    if let hide_editor::InputOutcome::Ignored(reason) = session.advance() {
        bail!(
            "cannot finish {field} with {} points: {reason}",
            points.len()
        );
    }
    Ok(())
}
