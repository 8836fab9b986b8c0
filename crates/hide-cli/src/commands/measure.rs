use anyhow::Context;
use hide_config::HideConfig;
use hide_detect::{DetectionRequest, HttpDetector, RetryPolicy};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MeasureArgs;
use crate::commands::shared::photo;
use crate::commands::shared::view::MeasurementView;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `hidemeter measure`.
pub async fn handle(args: &MeasureArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let detector = detector(&ctx.config)?;
    let prepared = hide_detect::prepare_for_detection(&photo::read(&args.image)?)?;
    tracing::debug!(width = prepared.width, height = prepared.height, "payload ready");

    let learning = ctx.log.learning_reference();
    if learning.is_some() {
        tracing::debug!("sending learning reference with request");
    }
    let request = DetectionRequest::new(prepared.base64).with_learning(learning);
    let policy = RetryPolicy::from_config(&ctx.config.detector);

    let spinner = Progress::spinner("Measuring hide...");
    let result = hide_detect::measure(&detector, &request, &policy, ctx.settings.reference_sheet).await;
    let result = match result {
        Ok(result) => {
            spinner.finish_clear();
            result
        }
        Err(error) => {
            spinner.finish_err("detection failed");
            return Err(error.into());
        }
    };

    if !result.has_measurement() {
        tracing::warn!("no hide outline detected; try `hidemeter trace` to measure by hand");
    }

    if args.no_save {
        return output(&MeasurementView::unsaved(&result), flags.format);
    }

    let report = ctx.log.save(result, photo::name(&args.image), None)?;
    output(&MeasurementView::saved(&report), flags.format)
}

fn detector(config: &HideConfig) -> anyhow::Result<HttpDetector> {
    let detector = config
        .require_detector()
        .context("set HIDEMETER_DETECTOR__ENDPOINT and HIDEMETER_DETECTOR__API_KEY, or use `hidemeter trace`")?;
    Ok(HttpDetector::from_config(detector)?)
}
