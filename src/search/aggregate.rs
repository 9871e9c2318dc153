//! Cross-template aggregation.
//!
//! Templates are alternative hypotheses for the same logical icon (theme
//! variants); the aggregator selects exactly one winner, it never blends
//! results. A per-template failure is a soft fault: logged, skipped, and the
//! remaining templates still run.

use crate::kernel::ScanParams;
use crate::search::scale::match_template;
use crate::search::{MatchCandidate, ScaleConfig};
use crate::template::TemplateLibrary;
use crate::trace::{trace_span, trace_warn};
use crate::ImageView;

#[cfg(feature = "rayon")]
use crate::search::scale::match_at_scale;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Runs the scale search for every template in library order and keeps the
/// single best candidate.
///
/// Comparisons use strict greater-than, so an exact score tie resolves to
/// the first template in library iteration order.
pub fn aggregate(
    frame: ImageView<'_, u8>,
    library: &TemplateLibrary,
    cfg: &ScaleConfig,
    params: ScanParams,
) -> Option<MatchCandidate> {
    let _span = trace_span!("aggregate", templates = library.len()).entered();

    let mut best: Option<MatchCandidate> = None;
    for (idx, template) in library.templates().iter().enumerate() {
        match match_template(frame, template, idx, cfg, params) {
            Ok(Some(candidate)) => {
                if best.map_or(true, |b| candidate.score > b.score) {
                    best = Some(candidate);
                }
            }
            Ok(None) => {}
            Err(err) => {
                let reason = err.to_string();
                trace_warn!(
                    "template_match_failed",
                    template_idx = idx,
                    reason = reason.as_str()
                );
            }
        }
    }
    best
}

/// Parallel aggregation over (template, scale) pairs.
///
/// The map runs on the rayon pool; the reduce walks pair results in
/// enumeration order (template-major, then ascending scale), so the winner
/// is identical to the serial [`aggregate`] regardless of completion order.
#[cfg(feature = "rayon")]
pub fn aggregate_par(
    frame: ImageView<'_, u8>,
    library: &TemplateLibrary,
    cfg: &ScaleConfig,
    params: ScanParams,
) -> Option<MatchCandidate> {
    let _span = trace_span!("aggregate", templates = library.len(), parallel = true).entered();

    let templates = library.templates();
    let pairs: Vec<(usize, usize)> = (0..templates.len())
        .flat_map(|t| (0..cfg.samples).map(move |s| (t, s)))
        .collect();

    let results: Vec<Option<MatchCandidate>> = pairs
        .par_iter()
        .map(|&(template_idx, scale_idx)| {
            let scale = cfg.scale_at(scale_idx);
            match match_at_scale(frame, &templates[template_idx], template_idx, scale, params) {
                Ok(candidate) => candidate,
                Err(err) => {
                    let reason = err.to_string();
                    trace_warn!(
                        "template_match_failed",
                        template_idx = template_idx,
                        reason = reason.as_str()
                    );
                    None
                }
            }
        })
        .collect();

    let mut best: Option<MatchCandidate> = None;
    for candidate in results.into_iter().flatten() {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}
