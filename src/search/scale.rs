//! Multi-scale matching of one template against one frame.

use crate::image::resize::resize_u8_bilinear;
use crate::kernel::ScanParams;
use crate::search::MatchCandidate;
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{IconSeekError, IconSeekResult};
use crate::ImageView;

#[cfg(feature = "rayon")]
use crate::kernel::rayon::zncc_scan_full_par;
#[cfg(not(feature = "rayon"))]
use crate::kernel::{scalar::ZnccScalar, Kernel};

/// Scale sampling range for template resizing.
///
/// Scales are drawn as `samples` evenly spaced values from `min_scale` to
/// `max_scale` inclusive, enumerated in ascending order.
#[derive(Clone, Copy, Debug)]
pub struct ScaleConfig {
    /// Smallest scale factor to try.
    pub min_scale: f32,
    /// Largest scale factor to try.
    pub max_scale: f32,
    /// Number of evenly spaced samples in `[min_scale, max_scale]`.
    pub samples: usize,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.8,
            max_scale: 1.2,
            samples: 10,
        }
    }
}

impl ScaleConfig {
    /// Validates the sampling range.
    pub fn validate(&self) -> IconSeekResult<()> {
        if self.samples == 0 {
            return Err(IconSeekError::InvalidConfig("samples must be at least 1"));
        }
        if !(self.min_scale.is_finite() && self.max_scale.is_finite()) {
            return Err(IconSeekError::InvalidConfig("scale bounds must be finite"));
        }
        if self.min_scale <= 0.0 {
            return Err(IconSeekError::InvalidConfig("min_scale must be positive"));
        }
        if self.min_scale > self.max_scale {
            return Err(IconSeekError::InvalidConfig(
                "min_scale must not exceed max_scale",
            ));
        }
        Ok(())
    }

    /// Returns the scale factor at sample index `idx`, ascending.
    pub(crate) fn scale_at(&self, idx: usize) -> f32 {
        if self.samples <= 1 {
            return self.min_scale;
        }
        let t = idx as f32 / (self.samples - 1) as f32;
        self.min_scale + (self.max_scale - self.min_scale) * t
    }
}

/// Finds the best placement of `template` in `frame` across the scale range.
///
/// For each scale in ascending order the template is resized (the template,
/// not the frame, since templates are small) and scanned over every valid
/// alignment. A scale whose rounded dimensions exceed the frame is skipped
/// entirely. The best candidate across scales is kept by strict
/// greater-than, so an exact tie resolves to the smaller scale. Returns
/// `Ok(None)` when every scale was skipped or degenerate.
pub fn match_template(
    frame: ImageView<'_, u8>,
    template: &Template,
    template_idx: usize,
    cfg: &ScaleConfig,
    params: ScanParams,
) -> IconSeekResult<Option<MatchCandidate>> {
    let _span = trace_span!(
        "scale_search",
        template_idx = template_idx,
        samples = cfg.samples
    )
    .entered();

    let mut best: Option<MatchCandidate> = None;
    for idx in 0..cfg.samples {
        let scale = cfg.scale_at(idx);
        match match_at_scale(frame, template, template_idx, scale, params) {
            Ok(Some(candidate)) => {
                if best.map_or(true, |b| candidate.score > b.score) {
                    best = Some(candidate);
                }
            }
            Ok(None) => {}
            // A failing scale forfeits only itself; candidates from earlier
            // scales stand, same as in the parallel aggregation.
            Err(err) => {
                let reason = err.to_string();
                trace_warn!(
                    "scale_match_failed",
                    template_idx = template_idx,
                    reason = reason.as_str()
                );
            }
        }
    }

    trace_event!(
        "scale_search_done",
        template_idx = template_idx,
        found = best.is_some()
    );
    Ok(best)
}

/// Evaluates one (template, scale) pair against the frame.
///
/// Returns `Ok(None)` when the scaled template does not fit the frame or has
/// no intensity variation at this size. With the `rayon` feature the scan
/// runs row-parallel; its ordered reduce makes it bit-identical to the
/// scalar kernel.
pub(crate) fn match_at_scale(
    frame: ImageView<'_, u8>,
    template: &Template,
    template_idx: usize,
    scale: f32,
    params: ScanParams,
) -> IconSeekResult<Option<MatchCandidate>> {
    let scaled_width = (template.width() as f32 * scale).round() as usize;
    let scaled_height = (template.height() as f32 * scale).round() as usize;
    if scaled_width == 0 || scaled_height == 0 {
        return Ok(None);
    }
    if scaled_width > frame.width() || scaled_height > frame.height() {
        return Ok(None);
    }

    let resized = resize_u8_bilinear(template.view(), scaled_width, scaled_height)?;
    let plan = match TemplatePlan::from_view(resized.view()) {
        Ok(plan) => plan,
        // A flat resized template cannot be correlated; not a candidate.
        Err(IconSeekError::DegenerateTemplate { .. }) => return Ok(None),
        Err(err) => return Err(err),
    };

    #[cfg(not(feature = "rayon"))]
    let peak = ZnccScalar::scan_full(frame, &plan, params)?;
    #[cfg(feature = "rayon")]
    let peak = zncc_scan_full_par(frame, &plan, params)?;
    Ok(peak.map(|peak| MatchCandidate {
        score: peak.score,
        x: peak.x,
        y: peak.y,
        scale,
        scaled_width,
        scaled_height,
        template_idx,
    }))
}
