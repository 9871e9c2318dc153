//! Rayon-parallel scan kernel (feature-gated).
//!
//! Row-parallel variant of the scalar ZNCC scan. Each worker computes the
//! best placement within its rows; the per-row results are then reduced in
//! row order so the final winner matches the serial scan exactly, including
//! tie-breaks.

use crate::kernel::{Peak, ScanParams};
use crate::template::TemplatePlan;
use crate::util::{IconSeekError, IconSeekResult};
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel full scan for the ZNCC kernel.
pub fn zncc_scan_full_par(
    image: ImageView<'_, u8>,
    tpl: &TemplatePlan,
    params: ScanParams,
) -> IconSeekResult<Option<Peak>> {
    let img_width = image.width();
    let img_height = image.height();
    let tpl_width = tpl.width();
    let tpl_height = tpl.height();

    if img_width < tpl_width || img_height < tpl_height {
        return Err(IconSeekError::TemplateTooLarge {
            tpl_width,
            tpl_height,
            img_width,
            img_height,
        });
    }

    let var_t = tpl.var_t();
    if var_t <= 1e-8 {
        return Ok(None);
    }
    let t_prime = tpl.t_prime();
    let n = (tpl_width * tpl_height) as f32;

    let max_x = img_width - tpl_width;
    let max_y = img_height - tpl_height;

    let row_best: Vec<Option<Peak>> = (0..=max_y)
        .into_par_iter()
        .map(|y| {
            let mut best: Option<Peak> = None;
            for x in 0..=max_x {
                let mut dot = 0.0f32;
                let mut sum_i = 0.0f32;
                let mut sum_i2 = 0.0f32;

                for ty in 0..tpl_height {
                    let img_row = image.row(y + ty).expect("row within bounds");
                    let base = ty * tpl_width;
                    for tx in 0..tpl_width {
                        let value = img_row[x + tx] as f32;
                        dot += t_prime[base + tx] * value;
                        sum_i += value;
                        sum_i2 += value * value;
                    }
                }

                let var_i = sum_i2 - (sum_i * sum_i) / n;
                if var_i <= params.min_var_i {
                    continue;
                }

                let denom = (var_t * var_i).sqrt();
                let score = dot / denom;
                if !score.is_finite() {
                    continue;
                }
                if best.map_or(true, |b| score > b.score) {
                    best = Some(Peak { x, y, score });
                }
            }
            best
        })
        .collect();

    // Serial reduce in row order keeps tie-breaks deterministic.
    let mut best: Option<Peak> = None;
    for peak in row_best.into_iter().flatten() {
        if best.map_or(true, |b| peak.score > b.score) {
            best = Some(peak);
        }
    }
    Ok(best)
}
