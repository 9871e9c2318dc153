//! Scalar reference kernel for ZNCC evaluation.

use crate::kernel::{Kernel, Peak, ScanParams};
use crate::template::TemplatePlan;
use crate::util::{IconSeekError, IconSeekResult};
use crate::ImageView;

/// Scalar ZNCC kernel for translation-only matching.
pub struct ZnccScalar;

impl Kernel for ZnccScalar {
    type Plan = TemplatePlan;

    fn score_at(
        image: ImageView<'_, u8>,
        tpl: &Self::Plan,
        x: usize,
        y: usize,
        min_var_i: f32,
    ) -> f32 {
        let img_width = image.width();
        let img_height = image.height();
        let tpl_width = tpl.width();
        let tpl_height = tpl.height();

        if img_width < tpl_width || img_height < tpl_height {
            return f32::NEG_INFINITY;
        }
        if x > img_width - tpl_width || y > img_height - tpl_height {
            return f32::NEG_INFINITY;
        }

        let var_t = tpl.var_t();
        if var_t <= 1e-8 {
            return f32::NEG_INFINITY;
        }
        let t_prime = tpl.t_prime();
        let n = (tpl_width * tpl_height) as f32;

        let mut dot = 0.0f32;
        let mut sum_i = 0.0f32;
        let mut sum_i2 = 0.0f32;

        for ty in 0..tpl_height {
            let img_row = image.row(y + ty).expect("row within bounds for score");
            let base = ty * tpl_width;
            for tx in 0..tpl_width {
                let value = img_row[x + tx] as f32;
                dot += t_prime[base + tx] * value;
                sum_i += value;
                sum_i2 += value * value;
            }
        }

        let var_i = sum_i2 - (sum_i * sum_i) / n;
        if var_i <= min_var_i {
            return f32::NEG_INFINITY;
        }

        let denom = (var_t * var_i).sqrt();
        let score = dot / denom;
        if score.is_finite() {
            score
        } else {
            f32::NEG_INFINITY
        }
    }

    fn scan_full(
        image: ImageView<'_, u8>,
        tpl: &Self::Plan,
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

        let mut best: Option<Peak> = None;
        for y in 0..=max_y {
            for x in 0..=max_x {
                let mut dot = 0.0f32;
                let mut sum_i = 0.0f32;
                let mut sum_i2 = 0.0f32;

                for ty in 0..tpl_height {
                    let img_row = image.row(y + ty).expect("row within bounds for scan");
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
                // Strict comparison: the first placement in row-major order
                // wins exact ties.
                if best.map_or(true, |b| score > b.score) {
                    best = Some(Peak { x, y, score });
                }
            }
        }

        Ok(best)
    }
}
