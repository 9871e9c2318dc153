//! Template plan precomputation for ZNCC scoring.

use crate::image::ImageView;
use crate::util::{IconSeekError, IconSeekResult};

/// Precomputed statistics and zero-mean buffer for one template size.
///
/// The scan kernels consume `t_prime` (the zero-mean template) and `var_t`
/// (its sum of squares); precomputing them once per scale amortizes the cost
/// over every alignment in the frame.
pub struct TemplatePlan {
    width: usize,
    height: usize,
    var_t: f32,
    t_prime: Vec<f32>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    ///
    /// Fails with [`IconSeekError::DegenerateTemplate`] when the template has
    /// no intensity variation, since ZNCC is undefined for a flat patch.
    pub fn from_view(tpl: ImageView<'_, u8>) -> IconSeekResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(IconSeekError::InvalidDimensions { width, height })?;

        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).ok_or(IconSeekError::BufferTooSmall {
                needed: count,
                got: tpl.as_slice().len(),
            })?;
            for &value in row {
                let v = value as f64;
                sum += v;
                sum_sq += v * v;
            }
        }

        let count_f = count as f64;
        let mean = sum / count_f;
        let variance = sum_sq / count_f - mean * mean;
        if variance <= 1e-8 {
            return Err(IconSeekError::DegenerateTemplate {
                reason: "zero variance",
            });
        }

        let mean = mean as f32;
        let mut t_prime = Vec::with_capacity(count);
        let mut var_t = 0.0f32;
        for y in 0..height {
            let row = tpl.row(y).ok_or(IconSeekError::BufferTooSmall {
                needed: count,
                got: tpl.as_slice().len(),
            })?;
            for &value in row {
                let centered = value as f32 - mean;
                var_t += centered * centered;
                t_prime.push(centered);
            }
        }

        Ok(Self {
            width,
            height,
            var_t,
            t_prime,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the sum of squared zero-mean template values.
    pub fn var_t(&self) -> f32 {
        self.var_t
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub fn t_prime(&self) -> &[f32] {
        &self.t_prime
    }
}
