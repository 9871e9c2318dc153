//! Correlation kernel implementations.

use crate::util::IconSeekResult;
use crate::ImageView;

/// Best-scoring placement found by a scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the top-left placement.
    pub x: usize,
    /// Y coordinate (row) of the top-left placement.
    pub y: usize,
    /// ZNCC score at the placement, roughly in `[-1, 1]`.
    pub score: f32,
}

/// Scan configuration for kernel evaluations.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// Minimum variance threshold for the image window; flat windows are
    /// skipped because ZNCC is undefined for them.
    pub min_var_i: f32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self { min_var_i: 1e-8 }
    }
}

/// Kernel trait for scoring and scan operations.
pub trait Kernel {
    type Plan;

    /// Computes the score at a single placement (top-left coordinates).
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        x: usize,
        y: usize,
        min_var_i: f32,
    ) -> f32;

    /// Scans the full valid placement range and returns the best peak.
    ///
    /// Exact score ties resolve to the first placement in row-major order
    /// (strict greater-than comparison).
    fn scan_full(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        params: ScanParams,
    ) -> IconSeekResult<Option<Peak>>;
}

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;
