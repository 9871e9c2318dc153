//! Multi-scale search and cross-template aggregation.
//!
//! `match_template` finds the best scale and placement for one template in a
//! frame; `aggregate` runs it across a whole library and keeps the single
//! best candidate. Both use strict greater-than comparisons throughout, so
//! exact score ties always resolve to the earlier-enumerated item.

mod aggregate;
mod scale;

pub use aggregate::aggregate;
#[cfg(feature = "rayon")]
pub use aggregate::aggregate_par;
pub use scale::{match_template, ScaleConfig};

/// Best match for one template (or one library) in one frame.
///
/// A candidate exists only for scales where the resized template fits the
/// frame; oversized scales are skipped, they never produce a penalized
/// score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchCandidate {
    /// ZNCC score of the winning placement, roughly in `[-1, 1]`.
    pub score: f32,
    /// X coordinate (column) of the top-left placement.
    pub x: usize,
    /// Y coordinate (row) of the top-left placement.
    pub y: usize,
    /// Scale factor applied to the template for this candidate.
    pub scale: f32,
    /// Template width after scaling, rounded to the nearest pixel.
    pub scaled_width: usize,
    /// Template height after scaling, rounded to the nearest pixel.
    pub scaled_height: usize,
    /// Index of the matched template in library order.
    pub template_idx: usize,
}
