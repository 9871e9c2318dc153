//! Retry-driven locate loop.
//!
//! The locator runs a capture → match → threshold cycle with a bounded
//! attempt budget: `Searching(attempt)` transitions to `Found` on the first
//! candidate clearing the threshold, or to `Exhausted` after the budget is
//! spent. Per-attempt faults (capture failure, match failure, nothing over
//! the threshold) are logged and swallowed; only the final outcome crosses
//! the component boundary, so a run of faults is indistinguishable from a
//! run of misses.

use crate::image::OwnedImage;
use crate::kernel::ScanParams;
use crate::search::{MatchCandidate, ScaleConfig};

#[cfg(not(feature = "rayon"))]
use crate::search::aggregate;
use crate::template::TemplateLibrary;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::IconSeekResult;
use std::time::Duration;

#[cfg(feature = "rayon")]
use crate::search::aggregate_par;

/// Produces a fresh single-channel raster of the current screen.
///
/// Implementations wrap whatever capture mechanism the host platform offers.
/// Any error is treated as a transient fault for that attempt and is never
/// surfaced distinctly to the locator's caller.
pub trait FrameSource {
    /// Captures a fresh, independent frame.
    fn capture(&mut self) -> IconSeekResult<OwnedImage>;
}

/// Clickable screen coordinate, the center of the matched icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    /// Column in frame pixels.
    pub x: usize,
    /// Row in frame pixels.
    pub y: usize,
}

/// Retry loop parameters.
#[derive(Clone, Copy, Debug)]
pub struct LocateConfig {
    /// Minimum score a candidate must strictly exceed to be accepted.
    pub threshold: f32,
    /// Number of capture/match attempts before giving up.
    pub max_attempts: usize,
    /// Pause after each unsuccessful attempt.
    pub retry_delay: Duration,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl LocateConfig {
    /// Validates the retry parameters.
    pub fn validate(&self) -> IconSeekResult<()> {
        use crate::util::IconSeekError;
        if self.max_attempts == 0 {
            return Err(IconSeekError::InvalidConfig(
                "max_attempts must be at least 1",
            ));
        }
        if !self.threshold.is_finite() {
            return Err(IconSeekError::InvalidConfig("threshold must be finite"));
        }
        Ok(())
    }
}

/// Locates a known icon in frames produced by a [`FrameSource`].
///
/// The template library is immutable after construction, so one locator may
/// serve concurrent `locate` calls without locking; frames are never shared
/// between attempts or calls.
pub struct Locator {
    library: TemplateLibrary,
    scales: ScaleConfig,
    cfg: LocateConfig,
    params: ScanParams,
}

impl Locator {
    /// Builds a locator, validating all configuration up front.
    ///
    /// The library itself already guarantees at least one template.
    pub fn new(
        library: TemplateLibrary,
        scales: ScaleConfig,
        cfg: LocateConfig,
    ) -> IconSeekResult<Self> {
        scales.validate()?;
        cfg.validate()?;
        Ok(Self {
            library,
            scales,
            cfg,
            params: ScanParams::default(),
        })
    }

    /// Returns the template library backing this locator.
    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    /// Runs the retry loop until a candidate clears the threshold or the
    /// attempt budget is exhausted.
    ///
    /// Blocks the caller for up to
    /// `max_attempts x (match cost + retry_delay)`. Returns the icon center
    /// on success and `None` when exhausted; a below-threshold score is
    /// discarded wholesale and never exposed.
    pub fn locate<S: FrameSource>(&self, source: &mut S) -> Option<Point> {
        let _span = trace_span!("locate", max_attempts = self.cfg.max_attempts).entered();

        for attempt in 1..=self.cfg.max_attempts {
            match self.run_attempt(source) {
                Ok(Some(point)) => {
                    trace_event!("icon_found", attempt = attempt, x = point.x, y = point.y);
                    return Some(point);
                }
                Ok(None) => {
                    trace_warn!("icon_not_found", attempt = attempt);
                }
                Err(err) => {
                    let reason = err.to_string();
                    trace_warn!("attempt_failed", attempt = attempt, reason = reason.as_str());
                }
            }
            std::thread::sleep(self.cfg.retry_delay);
        }

        None
    }

    fn run_attempt<S: FrameSource>(&self, source: &mut S) -> IconSeekResult<Option<Point>> {
        let frame = source.capture()?;
        let best = self.run_aggregate(&frame);

        match best {
            Some(candidate) if candidate.score > self.cfg.threshold => {
                Ok(Some(self.center_of(candidate)))
            }
            _ => Ok(None),
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn run_aggregate(&self, frame: &OwnedImage) -> Option<MatchCandidate> {
        aggregate(frame.view(), &self.library, &self.scales, self.params)
    }

    #[cfg(feature = "rayon")]
    fn run_aggregate(&self, frame: &OwnedImage) -> Option<MatchCandidate> {
        aggregate_par(frame.view(), &self.library, &self.scales, self.params)
    }

    /// Converts a winning candidate into its center coordinate using the
    /// winning scale and the template's native dimensions.
    fn center_of(&self, candidate: MatchCandidate) -> Point {
        let template = &self.library.templates()[candidate.template_idx];
        let half_w = template.width() as f32 * candidate.scale / 2.0;
        let half_h = template.height() as f32 * candidate.scale / 2.0;
        Point {
            x: (candidate.x as f32 + half_w).round() as usize,
            y: (candidate.y as f32 + half_h).round() as usize,
        }
    }
}
