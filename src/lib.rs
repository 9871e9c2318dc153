//! IconSeek locates a known visual icon inside a captured screen image.
//!
//! This crate provides a multi-template, multi-scale ZNCC matching engine
//! plus a retry-driven locate loop that converts the winning match into a
//! clickable center point. Screen capture is abstracted behind the
//! [`FrameSource`] trait; optional parallelism is available via the `rayon`
//! feature.

pub mod image;
pub mod kernel;
pub mod locate;
pub mod search;
pub mod template;
pub mod util;

pub(crate) mod trace;

pub use image::{ImageView, OwnedImage};
pub use kernel::{Kernel, Peak, ScanParams};
pub use locate::{FrameSource, LocateConfig, Locator, Point};
pub use search::{aggregate, match_template, MatchCandidate, ScaleConfig};
pub use template::{Template, TemplateLibrary, TemplatePlan};
pub use util::{IconSeekError, IconSeekResult};

#[cfg(feature = "rayon")]
pub use search::aggregate_par;
