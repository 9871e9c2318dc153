//! Error types for iconseek.

use thiserror::Error;

/// Result alias for iconseek operations.
pub type IconSeekResult<T> = std::result::Result<T, IconSeekError>;

/// Errors that can occur when building or running the locator.
#[derive(Debug, Error, PartialEq)]
pub enum IconSeekError {
    /// Image dimensions are zero or overflow address arithmetic.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the image width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is too small for the declared dimensions.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Template does not fit inside the frame at its current size.
    #[error("template {tpl_width}x{tpl_height} exceeds frame {img_width}x{img_height}")]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Template has no intensity variation so ZNCC is undefined.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// No template could be loaded; matching cannot proceed.
    #[error("no usable templates among {checked} path(s)")]
    NoTemplates { checked: usize },
    /// A configuration value is out of its valid range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// The frame source failed to produce a frame.
    #[error("capture failed: {reason}")]
    Capture { reason: String },
    /// Failed to read or decode an image file.
    #[cfg(feature = "image-io")]
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
}
