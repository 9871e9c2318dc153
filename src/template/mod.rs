//! Reference icon templates and the library that holds them.
//!
//! A library is loaded once at startup and shared read-only by every
//! subsequent match call; templates are never mutated after construction.

use crate::image::{ImageView, OwnedImage};
use crate::util::{IconSeekError, IconSeekResult};

mod plan;

pub use plan::TemplatePlan;

#[cfg(feature = "image-io")]
use crate::trace::trace_warn;
#[cfg(feature = "image-io")]
use std::path::{Path, PathBuf};

/// Owned template image in contiguous grayscale format with a variant label.
///
/// Variants are alternative renderings of the same logical icon, e.g. light
/// and dark theme assets.
pub struct Template {
    img: OwnedImage,
    variant: String,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        variant: impl Into<String>,
    ) -> IconSeekResult<Self> {
        let img = OwnedImage::new(data, width, height)?;
        Ok(Self {
            img,
            variant: variant.into(),
        })
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns the variant label.
    pub fn variant(&self) -> &str {
        &self.variant
    }
}

/// A path that failed to load together with the decode error text.
#[cfg(feature = "image-io")]
#[derive(Debug, Clone)]
pub struct SkippedPath {
    /// The path that could not be read or decoded.
    pub path: PathBuf,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Immutable set of templates for one logical icon.
pub struct TemplateLibrary {
    templates: Vec<Template>,
    #[cfg(feature = "image-io")]
    skipped: Vec<SkippedPath>,
}

impl TemplateLibrary {
    /// Builds a library from already-decoded templates.
    ///
    /// Fails with [`IconSeekError::NoTemplates`] when the set is empty.
    pub fn from_templates(templates: Vec<Template>) -> IconSeekResult<Self> {
        if templates.is_empty() {
            return Err(IconSeekError::NoTemplates { checked: 0 });
        }
        Ok(Self {
            templates,
            #[cfg(feature = "image-io")]
            skipped: Vec::new(),
        })
    }

    /// Loads templates from an ordered list of image paths.
    ///
    /// Each path is decoded independently to grayscale. A read or decode
    /// failure is a soft fault: the path is logged, recorded in the skip
    /// list, and loading continues. Only an entirely empty result is fatal.
    #[cfg(feature = "image-io")]
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> IconSeekResult<Self> {
        let mut templates = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();

        for path in paths {
            let path = path.as_ref();
            match Self::load_one(path) {
                Ok(template) => templates.push(template),
                Err(err) => {
                    let reason = err.to_string();
                    let shown = path.display().to_string();
                    trace_warn!("template_skipped", path = shown.as_str(), reason = reason.as_str());
                    skipped.push(SkippedPath {
                        path: path.to_path_buf(),
                        reason,
                    });
                }
            }
        }

        if templates.is_empty() {
            return Err(IconSeekError::NoTemplates {
                checked: paths.len(),
            });
        }
        Ok(Self { templates, skipped })
    }

    #[cfg(feature = "image-io")]
    fn load_one(path: &Path) -> IconSeekResult<Template> {
        let img = crate::image::io::load_gray_image(path)?;
        let variant = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (width, height) = (img.width(), img.height());
        Template::new(img.data().to_vec(), width, height, variant)
    }

    /// Returns the templates in library order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Returns the number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true when the library holds no templates.
    ///
    /// Construction rejects empty sets, so this is always false for a
    /// successfully built library.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Returns the paths skipped during [`TemplateLibrary::load`].
    #[cfg(feature = "image-io")]
    pub fn skipped(&self) -> &[SkippedPath] {
        &self.skipped
    }
}
