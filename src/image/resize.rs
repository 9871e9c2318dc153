//! Bilinear resampling of grayscale templates.

use crate::image::{ImageView, OwnedImage};
use crate::util::{IconSeekError, IconSeekResult};

/// Resizes a grayscale image to `dst_width` x `dst_height` using bilinear
/// sampling.
///
/// Each destination pixel center is mapped back to source coordinates with
/// the half-pixel convention `src = (dst + 0.5) * ratio - 0.5`, then sampled
/// from the four surrounding source pixels. Indices are clamped to the valid
/// image range and the result is rounded to the nearest integer before
/// clamping to `[0, 255]`.
pub fn resize_u8_bilinear(
    src: ImageView<'_, u8>,
    dst_width: usize,
    dst_height: usize,
) -> IconSeekResult<OwnedImage> {
    if dst_width == 0 || dst_height == 0 {
        return Err(IconSeekError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        });
    }

    let src_width = src.width();
    let src_height = src.height();
    let len = dst_width
        .checked_mul(dst_height)
        .ok_or(IconSeekError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        })?;
    let mut out = vec![0u8; len];

    let ratio_x = src_width as f32 / dst_width as f32;
    let ratio_y = src_height as f32 / dst_height as f32;
    let max_x = src_width as f32 - 1.0;
    let max_y = src_height as f32 - 1.0;

    for y in 0..dst_height {
        let src_y = ((y as f32 + 0.5) * ratio_y - 0.5).clamp(0.0, max_y);
        let y0 = src_y.floor() as usize;
        let y1 = (y0 + 1).min(src_height - 1);
        let fy = src_y - y0 as f32;

        let row0 = src.row(y0).expect("row in bounds");
        let row1 = src.row(y1).expect("row in bounds");

        for x in 0..dst_width {
            let src_x = ((x as f32 + 0.5) * ratio_x - 0.5).clamp(0.0, max_x);
            let x0 = src_x.floor() as usize;
            let x1 = (x0 + 1).min(src_width - 1);
            let fx = src_x - x0 as f32;

            let a = row0[x0] as f32;
            let b = row0[x1] as f32;
            let c = row1[x0] as f32;
            let d = row1[x1] as f32;

            let w00 = (1.0 - fx) * (1.0 - fy);
            let w10 = fx * (1.0 - fy);
            let w01 = (1.0 - fx) * fy;
            let w11 = fx * fy;
            let value = a * w00 + b * w10 + c * w01 + d * w11;

            out[y * dst_width + x] = value.round().clamp(0.0, 255.0) as u8;
        }
    }

    OwnedImage::new(out, dst_width, dst_height)
}
