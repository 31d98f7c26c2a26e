// SPDX-License-Identifier: MPL-2.0
//! Builds the magnified lens bitmap from the source image.

use crate::domain::lens::LensShape;
use image_rs::{Rgba, RgbaImage};
use iced::Rectangle;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Renders `rect` (source pixels, possibly extending past the image) into a
/// square bitmap of `size` pixels using nearest-neighbour sampling.
///
/// Lens pixels that map outside the image stay transparent, as do pixels
/// outside the inscribed circle when `shape` is [`LensShape::Circle`].
#[must_use]
pub fn sample_lens(image: &RgbaImage, rect: Rectangle, size: u32, shape: LensShape) -> RgbaImage {
    let mut lens = RgbaImage::from_pixel(size, size, TRANSPARENT);
    if size == 0 || image.width() == 0 || image.height() == 0 {
        return lens;
    }

    #[allow(clippy::cast_precision_loss)]
    let size_f = size as f32;
    let radius = size_f / 2.0;
    let step_x = rect.width / size_f;
    let step_y = rect.height / size_f;
    #[allow(clippy::cast_precision_loss)]
    let (image_w, image_h) = (image.width() as f32, image.height() as f32);

    for out_y in 0..size {
        #[allow(clippy::cast_precision_loss)]
        let center_y = out_y as f32 + 0.5;
        let source_y = rect.y + center_y * step_y;
        if source_y < 0.0 || source_y >= image_h {
            continue;
        }

        for out_x in 0..size {
            #[allow(clippy::cast_precision_loss)]
            let center_x = out_x as f32 + 0.5;

            if shape == LensShape::Circle {
                let dx = center_x - radius;
                let dy = center_y - radius;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
            }

            let source_x = rect.x + center_x * step_x;
            if source_x < 0.0 || source_x >= image_w {
                continue;
            }

            // Bounds checked above, so the floor fits in u32.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let pixel = *image.get_pixel(source_x as u32, source_y as u32);
            lens.put_pixel(out_x, out_y, pixel);
        }
    }

    lens
}
