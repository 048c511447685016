use log::debug;

use crate::rgb::{rgb_len, try_alloc};
use crate::{FramePlanes, ImageError, RgbImage};

/// Largest pre-shift channel value that still maps into 0..=255.
const CHANNEL_MAX: i32 = (256 << 10) - 1;

fn clamp_channel(value: i32) -> u8 {
    if value < 0 {
        0
    } else if value > CHANNEL_MAX {
        255
    } else {
        (value >> 10) as u8
    }
}

/// BT.601 video-range YUV to RGB for a single pixel (fixed-point, shift 10).
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let y1192 = 1192 * (y as i32 - 16);
    [
        clamp_channel(y1192 + 1634 * v),
        clamp_channel(y1192 - 833 * v - 400 * u),
        clamp_channel(y1192 + 2066 * u),
    ]
}

/// Checks the frame size and that every luma row lies inside the Y plane.
fn validate_luma(planes: &FramePlanes) -> Result<usize, ImageError> {
    let (width, height) = (planes.width(), planes.height());
    let len = rgb_len(width, height)?;
    let stride = planes.y_row_stride();
    if stride < width {
        return Err(ImageError::InvalidStride(format!(
            "luma row stride {stride} is smaller than width {width}"
        )));
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(width))
        .ok_or(ImageError::InvalidDimensions { width, height })?;
    if planes.y().len() < needed {
        return Err(ImageError::PlaneTooShort {
            plane: "Y",
            needed,
            got: planes.y().len(),
        });
    }
    Ok(len)
}

/// Grayscale conversion: every output pixel is `(Y, Y, Y)`.
///
/// Used when the frame carries no chroma planes.
pub fn luma_to_rgb(planes: &FramePlanes) -> Result<RgbImage, ImageError> {
    let len = validate_luma(planes)?;
    let (width, height) = (planes.width(), planes.height());
    let mut rgb = try_alloc(len)?;

    let y_plane = planes.y();
    for row in 0..height {
        let src = &y_plane[row * planes.y_row_stride()..][..width];
        let dst = &mut rgb[row * width * 3..][..width * 3];
        for (px, &luma) in dst.chunks_exact_mut(3).zip(src) {
            px.fill(luma);
        }
    }

    RgbImage::from_raw(width, height, rgb)
}

/// Full-colour conversion from planar YUV 4:2:0 with arbitrary chroma strides.
///
/// Chroma for pixel `(x, y)` is read at `(y / 2) * uv_row_stride +
/// (x / 2) * uv_pixel_stride`. Indices past the end of a chroma plane are
/// clamped to its last byte, so truncated or padded planes never cause an
/// out-of-bounds read.
pub fn yuv_planes_to_rgb(
    planes: &FramePlanes,
    u_plane: &[u8],
    v_plane: &[u8],
) -> Result<RgbImage, ImageError> {
    let len = validate_luma(planes)?;
    if u_plane.is_empty() || v_plane.is_empty() {
        return Err(ImageError::PlaneTooShort {
            plane: if u_plane.is_empty() { "U" } else { "V" },
            needed: 1,
            got: 0,
        });
    }
    let (width, height) = (planes.width(), planes.height());
    let u_last = u_plane.len() - 1;
    let v_last = v_plane.len() - 1;
    let mut rgb = try_alloc(len)?;

    let y_plane = planes.y();
    for row in 0..height {
        let y_row = &y_plane[row * planes.y_row_stride()..][..width];
        let uv_row_offset = (row >> 1).saturating_mul(planes.uv_row_stride());
        let dst = &mut rgb[row * width * 3..][..width * 3];
        for (col, (px, &luma)) in dst.chunks_exact_mut(3).zip(y_row).enumerate() {
            let uv_index =
                uv_row_offset.saturating_add((col >> 1).saturating_mul(planes.uv_pixel_stride()));
            let u = u_plane[uv_index.min(u_last)];
            let v = v_plane[uv_index.min(v_last)];
            px.copy_from_slice(&yuv_to_rgb(luma, u, v));
        }
    }

    RgbImage::from_raw(width, height, rgb)
}

/// Converts a sensor frame to RGB, choosing the grayscale path when either
/// chroma plane is missing.
pub fn planes_to_rgb(planes: &FramePlanes) -> Result<RgbImage, ImageError> {
    match planes.chroma() {
        Some((u, v)) => yuv_planes_to_rgb(planes, u, v),
        None => {
            debug!(
                "no chroma planes for {}x{} frame, converting as grayscale",
                planes.width(),
                planes.height()
            );
            luma_to_rgb(planes)
        }
    }
}
