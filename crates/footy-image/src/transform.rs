use footy_base::{Mat3, Vec2};
use log::{debug, warn};

use crate::rgb::{rgb_len, try_alloc};
use crate::{ImageError, RgbImage};

/// Clockwise device rotation that has to be undone before inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Accepts any multiple of 90, including negative angles and full turns.
    pub fn from_degrees(degrees: i32) -> Result<Self, ImageError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(ImageError::InvalidRotation(degrees)),
        }
    }

    pub fn degrees(self) -> i32 {
        self.quarter_turns() as i32 * 90
    }

    pub fn quarter_turns(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Size of a `width x height` image after this rotation.
    pub fn rotated_size(self, width: usize, height: usize) -> (usize, usize) {
        match self {
            Rotation::Deg0 | Rotation::Deg180 => (width, height),
            Rotation::Deg90 | Rotation::Deg270 => (height, width),
        }
    }

    /// Rotation about the origin followed by the translation that moves the
    /// rotated `width x height` image back into the positive quadrant.
    fn matrix(self, width: f32, height: f32) -> Mat3 {
        let shift = match self {
            Rotation::Deg0 => Mat3::identity(),
            Rotation::Deg90 => Mat3::translation(height, 0.0),
            Rotation::Deg180 => Mat3::translation(width, height),
            Rotation::Deg270 => Mat3::translation(0.0, width),
        };
        shift * Mat3::rotation_quarter_turns(self.quarter_turns())
    }
}

/// Resampling filter used when mapping source pixels onto the target grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    Nearest,
    Bilinear,
}

/// Resamples `src` into a `target` sized image. `forward` maps source pixel
/// space into target pixel space; each target pixel centre is pulled back
/// through its inverse.
fn warp(
    src: &RgbImage,
    forward: Mat3,
    target: Vec2<usize>,
    filter: Filter,
) -> Result<RgbImage, ImageError> {
    let inverse = forward
        .inverse()
        .ok_or(ImageError::InvalidDimensions {
            width: src.width(),
            height: src.height(),
        })?;
    let mut out = try_alloc(rgb_len(target.x, target.y)?)?;

    for oy in 0..target.y {
        for ox in 0..target.x {
            let p = inverse.transform_point(Vec2::new(ox as f32 + 0.5, oy as f32 + 0.5));
            let rgb = match filter {
                Filter::Nearest => sample_nearest(src, p),
                Filter::Bilinear => sample_bilinear(src, p),
            };
            let i = (oy * target.x + ox) * 3;
            out[i..i + 3].copy_from_slice(&rgb);
        }
    }

    RgbImage::from_raw(target.x, target.y, out)
}

fn clamp_index(v: f32, len: usize) -> usize {
    if v <= 0.0 {
        0
    } else {
        (v as usize).min(len - 1)
    }
}

fn sample_nearest(src: &RgbImage, p: Vec2<f32>) -> [u8; 3] {
    src.pixel(
        clamp_index(p.x.floor(), src.width()),
        clamp_index(p.y.floor(), src.height()),
    )
}

fn sample_bilinear(src: &RgbImage, p: Vec2<f32>) -> [u8; 3] {
    // pixel centres sit at half-integer coordinates
    let fx = (p.x - 0.5).max(0.0);
    let fy = (p.y - 0.5).max(0.0);
    let x0 = clamp_index(fx.floor(), src.width());
    let y0 = clamp_index(fy.floor(), src.height());
    let x1 = (x0 + 1).min(src.width() - 1);
    let y1 = (y0 + 1).min(src.height() - 1);
    let tx = (fx - x0 as f32).clamp(0.0, 1.0);
    let ty = (fy - y0 as f32).clamp(0.0, 1.0);

    let (a, b, c, d) = (
        src.pixel(x0, y0),
        src.pixel(x1, y0),
        src.pixel(x0, y1),
        src.pixel(x1, y1),
    );
    let mut out = [0u8; 3];
    for ch in 0..3 {
        let top = a[ch] as f32 * (1.0 - tx) + b[ch] as f32 * tx;
        let bottom = c[ch] as f32 * (1.0 - tx) + d[ch] as f32 * tx;
        out[ch] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Rotates `src` clockwise by `rotation`, then stretches the rotated image to
/// exactly `target`. Both steps are folded into one matrix so the image is
/// resampled once.
pub fn rotate_then_scale(
    src: &RgbImage,
    rotation: Rotation,
    target: Vec2<usize>,
    filter: Filter,
) -> Result<RgbImage, ImageError> {
    let (w, h) = (src.width() as f32, src.height() as f32);
    let (rw, rh) = rotation.rotated_size(src.width(), src.height());
    let scale = Mat3::scale(target.x as f32 / rw as f32, target.y as f32 / rh as f32);
    warp(src, scale * rotation.matrix(w, h), target, filter)
}

/// Stretches `src` to exactly `target` without rotating it.
pub fn scale_only(
    src: &RgbImage,
    target: Vec2<usize>,
    filter: Filter,
) -> Result<RgbImage, ImageError> {
    let scale = Mat3::scale(
        target.x as f32 / src.width() as f32,
        target.y as f32 / src.height() as f32,
    );
    warp(src, scale, target, filter)
}

fn normalize_with(
    src: RgbImage,
    rotation: Rotation,
    target: Vec2<usize>,
    filter: Filter,
    rotate: impl FnOnce(&RgbImage, Rotation, Vec2<usize>, Filter) -> Result<RgbImage, ImageError>,
) -> Result<RgbImage, ImageError> {
    if rotation == Rotation::Deg0 {
        if src.width() == target.x && src.height() == target.y {
            return Ok(src);
        }
        return scale_only(&src, target, filter);
    }

    match rotate(&src, rotation, target, filter) {
        Ok(image) => Ok(image),
        Err(ImageError::Allocation(bytes)) => {
            warn!(
                "rotation by {} degrees failed to allocate {} bytes, scaling without rotation",
                rotation.degrees(),
                bytes
            );
            scale_only(&src, target, filter)
        }
        Err(e) => Err(e),
    }
}

/// Brings a converted frame into model orientation and resolution.
///
/// Frames that already match the target with no rotation are passed through
/// untouched. If the rotated buffer cannot be allocated the frame is scaled
/// without rotation instead; the frame is never rotated incorrectly.
pub fn normalize(
    src: RgbImage,
    rotation: Rotation,
    target: Vec2<usize>,
    filter: Filter,
) -> Result<RgbImage, ImageError> {
    debug!(
        "normalize {}x{} rot={} -> {}x{}",
        src.width(),
        src.height(),
        rotation.degrees(),
        target.x,
        target.y
    );
    normalize_with(src, rotation, target, filter, rotate_then_scale)
}
