use serde::Serialize;

use crate::Vec2;

/// Axis-aligned box in normalized image coordinates, stored as corners.
///
/// Serializes as `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f32; 4]")]
pub struct BoundingBox {
    pub min: Vec2<f32>,
    pub max: Vec2<f32>,
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
pub fn clip_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min: Vec2::new(x1, y1),
            max: Vec2::new(x2, y2),
        }
    }

    /// Box from a centre point and a size, as emitted by YOLO-style heads.
    /// A negative size is taken by magnitude, so corners stay ordered.
    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        let (hw, hh) = (w.abs() / 2.0, h.abs() / 2.0);
        Self::new(cx - hw, cy - hh, cx + hw, cy + hh)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Horizontal flip in normalized space: `x1' = 1 - x2`, `x2' = 1 - x1`.
    pub fn mirrored(self) -> Self {
        Self::new(1.0 - self.max.x, self.min.y, 1.0 - self.min.x, self.max.y)
    }

    /// Grow every side by `padding`.
    pub fn expanded(self, padding: f32) -> Self {
        Self::new(
            self.min.x - padding,
            self.min.y - padding,
            self.max.x + padding,
            self.max.y + padding,
        )
    }

    /// Clip every coordinate into `[0, 1]`.
    pub fn clipped(self) -> Self {
        let (x1, x2) = (clip_unit(self.min.x), clip_unit(self.max.x));
        let (y1, y2) = (clip_unit(self.min.y), clip_unit(self.max.y));
        Self::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    }

    /// Smallest box containing all `points`, or `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Vec2<f32>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array()
    }
}
