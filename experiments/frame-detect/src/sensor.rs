use footy_image::FramePlanes;

/// Owned I420 frame, laid out the way a camera delivers it.
pub struct SensorFrame {
    pub y: Vec<u8>,
    pub u: Vec<u8>,
    pub v: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl SensorFrame {
    /// Encodes interleaved RGB as BT.601 limited-range I420. Chroma is taken
    /// from the top-left pixel of each 2x2 block.
    pub fn from_rgb(rgb: &[u8], width: usize, height: usize) -> Self {
        let (cw, ch) = (width.div_ceil(2), height.div_ceil(2));
        let mut y = Vec::with_capacity(width * height);
        let mut u = Vec::with_capacity(cw * ch);
        let mut v = Vec::with_capacity(cw * ch);

        let pixel = |x: usize, row: usize| {
            let i = (row * width + x) * 3;
            (rgb[i] as i32, rgb[i + 1] as i32, rgb[i + 2] as i32)
        };

        for row in 0..height {
            for x in 0..width {
                let (r, g, b) = pixel(x, row);
                y.push((((66 * r + 129 * g + 25 * b + 128) >> 8) + 16).clamp(0, 255) as u8);
            }
        }
        for row in (0..height).step_by(2) {
            for x in (0..width).step_by(2) {
                let (r, g, b) = pixel(x, row);
                u.push((((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128).clamp(0, 255) as u8);
                v.push((((112 * r - 94 * g - 18 * b + 128) >> 8) + 128).clamp(0, 255) as u8);
            }
        }

        Self {
            y,
            u,
            v,
            width,
            height,
        }
    }

    pub fn planes(&self) -> FramePlanes<'_> {
        FramePlanes::new(&self.y, self.width, self.height)
            .with_chroma(&self.u, &self.v)
            .with_uv_row_stride(self.width.div_ceil(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footy_image::planes_to_rgb;

    #[test]
    fn test_plane_sizes() {
        let frame = SensorFrame::from_rgb(&[0u8; 5 * 3 * 3], 5, 3);
        assert_eq!(frame.y.len(), 15);
        assert_eq!(frame.u.len(), 6);
        assert_eq!(frame.v.len(), 6);
    }

    #[test]
    fn test_round_trip_is_close() {
        let rgb = [200u8, 40, 40].repeat(16);
        let frame = SensorFrame::from_rgb(&rgb, 4, 4);
        let back = planes_to_rgb(&frame.planes()).unwrap();
        for (a, b) in back.as_raw().iter().zip(&rgb) {
            assert!((*a as i32 - *b as i32).abs() <= 4, "{a} vs {b}");
        }
    }
}
