/// One camera frame as delivered by the sensor: a mandatory luma plane and
/// optional half-resolution chroma planes.
///
/// Strides default to a tightly packed layout: luma and chroma rows are
/// `width` bytes apart and chroma samples are adjacent.
#[derive(Debug, Clone, Copy)]
pub struct FramePlanes<'a> {
    y: &'a [u8],
    u: Option<&'a [u8]>,
    v: Option<&'a [u8]>,
    width: usize,
    height: usize,
    y_row_stride: usize,
    uv_row_stride: usize,
    uv_pixel_stride: usize,
}

impl<'a> FramePlanes<'a> {
    /// Luma-only frame.
    pub fn new(y: &'a [u8], width: usize, height: usize) -> Self {
        Self {
            y,
            u: None,
            v: None,
            width,
            height,
            y_row_stride: width,
            uv_row_stride: width,
            uv_pixel_stride: 1,
        }
    }

    /// Attach both chroma planes.
    pub fn with_chroma(mut self, u: &'a [u8], v: &'a [u8]) -> Self {
        self.u = Some(u);
        self.v = Some(v);
        self
    }

    /// Attach chroma planes that may be missing; a frame with either plane
    /// absent is treated as luma-only.
    pub fn with_optional_chroma(mut self, u: Option<&'a [u8]>, v: Option<&'a [u8]>) -> Self {
        self.u = u;
        self.v = v;
        self
    }

    pub fn with_y_row_stride(mut self, stride: usize) -> Self {
        self.y_row_stride = stride;
        self
    }

    pub fn with_uv_row_stride(mut self, stride: usize) -> Self {
        self.uv_row_stride = stride;
        self
    }

    pub fn with_uv_pixel_stride(mut self, stride: usize) -> Self {
        self.uv_pixel_stride = stride;
        self
    }

    pub fn y(&self) -> &'a [u8] {
        self.y
    }

    /// Both chroma planes, or `None` when the frame is luma-only.
    pub fn chroma(&self) -> Option<(&'a [u8], &'a [u8])> {
        self.u.zip(self.v)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn y_row_stride(&self) -> usize {
        self.y_row_stride
    }

    pub fn uv_row_stride(&self) -> usize {
        self.uv_row_stride
    }

    pub fn uv_pixel_stride(&self) -> usize {
        self.uv_pixel_stride
    }
}
