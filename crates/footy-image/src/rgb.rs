use footy_base::Tensor;

use crate::ImageError;

/// Packed RGB image, HWC layout `[height, width, 3]`. Alpha is implicit and
/// always opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    tensor: Tensor<u8>,
}

/// Zero-filled byte buffer, reporting allocation failure instead of aborting.
pub(crate) fn try_alloc(len: usize) -> Result<Vec<u8>, ImageError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ImageError::Allocation(len))?;
    data.resize(len, 0);
    Ok(data)
}

/// Byte length of a `width x height` RGB buffer, rejecting empty or
/// overflowing sizes.
pub(crate) fn rgb_len(width: usize, height: usize) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or(ImageError::InvalidDimensions { width, height })
}

impl RgbImage {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Result<Self, ImageError> {
        let data = try_alloc(rgb_len(width, height)?)?;
        Self::from_raw(width, height, data)
    }

    /// Wrap interleaved RGB bytes.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        rgb_len(width, height)?;
        Ok(Self {
            tensor: Tensor::new(vec![height, width, 3], data)?,
        })
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[0]
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.tensor.data
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.tensor.data
    }

    pub fn into_tensor(self) -> Tensor<u8> {
        self.tensor
    }

    /// RGB triple at `(x, y)`. Panics when out of bounds, like slice indexing.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width() + x) * 3;
        let d = &self.tensor.data;
        [d[i], d[i + 1], d[i + 2]]
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width() + x) * 3;
        self.tensor.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Pixels as `0xAARRGGBB` with alpha fixed at `0xFF`.
    pub fn to_argb_u32(&self) -> Vec<u32> {
        self.tensor
            .data
            .chunks_exact(3)
            .map(|c| 0xFF00_0000 | (c[0] as u32) << 16 | (c[1] as u32) << 8 | c[2] as u32)
            .collect()
    }
}
