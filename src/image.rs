use crate::{Error, RGBA};

/// Square RGBA image stored as a flat row-major byte buffer
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer of `size x size` pixels.
    ///
    /// Panics if the byte length overflows, use [`PixelBuffer::try_new`] for
    /// untrusted sizes.
    pub fn new(size: usize) -> Self {
        let len = Self::byte_len(size).expect("pixel buffer size overflow");
        Self {
            size,
            data: vec![0; len],
        }
    }

    /// Fully transparent buffer, fails on empty or overflowing sizes
    pub fn try_new(size: usize) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::geometry("image size must be positive"));
        }
        let len = Self::byte_len(size)
            .ok_or_else(|| Error::geometry(format!("image size {} is too large", size)))?;
        Ok(Self {
            size,
            data: vec![0; len],
        })
    }

    fn byte_len(size: usize) -> Option<usize> {
        size.checked_mul(size)?.checked_mul(4)
    }

    /// Width and height of the image
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size
    }

    pub fn height(&self) -> usize {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Iterator over rows, each row is `size * 4` bytes
    pub fn rows(&self) -> std::slice::Chunks<'_, u8> {
        self.data.chunks(self.size * 4)
    }

    #[inline]
    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.size && y < self.size).then(|| (y * self.size + x) * 4)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<RGBA> {
        let offset = self.offset(x, y)?;
        let pixel: [u8; 4] = self.data[offset..offset + 4].try_into().ok()?;
        Some(pixel.into())
    }

    /// Composite `color` over the pixel at `(x, y)`, coordinates outside of
    /// the image are ignored.
    #[inline]
    pub fn blend(&mut self, x: i64, y: i64, color: RGBA) {
        let Some(offset) = self.offset(x, y) else {
            return;
        };
        let pixel = &mut self.data[offset..offset + 4];
        let background = RGBA::new(pixel[0], pixel[1], pixel[2], pixel[3]);
        pixel.copy_from_slice(&color.blend_over(background).to_rgba());
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
