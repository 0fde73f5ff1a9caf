use bytemuck::{Pod, Zeroable};

/// A single RGBA8 texel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with alpha forced to 255.
    pub const fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    #[inline(always)]
    pub(crate) const fn rgb(self) -> [i32; 3] {
        [self.r as i32, self.g as i32, self.b as i32]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(texel: Rgba8) -> Self {
        [texel.r, texel.g, texel.b, texel.a]
    }
}

/// 16 texels of a 4x4 tile in row-major order.
pub type Block = [Rgba8; 16];

/// Borrowed interleaved RGBA8 image with a row stride in bytes.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SourceImage<'a> {
    rgba_data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> SourceImage<'a> {
    /// The caller guarantees that `rgba_data` covers `height` rows of `stride` bytes, the last
    /// one holding at least `width` texels.
    pub(crate) fn new(rgba_data: &'a [u8], width: usize, height: usize, stride: usize) -> Self {
        Self {
            rgba_data,
            width,
            height,
            stride,
        }
    }

    #[inline(always)]
    fn texel(&self, x: usize, y: usize) -> Rgba8 {
        let offset = y * self.stride + x * 4;
        *bytemuck::from_bytes(&self.rgba_data[offset..offset + 4])
    }

    /// Gathers the tile at block coordinates `xx`, `yy`. Texels past the right or bottom edge
    /// repeat the last column or row of the image.
    pub(crate) fn load_block_interleaved_rgba(&self, xx: usize, yy: usize) -> Block {
        let mut block = [Rgba8::default(); 16];

        for y in 0..4 {
            let pixel_y = usize::min(yy * 4 + y, self.height - 1);

            for x in 0..4 {
                let pixel_x = usize::min(xx * 4 + x, self.width - 1);

                block[y * 4 + x] = self.texel(pixel_x, pixel_y);
            }
        }

        block
    }
}
