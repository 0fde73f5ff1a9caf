#![allow(dead_code)]

pub mod metrics;

use dxt_encode::{CompressionVariant, Rgba8};
use image::RgbaImage;

/// Seven by five test card: a white corner, red top row, green bottom row, blue left column,
/// yellow right column and a brown fill, with alpha falling off towards the bottom right.
pub fn test_card() -> Vec<Rgba8> {
    const WIDTH: u32 = 7;
    const HEIGHT: u32 = 5;

    let mut pixels = Vec::new();
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let [r, g, b] = match (x, y) {
                (0, 0) => [255, 255, 255],
                (_, 0) => [255, 0, 0],
                (_, y) if y == HEIGHT - 1 => [0, 255, 0],
                (0, _) => [0, 0, 255],
                (x, _) if x == WIDTH - 1 => [255, 255, 0],
                _ => [128, 96, 64],
            };
            let a = 250 - x * 25 - y * 15;
            pixels.push(Rgba8::new(r, g, b, a as u8));
        }
    }
    pixels
}

/// Smooth color ramps with a soft alpha circle, typical content for a texture.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        let dx = fx - 0.5;
        let dy = fy - 0.5;
        let alpha = (1.0 - (dx * dx + dy * dy).sqrt() * 2.0).clamp(0.0, 1.0);

        image::Rgba([
            (fx * 255.0) as u8,
            (fy * 255.0) as u8,
            ((1.0 - fx) * (1.0 - fy) * 255.0) as u8,
            (alpha * 255.0) as u8,
        ])
    })
}

/// Pseudo random noise from a linear congruential generator.
pub fn noise_image(width: u32, height: u32, seed: u32) -> RgbaImage {
    let mut state = seed;
    RgbaImage::from_fn(width, height, |_, _| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        image::Rgba(state.to_le_bytes())
    })
}

pub fn pixels(image: &RgbaImage) -> &[Rgba8] {
    bytemuck::cast_slice(image.as_raw())
}

/// Decodes a block stream back into a tightly packed RGBA8 image of the given size.
pub fn decompress_blocks(
    variant: CompressionVariant,
    width: u32,
    height: u32,
    blocks: &[u8],
) -> Vec<Rgba8> {
    let block_width = width.div_ceil(4) as usize;
    let block_size = variant.block_byte_size() as usize;
    let width = width as usize;
    let height = height as usize;

    let mut output = vec![Rgba8::default(); width * height];

    for (index, block) in blocks.chunks_exact(block_size).enumerate() {
        let decoded = match variant {
            CompressionVariant::BC1 => decode_block_bc1(block),
            CompressionVariant::BC3 => decode_block_bc3(block),
        };

        let bx = (index % block_width) * 4;
        let by = (index / block_width) * 4;

        for y in 0..4 {
            for x in 0..4 {
                if bx + x < width && by + y < height {
                    output[(by + y) * width + bx + x] = decoded[y * 4 + x];
                }
            }
        }
    }

    output
}

pub fn decode_block_bc1(compressed_block: &[u8]) -> [Rgba8; 16] {
    decode_color_block::<false>(&compressed_block[..8])
}

pub fn decode_block_bc3(compressed_block: &[u8]) -> [Rgba8; 16] {
    let mut block = decode_color_block::<true>(&compressed_block[8..16]);
    let alpha = decode_smooth_alpha_block(&compressed_block[..8]);

    for (texel, alpha) in block.iter_mut().zip(alpha) {
        texel.a = alpha;
    }

    block
}

fn decode_color_block<const OPAQUE_MODE: bool>(compressed_block: &[u8]) -> [Rgba8; 16] {
    let c0 = u16::from_le_bytes([compressed_block[0], compressed_block[1]]);
    let c1 = u16::from_le_bytes([compressed_block[2], compressed_block[3]]);

    let unpack = |c: u16| {
        let r = ((c >> 11) & 0x1F) as u32;
        let g = ((c >> 5) & 0x3F) as u32;
        let b = (c & 0x1F) as u32;
        [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
    };

    let color0 = unpack(c0);
    let color1 = unpack(c1);
    let texel = |[r, g, b]: [u32; 3]| Rgba8::new(r as u8, g as u8, b as u8, 255);

    let mut ref_colors = [Rgba8::default(); 4];
    ref_colors[0] = texel(color0);
    ref_colors[1] = texel(color1);

    if c0 > c1 || OPAQUE_MODE {
        ref_colors[2] = texel(std::array::from_fn(|ch| (2 * color0[ch] + color1[ch]) / 3));
        ref_colors[3] = texel(std::array::from_fn(|ch| (color0[ch] + 2 * color1[ch]) / 3));
    } else {
        ref_colors[2] = texel(std::array::from_fn(|ch| (color0[ch] + color1[ch]) / 2));
        ref_colors[3] = Rgba8::new(0, 0, 0, 0);
    }

    let color_indices = u32::from_le_bytes([
        compressed_block[4],
        compressed_block[5],
        compressed_block[6],
        compressed_block[7],
    ]);

    std::array::from_fn(|i| ref_colors[((color_indices >> (i * 2)) & 0x03) as usize])
}

#[rustfmt::skip]
fn decode_smooth_alpha_block(compressed_block: &[u8]) -> [u8; 16] {
    let mut bytes = [0; 8];
    bytes.copy_from_slice(&compressed_block[..8]);
    let block = u64::from_le_bytes(bytes);

    let mut alpha = [0u8; 8];
    alpha[0] = (block & 0xFF) as u8;
    alpha[1] = ((block >> 8) & 0xFF) as u8;

    if alpha[0] > alpha[1] {
        // 6 interpolated alpha values
        alpha[2] = ((6 * alpha[0] as u16 +     alpha[1] as u16) / 7) as u8;
        alpha[3] = ((5 * alpha[0] as u16 + 2 * alpha[1] as u16) / 7) as u8;
        alpha[4] = ((4 * alpha[0] as u16 + 3 * alpha[1] as u16) / 7) as u8;
        alpha[5] = ((3 * alpha[0] as u16 + 4 * alpha[1] as u16) / 7) as u8;
        alpha[6] = ((2 * alpha[0] as u16 + 5 * alpha[1] as u16) / 7) as u8;
        alpha[7] = ((    alpha[0] as u16 + 6 * alpha[1] as u16) / 7) as u8;
    } else {
        // 4 interpolated alpha values
        alpha[2] = ((4 * alpha[0] as u16 +     alpha[1] as u16) / 5) as u8;
        alpha[3] = ((3 * alpha[0] as u16 + 2 * alpha[1] as u16) / 5) as u8;
        alpha[4] = ((2 * alpha[0] as u16 + 3 * alpha[1] as u16) / 5) as u8;
        alpha[5] = ((    alpha[0] as u16 + 4 * alpha[1] as u16) / 5) as u8;
        alpha[6] = 0x00;
        alpha[7] = 0xFF;
    }

    let indices = block >> 16;

    std::array::from_fn(|i| alpha[((indices >> (i * 3)) & 0x07) as usize])
}
