use super::block::Block;
use crate::tables::{CodecTables, QUANT_BIAS};

/// Floyd-Steinberg style error diffused into texel `x` of the current row, scaled by 16.
///
/// `current` holds the errors already produced in this row, `previous` those of the row above.
#[inline(always)]
pub(crate) fn diffused_error(x: usize, current: &[i32; 4], previous: &[i32; 4]) -> i32 {
    match x {
        0 => 3 * previous[1] + 5 * previous[0],
        1 => 7 * current[0] + 3 * previous[2] + 5 * previous[1] + previous[0],
        2 => 7 * current[1] + 3 * previous[3] + 5 * previous[2] + previous[1],
        _ => 7 * current[2] + 5 * previous[3] + previous[2],
    }
}

/// Dithers the RGB channels of a block to the levels representable in RGB565.
///
/// Each channel is processed on its own in row-major order. The result only feeds endpoint
/// fitting; index matching always runs against the original texels. Alpha is copied unchanged.
pub(crate) fn dither_block(tables: &CodecTables, block: &Block) -> Block {
    let mut dest = *block;

    for ch in 0..3 {
        let quant = if ch == 1 {
            tables.quant_g()
        } else {
            tables.quant_rb()
        };

        let mut current = [0; 4];
        let mut previous = [0; 4];

        for y in 0..4 {
            for x in 0..4 {
                let value = block[y * 4 + x].rgb()[ch];
                let biased = value + (diffused_error(x, &current, &previous) >> 4);
                let index = (biased + QUANT_BIAS as i32).clamp(0, quant.len() as i32 - 1);
                let quantized = quant[index as usize];

                match ch {
                    0 => dest[y * 4 + x].r = quantized,
                    1 => dest[y * 4 + x].g = quantized,
                    _ => dest[y * 4 + x].b = quantized,
                }

                current[x] = value - quantized as i32;
            }

            std::mem::swap(&mut current, &mut previous);
        }
    }

    dest
}
