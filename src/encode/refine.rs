use super::{block::Block, endpoints::Endpoints};
use crate::tables::{quantize5, quantize6, CodecTables};

/// Weight of `max16` for each 2 bit index.
const W1_TAB: [i32; 4] = [3, 0, 2, 1];

/// Products `w1*w1`, `w2*w2` and `w1*w2` per index, packed as `xx << 16 | yy << 8 | xy` so a
/// single sum accumulates all three terms of the normal equations.
const PRODS: [i32; 4] = [0x090000, 0x000900, 0x040102, 0x010402];

/// Returns `true` if all 16 indices of the mask are equal.
#[inline(always)]
fn is_single_index(mask: u32) -> bool {
    (mask ^ (mask << 2)) < 4
}

/// Refits both endpoints to the current index assignment with a least squares solve and
/// returns whether they changed.
///
/// If all texels share one index the system is singular; the endpoints are then taken from the
/// optimal single color match of the block average.
pub(crate) fn refine_block(
    tables: &CodecTables,
    block: &Block,
    endpoints: &mut Endpoints,
    mask: u32,
) -> bool {
    let old = *endpoints;

    if is_single_index(mask) {
        let mut sum = [8; 3];
        for texel in block {
            let rgb = texel.rgb();
            for ch in 0..3 {
                sum[ch] += rgb[ch];
            }
        }

        let [r, g, b] = sum.map(|value| (value >> 4) as u8);
        *endpoints = tables.optimal_single_color(r, g, b).into();
    } else {
        let mut akku = 0;
        let mut at1 = [0; 3];
        let mut at2 = [0; 3];
        let mut cm = mask;

        for texel in block {
            let step = (cm & 3) as usize;
            cm >>= 2;

            let w1 = W1_TAB[step];
            let rgb = texel.rgb();

            akku += PRODS[step];
            for ch in 0..3 {
                at1[ch] += w1 * rgb[ch];
                at2[ch] += rgb[ch];
            }
        }

        for ch in 0..3 {
            at2[ch] = 3 * at2[ch] - at1[ch];
        }

        let xx = akku >> 16;
        let yy = (akku >> 8) & 0xFF;
        let xy = akku & 0xFF;

        let f = 3.0f32 / 255.0 / (xx * yy - xy * xy) as f32;

        let solve_max = |ch: usize| ((at1[ch] * yy - at2[ch] * xy) as f32) * f;
        let solve_min = |ch: usize| ((at2[ch] * xx - at1[ch] * xy) as f32) * f;

        endpoints.max16 = (quantize5(solve_max(0)) << 11)
            | (quantize6(solve_max(1)) << 5)
            | quantize5(solve_max(2));
        endpoints.min16 = (quantize5(solve_min(0)) << 11)
            | (quantize6(solve_min(1)) << 5)
            | quantize5(solve_min(2));
    }

    *endpoints != old
}
