use super::block::Block;

/// Compresses the alpha channel of a block into an 8 byte BC3 alpha block.
///
/// The endpoints are the block's maximum and minimum alpha, written in that order, which selects
/// the eight value palette. Every texel gets the palette entry nearest to it, chosen with integer
/// arithmetic only.
pub(crate) fn compress_alpha_block(block: &Block) -> [u8; 8] {
    let (mn, mx) = block
        .iter()
        .fold((u8::MAX, u8::MIN), |(mn, mx), texel| {
            (mn.min(texel.a), mx.max(texel.a))
        });

    let mut data = [0; 8];
    data[0] = mx;
    data[1] = mn;

    let mn = mn as i32;
    let dist = mx as i32 - mn;
    let dist4 = dist * 4;
    let dist2 = dist * 2;

    // rounding bias, tuned for small ranges
    let mut bias = if dist < 8 { dist - 1 } else { dist / 2 + 2 };
    bias -= mn * 7;

    let mut out = 2;
    let mut bits = 0;
    let mut mask = 0u32;

    for texel in block {
        let mut a = texel.a as i32 * 7 + bias;
        let mut ind = 0;

        if a >= dist4 {
            ind += 4;
            a -= dist4;
        }
        if a >= dist2 {
            ind += 2;
            a -= dist2;
        }
        if a >= dist {
            ind += 1;
        }

        // ramp position to BC3 index: 0 is the maximum, 1 the minimum
        ind = -ind & 7;
        if ind < 2 {
            ind ^= 1;
        }

        mask |= (ind as u32) << bits;
        bits += 3;
        if bits >= 8 {
            data[out] = mask as u8;
            out += 1;
            mask >>= 8;
            bits -= 8;
        }
    }

    data
}
