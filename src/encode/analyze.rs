use super::{block::Block, endpoints::Endpoints};
use crate::tables::as_16bit;

const POWER_ITERATIONS: usize = 4;

/// JPEG luma weights scaled by 1000, the fallback axis for blocks without a dominant direction.
const LUMINANCE_AXIS: [i32; 3] = [299, 587, 114];

fn compute_covar_mean(block: &Block) -> ([i32; 6], [i32; 3], [i32; 3]) {
    let mut mu = [0; 3];
    let mut min = [0; 3];
    let mut max = [0; 3];

    for ch in 0..3 {
        let first = block[0].rgb()[ch];
        let (mut muv, mut minv, mut maxv) = (first, first, first);

        for texel in &block[1..] {
            let value = texel.rgb()[ch];
            muv += value;
            minv = minv.min(value);
            maxv = maxv.max(value);
        }

        mu[ch] = (muv + 8) >> 4;
        min[ch] = minv;
        max[ch] = maxv;
    }

    let mut covar = [0; 6];
    for texel in block {
        let [r, g, b] = texel.rgb();
        let r = r - mu[0];
        let g = g - mu[1];
        let b = b - mu[2];

        covar[0] += r * r;
        covar[1] += r * g;
        covar[2] += r * b;
        covar[3] += g * g;
        covar[4] += g * b;
        covar[5] += b * b;
    }

    let mut range = [0; 3];
    for ch in 0..3 {
        range[ch] = max[ch] - min[ch];
    }

    (covar, mu, range)
}

/// Approximates the principal axis of the color distribution by power iteration, starting from
/// the per channel range. Returns the integer axis used for projecting texels.
fn compute_axis(covar: &[i32; 6], range: &[i32; 3]) -> [i32; 3] {
    let mut covf = [0.0f32; 6];
    for (value, &c) in covf.iter_mut().zip(covar) {
        *value = c as f32 / 255.0;
    }

    let mut vfr = range[0] as f32;
    let mut vfg = range[1] as f32;
    let mut vfb = range[2] as f32;

    for _ in 0..POWER_ITERATIONS {
        let r = vfr * covf[0] + vfg * covf[1] + vfb * covf[2];
        let g = vfr * covf[1] + vfg * covf[3] + vfb * covf[4];
        let b = vfr * covf[2] + vfg * covf[4] + vfb * covf[5];

        vfr = r;
        vfg = g;
        vfb = b;
    }

    let magnitude = vfr.abs().max(vfg.abs()).max(vfb.abs()) as f64;

    if magnitude < 4.0 {
        LUMINANCE_AXIS
    } else {
        let scale = 512.0 / magnitude;
        [
            (vfr as f64 * scale) as i32,
            (vfg as f64 * scale) as i32,
            (vfb as f64 * scale) as i32,
        ]
    }
}

/// Picks the initial endpoints as the two texels with the extreme projections onto the
/// principal axis of the block. The result is not ordered yet.
pub(crate) fn optimize_colors_block(block: &Block) -> Endpoints {
    let (covar, _mu, range) = compute_covar_mean(block);
    let axis = compute_axis(&covar, &range);

    let mut min_dot = i32::MAX;
    let mut max_dot = -i32::MAX;
    let mut min_index = 0;
    let mut max_index = 0;

    for (i, texel) in block.iter().enumerate() {
        let [r, g, b] = texel.rgb();
        let dot = r * axis[0] + g * axis[1] + b * axis[2];

        if dot < min_dot {
            min_dot = dot;
            min_index = i;
        }

        if dot > max_dot {
            max_dot = dot;
            max_index = i;
        }
    }

    let max = block[max_index];
    let min = block[min_index];

    Endpoints {
        max16: as_16bit(max.r, max.g, max.b),
        min16: as_16bit(min.r, min.g, min.b),
    }
}
