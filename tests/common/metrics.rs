use dxt_encode::Rgba8;

#[derive(Debug, Clone)]
pub struct PsnrResult {
    pub overall_psnr: f64,
    pub overall_mse: f64,
    pub channel_results: ChannelResults,
}

#[derive(Debug, Clone)]
pub struct ChannelResults {
    pub red: ChannelMetrics,
    pub green: ChannelMetrics,
    pub blue: ChannelMetrics,
    pub alpha: ChannelMetrics,
}

#[derive(Debug, Clone)]
pub struct ChannelMetrics {
    pub psnr: f64,
    pub mse: f64,
}

/// Calculates quality metrics of a decoded image against its original.
///
/// Only the first `channels` channels count towards the overall values. Identical channels
/// have an infinite PSNR.
pub fn calculate_image_metrics(
    original: &[Rgba8],
    decoded: &[Rgba8],
    channels: usize,
) -> PsnrResult {
    assert_eq!(
        original.len(),
        decoded.len(),
        "images must have the same size"
    );

    let mut channel_mse = [0.0; 4];

    for (orig, comp) in original.iter().zip(decoded) {
        let orig: [u8; 4] = (*orig).into();
        let comp: [u8; 4] = (*comp).into();

        for channel in 0..4 {
            let diff = (orig[channel] as f64 - comp[channel] as f64) / 255.0;
            channel_mse[channel] += diff * diff;
        }
    }

    let pixel_count = original.len().max(1) as f64;
    channel_mse.iter_mut().for_each(|mse| *mse /= pixel_count);

    let calculate_psnr = |mse: f64| -> f64 {
        if mse == 0.0 {
            f64::INFINITY
        } else {
            20.0 * (1.0 / mse.sqrt()).log10()
        }
    };

    let overall_mse = channel_mse[..channels].iter().sum::<f64>() / channels as f64;
    let overall_psnr = calculate_psnr(overall_mse);

    let channel_metrics = |channel: usize| ChannelMetrics {
        mse: channel_mse[channel],
        psnr: calculate_psnr(channel_mse[channel]),
    };

    PsnrResult {
        overall_psnr,
        overall_mse,
        channel_results: ChannelResults {
            red: channel_metrics(0),
            green: channel_metrics(1),
            blue: channel_metrics(2),
            alpha: channel_metrics(3),
        },
    }
}
