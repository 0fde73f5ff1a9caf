use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use bytemuck::cast_slice;
use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};
use dxt_encode::{CompressionVariant, Rgba8, Settings};
use image::{imageops, ImageReader, RgbaImage};

struct Args {
    variant: CompressionVariant,
    settings: Settings,
    flip: bool,
    input: PathBuf,
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let start = Instant::now();

    let mut image = read_image(&args.input)?;
    if args.flip {
        imageops::flip_vertical_in_place(&mut image);
    }
    let (width, height) = image.dimensions();

    tracing::info!(
        "Image read took: {:.3} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    let start = Instant::now();

    let pixels: &[Rgba8] = cast_slice(image.as_raw());
    let block_data = dxt_encode::compress(width, height, pixels, args.variant, args.settings)
        .context("failed to compress image")?;

    tracing::info!(
        variant = args.variant.name(),
        mode = args.settings.mode(),
        "Compression of {width}x{height} took: {:.3} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    let start = Instant::now();

    write_dds_file(&args.output, args.variant, width, height, block_data)?;

    tracing::info!(
        "DDS output to {} took: {:.3} ms",
        args.output.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

fn read_image(path: &Path) -> Result<RgbaImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("can't open input image {}", path.display()))?
        .decode()
        .with_context(|| format!("can't decode image {}", path.display()))?;

    Ok(image.to_rgba8())
}

fn write_dds_file(
    path: &Path,
    variant: CompressionVariant,
    width: u32,
    height: u32,
    block_data: Vec<u8>,
) -> Result<()> {
    let mut dds = Dds::new_dxgi(NewDxgiParams {
        height,
        width,
        depth: None,
        format: dxgi_format(variant),
        mipmap_levels: Some(1),
        array_layers: None,
        caps2: None,
        is_cubemap: false,
        resource_dimension: D3D10ResourceDimension::Texture2D,
        alpha_mode: AlphaMode::Straight,
    })
    .context("failed to create DDS header")?;

    dds.data = block_data;

    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    dds.write(&mut writer).context("failed to write DDS file")?;

    Ok(())
}

fn dxgi_format(variant: CompressionVariant) -> DxgiFormat {
    match variant {
        CompressionVariant::BC1 => DxgiFormat::BC1_UNorm_sRGB,
        CompressionVariant::BC3 => DxgiFormat::BC3_UNorm_sRGB,
    }
}

fn print_help() {
    println!("Usage: compressor <compression_variant> <input_file> [options]");
    println!("\nCompression variants:");
    println!("  bc1  - BC1 compression (RGB)");
    println!("  bc3  - BC3 compression with smooth alpha (RGBA)");
    println!("\nOptions:");
    println!("  --dither          dither colors before fitting the endpoints");
    println!("  --high-quality    run a second refinement pass");
    println!("  --flip            flip the image vertically before compressing");
    println!("  --output <file>   output file, defaults to the input with a .dds extension");
    println!("  --help            print this help");
}

fn parse_args() -> Result<Option<Args>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.len() < 2 || args.iter().any(|arg| arg == "--help") {
        print_help();
        return Ok(None);
    }

    let variant = match args[0].to_lowercase().as_str() {
        "bc1" => CompressionVariant::BC1,
        "bc3" => CompressionVariant::BC3,
        other => {
            print_help();
            anyhow::bail!("invalid compression variant: {other}");
        }
    };

    let input = PathBuf::from(&args[1]);
    let mut output = None;
    let mut settings = Settings::fast();
    let mut flip = false;

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--dither" => settings.dither = true,
            "--high-quality" => settings.double_refine = true,
            "--flip" => flip = true,
            "--output" => {
                let path = rest.next().context("--output requires a file name")?;
                output = Some(PathBuf::from(path));
            }
            other => {
                print_help();
                anyhow::bail!("unknown option: {other}");
            }
        }
    }

    let output = output.unwrap_or_else(|| input.with_extension("dds"));

    Ok(Some(Args {
        variant,
        settings,
        flip,
        input,
        output,
    }))
}
