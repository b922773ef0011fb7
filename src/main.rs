//! `kernel-filters`: apply one or more filters to an image file.
//!
//! ```text
//! kernel-filters -p photo.png -f gaussian -f sobel --sigma 2.0 -o out/
//! ```
//!
//! Every selected filter runs on the original input, and each result is
//! written to `<out-dir>/<filter>.png`, named after the `-f` value. Set
//! `RUST_LOG=debug` to see the statistics computed by the two-pass filters.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::info;

use kernel_filters::filters::{
    AutoLevels, Blur, Brightness, Closing, Convolution, Dilation, Erosion, Filter, Gaussian,
    Glass, Gradient, GrayWorld, Grayscale, Invert, Median, MotionBlur, Opening, PerfectReflector,
    Sepia, Sharpen, Sobel, SobelDirection, Translate, Wave,
};
use kernel_filters::io;
use kernel_filters::kernel_file::load_kernel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FilterKind {
    Invert,
    Grayscale,
    Sepia,
    Brightness,
    Blur,
    Gaussian,
    MotionBlur,
    Sharpen,
    Sobel,
    SobelX,
    SobelY,
    Dilation,
    Erosion,
    Opening,
    Closing,
    Gradient,
    Median,
    GrayWorld,
    PerfectReflector,
    AutoLevels,
    Translate,
    Glass,
    Wave,
    /// Convolution with the kernel given by `--kernel`.
    Convolve,
}

#[derive(Debug, Parser)]
#[command(name = "kernel-filters", version, about = "Apply image filters to an RGB image")]
struct Args {
    /// Input image (PNG, JPEG or BMP).
    #[arg(short, long)]
    path: PathBuf,

    /// Directory receiving one output file per filter.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Filter to apply; repeat for several outputs.
    #[arg(short, long = "filter", value_enum, required = true)]
    filters: Vec<FilterKind>,

    /// Neighborhood radius for blur, morphology, median and glass.
    #[arg(long)]
    radius: Option<usize>,

    /// Gaussian standard deviation.
    #[arg(long)]
    sigma: Option<f32>,

    /// Strength for sepia and brightness.
    #[arg(short)]
    k: Option<f32>,

    #[arg(long, allow_hyphen_values = true)]
    dx: Option<isize>,

    #[arg(long, allow_hyphen_values = true)]
    dy: Option<isize>,

    /// Wave amplitude in pixels.
    #[arg(long)]
    amplitude: Option<f32>,

    /// Wave period in pixels.
    #[arg(long)]
    period: Option<f32>,

    /// Seed for glass; omitted means a fresh random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Kernel description file used by `-f convolve`.
    #[arg(long)]
    kernel: Option<PathBuf>,

    /// Rescale the `--kernel` weights to sum to one.
    #[arg(long)]
    normalize: bool,
}

impl Args {
    fn build(&self, kind: FilterKind) -> anyhow::Result<Box<dyn Filter>> {
        let radius = |default: usize| self.radius.unwrap_or(default);
        let filter: Box<dyn Filter> = match kind {
            FilterKind::Invert => Box::new(Invert),
            FilterKind::Grayscale => Box::new(Grayscale),
            FilterKind::Sepia => Box::new(self.k.map(Sepia::new).unwrap_or_default()),
            FilterKind::Brightness => Box::new(self.k.map(Brightness::new).unwrap_or_default()),
            FilterKind::Blur => Box::new(Blur::new(radius(1))),
            FilterKind::Gaussian => Box::new(Gaussian::new(radius(2), self.sigma.unwrap_or(3.0))),
            FilterKind::MotionBlur => Box::new(MotionBlur::new(radius(4))),
            FilterKind::Sharpen => Box::new(Sharpen::new()),
            FilterKind::Sobel => Box::new(Sobel::new(SobelDirection::Magnitude)),
            FilterKind::SobelX => Box::new(Sobel::new(SobelDirection::Horizontal)),
            FilterKind::SobelY => Box::new(Sobel::new(SobelDirection::Vertical)),
            FilterKind::Dilation => Box::new(Dilation::new(radius(1))),
            FilterKind::Erosion => Box::new(Erosion::new(radius(1))),
            FilterKind::Opening => Box::new(Opening::new(radius(1))),
            FilterKind::Closing => Box::new(Closing::new(radius(1))),
            FilterKind::Gradient => Box::new(Gradient::new(radius(1))),
            FilterKind::Median => Box::new(Median::new(radius(1))),
            FilterKind::GrayWorld => Box::new(GrayWorld),
            FilterKind::PerfectReflector => Box::new(PerfectReflector),
            FilterKind::AutoLevels => Box::new(AutoLevels),
            FilterKind::Translate => {
                Box::new(Translate::new(self.dx.unwrap_or(50), self.dy.unwrap_or(0)))
            }
            FilterKind::Glass => match self.seed {
                Some(seed) => Box::new(Glass::seeded(radius(5), seed)),
                None => Box::new(Glass::new(radius(5))),
            },
            FilterKind::Wave => Box::new(Wave::new(
                self.amplitude.unwrap_or(20.0),
                self.period.unwrap_or(30.0),
            )),
            FilterKind::Convolve => {
                let Some(path) = &self.kernel else {
                    bail!("`-f convolve` needs `--kernel <file>`");
                };
                let mut kernel = load_kernel(path)?;
                if self.normalize {
                    kernel = kernel.normalized();
                }
                Box::new(Convolution::new(kernel))
            }
        };
        Ok(filter)
    }
}

fn output_path(out_dir: &Path, kind: FilterKind) -> PathBuf {
    let name = kind
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| format!("{kind:?}"));
    out_dir.join(format!("{name}.png"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Build everything up front so a bad option fails before any work is done.
    let filters = args
        .filters
        .iter()
        .map(|&kind| Ok((kind, args.build(kind)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let image = io::load(&args.path)
        .with_context(|| format!("cannot read input {}", args.path.display()))?;

    for (kind, filter) in &filters {
        let out = output_path(&args.out_dir, *kind);
        let result = filter.apply(&image);
        io::save(&result, &out).with_context(|| format!("cannot write {}", out.display()))?;
        info!("{} -> {}", filter.name(), out.display());
    }
    Ok(())
}
