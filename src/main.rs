use std::path::PathBuf;

use clap::Parser;
use errdiffuse::{
    color_palette::ReductionType,
    config::DitherConfig,
    dithering::{ErrorDiffusionType, error_diffusion::ErrorDiffusion},
    error::Result,
    metrics::psnr_of,
    utils::image::{read_rgb8, write_png},
};

/// Dither an image with one or more error diffusion methods, writing one
/// PNG per method.
#[derive(Parser)]
#[command(name = "errdiffuse", version)]
struct Cli {
    /// Image to dither, anything the image crate decodes
    input: PathBuf,

    /// Method to run, repeatable (floyd, jarvis, stucki, atkinson, burkes,
    /// sierra, sierra_two_row, sierra_lite, none). Defaults to all of them
    #[arg(short, long = "kernel")]
    kernels: Vec<ErrorDiffusionType>,

    /// Color reduction, web_safe or black_or_white
    #[arg(short, long)]
    reduction: Option<ReductionType>,

    /// JSON settings file, command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Outputs are written to `<output-base><tag>.png`
    #[arg(short, long)]
    output_base: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<(PathBuf, DitherConfig)> {
        let mut config = match &self.config {
            Some(path) => DitherConfig::read_config(path)?,
            None => DitherConfig::default(),
        };
        if !self.kernels.is_empty() {
            config.kernels = self.kernels;
        }
        if let Some(reduction) = self.reduction {
            config.reduction = reduction;
        }
        if let Some(output_base) = self.output_base {
            config.output_base = output_base;
        }
        Ok((self.input, config))
    }
}

fn main() -> Result {
    env_logger::init();

    let (input, config) = Cli::parse().into_config()?;
    let image = read_rgb8(&input)?;
    log::info!(
        "dithering {} with {} method(s), reduction {}",
        input.display(),
        config.kernels.len(),
        config.reduction
    );

    for kind in &config.kernels {
        let ditherer = ErrorDiffusion::new(*kind, config.reduction);
        let mut dithered = image.clone();
        ditherer.dither(&mut dithered)?;

        let path = format!("{}{}.png", config.output_base, ditherer.file_tag());
        write_png(&dithered, &path)?;
        println!(
            "{:<20} {:>8.3} dB  {}",
            ditherer.method_name(),
            psnr_of(&image, &dithered)?,
            path
        );
    }
    Ok(())
}
