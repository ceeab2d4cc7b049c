//! Error diffusion dithering over generic pixel buffers.
//!
//! A [texture::TextureMut] supplies the pixels, a [dithering::ColorReduction]
//! picks the reduced color of each pixel and an
//! [dithering::ErrorDiffusionType] decides where the quantization error goes.
//!
//! ```
//! use errdiffuse::prelude::*;
//!
//! let mut texture = Texture::<u8>::from_slice(2, 1, 1, &[200, 50])?;
//! let hundreds = NearestMultiple::new(100.0)?;
//! dither(&mut texture, hundreds, ErrorDiffusionType::FloydSteinberg)?;
//! assert_eq!(texture.into_raw(), vec![200, 0]);
//! # Ok::<(), errdiffuse::error::DitherError>(())
//! ```

pub mod color_palette;
pub mod config;
pub mod dithering;
pub mod error;
pub mod metrics;
pub mod texture;
pub mod utils;


pub mod prelude {
    pub use crate::color_palette::{NearestMultiple, ReductionType, black_or_white, web_safe};
    pub use crate::dithering::{
        ColorReduction, ErrorDiffusionType, Kernel, dither, error_diffusion::ErrorDiffusion,
    };
    pub use crate::error::{DitherError, Result};
    pub use crate::texture::prelude::*;
    pub use crate::utils::prelude::*;
}
