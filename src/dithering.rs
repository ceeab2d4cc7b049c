use crate::{dithering::error_diffusion::ErrorDiffusion, error::Result, texture::TextureMut};

pub use error_diffusion::{ErrorDiffusionType, Kernel};

pub mod error_diffusion;

/// Maps a pixel's channels onto a reduced set of colors.
///
/// The result must have as many channels as the input. Implementations are
/// expected to be pure: the ditherer calls them once per pixel and makes no
/// ordering guarantees beyond the raster scan.
pub trait ColorReduction<T> {
    fn reduce(&self, channels: &[T]) -> Vec<T>;
}

impl<T, F> ColorReduction<T> for F
where
    F: Fn(&[T]) -> Vec<T>,
{
    #[inline]
    fn reduce(&self, channels: &[T]) -> Vec<T> {
        self(channels)
    }
}

/// Dither `buffer` in place with the method `kind`, then hand it back.
///
/// Shorthand for building an [ErrorDiffusion] for a single run. Copying the
/// input beforehand, if needed, is up to the caller.
pub fn dither<'b, B, R>(buffer: &'b mut B, reduction: R, kind: ErrorDiffusionType) -> Result<&'b mut B>
where
    B: TextureMut + ?Sized,
    R: ColorReduction<B::Inner>,
{
    ErrorDiffusion::new(kind, reduction).dither(buffer)
}
