use std::{fmt::Display, str::FromStr};

use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

use crate::{
    dithering::ColorReduction,
    error::{DitherError, Result},
    texture::{TextureMut, check_channels},
    utils::iterator::GridIterator,
};

pub use kernel::Kernel;

mod kernel;
pub mod matrices;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorDiffusionType {
    FloydSteinberg,
    JarvisJudiceNinke,
    Stucki,
    Atkinson,
    Burkes,
    Sierra,
    SierraTwoRow,
    SierraLite,
    /// No diffusion, plain color reduction
    None,
}

impl ErrorDiffusionType {
    pub const ALL: [ErrorDiffusionType; 9] = [
        ErrorDiffusionType::FloydSteinberg,
        ErrorDiffusionType::JarvisJudiceNinke,
        ErrorDiffusionType::Stucki,
        ErrorDiffusionType::Atkinson,
        ErrorDiffusionType::Burkes,
        ErrorDiffusionType::Sierra,
        ErrorDiffusionType::SierraTwoRow,
        ErrorDiffusionType::SierraLite,
        ErrorDiffusionType::None,
    ];

    pub const fn kernel(self) -> &'static Kernel {
        match self {
            ErrorDiffusionType::FloydSteinberg => &matrices::FLOYD_STEINBERG,
            ErrorDiffusionType::JarvisJudiceNinke => &matrices::JARVIS_JUDICE_NINKE,
            ErrorDiffusionType::Stucki => &matrices::STUCKI,
            ErrorDiffusionType::Atkinson => &matrices::ATKINSON,
            ErrorDiffusionType::Burkes => &matrices::BURKES,
            ErrorDiffusionType::Sierra => &matrices::SIERRA,
            ErrorDiffusionType::SierraTwoRow => &matrices::SIERRA_TWO_ROW,
            ErrorDiffusionType::SierraLite => &matrices::SIERRA_LITE,
            ErrorDiffusionType::None => &matrices::NONE,
        }
    }

    /// Human readable method name.
    pub const fn long_name(self) -> &'static str {
        match self {
            ErrorDiffusionType::FloydSteinberg => "Floyd-Steinberg",
            ErrorDiffusionType::JarvisJudiceNinke => "Jarvis-Judice-Ninke",
            ErrorDiffusionType::Stucki => "Stucki",
            ErrorDiffusionType::Atkinson => "Atkinson",
            ErrorDiffusionType::Burkes => "Burkes",
            ErrorDiffusionType::Sierra => "Sierra",
            ErrorDiffusionType::SierraTwoRow => "Sierra Two-Row",
            ErrorDiffusionType::SierraLite => "Sierra Lite",
            ErrorDiffusionType::None => "No dithering",
        }
    }

    /// Filename safe suffix for output artifacts.
    pub const fn file_tag(self) -> &'static str {
        match self {
            ErrorDiffusionType::FloydSteinberg => "_FS",
            ErrorDiffusionType::JarvisJudiceNinke => "_JJN",
            ErrorDiffusionType::Stucki => "_STU",
            ErrorDiffusionType::Atkinson => "_ATK",
            ErrorDiffusionType::Burkes => "_BUR",
            ErrorDiffusionType::Sierra => "_SIE",
            ErrorDiffusionType::SierraTwoRow => "_SIE2R",
            ErrorDiffusionType::SierraLite => "_SIEL",
            ErrorDiffusionType::None => "_NONE",
        }
    }

    /// Key used in config files and on the command line.
    pub const fn key(self) -> &'static str {
        match self {
            ErrorDiffusionType::FloydSteinberg => "floyd",
            ErrorDiffusionType::JarvisJudiceNinke => "jarvis",
            ErrorDiffusionType::Stucki => "stucki",
            ErrorDiffusionType::Atkinson => "atkinson",
            ErrorDiffusionType::Burkes => "burkes",
            ErrorDiffusionType::Sierra => "sierra",
            ErrorDiffusionType::SierraTwoRow => "sierra_two_row",
            ErrorDiffusionType::SierraLite => "sierra_lite",
            ErrorDiffusionType::None => "none",
        }
    }
}

impl Display for ErrorDiffusionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ErrorDiffusionType {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace('-', "_");
        ErrorDiffusionType::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| DitherError::Config(format!("Not recognized dithering type: {}", s)))
    }
}

/// Error diffusion ditherer bound to one method and one color reduction.
///
/// Holds no per-image state, [ErrorDiffusion::dither] can be called on any
/// number of buffers.
#[derive(Debug, Clone)]
pub struct ErrorDiffusion<R> {
    kind: ErrorDiffusionType,
    reduction: R,
}

impl<R> ErrorDiffusion<R> {
    pub fn new(kind: ErrorDiffusionType, reduction: R) -> Self {
        Self { kind, reduction }
    }

    pub fn kind(&self) -> ErrorDiffusionType {
        self.kind
    }

    pub fn kernel(&self) -> &'static Kernel {
        self.kind.kernel()
    }

    pub fn method_name(&self) -> &'static str {
        self.kind.long_name()
    }

    pub fn file_tag(&self) -> &'static str {
        self.kind.file_tag()
    }

    /// Dither `buffer` in place and hand it back.
    ///
    /// Pixels are visited in raster order. Each one is reduced, written back,
    /// and its quantization error is pushed onto the neighbors the kernel
    /// names. A failure stops the scan, pixels before the failing one stay
    /// modified.
    pub fn dither<'b, B>(&self, buffer: &'b mut B) -> Result<&'b mut B>
    where
        B: TextureMut + ?Sized,
        R: ColorReduction<B::Inner>,
    {
        let (width, height, planes) = buffer.shape();
        if width == 0 || height == 0 || planes == 0 {
            return Err(DitherError::InvalidDimensions {
                width,
                height,
                planes,
            });
        }

        let kernel = self.kernel();
        let mut original = Vec::with_capacity(planes);
        let mut error = vec![0.0; planes];

        for (x, y, _) in GridIterator::new(width, height) {
            original.clear();
            original.extend_from_slice(buffer.pixel(x, y)?);

            let reduced = self.reduction.reduce(&original);
            check_channels(planes, reduced.len())?;

            buffer.set_pixel(x, y, &reduced)?;
            buffer.quant_errors_into(&original, &reduced, &mut error)?;
            kernel.push_error(buffer, x, y, &error)?;
        }

        Ok(buffer)
    }

    /// Dither independent buffers concurrently, one sequential scan per buffer.
    ///
    /// Any failing buffer fails the whole call, the others may already be
    /// dithered by then.
    pub fn dither_all<B>(&self, buffers: &mut [B]) -> Result
    where
        B: TextureMut + Send,
        R: ColorReduction<B::Inner> + Sync,
    {
        buffers
            .par_iter_mut()
            .map(|buffer| self.dither(buffer).map(|_| ()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Texture, TextureRef};

    fn identity(pixel: &[u8]) -> Vec<u8> {
        pixel.to_vec()
    }

    #[test]
    fn test_weight_sums() {
        for kind in ErrorDiffusionType::ALL {
            let sum = kind.kernel().weight_sum();
            match kind {
                ErrorDiffusionType::Atkinson => assert!((sum - 0.75).abs() < 1e-9),
                ErrorDiffusionType::None => assert_eq!(sum, 0.0),
                _ => assert!((sum - 1.0).abs() < 1e-9, "{} sums to {}", kind, sum),
            }
        }
    }

    #[test]
    fn test_kernels_only_point_forward() {
        for kind in ErrorDiffusionType::ALL {
            for &(dx, dy, numerator) in kind.kernel().entries {
                assert!(
                    dy > 0 || (dy == 0 && dx > 0),
                    "{} targets ({}, {}) which is already visited",
                    kind,
                    dx,
                    dy
                );
                assert!(numerator > 0, "{} has a zero weight entry", kind);
            }
        }
    }

    #[test]
    fn test_kernel_sizes() {
        let sizes: Vec<_> = ErrorDiffusionType::ALL
            .iter()
            .map(|kind| (kind.kernel().len(), kind.kernel().max_dy()))
            .collect();
        assert_eq!(
            sizes,
            vec![
                (4, 1),
                (12, 2),
                (12, 2),
                (6, 2),
                (7, 1),
                (10, 2),
                (7, 1),
                (3, 1),
                (0, 0)
            ]
        );
    }

    #[test]
    fn test_exact_fractions() {
        let fs = ErrorDiffusionType::FloydSteinberg.kernel();
        let weights: Vec<_> = fs.entries.iter().map(|e| fs.weight(e.2)).collect();
        assert_eq!(weights, vec![7.0 / 16.0, 3.0 / 16.0, 5.0 / 16.0, 1.0 / 16.0]);

        let stucki = ErrorDiffusionType::Stucki.kernel();
        assert_eq!(stucki.weight(stucki.entries[0].2), 8.0 / 42.0);
    }

    #[test]
    fn test_parse_keys() {
        for kind in ErrorDiffusionType::ALL {
            assert_eq!(kind.key().parse::<ErrorDiffusionType>().unwrap(), kind);
            assert_eq!(kind.to_string().parse::<ErrorDiffusionType>().unwrap(), kind);
        }
        assert_eq!(
            "Sierra-Two-Row".parse::<ErrorDiffusionType>().unwrap(),
            ErrorDiffusionType::SierraTwoRow
        );
        assert!(matches!(
            "ordered".parse::<ErrorDiffusionType>(),
            Err(DitherError::Config(_))
        ));
    }

    #[test]
    fn test_file_tags_are_unique_and_filename_safe() {
        let mut tags: Vec<_> = ErrorDiffusionType::ALL.iter().map(|k| k.file_tag()).collect();
        assert!(
            tags.iter()
                .all(|tag| tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        );
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), ErrorDiffusionType::ALL.len());
    }

    #[test]
    fn test_returns_same_buffer() {
        let mut texture = Texture::<u8>::from_slice(2, 1, 1, &[1, 2]).unwrap();
        let ditherer = ErrorDiffusion::new(ErrorDiffusionType::FloydSteinberg, identity);
        let ptr = &texture as *const Texture<u8>;
        let returned = ditherer.dither(&mut texture).unwrap();
        assert!(std::ptr::eq(returned, ptr));
    }

    #[test]
    fn test_channel_count_mismatch_aborts() {
        let mut texture = Texture::<u8>::from_slice(2, 1, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
        let ditherer = ErrorDiffusion::new(ErrorDiffusionType::FloydSteinberg, |p: &[u8]| {
            p[..1].to_vec()
        });
        assert!(matches!(
            ditherer.dither(&mut texture),
            Err(DitherError::ChannelCountMismatch {
                expected: 3,
                actual: 1
            })
        ));
        // nothing was written for the failing pixel
        assert_eq!(texture.get_pixel(0, 0).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_engine_metadata() {
        let ditherer = ErrorDiffusion::new(ErrorDiffusionType::SierraLite, identity);
        assert_eq!(ditherer.method_name(), "Sierra Lite");
        assert_eq!(ditherer.file_tag(), "_SIEL");
        assert_eq!(ditherer.kind(), ErrorDiffusionType::SierraLite);
        assert_eq!(ditherer.kernel(), &matrices::SIERRA_LITE);
    }
}
