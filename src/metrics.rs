//! Fidelity metrics used to compare a dithered texture against its source.

use itertools::Itertools;

use crate::{
    error::{DitherError, Result},
    texture::TextureRef,
    utils::num::Channel,
};

/// Mean squared error over every channel of two same-shaped textures.
///
/// `MSE = sum((a - b)^2) / (width * height * planes)`
pub fn mse<A, B>(original: &A, dithered: &B) -> Result<f64>
where
    A: TextureRef,
    B: TextureRef<Inner = A::Inner>,
{
    if original.shape() != dithered.shape() {
        let (width, height, planes) = dithered.shape();
        return Err(DitherError::InvalidDimensions {
            width,
            height,
            planes,
        });
    }

    let a = original.raw_content();
    let b = dithered.raw_content();
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(a, b)| {
            let difference = a.as_f64() - b.as_f64();
            difference * difference
        })
        .sum();
    Ok(sum / a.len() as f64)
}

/// Peak signal to noise ratio in dB, `10 * log10(max^2 / mse)`.
///
/// Identical images (`mse == 0`) give positive infinity.
pub fn psnr(mse: f64, max_value: f64) -> f64 {
    10.0 * (max_value * max_value / mse).log10()
}

/// PSNR of two textures using the channel type's maximum as peak value.
pub fn psnr_of<A, B>(original: &A, dithered: &B) -> Result<f64>
where
    A: TextureRef,
    B: TextureRef<Inner = A::Inner>,
{
    let mse = mse(original, dithered)?;
    Ok(psnr(mse, A::Inner::max_channel().as_f64()))
}

/// Sum of every channel value, a cheap content fingerprint.
pub fn checksum<A: TextureRef>(texture: &A) -> f64 {
    texture.raw_content().iter().map(|c| c.as_f64()).sum()
}

/// Number of distinct pixel colors.
pub fn unique_colors<A: TextureRef>(texture: &A) -> usize {
    texture
        .raw_content()
        .chunks_exact(texture.planes())
        .map(|pixel| pixel.iter().map(|c| c.as_f64().to_bits()).collect_vec())
        .unique()
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Texture, Texture3D, TextureSlice};

    #[test]
    fn test_mse() {
        let a = Texture::<u8>::from_slice(2, 1, 2, &[10, 20, 30, 40]).unwrap();
        let b = Texture::<u8>::from_slice(2, 1, 2, &[12, 20, 26, 40]).unwrap();
        // (4 + 0 + 16 + 0) / 4
        assert_eq!(mse(&a, &b).unwrap(), 5.0);
        assert_eq!(mse(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_mse_across_layouts() {
        let raw = [10u8, 20, 30, 40];
        let view = TextureSlice::new(2, 1, 2, &raw).unwrap();
        let nested = Texture3D::from_slice(2, 1, 2, &[12u8, 20, 26, 40]).unwrap();
        assert_eq!(mse(&view, &nested).unwrap(), 5.0);
        assert_eq!(psnr_of(&view, &view).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_mse_shape_mismatch() {
        let a = Texture::<u8>::new(2, 2, 1).unwrap();
        let b = Texture::<u8>::new(1, 4, 1).unwrap();
        assert!(matches!(
            mse(&a, &b),
            Err(DitherError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_psnr() {
        assert!((psnr(1.0, 255.0) - 48.130_803_608_679_1).abs() < 1e-9);
        assert_eq!(psnr(0.0, 255.0), f64::INFINITY);
        assert!((psnr(0.01, 1.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_psnr_of_uses_channel_max() {
        let a = Texture::<f64>::from_slice(1, 1, 1, &[0.5]).unwrap();
        let b = Texture::<f64>::from_slice(1, 1, 1, &[0.6]).unwrap();
        assert!((psnr_of(&a, &b).unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_unique_colors_and_checksum() {
        let t = Texture::<u8>::from_slice(3, 1, 2, &[1, 2, 1, 2, 2, 1]).unwrap();
        assert_eq!(unique_colors(&t), 2);
        assert_eq!(checksum(&t), 9.0);
    }
}
