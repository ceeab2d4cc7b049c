use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::{
    DynamicImage, ImageBuffer, ImageReader, Luma, LumaA, Rgb, Rgba,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};

use crate::{
    error::{DitherError, Result},
    texture::{Texture, TextureRef},
};

/// Decode an image into an RGB8 texture, alpha is dropped.
pub fn read_rgb8<P: AsRef<Path>>(path: P) -> Result<Texture<u8>> {
    let image = ImageReader::open(path.as_ref())?.decode()?;
    log::debug!(
        "decoded {} ({}x{}, {:?})",
        path.as_ref().display(),
        image.width(),
        image.height(),
        image.color()
    );
    dynimg_to_texture(&image, 3)
}

/// Decode an image into an RGBA8 texture.
pub fn read_rgba8<P: AsRef<Path>>(path: P) -> Result<Texture<u8>> {
    let image = ImageReader::open(path.as_ref())?.decode()?;
    dynimg_to_texture(&image, 4)
}

/// Convert to a `u8` texture with `planes` channels (1 to 4).
pub fn dynimg_to_texture(image: &DynamicImage, planes: usize) -> Result<Texture<u8>> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let raw = match planes {
        1 => image.to_luma8().into_raw(),
        2 => image.to_luma_alpha8().into_raw(),
        3 => image.to_rgb8().into_raw(),
        4 => image.to_rgba8().into_raw(),
        _ => {
            return Err(DitherError::InvalidDimensions {
                width,
                height,
                planes,
            });
        }
    };
    Texture::from_vec(width, height, planes, raw)
}

pub fn texture_to_dynimg<T: TextureRef<Inner = u8>>(texture: &T) -> Result<DynamicImage> {
    let (width, height, planes) = texture.shape();
    let raw = texture.raw_content().into_owned();
    let invalid = || DitherError::InvalidDimensions {
        width,
        height,
        planes,
    };
    let (w, h) = (
        u32::try_from(width).map_err(|_| invalid())?,
        u32::try_from(height).map_err(|_| invalid())?,
    );

    let image = match planes {
        1 => ImageBuffer::<Luma<u8>, _>::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
        2 => ImageBuffer::<LumaA<u8>, _>::from_raw(w, h, raw).map(DynamicImage::ImageLumaA8),
        3 => ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
        4 => ImageBuffer::<Rgba<u8>, _>::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
        _ => None,
    };
    image.ok_or_else(invalid)
}

/// Encode a `u8` texture as PNG.
pub fn write_png<T: TextureRef<Inner = u8>, P: AsRef<Path>>(texture: &T, path: P) -> Result {
    let image = texture_to_dynimg(texture)?;
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    let encoder =
        PngEncoder::new_with_quality(&mut writer, CompressionType::Default, FilterType::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(DitherError::ImageEncode)?;
    writer.flush()?;
    log::debug!("wrote {}", path.as_ref().display());
    Ok(())
}

/// Scale a `u8` texture into the continuous `[0.0, 1.0]` range.
pub fn to_unit_f64<T: TextureRef<Inner = u8>>(texture: &T) -> Result<Texture<f64>> {
    let (width, height, planes) = texture.shape();
    let raw = texture
        .raw_content()
        .iter()
        .map(|&c| c as f64 / 255.0)
        .collect();
    Texture::from_vec(width, height, planes, raw)
}

/// Inverse of [to_unit_f64], rounds to the nearest byte.
pub fn from_unit_f64<T: TextureRef<Inner = f64>>(texture: &T) -> Result<Texture<u8>> {
    let (width, height, planes) = texture.shape();
    let raw = texture
        .raw_content()
        .iter()
        .map(|&c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();
    Texture::from_vec(width, height, planes, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_dynimg_round_trip() {
        let data: Vec<u8> = (0..4 * 3 * 3).map(|v| v as u8 * 7).collect();
        let texture = Texture::from_slice(4, 3, 3, &data).unwrap();
        let image = texture_to_dynimg(&texture).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        let back = dynimg_to_texture(&image, 3).unwrap();
        assert_eq!(back, texture);
    }

    #[test]
    fn test_unsupported_planes() {
        let texture = Texture::<u8>::new(2, 2, 5).unwrap();
        assert!(texture_to_dynimg(&texture).is_err());
        let image = DynamicImage::new_rgb8(2, 2);
        assert!(dynimg_to_texture(&image, 0).is_err());
    }

    #[test]
    fn test_unit_conversion() {
        let texture = Texture::from_slice(3, 1, 1, &[0u8, 51, 255]).unwrap();
        let unit = to_unit_f64(&texture).unwrap();
        assert_eq!(unit.as_ref(), &[0.0, 0.2, 1.0]);
        assert_eq!(from_unit_f64(&unit).unwrap(), texture);
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("errdiffuse-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_png_round_trip_rgba() {
        let data: Vec<u8> = (0..5 * 4 * 4).map(|v| (v * 3) as u8).collect();
        let texture = Texture::from_slice(5, 4, 4, &data).unwrap();
        let path = temp_path("rgba.png");

        write_png(&texture, &path).unwrap();
        let back = read_rgba8(&path);
        let opaque = read_rgb8(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(back.unwrap(), texture);
        let opaque = opaque.unwrap();
        assert_eq!(opaque.shape(), (5, 4, 3));
        assert_eq!(opaque.pixel(1, 0).unwrap(), &data[4..7]);
    }

    #[test]
    fn test_write_into_missing_directory() {
        let texture = Texture::<u8>::new(2, 2, 3).unwrap();
        let path = temp_path("missing").join("out.png");
        assert!(matches!(write_png(&texture, &path), Err(DitherError::Io(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_write_is_reported() {
        // small enough to stay in the write buffer until the final flush
        let texture = Texture::<u8>::from_slice(64, 64, 3, &[7; 64 * 64 * 3]).unwrap();
        assert!(matches!(
            write_png(&texture, "/dev/full"),
            Err(DitherError::Io(_) | DitherError::ImageEncode(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            read_rgb8("definitely/not/here.png"),
            Err(DitherError::Io(_))
        ));
    }
}
