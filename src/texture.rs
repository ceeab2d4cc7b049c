use std::borrow::Cow;

use crate::{
    error::{DitherError, Result},
    utils::num::Channel,
};

/// `(width, height, planes)`
pub type Shape = (usize, usize, usize);
/// `(width, height)`
pub type Shape2D = (usize, usize);

/// Trait defining read ops on a grid of multi-channel pixels.
///
/// Implementors only provide the geometry, per-pixel access and a raw export,
/// everything else is derived from those.
pub trait TextureRef {
    type Inner: Channel;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Channels per pixel
    fn planes(&self) -> usize;

    /// Borrow the channels of the pixel at `(x, y)`.
    fn pixel(&self, x: usize, y: usize) -> Result<&[Self::Inner]>;

    /// Row-major export of every channel value, `width * height * planes` long.
    fn raw_content(&self) -> Cow<'_, [Self::Inner]>;

    #[inline]
    fn shape(&self) -> Shape {
        (self.width(), self.height(), self.planes())
    }

    #[inline]
    fn shape_2d(&self) -> Shape2D {
        (self.width(), self.height())
    }

    #[inline]
    fn contains(&self, x: isize, y: isize) -> bool {
        0 <= x && (x as usize) < self.width() && 0 <= y && (y as usize) < self.height()
    }

    /// Copy of the channels at `(x, y)`.
    fn get_pixel(&self, x: usize, y: usize) -> Result<Vec<Self::Inner>> {
        Ok(self.pixel(x, y)?.to_vec())
    }

    /// `original[i] - reduced[i]` for every channel, computed in `f64`.
    fn quant_errors(&self, original: &[Self::Inner], reduced: &[Self::Inner]) -> Result<Vec<f64>> {
        let mut errors = vec![0.0; self.planes()];
        self.quant_errors_into(original, reduced, &mut errors)?;
        Ok(errors)
    }

    /// Same as [TextureRef::quant_errors] without allocating.
    fn quant_errors_into(
        &self,
        original: &[Self::Inner],
        reduced: &[Self::Inner],
        errors: &mut [f64],
    ) -> Result {
        let planes = self.planes();
        check_channels(planes, original.len())?;
        check_channels(planes, reduced.len())?;
        check_channels(planes, errors.len())?;

        errors
            .iter_mut()
            .zip(original.iter().zip(reduced))
            .for_each(|(error, (o, r))| *error = o.as_f64() - r.as_f64());
        Ok(())
    }
}

/// Trait defining ops available on mutable textures.
pub trait TextureMut: TextureRef {
    /// Mutably borrow the channels of the pixel at `(x, y)`.
    fn pixel_mut(&mut self, x: usize, y: usize) -> Result<&mut [Self::Inner]>;

    /// Overwrite the channels at `(x, y)`. Values are stored as given.
    fn set_pixel(&mut self, x: usize, y: usize, values: &[Self::Inner]) -> Result {
        check_channels(self.planes(), values.len())?;
        self.pixel_mut(x, y)?.copy_from_slice(values);
        Ok(())
    }

    /// Add `error[i] * weight` to every channel at `(x, y)`, clamped to the
    /// channel range.
    ///
    /// This is the only write error diffusion performs on neighbors and it
    /// lands in the buffer immediately.
    fn apply_weighted_error(&mut self, x: usize, y: usize, error: &[f64], weight: f64) -> Result {
        check_channels(self.planes(), error.len())?;
        self.pixel_mut(x, y)?
            .iter_mut()
            .zip(error)
            .for_each(|(channel, e)| {
                *channel = Self::Inner::from_f64_clamped(channel.as_f64() + e * weight);
            });
        Ok(())
    }
}

#[inline]
pub(crate) fn check_channels(expected: usize, actual: usize) -> Result {
    if expected != actual {
        return Err(DitherError::ChannelCountMismatch { expected, actual });
    }
    Ok(())
}

#[inline]
fn check_shape(width: usize, height: usize, planes: usize) -> Result<usize> {
    if width == 0 || height == 0 || planes == 0 {
        return Err(DitherError::InvalidDimensions {
            width,
            height,
            planes,
        });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(planes))
        .ok_or(DitherError::InvalidDimensions {
            width,
            height,
            planes,
        })
}

#[inline]
fn check_flat_buffer(width: usize, height: usize, planes: usize, actual: usize) -> Result {
    let expected = check_shape(width, height, planes)?;
    if expected != actual {
        return Err(DitherError::BufferLength { expected, actual });
    }
    Ok(())
}

#[inline]
fn check_bounds(x: usize, y: usize, width: usize, height: usize) -> Result {
    if x >= width || y >= height {
        return Err(DitherError::OutOfBounds {
            x: x as isize,
            y: y as isize,
            width,
            height,
        });
    }
    Ok(())
}

/// Channel range of pixel `(x, y)` inside a row-major flat buffer
#[inline]
fn flat_range(shape: Shape, x: usize, y: usize) -> Result<std::ops::Range<usize>> {
    let (width, height, planes) = shape;
    check_bounds(x, y, width, height)?;
    let base = (y * width + x) * planes;
    Ok(base..base + planes)
}

/// Texture with owned, flat row-major buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture<T> {
    width: usize,
    height: usize,
    planes: usize,
    buffer: Vec<T>,
}

impl<T> AsRef<[T]> for Texture<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> AsMut<[T]> for Texture<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}

impl<T: Channel> TextureRef for Texture<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn planes(&self) -> usize {
        self.planes
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Result<&[T]> {
        let range = flat_range(self.shape(), x, y)?;
        Ok(&self.buffer[range])
    }

    fn raw_content(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(&self.buffer)
    }
}

impl<T: Channel> TextureMut for Texture<T> {
    #[inline]
    fn pixel_mut(&mut self, x: usize, y: usize) -> Result<&mut [T]> {
        let range = flat_range(self.shape(), x, y)?;
        Ok(&mut self.buffer[range])
    }
}

impl<T: Channel> Texture<T> {
    /// Texture filled with the zero color.
    pub fn new(width: usize, height: usize, planes: usize) -> Result<Self> {
        let len = check_shape(width, height, planes)?;
        Ok(Self {
            width,
            height,
            planes,
            buffer: vec![T::min_channel(); len],
        })
    }

    /// Take ownership of an existing row-major buffer.
    pub fn from_vec(width: usize, height: usize, planes: usize, buffer: Vec<T>) -> Result<Self> {
        check_flat_buffer(width, height, planes, buffer.len())?;
        Ok(Self {
            width,
            height,
            planes,
            buffer,
        })
    }

    /// Copy a row-major buffer.
    pub fn from_slice(width: usize, height: usize, planes: usize, slice: &[T]) -> Result<Self> {
        Self::from_vec(width, height, planes, slice.to_owned())
    }

    /// Copy any texture into a flat one.
    pub fn from_texture<R: TextureRef<Inner = T>>(texture: &R) -> Result<Self> {
        let (width, height, planes) = texture.shape();
        Self::from_vec(width, height, planes, texture.raw_content().into_owned())
    }

    pub fn into_raw(self) -> Vec<T> {
        self.buffer
    }

    pub fn as_texture_slice(&self) -> TextureSlice<'_, T> {
        TextureSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &self.buffer,
        }
    }

    pub fn as_texture_mut_slice(&mut self) -> TextureMutSlice<'_, T> {
        TextureMutSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &mut self.buffer,
        }
    }
}

/// Texture with borrowed, read-only flat buffer
#[derive(Debug, Copy, Clone)]
pub struct TextureSlice<'a, T> {
    width: usize,
    height: usize,
    planes: usize,
    buffer: &'a [T],
}

impl<T> AsRef<[T]> for TextureSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T: Channel> TextureRef for TextureSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn planes(&self) -> usize {
        self.planes
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Result<&[T]> {
        let range = flat_range(self.shape(), x, y)?;
        Ok(&self.buffer[range])
    }

    fn raw_content(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.buffer)
    }
}

impl<'a, T> TextureSlice<'a, T> {
    pub fn new(width: usize, height: usize, planes: usize, buffer: &'a [T]) -> Result<Self> {
        check_flat_buffer(width, height, planes, buffer.len())?;
        Ok(Self {
            width,
            height,
            planes,
            buffer,
        })
    }
}

/// Texture over a caller owned, mutable flat buffer.
///
/// Dithering through this type writes straight into the caller's memory.
#[derive(Debug)]
pub struct TextureMutSlice<'a, T> {
    width: usize,
    height: usize,
    planes: usize,
    buffer: &'a mut [T],
}

impl<T> AsRef<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> AsMut<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.buffer
    }
}

impl<T: Channel> TextureRef for TextureMutSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn planes(&self) -> usize {
        self.planes
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Result<&[T]> {
        let range = flat_range(self.shape(), x, y)?;
        Ok(&self.buffer[range])
    }

    fn raw_content(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.buffer)
    }
}

impl<T: Channel> TextureMut for TextureMutSlice<'_, T> {
    #[inline]
    fn pixel_mut(&mut self, x: usize, y: usize) -> Result<&mut [T]> {
        let range = flat_range(self.shape(), x, y)?;
        Ok(&mut self.buffer[range])
    }
}

impl<'a, T> TextureMutSlice<'a, T> {
    pub fn new(width: usize, height: usize, planes: usize, buffer: &'a mut [T]) -> Result<Self> {
        check_flat_buffer(width, height, planes, buffer.len())?;
        Ok(Self {
            width,
            height,
            planes,
            buffer,
        })
    }
}

/// Texture stored as a `[x][y][channel]` structure.
///
/// Observationally identical to [Texture], only the storage differs.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture3D<T> {
    width: usize,
    height: usize,
    planes: usize,
    content: Vec<Vec<Vec<T>>>,
}

impl<T: Channel> TextureRef for Texture3D<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn planes(&self) -> usize {
        self.planes
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Result<&[T]> {
        check_bounds(x, y, self.width, self.height)?;
        Ok(&self.content[x][y])
    }

    /// Flattens into row-major order, this allocates.
    fn raw_content(&self) -> Cow<'_, [T]> {
        let mut raw = Vec::with_capacity(self.width * self.height * self.planes);
        for y in 0..self.height {
            for column in &self.content {
                raw.extend_from_slice(&column[y]);
            }
        }
        Cow::Owned(raw)
    }
}

impl<T: Channel> TextureMut for Texture3D<T> {
    #[inline]
    fn pixel_mut(&mut self, x: usize, y: usize) -> Result<&mut [T]> {
        check_bounds(x, y, self.width, self.height)?;
        Ok(&mut self.content[x][y])
    }
}

impl<T: Channel> Texture3D<T> {
    /// Texture filled with the zero color.
    pub fn new(width: usize, height: usize, planes: usize) -> Result<Self> {
        check_shape(width, height, planes)?;
        Ok(Self {
            width,
            height,
            planes,
            content: vec![vec![vec![T::min_channel(); planes]; height]; width],
        })
    }

    /// Take ownership of a `[x][y][channel]` structure.
    ///
    /// Every column must have the same height and every pixel the same
    /// channel count.
    pub fn from_nested(content: Vec<Vec<Vec<T>>>) -> Result<Self> {
        let width = content.len();
        let height = content.first().map_or(0, Vec::len);
        let planes = content
            .first()
            .and_then(|column| column.first())
            .map_or(0, Vec::len);
        check_shape(width, height, planes)?;

        let ragged = content.iter().any(|column| {
            column.len() != height || column.iter().any(|pixel| pixel.len() != planes)
        });
        if ragged {
            return Err(DitherError::InvalidDimensions {
                width,
                height,
                planes,
            });
        }

        Ok(Self {
            width,
            height,
            planes,
            content,
        })
    }

    /// Build from a row-major flat buffer.
    pub fn from_slice(width: usize, height: usize, planes: usize, slice: &[T]) -> Result<Self> {
        check_flat_buffer(width, height, planes, slice.len())?;
        let content = (0..width)
            .map(|x| {
                (0..height)
                    .map(|y| {
                        let base = (y * width + x) * planes;
                        slice[base..base + planes].to_vec()
                    })
                    .collect()
            })
            .collect();
        Ok(Self {
            width,
            height,
            planes,
            content,
        })
    }

    pub fn into_nested(self) -> Vec<Vec<Vec<T>>> {
        self.content
    }
}

pub mod prelude {
    pub use super::{
        Shape, Shape2D, Texture, Texture3D, TextureMut, TextureMutSlice, TextureRef, TextureSlice,
    };
}
