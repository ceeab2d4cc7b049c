use crate::{error::Result, texture::TextureMut};

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, numerator)`, the neighbor at `(x + dx, y + dy)`
/// receives `error * numerator / divisor`. Weights stay exact rationals
/// until they are applied.
///
/// Entries only ever point forward in raster order: `dy > 0`, or `dy == 0`
/// and `dx > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    pub entries: &'static [(isize, isize, u32)],
    pub divisor: u32,
}

impl Kernel {
    #[inline]
    pub fn weight(&self, numerator: u32) -> f64 {
        numerator as f64 / self.divisor as f64
    }

    /// Fraction of the quantization error an interior pixel gives away.
    pub fn weight_sum(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, _, numerator)| self.weight(numerator))
            .sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many rows below the current one the kernel reaches.
    pub fn max_dy(&self) -> usize {
        self.entries
            .iter()
            .map(|&(_, dy, _)| dy.max(0) as usize)
            .max()
            .unwrap_or(0)
    }

    /// In-bounds neighbors of `(x, y)` with their weights.
    ///
    /// Targets outside a `width x height` grid are skipped, their share of
    /// the error is lost.
    pub fn targets(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.entries.iter().filter_map(move |&(dx, dy, numerator)| {
            let tx = x.checked_add_signed(dx)?;
            let ty = y.checked_add_signed(dy)?;
            (tx < width && ty < height).then(|| (tx, ty, self.weight(numerator)))
        })
    }

    /// Distribute `error` from `(x, y)` onto its in-bounds neighbors.
    ///
    /// Returns how many neighbors received error.
    pub fn push_error<B: TextureMut + ?Sized>(
        &self,
        buffer: &mut B,
        x: usize,
        y: usize,
        error: &[f64],
    ) -> Result<usize> {
        let (width, height) = buffer.shape_2d();
        let mut pushed = 0;
        for (tx, ty, weight) in self.targets(x, y, width, height) {
            buffer.apply_weighted_error(tx, ty, error, weight)?;
            pushed += 1;
        }
        Ok(pushed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Texture, TextureRef};

    const TINY: Kernel = Kernel {
        entries: &[(1, 0, 1), (-1, 1, 1), (0, 1, 2)],
        divisor: 4,
    };

    #[test]
    fn test_targets_interior() {
        let targets: Vec<_> = TINY.targets(1, 1, 4, 4).collect();
        assert_eq!(targets, vec![(2, 1, 0.25), (0, 2, 0.25), (1, 2, 0.5)]);
    }

    #[test]
    fn test_targets_drop_out_of_bounds() {
        // left edge: (-1, +1) is gone
        let targets: Vec<_> = TINY.targets(0, 0, 4, 4).collect();
        assert_eq!(targets, vec![(1, 0, 0.25), (0, 1, 0.5)]);

        // bottom right corner: nothing left
        assert_eq!(TINY.targets(3, 3, 4, 4).count(), 0);
    }

    #[test]
    fn test_push_error_applies_weights() {
        let mut texture = Texture::<f64>::new(3, 2, 1).unwrap();
        let pushed = TINY.push_error(&mut texture, 1, 0, &[0.8]).unwrap();
        assert_eq!(pushed, 3);
        assert_eq!(texture.get_pixel(2, 0).unwrap(), vec![0.2]);
        assert_eq!(texture.get_pixel(0, 1).unwrap(), vec![0.2]);
        assert_eq!(texture.get_pixel(1, 1).unwrap(), vec![0.4]);
        assert_eq!(texture.get_pixel(0, 0).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_max_dy() {
        assert_eq!(TINY.max_dy(), 1);
        let empty = Kernel {
            entries: &[],
            divisor: 1,
        };
        assert_eq!(empty.max_dy(), 0);
        assert!(empty.is_empty());
        assert_eq!(empty.weight_sum(), 0.0);
    }
}
