use std::fmt::Debug;

use num_traits::{Bounded, NumCast, ToPrimitive};

/// A numeric channel value with a known representable range.
///
/// Discrete channels span their whole numeric range (`u8` is `0..=255`),
/// continuous channels span `[0.0, 1.0]`. Error arithmetic always happens
/// in `f64`, only the final write back goes through [Channel::from_f64_clamped].
pub trait Channel:
    Copy + PartialEq + PartialOrd + Debug + Default + Send + Sync + NumCast + 'static
{
    /// Smallest value a channel can hold (zero color)
    fn min_channel() -> Self;

    /// Largest value a channel can hold (full color)
    fn max_channel() -> Self;

    /// Whether the type is a floating point representation
    const CONTINUOUS: bool;

    #[inline]
    fn as_f64(self) -> f64 {
        // every implementor is a primitive number, the conversion can't fail
        ToPrimitive::to_f64(&self).unwrap_or(0.0)
    }

    /// Clamp into the channel range, then convert.
    ///
    /// Discrete channels truncate toward zero.
    #[inline]
    fn from_f64_clamped(value: f64) -> Self {
        let min = Self::min_channel().as_f64();
        let max = Self::max_channel().as_f64();
        if value.is_nan() {
            return Self::min_channel();
        }
        <Self as NumCast>::from(value.clamp(min, max)).unwrap_or_else(Self::min_channel)
    }
}

macro_rules! discrete_channel {
    ($($t:ty),*) => {
        $(
            impl Channel for $t {
                const CONTINUOUS: bool = false;

                #[inline]
                fn min_channel() -> Self {
                    <$t as Bounded>::min_value()
                }

                #[inline]
                fn max_channel() -> Self {
                    <$t as Bounded>::max_value()
                }
            }
        )*
    };
}

macro_rules! continuous_channel {
    ($($t:ty),*) => {
        $(
            impl Channel for $t {
                const CONTINUOUS: bool = true;

                #[inline]
                fn min_channel() -> Self {
                    0.0
                }

                #[inline]
                fn max_channel() -> Self {
                    1.0
                }
            }
        )*
    };
}

discrete_channel!(u8, u16, u32);
continuous_channel!(f32, f64);
