use std::{fmt::Display, str::FromStr};

use crate::{
    dithering::ColorReduction,
    error::{DitherError, Result},
    utils::num::Channel,
};

/// Levels per channel of the web safe palette
pub const WEB_SAFE_LEVELS: u32 = 6;

/// Snap every channel to the closest of the 6 web safe levels.
///
/// Discrete channels use steps of `max / 5` (51 for `u8`), continuous ones
/// steps of `0.2`. Ties round to the even level.
pub fn web_safe<T: Channel>(channels: &[T]) -> Vec<T> {
    let step = T::max_channel().as_f64() / (WEB_SAFE_LEVELS - 1) as f64;
    channels
        .iter()
        .map(|&c| T::from_f64_clamped((c.as_f64() / step).round_ties_even() * step))
        .collect()
}

/// Black or white depending on HSL lightness, `(max + min) / 2`.
///
/// Lightness below the middle of the channel range maps to black.
pub fn black_or_white<T: Channel>(channels: &[T]) -> Vec<T> {
    let (min, max) = channels
        .iter()
        .map(|c| c.as_f64())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let lightness = (max + min) / 2.0;
    let middle = if T::CONTINUOUS {
        0.5
    } else {
        (T::max_channel().as_f64() + 1.0) / 2.0
    };

    let color = if lightness < middle {
        T::min_channel()
    } else {
        T::max_channel()
    };
    vec![color; channels.len()]
}

/// Round every channel to the nearest multiple of `step`, ties go to the
/// even multiple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestMultiple {
    step: f64,
}

impl NearestMultiple {
    pub fn new(step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(DitherError::Config(format!(
                "step must be a positive number, got {}",
                step
            )));
        }
        Ok(Self { step })
    }
}

impl<T: Channel> ColorReduction<T> for NearestMultiple {
    fn reduce(&self, channels: &[T]) -> Vec<T> {
        channels
            .iter()
            .map(|&c| T::from_f64_clamped((c.as_f64() / self.step).round_ties_even() * self.step))
            .collect()
    }
}

/// Built-in reductions selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReductionType {
    #[default]
    WebSafe,
    BlackOrWhite,
}

impl ReductionType {
    pub const ALL: [ReductionType; 2] = [ReductionType::WebSafe, ReductionType::BlackOrWhite];

    pub const fn key(self) -> &'static str {
        match self {
            ReductionType::WebSafe => "web_safe",
            ReductionType::BlackOrWhite => "black_or_white",
        }
    }
}

impl<T: Channel> ColorReduction<T> for ReductionType {
    fn reduce(&self, channels: &[T]) -> Vec<T> {
        match self {
            ReductionType::WebSafe => web_safe(channels),
            ReductionType::BlackOrWhite => black_or_white(channels),
        }
    }
}

impl Display for ReductionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ReductionType {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace('-', "_");
        ReductionType::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| DitherError::Config(format!("Not recognized reduction: {}", s)))
    }
}
