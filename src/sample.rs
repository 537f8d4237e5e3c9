//! Drawing candidate windows from the source mask.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{BinaryMask, Config, Error};

/// The seed used for everything random about `ch`.
///
/// Seeds only depend on the character, so a character always samples the
/// same windows and draws the same shapes, whatever else is generated.
pub fn char_seed(ch: char) -> u64 {
    u64::from(u32::from(ch)) * 1000
}

/// A fresh generator seeded with [`char_seed`].
pub fn char_rng(ch: char) -> StdRng {
    StdRng::seed_from_u64(char_seed(ch))
}

/// A window of the source mask that passed the ink ratio filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRegion {
    origin: (u32, u32),
    mask: BinaryMask,
    ink_ratio: f64,
}

impl CandidateRegion {
    /// The top-left corner of the window in the source image.
    pub fn origin(&self) -> (u32, u32) {
        self.origin
    }

    pub fn mask(&self) -> &BinaryMask {
        &self.mask
    }

    pub fn ink_ratio(&self) -> f64 {
        self.ink_ratio
    }

    pub(crate) fn into_mask(self) -> BinaryMask {
        self.mask
    }
}

/// Samples fixed-size windows whose ink ratio is close to a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSampler {
    width: u32,
    height: u32,
    tolerance: f64,
    sample_count: usize,
}

impl RegionSampler {
    /// A sampler drawing up to `sample_count` windows of `width`×`height`,
    /// keeping those within `tolerance` of the target ink ratio.
    pub fn new(width: u32, height: u32, tolerance: f64, sample_count: usize) -> Self {
        RegionSampler { width, height, tolerance, sample_count }
    }

    pub fn from_config(config: &Config) -> Self {
        RegionSampler::new(
            config.window_width,
            config.window_height,
            config.ratio_tolerance,
            config.sample_count,
        )
    }

    /// Returns `(width, height)` of the sampled windows.
    pub fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Draws up to `sample_count` windows and returns the accepted ones in
    /// the order they were drawn.
    ///
    /// Each draw picks `x0` then `y0` uniformly so the window lies inside the
    /// mask. An empty result is not an error; the caller decides what to do
    /// with a character nothing matched.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        mask: &BinaryMask,
        target_ratio: f64,
        rng: &mut R,
    ) -> Result<Vec<CandidateRegion>, Error> {
        let (max_x, max_y) = match (
            mask.width().checked_sub(self.width),
            mask.height().checked_sub(self.height),
        ) {
            (Some(max_x), Some(max_y)) => (max_x, max_y),
            _ => {
                return Err(Error::WindowTooLarge {
                    window_width: self.width,
                    window_height: self.height,
                    mask_width: mask.width(),
                    mask_height: mask.height(),
                })
            }
        };

        let mut accepted = Vec::new();
        for _ in 0..self.sample_count {
            let x0 = rng.gen_range(0..=max_x);
            let y0 = rng.gen_range(0..=max_y);
            // origins are drawn so the window always fits
            let Some(window) = mask.window(x0, y0, self.width, self.height) else {
                continue;
            };
            let ink_ratio = window.ink_ratio();
            if (ink_ratio - target_ratio).abs() <= self.tolerance {
                accepted.push(CandidateRegion { origin: (x0, y0), mask: window, ink_ratio });
            }
        }
        log::debug!(
            "accepted {} of {} windows (target ratio {target_ratio:.3} ± {})",
            accepted.len(),
            self.sample_count,
            self.tolerance
        );
        Ok(accepted)
    }
}
