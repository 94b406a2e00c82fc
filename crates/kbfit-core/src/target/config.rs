//! Tunables for the size-targeting procedure.

use serde::{Deserialize, Serialize};

use super::FitError;
use crate::decode::FilterType;
use crate::encode::MAX_QUALITY;

/// Default ceiling on `target_kb` (50 MiB of output).
pub const DEFAULT_MAX_TARGET_KB: f64 = 50.0 * 1024.0;

/// Default ceiling on output pixels (50 megapixels).
pub const DEFAULT_MAX_OUTPUT_PIXELS: u64 = 50_000_000;

/// Parameters of the size-targeting procedure.
///
/// The defaults reproduce the reference behavior: baseline at quality 95,
/// step down by 5 while quality stays above 5, and a 2 KB band below the
/// target inside which the baseline is accepted untouched.
///
/// `max_target_kb` and `max_output_pixels` bound what a single request may
/// allocate; requests above them are rejected before any decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Quality used for the baseline encoding and the original-size measurement.
    pub baseline_quality: u8,
    /// Quality decrement between compression attempts.
    pub quality_step: u8,
    /// Exclusive floor: only qualities strictly above this are tried.
    pub min_quality: u8,
    /// Width of the band below the target that counts as "close enough" (KB).
    pub tolerance_kb: f64,
    /// Filler byte appended when padding up to the target.
    pub pad_byte: u8,
    /// Resampling filter for the resize step.
    pub filter: FilterType,
    /// Rotate/flip according to EXIF orientation before resizing.
    pub apply_orientation: bool,
    /// Largest accepted target size (KB). Padding allocates up to this much.
    pub max_target_kb: f64,
    /// Largest accepted `width * height` of the output.
    pub max_output_pixels: u64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            baseline_quality: 95,
            quality_step: 5,
            min_quality: 5,
            tolerance_kb: 2.0,
            pad_byte: 0x00,
            filter: FilterType::Lanczos3,
            apply_orientation: false,
            max_target_kb: DEFAULT_MAX_TARGET_KB,
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
        }
    }
}

impl FitConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject configurations the search cannot run with.
    pub fn validate(&self) -> Result<(), FitError> {
        if self.baseline_quality == 0 || self.baseline_quality > MAX_QUALITY {
            return Err(FitError::InvalidConfig(format!(
                "baseline_quality must be in 1..={MAX_QUALITY}, got {}",
                self.baseline_quality
            )));
        }
        if self.quality_step == 0 {
            return Err(FitError::InvalidConfig(
                "quality_step must be at least 1".to_string(),
            ));
        }
        if !self.tolerance_kb.is_finite() || self.tolerance_kb < 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "tolerance_kb must be a non-negative number, got {}",
                self.tolerance_kb
            )));
        }
        if !self.max_target_kb.is_finite() || self.max_target_kb <= 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "max_target_kb must be a positive number, got {}",
                self.max_target_kb
            )));
        }
        if self.max_output_pixels == 0 {
            return Err(FitError::InvalidConfig(
                "max_output_pixels must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Quality levels tried by the compression search, highest first.
    ///
    /// Starts at `baseline_quality` and steps down by `quality_step`, stopping
    /// before reaching `min_quality`. With the defaults: 95, 90, ..., 10.
    pub fn quality_ladder(&self) -> impl Iterator<Item = u8> {
        let step = self.quality_step.max(1);
        let floor = self.min_quality;
        std::iter::successors(Some(self.baseline_quality), move |q| q.checked_sub(step))
            .take_while(move |q| *q > floor)
    }
}
