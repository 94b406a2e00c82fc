//! The size-targeting procedure.

use tracing::debug;

use super::{
    bytes_to_kb, round_kb, EncodingRequest, EncodingResult, FitConfig, FitError, FitOutcome,
    OriginalInfo, BYTES_PER_KB,
};
use crate::decode::{decode_image, decode_image_oriented, resize, DecodedImage};
use crate::encode::encode_image;

/// Where the baseline encoding falls relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// More than the tolerance below the target: pad up.
    Under,
    /// Above the target: compress down.
    Over,
    /// At or below the target, within the tolerance band: keep as is.
    Within,
}

/// Classify a baseline size against the target.
///
/// `Under` when `baseline_kb < target_kb - tolerance_kb`, `Over` when
/// `baseline_kb > target_kb`, `Within` otherwise.
pub fn classify(baseline_kb: f64, target_kb: f64, tolerance_kb: f64) -> Decision {
    if baseline_kb < target_kb - tolerance_kb {
        Decision::Under
    } else if baseline_kb > target_kb {
        Decision::Over
    } else {
        Decision::Within
    }
}

/// Number of bytes a `target_kb` output must have.
#[inline]
pub fn target_len(target_kb: f64) -> usize {
    (target_kb * BYTES_PER_KB).floor() as usize
}

/// Append `pad_byte` until `bytes` is `floor(target_kb * 1024)` long.
///
/// Returns the buffer and the number of bytes appended. Buffers already at or
/// past the target are returned unchanged.
///
/// The padding lands after the JPEG end-of-image marker. Decoders stop at the
/// marker so the picture is unaffected, but the file is no longer a clean
/// JPEG stream end to end.
pub fn pad_to(mut bytes: Vec<u8>, target_kb: f64, pad_byte: u8) -> (Vec<u8>, usize) {
    let wanted = target_len(target_kb);
    let padding = wanted.saturating_sub(bytes.len());
    if padding > 0 {
        bytes.resize(wanted, pad_byte);
    }
    (bytes, padding)
}

/// A re-encoding that fits under the target.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub bytes: Vec<u8>,
    pub quality: u8,
}

/// Re-encode `image` at decreasing quality until it fits in `target_kb`.
///
/// Walks [`FitConfig::quality_ladder`] and returns the first encoding whose
/// size is at most `target_kb`.
///
/// # Errors
///
/// `FitError::CompressionUnattainable` if no quality on the ladder fits.
pub fn compress_to(
    image: &DecodedImage,
    target_kb: f64,
    config: &FitConfig,
) -> Result<Compressed, FitError> {
    search_ladder(image, target_kb, config.quality_ladder(), f64::INFINITY)
}

fn search_ladder(
    image: &DecodedImage,
    target_kb: f64,
    qualities: impl IntoIterator<Item = u8>,
    mut smallest_kb: f64,
) -> Result<Compressed, FitError> {
    for quality in qualities {
        let bytes = encode_image(image, quality)?;
        let size_kb = bytes_to_kb(bytes.len());
        debug!(quality, size_kb, target_kb, "compression attempt");

        if size_kb <= target_kb {
            return Ok(Compressed { bytes, quality });
        }
        smallest_kb = smallest_kb.min(size_kb);
    }

    Err(FitError::CompressionUnattainable {
        target_kb,
        smallest_kb,
    })
}

/// Resize the request's image and fit its JPEG encoding to the target size.
///
/// 1. Decode the source and measure it at the baseline quality.
/// 2. Resize to exactly `width` x `height`.
/// 3. Encode at the baseline quality and [`classify`] the result:
///    pad it, compress it, or return it as is.
///
/// # Errors
///
/// - `NoFileProvided` for an empty source
/// - `InvalidTarget` unless `target_kb` is a positive finite number
/// - `TargetTooLarge` / `DimensionsTooLarge` above the configured ceilings,
///   checked before the source is decoded
/// - `InvalidConfig` if `config` fails validation
/// - `Decode` / `Resize` / `Encode` from the underlying stages
/// - `CompressionUnattainable` when no quality fits
pub fn fit_to_target(
    request: &EncodingRequest<'_>,
    config: &FitConfig,
) -> Result<EncodingResult, FitError> {
    config.validate()?;

    if request.source.is_empty() {
        return Err(FitError::NoFileProvided);
    }
    let target_kb = request.target_kb;
    if !target_kb.is_finite() || target_kb <= 0.0 {
        return Err(FitError::InvalidTarget(target_kb));
    }
    if target_kb > config.max_target_kb {
        return Err(FitError::TargetTooLarge {
            target_kb,
            max_kb: config.max_target_kb,
        });
    }
    let output_pixels = u64::from(request.width) * u64::from(request.height);
    if output_pixels > config.max_output_pixels {
        return Err(FitError::DimensionsTooLarge {
            width: request.width,
            height: request.height,
            max_pixels: config.max_output_pixels,
        });
    }

    let decoded = if config.apply_orientation {
        decode_image_oriented(request.source)
    } else {
        decode_image(request.source)
    }
    .map_err(FitError::Decode)?;

    let original = OriginalInfo {
        width: decoded.width,
        height: decoded.height,
        size_kb: round_kb(bytes_to_kb(
            encode_image(&decoded, config.baseline_quality)?.len(),
        )),
    };

    let resized =
        resize(&decoded, request.width, request.height, config.filter).map_err(FitError::Resize)?;
    drop(decoded);

    let baseline = encode_image(&resized, config.baseline_quality)?;
    let baseline_kb = bytes_to_kb(baseline.len());
    let decision = classify(baseline_kb, target_kb, config.tolerance_kb);
    debug!(
        width = resized.width,
        height = resized.height,
        baseline_kb,
        target_kb,
        ?decision,
        "baseline encoded"
    );

    let (bytes, outcome) = match decision {
        Decision::Under => {
            let (bytes, padding) = pad_to(baseline, target_kb, config.pad_byte);
            (bytes, FitOutcome::Padded { padding })
        }
        Decision::Over => {
            // The baseline already covers the first rung of the ladder.
            let found = search_ladder(
                &resized,
                target_kb,
                config.quality_ladder().skip(1),
                baseline_kb,
            )?;
            (
                found.bytes,
                FitOutcome::Compressed {
                    quality: found.quality,
                },
            )
        }
        Decision::Within => (baseline, FitOutcome::Final),
    };

    Ok(EncodingResult {
        bytes,
        outcome,
        original,
        width: resized.width,
        height: resized.height,
    })
}

/// Stateless size-targeting service with a fixed configuration.
///
/// Holds nothing but its validated [`FitConfig`]; share it freely across
/// threads and requests.
#[derive(Debug, Clone, Default)]
pub struct SizeFitter {
    config: FitConfig,
}

impl SizeFitter {
    /// Create a fitter, validating the configuration up front.
    pub fn new(config: FitConfig) -> Result<Self, FitError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Run [`fit_to_target`] with this fitter's configuration.
    pub fn fit(&self, request: &EncodingRequest<'_>) -> Result<EncodingResult, FitError> {
        fit_to_target(request, &self.config)
    }
}

/// Resize `source` to `width` x `height` and fit it to `target_kb` using the
/// default configuration.
pub fn encode_to_target(
    source: &[u8],
    width: u32,
    height: u32,
    target_kb: f64,
) -> Result<EncodingResult, FitError> {
    fit_to_target(
        &EncodingRequest::new(source, width, height, target_kb),
        &FitConfig::default(),
    )
}
