//! Command line and environment configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use kbfit_core::target::{DEFAULT_MAX_OUTPUT_PIXELS, DEFAULT_MAX_TARGET_KB};
use kbfit_core::FitConfig;

/// Default upload body limit (25 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Default `RUST_LOG` directive when none is set.
pub const DEFAULT_LOG_FILTER: &str = "kbfit_server=info,kbfit_core=info";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "kbfit-server",
    version,
    about = "Resize uploaded images and fit them to a target file size"
)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "KBFIT_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 10000)]
    pub port: u16,

    /// Maximum accepted request body in bytes
    #[arg(long, env = "KBFIT_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Largest accepted target_kb; bounds the padded output size
    #[arg(long, env = "KBFIT_MAX_TARGET_KB", default_value_t = DEFAULT_MAX_TARGET_KB)]
    pub max_target_kb: f64,

    /// Largest accepted width * height of the output
    #[arg(long, env = "KBFIT_MAX_OUTPUT_PIXELS", default_value_t = DEFAULT_MAX_OUTPUT_PIXELS)]
    pub max_output_pixels: u64,

    /// JPEG quality of the baseline encoding
    #[arg(long, env = "KBFIT_BASELINE_QUALITY", default_value_t = 95,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub baseline_quality: u8,

    /// Quality decrement between compression attempts
    #[arg(long, env = "KBFIT_QUALITY_STEP", default_value_t = 5,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality_step: u8,

    /// Qualities at or below this are never tried
    #[arg(long, env = "KBFIT_MIN_QUALITY", default_value_t = 5)]
    pub min_quality: u8,

    /// Band below the target (KB) in which the baseline is returned as is
    #[arg(long, env = "KBFIT_TOLERANCE_KB", default_value_t = 2.0)]
    pub tolerance_kb: f64,

    /// Apply EXIF orientation before resizing
    #[arg(long, env = "KBFIT_APPLY_ORIENTATION")]
    pub apply_orientation: bool,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Size-targeting parameters assembled from the flags.
    pub fn fit_config(&self) -> FitConfig {
        FitConfig {
            baseline_quality: self.baseline_quality,
            quality_step: self.quality_step,
            min_quality: self.min_quality,
            tolerance_kb: self.tolerance_kb,
            apply_orientation: self.apply_orientation,
            max_target_kb: self.max_target_kb,
            max_output_pixels: self.max_output_pixels,
            ..FitConfig::default()
        }
    }
}
