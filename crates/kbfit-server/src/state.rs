use std::sync::Arc;

use kbfit_core::{FitConfig, FitError, SizeFitter};

/// Shared, immutable per-process state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub fitter: Arc<SizeFitter>,
}

impl AppState {
    pub fn new(config: FitConfig) -> Result<Self, FitError> {
        Ok(Self {
            fitter: Arc::new(SizeFitter::new(config)?),
        })
    }
}
