//! kbfit Server - HTTP upload endpoint over kbfit-core
//!
//! `POST /` takes a multipart form with `width`, `height`, `target_kb` and an
//! `image` file and answers with the fitted JPEG. Original image metadata is
//! returned in `X-Original-*` headers on every success.

pub mod config;
pub mod error;
pub mod form;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, FormError};
pub use routes::router;
pub use state::AppState;
