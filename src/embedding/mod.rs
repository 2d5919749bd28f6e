//! Embedding backends.
//!
//! - [`bert`] runs a sentence-transformer BERT model with candle.
//! - [`offline`] derives deterministic vectors from a text hash (no model files).
//! - [`TextEncoder`] is the seam the [`crate::cache`] layer depends on.

/// BERT sentence encoder.
pub mod bert;
/// Encoder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod encoder;
mod error;
mod factory;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Deterministic offline encoder.
pub mod offline;
/// Tokenizer loading helpers.
pub mod utils;


pub use bert::BertEncoder;
pub use config::EncoderConfig;
pub use encoder::{EncoderMode, TextEncoder};
pub use error::EmbeddingError;
pub use factory::build_encoder;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEncoder;
pub use offline::OfflineEncoder;
