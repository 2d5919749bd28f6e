use candle_core::Device;
#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::{info, warn};

#[cfg(not(any(feature = "metal", feature = "cuda")))]
use tracing::debug;

use super::error::EmbeddingError;

/// Selects the compute device for the BERT encoder (falls back to CPU).
#[cfg(any(feature = "metal", feature = "cuda"))]
pub fn select_device() -> Result<Device, EmbeddingError> {
    let mut failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Encoder using Metal GPU");
            return Ok(device);
        }
        Err(e) => {
            warn!(error = %e, "Metal device unavailable");
            failures.push(format!("metal failed: {e}"));
        }
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Encoder using CUDA GPU");
            return Ok(device);
        }
        Err(e) => {
            warn!(error = %e, "CUDA device unavailable");
            failures.push(format!("cuda failed: {e}"));
        }
    }

    warn!(reason = %failures.join("; "), "Falling back to CPU device");
    Ok(Device::Cpu)
}

/// Selects the compute device for the BERT encoder (CPU-only build).
#[cfg(not(any(feature = "metal", feature = "cuda")))]
pub fn select_device() -> Result<Device, EmbeddingError> {
    debug!("No GPU backend compiled, encoder runs on CPU");
    Ok(Device::Cpu)
}
