use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PackError {
    #[error("Bin size must be positive and finite, got {width}x{height}")]
    InvalidBinSize { width: f64, height: f64 },

    #[error("Rectangle size must be positive and finite, got {width}x{height}")]
    InvalidRectSize { width: f64, height: f64 },
}
