//! Errors raised outside the numeric core
//!
//! Curve generation and harmony scoring are total and never fail. Everything
//! that touches configuration, the layer collection or the filesystem reports
//! problems through [`SpiroError`].

/// All the possible issues raised by configuration, layer edits and export
#[derive(Debug, thiserror::Error)]
pub enum SpiroError {
    /// (InvalidConfig) A configuration value is out of its allowed range
    #[error("(InvalidConfig) {0}")]
    InvalidConfig(String),
    /// (LayerOutOfRange) A layer index does not address an existing layer
    #[error("(LayerOutOfRange) Layer index {index} is out of range (layers.len = {len})")]
    LayerOutOfRange { index: usize, len: usize },
    /// (InvalidParameter) A value could not be interpreted, e.g. a malformed color
    #[error("(InvalidParameter) {0}")]
    InvalidParameter(String),
    /// Error bubbled up from the filesystem while exporting
    #[error("std::io::Error: {0}")]
    Io(#[from] std::io::Error),
    /// Error bubbled up from the `image` crate while encoding
    #[cfg(feature = "image-io")]
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result alias used by the fallible parts of the crate.
pub type SpiroResult<T> = Result<T, SpiroError>;
