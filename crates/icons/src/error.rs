//! Error types for icon resolution.
//!
//! These never reach the user: the resolver logs them and reports
//! "no icon".

#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("empty image data")]
    Empty,
}
