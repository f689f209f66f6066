use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid file type pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid progress template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),

    #[error("failed to open image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save image {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{}: {width}x{height} has no power-of-two size that fits in 32 bits", .path.display())]
    DimensionTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}
