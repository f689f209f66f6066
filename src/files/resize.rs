use std::{
    fmt,
    path::{Path, PathBuf},
};

use image::{imageops::FilterType, DynamicImage, ImageReader};
use log::{debug, info};

use crate::error::{Error, Result};

/// One image processed by [`PendingResize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    pub original: (u32, u32),
    pub resized: (u32, u32),
    pub output: PathBuf,
}

impl fmt::Display for ImageRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}x{} -> {}x{})",
            self.path.display(),
            self.original.0,
            self.original.1,
            self.resized.0,
            self.resized.1
        )
    }
}

/// Smallest power of two that is >= `value`, or `None` if it does not fit in a `u32`.
///
/// Zero maps to one.
pub fn nearest_power_of_two(value: u32) -> Option<u32> {
    value.checked_next_power_of_two()
}

/// `dir/name.ext` becomes `dir/name_{width}x{height}.ext`.
pub fn output_path(path: &Path, width: u32, height: u32) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{width}x{height}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{width}x{height}"),
    };
    path.with_file_name(name)
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let decode_err = |source: image::ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(|err| decode_err(err.into()))?
        .with_guessed_format()
        .map_err(|err| decode_err(err.into()))?
        .decode()
        .map_err(decode_err)
}

/// A decoded image whose target size is known but which has not been written yet.
pub struct PendingResize {
    pixels: DynamicImage,
    record: ImageRecord,
}

impl PendingResize {
    /// Decodes `path` and works out its power-of-two size and output path.
    pub fn open(path: &Path) -> Result<Self> {
        let pixels = decode(path)?;
        let (width, height) = (pixels.width(), pixels.height());
        let (new_width, new_height) =
            match (nearest_power_of_two(width), nearest_power_of_two(height)) {
                (Some(w), Some(h)) => (w, h),
                _ => {
                    return Err(Error::DimensionTooLarge {
                        path: path.to_path_buf(),
                        width,
                        height,
                    })
                }
            };

        Ok(Self {
            pixels,
            record: ImageRecord {
                path: path.to_path_buf(),
                original: (width, height),
                resized: (new_width, new_height),
                output: output_path(path, new_width, new_height),
            },
        })
    }

    pub fn record(&self) -> &ImageRecord {
        &self.record
    }

    /// Scales with Lanczos3 and writes the output file. The source is never written.
    pub fn save(self) -> Result<ImageRecord> {
        let Self { pixels, record } = self;
        let (width, height) = record.resized;
        let resized = if record.original == record.resized {
            debug!("{} already has power-of-two dimensions", record.path.display());
            pixels
        } else {
            pixels.resize_exact(width, height, FilterType::Lanczos3)
        };

        resized.save(&record.output).map_err(|source| Error::Encode {
            path: record.output.clone(),
            source,
        })?;
        info!("Wrote {}", record.output.display());
        Ok(record)
    }
}
