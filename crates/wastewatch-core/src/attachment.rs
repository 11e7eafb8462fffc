use crate::error::ReportError;
use crate::model::ImageAttachment;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Detect PNG or JPEG from the leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<ImageFormat> {
        if bytes.starts_with(PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(JPEG_MAGIC) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Where a report's image can be found for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLookup {
    NoImage,
    UploadFailed(String),
    Missing(PathBuf),
    Available(PathBuf),
}

/// Directory holding uploaded report photos.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store an uploaded image under a freshly generated name.
    ///
    /// Only an unsupported format is an error. A failed write is recorded as
    /// `ImageAttachment::Failed` so the submission can still go through.
    pub fn save(&self, bytes: &[u8]) -> Result<ImageAttachment, ReportError> {
        let format = ImageFormat::sniff(bytes).ok_or(ReportError::UnsupportedImage)?;
        let token = uuid::Uuid::new_v4().simple().to_string();
        let filename = format!("img_{}.{}", &token[..8], format.extension());

        let result = std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(self.dir.join(&filename), bytes));

        match result {
            Ok(()) => {
                info!(filename = %filename, bytes = bytes.len(), "stored report image");
                Ok(ImageAttachment::Stored { filename })
            }
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "could not save image");
                Ok(ImageAttachment::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Remove a stored image whose report was never written.
    pub fn discard(&self, attachment: &ImageAttachment) -> Result<(), ReportError> {
        if let ImageAttachment::Stored { filename } = attachment {
            match std::fs::remove_file(self.dir.join(filename)) {
                Ok(()) => info!(filename = %filename, "discarded report image"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub fn locate(&self, attachment: &ImageAttachment) -> ImageLookup {
        match attachment {
            ImageAttachment::None => ImageLookup::NoImage,
            ImageAttachment::Failed { reason } => ImageLookup::UploadFailed(reason.clone()),
            ImageAttachment::Stored { filename } => {
                let path = self.dir.join(filename);
                if path.is_file() {
                    ImageLookup::Available(path)
                } else {
                    ImageLookup::Missing(path)
                }
            }
        }
    }
}
