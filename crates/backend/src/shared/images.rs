use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use thiserror::Error;

/// Ceiling for a single uploaded image.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Faqat rasm fayllarini yuklang")]
    NotAnImage,
    #[error("Rasm hajmi juda katta. Maksimum 10MB")]
    TooLarge,
    #[error("Bir vaqtning o'zida faqat bitta rasm yuklash mumkin")]
    TooManyFiles,
    #[error("Rasm yuklashda xatolik: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores uploaded binaries under the public images directory. Filenames are
/// generated (time prefix plus random suffix), so concurrent uploads never
/// collide even without locking.
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

    /// Validates and persists one uploaded image; returns the externally
    /// addressable path under the /images prefix.
    pub async fn save(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, ImageError> {
        if !content_type.starts_with("image/") {
            return Err(ImageError::NotAnImage);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge);
        }

        let filename = format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            rand::thread_rng().gen_range(0..1_000_000_000u32),
            extension_of(original_name)
        );

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        Ok(format!("/images/{}", filename))
    }
}

fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
