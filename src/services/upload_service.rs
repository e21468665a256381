use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{Error, Result};

/// URL prefix under which stored resumes are served back.
pub const UPLOADS_URL_PREFIX: &str = "uploads";

/// Upper bound on the sanitized part of a stored name, in bytes.
pub const MAX_SANITIZED_NAME_LEN: usize = 100;
const MAX_EXTENSION_LEN: usize = 16;

/// Writes resume uploads to disk under collision-free names.
#[derive(Clone, Debug)]
pub struct UploadService {
    dir: PathBuf,
}

impl UploadService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Stores the bytes and returns the relative URL recorded as `resumeUrl`.
    pub async fn save_resume(&self, original_name: &str, data: &bytes::Bytes) -> Result<String> {
        self.ensure_dir().await?;

        let stored_name = format!("{}-{}", uuid::Uuid::new_v4(), sanitize_file_name(original_name));
        let file_path = self.dir.join(&stored_name);

        fs::write(&file_path, data).await.map_err(|e| {
            tracing::error!("Failed to write resume file {}: {}", file_path.display(), e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        tracing::info!(file = %stored_name, bytes = data.len(), "resume stored");
        Ok(format!("{}/{}", UPLOADS_URL_PREFIX, stored_name))
    }

    /// Removes a file previously returned by [`save_resume`](Self::save_resume).
    pub async fn remove_resume(&self, resume_url: &str) {
        let Some(stored_name) = resume_url
            .strip_prefix(UPLOADS_URL_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return;
        };
        if let Err(e) = fs::remove_file(self.dir.join(stored_name)).await {
            tracing::warn!("Failed to remove orphaned resume {}: {}", stored_name, e);
        }
    }
}

/// Keeps `[A-Za-z0-9._-]`, replaces anything else with `_`. Path components are dropped
/// and long names are cut to [`MAX_SANITIZED_NAME_LEN`], keeping the extension.
pub fn sanitize_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        return "resume".to_string();
    }
    truncate_keeping_extension(cleaned)
}

// `name` is ASCII here, so byte offsets are char boundaries.
fn truncate_keeping_extension(name: String) -> String {
    if name.len() <= MAX_SANITIZED_NAME_LEN {
        return name;
    }

    let extension = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= MAX_EXTENSION_LEN => &name[dot..],
        _ => "",
    };
    let stem = &name[..MAX_SANITIZED_NAME_LEN - extension.len()];
    format!("{}{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_names() {
        assert_eq!(sanitize_file_name("Jane Roe CV.pdf"), "Jane_Roe_CV.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\cv.pdf"), "cv.pdf");
        assert_eq!(sanitize_file_name("résumé.pdf"), "r_sum_.pdf");
        assert_eq!(sanitize_file_name(""), "resume");
        assert_eq!(sanitize_file_name(".."), "resume");
    }

    #[test]
    fn long_names_are_cut_but_keep_extension() {
        let long = format!("{}.pdf", "a".repeat(240));
        let cut = sanitize_file_name(&long);
        assert_eq!(cut.len(), MAX_SANITIZED_NAME_LEN);
        assert!(cut.ends_with("a.pdf"));

        let no_extension = sanitize_file_name(&"b".repeat(300));
        assert_eq!(no_extension, "b".repeat(MAX_SANITIZED_NAME_LEN));

        assert_eq!(sanitize_file_name("short.pdf"), "short.pdf");
    }

    #[tokio::test]
    async fn saves_and_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadService::new(dir.path().join("uploads"));
        let data = bytes::Bytes::from_static(b"%PDF-1.4 test");

        let first = uploads.save_resume("cv.pdf", &data).await.unwrap();
        let second = uploads.save_resume("cv.pdf", &data).await.unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("uploads/"));
        assert!(first.ends_with("-cv.pdf"));

        let stored = uploads.dir().join(first.trim_start_matches("uploads/"));
        assert_eq!(std::fs::read(&stored).unwrap(), b"%PDF-1.4 test");

        uploads.remove_resume(&first).await;
        assert!(!stored.exists());
    }
}
