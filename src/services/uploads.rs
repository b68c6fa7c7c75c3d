use std::path::Path;

/// Image extensions accepted for product uploads (compared lowercase).
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// True when the text after the last `.` is an allowed image extension.
pub fn allowed_image(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Reduce a client-supplied filename to something safe to store on disk.
///
/// Path separators and whitespace runs become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped, and leading/trailing `.`/`_` are trimmed, so
/// the result never names a parent directory or a hidden file. Can return an
/// empty string.
pub fn sanitize_filename(filename: &str) -> String {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

pub async fn ensure_upload_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}

/// Write `bytes` as `dir/filename`, replacing any existing file of that name.
pub async fn store_image(dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
    ensure_upload_dir(dir).await?;
    tokio::fs::write(dir.join(filename), bytes).await
}

/// Best-effort removal; failures are logged and swallowed.
pub async fn remove_image(dir: &Path, filename: &str) {
    let path = dir.join(filename);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => tracing::debug!("Removed image {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not delete image file {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_image_extensions() {
        assert!(allowed_image("mug.png"));
        assert!(allowed_image("MUG.JPEG"));
        assert!(allowed_image("archive.tar.webp"));
        assert!(!allowed_image("mug.gif"));
        assert!(!allowed_image("png"));
        assert!(!allowed_image("mug."));
    }

    #[test]
    fn sanitizes_traversal_and_whitespace() {
        assert_eq!(sanitize_filename("My cool  mug.png"), "My_cool_mug.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("C:\\photos\\mug.jpg"), "C_photos_mug.jpg");
        assert_eq!(sanitize_filename(".hidden.png"), "hidden.png");
        assert_eq!(sanitize_filename("caf\u{e9}.png"), "caf.png");
        assert_eq!(sanitize_filename("..."), "");
    }

    #[tokio::test]
    async fn stores_and_removes_images() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads");

        store_image(&nested, "mug.png", b"png-bytes").await.unwrap();
        assert_eq!(tokio::fs::read(nested.join("mug.png")).await.unwrap(), b"png-bytes");

        remove_image(&nested, "mug.png").await;
        assert!(!nested.join("mug.png").exists());

        // Missing files are not an error.
        remove_image(&nested, "mug.png").await;
    }
}
