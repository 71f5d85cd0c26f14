use crate::config::ResolvedConfig;
use crate::constants::{MSG_DOWNLOAD_FAILED, MSG_INVALID_URL};
use crate::downloader::fetcher::PageFetcher;
use crate::errors::{AppError, AppResult};
use crate::models::PdfDownload;
use crate::utils::{mb_from_bytes, round_two_decimals};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Rejects any URL that does not literally start with `allowed_prefix`.
///
/// This is a plain, case-sensitive prefix check on the raw string. No URL
/// normalization happens, so `https://PORTALTRAMITES...` or a matching host with
/// a different path are both rejected.
pub fn validate_download_url(url: &str, allowed_prefix: &str) -> AppResult<()> {
    if url.is_empty() || allowed_prefix.is_empty() || !url.starts_with(allowed_prefix) {
        return Err(AppError::ValidationError(MSG_INVALID_URL.to_string()));
    }
    Ok(())
}

/// Derives the attachment filename from the last path segment of `url`.
///
/// Query string and fragment are dropped. Characters that cannot appear inside a
/// quoted `Content-Disposition` filename (quotes, backslashes, control and
/// non-ASCII characters) become `_`. Falls back to `default` when nothing usable
/// is left, including the `.` and `..` path components.
pub fn derive_filename(url: &str, default: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();

    let sanitized: String = segment
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    if sanitized.trim().is_empty() || sanitized == "." || sanitized == ".." {
        default.to_string()
    } else {
        sanitized
    }
}

/// Fetches a bulletin PDF through the allow-listed proxy.
///
/// Validation happens before any network access. The whole body is buffered and
/// returned with a fixed `application/pdf` content type.
///
/// # Errors
///
/// - `ValidationError` if `url` is not under the configured prefix (no request is made)
/// - `UpstreamError` if the origin answers with a non-2xx status
/// - `InternalError` if the request itself fails (connect error, timeout)
pub async fn download_bulletin(
    fetcher: &dyn PageFetcher,
    url: &str,
    config: &ResolvedConfig,
) -> AppResult<PdfDownload> {
    validate_download_url(url, &config.allowed_prefix).map_err(|e| {
        warn!(url = url, "Rejected download outside the allowed prefix");
        e
    })?;

    let response = fetcher.get(url).await.map_err(|e| {
        warn!(url = url, error = %e, "Bulletin download failed");
        AppError::InternalError(e.message().to_string())
    })?;

    if !response.is_success() {
        warn!(url = url, status = response.status, "Bulletin origin returned an error status");
        return Err(AppError::UpstreamError(MSG_DOWNLOAD_FAILED.to_string()));
    }

    let filename = derive_filename(url, &config.default_filename);
    info!(
        filename = %filename,
        size_mb = round_two_decimals(mb_from_bytes(response.body.len() as u64)),
        "Bulletin downloaded"
    );

    Ok(PdfDownload::new(filename, response.body))
}

/// Writes a downloaded bulletin into `dir`.
///
/// The file is written to a temporary `.part` file first and atomically renamed
/// when complete, so an interrupted write never leaves a truncated PDF behind.
/// The directory is created if it does not exist.
pub async fn save_download(download: &PdfDownload, dir: &Path) -> AppResult<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::IoError(format!("Failed to create directory: {e}")))?;
    }

    let file_path = dir.join(&download.filename);
    let tmp_path = dir.join(format!("{}.part", download.filename));

    // Remove stale tmp file if present (best-effort)
    if tmp_path.exists() {
        if let Err(e) = fs::remove_file(&tmp_path).await {
            warn!(
                file_path = %tmp_path.display(),
                error = %e,
                "Failed to remove stale temp file"
            );
        }
    }

    let mut file = File::create(&tmp_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create temp file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;

    file.write_all(&download.bytes).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to write to temp file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;
    file.flush().await?;

    // Ensure the file is closed before renaming
    drop(file);

    fs::rename(&tmp_path, &file_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to rename temp file {} to {}: {}",
            tmp_path.display(),
            file_path.display(),
            e
        ))
    })?;

    debug!(file_path = %file_path.display(), "Bulletin saved");
    Ok(file_path)
}
