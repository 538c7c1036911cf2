//! Download naming and writing a generated thumbnail to disk.

use crate::thumbforge::error::ThumbForgeError;
use crate::thumbforge::gateway::GeneratedThumbnail;
use crate::thumbforge::types::AspectRatio;
use std::path::{Path, PathBuf};

/// Characters of the title kept in the file name.
pub const TITLE_SLICE_CHARS: usize = 10;

/// Suggested download name: `thumbnail-<ratio>-<first 10 chars of title>.png`.
///
/// ```rust
/// use thumbforge::export::download_name;
/// use thumbforge::AspectRatio;
///
/// assert_eq!(
///     download_name(AspectRatio::Portrait, "Rahasia Nasi Goreng"),
///     "thumbnail-9:16-Rahasia Na.png"
/// );
/// ```
pub fn download_name(ratio: AspectRatio, title: &str) -> String {
    let slice: String = title.chars().take(TITLE_SLICE_CHARS).collect();
    format!("thumbnail-{}-{}.png", ratio.as_str(), slice)
}

/// Replace characters most filesystems reject.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Decode `thumbnail` and write it into `dir` under its (sanitized) download name.
pub async fn save_thumbnail(
    dir: impl AsRef<Path>,
    thumbnail: &GeneratedThumbnail,
    ratio: AspectRatio,
    title: &str,
) -> Result<PathBuf, ThumbForgeError> {
    let bytes = thumbnail.decode()?;
    let path = dir
        .as_ref()
        .join(sanitize_file_name(&download_name(ratio, title)));
    tokio::fs::write(&path, &bytes).await?;
    log::info!("saved {} byte thumbnail to {}", bytes.len(), path.display());
    Ok(path)
}
