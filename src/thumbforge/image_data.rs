//! Local image ingestion and the data-URI representation used for every image in the crate.
//!
//! A picked file is validated against [`MAX_UPLOAD_BYTES`] before a single byte is read,
//! then base64-encoded into an [`EncodedImage`] that remembers its mime type.
//!
//! ```rust
//! use thumbforge::image_data::{ingest_file, InMemoryFile};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = InMemoryFile::new("face.png", "image/png", vec![0x89, b'P', b'N', b'G']);
//! let image = ingest_file(&file).await?;
//! assert!(image.to_data_uri().starts_with("data:image/png;base64,"));
//! assert_eq!(image.decode()?, vec![0x89, b'P', b'N', b'G']);
//! # Ok(())
//! # }
//! ```

use crate::thumbforge::error::{ThumbForgeError, ValidationError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, warn};
use std::fmt;
use std::path::{Path, PathBuf};

/// Largest file accepted for upload: 5 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Mime type used when neither the picker nor the bytes identify the file.
pub const FALLBACK_MIME: &str = "application/octet-stream";

const BASE64_MARKER: &str = ";base64,";

/// An image held in memory as mime type + base64 payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    payload: String,
}

impl EncodedImage {
    /// Encode raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: STANDARD.encode(bytes),
        }
    }

    /// Wrap a payload that is already base64.
    pub fn from_base64(mime_type: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: payload.into(),
        }
    }

    /// Parse `data:<mime>;base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self, ValidationError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(ValidationError::InvalidDataUri)?;
        let marker = rest
            .find(BASE64_MARKER)
            .ok_or(ValidationError::InvalidDataUri)?;
        let mime_type = &rest[..marker];
        if mime_type.is_empty() {
            return Err(ValidationError::InvalidDataUri);
        }
        Ok(Self::from_base64(
            mime_type,
            &rest[marker + BASE64_MARKER.len()..],
        ))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload without the `data:` prefix.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{}{}{}", self.mime_type, BASE64_MARKER, self.payload)
    }

    /// Decode the payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ValidationError> {
        STANDARD
            .decode(self.payload.as_bytes())
            .map_err(|_| ValidationError::InvalidDataUri)
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{}{}{}", self.mime_type, BASE64_MARKER, self.payload)
    }
}

/// Remove a leading `data:<mime>;base64,` header. Strings without one are returned as is.
pub fn strip_data_uri_prefix(input: &str) -> &str {
    match input.strip_prefix("data:") {
        Some(rest) => match rest.find(BASE64_MARKER) {
            Some(idx) => &rest[idx + BASE64_MARKER.len()..],
            None => input,
        },
        None => input,
    }
}

/// Guess an image mime type from its leading magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// Map a file extension to an image mime type.
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "avif" => Some("image/avif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// A file handed over by a picker: declared metadata plus lazily readable bytes.
#[async_trait]
pub trait ImageSource: Send + Sync {
    fn name(&self) -> &str;

    /// Declared mime type; may be empty or generic when the picker could not tell.
    fn mime_type(&self) -> &str;

    /// Declared size in bytes, known before reading.
    fn size(&self) -> u64;

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>>;
}

/// A file whose bytes are already in memory.
#[derive(Clone, Debug)]
pub struct InMemoryFile {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

#[async_trait]
impl ImageSource for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// A file on local disk. Size comes from metadata, so oversized files are never read.
#[derive(Clone, Debug)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    mime_type: String,
    size: u64,
}

impl LocalFile {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ThumbForgeError> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(ThumbForgeError::Io(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_from_extension(&path).unwrap_or("").to_string();
        Ok(Self {
            path,
            name,
            mime_type,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ImageSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

fn too_large(size: u64) -> ThumbForgeError {
    ThumbForgeError::Validation(ValidationError::FileTooLarge {
        size,
        limit: MAX_UPLOAD_BYTES,
    })
}

/// Validate and encode a picked file.
///
/// Fails with [`ValidationError::FileTooLarge`] before reading when the declared size is
/// over [`MAX_UPLOAD_BYTES`]; every smaller file is accepted. The mime type is the declared
/// one when it is `image/*`, otherwise it is sniffed from the bytes, then the declared one
/// again, then [`FALLBACK_MIME`].
pub async fn ingest_file(source: &dyn ImageSource) -> Result<EncodedImage, ThumbForgeError> {
    if source.size() > MAX_UPLOAD_BYTES {
        warn!(
            "rejecting '{}': {} bytes exceeds the {} byte upload limit",
            source.name(),
            source.size(),
            MAX_UPLOAD_BYTES
        );
        return Err(too_large(source.size()));
    }

    let bytes = source.read_bytes().await?;
    // the declared size may be stale
    if bytes.len() as u64 > MAX_UPLOAD_BYTES {
        return Err(too_large(bytes.len() as u64));
    }

    let declared = source.mime_type().trim();
    let mime_type = if declared.starts_with("image/") {
        declared
    } else if let Some(sniffed) = sniff_mime(&bytes) {
        sniffed
    } else if !declared.is_empty() {
        declared
    } else {
        debug!("no mime type known for '{}'", source.name());
        FALLBACK_MIME
    };

    debug!(
        "ingested '{}' ({} bytes, {})",
        source.name(),
        bytes.len(),
        mime_type
    );
    Ok(EncodedImage::from_bytes(mime_type, &bytes))
}
