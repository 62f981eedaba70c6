#[cfg(feature = "docx")]
mod docx;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::SourceConfig;

/// Per-file extraction failure.
/// One bad file never aborts a batch.
#[derive(thiserror::Error, Debug)]
pub enum ExtractionError {
    #[error("{name}: unsupported file format `{extension}`")]
    Unsupported { name: String, extension: String },
    #[error("{name}: file is {size} bytes, limit is {limit} bytes")]
    TooLarge { name: String, size: u64, limit: u64 },
    #[error("{name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{name}: {reason}")]
    Decode { name: String, reason: String },
    #[error("{name}: no text content found")]
    NoText { name: String },
}

impl ExtractionError {
    /// Display name of the file that failed
    pub fn name(&self) -> &str {
        match self {
            ExtractionError::Unsupported { name, .. }
            | ExtractionError::TooLarge { name, .. }
            | ExtractionError::Io { name, .. }
            | ExtractionError::Decode { name, .. }
            | ExtractionError::NoText { name } => name,
        }
    }
}

/// Raw text of one input document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// file name, used as the candidate identifier
    pub name: String,
    pub text: String,
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Txt,
    Pdf,
    Docx,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(FileFormat::Txt),
            "pdf" => Some(FileFormat::Pdf),
            "docx" => Some(FileFormat::Docx),
            _ => None,
        }
    }
}

/// Something that turns a path into raw document text
pub trait DocumentSource {
    fn load(&self, path: &Path) -> Result<Document, ExtractionError>;

    /// Load every path, keeping successes and failures apart in input order.
    fn load_all<P>(&self, paths: &[P]) -> (Vec<Document>, Vec<ExtractionError>)
    where
        P: AsRef<Path>,
    {
        let mut docs = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();
        for path in paths {
            match self.load(path.as_ref()) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    warn!(error = %e, "skipping document");
                    failures.push(e);
                }
            }
        }
        (docs, failures)
    }
}

/// Reads `.txt`, `.pdf` and `.docx` files from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    max_bytes: u64,
}

impl Default for FileSource {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

impl FileSource {
    pub fn new(config: &SourceConfig) -> Self {
        Self { max_bytes: config.max_file_size_mb.saturating_mul(1024 * 1024) }
    }

    pub fn with_max_bytes(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    #[inline]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }
}

impl DocumentSource for FileSource {
    fn load(&self, path: &Path) -> Result<Document, ExtractionError> {
        let name = display_name(path);
        let format = FileFormat::from_path(path).ok_or_else(|| ExtractionError::Unsupported {
            name: name.clone(),
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })?;

        let io_err = |source| ExtractionError::Io { name: name.clone(), source };
        let size = std::fs::metadata(path).map_err(io_err)?.len();
        if size > self.max_bytes {
            return Err(ExtractionError::TooLarge { name: name.clone(), size, limit: self.max_bytes });
        }
        let bytes = std::fs::read(path).map_err(io_err)?;

        let text = match format {
            FileFormat::Txt => decode_text(&bytes),
            FileFormat::Pdf => pdf_text(&bytes).map_err(|reason| ExtractionError::Decode { name: name.clone(), reason })?,
            FileFormat::Docx => docx_text(&bytes).map_err(|reason| ExtractionError::Decode { name: name.clone(), reason })?,
        };
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ExtractionError::NoText { name });
        }
        debug!(name = %name, ?format, chars = text.chars().count(), "document loaded");
        Ok(Document { name, text })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// UTF-8 first, Windows-1252 otherwise.
/// cp1252 はどのバイト列でも復号できるので失敗しない
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.trim_start_matches('\u{feff}').to_string(),
        Err(_) => {
            let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

#[cfg(feature = "pdf")]
fn pdf_text(bytes: &[u8]) -> Result<String, String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
}

#[cfg(not(feature = "pdf"))]
fn pdf_text(_bytes: &[u8]) -> Result<String, String> {
    Err("built without pdf support".to_string())
}

#[cfg(feature = "docx")]
fn docx_text(bytes: &[u8]) -> Result<String, String> {
    docx::extract_text(bytes)
}

#[cfg(not(feature = "docx"))]
fn docx_text(_bytes: &[u8]) -> Result<String, String> {
    Err("built without docx support".to_string())
}

/// Paths collected from a directory, sorted, supported formats only
pub fn collect_supported(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && FileFormat::from_path(p).is_some())
        .collect();
    paths.sort();
    Ok(paths)
}
