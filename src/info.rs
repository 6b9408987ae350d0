//! Document information for `info` and `count`.

use lopdf::{Dictionary, Document, Object, decode_text_string};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolkitError};
use crate::io::PdfReader;
use crate::pages::page_attribute;
use crate::utils::format_file_size;

/// Facts about one PDF file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Path to the file.
    pub path: PathBuf,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of pages.
    pub page_count: u32,

    /// PDF version from the header, e.g. `1.7`.
    pub version: String,

    /// Whether the file carries an encryption dictionary.
    pub encrypted: bool,

    /// Width and height of the first page in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<(f32, f32)>,

    /// Info dictionary fields.
    pub metadata: Metadata,
}

/// Text fields of the document Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Document author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Document subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Application that created the original document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Application that produced the PDF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
}

impl Metadata {
    /// Read the Info dictionary referenced from the trailer.
    pub fn from_document(doc: &Document) -> Self {
        let Some(info) = info_dictionary(doc) else {
            return Self::default();
        };

        let field = |key: &[u8]| {
            info.get(key)
                .ok()
                .and_then(|value| decode_text_string(value).ok())
                .map(|s| s.trim_end_matches('\0').trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            title: field(b"Title"),
            author: field(b"Author"),
            subject: field(b"Subject"),
            keywords: field(b"Keywords"),
            creator: field(b"Creator"),
            producer: field(b"Producer"),
        }
    }

    /// Set fields as `(label, value)` pairs, in display order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

impl DocumentInfo {
    /// Collect information from a loaded document.
    pub fn from_document(path: &Path, doc: &Document, file_size: u64) -> Self {
        let pages = doc.get_pages();

        let page_size = pages.values().next().and_then(|&page_id| {
            let media_box = page_attribute(doc, page_id, b"MediaBox")?;
            let coords = media_box
                .as_array()
                .ok()?
                .iter()
                .map(|v| v.as_float().ok())
                .collect::<Option<Vec<f32>>>()?;
            match coords.as_slice() {
                [x0, y0, x1, y1] => Some(((x1 - x0).abs(), (y1 - y0).abs())),
                _ => None,
            }
        });

        Self {
            path: path.to_path_buf(),
            file_size,
            page_count: pages.len() as u32,
            version: doc.version.clone(),
            encrypted: doc.trailer.has(b"Encrypt"),
            page_size,
            metadata: Metadata::from_document(doc),
        }
    }

    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidArgument`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ToolkitError::invalid_argument(format!("failed to serialize document info: {e}"))
        })
    }
}

/// Load `path` and collect its [`DocumentInfo`].
///
/// Documents without pages are reported, not rejected. Encrypted documents
/// are reported only when they open with the empty user password.
pub async fn read_info(path: &Path) -> Result<DocumentInfo> {
    let loaded = PdfReader::for_inspection().load(path).await?;
    Ok(DocumentInfo::from_document(
        &loaded.path,
        &loaded.document,
        loaded.file_size,
    ))
}

/// Count the pages of `path`.
pub async fn count_pages(path: &Path) -> Result<u32> {
    let loaded = PdfReader::allow_empty().load(path).await?;
    Ok(loaded.page_count)
}
