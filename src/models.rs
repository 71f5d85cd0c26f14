use crate::constants::PDF_CONTENT_TYPE;
use bytes::Bytes;
use serde::Serialize;

/// One row of the bulletin index table.
///
/// Fields are the trimmed text of fixed column positions; `file_url` is the raw
/// `href` of the anchor in the file column, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletinRow {
    pub bulletin_type: String,
    pub sector: String,
    pub file_url: Option<String>,
}

/// Rows of the index table in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletinListing {
    pub rows: Vec<BulletinRow>,
}

impl BulletinListing {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Absolute URL of the selected bulletin PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBulletin {
    pub url: String,
}

impl ResolvedBulletin {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Display for ResolvedBulletin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

/// A bulletin fetched through the download proxy.
#[derive(Debug, Clone)]
pub struct PdfDownload {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl PdfDownload {
    pub fn new(filename: String, bytes: Bytes) -> Self {
        Self {
            filename,
            content_type: PDF_CONTENT_TYPE,
            bytes,
        }
    }

    /// `Content-Disposition` value that makes browsers save the file.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}
