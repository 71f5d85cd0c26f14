//! Common test utilities for integration tests

use async_trait::async_trait;
use boletin_marcas::downloader::{FetchedResponse, PageFetcher};
use boletin_marcas::errors::{AppError, AppResult};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Canned reply for a URL.
#[allow(dead_code)]
#[derive(Clone)]
pub enum Canned {
    Response(u16, Bytes),
    NetworkFailure(String),
}

/// `PageFetcher` test double: answers from a fixed table and records every request.
///
/// Unknown URLs answer 404.
#[allow(dead_code)]
#[derive(Default)]
pub struct CannedFetcher {
    replies: HashMap<String, Canned>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, status: u16, body: impl Into<Bytes>) -> Self {
        self.replies
            .insert(url.to_string(), Canned::Response(status, body.into()));
        self
    }

    pub fn with_network_failure(mut self, url: &str, msg: &str) -> Self {
        self.replies
            .insert(url.to_string(), Canned::NetworkFailure(msg.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for CannedFetcher {
    async fn get(&self, url: &str) -> AppResult<FetchedResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());

        match self.replies.get(url) {
            Some(Canned::Response(status, body)) => Ok(FetchedResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(Canned::NetworkFailure(msg)) => Err(AppError::NetworkError(msg.clone())),
            None => Ok(FetchedResponse {
                status: 404,
                body: Bytes::new(),
            }),
        }
    }
}

/// Builds an index page shaped like the INPI bulletin table.
///
/// Each row is `(type, sector, href)`; rows get six cells with the link in the fifth.
#[allow(dead_code)]
pub fn index_page(rows: &[(&str, &str, Option<&str>)]) -> String {
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(i, (tipo, sector, href))| {
            let link = href
                .map(|h| format!(r#"<a href="{h}" target="_blank"><img src="/img/pdf.png"></a>"#))
                .unwrap_or_default();
            format!(
                "<tr>\n  <td>{}</td>\n  <td>{tipo}</td>\n  <td>{sector}</td>\n  <td>01/0{}/2024</td>\n  <td>{link}</td>\n  <td>Ver</td>\n</tr>\n",
                5200 + i,
                (i % 9) + 1
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Boletines</title></head>
<body>
  <table class="table">
    <thead><tr><th>N°</th><th>Tipo</th><th>Sector</th><th>Fecha</th><th>Archivo</th><th></th></tr></thead>
    <tbody>
{body}    </tbody>
  </table>
</body>
</html>"#
    )
}

/// Fixture from the end-to-end scenario: two decoys, then two qualifying rows.
#[allow(dead_code)]
pub fn decoy_index_page() -> String {
    index_page(&[
        ("Otros", "Marcas", Some("/a.pdf")),
        ("Boletines", "Patentes", Some("/b.pdf")),
        ("Boletines", "Marcas", Some("/c.pdf")),
        ("Boletines", "Marcas", Some("/d.pdf")),
    ])
}

#[allow(dead_code)]
pub const INDEX_URL: &str = "https://portaltramites.inpi.gob.ar/Boletines";
#[allow(dead_code)]
pub const BULLETIN_URL: &str = "https://portaltramites.inpi.gob.ar/Uploads/Boletines/BM_5210.pdf";
#[allow(dead_code)]
pub const SAMPLE_PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF\n";
