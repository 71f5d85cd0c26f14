use crate::config::ResolvedConfig;
use crate::constants::{
    ANCHOR_SELECTOR, BULLETIN_SECTOR, BULLETIN_TYPE, CELL_SELECTOR, FILE_COLUMN, MIN_ROW_CELLS,
    MSG_BULLETIN_NOT_FOUND, MSG_INDEX_UNREACHABLE, PDF_SUFFIX, ROW_SELECTOR, SECTOR_COLUMN,
    TYPE_COLUMN,
};
use crate::downloader::fetcher::PageFetcher;
use crate::errors::{AppError, AppResult};
use crate::models::{BulletinListing, BulletinRow, ResolvedBulletin};
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, info, warn};
use url::Url;

/// Cached CSS selectors for the index table.
/// Compiled once at initialization for performance.
static ROW_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static CELL_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static ANCHOR_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

fn cached(cell: &'static OnceLock<Selector>, css: &'static str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("table selectors are valid CSS"))
}

/// Fetches the bulletin index page and returns the latest Boletín de Marcas PDF.
///
/// Issues a single GET to `config.index_url`, parses the table and returns the
/// first row (document order) that is a trademark bulletin with a `.pdf` link.
/// The portal lists the most recent bulletin first; that order is trusted as-is.
///
/// # Errors
///
/// - `FetchError` if the request fails or the page answers with a non-2xx status
/// - `NotFoundError` if no row satisfies the selection predicate
/// - `UrlError` if the configured base URL or the selected link is not a valid URL
pub async fn fetch_latest_bulletin(
    fetcher: &dyn PageFetcher,
    config: &ResolvedConfig,
) -> AppResult<ResolvedBulletin> {
    info!(index_url = %config.index_url, "Fetching bulletin index");

    let response = fetcher.get(&config.index_url).await.map_err(|e| {
        warn!(error = %e, "Bulletin index request failed");
        AppError::FetchError(MSG_INDEX_UNREACHABLE.to_string())
    })?;

    if !response.is_success() {
        warn!(status = response.status, "Bulletin index returned an error status");
        return Err(AppError::FetchError(MSG_INDEX_UNREACHABLE.to_string()));
    }

    let html = String::from_utf8_lossy(&response.body);
    let listing = parse_bulletin_listing(&html);
    debug!(rows = listing.len(), "Parsed bulletin index");

    let resolved = select_latest(&listing, &config.base_url)?;
    info!(url = %resolved, "Latest bulletin resolved");
    Ok(resolved)
}

/// Parses the index page into its table rows.
///
/// Every `<tr>` inside a `<table>` is considered. Rows with fewer than six `<td>`
/// cells (headers, spacers) are skipped. Text is trimmed; the file link is the
/// `href` of the first anchor in the fifth cell.
pub fn parse_bulletin_listing(html: &str) -> BulletinListing {
    let document = Html::parse_document(html);
    let row_selector = cached(&ROW_SELECTOR_CACHED, ROW_SELECTOR);
    let cell_selector = cached(&CELL_SELECTOR_CACHED, CELL_SELECTOR);

    let rows = document
        .select(row_selector)
        .filter_map(|row| {
            let cells: Vec<ElementRef> = row.select(cell_selector).collect();
            if cells.len() < MIN_ROW_CELLS {
                return None;
            }
            Some(BulletinRow {
                bulletin_type: cell_text(&cells[TYPE_COLUMN]),
                sector: cell_text(&cells[SECTOR_COLUMN]),
                file_url: cell_link(&cells[FILE_COLUMN]),
            })
        })
        .collect();

    BulletinListing { rows }
}

/// Picks the first trademark bulletin row with a PDF link.
///
/// The `.pdf` check is a literal, case-sensitive suffix match on the raw `href`;
/// links carrying a query string or an uppercase extension do not qualify.
/// Relative links are joined onto `base_url`, absolute links are kept. A
/// protocol-relative link (`//host/x.pdf`) keeps its own host; the download
/// allow-list is what keeps such a link from being fetched.
pub fn select_latest(listing: &BulletinListing, base_url: &str) -> AppResult<ResolvedBulletin> {
    let href = listing
        .rows
        .iter()
        .filter(|row| row.is_trademark_pdf())
        .find_map(|row| row.file_url.as_deref())
        .ok_or_else(|| AppError::NotFoundError(MSG_BULLETIN_NOT_FOUND.to_string()))?;

    let base = Url::parse(base_url)?;
    let url = base.join(href)?;

    Ok(ResolvedBulletin {
        url: url.to_string(),
    })
}

impl BulletinRow {
    fn is_trademark_pdf(&self) -> bool {
        self.bulletin_type == BULLETIN_TYPE
            && self.sector == BULLETIN_SECTOR
            && self
                .file_url
                .as_deref()
                .is_some_and(|href| href.ends_with(PDF_SUFFIX))
    }
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn cell_link(cell: &ElementRef) -> Option<String> {
    let anchor_selector = cached(&ANCHOR_SELECTOR_CACHED, ANCHOR_SELECTOR);
    cell.select(anchor_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://portaltramites.inpi.gob.ar";

    fn row(tipo: &str, sector: &str, href: Option<&str>) -> String {
        let link = href
            .map(|h| format!(r#"<a href="{h}">Descargar</a>"#))
            .unwrap_or_default();
        format!(
            "<tr><td>5210</td><td> {tipo} </td><td>\n{sector}\n</td><td>02/01/2024</td><td>{link}</td><td>PDF</td></tr>"
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body><table><tr><th>N°</th><th>Tipo</th></tr>{}</table></body></html>",
            rows.concat()
        )
    }

    #[test]
    fn test_parse_listing_extracts_trimmed_columns() {
        let html = page(&[row("Boletines", "Marcas", Some(" /Uploads/Boletines/BM_5210.pdf "))]);
        let listing = parse_bulletin_listing(&html);

        assert_eq!(listing.len(), 1);
        assert_eq!(
            listing.rows[0],
            BulletinRow {
                bulletin_type: "Boletines".to_string(),
                sector: "Marcas".to_string(),
                file_url: Some("/Uploads/Boletines/BM_5210.pdf".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_listing_skips_short_rows() {
        let html = page(&[
            "<tr><td>Boletines</td><td>Marcas</td></tr>".to_string(),
            "<tr><td colspan=\"6\">&nbsp;</td></tr>".to_string(),
            row("Boletines", "Marcas", Some("/ok.pdf")),
        ]);
        let listing = parse_bulletin_listing(&html);
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.rows[0].file_url.as_deref(), Some("/ok.pdf"));
    }

    #[test]
    fn test_parse_listing_row_without_anchor_has_no_link() {
        let html = page(&[row("Boletines", "Marcas", None)]);
        let listing = parse_bulletin_listing(&html);
        assert_eq!(listing.rows[0].file_url, None);
    }

    #[test]
    fn test_select_latest_first_match_wins() {
        let html = page(&[
            row("Otros", "Marcas", Some("/a.pdf")),
            row("Boletines", "Patentes", Some("/b.pdf")),
            row("Boletines", "Marcas", Some("/c.pdf")),
            row("Boletines", "Marcas", Some("/d.pdf")),
        ]);
        let resolved = select_latest(&parse_bulletin_listing(&html), BASE).unwrap();
        assert_eq!(resolved.url, "https://portaltramites.inpi.gob.ar/c.pdf");
    }

    #[test]
    fn test_select_latest_keeps_absolute_links() {
        let html = page(&[row(
            "Boletines",
            "Marcas",
            Some("https://cdn.example.org/Uploads/Boletines/x.pdf"),
        )]);
        let resolved = select_latest(&parse_bulletin_listing(&html), BASE).unwrap();
        assert_eq!(resolved.url, "https://cdn.example.org/Uploads/Boletines/x.pdf");
    }

    #[test]
    fn test_select_latest_protocol_relative_link_keeps_its_host() {
        let html = page(&[row("Boletines", "Marcas", Some("//other.host/x.pdf"))]);
        let resolved = select_latest(&parse_bulletin_listing(&html), BASE).unwrap();
        assert_eq!(resolved.url, "https://other.host/x.pdf");

        let prefix = crate::constants::ALLOWED_DOWNLOAD_PREFIX;
        assert!(matches!(
            crate::downloader::validate_download_url(resolved.as_str(), prefix),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_select_latest_suffix_is_case_sensitive() {
        let html = page(&[
            row("Boletines", "Marcas", Some("/upper.PDF")),
            row("Boletines", "Marcas", Some("/query.pdf?v=2")),
        ]);
        let result = select_latest(&parse_bulletin_listing(&html), BASE);
        assert!(matches!(result, Err(AppError::NotFoundError(_))));
    }

    #[test]
    fn test_select_latest_skips_rows_without_link() {
        let html = page(&[
            row("Boletines", "Marcas", None),
            row("Boletines", "Marcas", Some("/later.pdf")),
        ]);
        let resolved = select_latest(&parse_bulletin_listing(&html), BASE).unwrap();
        assert_eq!(resolved.url, "https://portaltramites.inpi.gob.ar/later.pdf");
    }

    #[test]
    fn test_select_latest_empty_listing_is_not_found() {
        let result = select_latest(&BulletinListing::default(), BASE);
        match result {
            Err(AppError::NotFoundError(msg)) => assert_eq!(msg, MSG_BULLETIN_NOT_FOUND),
            other => panic!("expected NotFoundError, got {other:?}"),
        }
    }
}
