// Data source URLs
pub const BOLETINES_INDEX_URL: &str = "https://portaltramites.inpi.gob.ar/Boletines";
pub const INPI_BASE_URL: &str = "https://portaltramites.inpi.gob.ar";
pub const ALLOWED_DOWNLOAD_PREFIX: &str = "https://portaltramites.inpi.gob.ar/Uploads/Boletines/";

// Index table layout
pub const ROW_SELECTOR: &str = "table tr";
pub const CELL_SELECTOR: &str = "td";
pub const ANCHOR_SELECTOR: &str = "a";
pub const MIN_ROW_CELLS: usize = 6;
pub const TYPE_COLUMN: usize = 1;
pub const SECTOR_COLUMN: usize = 2;
pub const FILE_COLUMN: usize = 4;

// Selection predicate
pub const BULLETIN_TYPE: &str = "Boletines";
pub const BULLETIN_SECTOR: &str = "Marcas";
pub const PDF_SUFFIX: &str = ".pdf";

// Download proxy
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DEFAULT_FILENAME: &str = "boletin.pdf";

// User-facing error messages (returned verbatim in JSON error bodies)
pub const MSG_INDEX_UNREACHABLE: &str = "No se pudo acceder a la página de boletines de INPI";
pub const MSG_BULLETIN_NOT_FOUND: &str = "No se encontró el último boletín de marcas.";
pub const MSG_INVALID_URL: &str = "URL inválida o no permitida.";
pub const MSG_DOWNLOAD_FAILED: &str = "No se pudo descargar el PDF.";
