use super::AppState;
use crate::downloader::{download_bulletin, fetch_latest_bulletin};
use crate::errors::{AppError, AppResult};
use crate::models::ResolvedBulletin;
use crate::scanner::{scan_bulletin, ScanReport};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `GET /boletin`: URL of the latest Boletín de Marcas.
pub async fn latest_bulletin_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ResolvedBulletin>> {
    let resolved = fetch_latest_bulletin(state.fetcher.as_ref(), &state.config).await?;
    Ok(Json(resolved))
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub url: Option<String>,
}

/// `GET /boletin/download?url=`: proxies an allow-listed bulletin PDF.
///
/// The body is served with `Cache-Control: no-store`; the portal reuses bulletin
/// URLs for different files over time.
pub async fn download_handler(
    State(state): State<AppState>,
    params: Result<Query<DownloadParams>, QueryRejection>,
) -> AppResult<Response> {
    let Query(params) = params?;
    let url = params.url.unwrap_or_default();
    let download = download_bulletin(state.fetcher.as_ref(), &url, &state.config).await?;

    let disposition = HeaderValue::from_str(&download.content_disposition())
        .map_err(|e| AppError::InternalError(format!("Invalid Content-Disposition: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(download.content_type),
            ),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
        download.bytes,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Text extracted from the bulletin PDF
    pub text: String,
    /// The caller's own marks
    #[serde(default)]
    pub marcas: Vec<String>,
}

/// `POST /boletin/scan`: compares bulletin entries against the caller's marks.
pub async fn scan_handler(
    request: Result<Json<ScanRequest>, JsonRejection>,
) -> AppResult<Json<ScanReport>> {
    let Json(request) = request?;
    if request.text.trim().is_empty() {
        return Err(AppError::ValidationError(
            "El texto del boletín está vacío.".to_string(),
        ));
    }
    Ok(Json(scan_bulletin(&request.text, &request.marcas)))
}
