//! Blob serving endpoints.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ServeQuery {
    disposition: Option<String>,
}

/// GET /storage/{key}
pub async fn serve_blob(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ServeQuery>,
) -> AppResult<HttpResponse> {
    let key = path.into_inner();
    let (bytes, content_type) = state
        .storage
        .get(&key)
        .await
        .ok_or_else(|| AppError::NotFound(format!("blob '{key}'")))?;

    let disposition = match query.disposition.as_deref() {
        Some("attachment") => "attachment",
        _ => "inline",
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(("Content-Disposition", disposition))
        .body(bytes))
}

/// GET /storage/{key}/variants/{spec}
///
/// Variant URLs encode their rendering parameters; actual image transcoding
/// is out of scope here, so the original bytes are served.
pub async fn serve_variant(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (key, _spec) = path.into_inner();
    let (bytes, content_type) = state
        .storage
        .get(&key)
        .await
        .ok_or_else(|| AppError::NotFound(format!("blob '{key}'")))?;

    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}
