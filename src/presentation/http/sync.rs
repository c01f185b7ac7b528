use std::path::PathBuf;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::services::tree::DEFAULT_USER_ID;
use crate::application::use_cases::sync::export_markdown::ExportMarkdown;
use crate::application::use_cases::sync::import_markdown::ImportMarkdown;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::{ApiError, ErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportRequest {
    pub category_id: i32,
    /// Defaults to the configured markdown directory.
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Default)]
pub struct ExportRequest {
    /// Defaults to the configured markdown directory.
    pub dir: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportedItem {
    pub id: i32,
    pub title: String,
    pub created: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResponse {
    pub success: bool,
    pub data: Vec<ImportedItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExportedItem {
    pub id: i32,
    pub file: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExportResponse {
    pub success: bool,
    pub data: Vec<ExportedItem>,
}

#[utoipa::path(post, path = "/api/sync/import", tag = "Sync",
    request_body = ImportRequest,
    responses((status = 200, body = ImportResponse), (status = 404, body = ErrorResponse)))]
pub async fn import_markdown(
    State(ctx): State<AppContext>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
    let dir = PathBuf::from(req.dir.unwrap_or_else(|| ctx.cfg.markdown_dir.clone()));
    let nodes = ctx.node_repo();
    let categories = ctx.category_repo();
    let uc = ImportMarkdown {
        nodes: nodes.as_ref(),
        categories: categories.as_ref(),
    };
    let imported = uc.execute(&dir, req.category_id, DEFAULT_USER_ID).await?;
    Ok(Json(ImportResponse {
        success: true,
        data: imported
            .into_iter()
            .map(|d| ImportedItem {
                id: d.id,
                title: d.title,
                created: d.created,
            })
            .collect(),
    }))
}

#[utoipa::path(post, path = "/api/sync/export", tag = "Sync",
    request_body = ExportRequest,
    responses((status = 200, body = ExportResponse)))]
pub async fn export_markdown(
    State(ctx): State<AppContext>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, ApiError> {
    let dir = PathBuf::from(req.dir.unwrap_or_else(|| ctx.cfg.markdown_dir.clone()));
    let nodes = ctx.node_repo();
    let uc = ExportMarkdown {
        nodes: nodes.as_ref(),
    };
    let exported = uc.execute(&dir).await?;
    Ok(Json(ExportResponse {
        success: true,
        data: exported
            .into_iter()
            .map(|d| ExportedItem {
                id: d.id,
                file: d.file,
            })
            .collect(),
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/sync/import", post(import_markdown))
        .route("/sync/export", post(export_markdown))
        .with_state(ctx)
}
