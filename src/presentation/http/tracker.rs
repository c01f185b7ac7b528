use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::services::tree::DEFAULT_USER_ID;
use crate::application::use_cases::tracker::add_favorite::AddFavorite;
use crate::application::use_cases::tracker::list_favorites::ListFavorites;
use crate::application::use_cases::tracker::list_recent::ListRecent;
use crate::application::use_cases::tracker::remove_favorite::RemoveFavorite;
use crate::application::use_cases::tracker::track_access::TrackAccess;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::nodes::{Node, NodeListResponse};
use crate::presentation::http::{ApiError, ErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct TrackRequest {
    pub post_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteResponse {
    pub success: bool,
    pub data: FavoriteItem,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteItem {
    pub post_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RemovedResponse {
    pub success: bool,
    /// Whether a favorite row actually existed.
    pub data: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentTouchResponse {
    pub success: bool,
    pub data: RecentItem,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentItem {
    pub post_id: i32,
    pub accessed_at: chrono::DateTime<chrono::Utc>,
}

#[utoipa::path(post, path = "/api/favorites", tag = "Tracker",
    request_body = TrackRequest,
    responses((status = 200, body = FavoriteResponse)))]
pub async fn add_favorite(
    State(ctx): State<AppContext>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let tracker = ctx.tracker_repo();
    let uc = AddFavorite {
        tracker: tracker.as_ref(),
    };
    let fav = uc.execute(req.post_id, DEFAULT_USER_ID).await?;
    Ok(Json(FavoriteResponse {
        success: true,
        data: FavoriteItem {
            post_id: fav.post_id,
            created_at: fav.created_at,
        },
    }))
}

#[utoipa::path(delete, path = "/api/favorites/{post_id}", tag = "Tracker",
    params(("post_id" = i32, Path, description = "Post id")),
    responses((status = 200, body = RemovedResponse)))]
pub async fn remove_favorite(
    State(ctx): State<AppContext>,
    Path(post_id): Path<i32>,
) -> Result<Json<RemovedResponse>, ApiError> {
    let tracker = ctx.tracker_repo();
    let uc = RemoveFavorite {
        tracker: tracker.as_ref(),
    };
    let removed = uc.execute(post_id, DEFAULT_USER_ID).await?;
    Ok(Json(RemovedResponse {
        success: true,
        data: removed,
    }))
}

#[utoipa::path(get, path = "/api/favorites", tag = "Tracker",
    responses((status = 200, body = NodeListResponse)))]
pub async fn list_favorites(
    State(ctx): State<AppContext>,
) -> Result<Json<NodeListResponse>, ApiError> {
    let tracker = ctx.tracker_repo();
    let nodes = ctx.node_repo();
    let uc = ListFavorites {
        tracker: tracker.as_ref(),
        nodes: nodes.as_ref(),
    };
    let items = uc.execute(DEFAULT_USER_ID).await?;
    Ok(Json(NodeListResponse {
        success: true,
        data: items.into_iter().map(Node::from).collect(),
    }))
}

#[utoipa::path(post, path = "/api/recent", tag = "Tracker",
    request_body = TrackRequest,
    responses((status = 200, body = RecentTouchResponse), (status = 404, body = ErrorResponse)))]
pub async fn track_access(
    State(ctx): State<AppContext>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<RecentTouchResponse>, ApiError> {
    let tracker = ctx.tracker_repo();
    let uc = TrackAccess {
        tracker: tracker.as_ref(),
    };
    let entry = uc.execute(req.post_id, DEFAULT_USER_ID).await?;
    Ok(Json(RecentTouchResponse {
        success: true,
        data: RecentItem {
            post_id: entry.post_id,
            accessed_at: entry.accessed_at,
        },
    }))
}

#[utoipa::path(get, path = "/api/recent", tag = "Tracker",
    responses((status = 200, body = NodeListResponse)))]
pub async fn list_recent(
    State(ctx): State<AppContext>,
) -> Result<Json<NodeListResponse>, ApiError> {
    let tracker = ctx.tracker_repo();
    let nodes = ctx.node_repo();
    let uc = ListRecent {
        tracker: tracker.as_ref(),
        nodes: nodes.as_ref(),
    };
    let items = uc.execute(DEFAULT_USER_ID).await?;
    Ok(Json(NodeListResponse {
        success: true,
        data: items.into_iter().map(Node::from).collect(),
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/favorites", post(add_favorite).get(list_favorites))
        .route("/favorites/:post_id", delete(remove_favorite))
        .route("/recent", post(track_access).get(list_recent))
        .with_state(ctx)
}
