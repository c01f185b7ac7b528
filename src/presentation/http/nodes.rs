use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::node_repository::{NewNode, NodePatch};
use crate::application::services::tree::DEFAULT_USER_ID;
use crate::application::use_cases::nodes::create_node::CreateNode;
use crate::application::use_cases::nodes::delete_node::DeleteNode;
use crate::application::use_cases::nodes::get_node::GetNode;
use crate::application::use_cases::nodes::list_nodes::{ListChildNodes, ListRootNodes};
use crate::application::use_cases::nodes::select_node::SelectNode;
use crate::application::use_cases::nodes::toggle_folder::ToggleFolder;
use crate::application::use_cases::nodes::update_node::UpdateNode;
use crate::application::validation::slugify;
use crate::bootstrap::app_context::AppContext;
use crate::domain::tree::node::Node as DomainNode;
use crate::presentation::http::{ApiError, ErrorResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct Node {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category_id: i32,
    pub parent_id: Option<i32>,
    pub is_published: bool,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_open: bool,
    pub is_selected: bool,
    pub order: i32,
    pub metadata: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<DomainNode> for Node {
    fn from(n: DomainNode) -> Self {
        Self {
            id: n.id,
            title: n.title,
            slug: n.slug,
            excerpt: n.excerpt,
            content: n.content,
            category_id: n.category_id,
            parent_id: n.parent_id,
            is_published: n.is_published,
            published_at: n.published_at,
            is_open: n.is_open,
            is_selected: n.is_selected,
            order: n.order,
            metadata: n.metadata,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NodeResponse {
    pub success: bool,
    pub data: Node,
}

impl NodeResponse {
    fn of(n: DomainNode) -> Json<Self> {
        Json(Self {
            success: true,
            data: n.into(),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NodeListResponse {
    pub success: bool,
    pub data: Vec<Node>,
}

impl NodeListResponse {
    fn of(items: Vec<DomainNode>) -> Json<Self> {
        Json(Self {
            success: true,
            data: items.into_iter().map(Into::into).collect(),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNodeRequest {
    pub title: String,
    /// Derived from the title when absent.
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category_id: i32,
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub order: i32,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNodeRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<i32>)]
    pub parent_id: DoubleOption<i32>,
    pub is_published: Option<bool>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_open: Option<bool>,
    pub order: Option<i32>,
    pub metadata: Option<serde_json::Value>,
}

/// Distinguishes an omitted `parent_id` from an explicit `null`.
#[derive(Debug, Clone)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedSubtreeResponse {
    pub success: bool,
    /// Root id first, then every removed descendant.
    pub data: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct RootsQuery {
    pub category_id: i32,
}

#[utoipa::path(post, path = "/api/nodes", tag = "Nodes",
    request_body = CreateNodeRequest,
    responses((status = 200, body = NodeResponse), (status = 409, body = ErrorResponse)))]
pub async fn create_node(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateNodeRequest>,
) -> Result<Json<NodeResponse>, ApiError> {
    let slug = req.slug.unwrap_or_else(|| slugify(&req.title));
    let nodes = ctx.node_repo();
    let categories = ctx.category_repo();
    let uc = CreateNode {
        nodes: nodes.as_ref(),
        categories: categories.as_ref(),
    };
    let node = uc
        .execute(NewNode {
            title: req.title,
            slug,
            excerpt: req.excerpt,
            content: req.content,
            category_id: req.category_id,
            parent_id: req.parent_id,
            is_published: req.is_published,
            order: req.order,
            metadata: req.metadata,
            created_by: DEFAULT_USER_ID,
            updated_by: DEFAULT_USER_ID,
        })
        .await?;
    Ok(NodeResponse::of(node))
}

#[utoipa::path(get, path = "/api/nodes/roots", tag = "Nodes",
    params(("category_id" = i32, Query, description = "Category to list roots for")),
    responses((status = 200, body = NodeListResponse)))]
pub async fn list_root_nodes(
    State(ctx): State<AppContext>,
    Query(q): Query<RootsQuery>,
) -> Result<Json<NodeListResponse>, ApiError> {
    let nodes = ctx.node_repo();
    let uc = ListRootNodes {
        nodes: nodes.as_ref(),
    };
    Ok(NodeListResponse::of(uc.execute(q.category_id).await?))
}

#[utoipa::path(get, path = "/api/nodes/{id}", tag = "Nodes",
    params(("id" = i32, Path, description = "Node id")),
    responses((status = 200, body = NodeResponse), (status = 404, body = ErrorResponse)))]
pub async fn get_node(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<NodeResponse>, ApiError> {
    let nodes = ctx.node_repo();
    let uc = GetNode {
        nodes: nodes.as_ref(),
    };
    Ok(NodeResponse::of(uc.execute(id).await?))
}

#[utoipa::path(get, path = "/api/nodes/{id}/children", tag = "Nodes",
    params(("id" = i32, Path, description = "Parent node id")),
    responses((status = 200, body = NodeListResponse)))]
pub async fn list_child_nodes(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<NodeListResponse>, ApiError> {
    let nodes = ctx.node_repo();
    let uc = ListChildNodes {
        nodes: nodes.as_ref(),
    };
    Ok(NodeListResponse::of(uc.execute(id).await?))
}

#[utoipa::path(patch, path = "/api/nodes/{id}", tag = "Nodes",
    params(("id" = i32, Path, description = "Node id")),
    request_body = UpdateNodeRequest,
    responses((status = 200, body = NodeResponse), (status = 404, body = ErrorResponse)))]
pub async fn update_node(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateNodeRequest>,
) -> Result<Json<NodeResponse>, ApiError> {
    let parent_id = match req.parent_id {
        DoubleOption::NotProvided => None,
        DoubleOption::Null => Some(None),
        DoubleOption::Some(v) => Some(Some(v)),
    };
    let patch = NodePatch {
        title: req.title,
        slug: req.slug,
        excerpt: req.excerpt,
        content: req.content,
        category_id: req.category_id,
        parent_id,
        is_published: req.is_published,
        published_at: req.published_at,
        is_open: req.is_open,
        is_selected: None,
        order: req.order,
        metadata: req.metadata,
        updated_by: DEFAULT_USER_ID,
    };
    let nodes = ctx.node_repo();
    let categories = ctx.category_repo();
    let uc = UpdateNode {
        nodes: nodes.as_ref(),
        categories: categories.as_ref(),
    };
    Ok(NodeResponse::of(uc.execute(id, patch).await?))
}

#[utoipa::path(delete, path = "/api/nodes/{id}", tag = "Nodes",
    params(("id" = i32, Path, description = "Node id")),
    responses((status = 200, body = DeletedSubtreeResponse), (status = 404, body = ErrorResponse)))]
pub async fn delete_node(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedSubtreeResponse>, ApiError> {
    let nodes = ctx.node_repo();
    let tracker = ctx.tracker_repo();
    let uc = DeleteNode {
        nodes: nodes.as_ref(),
        tracker: tracker.as_ref(),
    };
    let deleted = uc.execute(id).await?;
    Ok(Json(DeletedSubtreeResponse {
        success: true,
        data: deleted.removed,
    }))
}

#[utoipa::path(post, path = "/api/nodes/{id}/toggle", tag = "Nodes",
    params(("id" = i32, Path, description = "Folder node id")),
    responses((status = 200, body = NodeResponse), (status = 404, body = ErrorResponse)))]
pub async fn toggle_folder(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<NodeResponse>, ApiError> {
    let nodes = ctx.node_repo();
    let tracker = ctx.tracker_repo();
    let uc = ToggleFolder {
        nodes: nodes.as_ref(),
        tracker: tracker.as_ref(),
    };
    Ok(NodeResponse::of(uc.execute(id, DEFAULT_USER_ID).await?))
}

#[utoipa::path(post, path = "/api/nodes/{id}/select", tag = "Nodes",
    params(("id" = i32, Path, description = "Node id")),
    responses((status = 200, body = NodeResponse), (status = 404, body = ErrorResponse)))]
pub async fn select_node(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<NodeResponse>, ApiError> {
    let nodes = ctx.node_repo();
    let tracker = ctx.tracker_repo();
    let uc = SelectNode {
        nodes: nodes.as_ref(),
        tracker: tracker.as_ref(),
    };
    Ok(NodeResponse::of(uc.execute(id, DEFAULT_USER_ID).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/nodes", post(create_node))
        .route("/nodes/roots", get(list_root_nodes))
        .route(
            "/nodes/:id",
            get(get_node).patch(update_node).delete(delete_node),
        )
        .route("/nodes/:id/children", get(list_child_nodes))
        .route("/nodes/:id/toggle", post(toggle_folder))
        .route("/nodes/:id/select", post(select_node))
        .with_state(ctx)
}
