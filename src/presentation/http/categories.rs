use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::category_repository::{CategoryPatch, NewCategory};
use crate::application::services::tree::DEFAULT_USER_ID;
use crate::application::use_cases::categories::create_category::CreateCategory;
use crate::application::use_cases::categories::delete_category::DeleteCategory;
use crate::application::use_cases::categories::get_category::GetCategory;
use crate::application::use_cases::categories::list_categories::ListCategories;
use crate::application::use_cases::categories::update_category::UpdateCategory;
use crate::application::validation::slugify;
use crate::bootstrap::app_context::AppContext;
use crate::domain::tree::node::Category as DomainCategory;
use crate::presentation::http::{ApiError, ErrorResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_visible: bool,
    pub order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<DomainCategory> for Category {
    fn from(c: DomainCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            is_visible: c.is_visible,
            order: c.order,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub success: bool,
    pub data: Category,
}

impl CategoryResponse {
    fn of(c: DomainCategory) -> Json<Self> {
        Json(Self {
            success: true,
            data: c.into(),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub success: bool,
    pub data: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
    /// Id of the removed category.
    pub data: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    /// Derived from the name when absent.
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub order: i32,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_visible: Option<bool>,
    pub order: Option<i32>,
}

#[utoipa::path(post, path = "/api/categories", tag = "Categories",
    request_body = CreateCategoryRequest,
    responses((status = 200, body = CategoryResponse), (status = 409, body = ErrorResponse)))]
pub async fn create_category(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let slug = req.slug.unwrap_or_else(|| slugify(&req.name));
    let categories = ctx.category_repo();
    let uc = CreateCategory {
        categories: categories.as_ref(),
    };
    let category = uc
        .execute(NewCategory {
            name: req.name,
            slug,
            description: req.description,
            is_visible: req.is_visible,
            order: req.order,
            created_by: DEFAULT_USER_ID,
            updated_by: DEFAULT_USER_ID,
        })
        .await?;
    Ok(CategoryResponse::of(category))
}

#[utoipa::path(get, path = "/api/categories", tag = "Categories",
    responses((status = 200, body = CategoryListResponse)))]
pub async fn list_categories(
    State(ctx): State<AppContext>,
) -> Result<Json<CategoryListResponse>, ApiError> {
    let categories = ctx.category_repo();
    let uc = ListCategories {
        categories: categories.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(CategoryListResponse {
        success: true,
        data: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/categories/{id}", tag = "Categories",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 200, body = CategoryResponse), (status = 404, body = ErrorResponse)))]
pub async fn get_category(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let categories = ctx.category_repo();
    let uc = GetCategory {
        categories: categories.as_ref(),
    };
    Ok(CategoryResponse::of(uc.execute(id).await?))
}

#[utoipa::path(patch, path = "/api/categories/{id}", tag = "Categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses((status = 200, body = CategoryResponse), (status = 404, body = ErrorResponse)))]
pub async fn update_category(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let patch = CategoryPatch {
        name: req.name,
        slug: req.slug,
        description: req.description,
        is_visible: req.is_visible,
        order: req.order,
        updated_by: DEFAULT_USER_ID,
    };
    let categories = ctx.category_repo();
    let uc = UpdateCategory {
        categories: categories.as_ref(),
    };
    Ok(CategoryResponse::of(uc.execute(id, patch).await?))
}

#[utoipa::path(delete, path = "/api/categories/{id}", tag = "Categories",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 200, body = DeletedResponse), (status = 404, body = ErrorResponse)))]
pub async fn delete_category(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let categories = ctx.category_repo();
    let nodes = ctx.node_repo();
    let tracker = ctx.tracker_repo();
    let uc = DeleteCategory {
        categories: categories.as_ref(),
        nodes: nodes.as_ref(),
        tracker: tracker.as_ref(),
    };
    uc.execute(id).await?;
    Ok(Json(DeletedResponse {
        success: true,
        data: id,
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/categories", post(create_category).get(list_categories))
        .route(
            "/categories/:id",
            get(get_category).patch(update_category).delete(delete_category),
        )
        .with_state(ctx)
}
