use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use axum::Router;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use leafpress::bootstrap::app_context::{AppContext, AppServices};
use leafpress::bootstrap::config::Config;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        leafpress::presentation::http::health::health,
        leafpress::presentation::http::categories::create_category,
        leafpress::presentation::http::categories::list_categories,
        leafpress::presentation::http::categories::get_category,
        leafpress::presentation::http::categories::update_category,
        leafpress::presentation::http::categories::delete_category,
        leafpress::presentation::http::nodes::create_node,
        leafpress::presentation::http::nodes::list_root_nodes,
        leafpress::presentation::http::nodes::get_node,
        leafpress::presentation::http::nodes::list_child_nodes,
        leafpress::presentation::http::nodes::update_node,
        leafpress::presentation::http::nodes::delete_node,
        leafpress::presentation::http::nodes::toggle_folder,
        leafpress::presentation::http::nodes::select_node,
        leafpress::presentation::http::tracker::add_favorite,
        leafpress::presentation::http::tracker::remove_favorite,
        leafpress::presentation::http::tracker::list_favorites,
        leafpress::presentation::http::tracker::track_access,
        leafpress::presentation::http::tracker::list_recent,
        leafpress::presentation::http::sync::import_markdown,
        leafpress::presentation::http::sync::export_markdown,
    ),
    components(schemas(
        leafpress::presentation::http::ErrorResponse,
        leafpress::presentation::http::health::HealthResp,
        leafpress::presentation::http::categories::Category,
        leafpress::presentation::http::categories::CategoryResponse,
        leafpress::presentation::http::categories::CategoryListResponse,
        leafpress::presentation::http::categories::DeletedResponse,
        leafpress::presentation::http::categories::CreateCategoryRequest,
        leafpress::presentation::http::categories::UpdateCategoryRequest,
        leafpress::presentation::http::nodes::Node,
        leafpress::presentation::http::nodes::NodeResponse,
        leafpress::presentation::http::nodes::NodeListResponse,
        leafpress::presentation::http::nodes::CreateNodeRequest,
        leafpress::presentation::http::nodes::UpdateNodeRequest,
        leafpress::presentation::http::nodes::DeletedSubtreeResponse,
        leafpress::presentation::http::tracker::TrackRequest,
        leafpress::presentation::http::tracker::FavoriteItem,
        leafpress::presentation::http::tracker::FavoriteResponse,
        leafpress::presentation::http::tracker::RemovedResponse,
        leafpress::presentation::http::tracker::RecentItem,
        leafpress::presentation::http::tracker::RecentTouchResponse,
        leafpress::presentation::http::sync::ImportRequest,
        leafpress::presentation::http::sync::ExportRequest,
        leafpress::presentation::http::sync::ImportedItem,
        leafpress::presentation::http::sync::ImportResponse,
        leafpress::presentation::http::sync::ExportedItem,
        leafpress::presentation::http::sync::ExportResponse,
    )),
    tags(
        (name = "Health", description = "System health checks"),
        (name = "Categories", description = "Category management"),
        (name = "Nodes", description = "Tree node management"),
        (name = "Tracker", description = "Favorites and recently viewed"),
        (name = "Sync", description = "Markdown import and export")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "leafpress=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting leafpress backend");

    let pool = leafpress::infrastructure::db::connect_pool(&cfg.database_url).await?;
    leafpress::infrastructure::db::migrate(&pool).await?;

    let node_repo = Arc::new(
        leafpress::infrastructure::db::repositories::node_repository_sqlx::SqlxNodeRepository::new(
            pool.clone(),
        ),
    );
    let category_repo = Arc::new(
        leafpress::infrastructure::db::repositories::category_repository_sqlx::SqlxCategoryRepository::new(
            pool.clone(),
        ),
    );
    let tracker_repo = Arc::new(
        leafpress::infrastructure::db::repositories::tracker_repository_sqlx::SqlxTrackerRepository::new(
            pool.clone(),
        ),
    );

    let services = Arc::new(AppServices::new(node_repo, category_repo, tracker_repo));
    let ctx = AppContext::new(cfg.clone(), services);

    let cors = match cfg.frontend_url.as_deref() {
        Some(origin) if cfg.is_production => {
            let origin = origin.parse::<HeaderValue>()?;
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(origin))
                .allow_methods([
                    http::Method::GET,
                    http::Method::POST,
                    http::Method::PUT,
                    http::Method::DELETE,
                    http::Method::PATCH,
                    http::Method::OPTIONS,
                ])
                .allow_headers([http::header::CONTENT_TYPE])
        }
        _ => CorsLayer::permissive(),
    };

    let app = Router::new()
        .nest(
            "/api",
            leafpress::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api",
            leafpress::presentation::http::categories::routes(ctx.clone()),
        )
        .nest(
            "/api",
            leafpress::presentation::http::nodes::routes(ctx.clone()),
        )
        .nest(
            "/api",
            leafpress::presentation::http::tracker::routes(ctx.clone()),
        )
        .nest(
            "/api",
            leafpress::presentation::http::sync::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
