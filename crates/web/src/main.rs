use anyhow::Context;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;

use config::Config;
use features::{athletes, categories, training_centers};

#[derive(OpenApi)]
#[openapi(
    paths(
        categories::handlers::create_category,
        categories::handlers::list_categories,
        categories::handlers::get_category,
        training_centers::handlers::create_training_center,
        training_centers::handlers::list_training_centers,
        training_centers::handlers::get_training_center,
        athletes::handlers::create_athlete,
        athletes::handlers::list_athletes,
        athletes::handlers::get_athlete,
        athletes::handlers::update_athlete,
        athletes::handlers::delete_athlete,
    ),
    components(
        schemas(
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::CategoryResponse,
            storage::dto::category::CategoryRef,
            storage::dto::training_center::CreateTrainingCenterRequest,
            storage::dto::training_center::TrainingCenterResponse,
            storage::dto::training_center::TrainingCenterRef,
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AthleteResponse,
            storage::dto::athlete::AthleteSummary,
            storage::dto::athlete::AthleteListResponse,
        )
    ),
    tags(
        (name = "categorias", description = "Athlete categories"),
        (name = "centro_treinamento", description = "Training centers"),
        (name = "atleta", description = "Athletes"),
    ),
    info(title = "WorkoutAPI")
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting WorkoutAPI");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = match &config.database_url {
        Some(database_url) => {
            tracing::info!(
                "Connecting to database at: {}",
                database_url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(database_url, config.database_max_connections)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, data will only live in memory");
            Database::in_memory()
                .await
                .context("Failed to open in-memory database")?
        }
    };

    db.ensure_schema()
        .await
        .context("Failed to create database schema")?;
    tracing::info!("Database schema ready");

    let app = routes::router(db)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
