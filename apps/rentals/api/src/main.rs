use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use axum_helpers::{health_router, serve};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{self, DatabaseConnection};
use domain_catalog::{CatalogLookup, PgCatalog};
use domain_notifications::{LogNotifier, NotificationSink, SmtpConfig, SmtpNotifier};
use domain_rentals::{
    handlers, BookingService, PgBookingRepository, PgReviewRepository, ReviewService,
};
use migration::Migrator;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    // Connect to PostgreSQL with retry (transient startup failures are common
    // when the database container is still coming up)
    let db = postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    postgres::run_migrations::<Migrator>(&db)
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    // Collaborators: catalog lookups against the same database, notification
    // sink chosen per environment (real SMTP only in production)
    let catalog: Arc<dyn CatalogLookup> = Arc::new(PgCatalog::new(db.clone()));
    let notifier: Arc<dyn NotificationSink> = if config.environment.is_production() {
        let smtp = SmtpNotifier::new(SmtpConfig::from_env())
            .map_err(|e| eyre::eyre!("SMTP setup failed: {}", e))?;
        Arc::new(smtp)
    } else {
        Arc::new(LogNotifier::new())
    };

    let booking_service = BookingService::new(
        PgBookingRepository::new(db.clone()),
        catalog.clone(),
        notifier,
    );
    let review_service = ReviewService::new(
        PgReviewRepository::new(db.clone()),
        PgBookingRepository::new(db.clone()),
        catalog,
    );

    // Domain routers apply their own state
    let api_routes = Router::new()
        .nest("/api/v1/bookings", handlers::booking_router(booking_service))
        .nest("/api/v1/reviews", handlers::review_router(review_service));

    let app = api_routes
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .merge(health_router(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        ))
        .merge(ready_router(db.clone()))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    info!("Starting rentals API");
    serve(app, &config.server).await?;

    info!("Shutting down: closing database connection");
    if let Err(e) = db.close().await {
        tracing::error!("Error closing PostgreSQL: {}", e);
    }

    Ok(())
}

/// Readiness endpoint: checks that the database answers.
fn ready_router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}

async fn ready_handler(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let status = postgres::check_health_detailed(&db).await;

    let body = json!({
        "ready": status.healthy,
        "database": if status.healthy { "connected" } else { "disconnected" },
        "response_time_ms": status.response_time_ms,
    });

    if status.healthy {
        (StatusCode::OK, Json(body))
    } else {
        tracing::error!(message = ?status.message, "Readiness check failed");
        (StatusCode::SERVICE_UNAVAILABLE, Json(body))
    }
}
