use crate::{config::Config, doc::ApiDoc, state::AppState, utils::shutdown::shutdown_signal};
use database::db::create_connection;
use log::info;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

mod auth;
mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::from_env().expect("Failed to load configuration");

    let db = create_connection(&config.database_url)
        .await
        .expect("Failed to connect to the database");

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(&config.oidc_issuer_url)
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    let protected = routes::protected_router()
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::public_router())
        .merge(protected)
        .split_for_parts();

    let state = AppState {
        db,
        catalog: Arc::new(config.catalog),
    };

    let app = router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
        .layer(CompressionLayer::new())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
