pub mod adapters;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod utils;
pub mod validation;

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::adapters::{PostgresAccountRepository, PostgresTransferStore};
use crate::config::Config;
use crate::ports::{AccountRepository, TransferStore};
use crate::services::transfer::TransferEngine;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Config,
    pub accounts: Arc<dyn AccountRepository>,
    pub store: Arc<dyn TransferStore>,
    pub engine: TransferEngine,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, config: Config) -> Self {
        let accounts: Arc<dyn AccountRepository> =
            Arc::new(PostgresAccountRepository::new(db.clone()));
        let store: Arc<dyn TransferStore> = Arc::new(PostgresTransferStore::new(db.clone()));
        let engine = TransferEngine::new(accounts.clone(), store.clone());

        Self {
            db,
            config,
            accounts,
            store,
            engine,
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::auth::register,
        handlers::auth::login,
        handlers::transfer::send_money,
        handlers::transfer::get_transaction,
        handlers::history::history,
        handlers::admin::activate_account,
        handlers::admin::block_account,
    ),
    components(schemas(
        domain::Account,
        domain::Role,
        domain::AccountStatus,
        domain::TransactionRecord,
        handlers::HealthStatus,
        handlers::DbPoolStats,
        handlers::auth::RegisterRequest,
        handlers::auth::LoginRequest,
        handlers::auth::LoginResponse,
        handlers::transfer::TransferRequest,
        handlers::admin::ActivateRequest,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Transfer", description = "Funds transfer and history"),
        (name = "Admin", description = "Account approval and blocking"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/transfer", post(handlers::transfer::send_money))
        .route(
            "/transactions/:transaction_id",
            get(handlers::transfer::get_transaction),
        )
        .route("/history", get(handlers::history::history))
        .route(
            "/admin/accounts/:id/activate",
            post(handlers::admin::activate_account),
        )
        .route(
            "/admin/accounts/:id/block",
            post(handlers::admin::block_account),
        )
        .layer(axum_middleware::from_fn(
            middleware::request_logger::request_logger_middleware,
        ))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    match config.cors_allowed_origins.as_deref() {
        Some("*") | None => CorsLayer::permissive(),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}
