mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use crate::config::Settings;
use crate::core::{Matcher, DEFAULT_TOP_K};
use crate::routes::matches::AppState;
use crate::services::{CachedEncoder, MiniLmEncoder, SupabaseClient, SupabaseTables, TextEncoder};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting scholarship matching service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the record store client
    let tables = SupabaseTables {
        applicants: settings.table.applicants,
        scholarships: settings.table.scholarships,
    };

    let store = Arc::new(SupabaseClient::new(
        settings.supabase.endpoint,
        settings.supabase.api_key,
        tables,
    ));

    info!("Supabase client initialized");

    // Initialize the embedding encoder. The first run downloads the model
    // files, so this can take a while.
    info!("Loading embedding model (downloads on first run)...");

    let model_cache_dir = settings.encoder.model_cache_dir.map(PathBuf::from);
    let base_encoder = MiniLmEncoder::new(model_cache_dir).await.unwrap_or_else(|e| {
        error!("Failed to initialize embedding model: {}", e);
        panic!("Embedding model error: {}", e);
    });

    info!(
        "Embedding model ready: {} ({} dimensions)",
        base_encoder.model_name(),
        base_encoder.dimension()
    );

    // Wrap the encoder in the in-process embedding cache
    let cache_capacity = settings.cache.capacity.unwrap_or(1000);
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);

    let encoder: Arc<dyn TextEncoder> = Arc::new(CachedEncoder::new(
        base_encoder,
        cache_capacity,
        cache_ttl,
    ));

    info!(
        "Embedding cache initialized ({} entries, TTL: {}s)",
        cache_capacity, cache_ttl
    );

    // Initialize the matcher
    let top_k = settings.matching.top_k.unwrap_or(DEFAULT_TOP_K);
    let matcher = Matcher::new(top_k);

    info!("Matcher initialized (top_k: {})", top_k);

    // Build application state
    let app_state = AppState {
        store,
        encoder,
        matcher,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
