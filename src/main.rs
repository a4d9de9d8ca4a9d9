mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::{io, sync::Arc};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::Config, database::Store, services::upload_service::MediaClient};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables (.env) and configuration
    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting Doctor Booking Service...");
    log::info!("📊 Database: {}", config.mongo_db);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&config.mongo_url, &config.mongo_db)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string()))?;

    log::info!("✅ MongoDB connected successfully");

    // Media host client, shared by every worker
    let media_client = match MediaClient::from_config(&config.media) {
        Ok(client) => {
            log::info!("✅ Media host ready: {}", client.endpoint());
            Some(web::Data::new(client))
        }
        Err(e) => {
            log::warn!("⚠️  {}, image uploads will be refused", e);
            None
        }
    };

    let store: Arc<dyn Store> = Arc::new(db.clone());
    let store_data: web::Data<dyn Store> = web::Data::from(store);
    let config_data = web::Data::new(config.clone());

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!(
        "📚 Swagger UI available at: http://{}:{}/swagger-ui/",
        config.host, config.port
    );
    log::info!(
        "📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json",
        config.host, config.port
    );

    let client_url = config.client_url.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&client_url)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .expose_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();
        let media_client = media_client.clone();

        App::new()
            .app_data(store_data.clone())
            .app_data(config_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .configure(move |cfg| {
                if let Some(client) = media_client {
                    cfg.app_data(client);
                }
            })
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    log::info!("🛑 Server stopped, closing MongoDB connections");
    db.shutdown().await;

    Ok(())
}
