use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use backend::classifier::build_classifier;
use backend::config::AppConfig;
use backend::routes::{configure_routes, AppState};
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = AppConfig::load().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let classifier = build_classifier(&config.classifier).map_err(|e| {
        log::error!("Failed to set up classifier: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("Classifier setup failed: {}", e))
    })?;
    log::info!(
        "Using {:?} classifier (model {}), timeout {:?}",
        config.classifier.kind,
        classifier.model_version(),
        config.classifier.classify_timeout()
    );

    let frontend_dir = config.frontend_dir.display().to_string();
    if !config.frontend_dir.is_dir() {
        log::warn!("Frontend directory {} does not exist; only the API will be served", frontend_dir);
    }

    let state = web::Data::new(AppState::new(classifier, &config));
    let bind_address = config.bind_address();

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(state.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
