use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use log::{error, info, warn};
use shared::{ClassifyResponse, HealthResponse, RiceVariety, VarietySummary};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::classifier::{Classifier, Prediction};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::intake::{read_upload, validate_upload};

/// Shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub classify_timeout: Duration,
    pub max_upload_bytes: u64,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>, config: &AppConfig) -> Self {
        Self {
            classifier,
            classify_timeout: config.classifier.classify_timeout(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/classify").route(web::post().to(classify)))
        .service(web::resource("/api/varieties").route(web::get().to(varieties)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

async fn classify(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let upload = read_upload(payload, state.max_upload_bytes).await.map_err(|e| {
        warn!("[{}] Rejected upload: {}", request_id, e);
        e
    })?;

    if let Err(invalid) = validate_upload(&upload, state.max_upload_bytes) {
        warn!("[{}] Rejected {}: {}", request_id, upload.file_name, invalid);
        return Err(invalid.into());
    }

    let image_hash = upload.hash();
    info!(
        "[{}] Classifying {} ({}, {} bytes, sha256 {})",
        request_id,
        upload.file_name,
        upload.mime_type,
        upload.bytes.len(),
        &image_hash[..12]
    );

    let started = Instant::now();
    let prediction = match tokio::time::timeout(state.classify_timeout, state.classifier.classify(&upload.bytes)).await {
        Ok(Ok(prediction)) => prediction,
        Ok(Err(e)) => {
            error!("[{}] Classification error: {}", request_id, e);
            return Err(ApiError::Classification(e));
        }
        Err(_) => {
            error!(
                "[{}] Classification timed out after {:?}",
                request_id, state.classify_timeout
            );
            return Err(ApiError::Timeout(state.classify_timeout));
        }
    };
    let processing_ms = started.elapsed().as_millis() as u64;
    let Prediction {
        result,
        model_version,
    } = prediction;
    let model_version = model_version.unwrap_or_else(|| state.classifier.model_version().to_string());

    info!(
        "[{}] {} with {} confidence in {} ms",
        request_id, result.label, result.confidence, processing_ms
    );

    Ok(HttpResponse::Ok().json(ClassifyResponse {
        result,
        model_version,
        processing_ms,
        image_hash: Some(image_hash),
    }))
}

async fn varieties() -> HttpResponse {
    let list: Vec<VarietySummary> = RiceVariety::all()
        .into_iter()
        .map(|variety| VarietySummary {
            name: variety.name().to_string(),
            description: variety.info().description.to_string(),
        })
        .collect();
    HttpResponse::Ok().json(list)
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        model_version: state.classifier.model_version().to_string(),
    })
}
