use crate::forge::{DataForge, FormattedBatch};
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::error::InternalError;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use chrono::Utc;
use dataforge_core::{timestamp, CanonicalRecord, Error, ProcessingConfig};
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// Largest accepted upload and JSON request body
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Upper bound on records per generate request
pub const MAX_GENERATE_COUNT: usize = 10_000;

pub const ENDPOINTS: [&str; 5] = [
    "POST /api/process-data",
    "POST /api/generate-data",
    "POST /api/upload",
    "GET /api/health",
    "GET /",
];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessDataRequest {
    #[serde(default)]
    input_data: Option<Value>,
    #[serde(default)]
    config: Option<ProcessingConfig>,
    #[serde(default)]
    existing_data: Option<Vec<CanonicalRecord>>,
}

#[derive(Deserialize)]
struct GenerateDataRequest {
    prompt: String,
    count: usize,
    #[serde(default)]
    config: Option<ProcessingConfig>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(forge: Arc<DataForge>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(forge.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register the API routes; expects a `web::Data<Arc<DataForge>>` in app data
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/api/process-data", web::post().to(process_data))
        .route("/api/generate-data", web::post().to(generate_data))
        .route("/api/upload", web::post().to(upload))
        .route("/api/health", web::get().to(health))
        .route("/", web::get().to(index));
}

/// Larger body limit, and malformed bodies answered with a JSON error
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_UPLOAD_BYTES)
        .error_handler(|err, _req: &HttpRequest| {
            let body = serde_json::json!({ "error": err.to_string() });
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}

fn error_response(err: &Error) -> HttpResponse {
    match err {
        Error::Validation(result) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": err.to_string(),
            "details": result
        })),
        Error::Decode(_) | Error::InvalidConfig(_) | Error::UnsupportedFormat(_) => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": err.to_string()
            }))
        }
        _ => {
            error!(error = %err, "request failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": err.to_string()
            }))
        }
    }
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}

async fn process_data(
    forge: web::Data<Arc<DataForge>>,
    req: web::Json<ProcessDataRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    let items = match req.input_data {
        Some(Value::Array(items)) => items,
        _ => return Ok(bad_request("Input data is required and must be an array")),
    };

    match forge.process_json_formatted(&items, req.config, req.existing_data.as_deref()) {
        Ok(output) => {
            let FormattedBatch { batch, formatted, format } = output;
            let (conflicts, recommendations) = match batch.consistency {
                Some(result) => (result.conflicts, result.recommendations),
                None => (Vec::new(), Vec::new()),
            };
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "data": batch.records,
                "formatted": formatted,
                "format": format.as_str(),
                "warnings": batch.warnings,
                "conflicts": conflicts,
                "recommendations": recommendations
            })))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn generate_data(
    forge: web::Data<Arc<DataForge>>,
    req: web::Json<GenerateDataRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    if req.count > MAX_GENERATE_COUNT {
        return Ok(bad_request(&format!(
            "count must not exceed {}",
            MAX_GENERATE_COUNT
        )));
    }

    match forge.generate_dataset(&req.prompt, req.count, req.config) {
        Ok(output) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "data": output.batch.records,
            "formatted": output.formatted,
            "format": output.format.as_str()
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn upload(mut payload: Multipart) -> ActixResult<HttpResponse> {
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = payload.next().await {
        let mut field = field?;
        let is_file = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            == Some("file");
        if !is_file {
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Ok(HttpResponse::PayloadTooLarge().json(serde_json::json!({
                    "error": "File exceeds the 10 MiB limit"
                })));
            }
            bytes.extend_from_slice(&chunk);
        }
        file = Some(bytes);
        break;
    }

    let Some(bytes) = file else {
        return Ok(bad_request("No file uploaded"));
    };

    let items = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Array(items)) => items,
        Ok(_) => return Ok(bad_request("File must contain an array of data")),
        Err(_) => return Ok(bad_request("Invalid JSON file")),
    };

    info!(items = items.len(), "file uploaded");
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": format!("Successfully uploaded {} items", items.len()),
        "data": items
    })))
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "timestamp": timestamp::format(&Utc::now())
    })))
}

async fn index() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "DataForge API Server",
        "endpoints": ENDPOINTS
    })))
}
