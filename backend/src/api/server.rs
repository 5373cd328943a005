//! HTTP server for the api_taste form.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                              |
//! |--------|-------------------|------------------------------------------|
//! | GET    | `/health`         | Health check                             |
//! | POST   | `/generate_yaml`  | Validate a description and generate YAML |
//! | POST   | `/download_yaml`  | Echo generated YAML back as a file       |

use axum::{
    body::Bytes,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::types::{error_response, is_empty_payload, DownloadRequest, GenerateResponse, NO_DATA_RECEIVED};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::transform::{generate, GeneratedConfig};

/// Build the application router for `config`.
pub fn create_app(config: &ServerConfig) -> ServerResult<Router> {
    let origin = match &config.allowed_origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin)
                .map_err(|e| ServerError::InvalidConfig(format!("allowed origin '{}': {}", origin, e)))?,
        ),
        None => AllowOrigin::any(),
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    Ok(Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/generate_yaml", post(generate_yaml))
        .route("/download_yaml", post(download_yaml))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors))
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let addr = config.socket_addr()?;
    let app = create_app(&config)?;

    tracing::info!(%addr, version = env!("CARGO_PKG_VERSION"), "apitaste server listening");
    tracing::info!("   POST /generate_yaml - Validate and generate YAML");
    tracing::info!("   POST /download_yaml - Download generated YAML");
    tracing::info!("   GET  /health        - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "apitaste",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate": "POST /generate_yaml",
            "download": "POST /download_yaml"
        }
    }))
}

/// Validate a description and generate its YAML document
async fn generate_yaml(body: Bytes) -> Json<GenerateResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Json(GenerateResponse::failure(vec![NO_DATA_RECEIVED.to_string()]));
    }

    let input: Value = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!(error = %e, "unparsable generate request");
            return Json(GenerateResponse::failure(vec![format!("Invalid JSON body: {}", e)]));
        }
    };

    if is_empty_payload(&input) {
        return Json(GenerateResponse::failure(vec![NO_DATA_RECEIVED.to_string()]));
    }

    let response = match generate(&input) {
        Ok(generated) => GenerateResponse::from(generated),
        Err(e) => GenerateResponse::from(e),
    };

    Json(response)
}

/// Return previously generated YAML as a file attachment
async fn download_yaml(body: Bytes) -> Response {
    let request: DownloadRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "Error downloading YAML");
            return Json(error_response(&e.to_string())).into_response();
        }
    };

    let disposition = format!("attachment; filename=\"{}\"", request.filename.replace('"', ""));
    let disposition = match HeaderValue::from_str(&disposition) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, filename = %request.filename, "Error downloading YAML");
            return Json(error_response(&format!("Invalid filename: {}", e))).into_response();
        }
    };

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(GeneratedConfig::MIME_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        request.yaml_content,
    )
        .into_response()
}
