//! HTTP Server for the rejoinder API.
//!
//! Every request reads its own table from the uploaded file; the compiled
//! templates are shared read-only through [`AppState`].
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                                   |
//! |--------|-------------------|-----------------------------------------------|
//! | GET    | `/health`         | Health check                                  |
//! | POST   | `/api/upload`     | Upload a review sheet, get its headers        |
//! | POST   | `/api/generate`   | Upload a sheet plus selection, get a rejoinder |
//! | GET    | `/api/logs`       | SSE stream for real-time logs                 |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, log_info_indent, log_success, log_warning, LOG_BROADCASTER};
use super::types::{error_response, GenerateResponse, UploadResponse};
use crate::config::AppConfig;
use crate::error::{PipelineError, ServerError, ServerResult};
use crate::pipeline::{check_selection, generate, GenerateOptions};
use crate::reader::{read_bytes, ReadResult};
use crate::render::{OutputFormat, TemplateEngine};

/// Multipart field carrying the sheet.
const FILE_FIELD: &str = "file";

/// Multipart field carrying the format name.
const FORMAT_FIELD: &str = "gen-template";

/// Prefix of the per-column selection fields (`header-<column>`).
const HEADER_FIELD_PREFIX: &str = "header-";

/// Upload content types; the file extension decides the reader.
const ALLOWED_CONTENT_TYPES: [&str; 4] = [
    "text/csv",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "application/octet-stream",
];

/// Shared, read-only server state.
pub struct AppState {
    pub engine: TemplateEngine,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(engine: TemplateEngine, config: AppConfig) -> Self {
        Self { engine, config }
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/upload", post(upload))
        .route("/api/generate", post(generate_rejoinder))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = config.template_engine()?;
    let port = config.port;
    let app = router(Arc::new(AppState::new(engine, config)));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Rejoinder server running on http://localhost:{}", port);
    println!("   POST /api/upload   - Upload a review sheet");
    println!("   POST /api/generate - Generate a rejoinder");
    println!("   GET  /api/logs     - SSE log stream");
    println!("   GET  /health       - Health check");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "rejoinder",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload",
            "generate": "POST /api/generate",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        // Lagged receivers skip what they missed
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Upload endpoint: read the sheet and report its headers.
async fn upload(multipart: Multipart) -> ServerResult<Json<UploadResponse>> {
    let form = read_form(multipart).await?;
    let (file_name, result) = form.read_table()?;

    if !result.table.has_data() {
        log_warning(format!("{} has a header row but no data rows", file_name));
    }
    let response = UploadResponse::new(file_name, &result);
    for duplicate in &response.duplicate_headers {
        log_warning(format!("Duplicate header '{}': only its first column is used", duplicate));
    }

    log_success(format!(
        "{} columns, {} rows",
        response.headers.len(),
        response.row_count
    ));
    Ok(Json(response))
}

/// Generate endpoint: read the sheet, apply the selection and render.
async fn generate_rejoinder(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ServerResult<Json<GenerateResponse>> {
    let form = read_form(multipart).await?;

    check_selection(&form.columns).map_err(|e| {
        log_error(e.to_string());
        ServerError::from(e)
    })?;

    let format = form
        .format
        .as_deref()
        .map(OutputFormat::from_name)
        .unwrap_or_default();
    let options = GenerateOptions::new(form.columns.clone()).with_format(format);
    let (file_name, result) = form.read_table()?;

    log_info(format!("Generating {} rejoinder", format));
    log_info_indent(format!("Columns: {}", options.columns.join(", ")), 1);

    let rejoinder = generate(&result.table, &options, &state.engine).map_err(|e| {
        log_error(e.to_string());
        ServerError::from(e)
    })?;

    let response = GenerateResponse::new(&file_name, rejoinder);
    log_success(format!("Rejoinder ready: {}", response.file_name));
    Ok(Json(response))
}

/// Fields collected from a multipart request.
#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    bytes: Option<Vec<u8>>,
    format: Option<String>,
    /// Selected columns, in field order
    columns: Vec<String>,
}

impl UploadForm {
    fn read_table(self) -> ServerResult<(String, ReadResult)> {
        let bytes = self
            .bytes
            .ok_or_else(|| ServerError::BadRequest("No file provided".to_string()))?;
        let file_name = self.file_name.unwrap_or_default();

        log_info(format!("📄 Upload: {} ({} bytes)", file_name, bytes.len()));

        let result = read_bytes(&bytes, &file_name).map_err(|e| {
            log_error(e.to_string());
            ServerError::from(e)
        })?;
        Ok((file_name, result))
    }
}

async fn read_form(mut multipart: Multipart) -> ServerResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == FILE_FIELD {
            if !is_allowed_content_type(field.content_type()) {
                return Err(ServerError::BadRequest(format!(
                    "Unsupported content type: {}",
                    field.content_type().unwrap_or("")
                )));
            }
            form.file_name = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
            form.bytes = Some(bytes.to_vec());
        } else if name == FORMAT_FIELD {
            let value = field
                .text()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
            form.format = Some(value);
        } else if let Some(column) = column_from_field_name(&name) {
            form.columns.push(column.to_string());
        }
    }

    Ok(form)
}

/// Column named by a `header-<column>` field.
fn column_from_field_name(name: &str) -> Option<&str> {
    name.strip_prefix(HEADER_FIELD_PREFIX)
}

/// Browsers disagree on spreadsheet MIME types, so unknown-but-generic and
/// missing types pass.
fn is_allowed_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    essence.is_empty() || ALLOWED_CONTENT_TYPES.contains(&essence.as_str())
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Pipeline(PipelineError::Reader(_)) => StatusCode::BAD_REQUEST,
            ServerError::Pipeline(PipelineError::UnderSelection { .. }) => StatusCode::BAD_REQUEST,
            ServerError::Pipeline(PipelineError::Render(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            eprintln!("❌ {}", self);
        }
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}
