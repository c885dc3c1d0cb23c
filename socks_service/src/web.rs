//! HTTP API for the sock inventory
//!
//! All inventory routes live under `/api/socks`. Bodies are wrapped in
//! [`ApiResponse`]; errors map to status codes in `IntoResponse for InventoryError`.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
        DefaultBodyLimit, Multipart, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error::{InventoryError, Result};
use crate::inventory::{self, ImportSummary};
use crate::models::{validate_cotton_percentage, Sock, SockBatch, SockUpdate};
use crate::query::{Operator, Page, PageRequest, SockFilter};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Shared application state (thread-safe database connection)
#[derive(Clone)]
struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Runs `f` with exclusive access to the connection
    fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut conn = self
            .db
            .lock()
            .map_err(|_| InventoryError::Unexpected("database lock poisoned".to_string()))?;
        f(&mut conn)
    }
}

/// Router settings taken from [`Config`]
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    pub max_upload_bytes: usize,
    pub cors: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
            cors: false,
        }
    }
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes(),
            cors: config.cors,
        }
    }
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

impl InventoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
            _ if self.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("Request failed: {}", self);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            log::warn!("Request rejected ({}): {}", status, self);
            self.to_string()
        };
        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

// Extractor rejections (missing body fields, undecodable query or path) use
// the same envelope as every other client error.

impl From<JsonRejection> for InventoryError {
    fn from(rejection: JsonRejection) -> Self {
        InventoryError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for InventoryError {
    fn from(rejection: QueryRejection) -> Self {
        InventoryError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for InventoryError {
    fn from(rejection: PathRejection) -> Self {
        InventoryError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for InventoryError {
    fn from(rejection: MultipartRejection) -> Self {
        InventoryError::Validation(rejection.body_text())
    }
}

type Extracted<T, R> = std::result::Result<T, R>;

/// Amount query parameters
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AmountParams {
    color: String,
    cotton_percentage: f64,
    operator: Option<String>,
}

/// Filtered listing parameters
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterParams {
    min_cotton: Option<f64>,
    max_cotton: Option<f64>,
    color: Option<String>,
    #[serde(default)]
    page: u32,
    #[serde(default = "default_page_size")]
    size: u32,
    #[serde(default = "default_sort_field")]
    sort_field: String,
    #[serde(default = "default_sort_direction")]
    sort_direction: String,
}

fn default_page_size() -> u32 {
    10
}

fn default_sort_field() -> String {
    "cottonPercentage".to_string()
}

fn default_sort_direction() -> String {
    "asc".to_string()
}

impl FilterParams {
    fn into_query(self) -> Result<(SockFilter, PageRequest)> {
        let page = PageRequest::new(
            self.page,
            self.size,
            self.sort_field.parse()?,
            self.sort_direction.parse()?,
        )?;
        let filter = SockFilter {
            min_cotton: self.min_cotton,
            max_cotton: self.max_cotton,
            color: self.color,
        };
        Ok((filter, page))
    }
}

/// GET /health
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /api/socks/income
async fn income_handler(
    State(state): State<AppState>,
    body: Extracted<Json<SockBatch>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Sock>>)> {
    let Json(batch) = body?;
    batch.validate()?;
    let sock = state.with_conn(|conn| inventory::record_arrival(conn, &batch))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(sock))))
}

/// POST /api/socks/outcome
async fn outcome_handler(
    State(state): State<AppState>,
    body: Extracted<Json<SockBatch>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Sock>>)> {
    let Json(batch) = body?;
    batch.validate()?;
    let sock = state.with_conn(|conn| inventory::record_departure(conn, &batch))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(sock))))
}

/// PUT /api/socks/{id}
async fn update_handler(
    State(state): State<AppState>,
    id: Extracted<Path<i64>, PathRejection>,
    body: Extracted<Json<SockUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Sock>>> {
    let Path(id) = id?;
    let Json(update) = body?;
    update.validate()?;
    let sock = state.with_conn(|conn| inventory::update_sock(conn, id, &update))?;
    Ok(Json(ApiResponse::ok(sock)))
}

/// GET /api/socks?color={color}&cottonPercentage={value}&operator={op}
async fn amount_handler(
    State(state): State<AppState>,
    params: Extracted<Query<AmountParams>, QueryRejection>,
) -> Result<Json<ApiResponse<i64>>> {
    let Query(params) = params?;
    validate_cotton_percentage(params.cotton_percentage)?;
    let operator: Operator = params
        .operator
        .as_deref()
        .ok_or_else(|| {
            InventoryError::InvalidArgument("Comparison operator is required".to_string())
        })?
        .parse()?;

    let total = state.with_conn(|conn| {
        inventory::query_amount(conn, &params.color, params.cotton_percentage, operator)
    })?;
    Ok(Json(ApiResponse::ok(total)))
}

/// POST /api/socks/batch (multipart, field `file`)
async fn batch_handler(
    State(state): State<AppState>,
    multipart: Extracted<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ApiResponse<String>>)> {
    let mut multipart = multipart?;
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await.map_err(multipart_error)?;
        upload = Some((file_name, content));
        break;
    }

    let (file_name, content) = upload.ok_or_else(|| {
        InventoryError::Validation("Multipart field 'file' is required".to_string())
    })?;
    log::info!(
        "Upload of sock batch from file: {} ({} bytes)",
        file_name,
        content.len()
    );

    let ImportSummary { inserted, .. } =
        state.with_conn(|conn| inventory::bulk_import(conn, &file_name, &content))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(format!(
            "Batch of socks uploaded successfully: {} records",
            inserted
        ))),
    ))
}

fn multipart_error(err: MultipartError) -> InventoryError {
    InventoryError::InvalidArgument(format!("Invalid multipart body: {}", err))
}

/// GET /api/socks/filter?minCotton=&maxCotton=&color=&page=&size=&sortField=&sortDirection=
async fn filter_handler(
    State(state): State<AppState>,
    params: Extracted<Query<FilterParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Page<Sock>>>> {
    let Query(params) = params?;
    let (filter, page) = params.into_query()?;
    let result = state.with_conn(|conn| inventory::query_filtered(conn, &filter, &page))?;
    Ok(Json(ApiResponse::ok(result)))
}

/// Build the web server router
pub fn create_router(db: Arc<Mutex<Connection>>, options: RouterOptions) -> Router {
    let state = AppState { db };

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/socks", get(amount_handler))
        .route("/api/socks/income", post(income_handler))
        .route("/api/socks/outcome", post(outcome_handler))
        .route("/api/socks/batch", post(batch_handler))
        .route("/api/socks/filter", get(filter_handler))
        .route("/api/socks/{id}", put(update_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(options.max_upload_bytes));

    if options.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Start the web server and run until Ctrl-C
pub async fn serve(
    db: Arc<Mutex<Connection>>,
    config: &Config,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;
    let app = create_router(db, RouterOptions::from(config));

    log::info!("Sock inventory API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(e) => {
            log::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{get_sock_count, init_schema};
    use axum::body::Body;
    use axum::http::{header, Request};
    use rust_xlsxwriter::Workbook;
    use tower::ServiceExt;

    const BOUNDARY: &str = "socks-test-boundary";

    fn test_app() -> (Router, Arc<Mutex<Connection>>) {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let db = Arc::new(Mutex::new(conn));
        (create_router(db.clone(), RouterOptions::default()), db)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn upload_request(file_name: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/socks/batch")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn arrive(app: &Router, color: &str, cotton: f64, amount: i64) {
        let (status, _) = send(
            app,
            json_request(
                "POST",
                "/api/socks/income",
                serde_json::json!({ "color": color, "cottonPercentage": cotton, "amount": amount }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (app, _) = test_app();
        let (status, body) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn income_creates_then_increments() {
        let (app, db) = test_app();
        let body = serde_json::json!({ "color": "Red", "cottonPercentage": 30.0, "amount": 10 });

        let (status, first) = send(&app, json_request("POST", "/api/socks/income", body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["success"], true);
        assert_eq!(first["data"]["amount"], 10);

        let (_, second) = send(&app, json_request("POST", "/api/socks/income", body)).await;
        assert_eq!(second["data"]["amount"], 20);
        assert_eq!(second["data"]["id"], first["data"]["id"]);
        assert_eq!(get_sock_count(&db.lock().unwrap()).unwrap(), 1);
    }

    #[tokio::test]
    async fn income_rejects_invalid_fields() {
        let (app, _) = test_app();
        for body in [
            serde_json::json!({ "color": "Red", "cottonPercentage": 30.0, "amount": 0 }),
            serde_json::json!({ "color": "Red", "cottonPercentage": 101.0, "amount": 5 }),
            serde_json::json!({ "color": "Red", "cottonPercentage": -1.0, "amount": 5 }),
            serde_json::json!({ "color": "", "cottonPercentage": 30.0, "amount": 5 }),
        ] {
            let (status, response) = send(&app, json_request("POST", "/api/socks/income", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["success"], false);
        }
    }

    #[tokio::test]
    async fn income_missing_field_uses_error_envelope() {
        let (app, db) = test_app();
        let body = serde_json::json!({ "color": "Red", "cottonPercentage": 30.0 });
        let (status, response) = send(&app, json_request("POST", "/api/socks/income", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
        assert!(response["error"].as_str().unwrap().contains("amount"));
        assert_eq!(get_sock_count(&db.lock().unwrap()).unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_json_uses_error_envelope() {
        let (app, _) = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/socks/outcome")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"color\": \"Red\","))
            .unwrap();
        let (status, response) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
    }

    #[tokio::test]
    async fn outcome_maps_errors_to_statuses() {
        let (app, _) = test_app();
        let body = serde_json::json!({ "color": "Red", "cottonPercentage": 30.0, "amount": 5 });

        let (status, _) = send(&app, json_request("POST", "/api/socks/outcome", body.clone())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        arrive(&app, "Red", 30.0, 3).await;
        let (status, response) = send(&app, json_request("POST", "/api/socks/outcome", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].as_str().unwrap().contains("Not enough socks"));

        let smaller = serde_json::json!({ "color": "Red", "cottonPercentage": 30.0, "amount": 2 });
        let (status, response) = send(&app, json_request("POST", "/api/socks/outcome", smaller)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response["data"]["amount"], 1);
    }

    #[tokio::test]
    async fn update_returns_not_found_for_missing_id() {
        let (app, _) = test_app();
        let body = serde_json::json!({ "color": "Blue", "cottonPercentage": 50.0 });
        let (status, _) = send(&app, json_request("PUT", "/api/socks/99", body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_rejects_non_numeric_id() {
        let (app, _) = test_app();
        let body = serde_json::json!({ "color": "Blue", "cottonPercentage": 50.0 });
        let (status, response) = send(&app, json_request("PUT", "/api/socks/abc", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
    }

    #[tokio::test]
    async fn update_keeps_amount() {
        let (app, _) = test_app();
        arrive(&app, "Red", 30.0, 10).await;

        let body = serde_json::json!({ "color": "Blue", "cottonPercentage": 50.0 });
        let (status, response) = send(&app, json_request("PUT", "/api/socks/1", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["data"]["color"], "Blue");
        assert_eq!(response["data"]["cottonPercentage"], 50.0);
        assert_eq!(response["data"]["amount"], 10);
    }

    #[tokio::test]
    async fn amount_query_sums_and_reports_missing() {
        let (app, _) = test_app();
        arrive(&app, "Red", 30.0, 10).await;

        let (status, body) = send(
            &app,
            get_request("/api/socks?color=Red&cottonPercentage=30&operator=equal"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], 10);

        let (status, _) = send(
            &app,
            get_request("/api/socks?color=Red&cottonPercentage=30&operator=greaterThan"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn amount_query_rejects_bad_operator() {
        let (app, _) = test_app();
        arrive(&app, "Red", 30.0, 10).await;

        let (status, body) = send(
            &app,
            get_request("/api/socks?color=Red&cottonPercentage=30&operator=between"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("between"));

        let (status, _) = send(&app, get_request("/api/socks?color=Red&cottonPercentage=30")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            get_request("/api/socks?color=Red&cottonPercentage=130&operator=equal"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn amount_query_undecodable_params_use_error_envelope() {
        let (app, _) = test_app();
        for uri in [
            "/api/socks?color=Red&cottonPercentage=abc&operator=equal",
            "/api/socks?cottonPercentage=30&operator=equal",
        ] {
            let (status, body) = send(&app, get_request(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert!(body["error"].is_string());
        }
    }

    #[tokio::test]
    async fn batch_upload_inserts_csv_rows() {
        let (app, db) = test_app();
        arrive(&app, "Red", 30.0, 10).await;

        let csv = b"color,cottonPercentage,amount\nRed,30,4\nBlue,60,2\n";
        let (status, body) = send(&app, upload_request("socks.csv", csv)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["data"].as_str().unwrap().contains("2 records"));
        assert_eq!(get_sock_count(&db.lock().unwrap()).unwrap(), 3);
    }

    #[tokio::test]
    async fn batch_upload_rejects_unsupported_format() {
        let (app, db) = test_app();
        let (status, body) = send(&app, upload_request("socks.txt", b"Red,30,4\n")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains(".xlsx"));
        assert_eq!(get_sock_count(&db.lock().unwrap()).unwrap(), 0);
    }

    #[tokio::test]
    async fn batch_upload_rejects_malformed_csv_row() {
        let (app, db) = test_app();
        let csv = b"color,cottonPercentage,amount\nBlue,60,2\nRed,lots,3\n";
        let (status, body) = send(&app, upload_request("bad.csv", csv)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("Line 3"));
        assert_eq!(get_sock_count(&db.lock().unwrap()).unwrap(), 0);
    }

    #[tokio::test]
    async fn batch_upload_rejects_corrupt_workbook() {
        let (app, db) = test_app();
        let (status, body) = send(&app, upload_request("x.xlsx", b"garbage")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(get_sock_count(&db.lock().unwrap()).unwrap(), 0);
    }

    #[tokio::test]
    async fn batch_upload_inserts_xlsx_rows() {
        let (app, db) = test_app();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "color").unwrap();
        sheet.write_string(0, 1, "cottonPercentage").unwrap();
        sheet.write_string(0, 2, "amount").unwrap();
        sheet.write_string(1, 0, "Green").unwrap();
        sheet.write_number(1, 1, 80.0).unwrap();
        sheet.write_number(1, 2, 12.0).unwrap();
        sheet.write_string(2, 0, "Black").unwrap();
        sheet.write_number(2, 1, 15.0).unwrap();
        sheet.write_number(2, 2, 3.0).unwrap();
        let content = workbook.save_to_buffer().unwrap();

        let (status, body) = send(&app, upload_request("march.xlsx", &content)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["data"].as_str().unwrap().contains("2 records"));
        assert_eq!(get_sock_count(&db.lock().unwrap()).unwrap(), 2);
    }

    #[tokio::test]
    async fn filter_applies_range_color_and_sort() {
        let (app, _) = test_app();
        for (color, cotton, amount) in [
            ("Red", 10.0, 1),
            ("Red", 25.0, 7),
            ("Red", 35.0, 2),
            ("Red", 40.0, 9),
            ("Blue", 30.0, 5),
        ] {
            arrive(&app, color, cotton, amount).await;
        }

        let (status, body) = send(
            &app,
            get_request(
                "/api/socks/filter?minCotton=20&maxCotton=40&color=Red&sortField=amount&sortDirection=desc",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let amounts: Vec<i64> = body["data"]["content"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["amount"].as_i64().unwrap())
            .collect();
        assert_eq!(amounts, vec![9, 7, 2]);
        assert_eq!(body["data"]["totalElements"], 3);
        assert_eq!(body["data"]["size"], 10);
    }

    #[tokio::test]
    async fn filter_rejects_unknown_sort_field() {
        let (app, _) = test_app();
        let (status, _) = send(&app, get_request("/api/socks/filter?sortField=price")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, get_request("/api/socks/filter?page=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[test]
    fn server_errors_hide_details() {
        let response =
            InventoryError::Database(rusqlite::Error::QueryReturnedNoRows).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            InventoryError::Unexpected("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn api_response_error_serialization() {
        let response = ApiResponse::failure("Test error".to_string());
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"Test error\""));
        assert!(!json.contains("\"data\""));
    }
}
