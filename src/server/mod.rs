//! HTTP content service
//!
//! `GET ?type=<articles|blog|books>[&id=<n>]` answers with the JSON list or
//! a single document. A `CorsLayer` allows any origin and answers `OPTIONS`
//! pre-flight requests with an empty 200.

use anyhow::Result;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::content::ContentKind;
use crate::error::ContentError;
use crate::service::ContentService;
use crate::Site;

/// Server state
struct ServerState {
    service: ContentService,
}

/// Query string of a content request
#[derive(Debug, Default, Deserialize)]
struct ContentQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<String>,
}

/// Build the router serving `service`
pub fn router(service: ContentService) -> Router {
    let state = Arc::new(ServerState { service });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", any(content_handler))
        .route("/api/content", any(content_handler))
        .route("/.netlify/functions/get-content", any(content_handler))
        .layer(cors)
        // Pre-flight replies come from the CORS layer and need it too
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the content server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let app = router(site.service());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Content service running at http://{}:{}/?type=articles", ip, port);
    println!("Serving content from {}", site.content_dir.display());
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down content service");
}

/// Answer a content request
async fn content_handler(
    State(state): State<Arc<ServerState>>,
    query: std::result::Result<Query<ContentQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            tracing::debug!("Rejected query string: {}", e);
            return error_response(&ContentError::InvalidKind(String::new()));
        }
    };

    // File reads are blocking; keep them off the async workers
    let result = tokio::task::spawn_blocking(move || answer(&state.service, &query)).await;

    match result {
        Ok(Ok(body)) => json_response(StatusCode::OK, body),
        Ok(Err(e)) => error_response(&e),
        Err(e) => error_response(&ContentError::internal(e.to_string())),
    }
}

/// Resolve a query into the serialized list or document
fn answer(service: &ContentService, query: &ContentQuery) -> Result<String, ContentError> {
    let kind = query
        .kind
        .as_deref()
        .and_then(ContentKind::from_query)
        .ok_or_else(|| ContentError::InvalidKind(query.kind.clone().unwrap_or_default()))?;

    let body = match query.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        None => serde_json::to_string(&service.list(kind)?),
        Some(raw) => {
            let id = raw
                .parse::<u32>()
                .map_err(|_| ContentError::not_found(kind.param(), raw))?;
            serde_json::to_string(&service.get(kind, id)?)
        }
    };

    body.map_err(|e| ContentError::internal(e.to_string()))
}

fn error_response(err: &ContentError) -> Response {
    let (status, body) = match err {
        ContentError::InvalidKind(_) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid type parameter" }),
        ),
        ContentError::NotFound { kind, .. } => (
            StatusCode::NOT_FOUND,
            json!({ "error": format!("{} item not found", kind) }),
        ),
        other => {
            tracing::error!("Content request failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error", "details": other.to_string() }),
            )
        }
    };
    json_response(status, body.to_string())
}

fn json_response(status: StatusCode, body: String) -> Response {
    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
