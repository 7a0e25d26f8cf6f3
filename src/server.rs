//! HTTP API.
//!
//! | Endpoint | Method | Body | Response |
//! |----------|--------|------|----------|
//! | `/chat` | POST | `{"message": "..."}` | `{"response": "...", "tag": "..."}` |
//! | `/chatbot_api/result/` | POST | `{"message": "<student id>"}` | `{"response": "...", "url": "..."}` |
//!
//! Pipeline calls are CPU bound and run on tokio's blocking pool. Every
//! request is logged as `METHOD path -> status (elapsed)` at info level.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::post,
};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::chat::ChatEngine;
use crate::chat::engine::{EMPTY_MESSAGE_RESPONSE, RESULT_FORMAT_RESPONSE};
use crate::error::Result;

const PROCESSING_ERROR_RESPONSE: &str = "An error occurred while processing the request.";
const EMPTY_STUDENT_ID_RESPONSE: &str = "Please provide a student ID.";

/// Request body of both endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body of `/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub tag: String,
}

/// Response body of `/chatbot_api/result/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultResponse {
    pub response: String,
    pub url: String,
}

/// Build the API router around an engine.
pub fn router(engine: ChatEngine) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/chatbot_api/result/", post(fetch_result))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

/// Serve the API on `addr` until the process is stopped.
pub async fn serve(engine: ChatEngine, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(engine)).await?;
    Ok(())
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    info!(
        "{method} {path} -> {} ({:.1} ms)",
        response.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    response
}

/// The `message` field of a JSON body; malformed bodies have none.
fn message_of(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<MessageRequest>(body)
        .ok()
        .and_then(|request| request.message)
}

async fn chat(State(engine): State<ChatEngine>, body: Bytes) -> (StatusCode, Json<ChatResponse>) {
    let request_id = Uuid::new_v4();
    let message = message_of(&body);
    debug!("[{request_id}] /chat {message:?}");

    let outcome = tokio::task::spawn_blocking(move || engine.chat(message.as_deref())).await;

    match outcome {
        Ok(Ok(reply)) => {
            debug!("[{request_id}] tag '{}'", reply.tag);
            (
                StatusCode::OK,
                Json(ChatResponse {
                    response: reply.response,
                    tag: reply.tag,
                }),
            )
        }
        Ok(Err(e)) => {
            debug!("[{request_id}] rejected: {e}");
            error_reply(StatusCode::BAD_REQUEST, EMPTY_MESSAGE_RESPONSE)
        }
        Err(e) => {
            error!("[{request_id}] chat task failed: {e}");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_ERROR_RESPONSE)
        }
    }
}

fn error_reply(status: StatusCode, response: &str) -> (StatusCode, Json<ChatResponse>) {
    (
        status,
        Json(ChatResponse {
            response: response.to_string(),
            tag: "error".to_string(),
        }),
    )
}

async fn fetch_result(
    State(engine): State<ChatEngine>,
    body: Bytes,
) -> (StatusCode, Json<ResultResponse>) {
    let request_id = Uuid::new_v4();
    let student_id = message_of(&body).unwrap_or_default();
    debug!("[{request_id}] /chatbot_api/result/ {student_id:?}");

    if student_id.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ResultResponse {
                response: EMPTY_STUDENT_ID_RESPONSE.to_string(),
                url: String::new(),
            }),
        );
    }

    match tokio::task::spawn_blocking(move || engine.lookup_result(&student_id)).await {
        Ok(response) => {
            let url = if response == RESULT_FORMAT_RESPONSE {
                "result/".to_string()
            } else {
                String::new()
            };
            (StatusCode::OK, Json(ResultResponse { response, url }))
        }
        Err(e) => {
            error!("[{request_id}] result task failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResultResponse {
                    response: PROCESSING_ERROR_RESPONSE.to_string(),
                    url: String::new(),
                }),
            )
        }
    }
}
