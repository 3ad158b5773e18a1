use super::types::{ErrorResponse, GenerateRequest, GenerateResponse};
use crate::provider::{GenerationInput, VideoProvider};
use axum::{
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub api_token: Option<String>,
    pub provider: Arc<dyn VideoProvider>,
}

/// Single endpoint: CORS preflight, method gate, prompt validation,
/// credential check, then one blocking provider call.
pub async fn generate(State(state): State<AppState>, method: Method, body: String) -> Response {
    if method == Method::OPTIONS {
        return preflight();
    }

    if method != Method::POST {
        return json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            &ErrorResponse {
                error: "Method not allowed".to_string(),
            },
        );
    }

    // An absent body arrives as the empty string; treat it as an empty object
    // so the prompt check produces the 400, not the JSON parser.
    let body = if body.is_empty() {
        "{}".to_string()
    } else {
        body
    };

    let request: GenerateRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            error!("Rejecting request with malformed JSON body: {}", e);
            return json_response(
                StatusCode::BAD_REQUEST,
                &ErrorResponse {
                    error: "Malformed JSON body".to_string(),
                },
            );
        }
    };

    if request.prompt.is_empty() {
        return json_response(
            StatusCode::BAD_REQUEST,
            &ErrorResponse {
                error: "Prompt is required".to_string(),
            },
        );
    }

    if state.api_token.is_none() {
        error!("REPLICATE_API_TOKEN is not set; cannot reach the provider");
        return json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ErrorResponse {
                error: "API token not configured".to_string(),
            },
        );
    }

    info!(
        "Received generation request with prompt of {} chars",
        request.prompt.len()
    );

    match state.provider.generate(&GenerationInput::default()).await {
        Ok(output) => {
            info!("Video generation succeeded");
            json_response(
                StatusCode::OK,
                &GenerateResponse {
                    video_url: output.into_video_url(),
                    prompt: request.prompt,
                },
            )
        }
        Err(e) => {
            error!("Video generation failed: {}", e);
            json_response(
                StatusCode::BAD_GATEWAY,
                &ErrorResponse {
                    error: format!("Video generation failed: {e}"),
                },
            )
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let payload = serde_json::to_string(body).unwrap_or_default();
    (
        status,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        payload,
    )
        .into_response()
}

fn preflight() -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (header::ACCESS_CONTROL_MAX_AGE, "86400"),
        ],
        String::new(),
    )
        .into_response()
}
