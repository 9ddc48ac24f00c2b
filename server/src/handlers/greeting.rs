use axum::{body::Bytes, extract::State, http::HeaderMap, http::StatusCode};
use platform_api::{ApiError, ApiResult, Envelope};
use platform_authn::API_KEY_HEADER;
use tracing::{debug, info, instrument, warn};

use crate::http::AppState;

pub const GREETING: &str = "Hello Java";
pub const SAVE_MESSAGE: &str = "Data saved successfully";
const MISSING_BODY: &str = "required request body is missing";

pub async fn hello() -> &'static str {
    GREETING
}

/// Echo the request body back to the caller.
#[instrument(name = "greeting.save", skip_all, fields(bytes = body.len()))]
pub async fn save_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<String> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    state.api_keys.validate(presented).map_err(|err| {
        warn!(error = %err, "save rejected");
        ApiError::Unauthorized
    })?;

    if body.is_empty() {
        return Err(ApiError::InvalidInput(MISSING_BODY.into()));
    }

    let text = String::from_utf8(body.to_vec()).map_err(ApiError::processing)?;
    info!(body = %text, "save request received");

    // Logged only; the caller gets the echoed text.
    let receipt = Envelope::message(SAVE_MESSAGE).with_status(StatusCode::OK);
    debug!(?receipt, "save receipt");

    Ok(text)
}
