/// Centralized helpers for WebSocket and HTTP error responses.
///
/// Use these helpers to ensure all error messages are consistent, explicit, and include a code and context.
use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;

use crate::server::game_session::messages::ServerMessage;

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_ACTION").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. game_id, offending value).
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    let error = ServerMessage::error(code, message, context);
    serde_json::to_string(&error).unwrap_or_else(|_| {
        r#"{"action":"Error","data":{"code":"INTERNAL","message":"Internal server error","context":""}}"#.to_string()
    })
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context string.
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    let body = json!({
        "error": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(""),
        }
    });
    HttpResponse::build(status).json(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_error_is_tagged_and_escaped() {
        let text = ws_error_message("INVALID_ACTION", "Bad \"quote\"", Some("game-1"));
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["action"], "Error");
        assert_eq!(value["data"]["code"], "INVALID_ACTION");
        assert_eq!(value["data"]["message"], "Bad \"quote\"");
        assert_eq!(value["data"]["context"], "game-1");
    }

    #[test]
    fn http_error_carries_status() {
        let response = http_error_response("INVALID_SEED", "Seed must be a number", None, StatusCode::BAD_REQUEST);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
