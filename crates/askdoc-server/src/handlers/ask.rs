//! Question endpoint.
//!
//! Answers a question and records the exchange in the session's document.

use std::sync::Arc;

use askdoc_core::Question;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::state::AppState;

/// Session used when the request names none.
const DEFAULT_SESSION_ID: &str = "default";

/// Request body for POST /ask.
#[derive(Debug, Deserialize)]
pub(crate) struct AskRequest {
    question: String,
    #[serde(default = "default_session_id")]
    session_id: String,
    #[serde(default = "default_keepgoing")]
    keepgoing: bool,
    #[serde(default)]
    user_display: Option<String>,
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_owned()
}

fn default_keepgoing() -> bool {
    true
}

impl From<AskRequest> for Question {
    fn from(request: AskRequest) -> Self {
        Self {
            text: request.question,
            session_id: request.session_id,
            keep_going: request.keepgoing,
            user_display: request.user_display,
        }
    }
}

/// Response for POST /ask.
#[derive(Debug, Serialize)]
pub(crate) struct AskResponse {
    answer: String,
    document_id: String,
}

/// Handle POST /ask.
pub(crate) async fn post_ask(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ServerError> {
    let Json(request) = body.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
    let question = Question::from(request);

    let guard = Arc::clone(&state.gate).lock_owned().await;
    tracing::info!(session_id = %question.session_id, "Answering question");

    let worker = Arc::clone(&state);
    let answer = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        worker.conversation().ask(&question)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))??;

    if !answer.fully_recorded() {
        tracing::warn!(
            document_id = %answer.document_id,
            failed = answer.question_report.failed_blocks.len()
                + answer.answer_report.failed_blocks.len(),
            "Exchange only partially recorded"
        );
    }

    Ok(Json(AskResponse {
        answer: answer.answer,
        document_id: answer.document_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_defaults() {
        let request: AskRequest = serde_json::from_str(r#"{"question": "hi"}"#).unwrap();
        let question = Question::from(request);

        assert_eq!(question.text, "hi");
        assert_eq!(question.session_id, "default");
        assert!(question.keep_going);
        assert_eq!(question.user_display, None);
    }

    #[test]
    fn test_request_all_fields() {
        let request: AskRequest = serde_json::from_str(
            r#"{"question": "q", "session_id": "s9", "keepgoing": false, "user_display": "me"}"#,
        )
        .unwrap();
        let question = Question::from(request);

        assert_eq!(question.session_id, "s9");
        assert!(!question.keep_going);
        assert_eq!(question.user_display.as_deref(), Some("me"));
    }

    #[test]
    fn test_response_serialization() {
        let response = AskResponse {
            answer: "42".to_owned(),
            document_id: "page-1".to_owned(),
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({"answer": "42", "document_id": "page-1"}));
    }
}
