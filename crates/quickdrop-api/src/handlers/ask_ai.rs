//! Question answering over the most recently uploaded file.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AskAiRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskAiResponse {
    pub answer: String,
}

impl AskAiResponse {
    fn new(answer: impl Into<String>) -> Json<Self> {
        Json(AskAiResponse {
            answer: answer.into(),
        })
    }
}

/// `POST /ask_ai` - answer a question about the last uploaded file.
///
/// Context is always the most recently inserted record; there is no
/// per-session document selection. AI failures come back as an error string
/// in the answer with a 200, never a 5xx.
pub async fn ask_ai(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskAiRequest>,
) -> (StatusCode, Json<AskAiResponse>) {
    let question = request.question.trim();
    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            AskAiResponse::new("Please ask a valid question."),
        );
    }

    let Some(record) = state.registry.last_inserted() else {
        return (
            StatusCode::OK,
            AskAiResponse::new("No uploaded file found for context."),
        );
    };

    let Some(ai) = &state.ai else {
        return (StatusCode::OK, AskAiResponse::new("AI is not configured."));
    };

    match ai.answer(&record.extracted_text, question).await {
        Ok(answer) => (StatusCode::OK, AskAiResponse::new(answer)),
        Err(e) => {
            tracing::warn!(error = %e, link_id = %record.id, "Question answering failed");
            (StatusCode::OK, AskAiResponse::new(format!("Error: {e:#}")))
        }
    }
}
