//! One handler per store operation. Each forwards its parsed arguments to
//! [`QuestionStore`] and serializes the return value as the response body;
//! rejections and absences are ordinary 200 responses.

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};

use responder_store::{
    Answer, AnswerDraft, Lookup, Outcome, Question, QuestionDraft, QuestionStore,
};

use crate::error::ServerResult;
use crate::extract::Payload;

/// Welcome handler.
pub async fn welcome_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to responder!" }))
}

pub async fn list_questions(State(store): State<QuestionStore>) -> ServerResult<Json<Vec<Question>>> {
    Ok(Json(store.list_questions().await?))
}

pub async fn get_question(
    State(store): State<QuestionStore>,
    Path(question_id): Path<String>,
) -> ServerResult<Json<Lookup<Question>>> {
    Ok(Json(store.get_question_by_id(&question_id).await?))
}

pub async fn add_question(
    State(store): State<QuestionStore>,
    Payload(draft): Payload<QuestionDraft>,
) -> ServerResult<Json<Outcome<Question>>> {
    Ok(Json(store.add_question(draft).await?))
}

pub async fn get_answers(
    State(store): State<QuestionStore>,
    Path(question_id): Path<String>,
) -> ServerResult<Json<Outcome<Vec<Answer>>>> {
    Ok(Json(store.get_answers(&question_id).await?))
}

pub async fn add_answer(
    State(store): State<QuestionStore>,
    Path(question_id): Path<String>,
    Payload(draft): Payload<AnswerDraft>,
) -> ServerResult<Json<Outcome<Answer>>> {
    Ok(Json(store.add_answer(&question_id, draft).await?))
}

pub async fn get_answer(
    State(store): State<QuestionStore>,
    Path((question_id, answer_id)): Path<(String, String)>,
) -> ServerResult<Json<Outcome<Lookup<Answer>>>> {
    Ok(Json(store.get_answer(&question_id, &answer_id).await?))
}
