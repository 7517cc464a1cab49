use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use responder_store::QuestionStore;

use crate::handler;

/// Build the axum router with all Responder endpoints.
pub fn build_router(store: QuestionStore) -> Router {
    Router::new()
        .route("/", get(handler::welcome_handler))
        .route(
            "/questions",
            get(handler::list_questions).post(handler::add_question),
        )
        .route("/questions/:question_id", get(handler::get_question))
        .route(
            "/questions/:question_id/answers",
            get(handler::get_answers).post(handler::add_answer),
        )
        .route(
            "/questions/:question_id/answers/:answer_id",
            get(handler::get_answer),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
