// src/handlers/quizzes.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::quiz::{QuizRequest, QuizResponse},
    retrieval,
    store::SharedStore,
};

/// Returns one random question the player has not seen yet.
pub async fn next_question(
    State(store): State<SharedStore>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let question = retrieval::draw_quiz_question(store.as_ref(), &request).await?;

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
