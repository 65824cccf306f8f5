// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use sqlx::{QueryBuilder, Sqlite};

use crate::{
    envelope::respond,
    error::AppError,
    models::{
        question::Question,
        quiz::{PlayQuizRequest, PlayQuizResponse},
    },
    selector::next_question,
    state::AppState,
};

/// Serves the next unseen quiz question.
///
/// The session lives in the payload: `previous_questions` lists what was
/// already served and `quiz_category` optionally narrows the pool. When
/// nothing is left, `forceEnd` is `true` and `question` is `null`.
pub async fn play_quiz(
    State(state): State<AppState>,
    payload: Result<Json<PlayQuizRequest>, JsonRejection>,
) -> Response {
    let result = match payload {
        Ok(Json(request)) => next_quiz_question(&state, request).await,
        Err(rejection) => {
            tracing::debug!("Rejected quiz payload: {}", rejection.body_text());
            Err(AppError::BadRequest(
                "Quiz request must include previous_questions and a valid quiz_category."
                    .to_string(),
            ))
        }
    };

    respond(StatusCode::OK, result)
}

async fn next_quiz_question(
    state: &AppState,
    request: PlayQuizRequest,
) -> Result<PlayQuizResponse, AppError> {
    let category = request.category_filter();

    // Only the category is narrowed in SQL. The history is unbounded and is
    // filtered by the selector, so it never becomes bind parameters.
    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT id, question, answer, category, difficulty FROM questions",
    );
    if let Some(category_id) = category {
        builder.push(" WHERE category = ");
        builder.push_bind(category_id);
    }
    builder.push(" ORDER BY id");

    let pool: Vec<Question> = builder
        .build_query_as()
        .fetch_all(&state.pool)
        .await
        .map_err(|e| AppError::store("Error reading quiz questions from database.", e))?;

    let turn = next_question(
        pool,
        request.previous_questions,
        category,
        state.chooser.as_ref(),
    );

    if turn.force_end {
        tracing::debug!("Quiz exhausted after {} questions", turn.previous_questions.len());
    }

    Ok(PlayQuizResponse {
        previous_questions: turn.previous_questions,
        question: turn.question.map(Into::into),
        force_end: turn.force_end,
    })
}
