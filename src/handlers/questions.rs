// src/handlers/questions.rs

use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    db,
    envelope::{Empty, respond},
    error::AppError,
    handlers::categories::all_categories,
    models::{
        category::{Category, category_map},
        question::{
            CreateQuestionRequest, CreatedQuestion, INVALID_PAYLOAD, Question, QuestionPage,
            QuestionsRequest, SearchRequest,
        },
    },
    state::AppState,
    utils::{
        pagination::{PageParams, paginate},
        random::choose,
    },
};

const CREATE_FAILED: &str = "Error adding new question to database.";
const DELETE_FAILED: &str = "Error deleting target question.";

/// Lists all questions ordered by id, paginated, with the category mapping.
///
/// `current_category` is always `null` here.
pub async fn list_questions(
    State(pool): State<SqlitePool>,
    params: PageParams,
) -> Response {
    respond(StatusCode::OK, fetch_question_page(&pool, params.page()).await)
}

async fn fetch_question_page(pool: &SqlitePool, page: usize) -> Result<QuestionPage, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::store("Error reading questions from database.", e))?;

    let categories = all_categories(pool)
        .await
        .map_err(|e| AppError::store("Error reading categories from database.", e))?;

    if questions.is_empty() || categories.is_empty() {
        return Err(AppError::BadRequest(
            "No questions/categories retrieved from database.".to_string(),
        ));
    }

    Ok(QuestionPage {
        questions: paginate(page, &questions),
        total_questions: questions.len(),
        categories: category_map(categories),
        current_category: None,
    })
}

/// Single entry point for `POST /questions`: searches when the payload has a
/// `searchTerm`, creates a question otherwise.
pub async fn post_questions(
    State(state): State<AppState>,
    params: PageParams,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(value)) => QuestionsRequest::from_payload(value),
        Err(rejection) => {
            tracing::debug!("Rejected questions payload: {}", rejection.body_text());
            Err(AppError::BadRequest(INVALID_PAYLOAD.to_string()))
        }
    };

    match request {
        Ok(QuestionsRequest::Search(search)) => respond(
            StatusCode::OK,
            search_questions(&state, search, params.page()).await,
        ),
        Ok(QuestionsRequest::Create(create)) => {
            respond(StatusCode::CREATED, create_question(&state.pool, create).await)
        }
        Err(err) => err.into_envelope::<CreatedQuestion>(),
    }
}

/// Escapes LIKE wildcards so the term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring search over question text.
///
/// The category mapping covers only categories of the matched questions, and
/// `current_category` is one of those ids picked at random.
async fn search_questions(
    state: &AppState,
    search: SearchRequest,
    page: usize,
) -> Result<QuestionPage, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty
        FROM questions
        WHERE question LIKE ? ESCAPE '\'
        ORDER BY id
        "#,
    )
    .bind(like_pattern(&search.search_term))
    .fetch_all(&state.pool)
    .await
    .map_err(|e| AppError::store("Error searching questions.", e))?;

    let category_ids: Vec<i64> = questions
        .iter()
        .map(|q| q.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let categories = if category_ids.is_empty() {
        Vec::new()
    } else {
        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT id, type FROM categories WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in &category_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        builder
            .build_query_as::<Category>()
            .fetch_all(&state.pool)
            .await
            .map_err(|e| AppError::store("Error searching questions.", e))?
    };

    let current_category = choose(state.chooser.as_ref(), &category_ids).copied();

    tracing::debug!(
        "Search '{}' matched {} questions",
        search.search_term,
        questions.len()
    );

    Ok(QuestionPage {
        questions: paginate(page, &questions),
        total_questions: questions.len(),
        categories: category_map(categories),
        current_category,
    })
}

/// Inserts a new question inside its own transaction.
async fn create_question(
    pool: &SqlitePool,
    payload: CreateQuestionRequest,
) -> Result<CreatedQuestion, AppError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::store(CREATE_FAILED, e))?;

    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questions (question, answer, category, difficulty)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&payload.question)
    .bind(&payload.answer)
    .bind(payload.category)
    .bind(payload.difficulty)
    .fetch_one(&mut *tx)
    .await;

    let id = match inserted {
        Ok(id) => id,
        Err(e) => {
            db::rollback(tx).await;
            return Err(AppError::store(CREATE_FAILED, e));
        }
    };

    tx.commit()
        .await
        .map_err(|e| AppError::store(CREATE_FAILED, e))?;

    tracing::info!("Created question {}", id);

    Ok(CreatedQuestion {
        id,
        question: payload.question,
        answer: payload.answer,
        category: payload.category,
        difficulty: payload.difficulty,
    })
}

/// Deletes a question by id. Success is `204 No Content` with no body.
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(id)) = path else {
        return AppError::NotFound("The requested resource was not found.".to_string())
            .into_response();
    };

    match remove_question(&pool, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_envelope::<Empty>(),
    }
}

async fn remove_question(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::store(DELETE_FAILED, e))?;

    let result = match sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            db::rollback(tx).await;
            return Err(AppError::store(DELETE_FAILED, e));
        }
    };

    if result.rows_affected() == 0 {
        db::rollback(tx).await;
        return Err(AppError::NotFound(
            "Target question does not exist or already deleted.".to_string(),
        ));
    }

    tx.commit()
        .await
        .map_err(|e| AppError::store(DELETE_FAILED, e))?;

    tracing::info!("Deleted question {}", id);
    Ok(())
}
