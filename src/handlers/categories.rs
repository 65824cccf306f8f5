// src/handlers/categories.rs

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::{
    envelope::respond,
    error::AppError,
    models::{
        category::{CategoriesResponse, Category, category_map},
        question::{CategoryQuestionsPage, Question},
    },
    utils::pagination::{PageParams, paginate},
};

/// Loads every category ordered by id.
pub(crate) async fn all_categories(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Lists all categories as an `{id: type}` mapping.
pub async fn list_categories(State(pool): State<SqlitePool>) -> Response {
    respond(StatusCode::OK, fetch_categories(&pool).await)
}

async fn fetch_categories(pool: &SqlitePool) -> Result<CategoriesResponse, AppError> {
    let categories = all_categories(pool)
        .await
        .map_err(|e| AppError::store("Error reading categories from database.", e))?;

    if categories.is_empty() {
        return Err(AppError::BadRequest(
            "The server can not find categories or no category exists yet.".to_string(),
        ));
    }

    Ok(CategoriesResponse {
        categories: category_map(categories),
    })
}

/// Lists the questions of one category, paginated.
pub async fn list_category_questions(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    params: PageParams,
) -> Response {
    let Ok(Path(category_id)) = path else {
        return AppError::NotFound("The requested resource was not found.".to_string())
            .into_response();
    };

    respond(
        StatusCode::OK,
        fetch_category_questions(&pool, category_id, params.page()).await,
    )
}

async fn fetch_category_questions(
    pool: &SqlitePool,
    category_id: i64,
    page: usize,
) -> Result<CategoryQuestionsPage, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty
        FROM questions
        WHERE category = ?
        ORDER BY id
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::store("Error reading category questions from database.", e))?;

    if questions.is_empty() {
        return Err(AppError::BadRequest(
            "Server can not find questions for requested category or the category does not exist."
                .to_string(),
        ));
    }

    Ok(CategoryQuestionsPage {
        questions: paginate(page, &questions),
        total_questions: questions.len(),
        current_category: Some(category_id),
    })
}
