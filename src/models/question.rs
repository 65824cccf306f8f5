// src/models/question.rs

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use serde_json::Value;
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::{error::AppError, models::category::CategoryMap};

pub const INVALID_PAYLOAD: &str = "None or invalid question format sent to server.";
pub const MISSING_FIELDS: &str = "Required question data fields not sent to server.";

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The prompt shown to the player.
    pub question: String,

    pub answer: String,

    /// Logical reference to `categories.id`. Not enforced by the store and
    /// may point at a category that no longer exists.
    pub category: i64,

    pub difficulty: i64,
}

/// DTO for sending a question to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.question.clone(),
            answer: q.answer.clone(),
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

/// DTO for creating a new question.
///
/// `category` and `difficulty` accept either JSON numbers or numeric strings.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[validate(range(min = 1))]
    pub category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[validate(range(min = 1))]
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub search_term: String,
}

/// The two operations served by `POST /questions`, keyed on `searchTerm`.
#[derive(Debug, Clone)]
pub enum QuestionsRequest {
    Search(SearchRequest),
    Create(CreateQuestionRequest),
}

impl QuestionsRequest {
    /// Classifies a decoded JSON payload.
    ///
    /// A non-empty string `searchTerm` selects search; otherwise all four
    /// creation fields must be present and valid.
    pub fn from_payload(payload: Value) -> Result<Self, AppError> {
        let fields = match &payload {
            Value::Object(fields) if !fields.is_empty() => fields,
            _ => return Err(AppError::BadRequest(INVALID_PAYLOAD.to_string())),
        };

        match fields.get("searchTerm") {
            Some(Value::String(term)) if !term.is_empty() => {
                return Ok(QuestionsRequest::Search(SearchRequest {
                    search_term: term.clone(),
                }));
            }
            Some(Value::Null) | Some(Value::String(_)) | None => {}
            Some(_) => return Err(AppError::BadRequest(INVALID_PAYLOAD.to_string())),
        }

        let request: CreateQuestionRequest = serde_json::from_value(payload)
            .map_err(|_| AppError::BadRequest(MISSING_FIELDS.to_string()))?;
        request
            .validate()
            .map_err(|_| AppError::BadRequest(MISSING_FIELDS.to_string()))?;

        Ok(QuestionsRequest::Create(request))
    }
}

/// Response fields of the listing and search endpoints.
#[derive(Debug, Default, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<PublicQuestion>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: Option<i64>,
}

/// Response fields of `GET /categories/{id}/questions`.
#[derive(Debug, Default, Serialize)]
pub struct CategoryQuestionsPage {
    pub questions: Vec<PublicQuestion>,
    pub total_questions: usize,
    pub current_category: Option<i64>,
}

/// Response fields echoed back after a question is created.
#[derive(Debug, Default, Serialize)]
pub struct CreatedQuestion {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rejected(payload: Value) -> String {
        match QuestionsRequest::from_payload(payload) {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_search_term_selects_search() {
        let req = QuestionsRequest::from_payload(json!({"searchTerm": "title"})).unwrap();
        assert!(matches!(
            req,
            QuestionsRequest::Search(SearchRequest { ref search_term }) if search_term == "title"
        ));
    }

    #[test]
    fn test_search_term_wins_over_create_fields() {
        let req = QuestionsRequest::from_payload(json!({
            "searchTerm": "sky",
            "question": "What color is the sky?",
            "answer": "Blue",
            "category": 1,
            "difficulty": 1
        }))
        .unwrap();
        assert!(matches!(req, QuestionsRequest::Search(_)));
    }

    #[test]
    fn test_create_accepts_numeric_strings() {
        let req = QuestionsRequest::from_payload(json!({
            "question": "Capital of CA?",
            "answer": "Sacramento",
            "category": "2",
            "difficulty": 3
        }))
        .unwrap();

        match req {
            QuestionsRequest::Create(create) => {
                assert_eq!(create.category, 2);
                assert_eq!(create.difficulty, 3);
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_search_term_falls_through_to_create() {
        let msg = rejected(json!({"searchTerm": ""}));
        assert_eq!(msg, MISSING_FIELDS);
    }

    #[test]
    fn test_empty_and_non_object_payloads() {
        assert_eq!(rejected(json!({})), INVALID_PAYLOAD);
        assert_eq!(rejected(json!([1, 2])), INVALID_PAYLOAD);
        assert_eq!(rejected(json!("DSFGHF")), INVALID_PAYLOAD);
        assert_eq!(rejected(json!({"searchTerm": 5})), INVALID_PAYLOAD);
    }

    #[test]
    fn test_missing_or_empty_create_fields() {
        assert_eq!(
            rejected(json!({"question": "Capital of CA?", "category": "5", "difficulty": 3})),
            MISSING_FIELDS
        );
        assert_eq!(
            rejected(json!({"question": "", "answer": "a", "category": 1, "difficulty": 1})),
            MISSING_FIELDS
        );
        assert_eq!(
            rejected(json!({"question": "q", "answer": "a", "category": 0, "difficulty": 1})),
            MISSING_FIELDS
        );
        assert_eq!(
            rejected(json!({"question": "q", "answer": "a", "category": "two", "difficulty": 1})),
            MISSING_FIELDS
        );
    }
}
