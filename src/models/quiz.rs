// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;

use crate::models::question::Question;

/// Category selector sent by the quiz client, e.g. `{"type": "click", "id": 0}`.
///
/// Only `id` is read; the display `type` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
}

impl QuizCategory {
    /// The category to restrict to; a missing or zero id means all categories.
    pub fn filter(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }
}

/// DTO for requesting the next quiz question.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayQuizRequest {
    /// Ids already served in this session, oldest first.
    pub previous_questions: Vec<i64>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl PlayQuizRequest {
    pub fn category_filter(&self) -> Option<i64> {
        self.quiz_category.as_ref().and_then(QuizCategory::filter)
    }
}

/// The served quiz question: the prompt and its answer, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

impl From<Question> for QuizQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
        }
    }
}

/// Response fields of `POST /quizzes`.
#[derive(Debug, Default, Serialize)]
pub struct PlayQuizResponse {
    #[serde(rename = "previousQuestions")]
    pub previous_questions: Vec<i64>,
    pub question: Option<QuizQuestion>,
    #[serde(rename = "forceEnd")]
    pub force_end: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> PlayQuizRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_zero_id_means_all_categories() {
        let req = parse(json!({
            "previous_questions": [],
            "quiz_category": {"type": "click", "id": 0}
        }));
        assert_eq!(req.category_filter(), None);
    }

    #[test]
    fn test_missing_category_means_all_categories() {
        assert_eq!(parse(json!({"previous_questions": [3]})).category_filter(), None);
        assert_eq!(
            parse(json!({"previous_questions": [], "quiz_category": null})).category_filter(),
            None
        );
        assert_eq!(
            parse(json!({"previous_questions": [], "quiz_category": {"type": "click"}}))
                .category_filter(),
            None
        );
    }

    #[test]
    fn test_category_id_as_number_or_string() {
        let numeric = parse(json!({"previous_questions": [], "quiz_category": {"id": 2}}));
        assert_eq!(numeric.category_filter(), Some(2));

        let text = parse(json!({"previous_questions": [], "quiz_category": {"id": "4"}}));
        assert_eq!(text.category_filter(), Some(4));
    }

    #[test]
    fn test_malformed_requests_are_rejected() {
        assert!(serde_json::from_value::<PlayQuizRequest>(json!({})).is_err());
        assert!(
            serde_json::from_value::<PlayQuizRequest>(json!({"previous_questions": "1,2"}))
                .is_err()
        );
        assert!(
            serde_json::from_value::<PlayQuizRequest>(json!({
                "previous_questions": [],
                "quiz_category": {"id": "science"}
            }))
            .is_err()
        );
    }

    #[test]
    fn test_response_field_names() {
        let value = serde_json::to_value(PlayQuizResponse {
            previous_questions: vec![1],
            question: None,
            force_end: true,
        })
        .unwrap();
        assert_eq!(
            value,
            json!({"previousQuestions": [1], "question": null, "forceEnd": true})
        );
    }

    #[test]
    fn test_served_question_omits_category_and_difficulty() {
        let served = QuizQuestion::from(Question {
            id: 7,
            question: "Which planet is largest?".to_string(),
            answer: "Jupiter".to_string(),
            category: 1,
            difficulty: 2,
        });
        assert_eq!(
            serde_json::to_value(served).unwrap(),
            json!({"id": 7, "question": "Which planet is largest?", "answer": "Jupiter"})
        );
    }
}
