//! Request DTOs.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Signup request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    /// Full display name.
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    /// Email address, used as the login identifier.
    #[validate(email)]
    pub email: String,
    /// Plaintext password, policy-checked before hashing.
    pub password: String,
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Subject create/update payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubjectRequest {
    /// Subject name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Free-form description.
    pub about: Option<String>,
}

/// Chapter create/update payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChapterRequest {
    /// Chapter name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Free-form description.
    pub about: Option<String>,
}

/// Quiz create/update payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizRequest {
    /// Chapter this quiz belongs to.
    pub chapter_id: Uuid,
    /// Quiz title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Time limit in minutes.
    #[validate(range(min = 1, max = 600))]
    pub duration_minutes: i32,
    /// Optional remarks shown to the user.
    pub remarks: Option<String>,
}

/// Question create/update payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionRequest {
    /// The question text.
    #[validate(length(min = 1))]
    pub statement: String,
    /// Answer options, at least two.
    #[validate(length(min = 2))]
    pub options: Vec<String>,
    /// Zero-based index of the correct option.
    pub correct_option: i32,
}

/// One answer in an exam submission.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerItem {
    /// The question being answered.
    pub question_id: Uuid,
    /// Zero-based index of the selected option.
    pub selected_option: i32,
}

/// Exam submission: the user's answers for a quiz attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamSubmission {
    /// Selected answers.
    pub answers: Vec<AnswerItem>,
}

/// Common `?q=` search query parameter.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchQuery {
    /// Optional search fragment.
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_request_about_is_optional() {
        let req: SubjectRequest = serde_json::from_str(r#"{"name": "Physics"}"#).unwrap();
        assert!(req.about.is_none());
        assert_eq!(req.about.unwrap_or_default(), "");
    }

    #[test]
    fn test_chapter_request_about_is_optional() {
        let req: ChapterRequest = serde_json::from_str(r#"{"name": "Waves"}"#).unwrap();
        assert!(req.about.is_none());
    }
}
