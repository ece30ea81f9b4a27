use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One multiple-choice question. `options` holds `answer` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
    pub difficulty: Difficulty,
}

/// JSON blob stored in `quizzes.quiz_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizPayload {
    pub quiz: Vec<Question>,
    pub related_topics: Vec<String>,
}

/// Persisted, write-once quiz for one source URL.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRecord {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub questions: Vec<Question>,
    pub related_topics: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for [`crate::db::create`].
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub url: String,
    pub title: String,
    pub summary: String,
    pub raw_markup: String,
    pub questions: Vec<Question>,
    pub related_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub date_generated: DateTime<Utc>,
}

// ── API bodies ──

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub url: String,
}

/// Body of `POST /generate_quiz/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub quiz: Vec<Question>,
    pub related_topics: Vec<String>,
}

impl QuizResponse {
    pub fn from_record(record: &QuizRecord) -> Self {
        Self {
            id: record.id,
            url: record.url.clone(),
            title: record.title.clone(),
            summary: record.summary.clone(),
            quiz: record.questions.clone(),
            related_topics: record.related_topics.clone(),
        }
    }
}

/// Body of `GET /quiz/{id}`: the stored payload as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuiz {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub date_generated: DateTime<Utc>,
    pub full_quiz_data: QuizPayload,
}

impl From<QuizRecord> for StoredQuiz {
    fn from(record: QuizRecord) -> Self {
        Self {
            id: record.id,
            url: record.url,
            title: record.title,
            summary: record.summary,
            date_generated: record.created_at,
            full_quiz_data: QuizPayload {
                quiz: record.questions,
                related_topics: record.related_topics,
            },
        }
    }
}
