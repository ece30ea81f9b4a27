use tracing::info;

use crate::db;
use crate::error::{QuizError, Result};
use crate::models::{HistoryEntry, NewQuiz, QuizRecord};
use crate::quiz;
use crate::AppState;

/// Return the stored quiz for `url`, scraping and synthesizing one on first request.
///
/// The URL is validated before anything else, so unsupported sources never
/// reach the network or the store. Two requests racing on a fresh URL both
/// synthesize, but only one insert wins the UNIQUE constraint; the loser
/// returns the winner's record.
pub async fn generate(state: &AppState, url: &str) -> Result<QuizRecord> {
    let url = url.trim().to_string();
    state.extractor.policy().validate(&url)?;

    let key = url.clone();
    if let Some(cached) = state.store.run(move |conn| db::find_by_url(conn, &key)).await? {
        info!("Cache hit for {} (quiz {})", url, cached.id);
        return Ok(cached);
    }

    let article = state.extractor.extract(&url).await?;
    let questions = quiz::synthesize(
        &article.full_text(),
        &article.title,
        state.settings.question_count,
    );
    info!(
        "Synthesized {} questions for \"{}\" from {} paragraphs",
        questions.len(),
        article.title,
        article.paragraphs.len()
    );

    let new_quiz = NewQuiz {
        url: url.clone(),
        title: article.title.clone(),
        summary: article.summary(),
        related_topics: article.sections,
        raw_markup: article.raw_markup,
        questions,
    };

    let created = state.store.run(move |conn| db::create(conn, &new_quiz)).await;
    match created {
        Ok(record) => {
            info!("Stored quiz {} for {}", record.id, url);
            Ok(record)
        }
        Err(QuizError::DuplicateUrl(_)) => {
            info!("Quiz for {} was stored concurrently, returning it", url);
            let key = url.clone();
            state
                .store
                .run(move |conn| db::find_by_url(conn, &key))
                .await?
                .ok_or_else(|| QuizError::Internal(format!("quiz for {} vanished", url)))
        }
        Err(e) => Err(e),
    }
}

pub async fn history(state: &AppState, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
    state.store.run(move |conn| db::list_history(conn, limit)).await
}

pub async fn quiz_by_id(state: &AppState, id: i64) -> Result<QuizRecord> {
    state.store.run(move |conn| db::get(conn, id)).await
}
