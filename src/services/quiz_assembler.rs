use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    errors::AppResult,
    models::domain::{quiz::fallback_summary, ArticleContent, QuizDraft, QuizRecord},
    repositories::QuizRepository,
};

/// Turns a parsed draft into a persisted quiz record.
#[derive(Debug, Default)]
pub struct QuizAssembler {
    last_id: AtomicI64,
}

impl QuizAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Millisecond creation time, bumped past the previous id when two quizzes
    /// are assembled within the same millisecond.
    pub fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let millis = now.timestamp_millis();
        let previous = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(millis.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        millis.max(previous + 1)
    }

    pub fn assemble(&self, draft: QuizDraft, article: &ArticleContent, source_url: &str) -> QuizRecord {
        let now = Utc::now();
        let id = self.next_id(now);
        assemble_record(draft, article, source_url, id, now)
    }

    pub async fn persist(&self, record: &QuizRecord, repository: &dyn QuizRepository) -> AppResult<()> {
        repository.save(record).await?;
        log::info!("Persisted quiz {} under {}", record.id, record.storage_key());
        Ok(())
    }
}

/// Pure merge of draft, article and request metadata with defaults filled in.
pub fn assemble_record(
    draft: QuizDraft,
    article: &ArticleContent,
    source_url: &str,
    id: i64,
    created_at: DateTime<Utc>,
) -> QuizRecord {
    QuizRecord {
        id,
        url: source_url.to_string(),
        title: draft.title,
        summary: draft.summary.unwrap_or_else(|| fallback_summary(article)),
        key_entities: draft.key_entities.unwrap_or_default(),
        sections: draft.sections.unwrap_or_default(),
        quiz: draft.quiz,
        related_topics: draft.related_topics.unwrap_or_default(),
        timestamp: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
