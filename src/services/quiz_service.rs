use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::watch;

use crate::{
    errors::{AppError, AppResult, GenerationFailure},
    models::domain::{ArticleContent, QuizDraft, QuizRecord, QuizScore},
    repositories::QuizRepository,
    services::{
        article_fetcher::ArticleFetcher,
        completion_client::CompletionClient,
        orchestrator_steps::GenerationPhase,
        prompt_builder::build_quiz_prompt,
        quiz_assembler::QuizAssembler,
        quiz_attempt_service::QuizAttemptService,
        response_parser::parse_quiz_response,
    },
};

const WIKI_URL_MARKER: &str = "wikipedia.org/wiki/";

/// Checks performed before any network call.
pub fn validate_source_url(url: &str) -> AppResult<()> {
    if url.trim().is_empty() {
        return Err(AppError::InvalidUrl("Please enter a Wikipedia URL".to_string()));
    }
    if !url.contains(WIKI_URL_MARKER) {
        return Err(AppError::InvalidUrl(
            "Please enter a valid Wikipedia URL (e.g., https://en.wikipedia.org/wiki/Article_Name)"
                .to_string(),
        ));
    }
    Ok(())
}

/// Runs quiz generation end to end and serves the persisted history.
pub struct QuizService {
    fetcher: Arc<dyn ArticleFetcher>,
    completion: Arc<dyn CompletionClient>,
    repository: Arc<dyn QuizRepository>,
    assembler: QuizAssembler,
    generation_timeout: Duration,
}

impl QuizService {
    pub fn new(
        fetcher: Arc<dyn ArticleFetcher>,
        completion: Arc<dyn CompletionClient>,
        repository: Arc<dyn QuizRepository>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            completion,
            repository,
            assembler: QuizAssembler::new(),
            generation_timeout,
        }
    }

    pub async fn generate_quiz(&self, url: &str) -> Result<QuizRecord, GenerationFailure> {
        let (progress, _) = watch::channel(GenerationPhase::Idle);
        self.generate_quiz_with_progress(url, &progress).await
    }

    /// Like [`generate_quiz`](Self::generate_quiz), publishing each phase on `progress`.
    pub async fn generate_quiz_with_progress(
        &self,
        url: &str,
        progress: &watch::Sender<GenerationPhase>,
    ) -> Result<QuizRecord, GenerationFailure> {
        progress.send_replace(GenerationPhase::Idle);
        let url = url.trim();

        match self.run_pipeline(url, progress).await {
            Ok(record) => {
                advance(progress);
                log::info!("Generated quiz {} with {} questions", record.id, record.question_count());
                Ok(record)
            }
            Err(error) => {
                let during_fetch = *progress.borrow() == GenerationPhase::FetchingArticle;
                let failure = GenerationFailure::new(error, during_fetch);
                log::error!("Quiz generation error for {}: {}", url, failure.error);
                progress.send_replace(GenerationPhase::Failed(failure.message.clone()));
                Err(failure)
            }
        }
    }

    async fn run_pipeline(
        &self,
        url: &str,
        progress: &watch::Sender<GenerationPhase>,
    ) -> AppResult<QuizRecord> {
        validate_source_url(url)?;

        let (article, draft) =
            tokio::time::timeout(self.generation_timeout, self.fetch_through_parse(url, progress))
                .await
                .map_err(|_| {
                    AppError::Timeout("Request timed out. Please try again.".to_string())
                })??;

        advance(progress);
        let record = self.assembler.assemble(draft, &article, url);
        self.assembler.persist(&record, self.repository.as_ref()).await?;
        Ok(record)
    }

    async fn fetch_through_parse(
        &self,
        url: &str,
        progress: &watch::Sender<GenerationPhase>,
    ) -> AppResult<(ArticleContent, QuizDraft)> {
        advance(progress);
        let article = self.fetcher.fetch(url).await?;
        log::info!(
            "Fetched article '{}' ({} characters)",
            article.title,
            article.extract_len()
        );
        article.ensure_substantial()?;

        advance(progress);
        let prompt = build_quiz_prompt(&article);

        advance(progress);
        let raw = self.completion.complete(&prompt).await?;

        advance(progress);
        let draft = parse_quiz_response(&raw)?;

        Ok((article, draft))
    }

    /// Every persisted quiz, newest first.
    pub async fn load_history(&self) -> AppResult<Vec<QuizRecord>> {
        self.repository.list_history().await
    }

    pub async fn get_quiz(&self, id: i64) -> AppResult<QuizRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn score_quiz(&self, id: i64, answers: &HashMap<usize, String>) -> AppResult<QuizScore> {
        let record = self.get_quiz(id).await?;
        Ok(QuizAttemptService::score(&record, answers))
    }
}

/// Moves `progress` to the following phase. A terminal phase is left as is.
fn advance(progress: &watch::Sender<GenerationPhase>) {
    progress.send_if_modified(|phase| {
        if phase.is_terminal() {
            return false;
        }
        *phase = phase.next();
        log::info!("Quiz generation phase: {}", phase.label());
        true
    });
}
