use serde::Serialize;

/// Fetch timeout for the content-service request, in seconds.
pub const ARTICLE_FETCH_TIMEOUT: u64 = 10;
/// Outer bound on fetch-through-parse, in seconds.
pub const GENERATION_TIMEOUT: u64 = 15;

/// Where a single quiz generation currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "message", rename_all = "snake_case")]
pub enum GenerationPhase {
    Idle,
    FetchingArticle,
    BuildingPrompt,
    AwaitingCompletion,
    ParsingResponse,
    Persisting,
    Done,
    Failed(String),
}

impl GenerationPhase {
    /// The phase that follows on success. Terminal phases stay put.
    pub fn next(&self) -> GenerationPhase {
        match self {
            GenerationPhase::Idle => GenerationPhase::FetchingArticle,
            GenerationPhase::FetchingArticle => GenerationPhase::BuildingPrompt,
            GenerationPhase::BuildingPrompt => GenerationPhase::AwaitingCompletion,
            GenerationPhase::AwaitingCompletion => GenerationPhase::ParsingResponse,
            GenerationPhase::ParsingResponse => GenerationPhase::Persisting,
            GenerationPhase::Persisting => GenerationPhase::Done,
            GenerationPhase::Done => GenerationPhase::Done,
            GenerationPhase::Failed(msg) => GenerationPhase::Failed(msg.clone()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationPhase::Done | GenerationPhase::Failed(_))
    }

    /// Status line shown while the phase is active.
    pub fn label(&self) -> &str {
        match self {
            GenerationPhase::Idle => "",
            GenerationPhase::FetchingArticle => "Fetching Wikipedia article...",
            GenerationPhase::BuildingPrompt | GenerationPhase::AwaitingCompletion => {
                "Generating quiz questions..."
            }
            GenerationPhase::ParsingResponse => "Reading generated quiz...",
            GenerationPhase::Persisting => "Saving quiz...",
            GenerationPhase::Done => "Complete!",
            GenerationPhase::Failed(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_in_fixed_order() {
        let mut phase = GenerationPhase::Idle;
        let mut seen = vec![phase.clone()];
        while !phase.is_terminal() {
            phase = phase.next();
            seen.push(phase.clone());
        }

        assert_eq!(
            seen,
            vec![
                GenerationPhase::Idle,
                GenerationPhase::FetchingArticle,
                GenerationPhase::BuildingPrompt,
                GenerationPhase::AwaitingCompletion,
                GenerationPhase::ParsingResponse,
                GenerationPhase::Persisting,
                GenerationPhase::Done,
            ]
        );
    }

    #[test]
    fn failed_is_terminal_and_carries_message() {
        let failed = GenerationPhase::Failed("overloaded".to_string());
        assert!(failed.is_terminal());
        assert_eq!(failed.next(), failed);
        assert_eq!(failed.label(), "overloaded");
    }

    #[test]
    fn labels_match_status_messages() {
        assert_eq!(
            GenerationPhase::FetchingArticle.label(),
            "Fetching Wikipedia article..."
        );
        assert_eq!(GenerationPhase::Persisting.label(), "Saving quiz...");
        assert_eq!(GenerationPhase::Done.label(), "Complete!");
    }

    #[test]
    fn phase_serializes_with_tag() {
        let json = serde_json::to_value(GenerationPhase::Failed("boom".into())).unwrap();
        assert_eq!(json["phase"], "failed");
        assert_eq!(json["message"], "boom");
    }
}
