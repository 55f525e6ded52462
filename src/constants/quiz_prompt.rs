/// Opening line of every quiz generation prompt.
pub const QUIZ_PROMPT_INTRO: &str = "Based on this Wikipedia article, generate a quiz.";

/// Question count range requested from the model.
pub const MIN_QUESTIONS: usize = 5;
pub const MAX_QUESTIONS: usize = 10;

/// Output shape the model is asked to emit. `__TITLE__` is replaced with the article title.
pub const QUIZ_OUTPUT_SCHEMA: &str = r#"{
  "title": "__TITLE__",
  "summary": "2-3 sentence summary",
  "key_entities": {
    "people": ["person1", "person2"],
    "organizations": ["org1"],
    "locations": ["location1"]
  },
  "sections": ["section1", "section2"],
  "quiz": [
    {
      "question": "Question text?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "answer": "The correct option (must match exactly)",
      "difficulty": "easy",
      "explanation": "Why this is correct"
    }
  ],
  "related_topics": ["topic1", "topic2"]
}"#;

pub const QUIZ_PROMPT_RULES: &str = "Important: 
- Generate questions based ONLY on the content provided
- Answer must exactly match one option
- Mix easy, medium, and hard questions
- Return ONLY valid JSON";
