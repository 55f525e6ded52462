use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Unknown labels fall back to `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map(|l| Difficulty::from_label(&l)).unwrap_or_default())
    }
}

impl QuizQuestion {
    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer == selected
    }

    /// Index of the option whose text is exactly the answer.
    pub fn answer_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o == &self.answer)
    }

    /// Option text matching the answer once whitespace and case are ignored.
    pub fn loosely_matching_option(&self) -> Option<&str> {
        let wanted = self.answer.trim().to_lowercase();
        self.options
            .iter()
            .find(|o| o.trim().to_lowercase() == wanted)
            .map(String::as_str)
    }
}
