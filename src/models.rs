use chrono::Utc;
use chrono_tz::America::New_York;
use serde::{Deserialize, Serialize};

// The fixed subject tracks. Serialized variant names are also the values
// stored in the quiz_results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    CodingTrack,
    MathTrack,
}

impl Subject {
    pub const ALL: [Subject; 2] = [Subject::CodingTrack, Subject::MathTrack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::CodingTrack => "CodingTrack",
            Subject::MathTrack => "MathTrack",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Subject::CodingTrack => "Coding",
            Subject::MathTrack => "Mathematics",
        }
    }

    // Stem of the question document for this subject
    pub fn file_stem(&self) -> &'static str {
        match self {
            Subject::CodingTrack => "coding",
            Subject::MathTrack => "math",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "coding" | "codingtrack" | "code" => Some(Subject::CodingTrack),
            "math" | "mathtrack" | "mathematics" => Some(Subject::MathTrack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Basics,
    Moderate,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Basics, Difficulty::Moderate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Basics => "Basics",
            Difficulty::Moderate => "Moderate",
        }
    }

    pub fn label(&self) -> &'static str {
        self.as_str()
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            Difficulty::Basics => "basics",
            Difficulty::Moderate => "moderate",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basics" | "basic" | "a" => Some(Difficulty::Basics),
            "moderate" | "b" => Some(Difficulty::Moderate),
            _ => None,
        }
    }
}

// One multiple-choice question as it appears in the question documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
}

// One persisted session-result row in the quiz_results table. Store-assigned
// fields are absent on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub date: String,
    pub subject: Subject,
    pub correct: i64,
    pub incorrect: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

// Current calendar date in the store's fixed timezone, YYYY-MM-DD.
pub fn today_eastern() -> String {
    Utc::now()
        .with_timezone(&New_York)
        .format("%Y-%m-%d")
        .to_string()
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
