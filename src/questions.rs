use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Difficulty, Question, Subject};

const DEFAULT_QUESTIONS_DIR: &str = "questions";

#[derive(Debug, Error)]
pub enum QuestionLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid question {index} in {path}: {reason}")]
    Invalid {
        path: String,
        index: usize,
        reason: String,
    },
}

// Loads the fixed question documents, one per (subject, difficulty) pair.
#[derive(Debug, Clone)]
pub struct QuestionSource {
    dir: PathBuf,
}

impl QuestionSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    // Directory precedence: explicit override, then environment, then the
    // questions directory next to the working directory.
    pub fn resolve(override_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = override_dir {
            return Self::new(dir);
        }
        if let Ok(dir) = std::env::var("LETSLEARN_QUESTIONS") {
            return Self::new(dir);
        }
        Self::new(DEFAULT_QUESTIONS_DIR)
    }

    pub fn document_path(&self, subject: Subject, difficulty: Difficulty) -> PathBuf {
        self.dir
            .join(format!("{}-{}.json", subject.file_stem(), difficulty.file_stem()))
    }

    pub fn load(
        &self,
        subject: Subject,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>, QuestionLoadError> {
        let path = self.document_path(subject, difficulty);
        let text = fs::read_to_string(&path).map_err(|source| QuestionLoadError::Io {
            path: display_path(&path),
            source,
        })?;
        let questions: Vec<Question> =
            serde_json::from_str(&text).map_err(|source| QuestionLoadError::Parse {
                path: display_path(&path),
                source,
            })?;
        validate(&path, &questions)?;
        Ok(questions)
    }
}

// Untrusted document shape is checked at the boundary so nothing past here
// has to re-check choice counts or answer bounds.
fn validate(path: &Path, questions: &[Question]) -> Result<(), QuestionLoadError> {
    for (index, q) in questions.iter().enumerate() {
        if q.choices.len() < 2 {
            return Err(QuestionLoadError::Invalid {
                path: display_path(path),
                index,
                reason: format!("expected at least 2 choices, got {}", q.choices.len()),
            });
        }
        if q.answer_index >= q.choices.len() {
            return Err(QuestionLoadError::Invalid {
                path: display_path(path),
                index,
                reason: format!(
                    "answerIndex {} out of bounds for {} choices",
                    q.answer_index,
                    q.choices.len()
                ),
            });
        }
    }
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
