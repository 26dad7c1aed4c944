use serde::Serialize;
use thiserror::Error;

/// Why a block was dropped instead of becoming a question.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum RejectReason {
    #[error("block does not start with a question number")]
    MissingQuestionNumber,

    #[error("invalid question number {value:?}: {cause}")]
    InvalidQuestionNumber { value: String, cause: String },

    #[error("has {found} options, expected 4")]
    OptionCount { found: usize },

    #[error("missing \"Correct Answer:\"")]
    MissingCorrectAnswer,

    #[error("correct answer {value:?} is not one of A, B, C, D")]
    InvalidCorrectAnswer { value: String },

    #[error("{description}")]
    Malformed { description: String },
}

impl From<anyhow::Error> for RejectReason {
    fn from(e: anyhow::Error) -> Self {
        RejectReason::Malformed {
            description: format!("{:#}", e),
        }
    }
}
