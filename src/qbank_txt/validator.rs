use std::fmt;

use serde::Serialize;

use crate::{
    qbank_txt::extractor::ExtractedFields,
    question::{OptionLetter, QuestionRecord},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum IssueKind {
    EmptyStem,
    EmptyRationale,
    EmptyOption { letter: OptionLetter },
    SlugCollision { slug: String, first_number: usize },
    // text after the answer letter, which no output field holds
    AnswerRemainder { text: String },
}

/// Something wrong with a question that was still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub number: usize,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}: ", self.number)?;
        match &self.kind {
            IssueKind::EmptyStem => write!(f, "empty content"),
            IssueKind::EmptyRationale => write!(f, "empty rationale"),
            IssueKind::EmptyOption { letter } => write!(f, "option {} is empty", letter),
            IssueKind::SlugCollision { slug, first_number } => {
                write!(f, "slug {:?} already used by Q{}", slug, first_number)
            }
            IssueKind::AnswerRemainder { text } => {
                write!(f, "text after the answer letter was dropped: {:?}", text)
            }
        }
    }
}

/// Issues about block text that did not make it into any field.
pub fn validate_extraction(fields: &ExtractedFields) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !fields.answer_remainder.is_empty() {
        issues.push(ValidationIssue {
            number: fields.number,
            kind: IssueKind::AnswerRemainder {
                text: fields.answer_remainder.clone(),
            },
        });
    }

    issues
}

pub fn validate_record(record: &QuestionRecord) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut push = |kind| {
        issues.push(ValidationIssue {
            number: record.number,
            kind,
        })
    };

    if record.stem.trim().is_empty() {
        push(IssueKind::EmptyStem);
    }

    for (letter, text) in record.options.iter() {
        if text.trim().is_empty() {
            push(IssueKind::EmptyOption { letter });
        }
    }

    if record.rationale.trim().is_empty() {
        push(IssueKind::EmptyRationale);
    }

    issues
}
