use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::{
    qbank_txt::{
        error::RejectReason,
        normalizer::{Difficulty, Topic},
        validator::ValidationIssue,
    },
    question::QuestionRecord,
};

// issues listed in the summary before "... and N more"
const SHOWN_ISSUES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    // None when the number itself could not be read
    pub number: Option<usize>,
    pub reason: RejectReason,
    // first 100 characters of the block
    pub excerpt: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(f, "Q{}: {}", number, self.reason)?,
            None => write!(f, "?: {}", self.reason)?,
        }
        write!(f, " [{}...]", self.excerpt.replace('\n', " "))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub spans_discarded: usize,
    pub blocks_seen: usize,
    pub accepted: usize,
    pub rejections: Vec<Rejection>,
    pub topics: BTreeMap<String, usize>,
    pub difficulties: BTreeMap<Difficulty, usize>,
    pub issues: Vec<ValidationIssue>,
}

impl RunReport {
    pub fn new(spans_discarded: usize) -> Self {
        Self {
            spans_discarded,
            difficulties: Difficulty::ALL.into_iter().map(|d| (d, 0)).collect(),
            ..Self::default()
        }
    }

    pub fn record_accepted(&mut self, record: &QuestionRecord) {
        self.blocks_seen += 1;
        self.accepted += 1;
        *self
            .topics
            .entry(record.topic.name().to_owned())
            .or_insert(0) += 1;
        *self.difficulties.entry(record.difficulty).or_insert(0) += 1;
    }

    pub fn record_rejected(&mut self, rejection: Rejection) {
        self.blocks_seen += 1;
        self.rejections.push(rejection);
    }

    pub fn record_issues(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }

    pub fn topic_count(&self, topic: Topic) -> usize {
        self.topics.get(topic.name()).copied().unwrap_or(0)
    }

    pub fn difficulty_count(&self, difficulty: Difficulty) -> usize {
        self.difficulties.get(&difficulty).copied().unwrap_or(0)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Summary:")?;
        writeln!(f, "  Blocks seen: {}", self.blocks_seen)?;
        writeln!(f, "  Accepted: {}", self.accepted)?;
        writeln!(f, "  Rejected: {}", self.rejected())?;
        if self.spans_discarded > 0 {
            writeln!(
                f,
                "  Skipped (no question number): {}",
                self.spans_discarded
            )?;
        }

        let topics = self
            .topics
            .iter()
            .map(|(topic, count)| format!("{} ({})", topic, count))
            .collect::<Vec<_>>();
        writeln!(f, "  Topics: {}", topics.join(", "))?;

        let difficulties = self
            .difficulties
            .iter()
            .map(|(difficulty, count)| format!("{}: {}", difficulty, count))
            .collect::<Vec<_>>();
        writeln!(f, "  Difficulty distribution: {}", difficulties.join(", "))?;

        if !self.rejections.is_empty() {
            writeln!(f)?;
            writeln!(f, "Rejected blocks ({}):", self.rejections.len())?;
            for rejection in &self.rejections {
                writeln!(f, "  {}", rejection)?;
            }
        }

        writeln!(f)?;
        if self.issues.is_empty() {
            write!(f, "No validation issues found")
        } else {
            writeln!(f, "Issues found ({}):", self.issues.len())?;
            for issue in self.issues.iter().take(SHOWN_ISSUES) {
                writeln!(f, "  {}", issue)?;
            }
            if self.issues.len() > SHOWN_ISSUES {
                writeln!(f, "  ... and {} more", self.issues.len() - SHOWN_ISSUES)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qbank_txt::validator::IssueKind;

    fn issue(number: usize) -> ValidationIssue {
        ValidationIssue {
            number,
            kind: IssueKind::EmptyRationale,
        }
    }

    #[test]
    fn lists_every_difficulty_even_when_unused() {
        let report = RunReport::new(0);
        assert_eq!(report.difficulty_count(Difficulty::Easy), 0);
        assert_eq!(report.difficulties.len(), 3);
        assert!(report
            .to_string()
            .contains("Difficulty distribution: easy: 0, medium: 0, hard: 0"));
    }

    #[test]
    fn truncates_issue_list() {
        let mut report = RunReport::new(0);
        report.record_issues((1..=7).map(issue));
        let text = report.to_string();
        assert!(text.contains("Issues found (7):"));
        assert!(text.contains("  Q5: empty rationale"));
        assert!(!text.contains("  Q6: empty rationale"));
        assert!(text.contains("  ... and 2 more"));
    }

    #[test]
    fn rejection_line() {
        let rejection = Rejection {
            number: Some(4),
            reason: RejectReason::OptionCount { found: 3 },
            excerpt: "4. Stem\nA. one".to_owned(),
        };
        assert_eq!(
            rejection.to_string(),
            "Q4: has 3 options, expected 4 [4. Stem A. one...]"
        );
    }
}
