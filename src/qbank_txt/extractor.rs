use std::collections::BTreeMap;

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{
    qbank_txt::{
        error::RejectReason,
        tokenizer::{Marker, QbankTxtToken},
    },
    question::{OptionLetter, QuestionOptions},
    utility::str::parse_number,
};

/// Fields of one block before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub number: usize,
    pub stem: String,
    pub options: QuestionOptions,
    pub correct: OptionLetter,
    pub rationale: String,
    // None when the block has no "Difficulty:" label
    pub raw_difficulty: Option<String>,
    pub syllabus_area: String,
    pub source_reference: String,
    // whatever follows the answer letter, e.g. "B (see note)"
    pub answer_remainder: String,
}

// Fields in the order they appear in a block. A marker ends the current
// field only when it starts a later one; otherwise it is part of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Field {
    Stem,
    Option(OptionLetter),
    Hint,
    AnswerKey,
    CorrectAnswer,
    Rationale,
    Difficulty,
    SyllabusArea,
    SourceReference,
}

impl Field {
    fn of(marker: Marker) -> Self {
        match marker {
            Marker::OptionStart(letter) => Self::Option(letter),
            Marker::Hint => Self::Hint,
            Marker::AnswerKey => Self::AnswerKey,
            Marker::CorrectAnswer(_) => Self::CorrectAnswer,
            Marker::Rationale => Self::Rationale,
            Marker::Difficulty => Self::Difficulty,
            Marker::SyllabusArea => Self::SyllabusArea,
            Marker::SourceReference => Self::SourceReference,
        }
    }
}

#[derive(Debug, Default)]
struct Fields {
    values: BTreeMap<Field, String>,
    answer: Option<char>,
}

impl Fields {
    fn ends(&self, current: Field, next: Field) -> bool {
        match (current, next) {
            // the stem may mention labels; only an option closes it
            (Field::Stem, next) => matches!(next, Field::Option(_)),

            // options may come in any order, each letter once
            (Field::Option(open), Field::Option(letter)) => {
                letter != open && !self.values.contains_key(&Field::Option(letter))
            }

            (current, next) => next > current,
        }
    }

    fn close(&mut self, field: Field, value: &mut String) {
        self.values.insert(field, value.trim().to_owned());
        value.clear();
    }

    fn take(&mut self, field: Field) -> Option<String> {
        self.values.remove(&field)
    }
}

// "12." followed by the stem
static REGEX_NUMBER_AND_STEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(?P<number>\d+)\.(?P<stem>.*)$").unwrap());

/// The question number at the start of a block, when it can be read.
pub fn question_number(block: &str) -> Option<usize> {
    let caps = REGEX_NUMBER_AND_STEM.captures(block.trim_start())?;
    parse_number(&caps["number"]).ok()
}

/// Reads the question fields out of the tokens of one block.
pub fn extract_fields(tokens: &[QbankTxtToken]) -> Result<ExtractedFields, RejectReason> {
    let mut fields = Fields::default();
    let mut current = Field::Stem;
    let mut value = String::new();

    for token in tokens {
        match token {
            QbankTxtToken::Text(text) => value.push_str(text),

            QbankTxtToken::Marker(marker, raw) => {
                let next = Field::of(*marker);
                if !fields.ends(current, next) {
                    debug!("{:?} inside {:?} is kept as text", raw, current);
                    value.push_str(raw);
                    continue;
                }

                fields.close(current, &mut value);
                current = next;
                if let Marker::CorrectAnswer(letter) = marker {
                    fields.answer = Some(*letter);
                }
            }
        }
    }
    fields.close(current, &mut value);

    // number and stem: everything before the first option
    let (number, stem) = {
        let leading = fields.take(Field::Stem).unwrap_or_default();
        let caps = REGEX_NUMBER_AND_STEM
            .captures(&leading)
            .ok_or(RejectReason::MissingQuestionNumber)?;

        let value = &caps["number"];
        let number =
            parse_number(value).map_err(|e| RejectReason::InvalidQuestionNumber {
                value: value.to_owned(),
                cause: e.to_string(),
            })?;

        (number, caps["stem"].trim().to_owned())
    };

    let found = OptionLetter::ALL
        .into_iter()
        .filter(|letter| fields.values.contains_key(&Field::Option(*letter)))
        .count();
    if found != OptionLetter::ALL.len() {
        return Err(RejectReason::OptionCount { found });
    }
    let options = {
        let mut take = |letter: OptionLetter| {
            fields
                .take(Field::Option(letter))
                .with_context(|| format!("Option {} vanished", letter))
        };
        QuestionOptions::new(
            take(OptionLetter::A)?,
            take(OptionLetter::B)?,
            take(OptionLetter::C)?,
            take(OptionLetter::D)?,
        )
    };

    let correct = {
        let answer = fields.answer.ok_or(RejectReason::MissingCorrectAnswer)?;
        OptionLetter::of(answer).ok_or_else(|| RejectReason::InvalidCorrectAnswer {
            value: answer.to_string(),
        })?
    };

    let rationale = fields.take(Field::Rationale).unwrap_or_else(|| {
        debug!("Q{}: no rationale", number);
        String::new()
    });

    Ok(ExtractedFields {
        number,
        stem,
        options,
        correct,
        rationale,
        raw_difficulty: fields.take(Field::Difficulty),
        syllabus_area: fields.take(Field::SyllabusArea).unwrap_or_default(),
        source_reference: fields.take(Field::SourceReference).unwrap_or_default(),
        answer_remainder: fields.take(Field::CorrectAnswer).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qbank_txt::tokenizer::tokenize_block;

    fn extract(block: &str) -> Result<ExtractedFields, RejectReason> {
        extract_fields(&tokenize_block(block))
    }

    const FULL: &str = "12. Which statement is true?\nA. Opt one\nB. Opt two\nC. Opt three\nD. Opt four\nCorrect Answer: B\nRationale: Because.\nDifficulty: 2 (MODERATE)\nNPPE Syllabus Area: II.3\nSource Reference: Code S.1";

    #[test]
    fn full_block() {
        let fields = extract(FULL).unwrap();
        assert_eq!(fields.number, 12);
        assert_eq!(fields.stem, "Which statement is true?");
        assert_eq!(fields.options.get(OptionLetter::A), "Opt one");
        assert_eq!(fields.options.get(OptionLetter::D), "Opt four");
        assert_eq!(fields.correct, OptionLetter::B);
        assert_eq!(fields.rationale, "Because.");
        assert_eq!(fields.raw_difficulty.as_deref(), Some("2 (MODERATE)"));
        assert_eq!(fields.syllabus_area, "II.3");
        assert_eq!(fields.source_reference, "Code S.1");
        assert_eq!(fields.answer_remainder, "");
    }

    #[test]
    fn multi_line_fields() {
        let block = "3. A stem\nover two lines\nA. one\ncontinued\nB. two\nC. three\nD. four\nHint: none\nAnswer Key\nCorrect Answer: D\nRationale: First.\nSecond.\nSource Reference: Act,\ns. 4";
        let fields = extract(block).unwrap();
        assert_eq!(fields.stem, "A stem\nover two lines");
        assert_eq!(fields.options.get(OptionLetter::A), "one\ncontinued");
        assert_eq!(fields.options.get(OptionLetter::D), "four");
        assert_eq!(fields.correct, OptionLetter::D);
        assert_eq!(fields.rationale, "First.\nSecond.");
        assert_eq!(fields.raw_difficulty, None);
        assert_eq!(fields.syllabus_area, "");
        assert_eq!(fields.source_reference, "Act,\ns. 4");
    }

    #[test]
    fn labels_inside_the_stem() {
        let block = "2. Per the Answer Key convention, which item is listed first?\nHint: rows\nA. one\nB. two\nC. three\nD. four\nCorrect Answer: A";
        let fields = extract(block).unwrap();
        assert_eq!(
            fields.stem,
            "Per the Answer Key convention, which item is listed first?\nHint: rows"
        );
        assert_eq!(fields.options.get(OptionLetter::A), "one");
    }

    #[test]
    fn rationale_walks_through_the_choices() {
        let block = "9. Stem\nA. one\nB. two\nC. three\nD. four\nCorrect Answer: B\nRationale: Consider each choice:\nA. is wrong because of X.\nB. is right because of Y.\nDifficulty: 1 (EASY)\nNPPE Syllabus Area: I.2";
        let fields = extract(block).unwrap();
        assert_eq!(
            fields.rationale,
            "Consider each choice:\nA. is wrong because of X.\nB. is right because of Y."
        );
        assert_eq!(fields.options.get(OptionLetter::A), "one");
        assert_eq!(fields.raw_difficulty.as_deref(), Some("1 (EASY)"));
        assert_eq!(fields.syllabus_area, "I.2");
    }

    #[test]
    fn earlier_labels_inside_the_rationale() {
        let block = "10. Stem\nA. one\nB. two\nC. three\nD. four\nCorrect Answer: C\nRationale: The Hint: column is advisory only. The Correct Answer: C is final.\nDifficulty: 3 (DIFFICULT)";
        let fields = extract(block).unwrap();
        assert_eq!(
            fields.rationale,
            "The Hint: column is advisory only. The Correct Answer: C is final."
        );
        assert_eq!(fields.correct, OptionLetter::C);
    }

    #[test]
    fn answer_wording_inside_an_option() {
        let block = "11. Stem\nA. one\nB. two\nC. three\nD. None; the Correct Answer: field is left blank\nCorrect Answer: D\nRationale: r";
        let fields = extract(block).unwrap();
        assert_eq!(
            fields.options.get(OptionLetter::D),
            "None; the Correct Answer: field is left blank"
        );
        assert_eq!(fields.correct, OptionLetter::D);
        assert_eq!(fields.rationale, "r");
    }

    #[test]
    fn hint_closes_an_option() {
        let block = "13. Stem\nA. one\nB. two\nC. three\nD. four Hint: look at B\nAnswer Key\nCorrect Answer: B";
        let fields = extract(block).unwrap();
        assert_eq!(fields.options.get(OptionLetter::D), "four");
        assert_eq!(fields.correct, OptionLetter::B);
    }

    #[test]
    fn text_after_the_answer_letter() {
        let block = "14. Stem\nA. one\nB. two\nC. three\nD. four\nCorrect Answer: B (see note)\nRationale: r";
        let fields = extract(block).unwrap();
        assert_eq!(fields.correct, OptionLetter::B);
        assert_eq!(fields.answer_remainder, "(see note)");
    }

    #[test]
    fn missing_option_is_rejected_with_count() {
        let block = "4. Stem\nA. one\nB. two\nD. four\nCorrect Answer: A";
        assert_eq!(
            extract(block),
            Err(RejectReason::OptionCount { found: 3 })
        );
    }

    #[test]
    fn no_options_at_all() {
        assert_eq!(
            extract("5. Stem only\nCorrect Answer: A"),
            Err(RejectReason::OptionCount { found: 0 })
        );
    }

    #[test]
    fn repeated_option_letter_stays_in_the_text() {
        let block = "6. Stem\nA. one\nA. again\nB. two\nC. three\nD. four\nCorrect Answer: C";
        let fields = extract(block).unwrap();
        assert_eq!(fields.options.get(OptionLetter::A), "one\nA. again");
        assert_eq!(fields.options.get(OptionLetter::B), "two");
    }

    #[test]
    fn missing_correct_answer() {
        let block = "7. Stem\nA. one\nB. two\nC. three\nD. four\nRationale: r";
        assert_eq!(extract(block), Err(RejectReason::MissingCorrectAnswer));

        let block = "7. Stem\nA. one\nB. two\nC. three\nD. four\nCorrect Answer:\nRationale: r";
        assert_eq!(extract(block), Err(RejectReason::MissingCorrectAnswer));
    }

    #[test]
    fn invalid_correct_answer() {
        let block = "8. Stem\nA. one\nB. two\nC. three\nD. four\nCorrect Answer: E";
        assert_eq!(
            extract(block),
            Err(RejectReason::InvalidCorrectAnswer {
                value: "E".to_owned()
            })
        );
    }

    #[test]
    fn missing_number() {
        assert_eq!(
            extract("Question. A stem"),
            Err(RejectReason::MissingQuestionNumber)
        );
        assert_eq!(extract("A. one"), Err(RejectReason::MissingQuestionNumber));
    }

    #[test]
    fn number_of_raw_block() {
        assert_eq!(question_number("12. Stem\nA. one"), Some(12));
        assert_eq!(question_number("Stem"), None);
        assert_eq!(question_number("99999999999999999999999. Stem"), None);
    }

    #[test]
    fn number_too_large() {
        let block = "99999999999999999999999. Stem\nA. one\nB. two\nC. three\nD. four\nCorrect Answer: A";
        assert!(matches!(
            extract(block),
            Err(RejectReason::InvalidQuestionNumber { .. })
        ));
    }
}
