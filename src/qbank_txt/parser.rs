use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    qbank_txt::{
        error::RejectReason,
        extractor::{extract_fields, question_number},
        normalizer::{Difficulty, Topic},
        report::{Rejection, RunReport},
        slug::{generate_slug, SlugRegistry},
        splitter::{split_blocks, RawBlock, SplitBlocks},
        tokenizer::tokenize_block,
        validator::{validate_extraction, validate_record, IssueKind, ValidationIssue},
    },
    question::QuestionRecord,
    utility::str::head_chars,
};

// length of the block excerpt kept for a rejected block
const EXCERPT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Accepted {
        record: QuestionRecord,
        // found while reading the block, before the record existed
        issues: Vec<ValidationIssue>,
    },
    Rejected(Rejection),
}

/// Accepted questions in source order, and the report of the run that produced them.
#[derive(Debug)]
pub struct ParsedQbankTxt {
    pub records: Vec<QuestionRecord>,
    pub report: RunReport,
}

/// Decodes the raw dump: drops a UTF-8 BOM, replaces invalid bytes, unifies line breaks.
pub fn decode_qbank_txt(bytes: &[u8]) -> String {
    // Word exports mix CR+LF, LF and lone CR
    static REGEX_NEW_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r").unwrap());

    let (txt, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        warn!("Input is not valid UTF-8; invalid bytes were replaced");
    }
    REGEX_NEW_LINE.replace_all(&txt, "\n").into_owned()
}

// block -> tokens -> fields -> record
fn build_record(
    block: &RawBlock,
) -> Result<(QuestionRecord, Vec<ValidationIssue>), RejectReason> {
    let tokens = tokenize_block(block.text);
    let fields = extract_fields(&tokens)?;
    let issues = validate_extraction(&fields);

    let difficulty = match &fields.raw_difficulty {
        Some(raw) => Difficulty::of(raw),
        None => Difficulty::default(),
    };
    let topic = Topic::of(&fields.syllabus_area);
    let slug = generate_slug(&fields.stem, &fields.syllabus_area, fields.number);

    let record = QuestionRecord {
        number: fields.number,
        stem: fields.stem,
        options: fields.options,
        correct: fields.correct,
        rationale: fields.rationale,
        difficulty,
        topic,
        subtopic: fields.syllabus_area,
        reference_source: fields.source_reference,
        slug,
    };

    Ok((record, issues))
}

pub fn parse_block(block: &RawBlock) -> ParseOutcome {
    match build_record(block) {
        Ok((record, issues)) => ParseOutcome::Accepted { record, issues },
        Err(reason) => ParseOutcome::Rejected(Rejection {
            number: question_number(block.text),
            reason,
            excerpt: head_chars(block.text, EXCERPT_CHARS),
        }),
    }
}

/// State that lives across blocks: the accepted questions and the report.
#[derive(Debug)]
pub struct QbankTxtRun {
    records: Vec<QuestionRecord>,
    report: RunReport,
    slugs: SlugRegistry,
}

impl QbankTxtRun {
    pub fn new(split: &SplitBlocks) -> Self {
        Self {
            records: Vec::with_capacity(split.blocks.len()),
            report: RunReport::new(split.discarded),
            slugs: SlugRegistry::new(),
        }
    }

    pub fn push(&mut self, outcome: ParseOutcome) {
        match outcome {
            ParseOutcome::Accepted { record, mut issues } => {
                info!("✓ Parsed question {}", record.number);

                issues.extend(validate_record(&record));
                if let Some(first_number) = self.slugs.register(&record.slug, record.number) {
                    issues.push(ValidationIssue {
                        number: record.number,
                        kind: IssueKind::SlugCollision {
                            slug: record.slug.clone(),
                            first_number,
                        },
                    });
                }

                self.report.record_accepted(&record);
                self.report.record_issues(issues);
                self.records.push(record);
            }

            ParseOutcome::Rejected(rejection) => {
                warn!("✗ Failed to parse block: {}", rejection);
                self.report.record_rejected(rejection);
            }
        }
    }

    pub fn finish(self) -> ParsedQbankTxt {
        ParsedQbankTxt {
            records: self.records,
            report: self.report,
        }
    }
}

/// Parses the whole dump, block by block in source order.
pub fn parse_qbank_txt(txt: &str) -> ParsedQbankTxt {
    let split = split_blocks(txt);

    let mut run = QbankTxtRun::new(&split);
    for block in &split.blocks {
        run.push(parse_block(block));
    }

    run.finish()
}
