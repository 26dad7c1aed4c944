use crate::{question::QuestionRecord, utility::str::collapse_whitespace};

const QUESTION_TYPE: &str = "multiple_choice_single";

// Double-quoted YAML scalar: escapes and keeps everything on one line
fn yaml_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in collapse_whitespace(value).chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Renders one question as a `.qbank.md` unit: front matter, stem, options, explanation.
pub fn render_record(record: &QuestionRecord) -> String {
    let mut lines = Vec::new();

    lines.push("---".to_owned());
    lines.push(format!("type: {}", QUESTION_TYPE));
    lines.push(format!("difficulty: {}", record.difficulty.as_str()));
    lines.push(format!("topic: {}", yaml_quote(record.topic.name())));
    if !record.subtopic.is_empty() {
        lines.push(format!("subtopic: {}", yaml_quote(&record.subtopic)));
    }
    lines.push("province:".to_owned());
    lines.push("active: true".to_owned());
    lines.push(format!(
        "reference_source: {}",
        yaml_quote(&record.reference_source)
    ));
    lines.push(format!("slug: {}", yaml_quote(&record.slug)));
    lines.push("---".to_owned());
    lines.push(String::new());

    lines.push(format!("**{}**", collapse_whitespace(&record.stem)));
    lines.push(String::new());

    for (letter, text) in record.options.iter() {
        let marker = if letter == record.correct { "[x]" } else { "[ ]" };
        lines.push(format!("- {} {}", marker, collapse_whitespace(text)));
    }
    lines.push(String::new());

    lines.push(format!(
        "**Explanation:** {}",
        collapse_whitespace(&record.rationale)
    ));

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

/// The whole output file: rendered questions separated by a blank line.
pub fn render_qbank_md(records: &[QuestionRecord]) -> String {
    records
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join("\n")
}
