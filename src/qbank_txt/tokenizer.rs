use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::question::OptionLetter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    OptionStart(OptionLetter), // "A." at line start
    Hint,                      // Hint:
    AnswerKey,                 // Answer Key
    CorrectAnswer(char),       // Correct Answer: B
    Rationale,                 // Rationale:
    Difficulty,                // Difficulty:
    SyllabusArea,              // NPPE Syllabus Area:
    SourceReference,           // Source Reference:
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QbankTxtToken {
    Text(String),

    // the matched source text is kept, so a marker that does not end
    // the current field can be put back into it
    Marker(Marker, String),
}

// Every marker in one alternation, so a block is scanned exactly once.
// Option letters only count at the start of a line; labels count anywhere.
// "Correct Answer:" only counts when a single capital letter follows it.
static REGEX_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)(?P<option>^[ \t]*(?P<letter>[A-D])\.(?:[ \t]+|\r?$))",
        r"|(?P<correct>Correct Answer:\s*(?P<answer>[A-Z])\b)",
        r"|(?P<hint>Hint:)",
        r"|(?P<answer_key>Answer Key)",
        r"|(?P<rationale>Rationale:)",
        r"|(?P<difficulty>Difficulty:)",
        r"|(?P<syllabus_area>NPPE Syllabus Area:)",
        r"|(?P<source_reference>Source Reference:)",
    ))
    .unwrap()
});

const LABEL_GROUPS: [(&str, Marker); 6] = [
    ("hint", Marker::Hint),
    ("answer_key", Marker::AnswerKey),
    ("rationale", Marker::Rationale),
    ("difficulty", Marker::Difficulty),
    ("syllabus_area", Marker::SyllabusArea),
    ("source_reference", Marker::SourceReference),
];

fn marker_of(caps: &Captures) -> Option<Marker> {
    if let Some(letter) = caps.name("letter") {
        return letter
            .as_str()
            .chars()
            .next()
            .and_then(OptionLetter::of)
            .map(Marker::OptionStart);
    }

    if let Some(answer) = caps.name("answer") {
        return answer.as_str().chars().next().map(Marker::CorrectAnswer);
    }

    LABEL_GROUPS
        .iter()
        .find(|(name, _)| caps.name(name).is_some())
        .map(|(_, marker)| *marker)
}

// Lexes one block into markers and the text between them, in source order.
// Text is kept verbatim, whitespace included, so the block can be rebuilt
// by concatenating every token.
pub fn tokenize_block(block: &str) -> Vec<QbankTxtToken> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for caps in REGEX_MARKER.captures_iter(block) {
        let whole = match caps.get(0) {
            Some(whole) => whole,
            None => continue,
        };
        let marker = match marker_of(&caps) {
            Some(marker) => marker,
            None => continue,
        };

        push_text(&mut tokens, &block[last_end..whole.start()]);
        last_end = whole.end();

        tokens.push(QbankTxtToken::Marker(marker, whole.as_str().to_owned()));
    }

    push_text(&mut tokens, &block[last_end..]);

    tokens
}

fn push_text(tokens: &mut Vec<QbankTxtToken>, text: &str) {
    if text.is_empty() {
        return;
    }
    tokens.push(QbankTxtToken::Text(text.to_owned()));
}
