use once_cell::sync::Lazy;
use regex::Regex;

// 80 or more hyphens separate two questions
static REGEX_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{80,}").unwrap());

// "12." at the very start of a block
static REGEX_QUESTION_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

/// A trimmed span between two delimiters that looks like a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    // position of the span among all delimiter-separated spans
    pub span_index: usize,
    pub text: &'a str,
}

#[derive(Debug)]
pub struct SplitBlocks<'a> {
    pub blocks: Vec<RawBlock<'a>>,
    pub span_count: usize,
    // empty spans and headers/footers without a question number
    pub discarded: usize,
}

pub fn split_blocks(txt: &str) -> SplitBlocks<'_> {
    let mut blocks = Vec::new();
    let mut span_count = 0;
    let mut discarded = 0;

    for (span_index, span) in REGEX_DELIMITER.split(txt).enumerate() {
        span_count += 1;

        let text = span.trim();
        if text.is_empty() || !REGEX_QUESTION_START.is_match(text) {
            discarded += 1;
            continue;
        }

        blocks.push(RawBlock { span_index, text });
    }

    SplitBlocks {
        blocks,
        span_count,
        discarded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(n: usize) -> String {
        "-".repeat(n)
    }

    #[test]
    fn splits_on_long_rules_only() {
        let txt = format!(
            "1. First\n{}\n2. Second with a short rule {}\n{}\n3. Third",
            rule(80),
            rule(79),
            rule(120)
        );
        let split = split_blocks(&txt);
        assert_eq!(split.span_count, 3);
        assert_eq!(split.discarded, 0);
        assert_eq!(split.blocks.len(), 3);
        assert!(split.blocks[1].text.contains(&rule(79)));
        assert_eq!(split.blocks[2].text, "3. Third");
    }

    #[test]
    fn discards_headers_and_empty_spans() {
        let txt = format!(
            "NPPE Question Bank\nRevision 1\n{r}\n\n   \n{r}\n  7. Kept\n{r}\nPage 3 of 40",
            r = rule(80)
        );
        let split = split_blocks(&txt);
        assert_eq!(split.span_count, 4);
        assert_eq!(split.discarded, 3);
        assert_eq!(split.blocks.len(), 1);
        assert_eq!(split.blocks[0].span_index, 2);
        assert_eq!(split.blocks[0].text, "7. Kept");
    }

    #[test]
    fn empty_input() {
        let split = split_blocks("");
        assert_eq!(split.span_count, 1);
        assert_eq!(split.discarded, 1);
        assert!(split.blocks.is_empty());
    }
}
