use std::collections::HashMap;

const SLUG_WORDS: usize = 6;

/// First six words of the stem, then the syllabus code (or the question number).
pub fn generate_slug(stem: &str, syllabus_area: &str, number: usize) -> String {
    let cleaned: String = stem
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let base = cleaned
        .split_whitespace()
        .take(SLUG_WORDS)
        .collect::<Vec<_>>()
        .join("-");

    let area: String = syllabus_area
        .chars()
        .filter(|&c| c != '.' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    // an area made only of dots and spaces counts as no area
    let suffix = if area.is_empty() {
        format!("q{}", number)
    } else {
        area
    };

    // the hyphen stays even when the stem gave no words
    format!("{}-{}", base, suffix)
}

/// Remembers which question first used each slug during a run.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    first_use: HashMap<String, usize>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of the question that already owns `slug`, if any.
    pub fn register(&mut self, slug: &str, number: usize) -> Option<usize> {
        match self.first_use.get(slug) {
            Some(&first) => Some(first),
            None => {
                self.first_use.insert(slug.to_owned(), number);
                None
            }
        }
    }
}
