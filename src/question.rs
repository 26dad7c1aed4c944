use std::fmt;

use serde::Serialize;

use crate::qbank_txt::normalizer::{Difficulty, Topic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn of(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The four answer options of a question, always ordered A, B, C, D.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOptions([String; 4]);

impl QuestionOptions {
    pub fn new(a: String, b: String, c: String, d: String) -> Self {
        Self([a, b, c, d])
    }

    pub fn get(&self, letter: OptionLetter) -> &str {
        &self.0[letter.index()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionLetter, &str)> {
        OptionLetter::ALL
            .into_iter()
            .map(move |letter| (letter, self.get(letter)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub number: usize,
    pub stem: String,
    pub options: QuestionOptions,
    pub correct: OptionLetter,
    pub rationale: String,
    pub difficulty: Difficulty,
    pub topic: Topic,
    pub subtopic: String,
    pub reference_source: String,
    pub slug: String,
}

impl QuestionRecord {
    pub fn correct_option(&self) -> &str {
        self.options.get(self.correct)
    }
}
