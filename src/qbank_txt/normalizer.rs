use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Maps the raw "Difficulty:" text. Checked in this order; anything else is medium.
    pub fn of(raw: &str) -> Self {
        if raw.contains("1 (EASY)") {
            Self::Easy
        } else if raw.contains("2 (MODERATE)") {
            Self::Medium
        } else if raw.contains("3 (DIFFICULT)") {
            Self::Hard
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// NPPE syllabus areas, keyed by the roman numeral before the first '.'
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Professionalism,               // I
    EthicsAndProfessionalPractice, // II
    ProfessionalLawAndLiability,   // III
    LawRegulationAndEnvironment,   // IV
    RegulationAndLicensing,        // V
    General,
}

impl Topic {
    pub fn of(syllabus_area: &str) -> Self {
        let prefix = syllabus_area
            .split('.')
            .next()
            .unwrap_or_default()
            .trim()
            .to_uppercase();

        match prefix.as_str() {
            "I" => Self::Professionalism,
            "II" => Self::EthicsAndProfessionalPractice,
            "III" => Self::ProfessionalLawAndLiability,
            "IV" => Self::LawRegulationAndEnvironment,
            "V" => Self::RegulationAndLicensing,
            _ => Self::General,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Professionalism => "Professionalism",
            Self::EthicsAndProfessionalPractice => "Ethics & Professional Practice",
            Self::ProfessionalLawAndLiability => "Professional Law & Liability",
            Self::LawRegulationAndEnvironment => "Law, Regulation & Environment",
            Self::RegulationAndLicensing => "Regulation & Licensing",
            Self::General => "General",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
