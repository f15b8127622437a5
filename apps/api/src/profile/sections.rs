//! Section splitting: partitions normalized résumé text into labeled sections.
//!
//! Header recognition is table-driven: `SECTION_HEADERS` pairs each section key with a
//! case-insensitive pattern anchored at line start. Words after the header word
//! ("Skills & Tools", "Summary:") do not stop a match.
//! The first matching row wins.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Contact,
    References,
    Other,
}

impl SectionKey {
    pub const ALL: [SectionKey; 10] = [
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Projects,
        SectionKey::Certifications,
        SectionKey::Languages,
        SectionKey::Contact,
        SectionKey::References,
        SectionKey::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
            SectionKey::Certifications => "certifications",
            SectionKey::Languages => "languages",
            SectionKey::Contact => "contact",
            SectionKey::References => "references",
            SectionKey::Other => "other",
        }
    }
}

/// Header patterns, tried in order. Each body is wrapped as `(?i)^(?:body)\b`: anchored at
/// line start and ending on a word boundary, so "Skills & Tools" is a header and
/// "Experienced engineer" is not.
const HEADER_PATTERNS: &[(SectionKey, &str)] = &[
    (
        SectionKey::Summary,
        r"(?:professional\s+|career\s+)?(?:summary|profile|objective)|about(?:\s+me)?",
    ),
    (
        SectionKey::Experience,
        r"(?:work\s+|professional\s+)?experience|employment(?:\s+history)?|work\s+history",
    ),
    (
        SectionKey::Education,
        r"education|academics?|academic\s+background",
    ),
    (
        SectionKey::Skills,
        r"(?:technical\s+|core\s+|key\s+)?skills|competencies",
    ),
    (
        SectionKey::Projects,
        r"(?:personal\s+)?projects?|project\s+experience",
    ),
    (
        SectionKey::Certifications,
        r"certifications?|certificates?|licen[sc]es(?:\s*(?:&|and)\s*certifications)?",
    ),
    (SectionKey::Languages, r"languages?"),
    (
        SectionKey::Contact,
        r"contact(?:\s+(?:info(?:rmation)?|details))?|personal\s+(?:details|information)",
    ),
    (SectionKey::References, r"references|referees"),
];

static SECTION_HEADERS: Lazy<Vec<(SectionKey, Regex)>> = Lazy::new(|| {
    HEADER_PATTERNS
        .iter()
        .map(|(key, body)| {
            let pattern = format!(r"(?i)^(?:{body})\b");
            (*key, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static BULLET_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•●▪◦‣∙·\-*]+\s*").unwrap());
static INNER_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Ordered lines per section. Every key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMap {
    sections: BTreeMap<SectionKey, Vec<String>>,
}

impl Default for SectionMap {
    fn default() -> Self {
        Self {
            sections: SectionKey::ALL.iter().map(|k| (*k, Vec::new())).collect(),
        }
    }
}

impl SectionMap {
    pub fn lines(&self, key: SectionKey) -> &[String] {
        self.sections.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self, key: SectionKey) -> bool {
        self.lines(key).is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &[String])> {
        self.sections.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    fn push(&mut self, key: SectionKey, line: String) {
        self.sections.entry(key).or_default().push(line);
    }
}

/// Strips leading bullet glyphs and collapses internal runs of whitespace.
pub fn clean_line(line: &str) -> String {
    let stripped = BULLET_PREFIX_RE.replace(line.trim(), "");
    INNER_SPACE_RE.replace_all(stripped.trim(), " ").into_owned()
}

/// Returns the section a cleaned line introduces, if it is a header.
pub fn match_header(cleaned: &str) -> Option<SectionKey> {
    SECTION_HEADERS
        .iter()
        .find(|(_, re)| re.is_match(cleaned))
        .map(|(key, _)| *key)
}

/// Cleaned, non-empty lines of the text in original order.
pub fn cleaned_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Partitions normalized text into sections. Lines before the first header land in
/// `Other`; header lines themselves are consumed.
pub fn split_sections(text: &str) -> SectionMap {
    let mut map = SectionMap::default();
    let mut current = SectionKey::Other;

    for line in cleaned_lines(text) {
        match match_header(&line) {
            Some(key) => current = key,
            None => map.push(current, line),
        }
    }

    map
}
