//! Field extractors: small heuristics over the split sections and raw lines.
//!
//! Every extractor is total: missing or empty sections produce the field default
//! (empty list, empty string, placeholder name), never an error.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::models::{
    ContactInfo, EducationRecord, ExperienceRecord, DEFAULT_NAME, MAX_LANGUAGES,
    MAX_SKILLS_HEURISTIC, MAX_SUMMARY_CHARS,
};
use crate::profile::sections::{match_header, SectionKey, SectionMap};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap());
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+|\b[a-z0-9\-]+\.(?:com|io|dev|me|org|net)/\S*").unwrap());
static PHONE_CANDIDATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().\-]{7,}\d").unwrap());
static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/in/[A-Za-z0-9_%\-]+/?").unwrap()
});
static ROLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:engineer|developer|designer|manager|analyst|lead|intern|specialist|consultant)")
        .unwrap()
});
static YEAR_20XX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"20\d{2}").unwrap());
static ONGOING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:present|current)\b").unwrap());
static TOKEN_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•,|]").unwrap());

const MIN_PHONE_DIGITS: usize = 9;
const MAX_NAME_CHARS: usize = 60;
const MAX_NAME_TOKENS: usize = 6;
const MAX_HEADLINE_CHARS: usize = 80;
const SUMMARY_FALLBACK_LINES: usize = 4;
const MAX_BULLETS_PER_EXPERIENCE: usize = 8;

/// Phone-shaped substrings with at least nine digits.
fn phone_matches(line: &str) -> impl Iterator<Item = &str> {
    PHONE_CANDIDATE_RE
        .find_iter(line)
        .map(|m| m.as_str().trim())
        .filter(|m| m.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS)
}

/// True when the line carries an email, URL, or phone number.
pub fn is_contact_like(line: &str) -> bool {
    EMAIL_RE.is_match(line)
        || URL_RE.is_match(line)
        || LINKEDIN_RE.is_match(line)
        || phone_matches(line).next().is_some()
}

fn is_header(line: &str) -> bool {
    match_header(line).is_some()
}

pub fn extract_name(lines: &[String]) -> String {
    lines
        .iter()
        .find(|line| {
            line.chars().count() <= MAX_NAME_CHARS
                && !is_contact_like(line)
                && !is_header(line)
                && !line.chars().any(|c| c.is_ascii_digit())
                && line.split(' ').filter(|t| !t.is_empty()).count() <= MAX_NAME_TOKENS
        })
        .cloned()
        .unwrap_or_else(|| DEFAULT_NAME.to_string())
}

pub fn extract_headline(lines: &[String], name: &str) -> String {
    lines
        .iter()
        .filter(|line| line.as_str() != name)
        .find(|line| {
            line.chars().count() <= MAX_HEADLINE_CHARS
                && !is_contact_like(line)
                && !is_header(line)
                && ROLE_RE.is_match(line)
        })
        .cloned()
        .unwrap_or_else(|| format!("{name} Professional"))
}

/// Splits joined section lines on `•`, `,` and `|`, dropping stray `;`/`:`.
fn split_tokens(lines: &[String]) -> Vec<String> {
    let joined = lines.join(" ");
    TOKEN_SPLIT_RE
        .split(&joined)
        .map(|token| token.replace([';', ':'], "").trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Keeps the first occurrence of each case-insensitive value, up to `cap` entries.
pub fn dedup_case_insensitive<I>(values: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.to_lowercase()))
        .take(cap)
        .collect()
}

pub fn extract_skills(sections: &SectionMap) -> Vec<String> {
    let tokens = split_tokens(sections.lines(SectionKey::Skills))
        .into_iter()
        .filter(|token| {
            let len = token.chars().count();
            (2..=40).contains(&len)
                && !is_contact_like(token)
                && !token.chars().all(|c| c.is_ascii_digit())
        });
    dedup_case_insensitive(tokens, MAX_SKILLS_HEURISTIC)
}

pub fn extract_languages(sections: &SectionMap) -> Vec<String> {
    let tokens = split_tokens(sections.lines(SectionKey::Languages))
        .into_iter()
        .filter(|token| token.chars().count() > 1);
    dedup_case_insensitive(tokens, MAX_LANGUAGES)
}

/// Drops skills that also appear (case-insensitively) among the languages.
pub fn exclude_languages(skills: Vec<String>, languages: &[String]) -> Vec<String> {
    let languages: HashSet<String> = languages.iter().map(|l| l.to_lowercase()).collect();
    skills
        .into_iter()
        .filter(|s| !languages.contains(&s.to_lowercase()))
        .collect()
}

fn push_unique(target: &mut Vec<String>, value: &str) {
    if !target.iter().any(|v| v == value) {
        target.push(value.to_string());
    }
}

/// Scans every line (not section-scoped) for emails, phones and LinkedIn links.
/// Caps are applied later by the profile builder.
pub fn extract_contact(lines: &[String]) -> ContactInfo {
    let mut contact = ContactInfo::default();
    for line in lines {
        for m in EMAIL_RE.find_iter(line) {
            push_unique(&mut contact.emails, m.as_str());
        }
        for phone in phone_matches(line) {
            push_unique(&mut contact.phones, phone);
        }
        for m in LINKEDIN_RE.find_iter(line) {
            push_unique(&mut contact.links, m.as_str());
        }
    }
    contact
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Summary section lines, or else the first few non-contact lines above the first header.
pub fn extract_summary(sections: &SectionMap, lines: &[String]) -> String {
    let joined = if !sections.is_empty(SectionKey::Summary) {
        sections.lines(SectionKey::Summary).join(" ")
    } else {
        lines
            .iter()
            .take_while(|line| !is_header(line))
            .filter(|line| !is_contact_like(line))
            .take(SUMMARY_FALLBACK_LINES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    };
    truncate_chars(&joined, MAX_SUMMARY_CHARS)
}

pub fn is_marker_line(line: &str) -> bool {
    YEAR_20XX_RE.is_match(line) || ONGOING_RE.is_match(line)
}

/// Synthesizes experience records from marker lines.
///
/// The count is the number of markers, or 2 when the section has lines but no markers,
/// or 1 when the section is empty. Records past the available markers get an
/// `"Experience {n}"` placeholder title. Non-marker lines following a marker become
/// that record's bullets.
pub fn extract_experiences(sections: &SectionMap) -> Vec<ExperienceRecord> {
    let lines = sections.lines(SectionKey::Experience);

    let mut markers: Vec<ExperienceRecord> = Vec::new();
    for line in lines {
        if is_marker_line(line) {
            markers.push(ExperienceRecord {
                title: line.clone(),
                ..Default::default()
            });
        } else if let Some(current) = markers.last_mut() {
            if current.bullets.len() < MAX_BULLETS_PER_EXPERIENCE {
                current.bullets.push(line.clone());
            }
        }
    }

    let count = if !markers.is_empty() {
        markers.len()
    } else if !lines.is_empty() {
        2
    } else {
        1
    };

    let mut markers = markers.into_iter();
    (1..=count)
        .map(|n| {
            markers.next().unwrap_or_else(|| ExperienceRecord {
                title: format!("Experience {n}"),
                ..Default::default()
            })
        })
        .collect()
}

pub fn extract_education(sections: &SectionMap) -> Vec<EducationRecord> {
    sections
        .lines(SectionKey::Education)
        .first()
        .map(|line| EducationRecord {
            school: line.clone(),
            ..Default::default()
        })
        .into_iter()
        .collect()
}
