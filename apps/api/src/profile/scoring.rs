//! Profile strength scoring: independent per-attribute point rules summed and clamped
//! to 0–100, with human-readable strengths, improvements and issues.
//!
//! Works on loosely-shaped JSON so externally supplied profiles (scraped, hand-edited)
//! score the same way as typed ones. Pure and deterministic.

use serde_json::Value;

use crate::profile::models::{CandidateProfile, ProfileAnalysis};

const LOW_SCORE_THRESHOLD: u32 = 50;

/// Accumulates points and messages while the rules run.
#[derive(Default)]
struct Tally {
    score: u32,
    strengths: Vec<String>,
    improvements: Vec<String>,
    issues: Vec<String>,
}

impl Tally {
    fn strength(&mut self, points: u32, message: impl Into<String>) {
        self.score += points;
        self.strengths.push(message.into());
    }

    fn improvement(&mut self, points: u32, message: impl Into<String>) {
        self.score += points;
        self.improvements.push(message.into());
    }

    fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(message.into());
    }
}

fn text_len(profile: &Value, keys: &[&str]) -> usize {
    keys.iter()
        .filter_map(|k| profile.get(*k).and_then(Value::as_str))
        .map(|s| s.chars().count())
        .find(|len| *len > 0)
        .unwrap_or(0)
}

fn list_len(profile: &Value, keys: &[&str]) -> usize {
    keys.iter()
        .filter_map(|k| profile.get(*k).and_then(Value::as_array))
        .map(Vec::len)
        .find(|len| *len > 0)
        .unwrap_or(0)
}

fn score_headline(tally: &mut Tally, len: usize) {
    match len {
        0 => tally.issue("Missing headline"),
        1..=49 => tally.improvement(
            5,
            "Expand your headline to at least 50 characters with your role and focus",
        ),
        50..=120 => tally.strength(15, "Strong, descriptive headline"),
        _ => tally.improvement(10, "Tighten your headline to 120 characters or fewer"),
    }
}

fn score_summary(tally: &mut Tally, len: usize) {
    match len {
        0 => tally.issue("Missing About section"),
        1..=199 => tally.improvement(
            5,
            "Expand your About section to at least 200 characters",
        ),
        200..=2000 => tally.strength(20, "Comprehensive About section"),
        _ => tally.improvement(15, "Condense your About section to under 2000 characters"),
    }
}

fn score_skills(tally: &mut Tally, count: usize) {
    match count {
        0 => tally.issue("No skills listed"),
        1..=4 => tally.improvement(5, "Add more skills (aim for 5-20 relevant skills)"),
        5..=20 => tally.strength(20, format!("Good skill coverage ({count} skills)")),
        _ => tally.improvement(
            15,
            format!("Focus your skills list ({count} skills) on the 20 most relevant"),
        ),
    }
}

fn score_experience(tally: &mut Tally, count: usize) {
    match count {
        0 => tally.issue("No work experience listed"),
        1 => tally.improvement(10, "Add earlier roles to show career progression"),
        2..=5 => tally.strength(25, format!("Solid work history ({count} positions)")),
        _ => tally.improvement(20, "Highlight the most relevant positions rather than all of them"),
    }
}

fn score_education(tally: &mut Tally, count: usize) {
    if count == 0 {
        tally.improvement(0, "Add your education background");
    } else {
        tally.strength(10, "Education background included");
    }
}

fn score_certifications(tally: &mut Tally, count: usize) {
    match count {
        0 => tally.improvement(0, "Add relevant certifications to validate your skills"),
        1..=2 => tally.improvement(5, "Consider adding more industry certifications"),
        _ => tally.strength(10, format!("Well certified ({count} certifications)")),
    }
}

/// Scores any profile-shaped JSON value. Non-object input scores zero with a single issue.
pub fn analyze_profile(profile: &Value) -> ProfileAnalysis {
    if !profile.is_object() {
        return ProfileAnalysis {
            profile_score: 0,
            strengths: vec![],
            improvements: vec![],
            issues: vec!["Profile data is missing or malformed".to_string()],
        };
    }

    let mut tally = Tally::default();
    score_headline(&mut tally, text_len(profile, &["headline"]));
    score_summary(&mut tally, text_len(profile, &["summary", "about"]));
    score_skills(&mut tally, list_len(profile, &["skills"]));
    score_experience(&mut tally, list_len(profile, &["experiences", "experience"]));
    score_education(&mut tally, list_len(profile, &["education", "educations"]));
    score_certifications(&mut tally, list_len(profile, &["certifications"]));

    let profile_score = tally.score.min(100);
    if profile_score < LOW_SCORE_THRESHOLD {
        tally
            .improvements
            .push("Overall profile needs significant enhancement to stand out".to_string());
    }
    if tally.strengths.is_empty() {
        tally
            .strengths
            .push("Profile has a foundation to build on".to_string());
    }
    if tally.improvements.is_empty() {
        tally
            .improvements
            .push("Keep your profile updated with recent achievements".to_string());
    }

    ProfileAnalysis {
        profile_score,
        strengths: tally.strengths,
        improvements: tally.improvements,
        issues: tally.issues,
    }
}

/// Scores a typed profile through the same rules.
pub fn analyze_candidate(profile: &CandidateProfile) -> ProfileAnalysis {
    match serde_json::to_value(profile) {
        Ok(value) => analyze_profile(&value),
        Err(_) => analyze_profile(&Value::Null),
    }
}
