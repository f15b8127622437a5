use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::profile::extract::dedup_case_insensitive;

/// Placeholder used when no plausible name line exists.
pub const DEFAULT_NAME: &str = "Professional";

pub const MAX_SKILLS_HEURISTIC: usize = 25;
pub const MAX_SKILLS_STRUCTURED: usize = 30;
pub const MAX_LANGUAGES: usize = 10;
pub const MAX_EXPERIENCES: usize = 15;
pub const MAX_EDUCATION: usize = 5;
pub const MAX_EMAILS: usize = 3;
pub const MAX_PHONES: usize = 3;
pub const MAX_LINKS: usize = 5;
pub const MAX_REFERENCES: usize = 5;
pub const MAX_PROJECTS: usize = 10;
pub const MAX_CERTIFICATIONS: usize = 10;
pub const MAX_SUMMARY_CHARS: usize = 1200;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceRecord {
    pub title: String,
    pub company: Option<String>,
    pub dates: Option<String>,
    pub location: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationRecord {
    pub school: String,
    pub degree: Option<String>,
    pub dates: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub links: Vec<String>,
    pub location: Option<String>,
}

/// The unified candidate record, whichever source it came from.
///
/// `resume_sections` is keyed by section name (`"experience"`, `"projects"`, ...) and only
/// carries non-empty sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    pub full_name: String,
    pub headline: String,
    #[serde(alias = "about")]
    pub summary: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub experiences: Vec<ExperienceRecord>,
    pub education: Vec<EducationRecord>,
    pub certifications: Vec<String>,
    pub contact: ContactInfo,
    pub resume_sections: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    pub profile_score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub issues: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Structured extraction record (LLM classifier output)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredExperience {
    pub title: String,
    pub company: Option<String>,
    pub dates: Option<String>,
    pub location: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredEducation {
    pub school: String,
    pub degree: Option<String>,
    pub dates: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredResume {
    pub full_name: String,
    pub headline: String,
    pub summary: String,
    pub contact: ContactInfo,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub experience: Vec<StructuredExperience>,
    pub education: Vec<StructuredEducation>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
    pub references: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Network (scraped public) profile
// ────────────────────────────────────────────────────────────────────────────

/// A skill as scraping APIs return it: either a bare string or an object
/// carrying the label under one of several keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillInput {
    Raw(String),
    Object {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        skill: Option<String>,
    },
}

impl SkillInput {
    pub fn display_name(&self) -> Option<&str> {
        let label = match self {
            SkillInput::Raw(s) => Some(s.as_str()),
            SkillInput::Object { title, name, skill } => [title, name, skill]
                .into_iter()
                .flatten()
                .map(|s| s.as_str())
                .find(|s| !s.trim().is_empty()),
        };
        label.map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkExperience {
    pub title: Option<String>,
    pub company: Option<String>,
    #[serde(alias = "duration")]
    pub date_range: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkEducation {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub date_range: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkProfile {
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub skills: Vec<SkillInput>,
    pub experiences: Vec<NetworkExperience>,
    pub educations: Vec<NetworkEducation>,
}

impl From<NetworkProfile> for CandidateProfile {
    fn from(network: NetworkProfile) -> Self {
        let skills = dedup_case_insensitive(
            network
                .skills
                .iter()
                .filter_map(SkillInput::display_name)
                .map(str::to_string),
            MAX_SKILLS_STRUCTURED,
        );

        let experiences = network
            .experiences
            .into_iter()
            .filter_map(|e| {
                let title = non_empty(e.title).or_else(|| non_empty(e.company.clone()))?;
                Some(ExperienceRecord {
                    title,
                    company: non_empty(e.company),
                    dates: non_empty(e.date_range),
                    location: non_empty(e.location),
                    bullets: non_empty(e.description).into_iter().collect(),
                })
            })
            .take(MAX_EXPERIENCES)
            .collect();

        let education = network
            .educations
            .into_iter()
            .filter_map(|e| {
                Some(EducationRecord {
                    school: non_empty(e.school)?,
                    degree: non_empty(e.degree),
                    dates: non_empty(e.date_range),
                })
            })
            .take(MAX_EDUCATION)
            .collect();

        CandidateProfile {
            full_name: non_empty(network.full_name).unwrap_or_default(),
            headline: non_empty(network.headline).unwrap_or_default(),
            summary: non_empty(network.about).unwrap_or_default(),
            skills,
            experiences,
            education,
            ..Default::default()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skill_input_accepts_strings_and_objects() {
        let skills: Vec<SkillInput> = serde_json::from_value(json!([
            "Rust",
            {"title": "SQL"},
            {"name": "Excel"},
            {"skill": "Figma"},
            {"title": "", "name": "Go"},
            {}
        ]))
        .unwrap();

        let labels: Vec<_> = skills.iter().map(SkillInput::display_name).collect();
        assert_eq!(
            labels,
            vec![
                Some("Rust"),
                Some("SQL"),
                Some("Excel"),
                Some("Figma"),
                Some("Go"),
                None
            ]
        );
    }

    #[test]
    fn test_network_profile_converts_to_candidate() {
        let network: NetworkProfile = serde_json::from_value(json!({
            "fullName": "Ada Lovelace",
            "headline": "Analytical Engine Programmer",
            "about": "First programmer.",
            "skills": ["Math", {"title": "Math"}, {"name": "Poetry"}],
            "experiences": [
                {"title": "Analyst", "company": "Babbage & Co", "duration": "1842 - 1843"},
                {"title": "", "company": ""}
            ],
            "educations": [{"school": "Home tutoring", "degree": null}]
        }))
        .unwrap();

        let profile = CandidateProfile::from(network);
        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.summary, "First programmer.");
        assert_eq!(profile.skills, vec!["Math", "Poetry"]);
        assert_eq!(profile.experiences.len(), 1);
        assert_eq!(profile.experiences[0].dates.as_deref(), Some("1842 - 1843"));
        assert_eq!(profile.education[0].school, "Home tutoring");
    }

    #[test]
    fn test_network_conversion_applies_caps_and_case_insensitive_dedup() {
        let network = NetworkProfile {
            skills: vec![
                SkillInput::Raw("Python".into()),
                SkillInput::Raw("python".into()),
                SkillInput::Object {
                    title: Some("SQL".into()),
                    name: None,
                    skill: None,
                },
            ],
            experiences: (0..20)
                .map(|i| NetworkExperience {
                    title: Some(format!("Role {i}")),
                    ..Default::default()
                })
                .collect(),
            educations: (0..8)
                .map(|i| NetworkEducation {
                    school: Some(format!("School {i}")),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };

        let profile = CandidateProfile::from(network);
        assert_eq!(profile.skills, vec!["Python", "SQL"]);
        assert_eq!(profile.experiences.len(), MAX_EXPERIENCES);
        assert_eq!(profile.experiences[0].title, "Role 0");
        assert_eq!(profile.education.len(), MAX_EDUCATION);
    }

    #[test]
    fn test_network_experience_without_title_or_company_is_dropped() {
        let network: NetworkProfile = serde_json::from_value(json!({
            "experiences": [
                {"title": "  ", "company": "  "},
                {"title": "", "company": " Acme "}
            ]
        }))
        .unwrap();
        let profile = CandidateProfile::from(network);
        assert_eq!(profile.experiences.len(), 1);
        assert_eq!(profile.experiences[0].title, "Acme");
    }

    #[test]
    fn test_candidate_profile_accepts_about_alias() {
        let profile: CandidateProfile =
            serde_json::from_value(json!({"fullName": "X", "about": "Hello"})).unwrap();
        assert_eq!(profile.summary, "Hello");
        assert!(profile.skills.is_empty());
    }
}
