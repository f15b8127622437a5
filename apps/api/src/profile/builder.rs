//! Profile Builder: assembles a `CandidateProfile` from either raw text (heuristic path)
//! or an already-structured extraction record.

use std::collections::BTreeMap;

use crate::profile::extract::{
    dedup_case_insensitive, exclude_languages, extract_contact, extract_education,
    extract_experiences, extract_headline, extract_languages, extract_name, extract_skills,
    extract_summary,
};
use crate::profile::models::{
    CandidateProfile, ContactInfo, EducationRecord, ExperienceRecord, StructuredResume,
    DEFAULT_NAME, MAX_CERTIFICATIONS, MAX_EDUCATION, MAX_EMAILS, MAX_EXPERIENCES, MAX_LANGUAGES,
    MAX_LINKS, MAX_PHONES, MAX_PROJECTS, MAX_REFERENCES, MAX_SKILLS_STRUCTURED,
};
use crate::profile::normalize::normalize_text;
use crate::profile::sections::{cleaned_lines, split_sections, SectionKey, SectionMap};

/// Separator used when flattening structured sub-fields into display lines.
pub const FIELD_SEPARATOR: &str = " • ";

/// Lines kept per section in `resume_sections` for sections without their own cap.
const DEFAULT_SECTION_LINES: usize = 20;

fn section_cap(key: SectionKey) -> usize {
    match key {
        SectionKey::Projects => MAX_PROJECTS,
        SectionKey::Certifications => MAX_CERTIFICATIONS,
        SectionKey::References => MAX_REFERENCES,
        _ => DEFAULT_SECTION_LINES,
    }
}

/// Deduplicates each contact list in first-seen order, then caps it.
fn cap_contact(contact: ContactInfo) -> ContactInfo {
    ContactInfo {
        emails: dedup_case_insensitive(clean_list(contact.emails, usize::MAX), MAX_EMAILS),
        phones: dedup_case_insensitive(clean_list(contact.phones, usize::MAX), MAX_PHONES),
        links: dedup_case_insensitive(clean_list(contact.links, usize::MAX), MAX_LINKS),
        location: contact.location.filter(|l| !l.trim().is_empty()),
    }
}

/// Capped copy of the section map for rendering. Contact details and unsectioned
/// lines are dropped; empty sections are omitted.
fn rendered_sections(sections: &SectionMap) -> BTreeMap<String, Vec<String>> {
    sections
        .iter()
        .filter(|(key, lines)| {
            !matches!(key, SectionKey::Contact | SectionKey::Other) && !lines.is_empty()
        })
        .map(|(key, lines)| {
            let capped = lines.iter().take(section_cap(key)).cloned().collect();
            (key.as_str().to_string(), capped)
        })
        .collect()
}

/// Heuristic path: normalize → split → extract.
pub fn build_from_text(raw_text: Option<&str>) -> CandidateProfile {
    let text = normalize_text(raw_text);
    let lines = cleaned_lines(&text);
    let sections = split_sections(&text);

    let full_name = extract_name(&lines);
    let headline = extract_headline(&lines, &full_name);
    let languages = extract_languages(&sections);
    let skills = exclude_languages(extract_skills(&sections), &languages);
    let certifications = sections
        .lines(SectionKey::Certifications)
        .iter()
        .take(MAX_CERTIFICATIONS)
        .cloned()
        .collect();

    let mut experiences = extract_experiences(&sections);
    experiences.truncate(MAX_EXPERIENCES);
    let mut education = extract_education(&sections);
    education.truncate(MAX_EDUCATION);

    CandidateProfile {
        summary: extract_summary(&sections, &lines),
        full_name,
        headline,
        skills,
        languages,
        experiences,
        education,
        certifications,
        contact: cap_contact(extract_contact(&lines)),
        resume_sections: rendered_sections(&sections),
    }
}

fn join_fields<'a>(fields: impl IntoIterator<Item = Option<&'a str>>) -> String {
    fields
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

fn clean_list(values: Vec<String>, cap: usize) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .take(cap)
        .collect()
}

/// Structured path: maps named fields directly, no heuristic extraction.
pub fn build_from_structured(record: StructuredResume) -> CandidateProfile {
    let full_name = Some(record.full_name.trim())
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_NAME)
        .to_string();
    let headline = Some(record.headline.trim())
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{full_name} Professional"));

    let languages = dedup_case_insensitive(clean_list(record.languages, usize::MAX), MAX_LANGUAGES);
    let skills = exclude_languages(
        dedup_case_insensitive(clean_list(record.skills, usize::MAX), MAX_SKILLS_STRUCTURED),
        &languages,
    );

    let experiences: Vec<ExperienceRecord> = record
        .experience
        .into_iter()
        .filter(|e| !e.title.trim().is_empty() || e.company.is_some())
        .take(MAX_EXPERIENCES)
        .map(|e| ExperienceRecord {
            title: e.title.trim().to_string(),
            company: e.company,
            dates: e.dates,
            location: e.location,
            bullets: clean_list(e.bullets, usize::MAX),
        })
        .collect();

    let education: Vec<EducationRecord> = record
        .education
        .into_iter()
        .filter(|e| !e.school.trim().is_empty() || e.degree.is_some())
        .take(MAX_EDUCATION)
        .map(|e| EducationRecord {
            school: e.school.trim().to_string(),
            degree: e.degree,
            dates: e.dates,
        })
        .collect();

    let projects = clean_list(record.projects, MAX_PROJECTS);
    let certifications = clean_list(record.certifications, MAX_CERTIFICATIONS);
    let references = clean_list(record.references, MAX_REFERENCES);

    let mut resume_sections = BTreeMap::new();
    let experience_lines: Vec<String> = experiences
        .iter()
        .map(|e| {
            join_fields([
                Some(e.title.as_str()),
                e.company.as_deref(),
                e.dates.as_deref(),
                e.location.as_deref(),
            ])
        })
        .collect();
    let education_lines: Vec<String> = education
        .iter()
        .map(|e| join_fields([e.degree.as_deref(), Some(e.school.as_str()), e.dates.as_deref()]))
        .collect();
    for (key, lines) in [
        (SectionKey::Experience, experience_lines),
        (SectionKey::Education, education_lines),
        (SectionKey::Projects, projects),
        (SectionKey::Certifications, certifications.clone()),
        (SectionKey::References, references),
    ] {
        if !lines.is_empty() {
            resume_sections.insert(key.as_str().to_string(), lines);
        }
    }

    CandidateProfile {
        full_name,
        headline,
        summary: record.summary.trim().to_string(),
        skills,
        languages,
        experiences,
        education,
        certifications,
        contact: cap_contact(record.contact),
        resume_sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::{StructuredEducation, StructuredExperience};

    const SAMPLE_RESUME: &str = "Jane Doe\r\n\
        Senior Data Analyst\r\n\
        jane@example.com | +44 20 7946 0958 | linkedin.com/in/janedoe\r\n\
        \r\n\r\n\r\n\
        Summary\r\n\
        Analyst   with eight years of experience turning messy data into decisions.\r\n\
        Experience\r\n\
        • Senior Analyst, Acme 2021 - Present\r\n\
        • Built the churn model\r\n\
        • Analyst, Beta 2018 - 2021\r\n\
        Education\r\n\
        BSc Mathematics, Leeds\r\n\
        Skills\r\n\
        SQL, Python, python, Excel, English\r\n\
        Languages\r\n\
        English, Spanish\r\n\
        Certifications\r\n\
        Tableau Desktop Specialist\r\n\
        References\r\n\
        Available on request";

    #[test]
    fn test_heuristic_profile_from_resume_text() {
        let profile = build_from_text(Some(SAMPLE_RESUME));

        assert_eq!(profile.full_name, "Jane Doe");
        assert_eq!(profile.headline, "Senior Data Analyst");
        assert_eq!(
            profile.summary,
            "Analyst with eight years of experience turning messy data into decisions."
        );
        assert_eq!(profile.skills, vec!["SQL", "Python", "Excel"]);
        assert_eq!(profile.languages, vec!["English", "Spanish"]);
        assert_eq!(profile.experiences.len(), 2);
        assert_eq!(profile.experiences[0].title, "Senior Analyst, Acme 2021 - Present");
        assert_eq!(profile.education[0].school, "BSc Mathematics, Leeds");
        assert_eq!(profile.certifications, vec!["Tableau Desktop Specialist"]);
        assert_eq!(profile.contact.emails, vec!["jane@example.com"]);
        assert_eq!(profile.contact.links, vec!["linkedin.com/in/janedoe"]);
        assert_eq!(
            profile.resume_sections.get("references"),
            Some(&vec!["Available on request".to_string()])
        );
        assert!(!profile.resume_sections.contains_key("other"));
    }

    #[test]
    fn test_heuristic_profile_from_absent_text() {
        let profile = build_from_text(None);
        assert_eq!(profile.full_name, "Professional");
        assert_eq!(profile.headline, "Professional Professional");
        assert!(profile.skills.is_empty());
        assert_eq!(profile.experiences.len(), 1);
        assert!(profile.education.is_empty());
        assert!(profile.resume_sections.is_empty());
    }

    #[test]
    fn test_contact_caps_apply() {
        let emails: Vec<String> = (0..6).map(|i| format!("user{i}@example.com")).collect();
        let profile = build_from_text(Some(&emails.join("\n")));
        assert_eq!(profile.contact.emails.len(), MAX_EMAILS);
    }

    #[test]
    fn test_resume_sections_are_capped() {
        let refs: Vec<String> = (0..9).map(|i| format!("Referee number {i}")).collect();
        let profile = build_from_text(Some(&format!("References\n{}", refs.join("\n"))));
        assert_eq!(profile.resume_sections["references"].len(), MAX_REFERENCES);
    }

    #[test]
    fn test_structured_record_maps_fields() {
        let record = StructuredResume {
            full_name: "Sam Roe".to_string(),
            headline: String::new(),
            summary: " Product designer. ".to_string(),
            skills: vec!["Figma".into(), "figma".into(), "French".into(), " ".into()],
            languages: vec!["French".into()],
            experience: vec![StructuredExperience {
                title: "Designer".into(),
                company: Some("Studio".into()),
                dates: Some("2020 - 2023".into()),
                location: None,
                bullets: vec!["Shipped app".into()],
            }],
            education: vec![StructuredEducation {
                school: "RCA".into(),
                degree: Some("MA Design".into()),
                dates: None,
            }],
            certifications: vec!["UX Cert".into()],
            ..Default::default()
        };

        let profile = build_from_structured(record);
        assert_eq!(profile.full_name, "Sam Roe");
        assert_eq!(profile.headline, "Sam Roe Professional");
        assert_eq!(profile.summary, "Product designer.");
        assert_eq!(profile.skills, vec!["Figma"]);
        assert_eq!(profile.languages, vec!["French"]);
        assert_eq!(
            profile.resume_sections["experience"],
            vec!["Designer • Studio • 2020 - 2023"]
        );
        assert_eq!(profile.resume_sections["education"], vec!["MA Design • RCA"]);
        assert_eq!(profile.certifications, vec!["UX Cert"]);
    }

    #[test]
    fn test_structured_contact_is_deduplicated_before_capping() {
        let record = StructuredResume {
            contact: ContactInfo {
                emails: vec![
                    "a@x.com".into(),
                    "a@x.com".into(),
                    "A@X.com".into(),
                    "b@x.com".into(),
                ],
                phones: vec!["+1 555 123 4567".into(), "+1 555 123 4567".into()],
                links: vec!["github.com/a".into(), " github.com/a ".into(), "".into()],
                location: Some("  ".into()),
            },
            ..Default::default()
        };
        let profile = build_from_structured(record);
        assert_eq!(profile.contact.emails, vec!["a@x.com", "b@x.com"]);
        assert_eq!(profile.contact.phones, vec!["+1 555 123 4567"]);
        assert_eq!(profile.contact.links, vec!["github.com/a"]);
        assert_eq!(profile.contact.location, None);
    }

    #[test]
    fn test_structured_skills_cap_is_thirty() {
        let record = StructuredResume {
            skills: (0..50).map(|i| format!("skill-{i}")).collect(),
            ..Default::default()
        };
        let profile = build_from_structured(record);
        assert_eq!(profile.skills.len(), MAX_SKILLS_STRUCTURED);
        assert_eq!(profile.full_name, "Professional");
    }
}
