//! Profile Merger: combines a résumé-derived and a network-derived profile.
//!
//! Field priority: identity text (name, headline, summary) and the experience/education
//! lists prefer the network side; skills are a union in résumé-then-network order;
//! `resume_sections` and the résumé-only fields (languages, certifications, contact) come
//! from the résumé side.

use crate::profile::models::CandidateProfile;

fn prefer(network: String, resume: String) -> String {
    if network.trim().is_empty() {
        resume
    } else {
        network
    }
}

fn prefer_list<T>(network: Vec<T>, resume: Vec<T>) -> Vec<T> {
    if network.is_empty() {
        resume
    } else {
        network
    }
}

pub fn merge_profiles(
    resume: Option<CandidateProfile>,
    network: Option<CandidateProfile>,
) -> Option<CandidateProfile> {
    let (resume, network) = match (resume, network) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => return Some(only),
        (Some(resume), Some(network)) => (resume, network),
    };

    let mut skills = resume.skills;
    for skill in network.skills {
        if !skills.contains(&skill) {
            skills.push(skill);
        }
    }

    Some(CandidateProfile {
        full_name: prefer(network.full_name, resume.full_name),
        headline: prefer(network.headline, resume.headline),
        summary: prefer(network.summary, resume.summary),
        skills,
        languages: resume.languages,
        experiences: prefer_list(network.experiences, resume.experiences),
        education: prefer_list(network.education, resume.education),
        certifications: resume.certifications,
        contact: resume.contact,
        resume_sections: resume.resume_sections,
    })
}
