// Prompts for structured résumé extraction.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};

pub const RESUME_EXTRACT_SYSTEM: &str = JSON_ONLY_SYSTEM;

/// Replace `{resume_text}` before sending.
const RESUME_EXTRACT_TEMPLATE: &str = r#"Extract the candidate's details from the résumé text below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "fullName": "Jane Doe",
  "headline": "Senior Data Analyst",
  "summary": "Two or three sentences from the résumé's own summary.",
  "contact": {
    "emails": ["jane@example.com"],
    "phones": ["+44 20 7946 0958"],
    "links": ["linkedin.com/in/janedoe"],
    "location": "London, UK"
  },
  "skills": ["SQL", "Python"],
  "languages": ["English", "Spanish"],
  "experience": [
    {
      "title": "Senior Analyst",
      "company": "Acme",
      "dates": "2021 - Present",
      "location": "London",
      "bullets": ["Built the churn model"]
    }
  ],
  "education": [
    {"school": "University of Leeds", "degree": "BSc Mathematics", "dates": "2014 - 2017"}
  ],
  "projects": ["Short project description"],
  "certifications": ["Tableau Desktop Specialist"],
  "references": ["Available on request"]
}

Rules:
- "skills" are professional or technical skills only; spoken languages go in "languages".
- List experience most recent first.
- At most 30 skills, 15 experience entries, 5 education entries.

{no_invention}

RÉSUMÉ TEXT:
{resume_text}"#;

pub fn build_resume_extract_prompt(resume_text: &str) -> String {
    RESUME_EXTRACT_TEMPLATE
        .replace("{no_invention}", NO_INVENTION_INSTRUCTION)
        .replace("{resume_text}", resume_text)
}
