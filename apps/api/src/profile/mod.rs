// Candidate profile: parsing, building, merging and scoring, plus the request pipeline
// that feeds them from résumé uploads and network profiles.

pub mod builder;
pub mod extract;
pub mod handlers;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod scoring;
pub mod sections;
pub mod structured;
