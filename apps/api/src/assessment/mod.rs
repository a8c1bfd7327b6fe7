// Assessment core: questionnaire, classifier, career lookup, skills, roadmap.
// Everything here is synchronous and works over static tables.

pub mod careers;
pub mod classifier;
pub mod error;
pub mod handlers;
pub mod preferences;
pub mod questionnaire;
pub mod roadmap;
pub mod skills;

pub use error::AssessmentError;
