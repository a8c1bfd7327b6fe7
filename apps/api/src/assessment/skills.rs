//! Skill taxonomy and self-ratings.
//!
//! Ratings are stored raw. The only derived view is "top skills": names
//! ordered by rating, highest first.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::assessment::error::AssessmentError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SkillCategory {
    pub name: &'static str,
    pub skills: [&'static str; 5],
}

pub static SKILL_TAXONOMY: [SkillCategory; 3] = [
    SkillCategory {
        name: "Technical Skills",
        skills: [
            "Programming",
            "Data Analysis",
            "Web Development",
            "Graphic Design",
            "Digital Marketing",
        ],
    },
    SkillCategory {
        name: "Soft Skills",
        skills: [
            "Communication",
            "Leadership",
            "Teamwork",
            "Problem Solving",
            "Time Management",
        ],
    },
    SkillCategory {
        name: "Industry Knowledge",
        skills: [
            "Business",
            "Healthcare",
            "Education",
            "Technology",
            "Creative Arts",
        ],
    },
];

/// Position of a skill in the taxonomy, or `None` if it is not part of it.
fn taxonomy_position(skill: &str) -> Option<usize> {
    SKILL_TAXONOMY
        .iter()
        .flat_map(|c| c.skills.iter())
        .position(|s| *s == skill)
}

/// Skill name → rating (1–5). Only taxonomy skills are accepted.
///
/// Incoming ratings are read as wide integers so that any out-of-range
/// number is reported as a validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, i64>", into = "HashMap<String, u8>")]
pub struct SkillRatings(HashMap<String, u8>);

impl SkillRatings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records or replaces a rating.
    pub fn rate(&mut self, skill: &str, rating: u8) -> Result<(), AssessmentError> {
        let rating = validate(skill, i64::from(rating))?;
        self.0.insert(skill.to_string(), rating);
        Ok(())
    }

    /// Skills of `category` that have no rating yet.
    pub fn missing_in(&self, category: &SkillCategory) -> Vec<&'static str> {
        category
            .skills
            .iter()
            .filter(|s| !self.0.contains_key(**s))
            .copied()
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        SKILL_TAXONOMY
            .iter()
            .all(|c| self.missing_in(c).is_empty())
    }

    /// Skill names sorted by rating, highest first. Equal ratings keep
    /// taxonomy order.
    pub fn top_skills(&self, limit: usize) -> Vec<String> {
        let mut rated: Vec<(&String, u8, usize)> = self
            .0
            .iter()
            .map(|(name, rating)| {
                (
                    name,
                    *rating,
                    taxonomy_position(name).unwrap_or(usize::MAX),
                )
            })
            .collect();
        rated.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        rated
            .into_iter()
            .take(limit)
            .map(|(name, _, _)| name.clone())
            .collect()
    }
}

fn validate(skill: &str, rating: i64) -> Result<u8, AssessmentError> {
    if taxonomy_position(skill).is_none() {
        return Err(AssessmentError::InvalidInput(format!(
            "'{skill}' is not a known skill"
        )));
    }
    u8::try_from(rating)
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or_else(|| {
            AssessmentError::InvalidInput(format!(
                "rating for '{skill}' must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
            ))
        })
}

impl TryFrom<HashMap<String, i64>> for SkillRatings {
    type Error = AssessmentError;

    fn try_from(map: HashMap<String, i64>) -> Result<Self, Self::Error> {
        map.into_iter()
            .map(|(skill, rating)| {
                let rating = validate(&skill, rating)?;
                Ok((skill, rating))
            })
            .collect::<Result<HashMap<_, _>, _>>()
            .map(SkillRatings)
    }
}

impl From<SkillRatings> for HashMap<String, u8> {
    fn from(ratings: SkillRatings) -> Self {
        ratings.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_skills_sorted_descending() {
        let mut ratings = SkillRatings::new();
        ratings.rate("Programming", 5).unwrap();
        ratings.rate("Leadership", 2).unwrap();
        assert_eq!(ratings.top_skills(10), vec!["Programming", "Leadership"]);

        let mut reversed = SkillRatings::new();
        reversed.rate("Leadership", 2).unwrap();
        reversed.rate("Programming", 5).unwrap();
        assert_eq!(reversed.top_skills(10), vec!["Programming", "Leadership"]);
    }

    #[test]
    fn test_top_skills_ties_follow_taxonomy_order() {
        let mut ratings = SkillRatings::new();
        ratings.rate("Creative Arts", 4).unwrap();
        ratings.rate("Teamwork", 4).unwrap();
        ratings.rate("Programming", 4).unwrap();
        ratings.rate("Business", 1).unwrap();
        assert_eq!(
            ratings.top_skills(3),
            vec!["Programming", "Teamwork", "Creative Arts"]
        );
    }

    #[test]
    fn test_rate_rejects_out_of_range() {
        let mut ratings = SkillRatings::new();
        assert!(ratings.rate("Programming", 0).is_err());
        assert!(ratings.rate("Programming", 6).is_err());
        assert!(ratings.rate("Programming", 1).is_ok());
        assert!(ratings.rate("Programming", 5).is_ok());
        assert_eq!(HashMap::from(ratings.clone()).get("Programming"), Some(&5));
        assert_eq!(ratings.top_skills(10), vec!["Programming"]);
    }

    #[test]
    fn test_rate_rejects_unknown_skill() {
        let mut ratings = SkillRatings::new();
        let err = ratings.rate("Juggling", 3).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidInput(_)));
        assert_eq!(ratings, SkillRatings::new());
    }

    #[test]
    fn test_missing_and_complete() {
        let technical = &SKILL_TAXONOMY[0];
        assert_eq!(technical.name, "Technical Skills");
        let mut ratings = SkillRatings::new();
        ratings.rate("Programming", 3).unwrap();
        assert_eq!(ratings.missing_in(technical).len(), 4);
        assert!(!ratings.is_complete());

        for category in SKILL_TAXONOMY.iter() {
            for skill in category.skills {
                ratings.rate(skill, 3).unwrap();
            }
        }
        assert!(ratings.is_complete());
        assert_eq!(HashMap::from(ratings).len(), 15);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: SkillRatings =
            serde_json::from_str(r#"{"Programming":5,"Leadership":2}"#).unwrap();
        assert_eq!(ok.top_skills(5), vec!["Programming", "Leadership"]);
        assert!(serde_json::from_str::<SkillRatings>(r#"{"Programming":9}"#).is_err());
        assert!(serde_json::from_str::<SkillRatings>(r#"{"Unknown":3}"#).is_err());
    }

    #[test]
    fn test_ratings_outside_byte_range_are_invalid_input() {
        for rating in [-1, 0, 6, 300, i64::MAX] {
            let map = HashMap::from([("Programming".to_string(), rating)]);
            assert!(
                matches!(SkillRatings::try_from(map), Err(AssessmentError::InvalidInput(_))),
                "{rating}"
            );
        }
        assert!(serde_json::from_str::<SkillRatings>(r#"{"Programming":-1}"#).is_err());
        assert!(serde_json::from_str::<SkillRatings>(r#"{"Programming":300}"#).is_err());
    }
}
