use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::classifier::PersonalityCode;
use crate::assessment::preferences::{add_unique, remove_item, PersonalPreferences};
use crate::assessment::questionnaire::TraitLetter;
use crate::assessment::skills::SkillRatings;

/// The single persisted user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_key: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub personality_code: Option<PersonalityCode>,
    pub response_sequence: Option<Vec<TraitLetter>>,
    pub skill_ratings: Option<SkillRatings>,
    pub preferences: Option<PersonalPreferences>,
    #[serde(default)]
    pub saved_careers: Vec<String>,
    #[serde(default)]
    pub assessment_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields to merge into a profile. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub personality_code: Option<PersonalityCode>,
    pub response_sequence: Option<Vec<TraitLetter>>,
    pub skill_ratings: Option<SkillRatings>,
    pub preferences: Option<PersonalPreferences>,
    pub save_career: Option<String>,
    pub unsave_career: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// A fresh profile with nothing assessed yet.
    pub fn new(user_key: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_key: user_key.into(),
            name: None,
            email: None,
            image: None,
            personality_code: None,
            response_sequence: None,
            skill_ratings: None,
            preferences: None,
            saved_careers: Vec::new(),
            assessment_completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            name,
            email,
            image,
            personality_code,
            response_sequence,
            skill_ratings,
            preferences,
            save_career,
            unsave_career,
            completed_at,
        } = update;

        if name.is_some() {
            self.name = name;
        }
        if email.is_some() {
            self.email = email;
        }
        if image.is_some() {
            self.image = image;
        }
        if personality_code.is_some() {
            self.personality_code = personality_code;
            self.assessment_completed = true;
        }
        if response_sequence.is_some() {
            self.response_sequence = response_sequence;
        }
        if skill_ratings.is_some() {
            self.skill_ratings = skill_ratings;
        }
        if preferences.is_some() {
            self.preferences = preferences;
        }
        if let Some(career) = save_career {
            add_unique(&mut self.saved_careers, &career);
        }
        if let Some(career) = unsave_career {
            remove_item(&mut self.saved_careers, &career);
        }
        if completed_at.is_some() {
            self.completed_at = completed_at;
        }
        self.updated_at = Utc::now();
    }

    /// Top-rated skills, empty when no skills assessment was stored.
    pub fn top_skills(&self, limit: usize) -> Vec<String> {
        self.skill_ratings
            .as_ref()
            .map(|r| r.top_skills(limit))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_untouched_fields() {
        let mut profile = UserProfile::new("ada@example.com");
        profile.apply(ProfileUpdate {
            personality_code: Some("INTJ".parse().unwrap()),
            response_sequence: Some(vec![TraitLetter::I; 12]),
            completed_at: Some(Utc::now()),
            ..Default::default()
        });
        assert!(profile.assessment_completed);

        let mut ratings = SkillRatings::new();
        ratings.rate("Programming", 5).unwrap();
        profile.apply(ProfileUpdate {
            skill_ratings: Some(ratings),
            ..Default::default()
        });

        assert_eq!(profile.personality_code.unwrap().to_string(), "INTJ");
        assert_eq!(profile.response_sequence.as_ref().map(Vec::len), Some(12));
        assert_eq!(profile.top_skills(3), vec!["Programming"]);
    }

    #[test]
    fn test_saved_careers_dedup_and_remove() {
        let mut profile = UserProfile::new("guest-1");
        for career in ["Writer", "Writer", "Librarian"] {
            profile.apply(ProfileUpdate {
                save_career: Some(career.to_string()),
                ..Default::default()
            });
        }
        assert_eq!(profile.saved_careers, vec!["Writer", "Librarian"]);

        profile.apply(ProfileUpdate {
            unsave_career: Some("Writer".to_string()),
            ..Default::default()
        });
        assert_eq!(profile.saved_careers, vec!["Librarian"]);
    }

    #[test]
    fn test_new_profile_has_no_top_skills() {
        let profile = UserProfile::new("guest-2");
        assert!(profile.top_skills(5).is_empty());
        assert!(!profile.assessment_completed);
    }

    #[test]
    fn test_profile_json_round_trip_keeps_field_names() {
        let mut profile = UserProfile::new("ada@example.com");
        profile.apply(ProfileUpdate {
            personality_code: Some("ENFP".parse().unwrap()),
            ..Default::default()
        });
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["personality_code"], "ENFP");
        assert_eq!(value["user_key"], "ada@example.com");
        let back: UserProfile = serde_json::from_value(value).unwrap();
        assert_eq!(back, profile);
    }
}
