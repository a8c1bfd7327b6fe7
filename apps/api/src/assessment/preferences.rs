use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const INTEREST_OPTIONS: &[&str] = &[
    "Technology",
    "Science",
    "Art",
    "Music",
    "Writing",
    "Sports",
    "Travel",
    "Cooking",
    "Photography",
    "Gaming",
    "Reading",
    "Nature",
    "Fashion",
    "Finance",
    "Education",
    "Healthcare",
    "Social Impact",
];

pub const VALUE_OPTIONS: &[&str] = &[
    "Creativity",
    "Innovation",
    "Leadership",
    "Teamwork",
    "Independence",
    "Work-Life Balance",
    "Financial Security",
    "Social Impact",
    "Learning",
    "Recognition",
    "Adventure",
    "Stability",
    "Diversity",
    "Integrity",
];

pub const PHILOSOPHY_OPTIONS: &[&str] = &[
    "Growth Mindset",
    "Continuous Learning",
    "Work to Live",
    "Live to Work",
    "Make a Difference",
    "Follow Your Passion",
    "Balance in All Things",
    "Excellence in Everything",
    "Practical Outcomes",
    "Innovation First",
];

/// Share of sections that must be filled before preferences can be submitted.
pub const MIN_SUBMIT_PROGRESS: f64 = 50.0;

/// Free-text preferences submitted after the personality assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalPreferences {
    #[serde(default)]
    pub custom_skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub philosophy: String,
    #[serde(default)]
    pub career_goals: String,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl PersonalPreferences {
    /// Rebuilds the lists through `add_unique`, dropping blanks and repeats.
    pub fn normalized(self) -> Self {
        let mut out = PersonalPreferences {
            philosophy: self.philosophy.trim().to_string(),
            career_goals: self.career_goals.trim().to_string(),
            completed_at: self.completed_at,
            ..Default::default()
        };
        for skill in &self.custom_skills {
            add_unique(&mut out.custom_skills, skill);
        }
        for interest in &self.interests {
            add_unique(&mut out.interests, interest);
        }
        for value in &self.values {
            add_unique(&mut out.values, value);
        }
        out
    }

    /// Share of the four sections (interests, values, philosophy, goals)
    /// that have content, as a percentage.
    pub fn progress_percent(&self) -> f64 {
        let completed = [
            !self.interests.is_empty(),
            !self.values.is_empty(),
            !self.philosophy.is_empty(),
            !self.career_goals.is_empty(),
        ]
        .iter()
        .filter(|done| **done)
        .count();
        completed as f64 / 4.0 * 100.0
    }

    pub fn ready_to_submit(&self) -> bool {
        self.progress_percent() >= MIN_SUBMIT_PROGRESS
    }
}

/// Appends `item` unless it is blank or already present. Returns whether it was added.
pub fn add_unique(list: &mut Vec<String>, item: &str) -> bool {
    let item = item.trim();
    if item.is_empty() || list.iter().any(|existing| existing == item) {
        return false;
    }
    list.push(item.to_string());
    true
}

/// Removes every occurrence of `item`. Returns whether anything was removed.
pub fn remove_item(list: &mut Vec<String>, item: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != item);
    list.len() != before
}
