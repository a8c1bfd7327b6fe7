//! Static career recommendations, one record per personality type.

use serde::Serialize;

use crate::assessment::classifier::PersonalityCode;
use crate::assessment::error::AssessmentError;

#[derive(Debug, Clone, Serialize)]
pub struct CareerRecommendation {
    pub code: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub strengths: [&'static str; 5],
    pub careers: [&'static str; 5],
}

pub static CAREER_TABLE: [CareerRecommendation; 16] = [
    CareerRecommendation {
        code: "ISTJ",
        title: "The Inspector",
        description: "Practical, fact-minded, and reliable. You value tradition and loyalty, with a strong sense of duty and responsibility.",
        strengths: ["Detail-oriented", "Organized", "Reliable", "Logical", "Committed"],
        careers: ["Accountant", "Auditor", "Financial Analyst", "Project Manager", "Systems Analyst"],
    },
    CareerRecommendation {
        code: "ISFJ",
        title: "The Protector",
        description: "Quiet, friendly, and conscientious. You're committed to meeting obligations and are known for your thoroughness and dependability.",
        strengths: ["Supportive", "Reliable", "Patient", "Detail-oriented", "Observant"],
        careers: ["Nurse", "Teacher", "HR Specialist", "Social Worker", "Administrative Assistant"],
    },
    CareerRecommendation {
        code: "INFJ",
        title: "The Counselor",
        description: "Idealistic, principled, and sensitive. You seek meaning and connection, with a clear vision of how to serve the common good.",
        strengths: ["Insightful", "Creative", "Principled", "Passionate", "Altruistic"],
        careers: ["Counselor", "Psychologist", "Writer", "HR Development Trainer", "Professor"],
    },
    CareerRecommendation {
        code: "INTJ",
        title: "The Mastermind",
        description: "Innovative, independent, and strategic. You have a natural talent for analysis and an ability to see possibilities for improvement.",
        strengths: ["Strategic", "Independent", "Innovative", "Logical", "Determined"],
        careers: ["Scientist", "Engineer", "Investment Banker", "Software Developer", "Business Analyst"],
    },
    CareerRecommendation {
        code: "ISTP",
        title: "The Craftsman",
        description: "Observant, practical, and hands-on. You excel at understanding how mechanical things work and solving problems with logical efficiency.",
        strengths: ["Adaptable", "Practical", "Logical", "Observant", "Self-reliant"],
        careers: ["Mechanic", "Engineer", "Pilot", "Forensic Scientist", "Programmer"],
    },
    CareerRecommendation {
        code: "ISFP",
        title: "The Composer",
        description: "Gentle, sensitive, and artistic. You value personal space and time, with a strong aesthetic appreciation and a desire for harmony.",
        strengths: ["Artistic", "Sensitive", "Loyal", "Adaptable", "Harmonious"],
        careers: ["Artist", "Designer", "Veterinarian", "Chef", "Physical Therapist"],
    },
    CareerRecommendation {
        code: "INFP",
        title: "The Healer",
        description: "Idealistic, creative, and service-oriented. You seek to understand people and help them fulfill their potential.",
        strengths: ["Empathetic", "Creative", "Passionate", "Dedicated", "Open-minded"],
        careers: ["Writer", "Counselor", "HR Manager", "Graphic Designer", "Librarian"],
    },
    CareerRecommendation {
        code: "INTP",
        title: "The Architect",
        description: "Logical, original, and creative thinker. You have a thirst for knowledge and enjoy theoretical and abstract concepts.",
        strengths: ["Analytical", "Original", "Open-minded", "Objective", "Curious"],
        careers: ["Software Developer", "Scientist", "Architect", "Professor", "Research Analyst"],
    },
    CareerRecommendation {
        code: "ESTP",
        title: "The Dynamo",
        description: "Energetic, action-oriented, and pragmatic. You're adaptable, resourceful, and focused on immediate results.",
        strengths: ["Energetic", "Practical", "Persuasive", "Spontaneous", "Adaptable"],
        careers: ["Entrepreneur", "Sales Representative", "Marketing Executive", "Police Officer", "Paramedic"],
    },
    CareerRecommendation {
        code: "ESFP",
        title: "The Performer",
        description: "Outgoing, friendly, and spontaneous. You enjoy working with others and bringing a sense of fun and excitement to any situation.",
        strengths: ["Enthusiastic", "Friendly", "Adaptable", "Practical", "Observant"],
        careers: ["Event Planner", "Tour Guide", "Performer", "Sales Representative", "Public Relations Specialist"],
    },
    CareerRecommendation {
        code: "ENFP",
        title: "The Champion",
        description: "Enthusiastic, creative, and sociable. You see possibilities everywhere and get excited about new ideas and projects.",
        strengths: ["Enthusiastic", "Creative", "Sociable", "Perceptive", "Adaptable"],
        careers: ["Journalist", "Consultant", "Advertising Creative", "Public Relations", "Entrepreneur"],
    },
    CareerRecommendation {
        code: "ENTP",
        title: "The Visionary",
        description: "Quick, ingenious, and outspoken. You enjoy intellectual challenges and are skilled at developing new ideas and strategies.",
        strengths: ["Innovative", "Analytical", "Enterprising", "Adaptable", "Charismatic"],
        careers: ["Entrepreneur", "Lawyer", "Consultant", "Engineer", "Creative Director"],
    },
    CareerRecommendation {
        code: "ESTJ",
        title: "The Supervisor",
        description: "Practical, traditional, and organized. You value security and stability, with a talent for managing people and projects efficiently.",
        strengths: ["Organized", "Dedicated", "Practical", "Direct", "Reliable"],
        careers: ["Manager", "Judge", "Financial Officer", "School Principal", "Military Officer"],
    },
    CareerRecommendation {
        code: "ESFJ",
        title: "The Provider",
        description: "Warm-hearted, conscientious, and cooperative. You value harmony and are skilled at creating order and structure in your environment.",
        strengths: ["Supportive", "Reliable", "Conscientious", "Practical", "Cooperative"],
        careers: ["Teacher", "Healthcare Worker", "Sales Manager", "Public Relations", "Office Manager"],
    },
    CareerRecommendation {
        code: "ENFJ",
        title: "The Teacher",
        description: "Charismatic, empathetic, and responsible. You're naturally drawn to helping others develop and reach their potential.",
        strengths: ["Charismatic", "Empathetic", "Organized", "Inspiring", "Reliable"],
        careers: ["Teacher", "HR Manager", "Marketing Manager", "Counselor", "Sales Trainer"],
    },
    CareerRecommendation {
        code: "ENTJ",
        title: "The Commander",
        description: "Strategic, logical, and efficient. You're a natural leader who excels at finding ways to improve systems and processes.",
        strengths: ["Strategic", "Efficient", "Energetic", "Self-confident", "Decisive"],
        careers: ["Executive", "Lawyer", "Management Consultant", "University Professor", "Entrepreneur"],
    },
];

/// Returns the recommendation for a classified personality type.
pub fn lookup(code: PersonalityCode) -> Result<&'static CareerRecommendation, AssessmentError> {
    find(&code.to_string())
}

/// Lookup by raw string, e.g. a path parameter or a stored value.
/// Anything other than one of the 16 codes is `NotFound`.
pub fn lookup_str(code: &str) -> Result<&'static CareerRecommendation, AssessmentError> {
    find(code)
}

fn find(code: &str) -> Result<&'static CareerRecommendation, AssessmentError> {
    CAREER_TABLE.iter().find(|r| r.code == code).ok_or_else(|| {
        AssessmentError::NotFound(format!(
            "No results found for personality type '{code}'. Please retake the assessment."
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::classifier::classify;

    #[test]
    fn test_every_code_has_an_entry() {
        for code in PersonalityCode::all() {
            let rec = lookup(code).unwrap();
            assert_eq!(rec.code, code.to_string());
            assert!(!rec.title.is_empty());
            assert!(!rec.description.is_empty());
            assert!(rec.careers.iter().all(|c| !c.is_empty()));
            assert!(rec.strengths.iter().all(|s| !s.is_empty()));
        }
    }

    #[test]
    fn test_table_codes_are_unique() {
        let mut codes: Vec<&str> = CAREER_TABLE.iter().map(|r| r.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 16);
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        for bad in ["XXXX", "", "estj", "ESTJ ", "EST"] {
            assert!(
                matches!(lookup_str(bad), Err(AssessmentError::NotFound(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_estj_end_to_end() {
        let responses = ["E", "S", "T", "J", "E", "S", "T", "J", "E", "S", "T", "J"];
        let code = classify(&responses).unwrap();
        assert_eq!(code.to_string(), "ESTJ");
        let rec = lookup(code).unwrap();
        assert_eq!(rec.title, "The Supervisor");
        for career in [
            "Manager",
            "Judge",
            "Financial Officer",
            "School Principal",
            "Military Officer",
        ] {
            assert!(rec.careers.contains(&career), "{career}");
        }
    }

    #[test]
    fn test_infp_end_to_end() {
        let responses = ["I", "N", "F", "P", "I", "N", "F", "P", "I", "N", "F", "P"];
        let code = classify(&responses).unwrap();
        assert_eq!(code.to_string(), "INFP");
        assert_eq!(lookup(code).unwrap().title, "The Healer");
    }
}
