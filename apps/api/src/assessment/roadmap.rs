//! Career roadmap text shown with the results.
//!
//! Every line comes from a branch table keyed on a single letter of the
//! personality code. Either side of a branch is fixed text.

use serde::Serialize;

use crate::assessment::classifier::PersonalityCode;
use crate::assessment::questionnaire::TraitLetter;

/// Items used when the code has `letter`, otherwise `fallback`.
struct Branch {
    letter: TraitLetter,
    matched: &'static [&'static str],
    fallback: &'static [&'static str],
}

impl Branch {
    fn select(&self, code: &PersonalityCode) -> &'static [&'static str] {
        if code.has(self.letter) {
            self.matched
        } else {
            self.fallback
        }
    }
}

struct StageTemplate {
    title: &'static str,
    intro: &'static str,
    branches: &'static [Branch],
    always: &'static [&'static str],
}

const SKILL_DEVELOPMENT: StageTemplate = StageTemplate {
    title: "Skill Development",
    intro: "Focus on developing these key skills that align with your personality type:",
    branches: &[
        Branch {
            letter: TraitLetter::T,
            matched: &[
                "Analytical thinking and problem-solving",
                "Logical decision making",
                "Strategic planning",
            ],
            fallback: &[
                "Emotional intelligence",
                "Interpersonal communication",
                "Conflict resolution",
            ],
        },
        Branch {
            letter: TraitLetter::E,
            matched: &["Team collaboration and leadership"],
            fallback: &["Independent work and deep focus"],
        },
    ],
    always: &[],
};

const EDUCATION_PATH: StageTemplate = StageTemplate {
    title: "Education Path",
    intro: "Consider these educational opportunities:",
    branches: &[
        Branch {
            letter: TraitLetter::T,
            matched: &["Degree programs in technical fields, sciences, or business"],
            fallback: &["Degree programs in humanities, arts, or social sciences"],
        },
        Branch {
            letter: TraitLetter::J,
            matched: &["Certifications in project management or structured methodologies"],
            fallback: &["Certifications in creative fields or flexible approaches"],
        },
        Branch {
            letter: TraitLetter::S,
            matched: &["Workshops on practical skills and applications"],
            fallback: &["Workshops on theoretical concepts and innovations"],
        },
    ],
    always: &[],
};

const CAREER_GROWTH: StageTemplate = StageTemplate {
    title: "Career Growth",
    intro: "As you progress in your career, consider these advancement opportunities:",
    branches: &[Branch {
        letter: TraitLetter::E,
        matched: &["Leadership and management roles", "Team coordination positions"],
        fallback: &[
            "Specialized expert roles",
            "Research and development positions",
        ],
    }],
    always: &[
        "Consulting opportunities in your field",
        "Entrepreneurial ventures aligned with your strengths",
    ],
};

static STAGES: [StageTemplate; 3] = [SKILL_DEVELOPMENT, EDUCATION_PATH, CAREER_GROWTH];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapStage {
    pub step: usize,
    pub title: &'static str,
    pub intro: &'static str,
    pub items: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerRoadmap {
    pub stages: Vec<RoadmapStage>,
}

pub fn build_roadmap(code: &PersonalityCode) -> CareerRoadmap {
    let stages = STAGES
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            let mut items: Vec<&'static str> = stage
                .branches
                .iter()
                .flat_map(|b| b.select(code).iter().copied())
                .collect();
            items.extend_from_slice(stage.always);
            RoadmapStage {
                step: i + 1,
                title: stage.title,
                intro: stage.intro,
                items,
            }
        })
        .collect();
    CareerRoadmap { stages }
}
