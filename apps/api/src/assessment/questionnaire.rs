//! The fixed personality questionnaire and the incremental response builder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assessment::error::AssessmentError;

/// Number of questions a complete response sequence must answer.
pub const QUESTION_COUNT: usize = 12;

/// One of the eight trait letters a questionnaire option can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitLetter {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl TraitLetter {
    pub const ALL: [TraitLetter; 8] = [
        TraitLetter::E,
        TraitLetter::I,
        TraitLetter::S,
        TraitLetter::N,
        TraitLetter::T,
        TraitLetter::F,
        TraitLetter::J,
        TraitLetter::P,
    ];

    pub fn as_char(self) -> char {
        match self {
            TraitLetter::E => 'E',
            TraitLetter::I => 'I',
            TraitLetter::S => 'S',
            TraitLetter::N => 'N',
            TraitLetter::T => 'T',
            TraitLetter::F => 'F',
            TraitLetter::J => 'J',
            TraitLetter::P => 'P',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        TraitLetter::ALL.into_iter().find(|l| l.as_char() == c)
    }

    pub fn dimension(self) -> Dimension {
        match self {
            TraitLetter::E | TraitLetter::I => Dimension::EnergyFocus,
            TraitLetter::S | TraitLetter::N => Dimension::Perception,
            TraitLetter::T | TraitLetter::F => Dimension::Judgement,
            TraitLetter::J | TraitLetter::P => Dimension::Lifestyle,
        }
    }
}

impl fmt::Display for TraitLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for TraitLetter {
    type Err = AssessmentError;

    /// Accepts exactly one uppercase trait letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => TraitLetter::from_char(c).ok_or_else(|| {
                AssessmentError::InvalidInput(format!("'{s}' is not a trait letter"))
            }),
            _ => Err(AssessmentError::InvalidInput(format!(
                "'{s}' is not a trait letter"
            ))),
        }
    }
}

/// The four opposing letter pairs, in code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    EnergyFocus,
    Perception,
    Judgement,
    Lifestyle,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::EnergyFocus,
        Dimension::Perception,
        Dimension::Judgement,
        Dimension::Lifestyle,
    ];

    /// The (first, second) letters of the pair. Ties go to the second.
    pub fn letters(self) -> (TraitLetter, TraitLetter) {
        match self {
            Dimension::EnergyFocus => (TraitLetter::E, TraitLetter::I),
            Dimension::Perception => (TraitLetter::S, TraitLetter::N),
            Dimension::Judgement => (TraitLetter::T, TraitLetter::F),
            Dimension::Lifestyle => (TraitLetter::J, TraitLetter::P),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionOption {
    pub value: TraitLetter,
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: u8,
    pub question: &'static str,
    pub options: [QuestionOption; 2],
}

impl Question {
    pub fn accepts(&self, letter: TraitLetter) -> bool {
        self.options.iter().any(|o| o.value == letter)
    }
}

const fn opt(value: TraitLetter, text: &'static str) -> QuestionOption {
    QuestionOption { value, text }
}

pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        id: 1,
        question: "At a party, you:",
        options: [
            opt(TraitLetter::E, "Interact with many, including strangers"),
            opt(TraitLetter::I, "Interact with a few, known to you"),
        ],
    },
    Question {
        id: 2,
        question: "You are more:",
        options: [
            opt(TraitLetter::S, "Realistic than speculative"),
            opt(TraitLetter::N, "Speculative than realistic"),
        ],
    },
    Question {
        id: 3,
        question: "Is it worse to:",
        options: [
            opt(TraitLetter::T, "Have your head in the clouds"),
            opt(TraitLetter::F, "Be in a rut"),
        ],
    },
    Question {
        id: 4,
        question: "You are more impressed by:",
        options: [
            opt(TraitLetter::T, "Principles"),
            opt(TraitLetter::F, "Emotions"),
        ],
    },
    Question {
        id: 5,
        question: "You are drawn more to:",
        options: [
            opt(TraitLetter::J, "The structured and scheduled"),
            opt(TraitLetter::P, "The unstructured and unplanned"),
        ],
    },
    Question {
        id: 6,
        question: "You prefer to work:",
        options: [
            opt(TraitLetter::E, "In teams, collaborating with others"),
            opt(TraitLetter::I, "Alone or in small, familiar groups"),
        ],
    },
    Question {
        id: 7,
        question: "You tend to choose:",
        options: [
            opt(TraitLetter::S, "What is practical and works now"),
            opt(
                TraitLetter::N,
                "What is innovative and might work in the future",
            ),
        ],
    },
    Question {
        id: 8,
        question: "When making decisions, you typically rely on:",
        options: [
            opt(TraitLetter::T, "Logic and objective analysis"),
            opt(
                TraitLetter::F,
                "Personal values and how others will be affected",
            ),
        ],
    },
    Question {
        id: 9,
        question: "You prefer environments that are:",
        options: [
            opt(TraitLetter::J, "Organized with clear expectations"),
            opt(TraitLetter::P, "Flexible with room for spontaneity"),
        ],
    },
    Question {
        id: 10,
        question: "When solving problems, you prefer to:",
        options: [
            opt(TraitLetter::S, "Follow established methods and procedures"),
            opt(TraitLetter::N, "Explore new approaches and possibilities"),
        ],
    },
    Question {
        id: 11,
        question: "You get more satisfaction from:",
        options: [
            opt(TraitLetter::E, "Discussing ideas with others"),
            opt(TraitLetter::I, "Reflecting on ideas by yourself"),
        ],
    },
    Question {
        id: 12,
        question: "In your free time, you prefer to:",
        options: [
            opt(TraitLetter::J, "Plan activities in advance"),
            opt(TraitLetter::P, "Be spontaneous and go with the flow"),
        ],
    },
];

/// Collects answers one question at a time.
///
/// Each answer must be one of the current question's two letters. The
/// sequence can only be finished once every question has been answered.
#[derive(Debug, Clone, Default)]
pub struct ResponseSequence {
    answers: Vec<TraitLetter>,
}

impl ResponseSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The question awaiting an answer, or `None` once complete.
    pub fn current_question(&self) -> Option<&'static Question> {
        QUESTIONS.get(self.answers.len())
    }

    pub fn answer(&mut self, letter: TraitLetter) -> Result<(), AssessmentError> {
        let question = self.current_question().ok_or_else(|| {
            AssessmentError::InvalidInput("all questions are already answered".to_string())
        })?;
        if !question.accepts(letter) {
            return Err(AssessmentError::InvalidInput(format!(
                "'{letter}' is not an option for question {}",
                question.id
            )));
        }
        self.answers.push(letter);
        Ok(())
    }

    /// Steps back one question, discarding its answer.
    pub fn undo(&mut self) -> Option<TraitLetter> {
        self.answers.pop()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == QUESTION_COUNT
    }

    /// Progress through the questionnaire as a percentage (0–100).
    pub fn progress_percent(&self) -> f64 {
        self.answers.len() as f64 / QUESTION_COUNT as f64 * 100.0
    }

    pub fn finish(self) -> Result<Vec<TraitLetter>, AssessmentError> {
        if !self.is_complete() {
            return Err(AssessmentError::InvalidInput(format!(
                "questionnaire incomplete: {} of {QUESTION_COUNT} answered",
                self.answers.len()
            )));
        }
        Ok(self.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_question_pairs_one_dimension() {
        for q in QUESTIONS.iter() {
            let [a, b] = &q.options;
            assert_eq!(a.value.dimension(), b.value.dimension(), "question {}", q.id);
            assert_ne!(a.value, b.value);
        }
    }

    #[test]
    fn test_each_dimension_asked_three_times() {
        for dim in Dimension::ALL {
            let asked = QUESTIONS
                .iter()
                .filter(|q| q.options[0].value.dimension() == dim)
                .count();
            assert_eq!(asked, 3, "{dim:?}");
        }
    }

    #[test]
    fn test_parse_letter() {
        assert_eq!("E".parse::<TraitLetter>().unwrap(), TraitLetter::E);
        assert!("e".parse::<TraitLetter>().is_err());
        assert!("EI".parse::<TraitLetter>().is_err());
        assert!("".parse::<TraitLetter>().is_err());
        assert!("X".parse::<TraitLetter>().is_err());
    }

    #[test]
    fn test_builder_rejects_letter_outside_question_pair() {
        let mut seq = ResponseSequence::new();
        // Question 1 is E/I
        let err = seq.answer(TraitLetter::S).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidInput(_)));
        assert_eq!(seq.len(), 0);
    }

    #[test]
    fn test_builder_refuses_to_finish_early() {
        let mut seq = ResponseSequence::new();
        seq.answer(TraitLetter::E).unwrap();
        assert!(!seq.is_complete());
        assert!(seq.finish().is_err());
    }

    #[test]
    fn test_builder_full_pass_with_undo() {
        let mut seq = ResponseSequence::new();
        for q in QUESTIONS.iter() {
            seq.answer(q.options[1].value).unwrap();
        }
        assert!(seq.is_complete());
        assert!(seq.current_question().is_none());
        assert!(seq.answer(TraitLetter::E).is_err());

        assert_eq!(seq.undo(), Some(TraitLetter::P));
        assert_eq!(seq.current_question().map(|q| q.id), Some(12));
        seq.answer(TraitLetter::J).unwrap();

        let answers = seq.finish().unwrap();
        assert_eq!(answers.len(), QUESTION_COUNT);
        assert_eq!(answers[11], TraitLetter::J);
    }

    #[test]
    fn test_progress_percent() {
        let mut seq = ResponseSequence::new();
        assert_eq!(seq.progress_percent(), 0.0);
        for q in QUESTIONS.iter().take(3) {
            seq.answer(q.options[0].value).unwrap();
        }
        assert!((seq.progress_percent() - 25.0).abs() < f64::EPSILON);
    }
}
