//! MBTI classifier: reduces a complete response sequence to a 4-letter code.
//!
//! Each dimension emits its first letter (E/S/T/J) only when that letter's
//! count is strictly greater than its opposite. Equal counts resolve to the
//! second letter (I/N/F/P); stored results depend on this, so it must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assessment::error::AssessmentError;
use crate::assessment::questionnaire::{Dimension, TraitLetter, QUESTION_COUNT};

/// A derived personality type such as `ESTJ`. One letter per dimension, in
/// `Dimension::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonalityCode([TraitLetter; 4]);

impl PersonalityCode {
    /// All 16 valid codes, ordered by dimension with first letters first.
    #[cfg(test)]
    pub fn all() -> Vec<PersonalityCode> {
        let mut codes = Vec::with_capacity(16);
        for ei in pair(Dimension::EnergyFocus) {
            for sn in pair(Dimension::Perception) {
                for tf in pair(Dimension::Judgement) {
                    for jp in pair(Dimension::Lifestyle) {
                        codes.push(PersonalityCode([ei, sn, tf, jp]));
                    }
                }
            }
        }
        codes
    }

    pub fn letter(&self, dimension: Dimension) -> TraitLetter {
        self.0[dimension_index(dimension)]
    }

    /// Whether the code carries `letter` in its dimension's position.
    pub fn has(&self, letter: TraitLetter) -> bool {
        self.letter(letter.dimension()) == letter
    }
}

#[cfg(test)]
fn pair(dimension: Dimension) -> [TraitLetter; 2] {
    let (a, b) = dimension.letters();
    [a, b]
}

fn dimension_index(dimension: Dimension) -> usize {
    match dimension {
        Dimension::EnergyFocus => 0,
        Dimension::Perception => 1,
        Dimension::Judgement => 2,
        Dimension::Lifestyle => 3,
    }
}

impl fmt::Display for PersonalityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.0 {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl FromStr for PersonalityCode {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let not_found = || AssessmentError::NotFound(format!("'{s}' is not a personality type"));

        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(not_found());
        }
        let mut letters = [TraitLetter::E; 4];
        for (i, dim) in Dimension::ALL.into_iter().enumerate() {
            let letter = TraitLetter::from_char(chars[i]).ok_or_else(not_found)?;
            if letter.dimension() != dim {
                return Err(not_found());
            }
            letters[i] = letter;
        }
        Ok(PersonalityCode(letters))
    }
}

impl TryFrom<String> for PersonalityCode {
    type Error = AssessmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PersonalityCode> for String {
    fn from(code: PersonalityCode) -> Self {
        code.to_string()
    }
}

/// Classifies raw answer strings, as submitted by a client.
///
/// Fails with `InvalidInput` unless there are exactly 12 entries and every
/// entry is one of the eight uppercase trait letters.
pub fn classify<S: AsRef<str>>(responses: &[S]) -> Result<PersonalityCode, AssessmentError> {
    check_length(responses.len())?;
    let letters = responses
        .iter()
        .map(|r| r.as_ref().parse::<TraitLetter>())
        .collect::<Result<Vec<_>, _>>()?;
    classify_letters(&letters)
}

/// Classifies an already-typed sequence. Tallies the whole sequence; which
/// question produced a letter does not matter here.
pub fn classify_letters(responses: &[TraitLetter]) -> Result<PersonalityCode, AssessmentError> {
    check_length(responses.len())?;

    let count = |letter: TraitLetter| responses.iter().filter(|&&r| r == letter).count();

    let mut code = [TraitLetter::E; 4];
    for (i, dim) in Dimension::ALL.into_iter().enumerate() {
        let (first, second) = dim.letters();
        code[i] = if count(first) > count(second) {
            first
        } else {
            second
        };
    }
    Ok(PersonalityCode(code))
}

fn check_length(len: usize) -> Result<(), AssessmentError> {
    if len != QUESTION_COUNT {
        return Err(AssessmentError::InvalidInput(format!(
            "expected {QUESTION_COUNT} responses, got {len}"
        )));
    }
    Ok(())
}
