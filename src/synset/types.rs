//! Scalar field types attached to a synset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};

/// Part of speech of a synset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pos {
    Noun,
    Verb,
    Adverb,
    Adjective,
}

impl Pos {
    /// All parts of speech, in declaration order.
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adverb, Pos::Adjective];

    /// Single-character tag used by the XML format.
    pub fn as_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adverb => 'r',
            Pos::Adjective => 'a',
        }
    }

    /// Parse a single-character tag.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'n' => Ok(Pos::Noun),
            'v' => Ok(Pos::Verb),
            'r' => Ok(Pos::Adverb),
            'a' => Ok(Pos::Adjective),
            other => Err(LexiconError::malformed(format!(
                "unknown part-of-speech tag '{other}'"
            ))),
        }
    }

    /// Upper-case name, as printed by `Lexicon::describe`.
    pub fn name(self) -> &'static str {
        match self {
            Pos::Noun => "NOUN",
            Pos::Verb => "VERB",
            Pos::Adverb => "ADVERB",
            Pos::Adjective => "ADJECTIVE",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Pos {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Pos::from_char(c),
            _ => Err(LexiconError::malformed(format!(
                "part-of-speech tag must be a single character, got '{s}'"
            ))),
        }
    }
}

/// How a synset maps onto its SUMO concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SumoType {
    Hypernym,
    Equivalent,
    Instance,
    Bracket,
    Points,
}

impl SumoType {
    /// Single-character tag used by the XML format.
    pub fn as_char(self) -> char {
        match self {
            SumoType::Hypernym => '+',
            SumoType::Equivalent => '=',
            SumoType::Instance => '@',
            SumoType::Bracket => '[',
            SumoType::Points => ':',
        }
    }

    /// Parse a single-character tag.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '+' => Ok(SumoType::Hypernym),
            '=' => Ok(SumoType::Equivalent),
            '@' => Ok(SumoType::Instance),
            '[' => Ok(SumoType::Bracket),
            ':' => Ok(SumoType::Points),
            other => Err(LexiconError::malformed(format!(
                "unknown SUMO type tag '{other}'"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SumoType::Hypernym => "HYPERNYM",
            SumoType::Equivalent => "EQUIVALENT",
            SumoType::Instance => "INSTANCE",
            SumoType::Bracket => "BRACKET",
            SumoType::Points => "POINTS",
        }
    }
}

impl fmt::Display for SumoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for SumoType {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => SumoType::from_char(c),
            _ => Err(LexiconError::malformed(format!(
                "SUMO type tag must be a single character, got '{s}'"
            ))),
        }
    }
}

/// SentiWordNet scores: positive, negative and objective.
///
/// Each component lies in `[0, 1]` and the three add up to exactly `1.0`.
/// The sum is compared with `==`, so inputs such as `0.7 + 0.2 + 0.1` that
/// do not add up exactly in binary floating point are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    positive: f64,
    negative: f64,
    objective: f64,
}

impl Sentiment {
    /// Create validated sentiment scores.
    pub fn new(positive: f64, negative: f64, objective: f64) -> Result<Self> {
        for (name, value) in [
            ("positive", positive),
            ("negative", negative),
            ("objective", objective),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(LexiconError::invalid_argument(format!(
                    "sentiment {name} score must be between 0 and 1, got {value}"
                )));
            }
        }

        let sum = positive + negative + objective;
        if sum != 1.0 {
            return Err(LexiconError::invalid_argument(format!(
                "sentiment scores must add up to 1, got {sum}"
            )));
        }

        Ok(Sentiment {
            positive,
            negative,
            objective,
        })
    }

    pub fn positive(&self) -> f64 {
        self.positive
    }

    pub fn negative(&self) -> f64 {
        self.negative
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Scores as a `[P, N, O]` array.
    pub fn to_array(&self) -> [f64; 3] {
        [self.positive, self.negative, self.objective]
    }
}

impl TryFrom<&[f64]> for Sentiment {
    type Error = LexiconError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match values {
            [p, n, o] => Sentiment::new(*p, *n, *o),
            _ => Err(LexiconError::invalid_argument(format!(
                "sentiment expects exactly 3 scores, got {}",
                values.len()
            ))),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.positive, self.negative, self.objective
        )
    }
}
