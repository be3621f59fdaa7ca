use crate::generator::SEPARATOR;
use serde::Serialize;
use std::fmt;

pub const LOWERCASE_POOL: u32 = 26;
pub const UPPERCASE_POOL: u32 = 26;
pub const DIGIT_POOL: u32 = 10;
pub const SYMBOL_POOL: u32 = 32;

const BREAKPOINTS: [(f64, f64); 6] = [
    (0.0, 0.0),
    (28.0, 20.0),
    (40.0, 40.0),
    (60.0, 60.0),
    (128.0, 80.0),
    (256.0, 100.0),
];

const PLAIN_DICTIONARY_FACTOR: f64 = 0.3;
const DECORATED_DICTIONARY_FACTOR: f64 = 0.7;
const LOW_VARIETY_THRESHOLD: usize = 3;
const LOW_VARIETY_PENALTY: f64 = 10.0;
const EXTRA_WORD_BONUS: f64 = 5.0;

const SHORT_LENGTH: usize = 8;
const SHORT_PENALTY: f64 = 10.0;
const LONG_LENGTH: usize = 20;
const LONG_BONUS: f64 = 10.0;

pub const FEEDBACK_EMPTY: &str = "Password is empty";
pub const FEEDBACK_ADD_LOWERCASE: &str = "Add lowercase letters";
pub const FEEDBACK_ADD_UPPERCASE: &str = "Add uppercase letters";
pub const FEEDBACK_ADD_DIGITS: &str = "Add numbers";
pub const FEEDBACK_ADD_SYMBOLS: &str = "Add symbols";
pub const FEEDBACK_PLAIN_DICTIONARY: &str =
    "Dictionary words without numbers or symbols are easy to guess";
pub const FEEDBACK_DICTIONARY: &str = "Dictionary words are weaker than their length suggests";
pub const FEEDBACK_LOW_VARIETY: &str = "Mix at least three character types";
pub const FEEDBACK_EXTRA_WORDS: &str = "Each extra word adds strength";
pub const FEEDBACK_SHORT: &str = "Use at least 8 characters";
pub const FEEDBACK_LONG: &str = "20 or more characters adds strength";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Fair,
    Good,
    Strong,
    Excellent,
}

impl StrengthLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            StrengthLevel::Excellent
        } else if score >= 60.0 {
            StrengthLevel::Strong
        } else if score >= 40.0 {
            StrengthLevel::Good
        } else if score >= 20.0 {
            StrengthLevel::Fair
        } else {
            StrengthLevel::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::Weak => "weak",
            StrengthLevel::Fair => "fair",
            StrengthLevel::Good => "good",
            StrengthLevel::Strong => "strong",
            StrengthLevel::Excellent => "excellent",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterClasses {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl CharacterClasses {
    pub fn of(password: &str) -> Self {
        let mut classes = Self::default();
        for c in password.chars().filter(|c| *c != SEPARATOR) {
            if c.is_lowercase() {
                classes.lowercase = true;
            } else if c.is_uppercase() {
                classes.uppercase = true;
            } else if c.is_ascii_digit() {
                classes.digit = true;
            } else {
                classes.symbol = true;
            }
        }
        classes
    }

    pub fn pool_size(&self) -> u32 {
        [
            (self.lowercase, LOWERCASE_POOL),
            (self.uppercase, UPPERCASE_POOL),
            (self.digit, DIGIT_POOL),
            (self.symbol, SYMBOL_POOL),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, size)| size)
        .sum()
    }

    pub fn variety(&self) -> usize {
        [self.lowercase, self.uppercase, self.digit, self.symbol]
            .iter()
            .filter(|present| **present)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    pub score: f64,
    pub level: StrengthLevel,
    pub feedback: Vec<String>,
    pub entropy_bits: f64,
}

pub fn estimate_entropy(password: &str) -> f64 {
    let length = password.chars().filter(|c| *c != SEPARATOR).count();
    let pool = CharacterClasses::of(password).pool_size();
    if pool == 0 || length == 0 {
        return 0.0;
    }

    length as f64 * f64::from(pool).log2()
}

pub fn entropy_to_score(entropy: f64) -> f64 {
    if entropy.is_nan() || entropy <= 0.0 {
        return 0.0;
    }

    for pair in BREAKPOINTS.windows(2) {
        let (lo_bits, lo_score) = pair[0];
        let (hi_bits, hi_score) = pair[1];
        if entropy <= hi_bits {
            let t = (entropy - lo_bits) / (hi_bits - lo_bits);
            return lo_score + t * (hi_score - lo_score);
        }
    }

    100.0
}

#[derive(Default)]
struct Feedback(Vec<String>);

impl Feedback {
    fn push(&mut self, message: &str) {
        if !self.0.iter().any(|m| m == message) {
            self.0.push(message.to_string());
        }
    }
}

pub fn score(password: &str) -> ComplexityReport {
    if password.is_empty() {
        return ComplexityReport {
            score: 0.0,
            level: StrengthLevel::Weak,
            feedback: vec![FEEDBACK_EMPTY.to_string()],
            entropy_bits: 0.0,
        };
    }

    let classes = CharacterClasses::of(password);
    let entropy_bits = estimate_entropy(password);
    let mut score = entropy_to_score(entropy_bits);
    let mut feedback = Feedback::default();

    if !classes.lowercase {
        feedback.push(FEEDBACK_ADD_LOWERCASE);
    }
    if !classes.uppercase {
        feedback.push(FEEDBACK_ADD_UPPERCASE);
    }
    if !classes.digit {
        feedback.push(FEEDBACK_ADD_DIGITS);
    }
    if !classes.symbol {
        feedback.push(FEEDBACK_ADD_SYMBOLS);
    }

    let words = password
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .count();

    if words >= 2 {
        if !classes.digit && !classes.symbol {
            score *= PLAIN_DICTIONARY_FACTOR;
            feedback.push(FEEDBACK_PLAIN_DICTIONARY);
        } else {
            score *= DECORATED_DICTIONARY_FACTOR;
            feedback.push(FEEDBACK_DICTIONARY);
        }

        if classes.variety() < LOW_VARIETY_THRESHOLD {
            score -= LOW_VARIETY_PENALTY;
            feedback.push(FEEDBACK_LOW_VARIETY);
        }

        score += EXTRA_WORD_BONUS * (words - 1) as f64;
        feedback.push(FEEDBACK_EXTRA_WORDS);
    }

    let length = password.chars().count();
    if length < SHORT_LENGTH {
        score -= SHORT_PENALTY;
        feedback.push(FEEDBACK_SHORT);
    } else if length >= LONG_LENGTH {
        score += LONG_BONUS;
        feedback.push(FEEDBACK_LONG);
    }

    let score = score.clamp(0.0, 100.0);

    ComplexityReport {
        score,
        level: StrengthLevel::from_score(score),
        feedback: feedback.0,
        entropy_bits,
    }
}
