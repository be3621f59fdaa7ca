use crate::error::{Error, Result};
use crate::wordlist::{Category, Locale};
use serde::{Deserialize, Serialize};

pub const MIN_WORD_COUNT: usize = 2;
pub const MAX_WORD_COUNT: usize = 6;

pub const MIN_WORD_LENGTH: usize = 4;
pub const MAX_WORD_LENGTH: usize = 15;

pub const MIN_DENSITY: f64 = 0.2;
pub const MAX_DENSITY: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub word_count: usize,
    pub include_capitals: bool,
    pub include_numbers: bool,
    pub include_specials: bool,
    pub word_category: Category,
    #[serde(default)]
    pub locale: Locale,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub character_density: f64,
    pub avoid_similar_words: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            word_count: 4,
            include_capitals: true,
            include_numbers: true,
            include_specials: true,
            word_category: Category::Mixed,
            locale: Locale::English,
            min_word_length: 4,
            max_word_length: 10,
            character_density: 0.5,
            avoid_similar_words: true,
        }
    }
}

impl GenerationOptions {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&self.word_count) {
            return Err(Error::InvalidOptions(format!(
                "word count must be between {} and {}, got {}",
                MIN_WORD_COUNT, MAX_WORD_COUNT, self.word_count
            )));
        }

        if self.min_word_length > self.max_word_length {
            return Err(Error::InvalidOptions(format!(
                "minimum word length {} exceeds maximum {}",
                self.min_word_length, self.max_word_length
            )));
        }

        for (name, value) in [
            ("minimum", self.min_word_length),
            ("maximum", self.max_word_length),
        ] {
            if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&value) {
                return Err(Error::InvalidOptions(format!(
                    "{} word length must be between {} and {}, got {}",
                    name, MIN_WORD_LENGTH, MAX_WORD_LENGTH, value
                )));
            }
        }

        let density = self.character_density;
        if !density.is_finite() || !(MIN_DENSITY..=MAX_DENSITY).contains(&density) {
            return Err(Error::InvalidOptions(format!(
                "character density must be between {} and {}, got {}",
                MIN_DENSITY, MAX_DENSITY, density
            )));
        }

        Ok(())
    }
}

pub fn injection_count(words: usize, density: f64) -> usize {
    let k = (words as f64 * density).floor() as usize;
    k.max(1).min(words)
}
