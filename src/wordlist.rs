// This file is part of Lexipass.
//
// Copyright (c) 2026  The Lexipass developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::generator::SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Mixed,
    Common,
    Nature,
    Technology,
    Abstract,
}

impl Category {
    pub const CONCRETE: [Category; 4] = [
        Category::Common,
        Category::Nature,
        Category::Technology,
        Category::Abstract,
    ];

    pub const ALL: [Category; 5] = [
        Category::Mixed,
        Category::Common,
        Category::Nature,
        Category::Technology,
        Category::Abstract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mixed => "mixed",
            Category::Common => "common",
            Category::Nature => "nature",
            Category::Technology => "technology",
            Category::Abstract => "abstract",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Spanish];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Spanish => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn raw_words(locale: Locale, category: Category) -> &'static str {
    match (locale, category) {
        (Locale::English, Category::Common) => include_str!("../assets/en/common.txt"),
        (Locale::English, Category::Nature) => include_str!("../assets/en/nature.txt"),
        (Locale::English, Category::Technology) => include_str!("../assets/en/technology.txt"),
        (Locale::English, Category::Abstract) => include_str!("../assets/en/abstract.txt"),
        (Locale::Spanish, Category::Common) => include_str!("../assets/es/common.txt"),
        (Locale::Spanish, Category::Nature) => include_str!("../assets/es/nature.txt"),
        (Locale::Spanish, Category::Technology) => include_str!("../assets/es/technology.txt"),
        (Locale::Spanish, Category::Abstract) => include_str!("../assets/es/abstract.txt"),
        (_, Category::Mixed) => "",
    }
}

pub fn normalize_word(word: &str) -> String {
    word.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && *c != SEPARATOR)
        .flat_map(char::to_lowercase)
        .collect()
}

pub struct Catalog {
    locale: Locale,
    categories: HashMap<Category, Vec<String>>,
}

impl Catalog {
    fn load(locale: Locale) -> Self {
        let mut categories = HashMap::with_capacity(Category::ALL.len());
        let mut mixed = Vec::new();
        let mut seen = HashSet::new();

        for category in Category::CONCRETE {
            let words: Vec<String> = raw_words(locale, category)
                .lines()
                .map(normalize_word)
                .filter(|word| !word.is_empty())
                .collect();

            for word in &words {
                if seen.insert(word.clone()) {
                    mixed.push(word.clone());
                }
            }
            categories.insert(category, words);
        }
        categories.insert(Category::Mixed, mixed);

        Self { locale, categories }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn words(&self, category: Category) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

static ENGLISH: OnceLock<Catalog> = OnceLock::new();
static SPANISH: OnceLock<Catalog> = OnceLock::new();

pub fn get_catalog(locale: Locale) -> &'static Catalog {
    let cell = match locale {
        Locale::English => &ENGLISH,
        Locale::Spanish => &SPANISH,
    };
    cell.get_or_init(|| Catalog::load(locale))
}

pub fn get_words(locale: Locale, category: Category) -> &'static [String] {
    get_catalog(locale).words(category)
}
