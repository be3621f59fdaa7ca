pub mod analysis;
pub mod error;
pub mod generator;
pub mod history;
pub mod options;
pub mod random;
pub mod selector;
pub mod transform;
pub mod wordlist;

pub use analysis::{ComplexityReport, StrengthLevel, score};
pub use error::{Error, Result};
pub use generator::{generate, generate_with, rederive, rederive_with};
pub use history::{History, HistoryEntry};
pub use options::GenerationOptions;
pub use random::{EntropyKind, RandomSource};
pub use wordlist::{Category, Locale, get_catalog, get_words};
