use crate::error::{Error, Result};
use crate::options::GenerationOptions;
use crate::random::RandomSource;
use crate::selector::select_words;
use crate::transform::{is_decoration, transform_words};
use log::debug;
use zeroize::Zeroizing;

pub const SEPARATOR: char = '-';

fn join_words(words: &[String]) -> Zeroizing<String> {
    let capacity = words.iter().map(String::len).sum::<usize>() + words.len();
    let mut password = Zeroizing::new(String::with_capacity(capacity));
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            password.push(SEPARATOR);
        }
        password.push_str(word);
    }
    password
}

pub fn generate_with(
    options: &GenerationOptions,
    rng: &mut RandomSource,
) -> Result<Zeroizing<String>> {
    options.validate()?;

    let words = Zeroizing::new(select_words(options.word_count, options, rng)?);
    let decorated = Zeroizing::new(transform_words(&words, options, rng)?);
    debug!(
        "Generated {} word passphrase ({:?} randomness)",
        decorated.len(),
        rng.entropy_kind()
    );

    Ok(join_words(&decorated))
}

/// Uses a fresh `RandomSource::from_entropy()`, which silently falls back to a
/// non-cryptographic generator when the OS source fails. Callers that must not
/// accept that build the source themselves, check `require_cryptographic()`
/// and call `generate_with`.
pub fn generate(options: &GenerationOptions) -> Result<Zeroizing<String>> {
    let mut rng = RandomSource::from_entropy();
    generate_with(options, &mut rng)
}

pub fn base_words(password: &str) -> Vec<String> {
    password
        .split(SEPARATOR)
        .map(|segment| {
            segment
                .chars()
                .filter(|c| !is_decoration(*c))
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

pub fn rederive_with(
    password: &str,
    options: &GenerationOptions,
    rng: &mut RandomSource,
) -> Result<Zeroizing<String>> {
    options.validate()?;

    let words = Zeroizing::new(base_words(password));
    if words.is_empty() {
        return Err(Error::MalformedPassword(
            "no words left after removing digits and symbols".into(),
        ));
    }

    let decorated = Zeroizing::new(transform_words(&words, options, rng)?);
    debug!("Re-derived {} word passphrase", decorated.len());

    Ok(join_words(&decorated))
}

/// Same randomness caveat as `generate`.
pub fn rederive(password: &str, options: &GenerationOptions) -> Result<Zeroizing<String>> {
    let mut rng = RandomSource::from_entropy();
    rederive_with(password, options, &mut rng)
}
