use crate::error::Result;
use crate::options::{GenerationOptions, injection_count};
use crate::random::RandomSource;
use log::trace;

pub const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

pub const SYMBOLS: &[char] = &['!', '@', '#', '$', '%', '&', '*', '='];

pub fn is_decoration(c: char) -> bool {
    DIGITS.contains(&c) || SYMBOLS.contains(&c)
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Inserts `c` at a uniformly random interior position. Words of two
/// characters or fewer have no interior and are returned untouched.
pub fn insert_interior(word: &str, c: char, rng: &mut RandomSource) -> Result<String> {
    let len = word.chars().count();
    if len <= 2 {
        return Ok(word.to_string());
    }

    // Positions 1..len put the new character after the first and before the
    // last existing character.
    let position = 1 + rng.uniform(len - 1)?;
    let byte_index = word
        .char_indices()
        .nth(position)
        .map(|(i, _)| i)
        .unwrap_or(word.len());

    let mut out = String::with_capacity(word.len() + c.len_utf8());
    out.push_str(&word[..byte_index]);
    out.push(c);
    out.push_str(&word[byte_index..]);
    Ok(out)
}

pub fn inject(
    words: &mut [String],
    alphabet: &[char],
    density: f64,
    rng: &mut RandomSource,
) -> Result<()> {
    if words.is_empty() {
        return Ok(());
    }

    let k = injection_count(words.len(), density);
    for index in rng.sample_indices(words.len(), k)? {
        let c = *rng.choose(alphabet)?;
        let updated = insert_interior(&words[index], c, rng)?;
        trace!("Word {} decorated ({} -> {} chars)", index, words[index].len(), updated.len());
        words[index] = updated;
    }

    Ok(())
}

pub fn transform_words(
    words: &[String],
    options: &GenerationOptions,
    rng: &mut RandomSource,
) -> Result<Vec<String>> {
    let mut out: Vec<String> = if options.include_capitals {
        words.iter().map(|w| capitalize(w)).collect()
    } else {
        words.to_vec()
    };

    if options.include_numbers {
        inject(&mut out, DIGITS, options.character_density, rng)?;
    }
    if options.include_specials {
        inject(&mut out, SYMBOLS, options.character_density, rng)?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn plain_options() -> GenerationOptions {
        GenerationOptions {
            include_capitals: false,
            include_numbers: false,
            include_specials: false,
            ..Default::default()
        }
    }

    fn strip(word: &str) -> String {
        word.chars().filter(|c| !is_decoration(*c)).collect()
    }

    #[test]
    fn test_symbol_alphabet() {
        assert_eq!(SYMBOLS.len(), 8);
        assert!(!SYMBOLS.contains(&'-'));
        assert_eq!(DIGITS.len(), 10);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("river"), "River");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("Stone"), "Stone");
    }

    #[test]
    fn test_capitals_all_or_nothing() {
        let mut rng = RandomSource::from_entropy();
        let base = words(&["river", "forest", "stone", "maple", "cloud", "delta"]);

        let options = GenerationOptions {
            include_capitals: true,
            character_density: 0.2,
            ..plain_options()
        };
        let out = transform_words(&base, &options, &mut rng).unwrap();
        assert!(out.iter().all(|w| w.chars().next().unwrap().is_uppercase()));

        let out = transform_words(&base, &plain_options(), &mut rng).unwrap();
        assert_eq!(out, base);
    }

    #[test]
    fn test_insert_interior_positions() {
        let mut rng = RandomSource::from_entropy();
        for _ in 0..500 {
            let out = insert_interior("abc", '7', &mut rng).unwrap();
            assert!(out == "a7bc" || out == "ab7c", "unexpected {}", out);
        }
    }

    #[test]
    fn test_insert_interior_short_words() {
        let mut rng = RandomSource::from_entropy();
        assert_eq!(insert_interior("ab", '1', &mut rng).unwrap(), "ab");
        assert_eq!(insert_interior("a", '1', &mut rng).unwrap(), "a");
        assert_eq!(insert_interior("", '1', &mut rng).unwrap(), "");
    }

    #[test]
    fn test_insert_interior_multibyte() {
        let mut rng = RandomSource::from_entropy();
        for _ in 0..100 {
            let out = insert_interior("ñandú", '#', &mut rng).unwrap();
            assert_eq!(out.chars().count(), 6);
            assert!(!out.starts_with('#') && !out.ends_with('#'));
            assert_eq!(strip(&out), "ñandú");
        }
    }

    #[test]
    fn test_injection_touches_k_words() {
        let mut rng = RandomSource::from_entropy();
        let base = words(&["river", "forest", "stone", "maple", "cloud"]);

        for density in [0.2, 0.4, 0.6, 1.0] {
            let options = GenerationOptions {
                include_numbers: true,
                character_density: density,
                ..plain_options()
            };
            let expected = injection_count(base.len(), density);

            for _ in 0..100 {
                let out = transform_words(&base, &options, &mut rng).unwrap();
                let touched = out.iter().zip(&base).filter(|(o, b)| o != b).count();
                assert_eq!(touched, expected, "density {}", density);

                for word in &out {
                    let digits = word.chars().filter(|c| c.is_ascii_digit()).count();
                    assert!(digits <= 1);
                    assert!(!word.starts_with(|c: char| c.is_ascii_digit()));
                    assert!(!word.ends_with(|c: char| c.is_ascii_digit()));
                }
            }
        }
    }

    #[test]
    fn test_independent_channels() {
        let mut rng = RandomSource::from_entropy();
        let base = words(&["river", "forest", "stone", "maple"]);
        let options = GenerationOptions {
            include_numbers: true,
            include_specials: true,
            character_density: 0.5,
            ..plain_options()
        };

        for _ in 0..100 {
            let out = transform_words(&base, &options, &mut rng).unwrap();
            let with_digit = out
                .iter()
                .filter(|w| w.chars().any(|c| DIGITS.contains(&c)))
                .count();
            let with_symbol = out
                .iter()
                .filter(|w| w.chars().any(|c| SYMBOLS.contains(&c)))
                .count();
            assert_eq!(with_digit, 2);
            assert_eq!(with_symbol, 2);

            let stripped: Vec<String> = out.iter().map(|w| strip(w)).collect();
            assert_eq!(stripped, base);
        }
    }

    #[test]
    fn test_short_words_never_mutated() {
        let mut rng = RandomSource::from_entropy();
        let base = words(&["ox", "by", "river", "at"]);
        let options = GenerationOptions {
            include_numbers: true,
            include_specials: true,
            character_density: 1.0,
            ..plain_options()
        };

        for _ in 0..100 {
            let out = transform_words(&base, &options, &mut rng).unwrap();
            assert_eq!(out[0], "ox");
            assert_eq!(out[1], "by");
            assert_eq!(out[3], "at");
            assert_eq!(out[2].chars().count(), 7);
        }
    }
}
