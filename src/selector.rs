use crate::error::{Error, MIN_POOL_SIZE, Result};
use crate::options::GenerationOptions;
use crate::random::RandomSource;
use crate::wordlist::{get_words, normalize_word};
use log::{debug, trace};
use std::collections::HashSet;

pub fn is_similar(a: &str, b: &str) -> bool {
    let prefix_a: Vec<char> = a.chars().take(2).collect();
    let prefix_b: Vec<char> = b.chars().take(2).collect();
    if prefix_a != prefix_b {
        return false;
    }

    a.chars().count().abs_diff(b.chars().count()) <= 1
}

pub fn word_pool(options: &GenerationOptions) -> Vec<String> {
    let bounds = options.min_word_length..=options.max_word_length;
    let mut seen = HashSet::new();

    get_words(options.locale, options.word_category)
        .iter()
        .map(|word| normalize_word(word))
        .filter(|word| bounds.contains(&word.chars().count()))
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

pub fn select_words(
    count: usize,
    options: &GenerationOptions,
    rng: &mut RandomSource,
) -> Result<Vec<String>> {
    let pool = word_pool(options);
    debug!(
        "Word pool for {}/{} with lengths {}..={}: {} words",
        options.locale,
        options.word_category,
        options.min_word_length,
        options.max_word_length,
        pool.len()
    );

    select_from_pool(&pool, count, options.avoid_similar_words, rng)
}

pub fn select_from_pool(
    pool: &[String],
    count: usize,
    avoid_similar: bool,
    rng: &mut RandomSource,
) -> Result<Vec<String>> {
    if pool.len() < MIN_POOL_SIZE {
        return Err(Error::InsufficientWordPool {
            available: pool.len(),
            required: MIN_POOL_SIZE,
        });
    }
    if pool.len() < count {
        return Err(Error::InsufficientWordPool {
            available: pool.len(),
            required: count,
        });
    }

    let mut taken = vec![false; pool.len()];
    let mut selected: Vec<usize> = Vec::with_capacity(count);
    let max_attempts = pool.len() * 2;
    let mut attempts = 0;

    while selected.len() < count && attempts < max_attempts {
        attempts += 1;
        let index = rng.uniform(pool.len())?;
        if taken[index] {
            continue;
        }

        let candidate = &pool[index];
        if avoid_similar && selected.iter().any(|&s| is_similar(&pool[s], candidate)) {
            trace!("Rejected \"{}\" as similar to an earlier pick", candidate);
            continue;
        }

        taken[index] = true;
        selected.push(index);
    }

    if selected.len() < count {
        debug!(
            "Similarity filter left {} of {} words after {} attempts, relaxing",
            selected.len(),
            count,
            attempts
        );
    }

    while selected.len() < count {
        let remaining: Vec<usize> = (0..pool.len()).filter(|&i| !taken[i]).collect();
        let index = *rng.choose(&remaining)?;
        taken[index] = true;
        selected.push(index);
    }

    Ok(selected.into_iter().map(|i| pool[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlist::{Category, Locale};

    fn synthetic_pool(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_is_similar() {
        assert!(is_similar("river", "rivet"));
        assert!(is_similar("river", "rivers"));
        assert!(is_similar("stone", "stove"));
        assert!(!is_similar("river", "riverbank"));
        assert!(!is_similar("river", "forest"));
        assert!(!is_similar("stone", "sound"));
        assert!(is_similar("a", "a"));
    }

    #[test]
    fn test_select_count_and_bounds() {
        let mut rng = RandomSource::from_entropy();
        for category in Category::ALL {
            for word_count in 2..=6 {
                let options = GenerationOptions {
                    word_count,
                    word_category: category,
                    min_word_length: 5,
                    max_word_length: 8,
                    ..Default::default()
                };

                let words = select_words(word_count, &options, &mut rng).unwrap();
                assert_eq!(words.len(), word_count);

                let unique: HashSet<_> = words.iter().collect();
                assert_eq!(unique.len(), word_count, "Duplicate words in {:?}", words);

                for word in &words {
                    let len = word.chars().count();
                    assert!((5..=8).contains(&len), "\"{}\" out of bounds", word);
                }
            }
        }
    }

    #[test]
    fn test_select_spanish_is_normalized() {
        let mut rng = RandomSource::from_entropy();
        let options = GenerationOptions {
            locale: Locale::Spanish,
            word_count: 6,
            ..Default::default()
        };

        for _ in 0..50 {
            let words = select_words(6, &options, &mut rng).unwrap();
            for word in words {
                assert!(word.chars().all(|c| c.is_ascii_lowercase()), "{}", word);
            }
        }
    }

    #[test]
    fn test_insufficient_pool() {
        let mut rng = RandomSource::from_entropy();
        let options = GenerationOptions {
            word_category: Category::Common,
            min_word_length: 15,
            max_word_length: 15,
            ..Default::default()
        };

        let pool = word_pool(&options);
        let err = select_words(4, &options, &mut rng).unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientWordPool {
                available: pool.len(),
                required: MIN_POOL_SIZE,
            }
        );
    }

    #[test]
    fn test_pool_smaller_than_count() {
        let mut rng = RandomSource::from_entropy();
        let pool: Vec<String> = (0..MIN_POOL_SIZE).map(|i| format!("word{:02}", i)).collect();

        let err = select_from_pool(&pool, MIN_POOL_SIZE + 1, false, &mut rng).unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientWordPool {
                available: MIN_POOL_SIZE,
                required: MIN_POOL_SIZE + 1,
            }
        );
    }

    #[test]
    fn test_avoid_similar() {
        let mut rng = RandomSource::from_entropy();
        let options = GenerationOptions {
            word_count: 6,
            ..Default::default()
        };

        for _ in 0..200 {
            let words = select_words(6, &options, &mut rng).unwrap();
            for (i, a) in words.iter().enumerate() {
                for b in &words[i + 1..] {
                    assert!(!is_similar(a, b), "{} and {} are similar", a, b);
                }
            }
        }
    }

    #[test]
    fn test_relaxes_when_everything_is_similar() {
        let mut rng = RandomSource::from_entropy();
        let pool: Vec<String> = (0..30).map(|i| format!("ab{:03}", i)).collect();

        let words = select_from_pool(&pool, 5, true, &mut rng).unwrap();
        assert_eq!(words.len(), 5);
        let unique: HashSet<_> = words.iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn test_exhausts_pool_exactly() {
        let mut rng = RandomSource::from_entropy();
        let pool = synthetic_pool(&[
            "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
            "juliett", "kilo", "lima", "mike", "november", "oscar", "papa", "quebec", "romeo",
            "sierra", "tango", "uniform", "victor", "whiskey", "xray", "yankee",
        ]);

        let words = select_from_pool(&pool, pool.len(), true, &mut rng).unwrap();
        let unique: HashSet<_> = words.iter().collect();
        assert_eq!(unique.len(), pool.len());
    }

    #[test]
    fn test_word_pool_filters_and_dedupes() {
        let options = GenerationOptions {
            min_word_length: 6,
            max_word_length: 6,
            ..Default::default()
        };
        let pool = word_pool(&options);
        assert!(pool.iter().all(|w| w.chars().count() == 6));

        let unique: HashSet<_> = pool.iter().collect();
        assert_eq!(unique.len(), pool.len());
        assert_eq!(pool.iter().filter(|w| *w == "memory").count(), 1);
    }
}
