use thiserror::Error;

pub const MIN_POOL_SIZE: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Insufficient word pool: {available} words available, {required} required")]
    InsufficientWordPool { available: usize, required: usize },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Cannot sample from an empty range")]
    EmptyRange,

    #[error("Sampling range {0} exceeds 32 bits")]
    RangeTooLarge(usize),

    #[error("Malformed password: {0}")]
    MalformedPassword(String),

    #[error("No cryptographic random source available")]
    DegradedRandomness,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_insufficient_pool() {
        let err = Error::InsufficientWordPool {
            available: 12,
            required: MIN_POOL_SIZE,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient word pool: 12 words available, 25 required"
        );
    }

    #[test]
    fn test_display_invalid_options() {
        let err = Error::InvalidOptions("word count must be between 2 and 6, got 9".into());
        assert!(err.to_string().starts_with("Invalid options:"));
        assert!(err.to_string().contains("got 9"));
    }

    #[test]
    fn test_display_range_too_large() {
        let err = Error::RangeTooLarge(5_000_000_000);
        assert_eq!(err.to_string(), "Sampling range 5000000000 exceeds 32 bits");
    }

    #[test]
    fn test_errors_compare() {
        assert_eq!(Error::EmptyRange, Error::EmptyRange);
        assert_ne!(Error::EmptyRange, Error::DegradedRandomness);
    }
}
