use crate::constants::*;
use lazy_static::lazy_static;
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("{0} is not set")]
    NotSet(&'static str),
    #[error("Failed to parse {key}={value}: {reason}")]
    Malformed {
        key: &'static str,
        value: String,
        reason: String,
    },
}

lazy_static! {
    pub static ref ETH_URL: String =
        env::var("ETH_URL").unwrap_or_else(|_| DEFAULT_ETH_URL.to_string());
    pub static ref ETHERSCAN_API_URL: String =
        env::var("ETHERSCAN_API_URL").unwrap_or_else(|_| DEFAULT_ETHERSCAN_API_URL.to_string());
    pub static ref ARTIFACTS_DIR: PathBuf = env::var("ARTIFACTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACTS_DIR));
}

/// Reads `key` from the environment and parses it, falling back to `default` when unset.
/// A value that is set but unparseable is an error rather than a silent fallback.
pub fn parse_env<T>(key: &'static str, default: T) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value.trim().parse::<T>().map_err(|e| EnvError::Malformed {
            key,
            reason: e.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

pub fn require_env(key: &'static str) -> Result<String, EnvError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(EnvError::NotSet(key)),
    }
}

pub fn optional_env(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_and_value() {
        env::remove_var("FRAME_CONFIG_TEST_UNSET");
        assert_eq!(parse_env("FRAME_CONFIG_TEST_UNSET", 7u64), Ok(7));

        env::set_var("FRAME_CONFIG_TEST_SET", " 42 ");
        assert_eq!(parse_env("FRAME_CONFIG_TEST_SET", 7u64), Ok(42));
    }

    #[test]
    fn test_parse_env_malformed() {
        env::set_var("FRAME_CONFIG_TEST_MALFORMED", "ten");
        let err = parse_env("FRAME_CONFIG_TEST_MALFORMED", 10u64).unwrap_err();
        match err {
            EnvError::Malformed { key, value, .. } => {
                assert_eq!(key, "FRAME_CONFIG_TEST_MALFORMED");
                assert_eq!(value, "ten");
            }
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_require_env() {
        env::set_var("FRAME_CONFIG_TEST_EMPTY", "");
        assert_eq!(
            require_env("FRAME_CONFIG_TEST_EMPTY"),
            Err(EnvError::NotSet("FRAME_CONFIG_TEST_EMPTY"))
        );
        env::set_var("FRAME_CONFIG_TEST_KEY", "abc");
        assert_eq!(require_env("FRAME_CONFIG_TEST_KEY"), Ok("abc".to_string()));
        assert_eq!(optional_env("FRAME_CONFIG_TEST_EMPTY"), None);
    }
}
