//! Runtime settings read from `STUDYMAP_*` environment variables.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::mindmap::KeywordLinkStrategy;

pub const ENV_MAX_KEYWORDS: &str = "STUDYMAP_MAX_KEYWORDS";
pub const ENV_MAX_RECOMMENDATIONS: &str = "STUDYMAP_MAX_RECOMMENDATIONS";
pub const ENV_MIN_SYLLABUS_CHARS: &str = "STUDYMAP_MIN_SYLLABUS_CHARS";
pub const ENV_KEYWORD_LINKS: &str = "STUDYMAP_KEYWORD_LINKS";
pub const ENV_DEMO_EXAMS: &str = "STUDYMAP_DEMO_EXAMS";
pub const ENV_RNG_SEED: &str = "STUDYMAP_RNG_SEED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AdvisorConfig {
    /// Keywords extracted per syllabus
    #[validate(range(min = 1, max = 50))]
    pub max_keywords: usize,
    /// Cap on the final recommendation list
    #[validate(range(min = 1, max = 20))]
    pub max_recommendations: usize,
    /// Shorter syllabi are rejected at the request boundary
    #[validate(range(min = 1))]
    pub min_syllabus_chars: usize,
    pub keyword_links: bool,
    pub demo_exams: bool,
    /// Fixed seed for the variety tier; `None` draws from OS entropy
    pub rng_seed: Option<u64>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            max_keywords: 15,
            max_recommendations: 6,
            min_syllabus_chars: 50,
            keyword_links: false,
            demo_exams: false,
            rng_seed: None,
        }
    }
}

impl AdvisorConfig {
    /// Load from the process environment, reading `.env` first when present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            max_keywords: parse_var(ENV_MAX_KEYWORDS)?.unwrap_or(defaults.max_keywords),
            max_recommendations: parse_var(ENV_MAX_RECOMMENDATIONS)?
                .unwrap_or(defaults.max_recommendations),
            min_syllabus_chars: parse_var(ENV_MIN_SYLLABUS_CHARS)?
                .unwrap_or(defaults.min_syllabus_chars),
            keyword_links: parse_flag(ENV_KEYWORD_LINKS)?.unwrap_or(defaults.keyword_links),
            demo_exams: parse_flag(ENV_DEMO_EXAMS)?.unwrap_or(defaults.demo_exams),
            rng_seed: parse_var(ENV_RNG_SEED)?,
        };

        config
            .validate()
            .map_err(|e| AppError::Config(format!("Invalid settings: {}", e)))?;
        Ok(config)
    }

    pub fn keyword_link_strategy(&self) -> KeywordLinkStrategy {
        if self.keyword_links {
            KeywordLinkStrategy::SubstringOverlap
        } else {
            KeywordLinkStrategy::Disabled
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match read_var(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} must be a non-negative integer, got '{}'", name, raw))),
    }
}

fn parse_flag(name: &str) -> Result<Option<bool>, AppError> {
    let Some(raw) = read_var(name) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(AppError::Config(format!("{} must be a boolean, got '{}'", name, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 6] = [
        ENV_MAX_KEYWORDS,
        ENV_MAX_RECOMMENDATIONS,
        ENV_MIN_SYLLABUS_CHARS,
        ENV_KEYWORD_LINKS,
        ENV_DEMO_EXAMS,
        ENV_RNG_SEED,
    ];

    /// Every variable, unset unless overridden
    fn vars(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS
            .iter()
            .map(|name| {
                let value = overrides.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
                (*name, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars(vars(&[]), || {
            let config = AdvisorConfig::from_env().unwrap();
            assert_eq!(config, AdvisorConfig::default());
            assert_eq!(config.keyword_link_strategy(), KeywordLinkStrategy::Disabled);
        });
    }

    #[test]
    fn test_overrides() {
        let overrides = [
            (ENV_MAX_KEYWORDS, "20"),
            (ENV_MAX_RECOMMENDATIONS, "3"),
            (ENV_KEYWORD_LINKS, "true"),
            (ENV_DEMO_EXAMS, "1"),
            (ENV_RNG_SEED, "42"),
        ];
        temp_env::with_vars(vars(&overrides), || {
            let config = AdvisorConfig::from_env().unwrap();
            assert_eq!(config.max_keywords, 20);
            assert_eq!(config.max_recommendations, 3);
            assert!(config.demo_exams);
            assert_eq!(config.rng_seed, Some(42));
            assert_eq!(
                config.keyword_link_strategy(),
                KeywordLinkStrategy::SubstringOverlap
            );
        });
    }

    #[test]
    fn test_invalid_values_are_errors() {
        temp_env::with_vars(vars(&[(ENV_MAX_KEYWORDS, "lots")]), || {
            assert!(matches!(AdvisorConfig::from_env(), Err(AppError::Config(_))));
        });

        temp_env::with_vars(vars(&[(ENV_MAX_RECOMMENDATIONS, "0")]), || {
            assert!(matches!(AdvisorConfig::from_env(), Err(AppError::Config(_))));
        });

        temp_env::with_vars(vars(&[(ENV_DEMO_EXAMS, "maybe")]), || {
            assert!(matches!(AdvisorConfig::from_env(), Err(AppError::Config(_))));
        });
    }
}
