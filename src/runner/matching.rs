//! @ai:module:intent Decide whether an agent answer matches the expected answer
//! @ai:module:layer domain
//! @ai:module:public_api AnswerMatcher
//! @ai:module:stateless true

use crate::config::MatchMode;
use regex::Regex;

/// @ai:intent Compares responses against expected answers under a match mode
pub struct AnswerMatcher {
    mode: MatchMode,
    whitespace_regex: Regex,
}

impl AnswerMatcher {
    /// @ai:effects pure
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            whitespace_regex: Regex::new(r"\s+").expect("Invalid regex"),
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// @ai:intent Match a response to an expected answer
    /// @ai:example ("  Paris \n", "Paris") -> true
    /// @ai:example ("paris", "Paris") -> false in exact mode, true in normalized mode
    /// @ai:effects pure
    pub fn is_correct(&self, response: &str, expected: &str) -> bool {
        match self.mode {
            MatchMode::Exact => response.trim() == expected,
            MatchMode::Normalized => self.normalize(response) == self.normalize(expected),
        }
    }

    fn normalize(&self, text: &str) -> String {
        self.whitespace_regex
            .replace_all(text.trim(), " ")
            .to_lowercase()
    }
}

impl Default for AnswerMatcher {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}
