//! Language preference for user-facing messages

use serde::{Deserialize, Serialize};

/// Language preference for internationalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    /// Extract language from Accept-Language header
    ///
    /// Only the first listed language is considered.
    pub fn from_accept_language(header: &str) -> Self {
        let first = header
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        if first.starts_with("zh") {
            Language::Chinese
        } else {
            Language::English
        }
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_accept_language() {
        assert_eq!(Language::from_accept_language("zh-CN,zh;q=0.9"), Language::Chinese);
        assert_eq!(Language::from_accept_language("en-US,zh;q=0.5"), Language::English);
        assert_eq!(Language::from_accept_language(""), Language::English);
    }
}
