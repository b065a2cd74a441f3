//! LIKE pattern escaping
//!
//! Turns a user-supplied literal into something safe to embed in a SQL
//! `LIKE`/`ILIKE` pattern. The escape character must be named in the
//! statement's `ESCAPE` clause.

use crate::config::{LikeConfig, DEFAULT_ESCAPE_CHAR};

/// Escapes `%`, `_` and the escape character itself.
///
/// The escape character is doubled first so the escapes added for `%`
/// and `_` are not escaped again.
///
/// ```ignore
/// assert_eq!(escape_like("50%_off", '*'), "50*%*_off");
/// ```
pub fn escape_like(text: &str, escape_char: char) -> String {
    let escape = escape_char.to_string();
    text.replace(escape_char, &escape.repeat(2))
        .replace('%', &format!("{}%", escape))
        .replace('_', &format!("{}_", escape))
}

/// `escape_like` with the default `*` escape character
pub fn escape_like_default(text: &str) -> String {
    escape_like(text, DEFAULT_ESCAPE_CHAR)
}

impl LikeConfig {
    pub fn escape(&self, text: &str) -> String {
        escape_like(text, self.escape_char)
    }

    pub fn contains(&self, text: &str) -> LikePattern {
        LikePattern::contains(text, self.escape_char)
    }

    pub fn starts_with(&self, text: &str) -> LikePattern {
        LikePattern::starts_with(text, self.escape_char)
    }

    pub fn ends_with(&self, text: &str) -> LikePattern {
        LikePattern::ends_with(text, self.escape_char)
    }
}

/// An escaped pattern together with the escape character it relies on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    pattern: String,
    escape_char: char,
}

impl LikePattern {
    /// Matches values equal to `text`
    pub fn exact(text: &str, escape_char: char) -> Self {
        Self {
            pattern: escape_like(text, escape_char),
            escape_char,
        }
    }

    /// Matches values containing `text`
    pub fn contains(text: &str, escape_char: char) -> Self {
        Self {
            pattern: format!("%{}%", escape_like(text, escape_char)),
            escape_char,
        }
    }

    /// Matches values starting with `text`
    pub fn starts_with(text: &str, escape_char: char) -> Self {
        Self {
            pattern: format!("{}%", escape_like(text, escape_char)),
            escape_char,
        }
    }

    /// Matches values ending with `text`
    pub fn ends_with(text: &str, escape_char: char) -> Self {
        Self {
            pattern: format!("%{}", escape_like(text, escape_char)),
            escape_char,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn escape_char(&self) -> char {
        self.escape_char
    }

    /// Bind value for the statement's `ESCAPE` clause
    pub fn escape_literal(&self) -> String {
        self.escape_char.to_string()
    }
}
